//! Clientsynth method-body synthesizer.
//!
//! This crate turns method descriptions from `clientsynth-define` into an
//! explicit intermediate representation of a REST client method body. The
//! synthesizer decides:
//!
//! - How the request path is built from the template and path parameters
//! - How required and optional query parameters are encoded
//! - Which headers are set on the request
//! - How the decoded response is bound and returned (pointer, value, iterator)
//! - How HTTP status codes map to typed errors
//!
//! Turning the IR into concrete source text is left to an external
//! serializer. The IR serializes to JSON and renders as a text listing.
//!
//! ## Modules
//!
//! - [`synth`] - The component synthesizers and the method assembler
//! - [`ir`] - The intermediate representation and its listing
//! - [`output`] - Package loading, synthesis, rendering and file writing
//! - [`validation`] - Structural checks on methods and naming
//! - [`config`] - Naming configuration for generated locals
//! - [`parser`] - Path template utilities
//! - [`errors`] - Error types for the synthesizer
//!
//! ## Example Usage
//!
//! ```
//! use clientsynth_define::{Kind, Method, Param, Receiver, RestMethod, Type};
//! use clientsynth_gen::config::Naming;
//! use clientsynth_gen::synth::method::synthesize_method;
//!
//! let method = Method::new("Get", Receiver::new("c", "WidgetsClient"), RestMethod::Get, "/widgets/{id}")
//!     .with_param(Param::new("id", Kind::Path, Type::ident("string")))
//!     .with_return(Type::pointer(Type::ident("Widget")));
//!
//! let synthesized = synthesize_method("WidgetsClient", &method, &[], &Naming::default()).unwrap();
//! println!("{synthesized}");
//! ```
//!
//! ## Listing Structure
//!
//! For the method above, the listing reads:
//!
//! ```text
//! # WidgetsClient.Get
//! fn (c: WidgetsClient) Get(ctx: Context, id: string) -> (*Widget, error) {
//!     // path
//!     let p = format("/widgets/{id}", id)
//!
//!     // request
//!     req, err = c.backend.new_request(GET, p, null, null)
//!     if err != null { return null, err }
//!
//!     // dispatch
//!     var resp: Widget
//!     _, err = c.backend.do(ctx, req, &resp, null)
//!     if err != null { return null, err }
//!
//!     // return
//!     return &resp, null
//! }
//! ```

pub mod config;
pub mod errors;
pub mod ir;
pub mod output;
pub mod parser;
pub mod synth;
pub mod validation;

#[cfg(test)]
mod test_utils;
