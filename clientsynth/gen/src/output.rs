//! Package loading, synthesis and output writing.
//!
//! This module drives a whole package through the synthesizer: it loads the
//! package description, synthesizes every method of every client, renders
//! the result, and writes it to disk atomically.
//!
//! ## Output Formats
//!
//! - **JSON** - A pretty-printed array of synthesized methods; the hand-off
//!   format for an external serializer
//! - **Listing** - Human-readable pseudo-code, one block per method
//!
//! ## Safety Guarantees
//!
//! - **Fail fast**: The first defect aborts the whole package; nothing is written
//! - **Atomic writes**: Uses temp file + rename pattern to prevent partial writes

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use clientsynth_define::Package;
use strum::{Display, EnumString};
use tracing::info;

use crate::config::Naming;
use crate::errors::{GeneratorError, SynthError};
use crate::ir::SynthesizedMethod;
use crate::synth::method::synthesize_method;
use crate::validation::validate_naming;

/// How synthesized methods are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON IR.
    #[default]
    Json,
    /// Human-readable listing.
    Listing,
}

/// Loads a package description from a `.json`, `.yaml` or `.yml` file.
///
/// ## Errors
///
/// Returns an error if the file cannot be read, has an unsupported
/// extension, or does not parse.
pub fn load_package(path: &Path) -> Result<Package, GeneratorError> {
    let display = path.display().to_string();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let text = fs::read_to_string(path).map_err(|e| GeneratorError::ReadError {
        path: display.clone(),
        source: e,
    })?;

    match extension.as_deref() {
        Some("json") => serde_json::from_str(&text).map_err(|e| GeneratorError::ParseError {
            path: display,
            message: e.to_string(),
        }),
        Some("yaml" | "yml") => {
            // Nested types use map-shaped enum tags, which serde_yaml only
            // accepts as `!tag` syntax; going through a JSON value keeps
            // both formats on the same shape.
            let parse_error = |message: String| GeneratorError::ParseError {
                path: display.clone(),
                message,
            };
            let value: serde_json::Value =
                serde_yaml::from_str(&text).map_err(|e| parse_error(e.to_string()))?;
            serde_json::from_value(value).map_err(|e| parse_error(e.to_string()))
        }
        _ => Err(GeneratorError::UnsupportedInput { path: display }),
    }
}

/// Synthesizes every method of every client in `package`, in declaration
/// order.
///
/// ## Errors
///
/// Returns the first defect, attributed to its method.
pub fn synthesize_package(
    package: &Package,
    naming: &Naming,
) -> Result<Vec<SynthesizedMethod>, SynthError> {
    info!(
        package = %package.name,
        clients = package.clients.len(),
        methods = package.method_count(),
        "synthesizing package"
    );

    let mut methods = Vec::with_capacity(package.method_count());
    for client in &package.clients {
        for method in &client.methods {
            methods.push(synthesize_method(
                &client.name,
                method,
                &package.types,
                naming,
            )?);
        }
    }
    Ok(methods)
}

/// Renders synthesized methods in the requested format.
///
/// ## Errors
///
/// Returns [`GeneratorError::SerializeError`] if JSON serialization fails.
pub fn render(methods: &[SynthesizedMethod], format: OutputFormat) -> Result<String, GeneratorError> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(methods)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Listing => Ok(methods
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Writes content to a file atomically using temp file + rename.
///
/// This prevents partial writes if the process is interrupted.
///
/// ## Arguments
///
/// * `path` - Target file path
/// * `content` - Content to write
///
/// ## Errors
///
/// Returns an error if:
/// - Parent directory creation fails
/// - Temp file write fails
/// - Rename fails
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Synthesizes a package and writes the rendered output.
///
/// This is the main entry point for the CLI. With `dry_run` set, or without
/// an output path, nothing is written and the rendered output is only
/// returned.
///
/// ## Returns
///
/// The rendered output.
///
/// ## Errors
///
/// Returns an error if:
/// - The naming configuration is invalid
/// - Any method has a structural defect
/// - File writing fails
pub fn generate_and_write(
    package: &Package,
    naming: &Naming,
    format: OutputFormat,
    output: Option<&Path>,
    dry_run: bool,
) -> Result<String, GeneratorError> {
    validate_naming(naming)?;

    let methods = synthesize_package(package, naming)?;
    let rendered = render(&methods, format)?;

    if let Some(path) = output
        && !dry_run
    {
        write_atomic(path, &rendered)?;
        info!(path = %path.display(), methods = methods.len(), %format, "wrote output");
    }

    Ok(rendered)
}
