//! Pre-synthesis validation.
//!
//! Checks the structural invariants a method description must satisfy
//! before any IR is produced, and validates the naming configuration.

use std::collections::{HashMap, HashSet};

use clientsynth_define::{Kind, Method, Param};

use crate::config::Naming;
use crate::errors::{GeneratorError, SynthError};
use crate::parser::is_identifier;
use crate::synth::path::check_slots;
use crate::synth::shape::ReturnShape;

/// Validates a method's structure.
///
/// Checks, in order: at most one body, at most one options parameter, path
/// parameters filling the template's slots, a supported return list, unique
/// argument names, and arguments that do not shadow generated locals
/// (including the `{arg}{bytes_suffix}` locals bound for marshaled values).
///
/// ## Errors
///
/// Returns the first [`SynthError`] found.
pub fn validate_method(method: &Method, naming: &Naming) -> Result<(), SynthError> {
    let bodies = method.params_of(Kind::Body).count();
    if bodies > 1 {
        return Err(SynthError::MultipleBodies { count: bodies });
    }

    let options = method.params_of(Kind::Opts).count();
    if options > 1 {
        return Err(SynthError::MultipleOptions { count: options });
    }

    let path: Vec<&Param> = method.params_of(Kind::Path).collect();
    check_slots(&method.path, &path)?;

    ReturnShape::from_returns(&method.returns)?;

    let mut args = HashSet::new();
    if let Some(param) = method.params.iter().find(|param| !args.insert(param.arg.as_str())) {
        return Err(SynthError::DuplicateArgument {
            arg: param.arg.clone(),
        });
    }

    let locals = naming.locals();
    if let Some(param) = method
        .params
        .iter()
        .find(|param| locals.iter().any(|(_, local)| *local == param.arg))
    {
        return Err(SynthError::ReservedIdentifier {
            arg: param.arg.clone(),
        });
    }

    let bytes_locals: Vec<String> = method
        .params
        .iter()
        .filter(|param| binds_bytes_local(param))
        .map(|param| naming.bytes_for(&param.arg))
        .collect();
    if let Some(param) = method
        .params
        .iter()
        .find(|param| bytes_locals.contains(&param.arg))
    {
        return Err(SynthError::ReservedIdentifier {
            arg: param.arg.clone(),
        });
    }

    Ok(())
}

/// Path, query and header values that marshal themselves are bound to an
/// `{arg}{bytes_suffix}` local before use.
fn binds_bytes_local(param: &Param) -> bool {
    matches!(param.kind, Kind::Path | Kind::Query | Kind::Header) && param.ty.supports_marshal()
}

/// Validates the naming configuration.
///
/// Every identifier must be a plain identifier and the locals must be
/// distinct from one another.
///
/// ## Errors
///
/// Returns [`GeneratorError::InvalidNaming`] for the first offending entry.
pub fn validate_naming(naming: &Naming) -> Result<(), GeneratorError> {
    for (field, value) in naming.locals().into_iter().chain(naming.members()) {
        if !is_identifier(value) {
            return Err(GeneratorError::InvalidNaming {
                field,
                value: value.to_string(),
                reason: "must be an ASCII identifier (letters, digits, underscores; no leading digit)"
                    .to_string(),
            });
        }
    }

    let suffix = &naming.bytes_suffix;
    if suffix.is_empty() || !suffix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(GeneratorError::InvalidNaming {
            field: "bytes_suffix",
            value: suffix.clone(),
            reason: "must be non-empty and contain only letters, digits or underscores".to_string(),
        });
    }

    let mut seen: HashMap<&str, &'static str> = HashMap::new();
    for (field, value) in naming.locals() {
        if let Some(previous) = seen.insert(value, field) {
            return Err(GeneratorError::InvalidNaming {
                field,
                value: value.to_string(),
                reason: format!("already used for '{previous}'"),
            });
        }
    }

    Ok(())
}
