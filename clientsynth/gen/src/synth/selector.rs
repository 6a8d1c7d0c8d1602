//! Status-code classification.
//!
//! Builds the decision function dispatch uses to turn an HTTP status code
//! into a typed error:
//!
//! - no codes and no default: no classifier at all
//! - no codes, default present: always the default
//! - one code: that code's constructor, otherwise null (the default is not
//!   consulted)
//! - two or more codes: a switch in ascending code order where runs of
//!   adjacent codes sharing a constructor collapse into one case

use clientsynth_define::Errors;

use crate::ir::{ErrorCase, ErrorSelector};

/// Builds the error selector for a method's status mapping.
///
/// ## Examples
///
/// ```
/// use clientsynth_define::{ErrorCtor, Errors, Type};
/// use clientsynth_gen::ir::ErrorSelector;
/// use clientsynth_gen::synth::selector::build_error_selector;
///
/// let not_found = ErrorCtor::new(Type::pointer(Type::ident("NotFound")));
/// let errors = Errors::default()
///     .with_code(404, not_found.clone())
///     .with_code(405, not_found.clone());
///
/// let Some(ErrorSelector::Switch { cases, default }) = build_error_selector(&errors) else {
///     panic!("expected a switch");
/// };
/// assert_eq!(cases.len(), 1);
/// assert_eq!(cases[0].codes, vec![404, 405]);
/// assert!(default.is_none());
/// ```
pub fn build_error_selector(errors: &Errors) -> Option<ErrorSelector> {
    let mut codes = errors.codes.iter();
    match errors.codes.len() {
        0 => errors
            .default
            .clone()
            .map(|error| ErrorSelector::Always { error }),
        1 => codes.next().map(|(code, error)| ErrorSelector::Single {
            code: *code,
            error: error.clone(),
        }),
        _ => {
            let mut cases: Vec<ErrorCase> = Vec::new();
            for (code, error) in codes {
                match cases.last_mut() {
                    Some(case) if case.error == *error => case.codes.push(*code),
                    _ => cases.push(ErrorCase {
                        codes: vec![*code],
                        error: error.clone(),
                    }),
                }
            }
            Some(ErrorSelector::Switch {
                cases,
                default: errors.default.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ctor;
    use clientsynth_define::Literal;

    #[test]
    fn empty_mapping_has_no_classifier() {
        assert_eq!(build_error_selector(&Errors::default()), None);
    }

    #[test]
    fn default_only_always_returns_it() {
        let errors = Errors::default().with_default(ctor("ApiError"));
        assert_eq!(
            build_error_selector(&errors),
            Some(ErrorSelector::Always {
                error: ctor("ApiError")
            })
        );
    }

    // A present default is dropped when exactly one code is mapped. Kept as
    // observed; a switch with a default would be the alternative.
    #[test]
    fn single_code_ignores_default() {
        let errors = Errors::default()
            .with_code(404, ctor("NotFound"))
            .with_default(ctor("ApiError"));

        assert_eq!(
            build_error_selector(&errors),
            Some(ErrorSelector::Single {
                code: 404,
                error: ctor("NotFound"),
            })
        );
    }

    #[test]
    fn adjacent_equal_constructors_merge() {
        let errors = Errors::default()
            .with_code(404, ctor("E"))
            .with_code(405, ctor("E"))
            .with_code(409, ctor("F"));

        let Some(ErrorSelector::Switch { cases, default }) = build_error_selector(&errors) else {
            panic!("expected a switch");
        };
        assert_eq!(
            cases,
            vec![
                ErrorCase {
                    codes: vec![404, 405],
                    error: ctor("E"),
                },
                ErrorCase {
                    codes: vec![409],
                    error: ctor("F"),
                },
            ]
        );
        assert_eq!(default, None);
    }

    #[test]
    fn non_adjacent_equal_constructors_stay_separate() {
        let errors = Errors::default()
            .with_code(404, ctor("N"))
            .with_code(409, ctor("C"))
            .with_code(410, ctor("N"));

        let Some(ErrorSelector::Switch { cases, .. }) = build_error_selector(&errors) else {
            panic!("expected a switch");
        };
        let codes: Vec<_> = cases.iter().map(|case| case.codes.clone()).collect();
        assert_eq!(codes, vec![vec![404], vec![409], vec![410]]);
    }

    #[test]
    fn constructors_differing_by_argument_do_not_merge() {
        let errors = Errors::default()
            .with_code(500, ctor("Server").with_arg(Literal::Int(1)))
            .with_code(502, ctor("Server").with_arg(Literal::Int(2)));

        let Some(ErrorSelector::Switch { cases, .. }) = build_error_selector(&errors) else {
            panic!("expected a switch");
        };
        assert_eq!(cases.len(), 2);
    }

    #[test]
    fn switch_keeps_default() {
        let errors = Errors::default()
            .with_code(400, ctor("BadRequest"))
            .with_code(401, ctor("Unauthorized"))
            .with_default(ctor("ApiError"));

        let Some(ErrorSelector::Switch { default, .. }) = build_error_selector(&errors) else {
            panic!("expected a switch");
        };
        assert_eq!(default, Some(ctor("ApiError")));
    }
}
