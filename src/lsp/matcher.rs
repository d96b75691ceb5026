//! mccmd Signature Matcher
//!
//! Matches the parameters of a command line against the command's signatures.
//! A line either matches one signature exactly or produces a single error
//! describing the most useful thing to fix:
//!
//! 1. too many parameters for every signature,
//! 2. too few parameters for every signature,
//! 3. a correct prefix of a longer signature that stops early,
//! 4. otherwise the leftmost parameter with the wrong type across all
//!    signatures.

use super::grammar::Command;
use super::params::ParamType;
use thiserror::Error;

/// Where a match error points, counted in parameters (the command name excluded)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamPosition {
    /// The parameter at this index
    Index(usize),
    /// Just after the last supplied token
    AfterLast,
}

/// Why a command line failed to match
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("意外的参数: {token}")]
    UnexpectedParameter { token: String, position: usize },

    #[error("缺少{missing}个必要的参数，预期应该有{expected}个参数")]
    MissingParameters {
        missing: usize,
        expected: usize,
        position: usize,
    },

    #[error("缺少参数,预期应该是 {expected}")]
    MissingParameter { expected: ParamType, slot: usize },

    #[error("参数 {token} 类型错误,预期应该是 {expected}")]
    WrongType {
        token: String,
        expected: ParamType,
        position: usize,
    },
}

impl MatchError {
    /// Parameter the error should be reported at
    pub fn position(&self) -> ParamPosition {
        match self {
            Self::UnexpectedParameter { position, .. }
            | Self::MissingParameters { position, .. }
            | Self::WrongType { position, .. } => ParamPosition::Index(*position),
            Self::MissingParameter { .. } => ParamPosition::AfterLast,
        }
    }
}

/// A parameter bound to the type it matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedParam {
    pub kind: ParamType,
    pub value: String,
}

/// Outcome of matching one command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// No parameters typed yet; nothing to report
    Incomplete,
    /// Parameters match a signature exactly
    Success {
        signature_index: usize,
        params: Vec<TypedParam>,
    },
    /// Parameters match no signature
    Failure(MatchError),
}

impl MatchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The error, if matching failed
    pub fn error(&self) -> Option<&MatchError> {
        match self {
            Self::Failure(error) => Some(error),
            _ => None,
        }
    }
}

/// Index of the first slot of `signature` that `params` does not satisfy.
/// Slots past the end of `params` count as unsatisfied; parameters past the
/// end of `signature` are not examined.
fn first_failure(signature: &[ParamType], params: &[&str]) -> Option<usize> {
    signature
        .iter()
        .enumerate()
        .position(|(slot, kind)| !params.get(slot).is_some_and(|value| kind.accepts(value)))
}

/// Match command parameters against the command's signatures
pub fn match_signatures(command: Command, params: &[&str]) -> MatchResult {
    if params.first().map_or(true, |first| first.is_empty()) {
        return MatchResult::Incomplete;
    }

    let signatures = command.signatures();

    for (signature_index, signature) in signatures.iter().enumerate() {
        if signature.len() == params.len() && first_failure(signature, params).is_none() {
            return MatchResult::Success {
                signature_index,
                params: signature
                    .iter()
                    .zip(params)
                    .map(|(kind, value)| TypedParam {
                        kind: *kind,
                        value: value.to_string(),
                    })
                    .collect(),
            };
        }
    }

    let (min, max) = command.arity();

    if params.len() > max {
        return surplus(params, max);
    }

    if params.len() < min {
        return MatchResult::Failure(MatchError::MissingParameters {
            missing: min - params.len(),
            expected: min,
            position: params.len() - 1,
        });
    }

    // A longer signature whose leading slots are all satisfied: the user is
    // part-way through that form.
    let partial = signatures.iter().find(|signature| {
        signature.len() > params.len()
            && first_failure(signature, params) == Some(params.len())
    });
    if let Some(signature) = partial {
        return MatchResult::Failure(MatchError::MissingParameter {
            expected: signature[params.len()],
            slot: params.len(),
        });
    }

    // Every failure left is a wrong token: a signature failing at the slot
    // after the last parameter would have been a partial match. Only a line
    // longer than every signature has no failing signature at all.
    signatures
        .iter()
        .filter_map(|signature| {
            first_failure(signature, params).map(|slot| (slot, signature[slot]))
        })
        .min_by_key(|(slot, _)| *slot)
        .map_or_else(
            || surplus(params, max),
            |(position, expected)| {
                MatchResult::Failure(MatchError::WrongType {
                    token: params[position].to_string(),
                    expected,
                    position,
                })
            },
        )
}

/// The first parameter past the longest signature. `params` must be longer
/// than `max`.
fn surplus(params: &[&str], max: usize) -> MatchResult {
    MatchResult::Failure(MatchError::UnexpectedParameter {
        token: params[max].to_string(),
        position: max,
    })
}
