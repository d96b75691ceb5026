//! Completion Context Resolution
//!
//! Works out what kind of value the user is typing from the text between the
//! start of the line and the cursor.

use super::params::ParamType;
use super::syntax::parse_command_line;

/// What the cursor position expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContext {
    /// A command name
    Command,
    /// A parameter value
    Param {
        /// Type expected by the first signature consistent with the typed prefix
        expected: ParamType,
        /// Types expected by every consistent signature, in declaration order
        alternatives: Vec<ParamType>,
    },
}

/// Whether `signature` reaches `slot` and accepts every token before it
fn consistent(signature: &[ParamType], typed: &[&str], slot: usize) -> bool {
    signature.len() > slot
        && typed
            .iter()
            .zip(signature.iter())
            .all(|(value, kind)| kind.accepts(value))
}

/// Resolve the completion context for the text before the cursor
pub fn resolve_context(prefix: &str) -> CompletionContext {
    let Some(line) = parse_command_line(prefix) else {
        return CompletionContext::Command;
    };

    let signatures = line.command.signatures();
    let params = line.param_values();
    let after_space = prefix.replace('\r', "").ends_with(' ');

    // A last token no consistent signature accepts yet is still being typed;
    // otherwise the next slot is the one to fill.
    let slot = match params.split_last() {
        Some((last, earlier))
            if !after_space
                && !signatures.iter().any(|signature| {
                    consistent(signature, earlier, earlier.len())
                        && signature[earlier.len()].accepts(last)
                }) =>
        {
            earlier.len()
        }
        _ => params.len(),
    };
    let typed = &params[..slot];

    let mut alternatives: Vec<ParamType> = Vec::new();
    for signature in signatures {
        if consistent(signature, typed, slot) && !alternatives.contains(&signature[slot]) {
            alternatives.push(signature[slot]);
        }
    }

    match alternatives.first() {
        Some(&expected) => CompletionContext::Param {
            expected,
            alternatives,
        },
        None => CompletionContext::Command,
    }
}
