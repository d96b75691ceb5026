//! Parameter types accepted by mccmd commands
//!
//! Every parameter slot of a command signature is one of the [`ParamType`]
//! kinds below. Each kind knows its tag (the name shown to the user in
//! diagnostics), how to validate a literal, and which literals to offer as
//! completions when the set is closed.

use crate::error::{MccmdError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Target selectors with optional `[key=value,...]` arguments, or a bare player name
static SELECTOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:@(?:e|r|s|p|a|c|v|initiator)(?:\[[^=\]]+=[^=\]]+(?:,[^=\]]+=[^=\]]+)*\])?|[a-zA-Z\x{4e00}-\x{9fa5}]+)$",
    )
    .expect("selector pattern is valid")
});

const SELECTORS: &[&str] = &["@e", "@r", "@s", "@p", "@a", "@c", "@v", "@initiator"];
const ABILITIES: &[&str] = &["worldbuilder", "mayfly", "mute"];
const BOOLEANS: &[&str] = &["true", "false"];
const GRANT_REVOKE: &[&str] = &["grant", "revoke"];
const FROM_THROUGH_UNTIL: &[&str] = &["from", "through", "until"];

/// Parameter kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Selector,
    Ability,
    Boolean,
    String,
    Number,
    GrantRevoke,
    Everything,
    Only,
    Advancement,
    Criterion,
    FromThroughUntil,
}

impl ParamType {
    /// Every registered parameter type
    pub const ALL: [ParamType; 11] = [
        Self::Selector,
        Self::Ability,
        Self::Boolean,
        Self::String,
        Self::Number,
        Self::GrantRevoke,
        Self::Everything,
        Self::Only,
        Self::Advancement,
        Self::Criterion,
        Self::FromThroughUntil,
    ];

    /// Tag used in diagnostics
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Selector => "selector",
            Self::Ability => "Ability",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Number => "number",
            Self::GrantRevoke => "grant|revoke",
            Self::Everything => "everything",
            Self::Only => "only",
            Self::Advancement => "advancement",
            Self::Criterion => "criterion",
            Self::FromThroughUntil => "from|through|until",
        }
    }

    /// Check whether a literal is a valid value of this type
    pub fn accepts(&self, literal: &str) -> bool {
        match self {
            Self::Selector => SELECTOR_PATTERN.is_match(literal),
            Self::Ability => ABILITIES.contains(&literal),
            Self::Boolean => BOOLEANS.contains(&literal),
            Self::GrantRevoke => GRANT_REVOKE.contains(&literal),
            Self::FromThroughUntil => FROM_THROUGH_UNTIL.contains(&literal),
            Self::Everything => literal == "everything",
            Self::Only => literal == "only",
            Self::String | Self::Advancement | Self::Criterion => !literal.is_empty(),
            Self::Number => is_number(literal),
        }
    }

    /// Literals offered as completions; empty for free-form types
    pub fn completions(&self) -> &'static [&'static str] {
        match self {
            Self::Selector => SELECTORS,
            Self::Ability => ABILITIES,
            Self::Boolean => BOOLEANS,
            Self::GrantRevoke => GRANT_REVOKE,
            Self::FromThroughUntil => FROM_THROUGH_UNTIL,
            Self::Everything => &["everything"],
            Self::Only => &["only"],
            Self::String | Self::Number | Self::Advancement | Self::Criterion => &[],
        }
    }
}

impl FromStr for ParamType {
    type Err = MccmdError;

    fn from_str(tag: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| MccmdError::UnknownParamType(tag.to_string()))
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Numeric literal check, with the literal forms of JavaScript's `Number()`:
/// a blank literal reads as zero, unsigned `0x`/`0o`/`0b` integers are
/// allowed, and `Infinity` is the only spelled-out value.
fn is_number(literal: &str) -> bool {
    let trimmed = literal.trim();
    if trimmed.is_empty() {
        return true;
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        return !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix));
    }

    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return true;
    }
    // `f64::from_str` also takes `inf`, `infinity` and `nan` in any case
    unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
        && trimmed.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_variables() {
        for selector in SELECTORS {
            assert!(ParamType::Selector.accepts(selector), "{selector}");
        }
        assert!(!ParamType::Selector.accepts("@x"));
        assert!(!ParamType::Selector.accepts("@"));
        assert!(!ParamType::Selector.accepts(""));
    }

    #[test]
    fn test_selector_arguments() {
        assert!(ParamType::Selector.accepts("@a[tag=builder]"));
        assert!(ParamType::Selector.accepts("@e[type=cow,r=10]"));
        assert!(!ParamType::Selector.accepts("@e[]"));
        assert!(!ParamType::Selector.accepts("@e[type]"));
        assert!(!ParamType::Selector.accepts("@e[a=b=c]"));
        assert!(!ParamType::Selector.accepts("@e[type=cow"));
    }

    #[test]
    fn test_selector_player_names() {
        assert!(ParamType::Selector.accepts("Steve"));
        assert!(ParamType::Selector.accepts("史蒂夫"));
        assert!(!ParamType::Selector.accepts("Steve2"));
        assert!(!ParamType::Selector.accepts("some_player"));
    }

    #[test]
    fn test_enumerated_types() {
        assert!(ParamType::Ability.accepts("mayfly"));
        assert!(!ParamType::Ability.accepts("flying"));
        assert!(ParamType::GrantRevoke.accepts("revoke"));
        assert!(!ParamType::GrantRevoke.accepts("Grant"));
        assert!(ParamType::FromThroughUntil.accepts("through"));
        assert!(ParamType::Everything.accepts("everything"));
        assert!(!ParamType::Everything.accepts("only"));
        assert!(ParamType::Only.accepts("only"));
    }

    #[test]
    fn test_boolean() {
        assert!(ParamType::Boolean.accepts("true"));
        assert!(ParamType::Boolean.accepts("false"));
        assert!(!ParamType::Boolean.accepts("True"));
        assert!(!ParamType::Boolean.accepts("1"));
    }

    #[test]
    fn test_free_form_types() {
        for kind in [ParamType::String, ParamType::Advancement, ParamType::Criterion] {
            assert!(kind.accepts("story/root"));
            assert!(!kind.accepts(""));
        }
    }

    #[test]
    fn test_number() {
        assert!(ParamType::Number.accepts("42"));
        assert!(ParamType::Number.accepts("-1.5"));
        assert!(ParamType::Number.accepts("1e3"));
        assert!(ParamType::Number.accepts(""));
        assert!(ParamType::Number.accepts(" 7 "));
        assert!(ParamType::Number.accepts(".5"));
        assert!(!ParamType::Number.accepts("NaN"));
        assert!(!ParamType::Number.accepts("ten"));
        assert!(!ParamType::Number.accepts("1_000"));
    }

    #[test]
    fn test_number_infinity_spelling() {
        for literal in ["Infinity", "+Infinity", "-Infinity"] {
            assert!(ParamType::Number.accepts(literal), "{literal}");
        }
        for literal in ["inf", "infinity", "INF", "-inf", "+infinity", "nan"] {
            assert!(!ParamType::Number.accepts(literal), "{literal}");
        }
    }

    #[test]
    fn test_number_radix_literals() {
        for literal in ["0x10", "0XfF", "0b11", "0o17"] {
            assert!(ParamType::Number.accepts(literal), "{literal}");
        }
        for literal in ["0x", "0b12", "0o8", "-0x10", "0x1.5"] {
            assert!(!ParamType::Number.accepts(literal), "{literal}");
        }
    }

    #[test]
    fn test_tags_round_trip() {
        for kind in ParamType::ALL {
            assert_eq!(kind.tag().parse::<ParamType>().unwrap(), kind);
        }
        assert!(matches!(
            "entity".parse::<ParamType>(),
            Err(MccmdError::UnknownParamType(tag)) if tag == "entity"
        ));
    }

    #[test]
    fn test_completions_are_accepted() {
        for kind in ParamType::ALL {
            for literal in kind.completions() {
                assert!(kind.accepts(literal), "{kind} should accept {literal}");
            }
        }
    }
}
