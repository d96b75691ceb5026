//! mccmd Command Grammar
//!
//! The fixed table of commands and the parameter shapes each one accepts.

use super::params::ParamType;
use std::fmt;

/// One accepted parameter shape of a command
pub type Signature = &'static [ParamType];

const ABILITY_SIGNATURES: &[Signature] = &[
    &[ParamType::Selector, ParamType::Ability, ParamType::Boolean],
    &[ParamType::Selector, ParamType::Ability],
];

const ADVANCEMENT_SIGNATURES: &[Signature] = &[
    &[ParamType::GrantRevoke, ParamType::Selector, ParamType::Everything],
    &[
        ParamType::GrantRevoke,
        ParamType::Selector,
        ParamType::Only,
        ParamType::Advancement,
        ParamType::Criterion,
    ],
    &[
        ParamType::GrantRevoke,
        ParamType::Selector,
        ParamType::FromThroughUntil,
        ParamType::Advancement,
    ],
];

/// mccmd commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Ability,
    Advancement,
}

impl Command {
    /// Every known command, in completion order
    pub const ALL: [Command; 2] = [Self::Ability, Self::Advancement];

    /// Look up a command by name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }

    /// Command name as typed
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ability => "ability",
            Self::Advancement => "advancement",
        }
    }

    /// Accepted signatures in declaration order
    pub fn signatures(&self) -> &'static [Signature] {
        match self {
            Self::Ability => ABILITY_SIGNATURES,
            Self::Advancement => ADVANCEMENT_SIGNATURES,
        }
    }

    /// One-line summary
    pub fn detail(&self) -> &'static str {
        match self {
            Self::Ability => "赋予或剥夺玩家的能力",
            Self::Advancement => "给予或移除玩家的进度",
        }
    }

    /// Usage documentation
    pub fn documentation(&self) -> &'static str {
        match self {
            Self::Ability => {
                "ability <player: target> <ability: Ability> <value: Boolean> \nability <player: target> [ability: Ability]"
            }
            Self::Advancement => {
                "advancement (grant|revoke) <targets> everything \nadvancement (grant|revoke) <targets> only <advancement> [<criterion>] \nadvancement (grant|revoke) <targets> (from|through|until) <advancement>"
            }
        }
    }

    /// Shortest and longest signature lengths
    pub fn arity(&self) -> (usize, usize) {
        let lengths = self.signatures().iter().map(|signature| signature.len());
        let min = lengths.clone().min().unwrap_or(0);
        let max = lengths.max().unwrap_or(0);
        (min, max)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(Command::from_name("ability"), Some(Command::Ability));
        assert_eq!(Command::from_name("advancement"), Some(Command::Advancement));
        assert_eq!(Command::from_name("Ability"), None);
        assert_eq!(Command::from_name("give"), None);
    }

    #[test]
    fn test_signature_tags_are_registered() {
        for command in Command::ALL {
            for signature in command.signatures() {
                assert!(!signature.is_empty());
                for kind in signature.iter() {
                    assert_eq!(kind.tag().parse::<ParamType>().unwrap(), *kind);
                }
            }
        }
    }

    #[test]
    fn test_no_duplicate_shapes() {
        for command in Command::ALL {
            let signatures = command.signatures();
            for (i, a) in signatures.iter().enumerate() {
                for b in &signatures[i + 1..] {
                    assert_ne!(a, b, "{command} declares the same shape twice");
                }
            }
        }
    }

    #[test]
    fn test_arity() {
        assert_eq!(Command::Ability.arity(), (2, 3));
        assert_eq!(Command::Advancement.arity(), (3, 5));
    }
}
