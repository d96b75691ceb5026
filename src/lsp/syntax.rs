//! mccmd Line Tokenizer
//!
//! Splits a command line into tokens. Arguments are separated by exactly one
//! space, so runs of spaces produce empty tokens rather than being collapsed.

use super::grammar::Command;

/// A token of a command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token text (without the leading `/` for the command name)
    pub value: String,
    /// Byte offset of the token within the trimmed line
    pub index: usize,
}

/// A line whose first token names a known command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// The command named by the first token
    pub command: Command,
    /// All tokens, command name included
    pub tokens: Vec<Token>,
    /// Byte length of the leading whitespace removed before tokenizing
    pub indent: usize,
}

impl CommandLine {
    /// Parameter tokens following the command name
    pub fn params(&self) -> &[Token] {
        &self.tokens[1..]
    }

    /// Parameter values following the command name
    pub fn param_values(&self) -> Vec<&str> {
        self.params().iter().map(|token| token.value.as_str()).collect()
    }
}

/// Normalize a raw line: drop carriage returns, trim surrounding whitespace.
/// Returns the trimmed text and the byte length of the removed indentation.
fn normalize(line: &str) -> (String, usize) {
    let cleaned = line.replace('\r', "");
    let start = cleaned.trim_start();
    let indent = cleaned.len() - start.len();
    (start.trim_end().to_string(), indent)
}

/// Tokenize a single line
pub fn tokenize(line: &str) -> Vec<Token> {
    let (trimmed, _) = normalize(line);
    split_tokens(&trimmed)
}

fn split_tokens(trimmed: &str) -> Vec<Token> {
    let mut index = 0;
    let mut tokens: Vec<Token> = trimmed
        .split(' ')
        .map(|value| {
            let token = Token {
                value: value.to_string(),
                index,
            };
            index += value.len() + 1;
            token
        })
        .collect();

    if let Some(first) = tokens.first_mut() {
        if let Some(name) = first.value.strip_prefix('/') {
            first.value = name.to_string();
        }
    }

    tokens
}

/// Tokenize a line and recognize its command, if any
pub fn parse_command_line(line: &str) -> Option<CommandLine> {
    let (trimmed, indent) = normalize(line);
    let tokens = split_tokens(&trimmed);
    let command = Command::from_name(&tokens.first()?.value)?;

    Some(CommandLine {
        command,
        tokens,
        indent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.value.as_str()).collect()
    }

    #[test]
    fn test_tokenize_offsets() {
        let tokens = tokenize("ability @s mayfly");
        assert_eq!(values(&tokens), vec!["ability", "@s", "mayfly"]);
        assert_eq!(
            tokens.iter().map(|t| t.index).collect::<Vec<_>>(),
            vec![0, 8, 11]
        );
    }

    #[test]
    fn test_tokenize_preserves_empty_tokens() {
        let tokens = tokenize("ability  @s");
        assert_eq!(values(&tokens), vec!["ability", "", "@s"]);
        assert_eq!(tokens[1].index, 8);
        assert_eq!(tokens[2].index, 9);
    }

    #[test]
    fn test_tokenize_trims_line() {
        let tokens = tokenize("   ability @s mute \r");
        assert_eq!(values(&tokens), vec!["ability", "@s", "mute"]);
        assert_eq!(tokens[0].index, 0);
    }

    #[test]
    fn test_tokenize_strips_slash() {
        let tokens = tokenize("/ability @s");
        assert_eq!(tokens[0].value, "ability");
        assert_eq!(tokens[0].index, 0);
        assert_eq!(tokens[1].index, 9);
    }

    #[test]
    fn test_tokenize_blank_line() {
        let tokens = tokenize("");
        assert_eq!(values(&tokens), vec![""]);
    }

    #[test]
    fn test_parse_command_line() {
        let line = parse_command_line("  /advancement grant @a everything").unwrap();
        assert_eq!(line.command, Command::Advancement);
        assert_eq!(line.indent, 2);
        assert_eq!(line.param_values(), vec!["grant", "@a", "everything"]);
    }

    #[test]
    fn test_unrecognized_lines() {
        assert!(parse_command_line("").is_none());
        assert!(parse_command_line("   ").is_none());
        assert!(parse_command_line("give @s diamond").is_none());
        assert!(parse_command_line("# ability @s mayfly").is_none());
    }
}
