//! Hover Provider for mccmd LSP

use super::completion::{DetailCategory, DetailKey};
use super::document::TextDocument;
use super::matcher::{match_signatures, MatchResult};
use super::params::ParamType;
use super::syntax::parse_command_line;
use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Position, Range};

/// Hover provider for mccmd
pub struct HoverProvider {}

impl HoverProvider {
    /// Create a new hover provider
    pub fn new() -> Self {
        Self {}
    }

    /// Get hover information at the given position
    pub fn get_hover(&self, doc: &TextDocument, position: Position) -> Option<Hover> {
        let line = position.line as usize;
        let command_line = parse_command_line(doc.line(line)?)?;
        let offset = doc.offset_at(position).ok()?;
        let line_start = doc.offset_at(Position::new(position.line, 0)).ok()?;
        let column = offset.checked_sub(line_start + command_line.indent)?;

        let token_index = command_line
            .tokens
            .iter()
            .position(|token| column >= token.index && column <= token.index + token.value.len())?;
        let token = &command_line.tokens[token_index];

        let value = if token_index == 0 {
            let command = command_line.command;
            format!(
                "```mccmd\n{}\n```\n\n{}",
                command.documentation(),
                command.detail()
            )
        } else {
            let MatchResult::Success { params, .. } =
                match_signatures(command_line.command, &command_line.param_values())
            else {
                return None;
            };
            let param = params.get(token_index - 1)?;
            param_markdown(param.kind, &param.value)
        };

        let start = command_line.indent + token.index;
        Some(Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value,
            }),
            range: Some(Range::new(
                doc.position_in_line(line, start),
                doc.position_in_line(line, start + token.value.len()),
            )),
        })
    }
}

impl Default for HoverProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn param_markdown(kind: ParamType, value: &str) -> String {
    let category = match kind {
        ParamType::Selector => Some(DetailCategory::Selector),
        ParamType::Everything | ParamType::Only | ParamType::FromThroughUntil => {
            Some(DetailCategory::Types)
        }
        _ => None,
    };
    let detail = category.and_then(|category| {
        DetailKey {
            category,
            value: value.to_string(),
        }
        .details()
    });

    match detail {
        Some(details) => format!("`{}`: {}", kind, details.detail),
        None => format!("`{}`", kind),
    }
}
