//! Diagnostics Provider for mccmd LSP
//!
//! Two independent rules run over a document:
//! - every recognized command line is matched against its signatures and
//!   reports at most one error;
//! - every ASCII word of two or more capital letters gets a warning, up to
//!   the configured maximum.

use super::config::{ClientFeatures, Settings};
use super::document::TextDocument;
use super::matcher::{match_signatures, MatchResult, ParamPosition};
use super::syntax::{parse_command_line, CommandLine};
use regex::Regex;
use std::sync::LazyLock;
use tower_lsp::lsp_types::{
    Diagnostic, DiagnosticRelatedInformation, DiagnosticSeverity, Location, Range,
};

/// Source tag of command diagnostics
pub const COMMAND_SOURCE: &str = "Nomen mccmd";

/// Source tag of uppercase-word warnings
pub const UPPERCASE_SOURCE: &str = "ex";

static UPPERCASE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]+").expect("uppercase pattern is valid"));

/// Diagnostics provider for mccmd documents
pub struct DiagnosticsProvider {}

impl DiagnosticsProvider {
    /// Create a new diagnostics provider
    pub fn new() -> Self {
        Self {}
    }

    /// Get all diagnostics for a document
    pub fn get_diagnostics(
        &self,
        doc: &TextDocument,
        settings: &Settings,
        features: &ClientFeatures,
    ) -> Vec<Diagnostic> {
        let mut diagnostics = self.command_diagnostics(doc);
        diagnostics.extend(self.uppercase_diagnostics(doc, settings, features));
        diagnostics
    }

    /// Signature errors, one per failing line
    pub fn command_diagnostics(&self, doc: &TextDocument) -> Vec<Diagnostic> {
        (0..doc.line_count())
            .filter_map(|line| {
                let command_line = parse_command_line(doc.line(line)?)?;
                let params = command_line.param_values();
                let MatchResult::Failure(error) =
                    match_signatures(command_line.command, &params)
                else {
                    return None;
                };

                Some(Diagnostic {
                    range: error_range(doc, line, &command_line, error.position()),
                    severity: Some(DiagnosticSeverity::ERROR),
                    source: Some(COMMAND_SOURCE.to_string()),
                    message: error.to_string(),
                    ..Default::default()
                })
            })
            .collect()
    }

    /// Warnings for all-uppercase words
    pub fn uppercase_diagnostics(
        &self,
        doc: &TextDocument,
        settings: &Settings,
        features: &ClientFeatures,
    ) -> Vec<Diagnostic> {
        let text = doc.text();
        UPPERCASE_RUN
            .find_iter(text)
            .filter(|m| m.len() >= 2 && is_word_boundary(text, m.start(), m.end()))
            .take(settings.max_number_of_problems)
            .map(|m| {
                let range = Range::new(doc.position_at(m.start()), doc.position_at(m.end()));
                let related_information = features.related_information.then(|| {
                    ["Spelling matters", "Particularly for names"]
                        .into_iter()
                        .map(|message| DiagnosticRelatedInformation {
                            location: Location::new(doc.uri().clone(), range),
                            message: message.to_string(),
                        })
                        .collect()
                });

                Diagnostic {
                    range,
                    severity: Some(DiagnosticSeverity::WARNING),
                    source: Some(UPPERCASE_SOURCE.to_string()),
                    message: format!("{} is all uppercase.", m.as_str()),
                    related_information,
                    ..Default::default()
                }
            })
            .collect()
    }
}

impl Default for DiagnosticsProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Range of the token a match error points at
fn error_range(
    doc: &TextDocument,
    line: usize,
    command_line: &CommandLine,
    position: ParamPosition,
) -> Range {
    let tokens = &command_line.tokens;
    let span = match position {
        ParamPosition::Index(index) => tokens
            .get(index + 1)
            .map(|token| (token.index, token.index + token.value.len())),
        ParamPosition::AfterLast => None,
    };
    let (start, end) = span.unwrap_or_else(|| {
        let last = tokens.last().map_or(0, |token| token.index + token.value.len());
        (last, last)
    });

    Range::new(
        doc.position_in_line(line, command_line.indent + start),
        doc.position_in_line(line, command_line.indent + end),
    )
}

/// ASCII word boundaries on both sides of `start..end`
fn is_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let is_word = |b: u8| b.is_ascii_alphanumeric() || b == b'_';
    let before = start == 0 || !is_word(text.as_bytes()[start - 1]);
    let after = end == text.len() || !is_word(text.as_bytes()[end]);
    before && after
}
