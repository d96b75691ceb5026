//! mccmd Language Server Protocol Implementation
//!
//! Provides editor support for mccmd command files:
//! - Diagnostics for malformed commands
//! - Auto-completion of command names and parameter values
//! - Hover documentation

mod backend;
mod completion;
mod config;
mod context;
mod diagnostics;
mod document;
mod grammar;
mod hover;
mod matcher;
mod params;
mod server;
mod syntax;

pub use backend::Backend;
pub use completion::{CompletionProvider, DetailCategory, DetailKey};
pub use config::{ClientFeatures, Settings, SETTINGS_SECTION};
pub use context::{resolve_context, CompletionContext};
pub use diagnostics::DiagnosticsProvider;
pub use document::TextDocument;
pub use grammar::{Command, Signature};
pub use matcher::{match_signatures, MatchError, MatchResult, ParamPosition, TypedParam};
pub use params::ParamType;
pub use server::MccmdLanguageServer;
pub use syntax::{parse_command_line, tokenize, CommandLine, Token};
