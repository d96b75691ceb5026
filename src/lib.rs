//! mccmd - Language tooling for mccmd command files
//!
//! mccmd files hold one game command per line, in the style of chat
//! commands such as `ability` and `advancement`. This crate provides:
//!
//! - A tokenizer and signature matcher for the command grammar
//! - A language server with diagnostics, completion and hover

pub mod error;
pub mod lsp;

pub use error::{MccmdError, Result};
