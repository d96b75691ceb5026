//! Completion Provider for mccmd LSP
//!
//! Completion items carry a [`DetailKey`] in their `data` field; the detail
//! text is only looked up when the client resolves the item.

use super::context::CompletionContext;
use super::grammar::Command;
use super::params::ParamType;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind, Documentation};

/// Group a completion value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetailCategory {
    /// Command names
    Command,
    /// Advancement mode keywords
    Types,
    /// Target selectors
    Selector,
    Ability,
    Boolean,
    GrantRevoke,
}

impl DetailCategory {
    /// Category of the values completed for a parameter type
    fn for_param(kind: ParamType) -> Option<Self> {
        match kind {
            ParamType::Selector => Some(Self::Selector),
            ParamType::Ability => Some(Self::Ability),
            ParamType::Boolean => Some(Self::Boolean),
            ParamType::GrantRevoke => Some(Self::GrantRevoke),
            ParamType::Everything | ParamType::Only | ParamType::FromThroughUntil => {
                Some(Self::Types)
            }
            ParamType::String
            | ParamType::Number
            | ParamType::Advancement
            | ParamType::Criterion => None,
        }
    }

    fn item_kind(&self) -> CompletionItemKind {
        match self {
            Self::Command => CompletionItemKind::FUNCTION,
            _ => CompletionItemKind::ENUM_MEMBER,
        }
    }
}

/// Lookup key for the detail text of a completion item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailKey {
    pub category: DetailCategory,
    pub value: String,
}

/// Detail and documentation text for a completion value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Details {
    pub detail: &'static str,
    pub documentation: Option<&'static str>,
}

impl DetailKey {
    /// Decode a key from a completion item's `data` field
    pub fn from_data(data: Value) -> Result<Self> {
        Ok(serde_json::from_value(data)?)
    }

    /// Static detail text; `None` for values without an entry
    pub fn details(&self) -> Option<Details> {
        let value = self.value.as_str();
        match self.category {
            DetailCategory::Command => Command::from_name(value).map(|command| Details {
                detail: command.detail(),
                documentation: Some(command.documentation()),
            }),
            DetailCategory::Types => type_detail(value).map(only_detail),
            DetailCategory::Selector => selector_detail(value).map(only_detail),
            DetailCategory::Ability | DetailCategory::Boolean | DetailCategory::GrantRevoke => {
                None
            }
        }
    }
}

fn only_detail(detail: &'static str) -> Details {
    Details {
        detail,
        documentation: None,
    }
}

fn type_detail(value: &str) -> Option<&'static str> {
    match value {
        "from" => Some("操作玩家的指定进度及其全部下游进度"),
        "everything" => Some("操作玩家的全部已载入进度"),
        "only" => Some("仅操作玩家的指定进度"),
        "through" => Some("操作玩家的指定进度及其全部上游和下游进度"),
        "until" => Some("操作玩家的指定进度及其全部上游进度"),
        _ => None,
    }
}

fn selector_detail(value: &str) -> Option<&'static str> {
    match value {
        "@e" => Some("所有实体"),
        "@r" => Some("随机玩家"),
        "@s" => Some("命令的执行者"),
        "@p" => Some("距离最近的玩家"),
        "@a" => Some("所有玩家"),
        "@c" => Some("自己的智能体"),
        "@v" => Some("所有智能体"),
        "@initiator" => Some("与NPC交互的玩家"),
        _ => None,
    }
}

/// Completion provider for mccmd
pub struct CompletionProvider {}

impl CompletionProvider {
    /// Create a new completion provider
    pub fn new() -> Self {
        Self {}
    }

    /// Get completions for a context
    pub fn get_completions(&self, context: &CompletionContext) -> Vec<CompletionItem> {
        match context {
            CompletionContext::Command => Command::ALL
                .iter()
                .map(|command| item(DetailCategory::Command, command.name()))
                .collect(),
            CompletionContext::Param { alternatives, .. } => {
                let mut items: Vec<CompletionItem> = Vec::new();
                for kind in alternatives {
                    let Some(category) = DetailCategory::for_param(*kind) else {
                        continue;
                    };
                    for value in kind.completions() {
                        if !items.iter().any(|existing| existing.label == *value) {
                            items.push(item(category, value));
                        }
                    }
                }
                items
            }
        }
    }

    /// Fill in detail and documentation of a completion item. Items without
    /// a known key are returned unchanged.
    pub fn resolve(&self, mut item: CompletionItem) -> CompletionItem {
        let key = match item.data.clone().map(DetailKey::from_data) {
            Some(Ok(key)) => Some(key),
            Some(Err(e)) => {
                tracing::debug!("Unrecognized completion data on {}: {}", item.label, e);
                None
            }
            None => None,
        };
        if let Some(details) = key.as_ref().and_then(DetailKey::details) {
            item.detail = Some(details.detail.to_string());
            if let Some(documentation) = details.documentation {
                item.documentation = Some(Documentation::String(documentation.to_string()));
            }
        }
        item
    }
}

impl Default for CompletionProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn item(category: DetailCategory, value: &str) -> CompletionItem {
    let key = DetailKey {
        category,
        value: value.to_string(),
    };
    CompletionItem {
        label: value.to_string(),
        kind: Some(category.item_kind()),
        data: serde_json::to_value(&key).ok(),
        ..Default::default()
    }
}
