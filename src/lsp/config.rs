//! Language server settings and client feature flags

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tower_lsp::lsp_types::{ClientCapabilities, Url};

/// Configuration section read from the client
pub const SETTINGS_SECTION: &str = "mccmd";

/// Per-document settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Upper bound on uppercase-word warnings reported per document
    pub max_number_of_problems: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_number_of_problems: 1000,
        }
    }
}

impl Settings {
    /// Read settings from a configuration value, falling back to defaults
    /// for a missing or malformed section
    pub fn from_value(value: Value) -> Self {
        if value.is_null() {
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed {} settings: {}", SETTINGS_SECTION, e);
            Self::default()
        })
    }
}

/// Optional client features discovered at initialization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientFeatures {
    /// Client answers `workspace/configuration`
    pub configuration: bool,
    /// Client supports workspace folders
    pub workspace_folders: bool,
    /// Client shows related information on diagnostics
    pub related_information: bool,
}

impl ClientFeatures {
    pub fn from_capabilities(capabilities: &ClientCapabilities) -> Self {
        let workspace = capabilities.workspace.as_ref();
        Self {
            configuration: workspace.and_then(|w| w.configuration).unwrap_or(false),
            workspace_folders: workspace.and_then(|w| w.workspace_folders).unwrap_or(false),
            related_information: capabilities
                .text_document
                .as_ref()
                .and_then(|td| td.publish_diagnostics.as_ref())
                .and_then(|pd| pd.related_information)
                .unwrap_or(false),
        }
    }
}

/// Settings cache
///
/// With a configuration-capable client settings are fetched per document and
/// cached until the document closes or the configuration changes. Otherwise
/// a single global value pushed by `workspace/didChangeConfiguration` applies
/// to every document.
#[derive(Debug, Default)]
pub struct SettingsStore {
    per_document: bool,
    global: Settings,
    documents: HashMap<Url, Settings>,
}

impl SettingsStore {
    pub fn new(per_document: bool) -> Self {
        Self {
            per_document,
            ..Self::default()
        }
    }

    /// Settings that apply to a document
    pub fn get(&self, uri: &Url) -> Settings {
        if !self.per_document {
            return self.global.clone();
        }
        self.documents.get(uri).cloned().unwrap_or_default()
    }

    /// Whether settings for a document still need to be fetched from the client
    pub fn needs_fetch(&self, uri: &Url) -> bool {
        self.per_document && !self.documents.contains_key(uri)
    }

    pub fn insert(&mut self, uri: Url, settings: Settings) {
        self.documents.insert(uri, settings);
    }

    pub fn remove(&mut self, uri: &Url) {
        self.documents.remove(uri);
    }

    /// Handle a configuration change notification
    pub fn configuration_changed(&mut self, settings: &Value) {
        if self.per_document {
            self.documents.clear();
        } else {
            self.global = Settings::from_value(
                settings.get(SETTINGS_SECTION).cloned().unwrap_or(Value::Null),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn uri(name: &str) -> Url {
        Url::parse(&format!("file:///test/{name}")).unwrap()
    }

    #[test]
    fn test_settings_defaults() {
        assert_eq!(Settings::default().max_number_of_problems, 1000);
        assert_eq!(Settings::from_value(Value::Null), Settings::default());
        assert_eq!(Settings::from_value(json!({})), Settings::default());
        assert_eq!(
            Settings::from_value(json!({"maxNumberOfProblems": 5})).max_number_of_problems,
            5
        );
        assert_eq!(
            Settings::from_value(json!({"maxNumberOfProblems": "lots"})),
            Settings::default()
        );
    }

    #[test]
    fn test_global_settings() {
        let mut store = SettingsStore::new(false);
        assert!(!store.needs_fetch(&uri("a.mccmd")));

        store.configuration_changed(&json!({"mccmd": {"maxNumberOfProblems": 3}}));
        assert_eq!(store.get(&uri("a.mccmd")).max_number_of_problems, 3);

        store.configuration_changed(&json!({"other": {}}));
        assert_eq!(store.get(&uri("a.mccmd")), Settings::default());
    }

    #[test]
    fn test_per_document_settings() {
        let mut store = SettingsStore::new(true);
        let a = uri("a.mccmd");
        assert!(store.needs_fetch(&a));

        store.insert(a.clone(), Settings { max_number_of_problems: 7 });
        assert!(!store.needs_fetch(&a));
        assert_eq!(store.get(&a).max_number_of_problems, 7);

        store.configuration_changed(&json!({}));
        assert!(store.needs_fetch(&a));

        store.insert(a.clone(), Settings { max_number_of_problems: 7 });
        store.remove(&a);
        assert!(store.needs_fetch(&a));
    }

    #[test]
    fn test_client_features() {
        let capabilities: ClientCapabilities = serde_json::from_value(json!({
            "workspace": { "configuration": true, "workspaceFolders": true },
            "textDocument": { "publishDiagnostics": { "relatedInformation": true } }
        }))
        .unwrap();
        let features = ClientFeatures::from_capabilities(&capabilities);
        assert!(features.configuration);
        assert!(features.workspace_folders);
        assert!(features.related_information);

        let features = ClientFeatures::from_capabilities(&ClientCapabilities::default());
        assert_eq!(features, ClientFeatures::default());
    }
}
