//! mccmd Language Server State
//!
//! Transport-independent server: owns the open documents, the settings cache
//! and the providers. Each LSP operation is a plain method; the
//! [`Backend`](super::backend::Backend) wires them to the protocol.

use super::completion::CompletionProvider;
use super::config::{ClientFeatures, Settings, SettingsStore};
use super::context::resolve_context;
use super::diagnostics::DiagnosticsProvider;
use super::document::TextDocument;
use super::hover::HoverProvider;
use crate::error::{MccmdError, Result};
use serde_json::Value;
use std::collections::HashMap;
use tower_lsp::lsp_types::{
    CompletionItem, CompletionOptions, CompletionParams, Diagnostic, DidChangeTextDocumentParams,
    DidCloseTextDocumentParams, DidOpenTextDocumentParams, Hover, HoverParams,
    HoverProviderCapability, InitializeParams, InitializeResult, ServerCapabilities, ServerInfo,
    TextDocumentSyncCapability, TextDocumentSyncKind, Url, WorkspaceFoldersServerCapabilities,
    WorkspaceServerCapabilities,
};

/// mccmd Language Server
pub struct MccmdLanguageServer {
    documents: HashMap<Url, TextDocument>,
    settings: SettingsStore,
    features: ClientFeatures,
    completion_provider: CompletionProvider,
    hover_provider: HoverProvider,
    diagnostics_provider: DiagnosticsProvider,
}

impl MccmdLanguageServer {
    /// Create a new language server
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
            settings: SettingsStore::new(false),
            features: ClientFeatures::default(),
            completion_provider: CompletionProvider::new(),
            hover_provider: HoverProvider::new(),
            diagnostics_provider: DiagnosticsProvider::new(),
        }
    }

    /// Client features recorded at initialization
    pub fn features(&self) -> ClientFeatures {
        self.features
    }

    /// Handle initialize request
    pub fn initialize(&mut self, params: &InitializeParams) -> InitializeResult {
        self.features = ClientFeatures::from_capabilities(&params.capabilities);
        self.settings = SettingsStore::new(self.features.configuration);

        let workspace = self.features.workspace_folders.then(|| WorkspaceServerCapabilities {
            workspace_folders: Some(WorkspaceFoldersServerCapabilities {
                supported: Some(true),
                change_notifications: None,
            }),
            file_operations: None,
        });

        InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::INCREMENTAL,
                )),
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(true),
                    trigger_characters: Some(vec![" ".to_string(), "@".to_string()]),
                    ..Default::default()
                }),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                workspace,
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "mccmd-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        }
    }

    /// Handle document open
    pub fn did_open(&mut self, params: DidOpenTextDocumentParams) -> Vec<Diagnostic> {
        let item = params.text_document;
        let doc = TextDocument::new(item.uri.clone(), item.version, item.text);
        let diagnostics = self.diagnostics_for(&doc);
        self.documents.insert(item.uri, doc);
        diagnostics
    }

    /// Handle document change
    pub fn did_change(&mut self, params: DidChangeTextDocumentParams) -> Result<Vec<Diagnostic>> {
        let uri = params.text_document.uri;
        let doc = self
            .documents
            .get_mut(&uri)
            .ok_or_else(|| MccmdError::DocumentNotFound(uri.to_string()))?;
        doc.apply_changes(params.text_document.version, &params.content_changes)?;

        let doc = &self.documents[&uri];
        Ok(self.diagnostics_for(doc))
    }

    /// Handle document close
    pub fn did_close(&mut self, params: &DidCloseTextDocumentParams) {
        let uri = &params.text_document.uri;
        self.documents.remove(uri);
        self.settings.remove(uri);
    }

    /// Handle a configuration change; returns fresh diagnostics for every
    /// open document
    pub fn did_change_configuration(&mut self, settings: &Value) -> Vec<(Url, Vec<Diagnostic>)> {
        self.settings.configuration_changed(settings);
        self.validate_all()
    }

    /// Diagnostics for every open document
    pub fn validate_all(&self) -> Vec<(Url, Vec<Diagnostic>)> {
        self.documents
            .values()
            .map(|doc| (doc.uri().clone(), self.diagnostics_for(doc)))
            .collect()
    }

    /// Diagnostics for one open document
    pub fn validate(&self, uri: &Url) -> Result<Vec<Diagnostic>> {
        let doc = self.document(uri)?;
        Ok(self.diagnostics_for(doc))
    }

    /// Whether settings for this document still have to be requested
    pub fn needs_settings(&self, uri: &Url) -> bool {
        self.settings.needs_fetch(uri)
    }

    /// Cache settings fetched for a document
    pub fn set_document_settings(&mut self, uri: Url, settings: Settings) {
        self.settings.insert(uri, settings);
    }

    /// Settings that apply to a document
    pub fn settings_for(&self, uri: &Url) -> Settings {
        self.settings.get(uri)
    }

    /// Handle completion request
    pub fn completion(&self, params: &CompletionParams) -> Result<Vec<CompletionItem>> {
        let position = &params.text_document_position;
        let doc = self.document(&position.text_document.uri)?;
        let prefix = doc.line_prefix(position.position)?;
        let context = resolve_context(prefix);
        tracing::debug!("Completion context for {:?}: {:?}", prefix, context);
        Ok(self.completion_provider.get_completions(&context))
    }

    /// Handle completion item resolve request
    pub fn completion_resolve(&self, item: CompletionItem) -> CompletionItem {
        self.completion_provider.resolve(item)
    }

    /// Handle hover request
    pub fn hover(&self, params: &HoverParams) -> Result<Option<Hover>> {
        let position = &params.text_document_position_params;
        let doc = self.document(&position.text_document.uri)?;
        Ok(self.hover_provider.get_hover(doc, position.position))
    }

    fn document(&self, uri: &Url) -> Result<&TextDocument> {
        self.documents
            .get(uri)
            .ok_or_else(|| MccmdError::DocumentNotFound(uri.to_string()))
    }

    fn diagnostics_for(&self, doc: &TextDocument) -> Vec<Diagnostic> {
        let settings = self.settings.get(doc.uri());
        self.diagnostics_provider
            .get_diagnostics(doc, &settings, &self.features)
    }
}

impl Default for MccmdLanguageServer {
    fn default() -> Self {
        Self::new()
    }
}
