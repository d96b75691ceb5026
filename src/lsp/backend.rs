//! tower-lsp Backend
//!
//! Bridges the JSON-RPC transport to [`MccmdLanguageServer`]. Requests are
//! serialized through a mutex, so the server state sees one call at a time.

use super::config::{Settings, SETTINGS_SECTION};
use super::server::MccmdLanguageServer;
use tokio::sync::Mutex;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

/// LSP backend
pub struct Backend {
    client: Client,
    server: Mutex<MccmdLanguageServer>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            server: Mutex::new(MccmdLanguageServer::new()),
        }
    }

    /// Fetch settings for a document from the client unless already cached
    async fn ensure_settings(&self, uri: &Url) {
        if !self.server.lock().await.needs_settings(uri) {
            return;
        }

        let item = ConfigurationItem {
            scope_uri: Some(uri.clone()),
            section: Some(SETTINGS_SECTION.to_string()),
        };
        let settings = match self.client.configuration(vec![item]).await {
            Ok(mut values) if !values.is_empty() => Settings::from_value(values.swap_remove(0)),
            Ok(_) => Settings::default(),
            Err(e) => {
                tracing::warn!("Failed to fetch settings for {}: {}", uri, e);
                Settings::default()
            }
        };
        self.server
            .lock()
            .await
            .set_document_settings(uri.clone(), settings);
    }

    async fn publish(&self, uri: Url, diagnostics: Vec<Diagnostic>) {
        tracing::debug!("Publishing {} diagnostics for {}", diagnostics.len(), uri);
        self.client.publish_diagnostics(uri, diagnostics, None).await;
    }

    /// Publish diagnostics computed with the cached settings, or revalidate
    /// once the document's own settings have been fetched
    async fn publish_or_validate(&self, uri: Url, diagnostics: Vec<Diagnostic>) {
        if self.server.lock().await.needs_settings(&uri) {
            self.validate(uri).await;
        } else {
            self.publish(uri, diagnostics).await;
        }
    }

    async fn validate(&self, uri: Url) {
        self.ensure_settings(&uri).await;
        let result = self.server.lock().await.validate(&uri);
        match result {
            Ok(diagnostics) => self.publish(uri, diagnostics).await,
            Err(e) => tracing::warn!("Validation skipped: {}", e),
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let result = self.server.lock().await.initialize(&params);
        tracing::info!("Initialized with {:?}", self.server.lock().await.features());
        Ok(result)
    }

    async fn initialized(&self, _: InitializedParams) {
        let features = self.server.lock().await.features();
        if features.configuration {
            let registration = Registration {
                id: "mccmd-did-change-configuration".to_string(),
                method: "workspace/didChangeConfiguration".to_string(),
                register_options: None,
            };
            if let Err(e) = self.client.register_capability(vec![registration]).await {
                tracing::warn!("Failed to register for configuration changes: {}", e);
            }
        }
        self.client
            .log_message(MessageType::INFO, "mccmd language server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("Shutdown requested");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        let diagnostics = self.server.lock().await.did_open(params);
        self.publish_or_validate(uri, diagnostics).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        let result = self.server.lock().await.did_change(params);
        match result {
            Ok(diagnostics) => self.publish_or_validate(uri, diagnostics).await,
            Err(e) => tracing::warn!("Failed to apply change to {}: {}", uri, e),
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.server.lock().await.did_close(&params);
        self.publish(params.text_document.uri, Vec::new()).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        let results = self
            .server
            .lock()
            .await
            .did_change_configuration(&params.settings);

        for (uri, diagnostics) in results {
            self.publish_or_validate(uri, diagnostics).await;
        }
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        match self.server.lock().await.completion(&params) {
            Ok(items) => Ok(Some(CompletionResponse::Array(items))),
            Err(e) => {
                tracing::warn!("Completion failed: {}", e);
                Ok(None)
            }
        }
    }

    async fn completion_resolve(&self, item: CompletionItem) -> Result<CompletionItem> {
        Ok(self.server.lock().await.completion_resolve(item))
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        match self.server.lock().await.hover(&params) {
            Ok(hover) => Ok(hover),
            Err(e) => {
                tracing::warn!("Hover failed: {}", e);
                Ok(None)
            }
        }
    }
}
