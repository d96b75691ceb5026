//! mccmd Language Server Binary
//!
//! Speaks the Language Server Protocol over stdin/stdout. Logs go to stderr.

use clap::Parser;
use mccmd::lsp::Backend;
use tower_lsp::{LspService, Server};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mccmd-lsp", version, about = "Language server for mccmd command files")]
struct Args {
    /// Communicate over stdin/stdout (the only supported transport)
    #[arg(long)]
    stdio: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&args.log))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("Starting mccmd language server");
    if !args.stdio {
        debug!("No transport flag given, using stdio");
    }

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();
    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;

    info!("mccmd language server stopped");
    Ok(())
}
