use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::sync::RwLock;
use tracing::info;

use seogen::llm::{GeminiClient, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS};
use seogen::logging::configure_logging;
use seogen::session::FormState;
use seogen::web::{web_api_loop, AppState};

/// Generates Thai-language website content for provincial real-estate
/// association sites through the Gemini API.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Port for the HTTP API (falls back to PORT, then 8080).
    #[arg(long)]
    port: Option<u16>,

    /// Gemini model used for every content request.
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Optional sampling temperature forwarded to the generative service.
    #[arg(long)]
    temperature: Option<f32>,

    /// Seconds before an outstanding content request is abandoned.
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    configure_logging();

    let port = args
        .port
        .or_else(|| env::var("PORT").ok().and_then(|p| p.parse().ok()))
        .unwrap_or(8080);

    // An optional credential supplied at process start pre-fills the
    // session; it can still be replaced through the API and is never
    // persisted or logged.
    let default_api_key = env::var("GEMINI_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty());
    if default_api_key.is_none() {
        info!("GEMINI_API_KEY not set; the credential must be supplied through the API");
    }

    info!(
        "Using model {} with a {}s request timeout",
        args.model, args.request_timeout
    );

    let llm = GeminiClient::new(
        args.model,
        args.temperature,
        Duration::from_secs(args.request_timeout),
    );
    let state = Arc::new(AppState {
        form: RwLock::new(FormState::new(default_api_key)),
        llm: Arc::new(llm),
    });

    web_api_loop(state, port).await
}
