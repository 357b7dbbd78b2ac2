use clap::Parser;
use pantry_core::bm25::Bm25Params;
use pantry_core::config;
use pantry_core::context::SearchContext;
use pantry_core::document::Bm25Source;
use pantry_core::text::TextNormalizer;
use pantry_server::api::create_router;
use pantry_server::api::handlers::AppState;
use pantry_server::bootstrap::{initialize, IndexConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pantry", about = "Hybrid recipe search service")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = config::DEFAULT_PORT)]
    port: u16,

    /// Recipe corpus: a JSON array, or JSON Lines when the extension is .jsonl
    #[arg(short, long)]
    corpus: PathBuf,

    /// Token fields indexed by BM25: "ingredients" or "all"
    #[arg(long, default_value = "ingredients")]
    bm25_source: Bm25Source,

    /// BM25 term frequency saturation
    #[arg(long, default_value_t = config::BM25_K1)]
    k1: f32,

    /// BM25 length normalization strength (0.0-1.0)
    #[arg(long, default_value_t = config::BM25_B)]
    b: f32,

    /// Keep BM25 source token lists in memory after the index is built
    #[arg(long, default_value_t = false)]
    keep_source_tokens: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("pantry_server=info".parse()?)
                .add_directive("pantry_core=info".parse()?),
        )
        .init();

    let args = Args::parse();

    if args.port == 0 {
        eprintln!("Error: port must be > 0");
        std::process::exit(1);
    }
    if !args.k1.is_finite() || args.k1 < 0.0 {
        eprintln!("Error: k1 must be a non-negative number");
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&args.b) {
        eprintln!("Error: b must be between 0 and 1");
        std::process::exit(1);
    }
    if !args.corpus.is_file() {
        eprintln!("Error: corpus '{}' is not a file", args.corpus.display());
        std::process::exit(1);
    }

    let prometheus_handle =
        metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?;

    let context = Arc::new(SearchContext::new());
    let state = AppState {
        context: Arc::clone(&context),
        normalizer: Arc::new(TextNormalizer::default()),
        bm25_source: args.bm25_source,
        prometheus_handle,
        start_time: Instant::now(),
    };
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        port = args.port,
        corpus = %args.corpus.display(),
        bm25_source = args.bm25_source.as_str(),
        k1 = args.k1,
        b = args.b,
        "pantry listening, building search index"
    );

    let index_config = IndexConfig {
        corpus: args.corpus,
        bm25_source: args.bm25_source,
        params: Bm25Params {
            k1: args.k1,
            b: args.b,
        },
        keep_source_tokens: args.keep_source_tokens,
    };
    tokio::spawn(initialize(context, index_config));

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }

    tracing::info!("Shutting down gracefully, draining in-flight requests...");
}
