use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use radsweep_engine::SixsEngine;
use radsweep_exp::{Exporter, Scheduler};
use radsweep_server::{router, AppState};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "radsweep-server")]
#[command(about = "HTTP front end for swept radiative-transfer simulations")]
struct Cli {
    /// Path to the compiled radiative-transfer executable
    engine: PathBuf,

    /// TCP address to bind the web server
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// Per-invocation engine timeout in seconds
    #[arg(long, default_value_t = 60)]
    engine_timeout_secs: u64,

    /// Directory receiving CSV export artifacts
    #[arg(long, default_value = "exports")]
    export_dir: PathBuf,

    /// Directory containing the connector page and other static assets
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Number of engine invocations allowed in flight per sweep
    #[arg(long, default_value_t = 4)]
    parallelism: usize,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "radsweep_server=info,radsweep_exp=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if !cli.engine.exists() {
        error!(
            "Engine executable {} does not exist; pass the path to the compiled binary",
            cli.engine.display()
        );
        std::process::exit(1);
    }

    let engine = SixsEngine::new(&cli.engine)
        .with_timeout(Duration::from_secs(cli.engine_timeout_secs));
    let state = AppState {
        engine: Arc::new(engine),
        exporter: Exporter::new(&cli.export_dir),
        scheduler: Scheduler {
            parallelism: cli.parallelism.max(1),
        },
    };

    let static_dir = cli
        .static_dir
        .unwrap_or_else(|| PathBuf::from("crates/radsweep-server/static"));
    info!("Serving static files from: {}", static_dir.display());
    info!("Exporting CSV artifacts to: {}", cli.export_dir.display());

    let app = router(state)
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http());

    let listener = match TcpListener::bind(cli.bind).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind {}: {err}", cli.bind);
            std::process::exit(1);
        }
    };

    info!("radsweep server: http://{}", cli.bind);

    if let Err(err) = axum::serve(listener, app).await {
        error!("Server error: {err}");
    }
}
