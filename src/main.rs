use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use dishwise_api::RestApi;
use dishwise_storage::ArtifactLoader;

/// Profile-driven food recommendation service
#[derive(Parser, Debug)]
#[command(name = "dishwise")]
#[command(about = "Food recommendations from health and preference profiles", long_about = None)]
struct Args {
    /// Directory holding foods.json, the scoring matrix and ensembles/
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// Directory holding index.html, style.css and script.js
    #[arg(long, default_value = ".")]
    static_dir: PathBuf,

    /// HTTP API port
    #[arg(long, env = "PORT", default_value_t = 5000)]
    http_port: u16,

    /// Log level, overridden by RUST_LOG when set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Dishwise v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {:?}", args.data_dir);
    info!("Static directory: {:?}", args.static_dir);
    info!("HTTP API port: {}", args.http_port);

    let context = Arc::new(ArtifactLoader::new(&args.data_dir).load()?);
    info!(
        foods = context.features().len(),
        categories = context.registry().len(),
        "Suggestion context ready"
    );

    let static_dir = args.static_dir.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(RestApi::start(context, static_dir, http_port))
    });

    info!("Dishwise started successfully");
    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        joined = tokio::task::spawn_blocking(move || http_handle.join()) => {
            http_outcome(joined?)?;
        }
    }

    info!("Shutting down...");
    Ok(())
}

/// Map the HTTP thread's exit to the process result
fn http_outcome(joined: std::thread::Result<std::io::Result<()>>) -> anyhow::Result<()> {
    match joined {
        Ok(Ok(())) => {
            info!("HTTP server stopped");
            Ok(())
        }
        Ok(Err(e)) => {
            error!("HTTP server error: {}", e);
            Err(anyhow::Error::new(e).context("HTTP server failed"))
        }
        Err(_) => {
            error!("HTTP server thread panicked");
            anyhow::bail!("HTTP server thread panicked")
        }
    }
}
