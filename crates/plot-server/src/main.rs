// File: crates/plot-server/src/main.rs
// Summary: `plot-server` binary: HTTP service, or a one-off render to a PNG file.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use plot_server::{config, routes, NumberLike, RawPlotRequest};

#[derive(Parser)]
#[command(
    name = "plot-server",
    version,
    about = "Render math expressions to PNG line plots"
)]
struct Cli {
    /// Path to a TOML config file (falls back to $PLOT_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve POST/GET /api/plot
    Serve {
        /// Listen address, overrides [server] bind
        #[arg(long)]
        bind: Option<String>,
    },

    /// Render one expression to a PNG file
    Render {
        /// Expression in x, e.g. "sin(x) * exp(-x / 4)"
        #[arg(short, long)]
        expression: String,

        #[arg(long, allow_hyphen_values = true)]
        x_min: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        x_max: Option<f64>,

        #[arg(short, long)]
        samples: Option<usize>,

        #[arg(short, long)]
        title: Option<String>,

        /// Line color (#rrggbb or a name)
        #[arg(short, long)]
        color: Option<String>,

        /// Output file
        #[arg(short, long, default_value = "plot.png")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref()).context("failed to load config")?;

    match cli.command {
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            cmd_serve(Arc::new(config), &bind).await
        }
        Commands::Render {
            expression,
            x_min,
            x_max,
            samples,
            title,
            color,
            out,
        } => {
            let raw = RawPlotRequest {
                expression: Some(expression),
                x_min: x_min.map(NumberLike::from),
                x_max: x_max.map(NumberLike::from),
                samples: samples.map(|n| NumberLike::from(n as f64)),
                title,
                color,
                ..Default::default()
            };
            cmd_render(&config, raw, &out)
        }
    }
}

async fn cmd_serve(config: Arc<config::Config>, bind: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding {bind}"))?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, routes::router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

fn cmd_render(config: &config::Config, raw: RawPlotRequest, out: &std::path::Path) -> Result<()> {
    let plot = plot_server::run(raw, config)?;
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(out, &plot.png).with_context(|| format!("writing {}", out.display()))?;
    println!(
        "Wrote {} ({} samples, {} finite)",
        out.display(),
        plot.metadata.samples,
        plot.metadata.finite_points
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
