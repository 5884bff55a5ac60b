use clap::Parser;
use pantry::cli::{self, Cli};
use pantry_core::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = |fallback: &str| {
        tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback))
    };
    if cli.debug {
        let path = std::env::temp_dir().join("pantry-debug.log");
        let file = std::fs::OpenOptions::new().create(true).append(true).open(&path)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(filter("debug"))
            .init();
        tracing::info!("pantry debug log started: tail -f {}", path.display());
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter("warn"))
            .init();
    }

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not load config; using built-in defaults");
        Config::defaults()
    });

    let orchestrator = cli::build_orchestrator(&cli, &config)?;
    let mut stdout = std::io::stdout().lock();
    cli::run(&cli, &orchestrator, &mut stdout).await
}
