use clap::Parser;
use tracing_subscriber::EnvFilter;

use panel_tool::Cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = panel_tool::run(&cli, &mut std::io::stdout().lock()) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
