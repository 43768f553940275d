mod app;
mod cli;
mod signal;

use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

fn main() {
    let args = cli::parse();

    // Logging first: config loading wants to report problems.
    // CLI > env > config default; config.logging.level applies after load.
    let log_directive = args.log_level.clone().unwrap_or_else(|| "info".into());
    let directive = format!("nimbus={log_directive}");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(directive.parse().unwrap_or_else(|_| "info".parse().unwrap())),
        )
        .init();

    tracing::info!("nimbus v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            // Invalid construction parameters fail fast; nothing is rendered.
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    if args.log_level.is_none() && config.logging.level != "info" {
        tracing::info!(
            "config requests log level '{}'; pass --log-level or RUST_LOG to apply it",
            config.logging.level
        );
    }

    if args.print_config {
        println!("{}", nimbus_config::config_to_json(&config));
        return;
    }

    let initial_busy = args.busy || config.signal.initial_busy;
    let mut app = app::NimbusApp::new(config, initial_busy);

    let event_loop = match EventLoop::new() {
        Ok(el) => el,
        Err(e) => {
            tracing::error!("failed to create event loop: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("event loop error: {e}");
        std::process::exit(1);
    }
}

fn load_config(args: &cli::Args) -> Result<nimbus_config::NimbusConfig, nimbus_common::ConfigError> {
    match &args.config {
        Some(path) => nimbus_config::load_config_from(std::path::Path::new(path)),
        None => nimbus_config::load_config(),
    }
}
