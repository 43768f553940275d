use clap::Parser;

/// Nimbus — a GPU point-field presence visualizer.
#[derive(Parser, Debug)]
#[command(name = "nimbus", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Start in the busy state regardless of config.
    #[arg(long)]
    pub busy: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
