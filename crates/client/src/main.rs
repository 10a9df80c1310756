mod input;
mod stats;
mod tui;

use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use volley::{ClientConfig, DEFAULT_SERVER_URL, DEFAULT_TICK_RATE};

#[derive(Parser)]
#[command(name = "volley")]
#[command(about = "Volley terminal client")]
struct Args {
    #[arg(short, long, default_value = DEFAULT_SERVER_URL, help = "WebSocket URL of the match server")]
    server: String,

    #[arg(long, default_value_t = DEFAULT_TICK_RATE, help = "Simulation ticks per second")]
    tick_rate: u32,

    #[arg(long, help = "Write logs to this file instead of stderr")]
    log_file: Option<PathBuf>,

    #[arg(long, help = "Skip the menu and start a single-player match")]
    single_player: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let config = ClientConfig {
        server_url: args.server,
        tick_rate: args.tick_rate.max(1),
        ..ClientConfig::default()
    };
    log::info!(
        "Starting client (server {}, {} Hz)",
        config.server_url,
        config.tick_rate
    );

    tui::run(config, args.single_player)?;

    log::info!("Exiting");
    Ok(())
}

fn init_logging(log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}
