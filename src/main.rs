use chirp::core::config::{self, CliOverrides};
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "chirp", about = "Terminal client for Chirp")]
struct Args {
    /// Base URL of the Chirp API (overrides config and CHIRP_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Base URL of the identity provider (overrides config and CHIRP_IDENTITY_URL)
    #[arg(long)]
    identity_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to chirp.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("chirp.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().map_err(|e| {
        log::warn!("Refusing to start with a broken config: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
    })?;
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            api_url: args.api_url,
            identity_url: args.identity_url,
        },
    );

    log::info!(
        "Chirp starting up: api={}, identity={}",
        resolved.api_base_url,
        resolved.identity_base_url
    );

    chirp::tui::run(resolved)
}
