use clap::Parser;
use parley::core::config::{self, CliOverrides, ParleyConfig};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "parley", about = "Terminal chat client for a conversation endpoint")]
struct Args {
    /// Base URL of the conversation service (e.g. http://localhost:8080)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Path of the conversation route under the base URL
    #[arg(short, long)]
    path: Option<String>,

    /// Request timeout in seconds (0 waits forever)
    #[arg(short, long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Logged once the logger exists
    let (file_config, config_error) = match config::load_config() {
        Ok(config) => (config, None),
        Err(e) => (ParleyConfig::default(), Some(e)),
    };

    let cli = CliOverrides {
        base_url: args.endpoint.as_deref(),
        path: args.path.as_deref(),
        timeout_secs: args.timeout,
    };
    let resolved = config::resolve(&file_config, &cli);

    // Initialize file logger - writes to parley.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("parley.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Ignoring config file, using defaults: {}", e);
    }
    log::info!("Parley starting up, endpoint: {}", resolved.endpoint_url);

    parley::tui::run(resolved)
}
