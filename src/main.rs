use clap::Parser;
use navstack::config::{self, NavstackConfig};
use navstack::driver;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "navstack", about = "Scriptable navigation back-stack host")]
struct Args {
    /// Navigation script to replay (JSON lines); reads stdin when omitted
    script: Option<PathBuf>,

    /// Log level for the session log file (error, warn, info, debug, trace)
    #[arg(short, long)]
    log_level: Option<String>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = config::load_config().unwrap_or_else(|err| {
        eprintln!("warning: {err}; continuing with defaults");
        NavstackConfig::default()
    });
    let resolved = config::resolve(&file_config, args.log_level.as_deref());

    // Initialize file logger - keeps stdout clean for script status records
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(
            config::log_level_filter(&resolved.log_level),
            log_config,
            log_file,
        );
    }

    log::info!(
        "Navstack starting up, log level {}, {} preregistered components",
        resolved.log_level,
        resolved.components.len()
    );

    let stdout = io::stdout().lock();
    match &args.script {
        Some(path) => driver::run(BufReader::new(File::open(path)?), stdout, &resolved),
        None => driver::run(io::stdin().lock(), stdout, &resolved),
    }
}
