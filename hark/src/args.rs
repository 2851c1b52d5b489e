use std::path::PathBuf;

use clap::Parser;

/// Hark speech-to-text worker
#[derive(Debug, Parser)]
#[command(name = "hark", about = "Serverless speech-to-text worker")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "hark.toml", env = "HARK_CONFIG")]
    pub config: PathBuf,
}
