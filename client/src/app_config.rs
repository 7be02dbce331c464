use std::path::PathBuf;

use clap::Parser;

use crate::profile::{default_db_path, Profile};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

#[derive(Parser, Debug)]
#[command(
    name = "memo",
    version,
    about,
    long_about = "Desktop client for the memo note service, with a local fallback used when the server is unreachable"
)]
pub struct CliArgs {
    /// Base URL of the note server
    #[arg(long, short, env = "MEMO_SERVER")]
    pub server: Option<String>,

    /// Path of the local fallback database
    #[arg(long, env = "MEMO_DB")]
    pub db_path: Option<PathBuf>,

    /// Path to profile configuration file
    #[arg(long, short, env = "MEMO_PROFILE")]
    pub profile_path: Option<String>,
}

/// Effective configuration: CLI arguments win over the profile, the profile
/// wins over built-in defaults
#[derive(Debug)]
pub struct AppConfig {
    pub server_url: String,
    pub db_path: PathBuf,
}

impl AppConfig {
    pub fn from_args(args: &CliArgs, profile: Option<&Profile>) -> Self {
        let server_url = args
            .server
            .clone()
            .or_else(|| profile.and_then(|p| p.server_url.clone()))
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let db_path = args
            .db_path
            .clone()
            .or_else(|| profile.and_then(|p| p.db_path.clone()).map(PathBuf::from))
            .unwrap_or_else(default_db_path);

        AppConfig {
            server_url,
            db_path,
        }
    }
}
