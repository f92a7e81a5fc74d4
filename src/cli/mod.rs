// CLI module for modstudio
// Author: kelexine (https://github.com/kelexine)

use crate::config::AppConfig;
use clap::Parser;
use std::path::PathBuf;

/// modstudio - car modification preview backend
#[derive(Parser, Debug)]
#[command(name = "modstudio", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (defaults to ~/.modstudio/config.toml if present)
    #[arg(long, env = "MODSTUDIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind, overrides the config file
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overrides the config file
    #[arg(long)]
    pub port: Option<u16>,
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
