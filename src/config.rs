//! Configuration management for the template session.
//!
//! Handles:
//! - Command-line argument parsing
//! - Template directory configuration

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::session::DEFAULT_TEMPLATE;

/// Command-line arguments for the template session
#[derive(Debug, Parser)]
#[command(name = "template-session")]
#[command(about = "Editor session for factory templates")]
#[command(version)]
pub struct Args {
    /// Template to load instead of the default one
    #[arg(long, help = "Name of the factory template to load (e.g., 'minimal')")]
    pub template: Option<String>,

    /// Custom template directory to search for template files
    #[arg(long, help = "Directory containing template JSON files")]
    pub template_dir: Option<PathBuf>,

    /// Log level for the session
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Template name explicitly set via command line
    pub cli_template: Option<String>,
    /// Custom template directories to search
    pub template_dirs: Vec<PathBuf>,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        // Determine template directories
        let mut template_dirs = Vec::new();

        // Add user-specified directory if provided
        if let Some(custom_dir) = args.template_dir {
            template_dirs.push(custom_dir);
        }

        // Add default user config directory
        if let Some(config_dir) = dirs::config_dir() {
            template_dirs.push(config_dir.join("template-session").join("templates"));
        }

        Ok(Config {
            cli_template: args.template,
            template_dirs,
            log_level: args.log_level,
        })
    }

    /// Get the effective template name from CLI arguments
    pub fn get_effective_template(&self) -> String {
        self.cli_template
            .clone()
            .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string())
    }
}
