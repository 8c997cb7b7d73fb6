//! Configuration module
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so a missing file or an
//! empty one yields `Config::default()`.
//!
//! # Example
//!
//! ```no_run
//! use tg_channel_stats::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Pausing {}ms between pages", config.scraper.politeness_delay_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{AnalysisConfig, Config, OutputConfig, ScraperConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
