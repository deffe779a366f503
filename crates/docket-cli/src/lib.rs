//! Command-line interface for Docket.
//!
//! # Key Abstractions
//!
//! - [`DocketCli`]: Loads configuration and dispatches commands
//! - [`DocketConfig`]: File, environment, and default configuration
//! - [`handlers`]: `params`, `show`, `meta`, and `check`

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod handlers;

pub use app::DocketCli;
pub use cli::{CliArgs, Command};
pub use config::DocketConfig;
