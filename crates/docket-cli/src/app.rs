//! DocketCli application.
//!
//! Wires the loaded [`DocketConfig`] into a [`GuideLoader`] and a
//! [`MetadataGenerator`], then dispatches commands to their handlers.

use crate::cli::{CliArgs, Command};
use crate::config::DocketConfig;
use crate::{config_handlers, handlers};
use docket_content::{GuideLoader, Slug};
use docket_core::traits::ConfigProvider;
use docket_core::Result;
use docket_meta::MetadataGenerator;
use std::path::Path;
use std::sync::Arc;
use tracing::Instrument;
use tracing_subscriber::EnvFilter;

// ============================================================================
// DocketCli
// ============================================================================

/// The Docket CLI application.
pub struct DocketCli {
    name: String,
    config: Arc<DocketConfig>,
    version: String,
}

impl DocketCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = DocketConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }

    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: DocketConfig) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Get a reference to the loaded config.
    pub fn config(&self) -> &DocketConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// A guide loader over the configured content tree.
    pub fn loader(&self) -> Result<GuideLoader> {
        Ok(GuideLoader::new(self.config.guide_settings()?))
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);
        let span = tracing::info_span!("docket", project = %self.config.project_name());
        self.dispatch(args).instrument(span).await
    }

    async fn dispatch(&self, args: CliArgs) -> Result<()> {
        log::debug!(
            "{} using content at {}",
            self.config.project_name(),
            self.config.content_path(crate::config::GUIDES_CONTENT_TYPE)?.display()
        );

        match args.command {
            Some(Command::Params { section }) => {
                handlers::handle_params(&self.loader()?, section.as_deref()).await
            }
            Some(Command::Show { slug }) => {
                handlers::handle_show(&self.loader()?, &Slug::from_url_path(&slug)).await
            }
            Some(Command::Meta { slug, parent }) => {
                let generator = MetadataGenerator::new(self.loader()?, self.config.site_settings());
                handlers::handle_meta(
                    &generator,
                    &Slug::from_url_path(&slug),
                    parent.as_deref().map(Path::new),
                )
                .await
            }
            Some(Command::Check) => handlers::handle_check(&self.loader()?).await,
            Some(Command::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            None => {
                println!("{} {}: use --help for usage", self.name, self.version);
                Ok(())
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
