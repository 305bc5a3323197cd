//! The `mimetypes` command.

use std::path::PathBuf;

use clap::Args;

use bento_config::Config;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the `mimetypes` command.
#[derive(Args)]
pub(crate) struct MimetypesArgs {
    /// Path to bento.toml (discovered in parent directories if omitted).
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(long)]
    pub(crate) verbose: bool,
}

impl MimetypesArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let engine = super::build_engine(&config);

        output.highlight("registered mimetypes (most preferred first)");
        for mimetype in engine.mimetypes() {
            let safety = engine
                .renderer(&mimetype)
                .map_or("unbound", |renderer| renderer.safety().as_str());
            output.info(&format!("{mimetype:<28} {safety}"));
        }
        Ok(())
    }
}
