//! The `render` command.

use std::path::PathBuf;

use clap::Args;

use bento_config::{CliSettings, Config};
use bento_engine::RenderEngine;
use bento_mime::{Artifact, MimeBundle, RenderContext};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the `render` command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Bundle JSON file mapping MIME types to representation values.
    pub(crate) bundle: PathBuf,

    /// Treat the bundle as trusted, allowing active content.
    #[arg(long)]
    pub(crate) trusted: bool,

    /// Render this MIME type instead of the preferred one.
    #[arg(long)]
    pub(crate) mime: Option<String>,

    /// Base URL for resolving relative references.
    #[arg(long)]
    pub(crate) base_url: Option<String>,

    /// Print the artifact as JSON instead of its raw payload.
    #[arg(long)]
    pub(crate) json: bool,

    /// Also print the companion representations surfaced to inspectors.
    #[arg(long)]
    pub(crate) companions: bool,

    /// Path to bento.toml (discovered in parent directories if omitted).
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let settings = CliSettings {
            trusted: self.trusted.then_some(true),
            base_url: self.base_url.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&settings))?;
        let engine = super::build_engine(&config);

        let content = std::fs::read_to_string(&self.bundle)?;
        let bundle: MimeBundle = serde_json::from_str(&content)?;
        let trusted = config.render.trusted;

        let artifact = if let Some(mimetype) = &self.mime {
            if self.companions {
                output.warning("--companions is ignored when --mime is set");
            }
            Some(render_explicit(&engine, &bundle, mimetype, trusted)?)
        } else if self.companions {
            let mut companions = Vec::new();
            let artifact = engine.render_with_injector(&bundle, trusted, &mut |mt, value| {
                companions.push((mt.to_owned(), value.clone()));
            })?;
            for (mimetype, value) in &companions {
                output.info(&format!("{mimetype}: {value}"));
            }
            artifact
        } else {
            engine.render(&bundle, trusted)?
        };
        self.report(output, artifact)
    }

    fn report(&self, output: &Output, artifact: Option<Artifact>) -> Result<(), CliError> {
        let Some(artifact) = artifact else {
            output.warning("nothing renderable in bundle");
            return Ok(());
        };

        if self.json {
            output.payload(&serde_json::to_string_pretty(&artifact)?);
        } else {
            output.highlight(&format!("rendered as {}", artifact.mimetype()));
            output.payload(artifact.as_str());
        }
        Ok(())
    }
}

/// Render a caller-chosen MIME type, bypassing precedence selection but
/// not the trust policy.
fn render_explicit(
    engine: &RenderEngine,
    bundle: &MimeBundle,
    mimetype: &str,
    trusted: bool,
) -> Result<Artifact, CliError> {
    let renderer = engine
        .renderer(mimetype)
        .ok_or_else(|| CliError::Validation(format!("no renderer registered for {mimetype}")))?;
    let value = bundle
        .get(mimetype)
        .ok_or_else(|| CliError::Validation(format!("bundle has no {mimetype} entry")))?;
    if !renderer.safety().admissible(trusted) {
        return Err(CliError::Validation(format!(
            "{mimetype} is unsafe and the bundle is untrusted (pass --trusted to allow)"
        )));
    }

    let ctx = RenderContext {
        mimetype,
        trusted,
        resolver: engine.resolver().map(|r| r.as_ref()),
    };
    Ok(renderer.render(value, &ctx)?)
}
