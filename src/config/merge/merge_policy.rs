//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

use crate::context::ContextSettings;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    let context = ContextSettings::DEFAULT;
    Config::builder()
        .set_default("context.depth_warning", context.depth_warning as i64)?
        .set_default("context.warn_on_overwrite", context.warn_on_overwrite)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stdout")
}
