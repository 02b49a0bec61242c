//! Environment source: BLAME_CONTEXT__DEPTH_WARNING=64 sets context.depth_warning.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("BLAME")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
