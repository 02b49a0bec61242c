//! Layered configuration loading.

use std::path::{Path, PathBuf};

use config::ConfigError;
use config::File;
use tracing::debug;

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::BlameConfig;

/// Loads [`BlameConfig`] from defaults, config files, and the environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (highest to lowest):
    /// 1. `BLAME_*` environment variables (`__` separates nested keys)
    /// 2. `<workspace>/config/{BLAME_ENV}.toml`
    /// 3. `<workspace>/config/config.toml`
    /// 4. Global config file
    /// 5. Defaults
    pub fn load(workspace_root: &Path) -> Result<BlameConfig, ConfigError> {
        let global = global_file::global_config_path();
        Self::load_with_global(workspace_root, global.as_deref())
    }

    /// [`ConfigLoader::load`] with an explicit global config file, or none.
    pub fn load_with_global(
        workspace_root: &Path,
        global_path: Option<&Path>,
    ) -> Result<BlameConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder, global_path)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: BlameConfig = builder.build()?.try_deserialize()?;
        debug!(workspace_root = %workspace_root.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from a single file, on top of defaults.
    pub fn load_from_file(path: &Path) -> Result<BlameConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()
    }

    /// Path of the global config file, when the platform has a config dir.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
