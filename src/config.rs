use crate::error::ConfigError;
use jarlabel_layout::{LayoutConfig, SheetGeometry};
use jarlabel_render_lopdf::RenderOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "jarlabel.toml";
/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "JARLABEL_CONFIG";
/// Prefix of environment overrides, e.g. `JARLABEL__SHEET__ENTRIES_PER_PAGE`.
pub const ENV_PREFIX: &str = "JARLABEL";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelConfig {
    /// Where the finished sheet is written. Overwritten on every render.
    pub output_path: PathBuf,
    /// Base directory for relative logo and background paths.
    pub resource_root: PathBuf,
    /// Try to open the finished sheet in the system viewer.
    pub auto_open: bool,
    pub compress_streams: bool,
    pub sheet: SheetGeometry,
    pub layout: LayoutConfig,
    /// Directory of the file this configuration came from, if any.
    #[serde(skip)]
    pub(crate) base_path: Option<PathBuf>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("output/labels.pdf"),
            resource_root: PathBuf::from("."),
            auto_open: true,
            compress_streams: true,
            sheet: SheetGeometry::default(),
            layout: LayoutConfig::default(),
            base_path: None,
        }
    }
}

impl LabelConfig {
    /// Loads defaults, then `jarlabel.toml` (or the file named by
    /// `JARLABEL_CONFIG`) when present, then `JARLABEL__*` environment
    /// overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Like [`LabelConfig::load`], but an explicit `path` takes precedence
    /// over the environment and must exist.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => Some(path.to_path_buf()),
            None => match std::env::var(CONFIG_PATH_VAR) {
                Ok(value) if !value.trim().is_empty() => Some(PathBuf::from(value)),
                _ => {
                    let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                    default.is_file().then_some(default)
                }
            },
        };
        let environment = config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true);
        Self::from_layers(file.as_deref(), environment)
    }

    /// Builds the configuration from an optional file and an environment
    /// source. Relative paths in a file resolve against its directory.
    pub fn from_layers(
        file: Option<&Path>,
        environment: config::Environment,
    ) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        let mut base_path = None;

        if let Some(file) = file {
            if !file.is_file() {
                return Err(ConfigError::NotFound(file.to_path_buf()));
            }
            log::debug!("Loading configuration from {}", file.display());
            builder = builder.add_source(config::File::from(file).required(true));
            base_path = file.parent().map(Path::to_path_buf);
        }

        builder = builder.add_source(environment);

        let mut config: LabelConfig = builder.build()?.try_deserialize()?;
        config.base_path = base_path;
        config.resolve_paths();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sheet.validate()?;
        self.layout.validate()?;
        Ok(())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            compress_streams: self.compress_streams,
        }
    }

    pub fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    fn resolve_paths(&mut self) {
        let Some(base) = self.base_path.as_deref() else {
            return;
        };
        if base.as_os_str().is_empty() {
            return;
        }
        if self.output_path.is_relative() {
            self.output_path = base.join(&self.output_path);
        }
        if self.resource_root.is_relative() {
            self.resource_root = base.join(&self.resource_root);
        }
    }
}
