//! Layered run settings: built-in defaults, then an optional TOML file,
//! then `MORSEL_*` environment variables. CLI flags are applied last by the
//! caller.

use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_FILE_PREFIX, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_FILE,
    DEFAULT_PRODUCT, ENV_PREFIX,
};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub output_file: PathBuf,

    #[validate(length(min = 1))]
    pub product: String,

    #[validate(length(min = 1))]
    pub file_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            product: DEFAULT_PRODUCT.to_string(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
        }
    }
}

impl Settings {
    /// Load settings. An explicit `config_file` must exist; without one the
    /// default `morsel-sales.toml` is read only if present.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let file_source = match config_file {
            Some(path) => {
                if !path.is_file() {
                    return Err(ProcessingError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                File::from(path).required(true)
            }
            None => File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
        };

        Self::build(file_source, Environment::with_prefix(ENV_PREFIX))
    }

    fn build<S>(file_source: S, env: Environment) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = Settings::default();
        let settings: Settings = Config::builder()
            .set_default("input_dir", defaults.input_dir.to_string_lossy().into_owned())?
            .set_default("output_file", defaults.output_file.to_string_lossy().into_owned())?
            .set_default("product", defaults.product)?
            .set_default("file_prefix", defaults.file_prefix)?
            .add_source(file_source)
            .add_source(env)
            .build()?
            .try_deserialize()?;

        settings.validated()
    }

    /// Re-check the field rules, e.g. after CLI overrides were applied.
    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    pub fn with_input_dir(mut self, input_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = input_dir {
            self.input_dir = dir;
        }
        self
    }

    pub fn with_output_file(mut self, output_file: Option<PathBuf>) -> Self {
        if let Some(file) = output_file {
            self.output_file = file;
        }
        self
    }

    pub fn with_product(mut self, product: Option<String>) -> Self {
        if let Some(product) = product {
            self.product = product;
        }
        self
    }
}
