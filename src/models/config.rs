use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use kmeans_quant::{ClusterOptions, Initialization, DEFAULT_MAX_ITERATIONS};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable naming a config file when `--config` is absent
pub const CONFIG_ENV: &str = "KPALETTE_CONFIG";

/// Application configuration loaded from a YAML file
///
/// Every key is optional; missing keys take the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Clustering parameters
    pub clustering: ClusteringConfig,

    /// Output encoding
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Palette size used when the command line gives no K
    pub k: Option<usize>,

    /// Lloyd iteration cap
    pub max_iterations: usize,

    /// Fixed seed; a fresh one is drawn per run when absent
    pub seed: Option<u64>,

    pub initialization: InitMethod,

    /// Independent runs; the lowest inertia wins
    pub restarts: usize,

    /// Use the rayon thread pool
    pub parallel: bool,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            k: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: None,
            initialization: InitMethod::default(),
            restarts: 1,
            parallel: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,

    /// Re-compress the PNG with oxipng
    pub optimize: bool,
}

/// Initial centroid policy as named in config files and on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum InitMethod {
    /// Sample K distinct colors with a seeded RNG
    #[default]
    SeededSample,
    /// First K distinct colors in pixel order
    FirstDistinct,
    /// k-means++ seeding
    KmeansPlusPlus,
}

impl From<InitMethod> for Initialization {
    fn from(method: InitMethod) -> Self {
        match method {
            InitMethod::SeededSample => Initialization::SeededSample,
            InitMethod::FirstDistinct => Initialization::FirstDistinct,
            InitMethod::KmeansPlusPlus => Initialization::KMeansPlusPlus,
        }
    }
}

/// PNG flavour written for the quantized image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Indexed when the palette fits in 256 entries, RGB otherwise
    #[default]
    Auto,
    /// Always indexed (fails above 256 colors)
    Indexed,
    /// Always 8-bit RGB
    Rgb,
}

/// Values given on the command line; `None` defers to the config file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub k: Option<usize>,
    pub max_iterations: Option<usize>,
    pub seed: Option<u64>,
    pub initialization: Option<InitMethod>,
    pub restarts: Option<usize>,
    pub single_threaded: bool,
    pub format: Option<OutputFormat>,
    pub optimize: bool,
}

/// Fully resolved settings for one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub options: ClusterOptions,
    pub format: OutputFormat,
    pub optimize: bool,
}

impl PipelineSettings {
    /// Defaults for a K-color palette.
    pub fn new(k: usize) -> Self {
        Self {
            options: ClusterOptions::new(k),
            format: OutputFormat::default(),
            optimize: false,
        }
    }
}

impl AppConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        tracing::info!(
            path = %path.display(),
            k = ?config.clustering.k,
            max_iterations = config.clustering.max_iterations,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load from `explicit`, else from `$KPALETTE_CONFIG`, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::discover_with(explicit, std::env::var_os(CONFIG_ENV))
    }

    fn discover_with(explicit: Option<&Path>, env_value: Option<OsString>) -> Result<Self, ConfigError> {
        let path = match (explicit, env_value) {
            (Some(path), _) => Some(path.to_path_buf()),
            (None, Some(value)) if !value.is_empty() => Some(PathBuf::from(value)),
            _ => None,
        };

        match path {
            Some(path) => Self::load(&path),
            None => {
                tracing::debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reject values the clusterer cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.clustering;
        if c.k == Some(0) {
            return Err(ConfigError::Invalid("clustering.k must be at least 1".to_string()));
        }
        if c.max_iterations == 0 {
            return Err(ConfigError::Invalid(
                "clustering.max_iterations must be at least 1".to_string(),
            ));
        }
        if c.restarts == 0 {
            return Err(ConfigError::Invalid("clustering.restarts must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Merge command-line overrides over this config.
    pub fn resolve(&self, overrides: &Overrides) -> Result<PipelineSettings, ConfigError> {
        let c = &self.clustering;

        let k = overrides.k.or(c.k).ok_or_else(|| {
            ConfigError::Invalid("no palette size given: pass K or set clustering.k".to_string())
        })?;
        if k == 0 {
            return Err(ConfigError::Invalid("K must be at least 1".to_string()));
        }

        let max_iterations = overrides.max_iterations.unwrap_or(c.max_iterations);
        if max_iterations == 0 {
            return Err(ConfigError::Invalid("max iterations must be at least 1".to_string()));
        }

        let restarts = overrides.restarts.unwrap_or(c.restarts);
        if restarts == 0 {
            return Err(ConfigError::Invalid("restarts must be at least 1".to_string()));
        }

        let mut options = ClusterOptions::new(k)
            .max_iterations(max_iterations)
            .initialization(overrides.initialization.unwrap_or(c.initialization).into())
            .restarts(restarts)
            .parallel(c.parallel && !overrides.single_threaded);
        if let Some(seed) = overrides.seed.or(c.seed) {
            options = options.seed(seed);
        }

        Ok(PipelineSettings {
            options,
            format: overrides.format.unwrap_or(self.output.format),
            optimize: overrides.optimize || self.output.optimize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.clustering.k, None);
        assert_eq!(config.clustering.max_iterations, 20);
        assert_eq!(config.clustering.seed, None);
        assert_eq!(config.clustering.initialization, InitMethod::SeededSample);
        assert_eq!(config.clustering.restarts, 1);
        assert!(config.clustering.parallel);
        assert_eq!(config.output.format, OutputFormat::Auto);
        assert!(!config.output.optimize);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
clustering:
  k: 8
  max_iterations: 50
  seed: 42
  initialization: kmeans-plus-plus
  restarts: 3
  parallel: false
output:
  format: rgb
  optimize: true
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.clustering.k, Some(8));
        assert_eq!(config.clustering.max_iterations, 50);
        assert_eq!(config.clustering.seed, Some(42));
        assert_eq!(config.clustering.initialization, InitMethod::KmeansPlusPlus);
        assert_eq!(config.clustering.restarts, 3);
        assert!(!config.clustering.parallel);
        assert_eq!(config.output.format, OutputFormat::Rgb);
        assert!(config.output.optimize);
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config: AppConfig = serde_yaml::from_str("clustering:\n  k: 4\n").unwrap();

        assert_eq!(config.clustering.k, Some(4));
        assert_eq!(config.clustering.max_iterations, 20);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_parse_rejects_unknown_initialization() {
        let result: Result<AppConfig, _> =
            serde_yaml::from_str("clustering:\n  initialization: random\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = AppConfig::default();
        config.clustering.k = Some(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.clustering.max_iterations = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.clustering.restarts = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config("clustering:\n  k: 5\n  seed: 7\noutput:\n  format: indexed\n");
        let config = AppConfig::load(file.path()).unwrap();

        assert_eq!(config.clustering.k, Some(5));
        assert_eq!(config.clustering.seed, Some(7));
        assert_eq!(config.output.format, OutputFormat::Indexed);
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/kpalette.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let file = write_config("clustering: [not, a, map\n");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_invalid_values() {
        let file = write_config("clustering:\n  restarts: 0\n");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_discover_precedence() {
        let explicit = write_config("clustering:\n  k: 3\n");
        let from_env = write_config("clustering:\n  k: 9\n");
        let env_value = Some(from_env.path().as_os_str().to_os_string());

        let config = AppConfig::discover_with(Some(explicit.path()), env_value.clone()).unwrap();
        assert_eq!(config.clustering.k, Some(3));

        let config = AppConfig::discover_with(None, env_value).unwrap();
        assert_eq!(config.clustering.k, Some(9));

        let config = AppConfig::discover_with(None, None).unwrap();
        assert_eq!(config, AppConfig::default());

        let config = AppConfig::discover_with(None, Some(OsString::new())).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_resolve_cli_wins_over_file() {
        let mut config = AppConfig::default();
        config.clustering.k = Some(8);
        config.clustering.seed = Some(1);
        config.output.format = OutputFormat::Rgb;

        let overrides = Overrides {
            k: Some(4),
            seed: Some(99),
            initialization: Some(InitMethod::FirstDistinct),
            format: Some(OutputFormat::Indexed),
            single_threaded: true,
            ..Default::default()
        };
        let settings = config.resolve(&overrides).unwrap();

        assert_eq!(settings.options.k, 4);
        assert_eq!(settings.options.seed, Some(99));
        assert_eq!(settings.options.initialization, Initialization::FirstDistinct);
        assert!(!settings.options.parallel);
        assert_eq!(settings.format, OutputFormat::Indexed);
    }

    #[test]
    fn test_resolve_falls_back_to_file_then_defaults() {
        let mut config = AppConfig::default();
        config.clustering.k = Some(6);
        config.clustering.max_iterations = 12;
        config.output.optimize = true;

        let settings = config.resolve(&Overrides::default()).unwrap();

        assert_eq!(settings.options.k, 6);
        assert_eq!(settings.options.max_iterations, 12);
        assert_eq!(settings.options.seed, None);
        assert_eq!(settings.options.restarts, 1);
        assert!(settings.options.parallel);
        assert_eq!(settings.format, OutputFormat::Auto);
        assert!(settings.optimize);
    }

    #[test]
    fn test_resolve_requires_k() {
        let err = AppConfig::default().resolve(&Overrides::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: no palette size given: pass K or set clustering.k"
        );
    }

    #[test]
    fn test_resolve_rejects_zero_overrides() {
        let config = AppConfig::default();
        for overrides in [
            Overrides { k: Some(0), ..Default::default() },
            Overrides { k: Some(2), max_iterations: Some(0), ..Default::default() },
            Overrides { k: Some(2), restarts: Some(0), ..Default::default() },
        ] {
            assert!(matches!(config.resolve(&overrides), Err(ConfigError::Invalid(_))));
        }
    }

    #[test]
    fn test_init_method_conversion() {
        assert_eq!(Initialization::from(InitMethod::SeededSample), Initialization::SeededSample);
        assert_eq!(Initialization::from(InitMethod::FirstDistinct), Initialization::FirstDistinct);
        assert_eq!(Initialization::from(InitMethod::KmeansPlusPlus), Initialization::KMeansPlusPlus);
    }
}
