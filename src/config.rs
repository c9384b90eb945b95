use crate::data::regions::{find_region, DEFAULT_REGION};
use crate::error::{CropCareError, Result};
use crate::models::Language;
use dialoguer::{Input, Select};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const OPENWEATHERMAP_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const RECOMMENDATION_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub recommendation: RecommendationConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct WeatherConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_weather_url")]
    pub base_url: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl WeatherConfig {
    /// Live lookups need a key. An unsubstituted `${VAR}` placeholder counts
    /// as missing.
    pub fn is_usable(&self) -> bool {
        let key = self.api_key.trim();
        self.enabled && !key.is_empty() && !key.starts_with("${")
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_weather_url(),
            enabled: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("enabled", &self.enabled)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecommendationConfig {
    #[serde(default = "default_recommendation_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            base_url: default_recommendation_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardConfig {
    #[serde(default = "default_region")]
    pub default_region: String,
    #[serde(default)]
    pub language: Language,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_region: default_region(),
            language: Language::default(),
        }
    }
}

fn default_weather_url() -> String {
    OPENWEATHERMAP_BASE_URL.to_string()
}

fn default_recommendation_url() -> String {
    RECOMMENDATION_BASE_URL.to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl Config {
    pub fn load(config_override: Option<&Path>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p.to_path_buf(),
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(CropCareError::Config(format!(
                "Config file not found at {:?}. Run `cropcare init` to set up.",
                config_path
            )));
        }

        Self::from_file(&config_path)
    }

    /// Like [`Config::load`], but built-in defaults stand in when no config
    /// file exists and none was requested explicitly.
    pub fn load_or_default(config_override: Option<&Path>) -> Result<Self> {
        if config_override.is_none() && !Self::exists(None) {
            tracing::info!("No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load(config_override)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| CropCareError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| CropCareError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if find_region(&self.dashboard.default_region).is_none() {
            return Err(CropCareError::Config(format!(
                "Unknown default_region '{}'. Run `cropcare regions` for the list.",
                self.dashboard.default_region
            )));
        }
        if self.weather.timeout_secs == 0 || self.recommendation.timeout_secs == 0 {
            return Err(CropCareError::Config(
                "timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let default_path = Self::default_config_path()?;
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&Path>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/cropcare/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CropCareError::Config("Cannot determine config directory".into()))?
            .join("cropcare");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up CropCare!");
        println!();

        println!("Weather (OpenWeatherMap, leave API key blank to use regional fallbacks)");
        let api_key: String = Input::new()
            .with_prompt("  API key")
            .default("${OPENWEATHER_API_KEY}".into())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| CropCareError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Crop recommendation service");
        let recommendation_url: String = Input::new()
            .with_prompt("  Base URL")
            .default(RECOMMENDATION_BASE_URL.into())
            .interact_text()
            .map_err(|e| CropCareError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Dashboard");
        let region_names: Vec<&str> = crate::data::REGIONS.iter().map(|r| r.name).collect();
        let default_idx = crate::data::regions::region_index(DEFAULT_REGION).unwrap_or(0);
        let region_idx = Select::new()
            .with_prompt("  Default region")
            .items(&region_names)
            .default(default_idx)
            .interact()
            .map_err(|e| CropCareError::Config(format!("Input error: {}", e)))?;

        let language_names: Vec<&str> = Language::ALL.iter().map(|l| l.as_str()).collect();
        let language_idx = Select::new()
            .with_prompt("  Chat language")
            .items(&language_names)
            .default(0)
            .interact()
            .map_err(|e| CropCareError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            weather: WeatherConfig {
                enabled: !api_key.is_empty(),
                api_key,
                ..WeatherConfig::default()
            },
            recommendation: RecommendationConfig {
                base_url: recommendation_url,
                ..RecommendationConfig::default()
            },
            dashboard: DashboardConfig {
                default_region: region_names[region_idx].to_string(),
                language: Language::ALL[language_idx],
            },
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| CropCareError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# CropCare Configuration\n# Generated by `cropcare init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let Ok(re) = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
            return content.to_string();
        };

        re.replace_all(content, |caps: &regex_lite::Captures<'_>| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
    }

    /// Directory for log files. `CROPCARE_DATA_DIR` overrides the XDG location.
    pub fn data_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("CROPCARE_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| CropCareError::Config("Cannot determine data directory".into()))?
            .join("cropcare");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.weather.base_url, OPENWEATHERMAP_BASE_URL);
        assert_eq!(config.weather.timeout_secs, 10);
        assert_eq!(config.recommendation.base_url, "http://localhost:5000");
        assert_eq!(config.dashboard.default_region, "Punjab");
        assert_eq!(config.dashboard.language, Language::English);
        assert!(!config.weather.is_usable());
    }

    #[test]
    fn parses_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "weather:\n  api_key: abc123\n  timeout_secs: 5\nrecommendation:\n  base_url: http://10.0.0.2:5000\ndashboard:\n  default_region: Kerala\n  language: Hindi"
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert!(config.weather.is_usable());
        assert_eq!(config.weather.timeout_secs, 5);
        assert_eq!(config.recommendation.base_url, "http://10.0.0.2:5000");
        assert_eq!(config.dashboard.default_region, "Kerala");
        assert_eq!(config.dashboard.language, Language::Hindi);
    }

    #[test]
    fn missing_override_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.yaml");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, CropCareError::Config(_)));
        assert!(Config::load_or_default(Some(&path)).is_err());
    }

    #[test]
    fn env_substitution() {
        std::env::set_var("CROPCARE_TEST_OWM_KEY", "from-env");
        let config =
            Config::from_yaml("weather:\n  api_key: ${CROPCARE_TEST_OWM_KEY}\n").unwrap();
        assert_eq!(config.weather.api_key, "from-env");
    }

    #[test]
    fn unset_placeholder_is_not_usable() {
        let config =
            Config::from_yaml("weather:\n  api_key: ${CROPCARE_TEST_UNSET_VARIABLE}\n").unwrap();
        assert_eq!(config.weather.api_key, "${CROPCARE_TEST_UNSET_VARIABLE}");
        assert!(!config.weather.is_usable());
    }

    #[test]
    fn rejects_unknown_region_and_zero_timeout() {
        assert!(Config::from_yaml("dashboard:\n  default_region: Atlantis\n").is_err());
        assert!(Config::from_yaml("recommendation:\n  timeout_secs: 0\n").is_err());
    }

    #[test]
    fn example_file_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/config.yaml.example");
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.dashboard.default_region, DEFAULT_REGION);
        assert_eq!(config.recommendation.base_url, RECOMMENDATION_BASE_URL);
    }

    #[test]
    fn debug_redacts_api_key() {
        let weather = WeatherConfig {
            api_key: "secret-key".into(),
            ..WeatherConfig::default()
        };
        let debug = format!("{:?}", weather);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("[REDACTED]"));
    }
}
