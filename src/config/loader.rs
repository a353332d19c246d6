use super::Config;
use crate::error::ConfigError;
use directories::UserDirs;
use std::fs;
use std::path::Path;

impl Config {
    pub fn load_or_init() -> Result<Self, ConfigError> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .ok_or_else(|| ConfigError::Load("could not find home directory".into()))?;
        Self::load_or_init_in(&home.join(".humanic"))
    }

    /// Load `config.toml` from `humanic_dir`, writing defaults on first run.
    ///
    /// The result is not validated here; env and flag overrides still apply
    /// and the caller validates the final config.
    pub fn load_or_init_in(humanic_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = humanic_dir.join("config.toml");

        if !humanic_dir.exists() {
            fs::create_dir_all(humanic_dir)?;
        }

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)?;
            let mut config: Config = toml::from_str(&contents).map_err(|e| {
                ConfigError::Load(format!("cannot parse {}: {e}", config_path.display()))
            })?;
            config.config_path.clone_from(&config_path);
            config.state_dir = humanic_dir.to_path_buf();
            Ok(config)
        } else {
            let config = Self {
                config_path,
                state_dir: humanic_dir.to_path_buf(),
                ..Self::default()
            };
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let toml_str =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        fs::write(&self.config_path, toml_str)?;
        Ok(())
    }
}
