//! Configuration loader.

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    ///
    /// Comment lines are left untouched so a commented-out secret does not
    /// have to be set.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let re = regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")
            .map_err(|e| ConfigError::InvalidValue {
                field: "env pattern".to_string(),
                message: e.to_string(),
            })?;

        let mut lines = Vec::new();
        for line in content.lines() {
            if line.trim_start().starts_with('#') {
                lines.push(line.to_string());
                continue;
            }

            let mut expanded = line.to_string();
            for cap in re.captures_iter(line) {
                let var_name = &cap[1];
                let var_value = std::env::var(var_name)
                    .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
                expanded = expanded.replace(&cap[0], &var_value);
            }
            lines.push(expanded);
        }

        Ok(lines.join("\n"))
    }

    /// Expand shell-style paths (e.g., `~/tickets`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}
