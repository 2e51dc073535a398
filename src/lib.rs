use serde::Deserialize;

use self::errors::YarikuriError;

pub mod errors;
pub mod ledger;
pub mod tui;

pub const ANSI_GREEN: &str = "\x1b[32m";
pub const ANSI_RED: &str = "\x1b[31m";
pub const ANSI_STOP: &str = "\x1b[0m";

pub const CONFIG_FILE: &str = "yarikuri.config";

#[derive(Debug, Deserialize)]
pub struct YarikuriConfig {
    pub currency: char,
    pub decimal_sep: char,
    pub user_name: String,
}

impl Default for YarikuriConfig {
    fn default() -> Self {
        Self {
            currency: '$',
            decimal_sep: '.',
            user_name: "friend".to_string(),
        }
    }
}

pub fn parse_config() -> Result<YarikuriConfig, YarikuriError> {
    let cur_dir = std::env::current_dir()?;
    let config_path = cur_dir.join(CONFIG_FILE);

    if !config_path.exists() {
        println!(
            "No config file found at {}, using defaults.",
            config_path.display()
        );
        println!(
            "To customize, create a config file. A minimal config would look like this:
\"user_name\" = \"Your name\"
\"currency\" = \"$\"
\"decimal_sep\" = \".\""
        );
        return Ok(YarikuriConfig::default());
    }

    let config = std::fs::read_to_string(config_path)?;
    let config: YarikuriConfig = toml::from_str(&config)?;
    Ok(config)
}
