use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub stitch: StitchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StitchConfig {
    /// Strip surrounding whitespace (trailing newlines) from each fragment file.
    #[serde(default = "default_trim_whitespace")]
    pub trim_whitespace: bool,

    /// Re-indent the stitched array instead of writing it compact.
    #[serde(default)]
    pub pretty: bool,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            trim_whitespace: default_trim_whitespace(),
            pretty: false,
        }
    }
}

fn default_trim_whitespace() -> bool {
    true
}

impl Config {
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
