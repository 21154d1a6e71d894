use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Generation constants and output settings. Request parameters are fixed per
/// run, not per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: String,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub timeout_secs: u64,
    pub output_file: String,
    pub artifact_root: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo-16k".into(),
            max_tokens: 800,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            timeout_secs: 120,
            output_file: "Generated_Articles.csv".into(),
            artifact_root: ".factory".into(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let raw = fs_err::read_to_string(path)
            .with_context(|| format!("reading config file {path}"))?;
        let cfg = toml::from_str(&raw)
            .with_context(|| format!("parsing config file {path}"))?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_request_parameters() {
        let cfg = Config::default();
        assert_eq!(cfg.max_tokens, 800);
        assert_eq!(cfg.top_p, 1.0);
        assert_eq!(cfg.frequency_penalty, 0.0);
        assert_eq!(cfg.presence_penalty, 0.0);
        assert_eq!(cfg.output_file, "Generated_Articles.csv");
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg: Config = toml::from_str("model = \"gpt-4o-mini\"\nmax_tokens = 512\n").unwrap();
        assert_eq!(cfg.model, "gpt-4o-mini");
        assert_eq!(cfg.max_tokens, 512);
        assert_eq!(cfg.top_p, 1.0);
    }
}
