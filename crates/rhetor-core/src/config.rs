use serde::{Deserialize, Serialize};

/// Schema of ~/.config/rhetor/config.toml.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Model id used when the CLI does not pass one.
    #[serde(default)]
    pub default_model: Option<String>,
    /// Probability that a sparring reply carries a deliberate fallacy.
    #[serde(default = "default_fallacy_rate")]
    pub fallacy_rate: f64,
    /// Whether coach feedback is printed after each user turn.
    #[serde(default = "default_show_coaching")]
    pub show_coaching: bool,
}

fn default_fallacy_rate() -> f64 {
    0.3
}

fn default_show_coaching() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_model: None,
            fallacy_rate: default_fallacy_rate(),
            show_coaching: default_show_coaching(),
        }
    }
}

/// Schema of ~/.config/rhetor/secret.json.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    #[serde(default)]
    pub hugging_face: Option<HuggingFaceSecret>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct HuggingFaceSecret {
    pub api_token: String,
}
