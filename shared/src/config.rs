use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Dimensions;

pub const DEFAULT_IDENTIFIER: &str = "tsparticles";

/// Configuration of a single [`crate::Sparkles`] instance. Every key is optional when
/// deserializing; missing keys fall back to [`SparklesConfig::default()`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SparklesConfig {
    /// Element id of the drawing surface. Must be unique per document.
    #[serde(alias = "identifier")]
    pub id: String,
    /// Extra CSS classes applied to the surface element.
    pub class_name: String,
    /// CSS color painted over the whole surface every frame.
    pub background: String,
    pub min_size: f64,
    pub max_size: f64,
    /// Linear multiplier on the generated particle count, in percent.
    pub particle_density: f64,
    pub particle_color: String,
    pub speed: f64,
    /// Blur radius in pixels applied to each particle's paint. `0` disables it.
    pub particle_blur: f64,
    /// Fixed RNG seed; a random one is chosen by the host when absent.
    pub seed: Option<u64>,
}

impl Default for SparklesConfig {
    fn default() -> Self {
        SparklesConfig {
            id: DEFAULT_IDENTIFIER.to_string(),
            class_name: String::new(),
            background: "#000".to_string(),
            min_size: 0.6,
            max_size: 1.4,
            particle_density: 100.0,
            particle_color: "#fff".to_string(),
            speed: 1.0,
            particle_blur: 0.0,
            seed: None,
        }
    }
}

impl SparklesConfig {
    pub fn from_json(json: &str) -> Result<SparklesConfig, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::from)
    }

    /// The inputs of population generation for the given surface size.
    pub fn field_params(&self, dimensions: Dimensions) -> FieldParams {
        FieldParams {
            dimensions,
            min_size: self.min_size,
            max_size: self.max_size,
            density: self.particle_density,
            speed: self.speed,
        }
    }
}

/// The six values a population is generated from. Two populations generated from equal
/// [`FieldParams`] have the same length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    pub dimensions: Dimensions,
    pub min_size: f64,
    pub max_size: f64,
    pub density: f64,
    pub speed: f64,
}

#[derive(Debug)]
pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid sparkles configuration: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        ConfigError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = SparklesConfig::from_json("{}").unwrap();

        assert_eq!(config, SparklesConfig::default());
        assert_eq!(config.id, "tsparticles");
        assert_eq!(config.particle_density, 100.0);
    }

    #[test]
    fn camel_case_keys_override_defaults() {
        let config = SparklesConfig::from_json(
            r##"{
                "identifier": "tsparticlesfullpage",
                "background": "transparent",
                "minSize": 0.6,
                "maxSize": 1.4,
                "particleDensity": 70,
                "particleColor": "#8c6dfd",
                "particleBlur": 2.5
            }"##,
        )
        .unwrap();

        assert_eq!(config.id, "tsparticlesfullpage");
        assert_eq!(config.background, "transparent");
        assert_eq!(config.particle_density, 70.0);
        assert_eq!(config.particle_color, "#8c6dfd");
        assert_eq!(config.particle_blur, 2.5);
        assert_eq!(config.speed, 1.0);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let error = SparklesConfig::from_json(r#"{"speed": "fast"}"#).unwrap_err();

        assert!(error.to_string().starts_with("invalid sparkles configuration"));
    }

    #[test]
    fn field_params_ignore_paint_settings() {
        let dimensions = Dimensions::new(640, 480);
        let config = SparklesConfig::default();
        let repainted = SparklesConfig {
            background: "#123".to_string(),
            particle_color: "red".to_string(),
            particle_blur: 4.0,
            ..SparklesConfig::default()
        };

        assert_eq!(
            config.field_params(dimensions),
            repainted.field_params(dimensions)
        );
    }
}
