//! Scene tuning loaded from the embedded `counter.json`.
//!
//! Every field has a default equal to the hand-tuned constants, so the JSON
//! only needs to list what it changes.

use std::fmt;

use bevy::prelude::*;
use serde::Deserialize;

use crate::visual::emitters::ResetPolicy;

const COUNTER_JSON: &str = include_str!("../assets/config/counter.json");

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    InvalidBurst { birth_rate: f32, duration: f32 },
    InvalidZoom(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "Failed to parse counter config: {}", err),
            ConfigError::InvalidBurst {
                birth_rate,
                duration,
            } => write!(
                f,
                "Burst needs a positive rate and duration (got rate={}, duration={})",
                birth_rate, duration
            ),
            ConfigError::InvalidZoom(zoom) => write!(f, "Camera zoom must be positive, got {}", zoom),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Which of the two counter scenes to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SceneVariant {
    /// Separate tens/units labels, outgoing and incoming emitters per digit
    #[default]
    Split,
    /// One combined label that pops, outgoing emitters only
    Classic,
}

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub variant: SceneVariant,
    pub reset_policy: ResetPolicy,
    /// Emitter archetype name in the template library
    pub template: String,
    pub initial_value: u8,
    pub camera_zoom: f32,
    pub burst: BurstConfig,
    pub layout: LayoutConfig,
    /// Per-digit overrides for the split scene
    pub emitters: EmitterOverrides,
    /// Per-digit overrides for the classic scene
    pub classic_emitters: EmitterOverrides,
    pub field: FieldConfig,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            variant: SceneVariant::Split,
            reset_policy: ResetPolicy::Generation,
            template: "NumberEmitter".to_string(),
            initial_value: 0,
            camera_zoom: 0.5,
            burst: BurstConfig::default(),
            layout: LayoutConfig::default(),
            emitters: EmitterOverrides::default(),
            classic_emitters: EmitterOverrides::classic(),
            field: FieldConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    /// Birth rate while a burst is on (particles per second)
    pub birth_rate: f32,
    /// Seconds before a burst is switched back off
    pub duration: f32,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            birth_rate: 1.0,
            duration: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub units_x: f32,
    pub tens_x: f32,
    pub label_base_y: f32,
    pub label_font_size: f32,
    /// Vertical jump of the incoming label before it slides home
    pub label_entry_offset: f32,
    /// Overshoot past the base line at the end of the slide
    pub label_overshoot: f32,
    /// Outgoing emitter y (negated on decrement)
    pub previous_emitter_y: f32,
    /// Incoming emitter y (negated on decrement)
    pub current_emitter_y: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            units_x: 8.0,
            tens_x: -8.0,
            label_base_y: 0.0,
            label_font_size: 25.0,
            label_entry_offset: 15.0,
            label_overshoot: 3.0,
            previous_emitter_y: -5.0,
            current_emitter_y: 20.0,
        }
    }
}

/// Per-scene changes applied on top of the emitter template.
///
/// `None` (or `null` in JSON) keeps the template's value.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct EmitterOverrides {
    pub speed: Option<f32>,
    pub lifetime: Option<f32>,
    pub alpha: Option<f32>,
    pub alpha_speed: Option<f32>,
    pub scale_speed: Option<f32>,
    /// Particle scale for the tens position
    pub tens_scale: Option<f32>,
}

impl Default for EmitterOverrides {
    fn default() -> Self {
        Self {
            speed: Some(150.0),
            lifetime: Some(3.0),
            alpha: Some(0.4),
            alpha_speed: Some(-2.0),
            scale_speed: Some(0.0),
            tens_scale: None,
        }
    }
}

impl EmitterOverrides {
    pub fn classic() -> Self {
        Self {
            speed: Some(300.0),
            lifetime: Some(2.0),
            alpha: Some(0.4),
            alpha_speed: Some(-0.5),
            scale_speed: Some(0.0),
            tens_scale: Some(1.5),
        }
    }

    /// Leave every template value alone
    pub fn none() -> Self {
        Self {
            speed: None,
            lifetime: None,
            alpha: None,
            alpha_speed: None,
            scale_speed: None,
            tens_scale: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub strength: f32,
    /// Category bits shared by the field and every emitter
    pub category: u32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            strength: 10.0,
            category: 0x1 << 2,
        }
    }
}

impl CounterConfig {
    /// Parse the embedded config
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_json(COUNTER_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CounterConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.burst.birth_rate <= 0.0 || self.burst.duration <= 0.0 {
            return Err(ConfigError::InvalidBurst {
                birth_rate: self.burst.birth_rate,
                duration: self.burst.duration,
            });
        }
        if self.camera_zoom <= 0.0 {
            return Err(ConfigError::InvalidZoom(self.camera_zoom));
        }
        Ok(())
    }

    /// Overrides that apply to the configured scene
    pub fn active_overrides(&self) -> EmitterOverrides {
        match self.variant {
            SceneVariant::Split => self.emitters,
            SceneVariant::Classic => self.classic_emitters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_parses() {
        let config = CounterConfig::load().unwrap();
        assert!(config.burst.duration > 0.0);
        assert_eq!(config.template, "NumberEmitter");
    }

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = CounterConfig::from_json("{}").unwrap();
        assert_eq!(config.variant, SceneVariant::Split);
        assert_eq!(config.reset_policy, ResetPolicy::Generation);
        assert_eq!(config.burst.birth_rate, 1.0);
        assert_eq!(config.burst.duration, 0.1);
        assert_eq!(config.field.category, 4);
        assert_eq!(config.active_overrides().speed, Some(150.0));
    }

    #[test]
    fn test_partial_override() {
        let config = CounterConfig::from_json(
            r#"{ "variant": "classic", "reset_policy": "uncancellable", "field": { "strength": 3.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.variant, SceneVariant::Classic);
        assert_eq!(config.reset_policy, ResetPolicy::Uncancellable);
        assert_eq!(config.field.strength, 3.0);
        assert_eq!(config.field.category, 4);
        assert_eq!(config.active_overrides().tens_scale, Some(1.5));
    }

    #[test]
    fn test_null_override_defers_to_template() {
        let config =
            CounterConfig::from_json(r#"{ "emitters": { "lifetime": null, "speed": 90.0 } }"#)
                .unwrap();
        assert_eq!(config.emitters.lifetime, None);
        assert_eq!(config.emitters.speed, Some(90.0));
        assert_eq!(config.emitters.alpha, Some(0.4));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            CounterConfig::from_json("{ \"burst\": { \"duration\": 0.0 } }"),
            Err(ConfigError::InvalidBurst { .. })
        ));
        assert!(matches!(
            CounterConfig::from_json("{ \"camera_zoom\": -1.0 }"),
            Err(ConfigError::InvalidZoom(_))
        ));
        assert!(matches!(
            CounterConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
