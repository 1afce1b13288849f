use std::collections::HashMap;

use bevy::prelude::*;
use serde::Deserialize;

const TEMPLATES_JSON: &str = include_str!("../../../assets/emitters/templates.json");

#[derive(Debug, Deserialize)]
struct TemplatesJson {
    templates: Vec<EmitterTemplate>,
}

/// Emitter archetype that every pooled slot is cloned from
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmitterTemplate {
    pub name: String,
    pub speed: f32,
    pub speed_range: f32,
    /// Radians, +Y is up
    pub emission_angle: f32,
    pub emission_angle_range: f32,
    pub lifetime: f32,
    pub lifetime_range: f32,
    pub alpha: f32,
    pub alpha_range: f32,
    pub alpha_speed: f32,
    pub scale: f32,
    pub scale_range: f32,
    pub scale_speed: f32,
    /// Full width/height of the spawn jitter box
    pub position_range: [f32; 2],
    pub acceleration: [f32; 2],
    pub color: [f32; 4],
    /// Sprite size in world units at scale 1
    pub size: [f32; 2],
}

impl Default for EmitterTemplate {
    fn default() -> Self {
        Self {
            name: String::new(),
            speed: 100.0,
            speed_range: 0.0,
            emission_angle: std::f32::consts::FRAC_PI_2,
            emission_angle_range: 0.0,
            lifetime: 1.0,
            lifetime_range: 0.0,
            alpha: 1.0,
            alpha_range: 0.0,
            alpha_speed: 0.0,
            scale: 1.0,
            scale_range: 0.0,
            scale_speed: 0.0,
            position_range: [0.0, 0.0],
            acceleration: [0.0, 0.0],
            color: [1.0, 1.0, 1.0, 1.0],
            size: [16.0, 24.0],
        }
    }
}

/// Named emitter archetypes parsed from the embedded `templates.json`
#[derive(Resource, Debug, Default)]
pub struct TemplateLibrary {
    templates: HashMap<String, EmitterTemplate>,
}

impl TemplateLibrary {
    pub fn load() -> Result<Self, serde_json::Error> {
        Self::from_json(TEMPLATES_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let parsed: TemplatesJson = serde_json::from_str(json)?;
        let templates = parsed
            .templates
            .into_iter()
            .map(|t| (t.name.clone(), t))
            .collect();
        Ok(Self { templates })
    }

    /// `None` when no archetype of that name exists
    pub fn get(&self, name: &str) -> Option<&EmitterTemplate> {
        self.templates.get(name)
    }
}

/// Colour keyframes over normalised particle lifetime
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSequence {
    keys: Vec<(f32, Vec4)>,
}

impl ColorSequence {
    pub fn constant(color: Vec4) -> Self {
        Self {
            keys: vec![(0.0, color)],
        }
    }

    /// Keyframes must be given in ascending time order
    pub fn new(keys: Vec<(f32, Vec4)>) -> Self {
        if keys.is_empty() {
            return Self::constant(Vec4::ONE);
        }
        Self { keys }
    }

    /// Linear interpolation, clamped to the first and last key
    pub fn sample(&self, t: f32) -> Vec4 {
        let (first_t, first) = self.keys[0];
        if t <= first_t {
            return first;
        }
        for pair in self.keys.windows(2) {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            if t <= t1 {
                let span = (t1 - t0).max(f32::EPSILON);
                return c0.lerp(c1, (t - t0) / span);
            }
        }
        self.keys[self.keys.len() - 1].1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_library_has_number_emitter() {
        let library = TemplateLibrary::load().unwrap();
        let template = library.get("NumberEmitter").unwrap();
        assert!(template.lifetime > 0.0);
        assert!(library.get("Sparkles").is_none());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let library =
            TemplateLibrary::from_json(r#"{ "templates": [ { "name": "Bare", "speed": 5.0 } ] }"#)
                .unwrap();
        let bare = library.get("Bare").unwrap();
        assert_eq!(bare.speed, 5.0);
        assert_eq!(bare.scale, 1.0);
    }

    #[test]
    fn test_color_sequence_sampling() {
        let white = Vec4::ONE;
        let green = Vec4::new(0.0, 1.0, 0.0, 1.0);
        let seq = ColorSequence::new(vec![(0.0, white), (0.1, green)]);

        assert_eq!(seq.sample(-1.0), white);
        assert_eq!(seq.sample(0.5), green);
        let mid = seq.sample(0.05);
        assert!((mid.x - 0.5).abs() < 1e-4);
        assert_eq!(mid.y, 1.0);
    }
}
