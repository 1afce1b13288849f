//! The arena that owns every emitter slot, label and pending reset.

use bevy::prelude::*;

use crate::config::{BurstConfig, CounterConfig, LayoutConfig, SceneVariant};
use crate::counter::{Decomposition, Digit};
use crate::visual::emitters::{BurstScheduler, EmitterPool, EmitterRole, EmitterTemplate};
use crate::visual::labels::{LabelNode, LabelSet};

#[derive(Resource, Debug, Clone)]
pub struct CounterScene {
    pub variant: SceneVariant,
    pub layout: LayoutConfig,
    pub burst: BurstConfig,
    pub pool: EmitterPool,
    pub labels: LabelSet,
    pub resets: BurstScheduler,
}

impl CounterScene {
    /// Build the scene for `config`, showing `shown` with no animation.
    ///
    /// `has_glyph` reports which digit textures are available; missing ones
    /// simply get no emitters.
    pub fn new(
        config: &CounterConfig,
        template: Option<&EmitterTemplate>,
        shown: Decomposition,
        has_glyph: impl Fn(Digit) -> bool,
    ) -> Self {
        let layout = config.layout;
        let roles: &[EmitterRole] = match config.variant {
            SceneVariant::Split => &[EmitterRole::Previous, EmitterRole::Current],
            SceneVariant::Classic => &[EmitterRole::Previous],
        };
        let pool = EmitterPool::build(
            template,
            roles,
            &config.active_overrides(),
            &layout,
            config.field.category,
            has_glyph,
        );

        let labels = match config.variant {
            SceneVariant::Split => LabelSet::Split {
                units: LabelNode::new(shown.units.to_string(), layout.units_x, layout.label_base_y),
                tens: LabelNode::new(shown.tens.to_string(), layout.tens_x, layout.label_base_y),
            },
            SceneVariant::Classic => {
                LabelSet::Combined(LabelNode::new(format!("{:02}", shown.value()), 0.0, layout.label_base_y))
            }
        };

        Self {
            variant: config.variant,
            layout,
            burst: config.burst,
            pool,
            labels,
            resets: BurstScheduler::new(config.reset_policy),
        }
    }
}
