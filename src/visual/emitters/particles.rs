use bevy::asset::LoadState;
use bevy::prelude::*;
use rand::Rng;

use crate::counter::Digit;
use crate::visual::physics::{VortexField, field_acceleration};
use crate::visual::scene::CounterScene;

use super::pool::EmitterSlot;
use super::template::ColorSequence;

/// Keeps particles above labels' backdrop but below the buttons
const PARTICLE_Z: f32 = 1.0;

/// Texture handles for the ten digit glyphs, `None` once a load has failed
#[derive(Resource, Debug, Default)]
pub struct GlyphTextures {
    handles: [Option<Handle<Image>>; 10],
}

impl GlyphTextures {
    pub fn load(asset_server: &AssetServer) -> Self {
        let mut handles: [Option<Handle<Image>>; 10] = Default::default();
        for digit in Digit::ALL {
            handles[digit.index()] = Some(asset_server.load(digit.texture_path()));
        }
        Self { handles }
    }

    pub fn get(&self, digit: Digit) -> Option<&Handle<Image>> {
        self.handles[digit.index()].as_ref()
    }

    pub fn has(&self, digit: Digit) -> bool {
        self.handles[digit.index()].is_some()
    }

    fn forget(&mut self, digit: Digit) {
        self.handles[digit.index()] = None;
    }
}

/// Simulation state of one live particle
#[derive(Component, Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub age: f32,
    pub lifetime: f32,
    pub alpha: f32,
    pub alpha_speed: f32,
    pub scale: f32,
    pub scale_speed: f32,
    pub colors: ColorSequence,
    pub field_mask: u32,
}

fn jitter(rng: &mut impl Rng, range: f32) -> f32 {
    if range <= 0.0 {
        0.0
    } else {
        rng.random_range(-0.5..=0.5) * range
    }
}

impl Particle {
    /// Roll a new particle from a bursting slot's current settings
    pub fn spawn(slot: &EmitterSlot, rng: &mut impl Rng) -> Self {
        let settings = &slot.settings;
        let offset = Vec2::new(
            jitter(rng, settings.position_range.x),
            jitter(rng, settings.position_range.y),
        );
        let angle = slot.emission_angle + jitter(rng, settings.angle_range);
        let speed = slot.speed + jitter(rng, settings.speed_range);

        Self {
            position: slot.position + offset,
            velocity: Vec2::from_angle(angle) * speed,
            acceleration: settings.acceleration,
            age: 0.0,
            lifetime: (settings.lifetime + jitter(rng, settings.lifetime_range)).max(0.0),
            alpha: (settings.alpha + jitter(rng, settings.alpha_range)).clamp(0.0, 1.0),
            alpha_speed: settings.alpha_speed,
            scale: (settings.scale + jitter(rng, settings.scale_range)).max(0.0),
            scale_speed: settings.scale_speed,
            colors: slot.colors.clone(),
            field_mask: settings.field_mask,
        }
    }

    /// Advance by `dt`; returns false once the particle has expired
    pub fn step(&mut self, dt: f32, field_accel: Vec2) -> bool {
        self.velocity += (self.acceleration + field_accel) * dt;
        self.position += self.velocity * dt;
        self.alpha = (self.alpha + self.alpha_speed * dt).clamp(0.0, 1.0);
        self.scale = (self.scale + self.scale_speed * dt).max(0.0);
        self.age += dt;
        self.age < self.lifetime
    }

    /// Tint at the current point of life, alpha folded in
    pub fn color(&self) -> Color {
        let t = if self.lifetime > 0.0 {
            self.age / self.lifetime
        } else {
            1.0
        };
        let c = self.colors.sample(t);
        Color::srgba(c.x, c.y, c.z, c.w * self.alpha)
    }
}

/// System: spawn particles for every bursting slot
pub fn emit_particles(
    mut commands: Commands,
    time: Res<Time>,
    glyphs: Res<GlyphTextures>,
    mut scene: ResMut<CounterScene>,
) {
    let dt = time.delta_secs();
    let mut rng = rand::rng();

    for slot in scene.pool.iter_mut() {
        let count = slot.take_spawn_count(dt);
        if count == 0 {
            continue;
        }
        let Some(texture) = glyphs.get(slot.key().digit) else {
            continue;
        };
        let size = slot.settings.size;
        for _ in 0..count {
            let particle = Particle::spawn(slot, &mut rng);
            commands.spawn((
                Sprite {
                    image: texture.clone(),
                    color: particle.color(),
                    custom_size: Some(size),
                    ..default()
                },
                Transform::from_translation(particle.position.extend(PARTICLE_Z))
                    .with_scale(Vec3::splat(particle.scale)),
                particle,
            ));
        }
    }
}

/// System: integrate particles under their fields and retire expired ones
pub fn update_particles(
    mut commands: Commands,
    time: Res<Time>,
    fields: Query<&VortexField>,
    mut particles: Query<(Entity, &mut Particle, &mut Transform, &mut Sprite)>,
) {
    let dt = time.delta_secs();
    let fields: Vec<VortexField> = fields.iter().copied().collect();

    for (entity, mut particle, mut transform, mut sprite) in &mut particles {
        let accel = field_acceleration(&fields, particle.position, particle.field_mask);
        if !particle.step(dt, accel) {
            commands.entity(entity).despawn();
            continue;
        }
        transform.translation = particle.position.extend(PARTICLE_Z);
        transform.scale = Vec3::splat(particle.scale);
        sprite.color = particle.color();
    }
}

/// System: drop emitter slots whose glyph texture failed to load
pub fn prune_missing_glyphs(
    asset_server: Res<AssetServer>,
    mut glyphs: ResMut<GlyphTextures>,
    mut scene: ResMut<CounterScene>,
) {
    for digit in Digit::ALL {
        let Some(handle) = glyphs.get(digit) else {
            continue;
        };
        if matches!(asset_server.load_state(handle), LoadState::Failed(_)) {
            let removed = scene.pool.remove_digit(digit);
            glyphs.forget(digit);
            debug!("Glyph {} failed to load; dropped {} emitters", digit, removed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EmitterOverrides, LayoutConfig};
    use crate::visual::emitters::{
        DigitPosition, EmitterPool, EmitterRole, EmitterTemplate, SlotKey,
    };
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn slot() -> EmitterSlot {
        let template = EmitterTemplate {
            speed_range: 20.0,
            emission_angle_range: 0.2,
            lifetime_range: 0.4,
            position_range: [4.0, 2.0],
            ..default()
        };
        let pool = EmitterPool::build(
            Some(&template),
            &[EmitterRole::Previous],
            &EmitterOverrides::default(),
            &LayoutConfig::default(),
            4,
            |_| true,
        );
        pool.get(SlotKey::new(DigitPosition::Units, EmitterRole::Previous, Digit::Two))
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_spawn_stays_within_ranges() {
        let mut slot = slot();
        slot.emission_angle = -std::f32::consts::FRAC_PI_2;
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let p = Particle::spawn(&slot, &mut rng);
            assert!((p.position.x - slot.position.x).abs() <= 2.0 + 1e-4);
            assert!((p.position.y - slot.position.y).abs() <= 1.0 + 1e-4);
            let speed = p.velocity.length();
            assert!((140.0 - 1e-3..=160.0 + 1e-3).contains(&speed));
            // Emission angle points down
            assert!(p.velocity.y < 0.0);
            assert!((2.8..=3.2).contains(&p.lifetime));
            assert_eq!(p.field_mask, 4);
        }
    }

    #[test]
    fn test_step_integrates_and_expires() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = Particle::spawn(&slot(), &mut rng);
        p.velocity = Vec2::new(0.0, 10.0);
        p.position = Vec2::ZERO;
        p.lifetime = 0.25;
        p.alpha = 0.4;
        p.alpha_speed = -2.0;

        assert!(p.step(0.1, Vec2::new(0.0, 100.0)));
        assert!((p.velocity.y - 20.0).abs() < 1e-4);
        assert!((p.position.y - 2.0).abs() < 1e-4);
        assert!((p.alpha - 0.2).abs() < 1e-4);

        assert!(p.step(0.1, Vec2::ZERO));
        assert_eq!(p.alpha, 0.0);
        assert!(!p.step(0.1, Vec2::ZERO));
    }
}
