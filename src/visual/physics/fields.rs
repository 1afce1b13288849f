use bevy::prelude::*;

/// Acceleration per unit of field strength, in world units per second squared
pub const VORTEX_UNIT: f32 = 20.0;

/// Swirling field that pushes particles around its centre
#[derive(Component, Debug, Clone, Copy)]
pub struct VortexField {
    pub position: Vec2,
    pub strength: f32,
    /// Particles whose field mask shares a bit with this are affected
    pub category: u32,
}

impl VortexField {
    pub fn affects(&self, field_mask: u32) -> bool {
        self.category & field_mask != 0
    }

    /// Counter-clockwise tangential acceleration at `point`, zero at the centre
    pub fn acceleration_at(&self, point: Vec2) -> Vec2 {
        let offset = point - self.position;
        let distance = offset.length();
        if distance < 1e-3 {
            return Vec2::ZERO;
        }
        (offset / distance).perp() * self.strength * VORTEX_UNIT
    }
}

/// Sum of every field acting on a particle with `field_mask`
pub fn field_acceleration<'a>(
    fields: impl IntoIterator<Item = &'a VortexField>,
    point: Vec2,
    field_mask: u32,
) -> Vec2 {
    fields
        .into_iter()
        .filter(|field| field.affects(field_mask))
        .map(|field| field.acceleration_at(point))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> VortexField {
        VortexField {
            position: Vec2::ZERO,
            strength: 10.0,
            category: 0x1 << 2,
        }
    }

    #[test]
    fn test_vortex_is_tangential() {
        let accel = field().acceleration_at(Vec2::new(5.0, 0.0));
        // Counter-clockwise: +X offset pushes toward +Y
        assert!(accel.x.abs() < 1e-5);
        assert!((accel.y - 10.0 * VORTEX_UNIT).abs() < 1e-3);

        let accel = field().acceleration_at(Vec2::new(0.0, 3.0));
        assert!(accel.x < 0.0);
        assert!(accel.y.abs() < 1e-5);
    }

    #[test]
    fn test_vortex_is_zero_at_centre() {
        assert_eq!(field().acceleration_at(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_category_mask_filters() {
        let fields = [field()];
        let point = Vec2::new(1.0, 0.0);
        assert_eq!(field_acceleration(&fields, point, 0x1 << 1), Vec2::ZERO);
        assert_ne!(field_acceleration(&fields, point, 0xff), Vec2::ZERO);
    }
}
