use crate::counter::Direction;
use crate::visual::utils::{ease_in_out_sine, leg_progress, lerp};

/// Seconds to slide from the entry point to the overshoot
const SLIDE_DURATION: f32 = 0.1;
/// Seconds to fade from transparent to opaque, running alongside the slide
const FADE_IN_DURATION: f32 = 0.05;
/// Seconds to settle from the overshoot back to the base line
const SETTLE_DURATION: f32 = 0.1;

/// Incoming-glyph animation: jump off the base line, slide past it, settle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideTransition {
    entry_y: f32,
    overshoot_y: f32,
    base_y: f32,
    elapsed: f32,
}

impl SlideTransition {
    /// Increments enter from above and overshoot below; decrements mirror that
    pub fn new(base_y: f32, direction: Direction, entry_offset: f32, overshoot: f32) -> Self {
        let sign = direction.sign();
        Self {
            entry_y: base_y + sign * entry_offset,
            overshoot_y: base_y - sign * overshoot,
            base_y,
            elapsed: 0.0,
        }
    }

    pub const fn duration() -> f32 {
        SLIDE_DURATION + SETTLE_DURATION
    }

    #[cfg(test)]
    pub fn entry_y(&self) -> f32 {
        self.entry_y
    }

    #[cfg(test)]
    pub fn overshoot_y(&self) -> f32 {
        self.overshoot_y
    }

    /// Current `(y, alpha)`
    pub fn sample(&self) -> (f32, f32) {
        let alpha = leg_progress(self.elapsed, FADE_IN_DURATION);
        if self.elapsed < SLIDE_DURATION {
            let t = ease_in_out_sine(leg_progress(self.elapsed, SLIDE_DURATION));
            (lerp(self.entry_y, self.overshoot_y, t), alpha)
        } else {
            let t = ease_in_out_sine(leg_progress(self.elapsed - SLIDE_DURATION, SETTLE_DURATION));
            (lerp(self.overshoot_y, self.base_y, t), alpha)
        }
    }

    /// Returns true once the glyph is back on its base line
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= Self::duration()
    }
}

/// Scale to `peak` and back to 1.0, one leg each way
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalePulse {
    from: f32,
    peak: f32,
    leg: f32,
    elapsed: f32,
}

impl ScalePulse {
    /// `from` is the scale at the moment the pulse starts, so a pulse that
    /// replaces an in-flight one carries on from wherever it was cut off
    pub fn new(from: f32, peak: f32, leg: f32) -> Self {
        Self {
            from,
            peak,
            leg,
            elapsed: 0.0,
        }
    }

    /// Classic label pop: grow on increment, shrink on decrement
    pub fn pop(from: f32, direction: Direction) -> Self {
        let peak = match direction {
            Direction::Increment => 1.3,
            Direction::Decrement => 0.7,
        };
        Self::new(from, peak, 0.1)
    }

    /// Button press feedback
    pub fn press(from: f32) -> Self {
        Self::new(from, 0.9, 0.05)
    }

    pub fn sample(&self) -> f32 {
        if self.elapsed < self.leg {
            lerp(self.from, self.peak, leg_progress(self.elapsed, self.leg))
        } else {
            lerp(self.peak, 1.0, leg_progress(self.elapsed - self.leg, self.leg))
        }
    }

    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.leg * 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_starts_hidden_above_on_increment() {
        let slide = SlideTransition::new(0.0, Direction::Increment, 15.0, 3.0);
        assert_eq!(slide.sample(), (15.0, 0.0));
        assert_eq!(slide.overshoot_y(), -3.0);
    }

    #[test]
    fn test_slide_mirrors_on_decrement() {
        let slide = SlideTransition::new(-11.0, Direction::Decrement, 15.0, 3.0);
        assert_eq!(slide.entry_y(), -26.0);
        assert_eq!(slide.overshoot_y(), -8.0);
    }

    #[test]
    fn test_slide_timeline() {
        let mut slide = SlideTransition::new(0.0, Direction::Increment, 15.0, 3.0);

        slide.advance(0.025);
        let (y, alpha) = slide.sample();
        assert!((alpha - 0.5).abs() < 1e-4);
        assert!(y < 15.0 && y > -3.0);

        slide.advance(0.05);
        assert_eq!(slide.sample().1, 1.0);

        // Past the slide leg: heading home from the overshoot
        slide.advance(0.035);
        let (y, _) = slide.sample();
        assert!(y < 0.0 && y >= -3.0);

        assert!(!slide.is_finished());
        assert!(slide.advance(0.1));
        let (y, alpha) = slide.sample();
        assert!(y.abs() < 1e-4);
        assert_eq!(alpha, 1.0);
    }

    #[test]
    fn test_press_pulse() {
        let mut pulse = ScalePulse::press(1.0);
        assert_eq!(pulse.sample(), 1.0);
        pulse.advance(0.05);
        assert!((pulse.sample() - 0.9).abs() < 1e-4);
        assert!(pulse.advance(0.05));
        assert!((pulse.sample() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_pulse_resumes_from_interrupted_scale() {
        let pulse = ScalePulse::press(0.95);
        assert_eq!(pulse.sample(), 0.95);
        let pop = ScalePulse::pop(1.0, Direction::Decrement);
        let mut halfway = pop;
        halfway.advance(0.05);
        assert!((halfway.sample() - 0.85).abs() < 1e-4);
    }
}
