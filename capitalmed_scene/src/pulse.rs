// Expanding, fading ring animation.
//
// Two pulses animate on the map: the ring under the avatar marker (always
// running) and the arrival ring under the destination building (running only
// while the visitor has arrived). Each frame the ring's horizontal scale
// grows and its opacity drops at a fixed rate per second; once the opacity
// reaches zero both snap back to their start values and the cycle repeats.
// The state is explicit so the renderer can own it and tick it with the
// frame delta.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PulseRing {
    scale: f32,
    opacity: f32,
    start_opacity: f32,
    /// Scale added per second.
    growth: f32,
    /// Opacity removed per second.
    fade: f32,
}

impl PulseRing {
    pub fn new(start_opacity: f32, growth: f32, fade: f32) -> Self {
        Self {
            scale: 1.0,
            opacity: start_opacity,
            start_opacity,
            growth,
            fade,
        }
    }

    /// The pulse under the avatar marker.
    pub fn avatar() -> Self {
        Self::new(0.5, 1.5, 0.4)
    }

    /// The pulse under a building the visitor has arrived at.
    pub fn arrival() -> Self {
        Self::new(0.4, 3.0, 0.5)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Advance by `delta_ms`. Negative deltas are treated as zero.
    pub fn tick(&mut self, delta_ms: f32) {
        let dt = delta_ms.max(0.0) / 1000.0;
        self.scale += dt * self.growth;
        self.opacity -= dt * self.fade;
        if self.opacity <= 0.0 {
            self.restart();
        }
    }

    /// Back to the start of the cycle.
    pub fn restart(&mut self) {
        self.scale = 1.0;
        self.opacity = self.start_opacity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_and_fades() {
        let mut p = PulseRing::avatar();
        p.tick(100.0);
        assert!((p.scale() - 1.15).abs() < 1e-5);
        assert!((p.opacity() - 0.46).abs() < 1e-5);
    }

    #[test]
    fn restarts_when_faded_out() {
        let mut p = PulseRing::arrival();
        // 0.4 opacity at 0.5/s lasts 800 ms.
        for _ in 0..7 {
            p.tick(100.0);
        }
        assert!(p.opacity() > 0.0);
        assert!(p.scale() > 3.0);
        p.tick(200.0);
        assert_eq!(p.scale(), 1.0);
        assert_eq!(p.opacity(), 0.4);
    }

    #[test]
    fn negative_delta_is_ignored() {
        let mut p = PulseRing::avatar();
        p.tick(-50.0);
        assert_eq!(p, PulseRing::avatar());
    }
}
