//! Spring-damped blend factor for the sphere↔wave morph.
//!
//! The external busy/idle signal moves the target instantly; the live blend
//! value follows it under a damped second-order spring so the formation
//! never jumps, even when the signal flips mid-flight.

use nimbus_config::schema::SpringConfig;

/// Integration substep in seconds. Fixed small steps keep semi-implicit
/// Euler stable independent of the host frame rate.
const SUBSTEP: f32 = 0.001;

/// Largest frame delta the integrator will honor. A window that was
/// suspended for minutes resumes smoothly instead of fast-forwarding.
const MAX_FRAME_DT: f32 = 0.25;

/// Spring constants: mass, tension (stiffness), friction (damping).
#[derive(Debug, Clone, Copy)]
pub struct SpringParams {
    pub mass: f32,
    pub tension: f32,
    pub friction: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            mass: 2.0,
            tension: 170.0,
            friction: 26.0,
        }
    }
}

impl From<&SpringConfig> for SpringParams {
    fn from(cfg: &SpringConfig) -> Self {
        Self {
            mass: cfg.mass as f32,
            tension: cfg.tension as f32,
            friction: cfg.friction as f32,
        }
    }
}

/// Damped second-order spring animating the blend factor toward a moving
/// target of exactly 0 (idle) or 1 (busy).
///
/// The value is intentionally not clamped to [0, 1]: the reference behavior
/// lets an underdamped spring overshoot, transiently extrapolating the morph
/// past either endpoint pose.
#[derive(Debug, Clone)]
pub struct MorphSpring {
    params: SpringParams,
    position: f32,
    velocity: f32,
    target: f32,
}

impl MorphSpring {
    /// Create a spring at rest on the given endpoint.
    pub fn new(params: SpringParams, busy: bool) -> Self {
        let target = if busy { 1.0 } else { 0.0 };
        Self {
            params,
            position: target,
            velocity: 0.0,
            target,
        }
    }

    /// Point the spring at a new endpoint.
    ///
    /// Position and velocity are preserved, so a flip that arrives before the
    /// previous transition settles continues from the current state.
    pub fn retarget(&mut self, busy: bool) {
        self.target = if busy { 1.0 } else { 0.0 };
    }

    /// Advance the spring by `dt` seconds and return the new blend value.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(SUBSTEP);
            let accel = (-self.params.tension * (self.position - self.target)
                - self.params.friction * self.velocity)
                / self.params.mass;
            self.velocity += accel * h;
            self.position += self.velocity * h;
            remaining -= h;
        }
        self.position
    }

    /// Current blend value.
    pub fn value(&self) -> f32 {
        self.position
    }

    /// Current target (exactly 0.0 or 1.0).
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Whether position and velocity are both within `eps` of rest at the
    /// target. Convergence is asymptotic; callers pick the tolerance.
    pub fn is_settled(&self, eps: f32) -> bool {
        (self.position - self.target).abs() < eps && self.velocity.abs() < eps
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: f32 = 1.0 / 60.0;

    fn reference_spring(busy: bool) -> MorphSpring {
        MorphSpring::new(SpringParams::default(), busy)
    }

    #[test]
    fn starts_at_rest_on_endpoint() {
        assert_eq!(reference_spring(false).value(), 0.0);
        assert_eq!(reference_spring(true).value(), 1.0);
    }

    #[test]
    fn converges_busy_to_idle_within_bounded_ticks() {
        let mut spring = reference_spring(true);
        spring.retarget(false);

        // Two simulated seconds at 60 Hz is far beyond the settling time of
        // the reference constants.
        let mut settled_at = None;
        for tick in 0..120 {
            spring.advance(TICK);
            if (spring.value() - 0.0).abs() < 0.01 && settled_at.is_none() {
                settled_at = Some(tick);
            }
        }
        let settled_at = settled_at.expect("spring never reached 0.01 of target");

        // ...and it stays converged for a sustained idle signal.
        for _ in 0..240 {
            spring.advance(TICK);
            assert!(
                (spring.value() - 0.0).abs() < 0.01,
                "spring diverged after settling at tick {settled_at}"
            );
        }
    }

    #[test]
    fn underdamped_reference_constants_overshoot_without_clamping() {
        // zeta = friction / (2 * sqrt(tension * mass)) ≈ 0.7, underdamped.
        let mut spring = reference_spring(false);
        spring.retarget(true);

        let mut peak = 0.0f32;
        for _ in 0..300 {
            peak = peak.max(spring.advance(TICK));
        }
        assert!(peak > 1.0, "expected overshoot past 1.0, peaked at {peak}");
        assert!(peak < 1.2, "overshoot implausibly large: {peak}");
    }

    #[test]
    fn rapid_double_flip_stays_continuous() {
        let mut spring = reference_spring(false);
        spring.retarget(true);

        // Per-tick change can never exceed what one tick of maximum spring
        // acceleration from rest allows; a discontinuity would show up as a
        // jump far above this envelope.
        let max_step = {
            let p = SpringParams::default();
            // |accel| <= (tension * 1 + friction * |v|) / mass; bound |v| by
            // the energy-conserving limit omega * amplitude.
            let omega = (p.tension / p.mass).sqrt();
            let v_max = omega * 1.0;
            (v_max + (p.tension / p.mass) * TICK) * TICK
        };

        let mut prev = spring.value();
        for tick in 0..120 {
            // Flip back mid-flight, well before settling.
            if tick == 10 {
                spring.retarget(false);
            }
            if tick == 20 {
                spring.retarget(true);
            }
            let cur = spring.advance(TICK);
            assert!(
                (cur - prev).abs() <= max_step,
                "tick {tick}: step {} exceeds bound {max_step}",
                (cur - prev).abs()
            );
            prev = cur;
        }
    }

    #[test]
    fn retarget_preserves_position_and_velocity() {
        let mut spring = reference_spring(false);
        spring.retarget(true);
        for _ in 0..10 {
            spring.advance(TICK);
        }
        let before = spring.value();
        spring.retarget(false);
        assert_eq!(spring.value(), before);
        // The very next tick continues smoothly from the old state; the
        // carried velocity bounds how far one tick can move.
        let after = spring.advance(TICK);
        assert!((after - before).abs() < 0.1);
    }

    #[test]
    fn oversized_dt_is_clamped() {
        let mut spring = reference_spring(false);
        spring.retarget(true);
        // A multi-minute suspend must not blow up the integrator: one giant
        // frame advances at most MAX_FRAME_DT of simulated time.
        let v = spring.advance(300.0);
        assert!(v.is_finite());
        assert!((0.0..=1.1).contains(&v));
        let mut control = reference_spring(false);
        control.retarget(true);
        let expected = control.advance(MAX_FRAME_DT);
        assert!((v - expected).abs() < 1e-4);
    }

    #[test]
    fn is_settled_tracks_target() {
        let mut spring = reference_spring(true);
        assert!(spring.is_settled(1e-3));
        spring.retarget(false);
        assert!(!spring.is_settled(1e-3));
        for _ in 0..600 {
            spring.advance(TICK);
        }
        assert!(spring.is_settled(1e-3));
    }

    #[test]
    fn params_from_config() {
        let cfg = SpringConfig::default();
        let params = SpringParams::from(&cfg);
        assert!((params.mass - 2.0).abs() < f32::EPSILON);
        assert!((params.tension - 170.0).abs() < f32::EPSILON);
        assert!((params.friction - 26.0).abs() < f32::EPSILON);
    }
}
