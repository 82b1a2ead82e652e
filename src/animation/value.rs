// Animated Value
// A single scalar that moves toward its target according to a Transition

use std::time::Duration;

use super::transition::{Easing, Transition};

/// Integration step for spring motion, in seconds
const SPRING_STEP: f64 = 0.001;

/// Displacement below which a spring counts as resting
const REST_DISPLACEMENT: f64 = 0.001;

/// Speed below which a spring counts as resting
const REST_SPEED: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    Idle,
    Spring { stiffness: f64, damping: f64 },
    Timing { from: f64, elapsed: Duration, duration: Duration, easing: Easing },
}

/// An animated scalar
///
/// Retargeting mid-flight keeps the current value and velocity, so a new
/// selection redirects the motion instead of restarting it. Motion is
/// integrated in f64 so large offsets still come to rest.
#[derive(Debug, Clone)]
pub struct AnimatedValue {
    value: f64,
    velocity: f64,
    target: f64,
    motion: Motion,
    /// Leftover time shorter than one spring step
    carry: f64,
}

impl AnimatedValue {
    pub fn new(value: f32) -> Self {
        Self {
            value: f64::from(value),
            velocity: 0.0,
            target: f64::from(value),
            motion: Motion::Idle,
            carry: 0.0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value as f32
    }

    pub fn target(&self) -> f32 {
        self.target as f32
    }

    pub fn is_settled(&self) -> bool {
        self.motion == Motion::Idle
    }

    /// Start moving toward `target`
    pub fn animate_to(&mut self, target: f32, transition: Transition) {
        self.target = f64::from(target);
        self.carry = 0.0;
        self.motion = match transition {
            Transition::Spring(spring) => Motion::Spring {
                stiffness: f64::from(spring.stiffness()),
                damping: f64::from(spring.damping()),
            },
            Transition::Timing { duration, easing } if !duration.is_zero() => Motion::Timing {
                from: self.value,
                elapsed: Duration::ZERO,
                duration,
                easing,
            },
            Transition::Timing { .. } | Transition::Instant => {
                self.snap_to(target);
                Motion::Idle
            }
        };
    }

    /// Jump to `target` and stop
    pub fn snap_to(&mut self, target: f32) {
        self.value = f64::from(target);
        self.target = f64::from(target);
        self.velocity = 0.0;
        self.carry = 0.0;
        self.motion = Motion::Idle;
    }

    /// Advance by `dt`; returns true when the value came to rest during this tick
    pub fn tick(&mut self, dt: Duration) -> bool {
        match self.motion {
            Motion::Idle => false,
            Motion::Spring { stiffness, damping } => self.step_spring(dt, stiffness, damping),
            Motion::Timing { from, elapsed, duration, easing } => {
                let elapsed = elapsed + dt;
                if elapsed >= duration {
                    self.settle();
                    return true;
                }

                let previous = self.value;
                let progress = elapsed.as_secs_f32() / duration.as_secs_f32();
                self.value = from + (self.target - from) * f64::from(easing.apply(progress));
                if dt.as_secs_f64() > 0.0 {
                    self.velocity = (self.value - previous) / dt.as_secs_f64();
                }
                self.motion = Motion::Timing { from, elapsed, duration, easing };
                false
            }
        }
    }

    /// Stop exactly on the target
    fn settle(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
        self.carry = 0.0;
        self.motion = Motion::Idle;
    }

    fn step_spring(&mut self, dt: Duration, stiffness: f64, damping: f64) -> bool {
        self.carry += dt.as_secs_f64();

        while self.carry >= SPRING_STEP {
            self.carry -= SPRING_STEP;

            let previous = self.value;
            let displacement = self.value - self.target;
            let acceleration = -stiffness * displacement - damping * self.velocity;
            self.velocity += acceleration * SPRING_STEP;
            self.value += self.velocity * SPRING_STEP;

            let resting = (self.value - self.target).abs() < REST_DISPLACEMENT && self.velocity.abs() < REST_SPEED;
            // A step too small to move the value can never reach the thresholds
            let stalled = self.value == previous && self.value != self.target;
            if resting || stalled {
                self.settle();
                return true;
            }
        }

        false
    }
}

impl Default for AnimatedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::SpringConfig;

    /// Tick in 16ms frames until settled; returns elapsed frames
    fn run_until_settled(value: &mut AnimatedValue, max_frames: usize) -> Option<usize> {
        for frame in 1..=max_frames {
            if value.tick(Duration::from_millis(16)) {
                return Some(frame);
            }
        }
        None
    }

    #[test]
    fn test_spring_reaches_target() {
        let mut value = AnimatedValue::new(0.0);
        value.animate_to(120.0, Transition::Spring(SpringConfig::new(300.0, 20.0)));
        assert!(!value.is_settled());

        let frames = run_until_settled(&mut value, 200).expect("spring should settle");
        assert!(frames > 1);
        assert_eq!(value.value(), 120.0);
        assert!(value.is_settled());
    }

    #[test]
    fn test_spring_settles_at_large_offsets() {
        for target in [800.0, 1600.0, 8000.0, 50000.0] {
            let mut value = AnimatedValue::new(0.0);
            value.animate_to(target, Transition::Spring(SpringConfig::new(300.0, 20.0)));

            let frames = run_until_settled(&mut value, 500);
            assert!(frames.is_some(), "spring to {target} never settled");
            assert_eq!(value.value(), target);
            assert!(value.is_settled());
        }
    }

    #[test]
    fn test_spring_settles_between_large_offsets() {
        let mut value = AnimatedValue::new(1200.0);
        value.animate_to(1600.0, Transition::Spring(SpringConfig::new(300.0, 20.0)));
        run_until_settled(&mut value, 500).expect("spring should settle");
        assert_eq!(value.value(), 1600.0);
    }

    #[test]
    fn test_spring_moves_toward_target() {
        let mut value = AnimatedValue::new(0.0);
        value.animate_to(50.0, Transition::Spring(SpringConfig::new(300.0, 20.0)));
        value.tick(Duration::from_millis(16));
        assert!(value.value() > 0.0);
        assert!(value.value() < 50.0);
    }

    #[test]
    fn test_timing_finishes_on_duration() {
        let mut value = AnimatedValue::new(10.0);
        value.animate_to(
            20.0,
            Transition::Timing {
                duration: Duration::from_millis(100),
                easing: Easing::Linear,
            },
        );

        assert!(!value.tick(Duration::from_millis(50)));
        assert!((value.value() - 15.0).abs() < 1e-3);
        assert!(value.tick(Duration::from_millis(50)));
        assert_eq!(value.value(), 20.0);
    }

    #[test]
    fn test_instant_snaps() {
        let mut value = AnimatedValue::new(0.0);
        value.animate_to(42.0, Transition::Instant);
        assert!(value.is_settled());
        assert_eq!(value.value(), 42.0);
        assert!(!value.tick(Duration::from_millis(16)));
    }

    #[test]
    fn test_retarget_keeps_position() {
        let mut value = AnimatedValue::new(0.0);
        value.animate_to(100.0, Transition::Spring(SpringConfig::new(300.0, 20.0)));
        value.tick(Duration::from_millis(32));
        let midway = value.value();

        value.animate_to(-100.0, Transition::Spring(SpringConfig::new(300.0, 20.0)));
        assert_eq!(value.value(), midway);
        assert_eq!(value.target(), -100.0);

        run_until_settled(&mut value, 300).expect("spring should settle");
        assert_eq!(value.value(), -100.0);
    }
}
