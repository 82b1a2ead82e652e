// Transition Descriptions
// How an animated value travels to a new target; interpreted by AnimatedValue

use std::time::Duration;

use crate::core::tab_bar_config::compiled;

/// Easing curve for timed transitions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0)
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "linear" => Some(Easing::Linear),
            "ease_in" | "ease-in" => Some(Easing::EaseIn),
            "ease_out" | "ease-out" => Some(Easing::EaseOut),
            "ease_in_out" | "ease-in-out" => Some(Easing::EaseInOut),
            _ => None,
        }
    }
}

/// Spring parameters in tension/friction form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub tension: f32,
    pub friction: f32,
}

impl SpringConfig {
    pub fn new(tension: f32, friction: f32) -> Self {
        Self { tension, friction }
    }

    /// Stiffness of the equivalent mass-spring system (origami mapping)
    pub fn stiffness(&self) -> f32 {
        (self.tension - 30.0) * 3.62 + 194.0
    }

    /// Damping of the equivalent mass-spring system (origami mapping)
    pub fn damping(&self) -> f32 {
        (self.friction - 8.0) * 3.0 + 25.0
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(compiled::SPRING_TENSION, compiled::SPRING_FRICTION)
    }
}

/// Description of how to move to a new value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Physically simulated spring
    Spring(SpringConfig),
    /// Fixed-duration interpolation
    Timing { duration: Duration, easing: Easing },
    /// Jump straight to the target
    Instant,
}

impl Transition {
    /// Default indicator motion
    pub fn spring() -> Self {
        Transition::Spring(SpringConfig::default())
    }

    /// Default scroll motion
    pub fn scroll() -> Self {
        Transition::Timing {
            duration: Duration::from_millis(compiled::SCROLL_DURATION_MS),
            easing: Easing::EaseOut,
        }
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::spring()
    }
}
