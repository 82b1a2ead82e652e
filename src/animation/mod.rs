// Animation module
// Transition descriptions and the animated values that interpret them

pub mod transition;
pub mod value;

pub use transition::{Easing, SpringConfig, Transition};
pub use value::AnimatedValue;
