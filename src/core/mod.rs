// Core infrastructure module
// Tab geometry, the widget state machine and the types they share

pub mod errors;
pub mod events;
pub mod geometry;
pub mod items;
pub mod state;
pub mod tab_bar_config;

pub use errors::TabsError;
pub use events::{AppEvent, EventHandler};
pub use geometry::{compute_targets, resolve_tab_width, Targets, TrackMetrics};
pub use items::TabItem;
pub use state::{Command, Outcome, Phase, Reduction, TabBarEvent, TabBarMachine, TabBarProps, TabBarState};
pub use tab_bar_config::{PersistTaps, TabBarConfig};
