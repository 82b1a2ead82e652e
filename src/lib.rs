// Material Tabs Library
// A Material-style tab bar widget for ratatui: sliding indicator, fixed or scrollable tabs

// Core infrastructure - geometry, state machine and shared types
pub mod core;

// Animation - transition descriptions and animated values
pub mod animation;

// UI - widget rendering and the command adapter
pub mod ui;

// Configuration loading and validation
pub mod config;
pub mod config_validation;

// Demo host application state
pub mod app;

// Re-export commonly used items for convenience
pub use app::App;
pub use core::{
    Command, Phase, TabBarConfig, TabBarEvent, TabBarMachine, TabBarProps, TabBarState, TabItem, TabsError,
};
pub use ui::{RenderAdapter, TabBarView};
