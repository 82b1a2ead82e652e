// UI module
// Tab bar widget, its styles, the command adapter and the demo view

pub mod adapter;
pub mod app_view;
pub mod styles;
pub mod tab_bar;

pub use adapter::RenderAdapter;
pub use app_view::render_app;
pub use styles::Styles;
pub use tab_bar::{TabBarView, TapTarget};
