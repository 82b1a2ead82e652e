// Application State
// Demo host: owns the tab list and selection, and drives the tab bar machine and adapter

use std::time::Duration;

use log::{debug, info};
use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{AppEvent, Command, Outcome, Phase, TabBarConfig, TabBarEvent, TabBarMachine, TabBarProps, TabItem};
use crate::ui::{RenderAdapter, TabBarView};

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Window title
    pub title: String,

    /// Key bindings shown in the status bar
    pub bindings: Vec<(String, String)>,

    /// Status bar text
    pub status_text: String,

    /// Host-owned tab list
    items: Vec<TabItem>,

    /// Host-owned selection
    selected_index: isize,

    /// Host-owned display options
    config: TabBarConfig,

    machine: TabBarMachine,
    adapter: RenderAdapter,

    /// Where the bar was last laid out
    bar_area: Rect,

    /// Counter for naming added tabs
    added_tabs: usize,

    /// Whether the application should quit
    pub should_quit: bool,
}

impl App {
    /// Create a new application instance from loaded configuration
    pub fn new(app_config: &AppConfig, props: TabBarProps) -> Self {
        let mut app = Self::with_props(&app_config.application.title, props);
        app.bindings = app_config
            .application
            .bindings
            .iter()
            .map(|b| (b.key.clone(), b.description.clone()))
            .collect();
        app.status_text = app_config.application.status_bar.default_text.clone();
        app
    }

    /// Create an application around a tab list and mount the tab bar
    pub fn with_props(title: &str, props: TabBarProps) -> Self {
        let mut app = Self {
            title: title.to_string(),
            bindings: Vec::new(),
            status_text: String::new(),
            items: props.items,
            selected_index: props.selected_index,
            config: props.config,
            machine: TabBarMachine::new(),
            adapter: RenderAdapter::new(),
            bar_area: Rect::default(),
            added_tabs: 0,
            should_quit: false,
        };

        // Mount: hand the initial props to the tab bar
        app.sync();
        app
    }

    pub fn items(&self) -> &[TabItem] {
        &self.items
    }

    pub fn config(&self) -> &TabBarConfig {
        &self.config
    }

    pub fn machine(&self) -> &TabBarMachine {
        &self.machine
    }

    pub fn adapter(&self) -> &RenderAdapter {
        &self.adapter
    }

    /// Index the bar currently shows as selected
    pub fn selected(&self) -> usize {
        self.machine.state().selected_index()
    }

    /// Rows the tab bar needs, shadow included
    pub fn bar_height(&self) -> u16 {
        self.view().height()
    }

    fn props(&self) -> TabBarProps {
        TabBarProps::new(self.items.clone(), self.selected_index, self.config.clone())
    }

    fn dispatch(&mut self, event: TabBarEvent) -> Outcome {
        let (outcome, commands) = self.machine.dispatch(event);
        self.execute(commands);
        outcome
    }

    fn execute(&mut self, commands: Vec<Command>) {
        if !commands.is_empty() {
            debug!("Executing {:?}", commands);
        }
        self.adapter.execute(commands, self.machine.state());
    }

    /// Hand the current props to the tab bar
    fn sync(&mut self) -> Outcome {
        let props = self.props();
        self.dispatch(TabBarEvent::Update(props))
    }

    /// Tab tapped: the host accepts the new selection
    pub fn on_change(&mut self, index: usize) {
        info!("Tab {} selected", index);
        self.selected_index = index as isize;
        self.sync();
    }

    /// Report the bar's area for this frame
    pub fn layout(&mut self, bar_area: Rect) {
        self.bar_area = bar_area;
        if let Some(event) = self.adapter.layout(bar_area) {
            self.dispatch(event);
        }
    }

    /// Advance animations by `dt` and feed settle events back
    pub fn tick(&mut self, dt: Duration) {
        for event in self.adapter.tick(dt) {
            self.dispatch(event);
        }
    }

    /// Whether the next frame differs from the last one without new input
    pub fn is_animating(&self) -> bool {
        self.adapter.is_animating() || self.machine.state().phase() == Phase::Unmeasured
    }

    /// Current frame of the tab bar
    pub fn view(&self) -> TabBarView<'_> {
        let state = self.machine.state();
        TabBarView::new(&self.items, &self.config)
            .selected(state.selected_index())
            .tab_width(state.tab_width().unwrap_or(0.0))
            .offsets(self.adapter.indicator_offset(), self.adapter.scroll_offset())
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Quit => self.quit(),
            AppEvent::PreviousTab => {
                let current = self.selected();
                if current > 0 {
                    self.on_change(current - 1);
                }
            }
            AppEvent::NextTab => {
                let next = self.selected() + 1;
                if next < self.items.len() {
                    self.on_change(next);
                }
            }
            AppEvent::SelectTab(index) => {
                if index < self.items.len() {
                    self.on_change(index);
                }
            }
            AppEvent::AddTab => self.add_tab(),
            AppEvent::RemoveTab => self.remove_tab(),
            AppEvent::ToggleScrollable => {
                self.config.scrollable = !self.config.scrollable;
                self.status_text = format!("Scrollable: {}", self.config.scrollable);
                self.sync();
            }
            AppEvent::ToggleUppercase => {
                self.config.uppercase = !self.config.uppercase;
                self.sync();
            }
            AppEvent::ToggleReducedMotion => {
                let enabled = !self.adapter.reduced_motion();
                self.adapter.set_reduced_motion(enabled);
                self.status_text = format!("Reduced motion: {}", enabled);
            }
            AppEvent::Tap { column, row } => self.tap(column, row),
            AppEvent::Resize | AppEvent::None => {}
        }
    }

    fn tap(&mut self, column: u16, row: u16) {
        let mut tapped = None;
        let view = self.view();
        self.adapter.tap(&view, self.bar_area, column, row, |idx| tapped = Some(idx));

        if let Some(idx) = tapped {
            self.on_change(idx);
        }
    }

    fn add_tab(&mut self) {
        self.added_tabs += 1;
        self.items.push(TabItem::label(format!("Tab {}", self.added_tabs)));
        self.status_text = format!("{} tabs", self.items.len());
        self.sync();
    }

    /// Remove the last tab
    ///
    /// The list shrinks before the selection is fixed up, the way a racing
    /// host would; the bar rejects the stale update and accepts the next.
    fn remove_tab(&mut self) {
        if self.items.len() <= 1 {
            return;
        }
        self.items.pop();
        self.status_text = format!("{} tabs", self.items.len());

        if let Outcome::Rejected(err) = self.sync() {
            debug!("Update rejected ({}), moving selection into range", err);
            self.selected_index = self.items.len() as isize - 1;
            self.sync();
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
