// Render Adapter
// Carries out state machine commands against the terminal: measurement, indicator and scroll motion

use std::time::Duration;

use log::trace;
use ratatui::layout::Rect;

use super::tab_bar::{TabBarView, TapTarget};
use crate::animation::{AnimatedValue, Transition};
use crate::core::geometry::content_width;
use crate::core::{Command, PersistTaps, TabBarEvent, TabBarState};

/// Executes [`Command`]s and reports measurements and settle events back
#[derive(Debug, Clone, Default)]
pub struct RenderAdapter {
    indicator: AnimatedValue,
    scroll: AnimatedValue,
    /// Width reported by the last layout pass
    measured_width: Option<u16>,
    measure_requested: bool,
    /// Settle events produced outside of `tick`, e.g. by instant transitions
    settled: Vec<TabBarEvent>,
    reduced_motion: bool,
}

impl RenderAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current animated indicator offset
    pub fn indicator_offset(&self) -> f32 {
        self.indicator.value()
    }

    /// Current animated scroll offset
    pub fn scroll_offset(&self) -> f32 {
        self.scroll.value()
    }

    pub fn is_animating(&self) -> bool {
        !self.indicator.is_settled() || !self.scroll.is_settled()
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Snap every transition instead of animating it
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
    }

    fn effective(&self, transition: Transition) -> Transition {
        if self.reduced_motion {
            Transition::Instant
        } else {
            transition
        }
    }

    /// Carry out commands emitted for `state`
    pub fn execute(&mut self, commands: Vec<Command>, state: &TabBarState) {
        for command in commands {
            match command {
                Command::Measure => {
                    self.measure_requested = true;
                }
                Command::AnimateIndicator { to, transition } => {
                    self.indicator.animate_to(to, self.effective(transition));
                    if self.indicator.is_settled() {
                        self.settled.push(TabBarEvent::IndicatorSettled);
                    }
                }
                Command::ScrollTo { x, transition } => {
                    let x = Self::clamp_scroll(x, state);
                    self.scroll.animate_to(x, self.effective(transition));
                    if self.scroll.is_settled() {
                        self.settled.push(TabBarEvent::ScrollSettled);
                    }
                }
            }
        }
    }

    /// Keep the track from scrolling past its content
    fn clamp_scroll(x: f32, state: &TabBarState) -> f32 {
        match state.metrics() {
            Some(metrics) => {
                let max = (content_width(state.item_count(), metrics) - metrics.track_width).max(0.0);
                x.clamp(0.0, max)
            }
            None => x.max(0.0),
        }
    }

    /// Report the bar's area after a layout pass
    ///
    /// Returns a layout event when a measurement was requested or the width changed.
    pub fn layout(&mut self, area: Rect) -> Option<TabBarEvent> {
        let changed = self.measured_width != Some(area.width);
        if !changed && !self.measure_requested {
            return None;
        }

        self.measure_requested = false;
        self.measured_width = Some(area.width);
        Some(TabBarEvent::Layout {
            width: f32::from(area.width),
        })
    }

    /// Advance both transitions; returns the settle events to feed back
    pub fn tick(&mut self, dt: Duration) -> Vec<TabBarEvent> {
        let mut events = std::mem::take(&mut self.settled);
        if self.indicator.tick(dt) {
            trace!("Indicator settled at {:.2}", self.indicator.value());
            events.push(TabBarEvent::IndicatorSettled);
        }
        if self.scroll.tick(dt) {
            trace!("Track scroll settled at {:.2}", self.scroll.value());
            events.push(TabBarEvent::ScrollSettled);
        }
        events
    }

    /// Resolve a tap and invoke `on_change` for a tab hit
    ///
    /// Returns whether the tap was consumed by the bar.
    pub fn tap(
        &self,
        view: &TabBarView<'_>,
        area: Rect,
        column: u16,
        row: u16,
        mut on_change: impl FnMut(usize),
    ) -> bool {
        match view.tab_at(area, column, row) {
            TapTarget::Tab(idx) => {
                on_change(idx);
                true
            }
            TapTarget::Track => view.config.keyboard_should_persist_taps == PersistTaps::Always,
            TapTarget::Outside => false,
        }
    }
}
