// Tab Bar State Machine
// Explicit reducer over layout, prop-update and animation-settle events

use log::{debug, trace, warn};

use super::errors::TabsError;
use super::geometry::{compute_targets, resolve_tab_width, Targets, TrackMetrics};
use super::items::TabItem;
use super::tab_bar_config::TabBarConfig;
use crate::animation::Transition;

/// Lifecycle phase of a tab bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No usable track width yet
    #[default]
    Unmeasured,
    /// Width known, nothing in flight
    Measured,
    /// Indicator and/or scroll transition in flight
    Animating,
}

/// Everything the host hands the tab bar on an update
#[derive(Debug, Clone, PartialEq)]
pub struct TabBarProps {
    pub items: Vec<TabItem>,
    /// Signed so an out-of-range value from a racing host can be rejected
    pub selected_index: isize,
    pub config: TabBarConfig,
}

impl TabBarProps {
    pub fn new(items: Vec<TabItem>, selected_index: isize, config: TabBarConfig) -> Self {
        Self {
            items,
            selected_index,
            config,
        }
    }

    /// The selected index if it points at an item
    pub fn valid_selection(&self) -> Result<usize, TabsError> {
        let count = self.items.len();
        usize::try_from(self.selected_index)
            .ok()
            .filter(|&idx| idx < count)
            .ok_or(TabsError::SelectionOutOfRange {
                index: self.selected_index,
                count,
            })
    }
}

/// Input to the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum TabBarEvent {
    /// The track finished a layout pass
    Layout { width: f32 },
    /// The host supplied new props
    Update(TabBarProps),
    /// The indicator reached its target
    IndicatorSettled,
    /// The track reached its scroll offset
    ScrollSettled,
}

/// Side effect for the rendering adapter to carry out
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Measure the track and report back with [`TabBarEvent::Layout`]
    Measure,
    /// Move the indicator to `to`
    AnimateIndicator { to: f32, transition: Transition },
    /// Scroll the track so `x` is its left edge
    ScrollTo { x: f32, transition: Transition },
}

/// What the reducer did with an event
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied,
    /// Event had no effect in the current phase
    Ignored,
    /// Event was dropped; the state is unchanged
    Rejected(TabsError),
}

/// Result of one reducer step
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    pub state: TabBarState,
    pub commands: Vec<Command>,
    pub outcome: Outcome,
}

/// Transitions still running after the last command pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct InFlight {
    indicator: bool,
    scroll: bool,
}

/// Tab bar state between events
#[derive(Debug, Clone, PartialEq)]
pub struct TabBarState {
    phase: Phase,
    metrics: Option<TrackMetrics>,
    item_count: usize,
    selected_index: usize,
    scrollable: bool,
    targets: Targets,
    in_flight: InFlight,
    indicator_transition: Transition,
    scroll_transition: Transition,
}

impl Default for TabBarState {
    fn default() -> Self {
        let config = TabBarConfig::default();
        Self {
            phase: Phase::Unmeasured,
            metrics: None,
            item_count: 0,
            selected_index: 0,
            scrollable: config.scrollable,
            targets: Targets::default(),
            in_flight: InFlight::default(),
            indicator_transition: config.indicator_transition,
            scroll_transition: config.scroll_transition,
        }
    }
}

impl TabBarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Track and tab width, once measured
    pub fn metrics(&self) -> Option<TrackMetrics> {
        self.metrics
    }

    pub fn tab_width(&self) -> Option<f32> {
        self.metrics.map(|m| m.tab_width)
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn scrollable(&self) -> bool {
        self.scrollable
    }

    /// Where the indicator and scroll were last sent
    pub fn targets(&self) -> Targets {
        self.targets
    }

    /// Apply one event, returning the next state and the commands it requires
    pub fn reduce(&self, event: TabBarEvent) -> Reduction {
        match event {
            TabBarEvent::Layout { width } => self.on_layout(width),
            TabBarEvent::Update(props) => self.on_update(props),
            TabBarEvent::IndicatorSettled => self.on_settled(|f| f.indicator = false),
            TabBarEvent::ScrollSettled => self.on_settled(|f| f.scroll = false),
        }
    }

    fn unchanged(&self, outcome: Outcome) -> Reduction {
        Reduction {
            state: self.clone(),
            commands: Vec::new(),
            outcome,
        }
    }

    fn on_layout(&self, width: f32) -> Reduction {
        let metrics = match resolve_tab_width(width, self.item_count, self.scrollable) {
            Ok(metrics) => metrics,
            Err(err) => {
                warn!("Ignoring layout of width {}: {}", width, err);
                return self.unchanged(Outcome::Rejected(err));
            }
        };

        let mut next = self.clone();
        next.metrics = Some(metrics);
        if next.phase == Phase::Unmeasured {
            next.phase = Phase::Measured;
        }
        debug!(
            "Measured track {:.1} wide, tab width {:.1} ({} items, scrollable: {})",
            metrics.track_width, metrics.tab_width, next.item_count, next.scrollable
        );

        // A fresh measurement re-enters the geometry calculation, but only
        // issues commands when it moved the targets
        let mut commands = Vec::new();
        if next.item_count > 0 {
            let targets = compute_targets(next.selected_index, next.item_count, next.scrollable, metrics);
            if targets != self.targets {
                commands = next.retarget(targets);
            }
        }

        Reduction {
            state: next,
            commands,
            outcome: Outcome::Applied,
        }
    }

    fn on_update(&self, props: TabBarProps) -> Reduction {
        let selected_index = match props.valid_selection() {
            Ok(idx) => idx,
            Err(err) => {
                debug!("Rejecting tab bar update: {}", err);
                return self.unchanged(Outcome::Rejected(err));
            }
        };

        let item_count = props.items.len();
        let count_changed = item_count != self.item_count;
        let mode_changed = props.config.scrollable != self.scrollable;

        let mut next = self.clone();
        next.item_count = item_count;
        next.selected_index = selected_index;
        next.scrollable = props.config.scrollable;
        next.indicator_transition = props.config.indicator_transition;
        next.scroll_transition = props.config.scroll_transition;

        // Tab width depends on the count in fixed mode; drop the old width
        // and ask for a fresh measurement
        if count_changed {
            debug!("Item count changed {} -> {}, re-measuring", self.item_count, item_count);
            next.phase = Phase::Unmeasured;
            next.metrics = None;
            next.in_flight = InFlight::default();
            return Reduction {
                state: next,
                commands: vec![Command::Measure],
                outcome: Outcome::Applied,
            };
        }

        // Same width, different mode: resolve again from the known track width
        if mode_changed {
            if let Some(metrics) = self.metrics {
                match resolve_tab_width(metrics.track_width, item_count, next.scrollable) {
                    Ok(metrics) => next.metrics = Some(metrics),
                    Err(err) => return self.unchanged(Outcome::Rejected(err)),
                }
            }
        }

        let commands = match next.metrics {
            Some(metrics) => {
                let targets = compute_targets(selected_index, item_count, next.scrollable, metrics);
                next.retarget(targets)
            }
            None => Vec::new(),
        };

        Reduction {
            state: next,
            commands,
            outcome: Outcome::Applied,
        }
    }

    fn on_settled(&self, clear: impl FnOnce(&mut InFlight)) -> Reduction {
        if self.phase != Phase::Animating {
            return self.unchanged(Outcome::Ignored);
        }

        let mut next = self.clone();
        clear(&mut next.in_flight);
        if next.in_flight == InFlight::default() {
            trace!("Tab bar transitions settled");
            next.phase = Phase::Measured;
        }

        Reduction {
            state: next,
            commands: Vec::new(),
            outcome: Outcome::Applied,
        }
    }

    /// Point the indicator and the scroll at `targets`; redirects anything in flight
    fn retarget(&mut self, targets: Targets) -> Vec<Command> {
        self.targets = targets;
        self.phase = Phase::Animating;
        self.in_flight = InFlight {
            indicator: true,
            scroll: true,
        };

        vec![
            Command::AnimateIndicator {
                to: targets.indicator_offset,
                transition: self.indicator_transition,
            },
            Command::ScrollTo {
                x: targets.scroll_offset,
                transition: self.scroll_transition,
            },
        ]
    }
}

// ┌────────────────────────────────────────────────────────────────────────────────────────────────┐
// │                                 Tab Bar Machine - Owning Wrapper                               │
// └────────────────────────────────────────────────────────────────────────────────────────────────┘

/// Owns a [`TabBarState`] and folds events into it
#[derive(Debug, Clone, Default)]
pub struct TabBarMachine {
    state: TabBarState,
}

impl TabBarMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TabBarState {
        &self.state
    }

    /// Apply an event and return the commands to execute
    pub fn dispatch(&mut self, event: TabBarEvent) -> (Outcome, Vec<Command>) {
        let Reduction { state, commands, outcome } = self.state.reduce(event);
        if state.phase != self.state.phase {
            trace!("Tab bar phase {:?} -> {:?}", self.state.phase, state.phase);
        }
        self.state = state;
        (outcome, commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(count: usize) -> Vec<TabItem> {
        (0..count).map(|i| TabItem::label(format!("Tab {i}"))).collect()
    }

    fn props(count: usize, selected: isize, scrollable: bool) -> TabBarProps {
        TabBarProps::new(labels(count), selected, TabBarConfig::default().scrollable(scrollable))
    }

    fn indicator_target(commands: &[Command]) -> Option<f32> {
        commands.iter().find_map(|c| match c {
            Command::AnimateIndicator { to, .. } => Some(*to),
            _ => None,
        })
    }

    fn scroll_target(commands: &[Command]) -> Option<f32> {
        commands.iter().find_map(|c| match c {
            Command::ScrollTo { x, .. } => Some(*x),
            _ => None,
        })
    }

    /// Mount with `count` items and measure `width`
    fn mounted(count: usize, selected: isize, scrollable: bool, width: f32) -> TabBarMachine {
        let mut machine = TabBarMachine::new();
        let (_, commands) = machine.dispatch(TabBarEvent::Update(props(count, selected, scrollable)));
        assert_eq!(commands, vec![Command::Measure]);
        machine.dispatch(TabBarEvent::Layout { width });
        machine
    }

    #[test]
    fn test_initial_state_is_unmeasured() {
        let state = TabBarState::new();
        assert_eq!(state.phase(), Phase::Unmeasured);
        assert_eq!(state.metrics(), None);
    }

    #[test]
    fn test_mount_requests_measurement() {
        let mut machine = TabBarMachine::new();
        let (outcome, commands) = machine.dispatch(TabBarEvent::Update(props(3, 0, false)));
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(commands, vec![Command::Measure]);
        assert_eq!(machine.state().phase(), Phase::Unmeasured);
    }

    #[test]
    fn test_layout_measures_without_animating_first_tab() {
        let mut machine = TabBarMachine::new();
        machine.dispatch(TabBarEvent::Update(props(3, 0, false)));
        let (outcome, commands) = machine.dispatch(TabBarEvent::Layout { width: 300.0 });

        assert_eq!(outcome, Outcome::Applied);
        assert!(commands.is_empty());
        assert_eq!(machine.state().phase(), Phase::Measured);
        assert_eq!(machine.state().tab_width(), Some(100.0));
    }

    #[test]
    fn test_layout_moves_indicator_to_preselected_tab() {
        let mut machine = TabBarMachine::new();
        machine.dispatch(TabBarEvent::Update(props(3, 2, false)));
        let (_, commands) = machine.dispatch(TabBarEvent::Layout { width: 300.0 });

        assert_eq!(indicator_target(&commands), Some(200.0));
        assert_eq!(scroll_target(&commands), Some(0.0));
        assert_eq!(machine.state().phase(), Phase::Animating);
    }

    #[test]
    fn test_selection_issues_indicator_and_scroll_together() {
        let mut machine = mounted(4, 0, false, 400.0);
        let (_, commands) = machine.dispatch(TabBarEvent::Update(props(4, 3, false)));

        assert_eq!(commands.len(), 2);
        assert_eq!(indicator_target(&commands), Some(300.0));
        assert_eq!(scroll_target(&commands), Some(0.0));
        assert_eq!(machine.state().phase(), Phase::Animating);
    }

    #[test]
    fn test_settles_after_both_transitions() {
        let mut machine = mounted(4, 0, false, 400.0);
        machine.dispatch(TabBarEvent::Update(props(4, 1, false)));

        machine.dispatch(TabBarEvent::IndicatorSettled);
        assert_eq!(machine.state().phase(), Phase::Animating);
        machine.dispatch(TabBarEvent::ScrollSettled);
        assert_eq!(machine.state().phase(), Phase::Measured);
    }

    #[test]
    fn test_settle_outside_animation_is_ignored() {
        let mut machine = mounted(4, 0, false, 400.0);
        let (outcome, commands) = machine.dispatch(TabBarEvent::ScrollSettled);
        assert_eq!(outcome, Outcome::Ignored);
        assert!(commands.is_empty());
    }

    #[test]
    fn test_new_selection_redirects_in_flight_animation() {
        let mut machine = mounted(5, 0, false, 500.0);
        machine.dispatch(TabBarEvent::Update(props(5, 1, false)));
        machine.dispatch(TabBarEvent::IndicatorSettled);

        let (_, commands) = machine.dispatch(TabBarEvent::Update(props(5, 4, false)));
        assert_eq!(indicator_target(&commands), Some(400.0));

        // The earlier scroll settling must not end the new animation
        machine.dispatch(TabBarEvent::ScrollSettled);
        assert_eq!(machine.state().phase(), Phase::Animating);
        machine.dispatch(TabBarEvent::IndicatorSettled);
        assert_eq!(machine.state().phase(), Phase::Measured);
    }

    #[test]
    fn test_out_of_range_selection_is_rejected() {
        let mut machine = mounted(3, 1, false, 300.0);
        let before = machine.state().clone();

        for selected in [3, -1] {
            let (outcome, commands) = machine.dispatch(TabBarEvent::Update(props(3, selected, false)));
            assert!(matches!(outcome, Outcome::Rejected(TabsError::SelectionOutOfRange { .. })));
            assert!(commands.is_empty());
            assert_eq!(machine.state(), &before);
        }
    }

    #[test]
    fn test_shrunk_list_with_stale_index_is_rejected() {
        let mut machine = mounted(5, 4, false, 500.0);
        let before = machine.state().clone();

        let (outcome, commands) = machine.dispatch(TabBarEvent::Update(props(3, 4, false)));
        assert_eq!(outcome, Outcome::Rejected(TabsError::SelectionOutOfRange { index: 4, count: 3 }));
        assert!(commands.is_empty());
        assert_eq!(machine.state(), &before);
    }

    #[test]
    fn test_count_change_remeasures_and_repositions() {
        let mut machine = mounted(3, 2, false, 300.0);
        assert_eq!(machine.state().tab_width(), Some(100.0));
        assert_eq!(machine.state().targets().indicator_offset, 200.0);

        let (_, commands) = machine.dispatch(TabBarEvent::Update(props(5, 2, false)));
        assert_eq!(commands, vec![Command::Measure]);
        assert_eq!(machine.state().phase(), Phase::Unmeasured);
        assert_eq!(machine.state().metrics(), None);

        let (_, commands) = machine.dispatch(TabBarEvent::Layout { width: 300.0 });
        assert_eq!(machine.state().tab_width(), Some(60.0));
        assert_eq!(indicator_target(&commands), Some(120.0));
    }

    #[test]
    fn test_mode_switch_resolves_from_known_width() {
        let mut machine = mounted(5, 0, false, 1000.0);
        let (_, commands) = machine.dispatch(TabBarEvent::Update(props(5, 3, true)));

        assert_eq!(machine.state().tab_width(), Some(400.0));
        let indicator = indicator_target(&commands).unwrap();
        let scroll = scroll_target(&commands).unwrap();
        assert!((indicator - 1200.0).abs() < 1e-3);
        assert!((scroll - 900.0).abs() < 1e-3);
    }

    #[test]
    fn test_scrollable_two_items_second_tab() {
        let mut machine = mounted(2, 0, true, 1000.0);
        let (_, commands) = machine.dispatch(TabBarEvent::Update(props(2, 1, true)));
        let scroll = scroll_target(&commands).unwrap();
        assert!((scroll - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_update_before_measurement_waits_for_layout() {
        let mut machine = TabBarMachine::new();
        machine.dispatch(TabBarEvent::Update(props(3, 0, false)));
        let (outcome, commands) = machine.dispatch(TabBarEvent::Update(props(3, 1, false)));

        assert_eq!(outcome, Outcome::Applied);
        assert!(commands.is_empty());
        assert_eq!(machine.state().selected_index(), 1);
    }

    #[test]
    fn test_empty_list_layout_is_rejected() {
        let state = TabBarState::new();
        let reduction = state.reduce(TabBarEvent::Layout { width: 120.0 });
        assert_eq!(reduction.outcome, Outcome::Rejected(TabsError::EmptyItems));
        assert_eq!(reduction.state, state);
        assert!(reduction.commands.is_empty());
    }

    #[test]
    fn test_reduce_leaves_previous_state_untouched() {
        let machine = mounted(3, 0, false, 300.0);
        let before = machine.state().clone();
        let reduction = before.reduce(TabBarEvent::Update(props(3, 2, false)));

        assert_eq!(before.selected_index(), 0);
        assert_eq!(reduction.state.selected_index(), 2);
    }
}
