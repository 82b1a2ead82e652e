// Tab Geometry
// Tab width resolution and indicator/scroll target calculation

use super::errors::TabsError;

/// Share of the track width each tab takes in scrollable mode
pub const SCROLLABLE_TAB_FRACTION: f32 = 0.4;

/// Widths resolved from one layout measurement
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackMetrics {
    /// Measured width of the track
    pub track_width: f32,
    /// Width of a single tab
    pub tab_width: f32,
}

/// Where the indicator and the track scroll should end up
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Targets {
    pub indicator_offset: f32,
    pub scroll_offset: f32,
}

/// Resolve the per-tab width for a measured track
///
/// Fixed mode splits the track evenly between the items; scrollable mode gives
/// every tab a fixed share of the track and lets them overflow. An empty item
/// list in fixed mode has no meaningful tab width and is reported as
/// [`TabsError::EmptyItems`].
pub fn resolve_tab_width(measured_width: f32, item_count: usize, scrollable: bool) -> Result<TrackMetrics, TabsError> {
    if !measured_width.is_finite() || measured_width < 0.0 {
        return Err(TabsError::InvalidWidth(measured_width));
    }

    let tab_width = if scrollable {
        measured_width * SCROLLABLE_TAB_FRACTION
    } else {
        if item_count == 0 {
            return Err(TabsError::EmptyItems);
        }
        measured_width / item_count as f32
    };

    Ok(TrackMetrics {
        track_width: measured_width,
        tab_width,
    })
}

/// Compute indicator and scroll targets for the selected tab
///
/// `selected_index` must already be validated against `item_count`.
pub fn compute_targets(selected_index: usize, item_count: usize, scrollable: bool, metrics: TrackMetrics) -> Targets {
    let idx = selected_index as f32;

    // All tabs share one width in fixed mode and the track never scrolls
    if !scrollable {
        return Targets {
            indicator_offset: if selected_index == 0 { 0.0 } else { idx * metrics.tab_width },
            scroll_offset: 0.0,
        };
    }

    let track_width = metrics.track_width;
    let scroll_value = track_width * SCROLLABLE_TAB_FRACTION;
    let centered = track_width * 0.5 - scroll_value / 4.0;

    // Order matters: 0, then 1, then last. Short lists resolve through the
    // earlier arms even when the index is also the last one.
    match selected_index {
        0 => Targets {
            indicator_offset: 0.0,
            scroll_offset: 0.0,
        },
        1 => Targets {
            indicator_offset: centered,
            scroll_offset: scroll_value * 0.25,
        },
        i if i + 1 == item_count => Targets {
            indicator_offset: scroll_value * (idx - 1.0) + centered,
            scroll_offset: scroll_value * (idx - 2.0) + scroll_value * 0.5,
        },
        _ => Targets {
            indicator_offset: scroll_value * (idx - 1.0) + centered,
            scroll_offset: scroll_value * 0.25 + scroll_value * (idx - 1.0),
        },
    }
}

/// Full width of the tab track's content
pub fn content_width(item_count: usize, metrics: TrackMetrics) -> f32 {
    metrics.tab_width * item_count as f32
}
