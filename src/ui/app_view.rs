// Application View
// Demo layout: title, tab bar, selected tab panel and status bar

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::app::App;
use crate::core::TabItem;

/// Screen regions of the demo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub title: Rect,
    pub tab_bar: Rect,
    pub content: Rect,
    pub status: Rect,
}

impl AppLayout {
    pub fn new(area: Rect, bar_rows: u16) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),        // Title
                Constraint::Length(bar_rows), // Tab bar
                Constraint::Min(0),           // Selected tab
                Constraint::Length(1),        // Status bar
            ])
            .split(area);

        Self {
            title: chunks[0],
            tab_bar: chunks[1],
            content: chunks[2],
            status: chunks[3],
        }
    }
}

/// Render the entire application
pub fn render_app(f: &mut Frame, app: &App, layout: &AppLayout) {
    render_title(f, app, layout.title);
    f.render_widget(app.view(), layout.tab_bar);
    render_content(f, app, layout.content);
    render_status(f, app, layout.status);
}

fn render_title(f: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(app.title.as_str()).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(title, area);
}

fn tab_name(item: &TabItem) -> String {
    match item {
        TabItem::Label(text) => text.clone(),
        TabItem::Keyed { content, .. } => content.to_string(),
    }
}

/// Panel for the selected tab, with the bar's live geometry
fn render_content(f: &mut Frame, app: &App, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let state = app.machine().state();
    let adapter = app.adapter();
    let name = app.items().get(app.selected()).map(tab_name).unwrap_or_default();

    let label = |text: &str| Span::styled(format!("{text:<12}"), Style::default().fg(Color::Gray));
    let mut lines = vec![
        Line::from(vec![label("Tabs"), Span::raw(app.items().len().to_string())]),
        Line::from(vec![label("Phase"), Span::raw(format!("{:?}", state.phase()))]),
        Line::from(vec![
            label("Mode"),
            Span::raw(if app.config().scrollable { "scrollable" } else { "fixed" }),
        ]),
    ];
    if let Some(metrics) = state.metrics() {
        lines.push(Line::from(vec![
            label("Track"),
            Span::raw(format!("{:.1} wide, tabs {:.1}", metrics.track_width, metrics.tab_width)),
        ]));
    }
    let targets = state.targets();
    lines.push(Line::from(vec![
        label("Indicator"),
        Span::raw(format!("{:.2} → {:.2}", adapter.indicator_offset(), targets.indicator_offset)),
    ]));
    lines.push(Line::from(vec![
        label("Scroll"),
        Span::raw(format!("{:.2} → {:.2}", adapter.scroll_offset(), targets.scroll_offset)),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {} ", name), Style::default().fg(Color::White)))
        .border_style(Style::default().fg(Color::Rgb(102, 102, 102)))
        .padding(Padding::new(1, 1, 0, 0));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let mut spans: Vec<Span> = Vec::new();
    for (key, description) in &app.bindings {
        spans.push(Span::styled(key.clone(), Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(": {}  ", description)));
    }
    spans.push(Span::styled(app.status_text.clone(), Style::default().fg(Color::Gray)));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
