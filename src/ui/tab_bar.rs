// Tab Bar Widget
// Paints the tab track, labels, sliding indicator and shadow into a ratatui buffer

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Span, StyledGrapheme},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use super::styles::Styles;
use crate::core::{TabBarConfig, TabItem};

/// Where a tap on the bar landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapTarget {
    /// On the tab at this index
    Tab(usize),
    /// On the bar, but past the last tab
    Track,
    /// Outside the bar
    Outside,
}

/// One grapheme of a label, measured in terminal columns
#[derive(Debug, Clone, PartialEq)]
struct Glyph {
    symbol: String,
    style: Style,
    width: usize,
}

impl Glyph {
    /// Zero-width graphemes take no column and are dropped
    fn from_grapheme(grapheme: StyledGrapheme<'_>) -> Option<Self> {
        let width = grapheme.symbol.width();
        (width > 0).then(|| Self {
            symbol: grapheme.symbol.to_string(),
            style: grapheme.style,
            width,
        })
    }
}

fn display_width(glyphs: &[Glyph]) -> usize {
    glyphs.iter().map(|g| g.width).sum()
}

/// One frame of the tab bar
///
/// Offsets are in cells along the track's content; `scroll_offset` is the
/// content column shown at the left edge of the area.
#[derive(Debug, Clone, Copy)]
pub struct TabBarView<'a> {
    pub items: &'a [TabItem],
    pub config: &'a TabBarConfig,
    pub selected: usize,
    pub tab_width: f32,
    pub indicator_offset: f32,
    pub scroll_offset: f32,
}

impl<'a> TabBarView<'a> {
    pub fn new(items: &'a [TabItem], config: &'a TabBarConfig) -> Self {
        Self {
            items,
            config,
            selected: 0,
            tab_width: 0.0,
            indicator_offset: 0.0,
            scroll_offset: 0.0,
        }
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn tab_width(mut self, tab_width: f32) -> Self {
        self.tab_width = tab_width;
        self
    }

    pub fn offsets(mut self, indicator_offset: f32, scroll_offset: f32) -> Self {
        self.indicator_offset = indicator_offset;
        self.scroll_offset = scroll_offset;
        self
    }

    /// Rows taken by the bar itself (shadow excluded)
    pub fn bar_rows(&self, area: Rect) -> u16 {
        self.config.bar_height.min(area.height)
    }

    /// Total rows the widget wants, shadow included
    pub fn height(&self) -> u16 {
        self.config.bar_height + u16::from(self.config.shadow)
    }

    /// Screen columns `[start, end)` of tab `index`, relative to the area, before clipping
    fn tab_span(&self, index: usize) -> (i32, i32) {
        let start = index as f32 * self.tab_width - self.scroll_offset;
        let end = start + self.tab_width;
        (start.round() as i32, end.round() as i32)
    }

    /// Map a screen position to the tab under it
    pub fn tab_at(&self, area: Rect, column: u16, row: u16) -> TapTarget {
        let bar = Rect {
            height: self.bar_rows(area),
            ..area
        };
        if column < bar.x || column >= bar.right() || row < bar.y || row >= bar.bottom() {
            return TapTarget::Outside;
        }
        if self.tab_width <= 0.0 {
            return TapTarget::Track;
        }

        let rel = i32::from(column - bar.x);
        (0..self.items.len())
            .find(|&idx| {
                let (start, end) = self.tab_span(idx);
                rel >= start && rel < end
            })
            .map(TapTarget::Tab)
            .unwrap_or(TapTarget::Track)
    }

    /// Graphemes of a label with their styles, before fitting
    fn label_glyphs(&self, item: &TabItem, style: Style) -> Vec<Glyph> {
        match item {
            TabItem::Label(text) => {
                let text = if self.config.uppercase { text.to_uppercase() } else { text.clone() };
                Span::raw(text).styled_graphemes(style).filter_map(Glyph::from_grapheme).collect()
            }
            TabItem::Keyed { content, .. } => {
                let base = style.patch(content.style);
                content
                    .spans
                    .iter()
                    .flat_map(|span| span.styled_graphemes(base))
                    .filter_map(Glyph::from_grapheme)
                    .collect()
            }
        }
    }

    /// Shorten a label to `width` columns: ellipsis when font scaling is allowed, hard clip otherwise
    fn fit(&self, glyphs: Vec<Glyph>, width: usize) -> Vec<Glyph> {
        if display_width(&glyphs) <= width {
            return glyphs;
        }

        let ellipsis = self.config.allow_font_scaling && width > 1;
        let budget = if ellipsis { width - 1 } else { width };

        let mut used = 0;
        let mut fitted: Vec<Glyph> = glyphs
            .iter()
            .take_while(|glyph| {
                used += glyph.width;
                used <= budget
            })
            .cloned()
            .collect();

        if ellipsis {
            let style = fitted.last().or(glyphs.first()).map(|g| g.style).unwrap_or_default();
            fitted.push(Glyph {
                symbol: "…".to_string(),
                style,
                width: 1,
            });
        }
        fitted
    }

    fn put(buf: &mut Buffer, area: Rect, rel_x: i32, y: u16, ch: char, style: Style) {
        if rel_x < 0 || rel_x >= i32::from(area.width) {
            return;
        }
        let x = area.x + rel_x as u16;
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_char(ch);
            cell.set_style(style);
        }
    }

    /// Write a grapheme; a wide one that would cross the area edge is skipped
    fn put_glyph(buf: &mut Buffer, area: Rect, rel_x: i32, y: u16, glyph: &Glyph) {
        if rel_x < 0 || rel_x + glyph.width as i32 > i32::from(area.width) {
            return;
        }
        let x = area.x + rel_x as u16;
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_symbol(&glyph.symbol);
            cell.set_style(glyph.style);
        }
        // Columns covered by a wide grapheme are blanked
        for trailing in 1..glyph.width as u16 {
            if let Some(cell) = buf.cell_mut((x + trailing, y)) {
                cell.set_symbol(" ");
                cell.set_style(glyph.style);
            }
        }
    }

    fn render_labels(&self, bar: Rect, buf: &mut Buffer) {
        // Labels sit on the middle row of the bar
        let label_y = bar.y + bar.height.saturating_sub(1) / 2;

        for (idx, item) in self.items.iter().enumerate() {
            let (start, end) = self.tab_span(idx);
            if end <= 0 || start >= i32::from(bar.width) {
                continue;
            }

            let width = (end - start).max(0) as usize;
            let style = Styles::label(self.config, idx == self.selected);
            let glyphs = self.fit(self.label_glyphs(item, style), width);
            let mut x = start + ((width - display_width(&glyphs)) / 2) as i32;

            for glyph in &glyphs {
                Self::put_glyph(buf, bar, x, label_y, glyph);
                x += glyph.width as i32;
            }
        }
    }

    fn render_indicator(&self, bar: Rect, buf: &mut Buffer) {
        // A one-row bar has no room under the labels
        if bar.height < 2 {
            return;
        }

        let y = bar.bottom() - 1;
        let start = (self.indicator_offset - self.scroll_offset).round() as i32;
        let end = (self.indicator_offset - self.scroll_offset + self.tab_width).round() as i32;
        let glyph = Styles::indicator_glyph(self.config.indicator_height);
        let style = Styles::indicator(self.config);

        for rel_x in start..end {
            Self::put(buf, bar, rel_x, y, glyph, style);
        }
    }

    fn render_shadow(&self, area: Rect, buf: &mut Buffer) {
        let y = area.y + self.bar_rows(area);
        if !self.config.shadow || y >= area.bottom() {
            return;
        }

        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(Styles::shadow_glyph());
                cell.set_style(Styles::shadow());
            }
        }
    }
}

impl Widget for TabBarView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let bar = Rect {
            height: self.bar_rows(area),
            ..area
        };
        buf.set_style(bar, Styles::bar(self.config));
        self.render_shadow(area, buf);

        // Nothing to lay out until a width is known
        if self.items.is_empty() || self.tab_width <= 0.0 {
            return;
        }

        self.render_labels(bar, buf);
        self.render_indicator(bar, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Modifier};
    use ratatui::text::{Line, Span};

    fn items(labels: &[&str]) -> Vec<TabItem> {
        labels.iter().map(|l| TabItem::from(*l)).collect()
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_fixed_labels_centered_and_uppercased() {
        let items = items(&["one", "two"]);
        let config = TabBarConfig::default();
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);

        TabBarView::new(&items, &config).tab_width(10.0).render(area, &mut buf);

        assert_eq!(row(&buf, 1), "   ONE       TWO    ");
    }

    #[test]
    fn test_indicator_under_selected_tab() {
        let items = items(&["a", "b"]);
        let mut config = TabBarConfig::default();
        config.indicator_height = 8;
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);

        TabBarView::new(&items, &config)
            .selected(1)
            .tab_width(10.0)
            .offsets(10.0, 0.0)
            .render(area, &mut buf);

        assert_eq!(row(&buf, 2), format!("{}{}", " ".repeat(10), "█".repeat(10)));
    }

    #[test]
    fn test_scroll_offset_shifts_content() {
        let items = items(&["a", "b", "c"]);
        let config = TabBarConfig::default().uppercase(false);
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);

        TabBarView::new(&items, &config)
            .tab_width(4.0)
            .offsets(4.0, 4.0)
            .render(area, &mut buf);

        // Tab "a" scrolled out; "b" now starts at column 0
        assert_eq!(row(&buf, 1), " b   c    ");
        assert_eq!(row(&buf, 2), "▄▄▄▄      ");
    }

    #[test]
    fn test_long_label_gets_ellipsis() {
        let items = items(&["Notifications"]);
        let config = TabBarConfig::default().uppercase(false);
        let area = Rect::new(0, 0, 6, 3);
        let mut buf = Buffer::empty(area);

        TabBarView::new(&items, &config).tab_width(6.0).render(area, &mut buf);

        assert_eq!(row(&buf, 1), "Notif…");
    }

    #[test]
    fn test_long_label_clipped_without_font_scaling() {
        let items = items(&["Notifications"]);
        let mut config = TabBarConfig::default().uppercase(false);
        config.allow_font_scaling = false;
        let area = Rect::new(0, 0, 6, 3);
        let mut buf = Buffer::empty(area);

        TabBarView::new(&items, &config).tab_width(6.0).render(area, &mut buf);

        assert_eq!(row(&buf, 1), "Notifi");
    }

    #[test]
    fn test_wide_label_fits_by_display_width() {
        let items = items(&["受信箱", "ab"]);
        let config = TabBarConfig::default();
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);

        TabBarView::new(&items, &config).tab_width(5.0).render(area, &mut buf);

        let symbol = |x: u16| buf.cell((x, 1)).unwrap().symbol().to_string();
        assert_eq!(symbol(0), "受");
        assert_eq!(symbol(2), "信");
        assert_eq!(symbol(4), "…");
        assert_eq!(symbol(6), "A");
        assert_eq!(symbol(7), "B");
    }

    #[test]
    fn test_wide_label_clipped_at_whole_glyph() {
        let items = items(&["受信箱", "ab"]);
        let mut config = TabBarConfig::default();
        config.allow_font_scaling = false;
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);

        TabBarView::new(&items, &config).tab_width(5.0).render(area, &mut buf);

        let symbol = |x: u16| buf.cell((x, 1)).unwrap().symbol().to_string();
        assert_eq!(symbol(0), "受");
        assert_eq!(symbol(2), "信");
        assert_eq!(symbol(4), " ");
        assert_eq!(symbol(6), "A");
    }

    #[test]
    fn test_wide_label_centered() {
        let items = items(&["日本"]);
        let config = TabBarConfig::default();
        let area = Rect::new(0, 0, 8, 3);
        let mut buf = Buffer::empty(area);

        TabBarView::new(&items, &config).tab_width(8.0).render(area, &mut buf);

        assert_eq!(buf.cell((2, 1)).unwrap().symbol(), "日");
        assert_eq!(buf.cell((4, 1)).unwrap().symbol(), "本");
        assert_eq!(buf.cell((1, 1)).unwrap().symbol(), " ");
        assert_eq!(buf.cell((6, 1)).unwrap().symbol(), " ");
    }

    #[test]
    fn test_active_label_colors() {
        let items = items(&["a", "b"]);
        let config = TabBarConfig::default();
        let area = Rect::new(0, 0, 4, 3);
        let mut buf = Buffer::empty(area);

        TabBarView::new(&items, &config).tab_width(2.0).render(area, &mut buf);

        let active = buf.cell((0, 1)).unwrap();
        let inactive = buf.cell((2, 1)).unwrap();
        assert_eq!(active.fg, config.active_text_color);
        assert!(active.modifier.contains(Modifier::BOLD));
        assert_eq!(inactive.fg, config.inactive_text_color);
        assert_eq!(inactive.bg, config.bar_color);
    }

    #[test]
    fn test_keyed_content_keeps_case_and_span_style() {
        let content = Line::from(vec![Span::styled("Hi", Style::default().fg(Color::Red))]);
        let items = vec![TabItem::keyed("greeting", content)];
        let config = TabBarConfig::default();
        let area = Rect::new(0, 0, 4, 3);
        let mut buf = Buffer::empty(area);

        TabBarView::new(&items, &config).tab_width(4.0).render(area, &mut buf);

        assert_eq!(row(&buf, 1), " Hi ");
        assert_eq!(buf.cell((1, 1)).unwrap().fg, Color::Red);
    }

    #[test]
    fn test_shadow_row() {
        let items = items(&["a"]);
        let config = TabBarConfig::default().shadow(true);
        let area = Rect::new(0, 0, 3, 4);
        let mut buf = Buffer::empty(area);

        let view = TabBarView::new(&items, &config).tab_width(3.0);
        assert_eq!(view.height(), config.bar_height + 1);
        view.render(area, &mut buf);

        assert_eq!(row(&buf, 3), "▀▀▀");
    }

    #[test]
    fn test_unmeasured_bar_paints_background_only() {
        let items = items(&["a"]);
        let config = TabBarConfig::default();
        let area = Rect::new(0, 0, 3, 3);
        let mut buf = Buffer::empty(area);

        TabBarView::new(&items, &config).render(area, &mut buf);

        assert_eq!(row(&buf, 1), "   ");
        assert_eq!(buf.cell((0, 0)).unwrap().bg, config.bar_color);
    }

    #[test]
    fn test_tab_at() {
        let items = items(&["a", "b", "c"]);
        let config = TabBarConfig::default().scrollable(true);
        let area = Rect::new(2, 5, 10, 3);
        let view = TabBarView::new(&items, &config).tab_width(4.0).offsets(0.0, 2.0);

        assert_eq!(view.tab_at(area, 2, 6), TapTarget::Tab(0));
        assert_eq!(view.tab_at(area, 4, 6), TapTarget::Tab(1));
        assert_eq!(view.tab_at(area, 11, 7), TapTarget::Tab(2));
        assert_eq!(view.tab_at(area, 11, 8), TapTarget::Outside);
        assert_eq!(view.tab_at(area, 1, 6), TapTarget::Outside);

        let short = TabBarView::new(&items[..1], &config).tab_width(4.0);
        assert_eq!(short.tab_at(area, 9, 5), TapTarget::Track);
    }
}
