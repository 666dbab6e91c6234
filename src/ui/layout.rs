use tui::layout::{Constraint, Layout, Rect, Size};

pub const HEADER_HEIGHT: u16 = 3;
pub const FIXTURES_HEIGHT: u16 = 10;
pub const LOG_HEIGHT: u16 = 8;

/// Pre-computed layout areas for the main draw loop.
pub struct LayoutAreas {
    pub header: Rect,
    /// Loading / error line. Zero height when there is nothing to say.
    pub status: Rect,
    pub fixtures: Rect,
    /// League table, top hitters, recent results, home run leaders.
    pub panels: [Rect; 4],
    pub logs: Rect,
    pub footer: Rect,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        let rect = Rect::new(0, 0, size.width, size.height);
        Self::from_rect(rect, false, false, 0)
    }

    pub fn update(&mut self, area: Rect, full_screen: bool, show_logs: bool, status_lines: u16) {
        *self = Self::from_rect(area, full_screen, show_logs, status_lines);
    }

    fn from_rect(area: Rect, full_screen: bool, show_logs: bool, status_lines: u16) -> Self {
        let chrome = if full_screen { 0 } else { 1 };
        let [header, status, fixtures, grid, logs, footer] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT * chrome),
            Constraint::Length(status_lines),
            Constraint::Length(FIXTURES_HEIGHT),
            Constraint::Fill(1),
            Constraint::Length(if show_logs { LOG_HEIGHT } else { 0 }),
            Constraint::Length(chrome),
        ])
        .areas(area);

        LayoutAreas {
            header,
            status,
            fixtures,
            panels: Self::split_panels(grid),
            logs,
            footer,
        }
    }

    fn split_panels(area: Rect) -> [Rect; 4] {
        let [top, bottom] =
            Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
        let [a, b] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(top);
        let [c, d] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(bottom);
        [a, b, c, d]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_screen_drops_header_and_footer() {
        let area = Rect::new(0, 0, 120, 40);
        let layout = LayoutAreas::from_rect(area, true, false, 0);
        assert_eq!(layout.header.height, 0);
        assert_eq!(layout.footer.height, 0);
        assert_eq!(layout.fixtures.y, 0);
    }

    #[test]
    fn log_pane_takes_space_only_when_shown() {
        let area = Rect::new(0, 0, 120, 40);
        assert_eq!(LayoutAreas::from_rect(area, false, false, 1).logs.height, 0);
        let layout = LayoutAreas::from_rect(area, false, true, 1);
        assert_eq!(layout.logs.height, LOG_HEIGHT);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.panels[0].width + layout.panels[1].width, 120);
    }
}
