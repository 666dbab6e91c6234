use crate::components::format::{self, PLACEHOLDER};
use matchday_api::view::FixtureCard;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap};

pub const TEAL: Color = Color::Rgb(0x12, 0xd6, 0xc5);
pub const MIN_CARD_WIDTH: u16 = 34;

pub struct FixtureCardWidget<'a> {
    pub card: &'a FixtureCard,
    /// The next fixture still to start.
    pub primary: bool,
}

impl FixtureCardWidget<'_> {
    fn badge(&self) -> Span<'static> {
        if self.card.played {
            Span::styled(" Played ", Style::default().fg(Color::Gray).bg(Color::DarkGray))
        } else {
            let countdown = self.card.countdown.as_deref().unwrap_or(PLACEHOLDER);
            Span::styled(
                format!(" {countdown} away "),
                Style::default().fg(Color::Black).bg(TEAL),
            )
        }
    }
}

impl Widget for FixtureCardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let fixture = &self.card.fixture;
        let border = match (self.card.played, self.primary) {
            (true, _) => Color::DarkGray,
            (false, true) => TEAL,
            (false, false) => Color::Gray,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(Span::styled(
                format!(" {} ", format::truncate(&fixture.team, area.width.saturating_sub(6) as usize)),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let mut lines = vec![
            Line::from(self.badge()),
            Line::from(format!("vs {}", fixture.opponent)),
            Line::from(Span::styled(
                format!(
                    "{} · {} · {}",
                    format::date_time(self.card.kickoff),
                    fixture.venue,
                    fixture.league
                ),
                Style::default().fg(Color::Gray),
            )),
        ];
        if let Some((lat, lng)) = fixture.coordinates() {
            lines.push(Line::from(Span::styled(
                format!("⌖ {lat:.4}, {lng:.4}"),
                Style::default().fg(Color::DarkGray),
            )));
        }
        if !self.card.played {
            let width = inner.width.saturating_sub(6) as usize;
            lines.push(Line::from(vec![
                Span::styled(format::progress_bar(self.card.progress, width), Style::default().fg(TEAL)),
                Span::raw(format!(" {:>3.0}%", self.card.progress)),
            ]));
        }
        if let Some(notes) = fixture.notes() {
            lines.push(Line::from(Span::styled(
                notes.to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::ITALIC),
            )));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use matchday_api::Fixture;
    use matchday_api::sheet::Cell;

    fn rendered(card: &FixtureCard) -> String {
        let area = Rect::new(0, 0, 48, 10);
        let mut buf = Buffer::empty(area);
        FixtureCardWidget { card, primary: true }.render(area, &mut buf);
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn card(fixture: Fixture) -> FixtureCard {
        FixtureCard {
            fixture,
            kickoff: Utc.with_ymd_and_hms(2026, 6, 6, 14, 0, 0).unwrap(),
            played: false,
            countdown: Some("0d 2h 0m".into()),
            progress: 40.0,
        }
    }

    #[test]
    fn upcoming_card_shows_countdown_and_venue_coordinates() {
        let text = rendered(&card(Fixture {
            team: "NDSC".into(),
            opponent: "Lisburn".into(),
            lat: Some(Cell::Number(54.6625)),
            lng: Some(Cell::Text("-5.6689".into())),
            ..Fixture::default()
        }));
        assert!(text.contains("0d 2h 0m away"));
        assert!(text.contains("vs Lisburn"));
        assert!(text.contains("54.6625, -5.6689"));
    }

    #[test]
    fn card_without_coordinates_omits_them() {
        let text = rendered(&card(Fixture {
            team: "NDSC".into(),
            lat: Some(Cell::Number(54.6625)),
            ..Fixture::default()
        }));
        assert!(!text.contains("54.6625"));
    }
}
