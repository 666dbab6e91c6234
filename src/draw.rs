use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::App;
use crate::components::fixture_card::{FixtureCardWidget, MIN_CARD_WIDTH, TEAL};
use crate::components::format::{self, PLACEHOLDER};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use matchday_api::ResultFlag;
use matchday_api::sheet;
use matchday_api::view::{
    DISPLAY_LIMIT_HITTERS, DISPLAY_LIMIT_HOME_RUNS, DISPLAY_LIMIT_RESULTS, DashboardView,
};

const CLUB_NAME: &str = "North Down Softball Club";
const FOOTER: &str = "Auto-refreshes every 60 seconds · Fixtures drop off 24h after start time";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);
    let status_lines = status_line_count(app);

    let drawn = terminal.draw(|f| {
        layout.update(
            f.area(),
            app.settings.full_screen,
            app.state.show_logs,
            status_lines,
        );

        if !app.settings.full_screen {
            draw_header(f, layout.header, app, loading);
            draw_footer(f, layout.footer);
        }
        draw_status(f, layout.status, app);

        match app.state.view.as_ref() {
            Some(view) => {
                draw_fixtures(f, layout.fixtures, view);
                draw_league_table(f, layout.panels[0], view);
                draw_top_hitters(f, layout.panels[1], view);
                draw_recent_results(f, layout.panels[2], view);
                draw_home_run_leaders(f, layout.panels[3], view);
            }
            None => draw_placeholder(f, layout.fixtures, "Waiting for the first dashboard load"),
        }

        if app.state.show_logs {
            draw_logs(f, layout.logs);
        }
    });
    if let Err(e) = drawn {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn status_line_count(app: &App) -> u16 {
    let loading = u16::from(app.state.awaiting_first_load());
    let error = u16::from(app.state.last_error.is_some());
    loading + error
}

fn draw_header(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(TEAL));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [title_area, meta_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(44)]).areas(inner);

    let title = Line::from(vec![
        Span::styled("● ", Style::default().fg(TEAL)),
        Span::styled(CLUB_NAME, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("  Matchday Dashboard", Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(Paragraph::new(vec![title]), title_area);

    let spinner_style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(TEAL),
    };
    let mut meta = vec![Span::styled(loading.spinner_char.to_string(), spinner_style)];
    if let Some(updated) = app.state.last_updated.as_deref() {
        meta.push(Span::styled(format!(" Updated {updated}"), Style::default().fg(Color::Gray)));
    }
    meta.push(Span::styled("  r=refresh q=quit", Style::default().fg(Color::DarkGray)));
    f.render_widget(
        Paragraph::new(Line::from(meta)).alignment(Alignment::Right),
        meta_area,
    );
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }
    let mut lines = Vec::new();
    if app.state.awaiting_first_load() {
        lines.push(Line::from(Span::styled("Loading…", Style::default().fg(Color::Gray))));
    }
    if let Some(err) = app.state.last_error.as_deref() {
        lines.push(Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(Color::LightRed),
        )));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_fixtures(f: &mut Frame, area: Rect, view: &DashboardView) {
    let mut block = default_border(TEAL).title(Span::styled(
        " Next Fixture ",
        Style::default().add_modifier(Modifier::BOLD),
    ));
    if view.primary_fixture.is_some() {
        let countdown = view.primary_countdown.as_deref().unwrap_or(PLACEHOLDER);
        block = block.title(
            Line::from(Span::styled(format!(" ⏳ {countdown} away "), Style::default().fg(TEAL)))
                .right_aligned(),
        );
    }
    let inner = block.inner(area);
    f.render_widget(block, area);

    if view.fixtures.is_empty() {
        f.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(
                    "No upcoming fixtures",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Add your next matches in the Next_Fixture sheet.",
                    Style::default().fg(Color::Gray),
                )),
            ]),
            inner,
        );
        return;
    }

    let fit = usize::from((inner.width / MIN_CARD_WIDTH).max(1));
    let shown = view.fixtures.len().min(fit);
    let constraints = vec![Constraint::Ratio(1, shown as u32); shown];
    let slots = Layout::horizontal(constraints).split(inner);

    let primary_kickoff = view.primary_fixture.as_ref().map(|c| c.kickoff);
    for (card, slot) in view.fixtures.iter().zip(slots.iter()) {
        f.render_widget(
            FixtureCardWidget {
                card,
                primary: Some(card.kickoff) == primary_kickoff && !card.played,
            },
            *slot,
        );
    }
}

fn draw_league_table(f: &mut Frame, area: Rect, view: &DashboardView) {
    let rows = view.league_table.iter().map(|r| {
        Row::new(vec![
            Cell::from(Span::styled(
                sheet::display_or(&r.position, PLACEHOLDER),
                Style::default().fg(TEAL).add_modifier(Modifier::BOLD),
            )),
            Cell::from(r.team.clone()),
            Cell::from(sheet::display_or(&r.played, PLACEHOLDER)),
            Cell::from(format!(
                "{}-{}",
                sheet::display_or(&r.wins, "0"),
                sheet::display_or(&r.losses, "0")
            )),
            Cell::from(sheet::display_or(&r.points, PLACEHOLDER)),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Length(4),
        ],
    )
    .header(header_row(["#", "Team", "P", "W-L", "Pts"]))
    .block(default_border(Color::DarkGray).title(" League Table "));
    f.render_widget(table, area);
}

fn draw_top_hitters(f: &mut Frame, area: Rect, view: &DashboardView) {
    let rows = view
        .top_hitters
        .iter()
        .take(DISPLAY_LIMIT_HITTERS)
        .enumerate()
        .map(|(i, h)| {
            Row::new(vec![
                Cell::from(Span::styled(format!("#{}", i + 1), Style::default().fg(TEAL))),
                Cell::from(Line::from(vec![
                    Span::styled(h.player.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(format!(" {}", h.team), Style::default().fg(Color::Gray)),
                ])),
                Cell::from(format::rate(h.batting_average())),
                Cell::from(format::rate(h.on_base_percentage())),
                Cell::from(sheet::display_or(&h.rbis, PLACEHOLDER)),
                Cell::from(sheet::display_or(&h.games_played, PLACEHOLDER)),
            ])
        });
    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Length(6),
        ],
    )
    .header(header_row(["", "Player", "AVG", "OBP", "RBIs", "Games"]))
    .block(default_border(Color::DarkGray).title(" Top Hitters "));
    f.render_widget(table, area);
}

fn draw_recent_results(f: &mut Frame, area: Rect, view: &DashboardView) {
    let rows = view
        .recent_results
        .iter()
        .take(DISPLAY_LIMIT_RESULTS)
        .map(|m| {
            let (label, style) = match m.flag() {
                ResultFlag::Win => ("W", Style::default().fg(Color::Black).bg(Color::Green)),
                ResultFlag::Loss => ("L", Style::default().fg(Color::Black).bg(Color::Red)),
                ResultFlag::Other => {
                    let shown = m.result.trim();
                    (
                        if shown.is_empty() { PLACEHOLDER } else { shown },
                        Style::default().fg(Color::Gray),
                    )
                }
            };
            Row::new(vec![
                Cell::from(Line::from(vec![
                    Span::styled(
                        format!("{} vs {}", m.team, m.opponent),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  {}", format::date(&m.date)), Style::default().fg(Color::Gray)),
                ])),
                Cell::from(format!(
                    "{}-{}",
                    sheet::display_or(&m.club_score, ""),
                    sheet::display_or(&m.opponent_score, "")
                )),
                Cell::from(Span::styled(format!(" {} ", label.to_uppercase()), style)),
            ])
        });
    let table = Table::new(
        rows,
        [Constraint::Fill(1), Constraint::Length(7), Constraint::Length(4)],
    )
    .block(default_border(Color::DarkGray).title(" Recent Results "));
    f.render_widget(table, area);
}

fn draw_home_run_leaders(f: &mut Frame, area: Rect, view: &DashboardView) {
    let rows = view
        .home_run_leaders
        .iter()
        .take(DISPLAY_LIMIT_HOME_RUNS)
        .map(|hr| {
            Row::new(vec![
                Cell::from(Line::from(vec![
                    Span::styled(hr.player.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(format!(" {}", hr.team), Style::default().fg(Color::Gray)),
                ])),
                Cell::from(Span::styled(
                    sheet::display_or(&hr.home_runs, "0"),
                    Style::default().fg(TEAL).add_modifier(Modifier::BOLD),
                )),
            ])
        });
    let table = Table::new(rows, [Constraint::Fill(1), Constraint::Length(4)])
        .header(header_row(["Player", "HR"]))
        .block(default_border(Color::DarkGray).title(" Home Run Leaders "));
    f.render_widget(table, area);
}

fn header_row<'a, const N: usize>(titles: [&'a str; N]) -> Row<'a> {
    Row::new(titles.map(Cell::from))
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD))
}

fn draw_footer(f: &mut Frame, area: Rect) {
    f.render_widget(
        Paragraph::new(FOOTER)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(logs, area);
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}
