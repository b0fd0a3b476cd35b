pub mod canvas;
pub mod projection;
pub mod scene;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::state::{AppMode, AppState};

const MIN_WIDTH: u16 = 20;
const MIN_HEIGHT: u16 = 8;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning = Paragraph::new("Terminal too small. Resize to at least 20x8.")
            .block(Block::default().borders(Borders::ALL).title("skyclock"));
        frame.render_widget(warning, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let canvas = scene::draw_scene(&state.engine.view(), chunks[0].width, chunks[0].height);
    frame.render_widget(&canvas, chunks[0]);
    render_status_line(frame, chunks[1], state);
}

fn render_status_line(frame: &mut Frame, area: Rect, state: &AppState) {
    frame.render_widget(Paragraph::new(status_line(state)), area);
}

pub fn status_line(state: &AppState) -> Line<'static> {
    let category = state
        .category()
        .map_or("none", |category| category.label());
    let mut spans = vec![Span::styled(
        format!(" {category} "),
        Style::default().add_modifier(Modifier::BOLD),
    )];

    match state.mode {
        AppMode::Loading => spans.push(Span::raw("· looking up weather… ")),
        AppMode::Ready | AppMode::Quit => {
            if let Some(report) = &state.last_report {
                spans.push(Span::raw(format!(
                    "· {} · {} ",
                    report.location.name, report.description
                )));
            } else if state.settings.weather.is_some() {
                spans.push(Span::raw("· pinned "));
            }
        }
    }

    if let Some(err) = &state.last_error {
        spans.push(Span::styled(
            format!("· ⚠ {err} "),
            Style::default().fg(Color::LightRed),
        ));
    }
    if !state.last_frame.is_clean() {
        spans.push(Span::styled(
            "· frame degraded ",
            Style::default().fg(Color::Yellow),
        ));
    }
    spans.push(Span::styled(
        "· 1-8 weather  r refresh  q quit",
        Style::default().fg(Color::DarkGray),
    ));
    Line::from(spans)
}
