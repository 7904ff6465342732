//! Player and statistics bar rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::{PlayState, RenderState};
use super::utils::format_seconds;

pub fn render_player_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(67), Constraint::Percentage(33)])
        .split(area);

    render_now_playing(frame, chunks[0], state);
    render_statistics(frame, chunks[1], state);
}

fn render_now_playing(frame: &mut Frame, area: Rect, state: &RenderState) {
    let status = &state.projection.status;
    let (tag, tag_color) = match status.state {
        PlayState::Play => ("[play]", Color::Green),
        PlayState::Pause => ("[pause]", Color::Blue),
        PlayState::Stop => ("[stop]", Color::DarkGray),
    };

    let now_playing = &state.projection.now_playing;
    let line = Line::from(vec![
        Span::styled(tag, Style::default().fg(tag_color).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(
            now_playing.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" [{}]", now_playing.artist)),
    ]);

    let player = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Player ")
            .title_style(Style::default().fg(Color::Gray)),
    );
    frame.render_widget(player, area);
}

fn render_statistics(frame: &mut Frame, area: Rect, state: &RenderState) {
    let status = &state.projection.status;
    let text = format!(
        "[{} Time] [{} Length] [{} kbps]",
        format_seconds(status.elapsed_seconds),
        format_seconds(status.duration_seconds),
        status.bitrate_kbps,
    );

    let stats = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
    )))
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Statistic ")
            .title_style(Style::default().fg(Color::Gray)),
    );
    frame.render_widget(stats, area);
}
