//! Active list and description pane rendering

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::model::RenderState;

pub fn render_track_list(frame: &mut Frame, area: Rect, state: &RenderState) {
    let items: Vec<ListItem> = state
        .titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            let playing = state.playing_row == Some(i);
            let text = if playing {
                format!("▶ {title}")
            } else {
                title.clone()
            };
            let style = if playing {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} — press ? for help ", state.source_label))
                .title_style(Style::default().fg(Color::Gray)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        );

    let mut list_state = ListState::default();
    if !state.titles.is_empty() {
        list_state.select(Some(state.selected.min(state.titles.len() - 1)));
    }

    frame.render_stateful_widget(list, area, &mut list_state);
}

pub fn render_description(frame: &mut Frame, area: Rect, state: &RenderState) {
    let lines = match &state.description {
        Some((title, summary)) => vec![
            Line::from(Span::styled(
                title.clone(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(summary.clone()),
        ],
        None => vec![Line::from("")],
    };

    let description = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Description ")
                .title_style(Style::default().fg(Color::Gray)),
        );

    frame.render_widget(description, area);
}
