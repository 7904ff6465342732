//! Overlay rendering (notifications, source picker, help, search prompt)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::model::{Notification, NotificationKind, RenderState};

pub fn render_notification(frame: &mut Frame, notification: &Notification) {
    match notification.kind {
        NotificationKind::Error => render_error_banner(frame, &notification.message),
        NotificationKind::Info => render_info_banner(frame, &notification.message),
    }
}

fn render_error_banner(frame: &mut Frame, message: &str) {
    let area = frame.area();

    let popup_width = 52.min(area.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(4) as usize;
    let line_count = ((message.chars().count() as f32) / (inner_width.max(1) as f32)).ceil() as u16;
    let popup_height = (2 + line_count.max(1)).min(area.height.saturating_sub(4));

    let popup_area = centered(area, popup_width, popup_height);
    frame.render_widget(Clear, popup_area);

    let widget = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::Red))
        .wrap(ratatui::widgets::Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        );
    frame.render_widget(widget, popup_area);
}

fn render_info_banner(frame: &mut Frame, message: &str) {
    let area = frame.area();
    let width = (message.chars().count() as u16 + 4).min(area.width.saturating_sub(4));
    let popup_area = Rect {
        x: area.width.saturating_sub(width + 2),
        y: 1,
        width,
        height: 3,
    };

    frame.render_widget(Clear, popup_area);
    let widget = Paragraph::new(format!(" {message} ")).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" Info ")
            .title_style(Style::default().fg(Color::Gray)),
    );
    frame.render_widget(widget, popup_area);
}

pub fn render_source_picker(frame: &mut Frame, rows: &[String], selected: usize) {
    let area = frame.area();

    let max_name = rows.iter().map(|r| r.len()).max().unwrap_or(20);
    let popup_width = (max_name as u16 + 6).clamp(28, 60);
    let popup_height = (rows.len() as u16 + 2).min(area.height.saturating_sub(4));
    let popup_area = centered(area, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let items: Vec<ListItem> = rows.iter().map(|r| ListItem::new(r.clone())).collect();
    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Source list (↑↓ Enter Esc) ")
                .title_style(Style::default().fg(Color::Gray)),
        );

    let mut list_state = ListState::default();
    list_state.select(Some(selected));
    frame.render_stateful_widget(list, popup_area, &mut list_state);
}

pub fn render_search_prompt(frame: &mut Frame, query: &str) {
    let area = frame.area();
    let popup_area = centered(area, area.width / 2, 3);

    frame.render_widget(Clear, popup_area);
    let prompt = Paragraph::new(format!("/{query}")).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .title_style(Style::default().fg(Color::Gray)),
    );
    frame.render_widget(prompt, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let keybindings = [
        ("Enter", "Play from this entry / play queue entry"),
        ("Space", "Pause / Play"),
        ("j / k", "Move down / up in the list"),
        ("gg", "Jump to the first entry"),
        ("G", "Jump to the last entry"),
        ("h / l", "Jump back / forward 10 seconds"),
        ("n / p", "Next / previous song in the queue"),
        ("d / Del", "Delete the selected queue entry"),
        ("f", "Open the source list"),
        ("/", "Search"),
        ("?", "This help"),
        ("q / Esc", "Quit"),
    ];

    let popup_width = 56;
    let popup_height = (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4));
    let popup_area = centered(area, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(
                    format!("{key:>9}"),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::raw(*desc),
            ])
        })
        .collect();

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help (any key to close) ")
            .title_style(Style::default().fg(Color::Gray)),
    );
    frame.render_widget(help, popup_area);
}

pub fn render_overlays(frame: &mut Frame, state: &RenderState) {
    if let Some(notification) = &state.notification {
        render_notification(frame, notification);
    }
    if let Some((rows, selected)) = &state.picker {
        render_source_picker(frame, rows, *selected);
    }
    if let Some(query) = &state.search {
        render_search_prompt(frame, query);
    }
    if state.show_help {
        render_help_popup(frame);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
