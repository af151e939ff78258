//! Chat area
//!
//! Displays the message view for the active room, bottom-anchored with
//! manual scroll-back.

use parlor_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use super::tag_color;

const BORDER_SIZE: u16 = 2;

/// Render the chat area.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.active_room().is_empty() {
        " No Room ".to_string()
    } else {
        format!(" {} ", app.active_room())
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let mut items: Vec<ListItem> = Vec::with_capacity(app.lines().len() + 1);
    if let Some(banner) = app.banner() {
        items.push(ListItem::new(Line::from(Span::styled(
            banner.to_string(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))));
    }
    items.extend(app.lines().iter().map(|line| {
        ListItem::new(Line::from(vec![
            Span::styled(
                format!("[{}] ", line.timestamp),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{}: ", line.username),
                Style::default().fg(tag_color(line.tag)).add_modifier(Modifier::BOLD),
            ),
            Span::raw(line.text.clone()),
        ]))
    }));

    // Bottom-anchored window, shifted up by the scroll offset.
    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let end = items.len().saturating_sub(app.scroll_offset());
    let start = end.saturating_sub(visible_height);
    let visible_items: Vec<_> = items.into_iter().take(end).skip(start).collect();

    let list = List::new(visible_items).block(block);

    frame.render_widget(list, area);
}
