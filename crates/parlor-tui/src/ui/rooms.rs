//! Rooms sidebar
//!
//! Lists the user's room history with the active room highlighted.
//! Tab cycles through them; `/forget` prunes an inactive one.

use parlor_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Render the rooms sidebar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Rooms ");

    let items: Vec<ListItem> = if app.rooms().is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "(none)",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        app.rooms()
            .iter()
            .map(|room| {
                let style = if room == app.active_room() {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(Span::styled(room.clone(), style)))
            })
            .collect()
    };

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
