//! Modal overlays
//!
//! The invitation prompt (accept/decline a live invitation) and the review
//! surface (all stored invitations at session start, each independently
//! resolvable, close keeps the rest pending).

use parlor_app::App;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use super::centered_rect;

/// Render the live invitation prompt.
pub fn render_prompt(frame: &mut Frame, app: &App) {
    let Some(prompt) = app.prompt() else {
        return;
    };

    let area = centered_rect(52, 6, frame.area());
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(format!(
            "{} has invited you to join '{}'.",
            prompt.invitation.from, prompt.invitation.chatroom
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[y] accept   [n] decline",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Chat Invitation "));
    frame.render_widget(paragraph, area);
}

/// Render the review surface for stored invitations.
pub fn render_review(frame: &mut Frame, app: &App) {
    let Some(review) = app.review() else {
        return;
    };

    let height = (review.entries().len() as u16 + 4).min(frame.area().height);
    let area = centered_rect(60, height, frame.area());
    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = review
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let marker = match entry.resolution {
                None => "[ ]",
                Some(true) => "[accepted]",
                Some(false) => "[declined]",
            };
            let text = format!(
                "{marker} From {} to join '{}'  (sent {})",
                entry.invitation.from, entry.invitation.chatroom, entry.invitation.timestamp
            );
            let style = if index == review.cursor() {
                Style::default().add_modifier(Modifier::REVERSED)
            } else if entry.resolution.is_some() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(text, style)))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Pending Invitations - [y] accept [n] decline [Esc] close "),
    );
    frame.render_widget(list, area);
}
