//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees. Modal overlays (invitation prompt, review
//! surface) draw on top of the main layout.

mod chat;
mod input;
mod overlay;
mod rooms;
mod status;

use parlor_app::App;
use parlor_core::{ColorToken, DisplayTag};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
};

use crate::InputState;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App, input_state: &InputState) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [main_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_main_area(frame, app, *main_area);
    input::render(frame, app, input_state, *input_area);
    status::render(frame, app, *status_area);

    if app.review().is_some() {
        overlay::render_review(frame, app);
    } else if app.prompt().is_some() {
        overlay::render_prompt(frame, app);
    }
}

/// Render the main area (rooms sidebar + chat).
fn render_main_area(frame: &mut Frame, app: &App, area: Rect) {
    const ROOM_SIDEBAR_WIDTH: u16 = 16;
    const CHAT_AREA_MIN_WIDTH: u16 = 20;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(ROOM_SIDEBAR_WIDTH), Constraint::Min(CHAT_AREA_MIN_WIDTH)])
        .split(area);

    let [rooms_area, chat_area] = chunks.as_ref() else {
        return;
    };

    rooms::render(frame, app, *rooms_area);
    chat::render(frame, app, *chat_area);
}

/// Terminal color for a display tag.
fn tag_color(tag: DisplayTag) -> Color {
    match tag {
        DisplayTag::System => Color::Rgb(0xFF, 0xC1, 0x07),
        DisplayTag::User(token) => token_color(token),
    }
}

/// Terminal color for a palette token, matching the wire hex values.
fn token_color(token: ColorToken) -> Color {
    match token {
        ColorToken::Red => Color::Rgb(0xFF, 0x6B, 0x6B),
        ColorToken::Green => Color::Rgb(0x4A, 0xFF, 0x65),
        ColorToken::Blue => Color::Rgb(0x63, 0xB8, 0xFF),
        ColorToken::Yellow => Color::Rgb(0xFF, 0xF0, 0x7C),
        ColorToken::Magenta => Color::Rgb(0xFF, 0x5D, 0xC8),
        ColorToken::Cyan => Color::Rgb(0x00, 0xFF, 0xFF),
        ColorToken::White => Color::Rgb(0xFF, 0xFF, 0xFF),
    }
}

/// Centered rectangle for modal overlays.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
