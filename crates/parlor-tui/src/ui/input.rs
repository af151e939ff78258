//! Input bar
//!
//! Text entry with cursor. Slash commands are parsed on Enter.

use parlor_app::App;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    widgets::{Block, Borders, Paragraph},
};

use crate::InputState;

/// Render the input bar and place the terminal cursor.
pub fn render(frame: &mut Frame, app: &App, input_state: &InputState, area: Rect) {
    let title = if app.prompt().is_some() || app.review().is_some() {
        " Input (overlay open) "
    } else {
        " Input "
    };

    let paragraph = Paragraph::new(input_state.buffer())
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);

    // Cursor sits after the border, at the edit position.
    let x = area.x + 1 + input_state.cursor() as u16;
    let y = area.y + 1;
    frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(2)), y));
}
