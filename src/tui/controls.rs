//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Tab | KeyCode::Right => app.next_tab(),
        KeyCode::BackTab | KeyCode::Left => app.prev_tab(),
        KeyCode::Char(c @ '1'..='5') => app.select_tab(usize::from(c as u8 - b'1')),
        KeyCode::Char(' ') => app.dashboard.toggle_real_time(),
        KeyCode::Char('r') => app.dashboard.refresh(),
        KeyCode::Char('+' | '=') => app.dashboard.faster(),
        KeyCode::Char('-') => app.dashboard.slower(),
        KeyCode::Char('w') => app.rotate(0, -1),
        KeyCode::Char('s') => app.rotate(0, 1),
        KeyCode::Char('a') => app.rotate(-1, 0),
        KeyCode::Char('d') => app.rotate(1, 0),
        KeyCode::Char('z') => app.camera.zoom_in(),
        KeyCode::Char('x') => app.camera.zoom_out(),
        KeyCode::Char('0') => app.camera.reset(),
        KeyCode::Char('v') => app.cycle_charging_view(),
        _ => {}
    }
}
