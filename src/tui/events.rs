use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::cli::CommonArgs;
use crate::session::Session;
use crate::util;

use super::state::TuiState;

/// Handle a keyboard event, mutating TUI state and returning `true` if the loop should exit.
pub fn handle_key_events(
    key_event: KeyEvent,
    state: &mut TuiState,
    session: &mut Session,
    common: &CommonArgs,
) -> io::Result<bool> {
    if key_event.kind != KeyEventKind::Press {
        return Ok(false);
    }

    if state.show_help {
        match key_event.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Char('h') | KeyCode::F(1) | KeyCode::Esc => state.show_help = false,
            _ => {}
        }
        return Ok(false);
    }

    match key_event.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('h') | KeyCode::F(1) => state.show_help = !state.show_help,
        KeyCode::Tab => state.tab_index = (state.tab_index + 1) % 3,
        KeyCode::BackTab => {
            state.tab_index = if state.tab_index == 0 {
                2
            } else {
                state.tab_index - 1
            };
        }
        KeyCode::Char('1') => state.tab_index = 0,
        KeyCode::Char('2') => state.tab_index = 1,
        KeyCode::Char('3') => state.tab_index = 2,
        KeyCode::Esc => session.clear_selection(),
        KeyCode::Char('c') => copy_hovered_id(state, session),
        KeyCode::Char('r') => reload_data(state, session, common),
        _ => {}
    }

    Ok(false)
}

/// Handle mouse interaction: left-drag brushes the plot, movement hovers.
pub fn handle_mouse_event(
    mouse_event: MouseEvent,
    state: &mut TuiState,
    session: &mut Session,
) -> io::Result<()> {
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some((x, y)) = state.plot_point(mouse_event.column, mouse_event.row) {
                session.drag_start(x, y);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some((x, y)) = state.plot_point_unclamped(mouse_event.column, mouse_event.row) {
                session.drag_move(x, y);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some((x, y)) = state.plot_point_unclamped(mouse_event.column, mouse_event.row) {
                session.drag_end(x, y);
            }
        }
        MouseEventKind::Moved => match state.plot_point(mouse_event.column, mouse_event.row) {
            Some((x, y)) => session.hover_at(x, y),
            None => session.hover_clear(),
        },
        _ => {}
    }
    Ok(())
}

/// Copy the hovered commit id, falling back to the first selected commit,
/// surfacing clipboard errors in status.
fn copy_hovered_id(state: &mut TuiState, session: &Session) {
    let id = session.tooltip().map(|tip| tip.id).or_else(|| {
        session
            .selected()
            .first()
            .map(|&i| session.commits()[i].id.clone())
    });
    let Some(id) = id else {
        state.set_status("Nothing hovered or selected to copy");
        return;
    };
    match copy_to_clipboard(&id) {
        Ok(_) => state.set_status(format!("Copied: {}", util::short_id(&id))),
        Err(err) => state.set_status(format!("Clipboard error: {err}")),
    }
}

/// Re-read the log and show a transient status message either way. The old
/// data stays up when the reload fails.
fn reload_data(state: &mut TuiState, session: &mut Session, common: &CommonArgs) {
    match session.reload(common) {
        Ok(_) => state.set_status(format!(
            "Reloaded {} commits ({} lines)",
            session.commits().len(),
            session.records().len()
        )),
        Err(e) => state.set_status(format!("Load error: {e}")),
    }
}

pub fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())
}
