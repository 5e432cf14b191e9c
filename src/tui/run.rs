use std::io;
use std::time::Duration;

use crossterm::event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::{Frame, Terminal};

use crate::cli::CommonArgs;
use crate::plot::scales::Viewport;
use crate::session::Session;

use super::events::{handle_key_events, handle_mouse_event};
use super::state::{TuiState, ViewMode};
use super::views::{
    draw_help_overlay, draw_languages_view, draw_scatter_view, draw_statistics_view,
};

const STATUS_TTL: Duration = Duration::from_secs(3);

pub fn run(common: &CommonArgs) -> io::Result<()> {
    let mut session = Session::load(common, Viewport::page()).map_err(io::Error::other)?;

    enable_raw_mode()?;
    execute!(io::stdout(), EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut state = TuiState::default();

    terminal.clear()?;

    loop {
        if let Some((_, at)) = &state.status_message {
            if at.elapsed() > STATUS_TTL {
                state.status_message = None;
            }
        }

        let draw_result = terminal.draw(|f| draw_frame(f, &mut session, &mut state));
        if let Err(e) = draw_result {
            eprintln!("TUI draw error: {}", e);
        }

        if poll(Duration::from_millis(200))? {
            match read()? {
                Event::Key(key_event) => {
                    if handle_key_events(key_event, &mut state, &mut session, common)? {
                        break;
                    }
                }
                Event::Mouse(mouse_event) => {
                    handle_mouse_event(mouse_event, &mut state, &mut session)?;
                }
                _ => {}
            }
        }
    }

    terminal.clear()?;
    execute!(io::stdout(), DisableMouseCapture)?;
    disable_raw_mode()?;
    Ok(())
}

fn draw_frame(f: &mut Frame, session: &mut Session, state: &mut TuiState) {
    let size = f.size();

    if state.show_help {
        draw_help_overlay(f, size);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    let tabs = Tabs::new(vec!["Plot", "Stats", "Languages"])
        .block(Block::default().borders(Borders::ALL).title("View Mode"))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .select(state.tab_index);
    f.render_widget(tabs, chunks[0]);

    state.view_mode = match state.tab_index {
        0 => ViewMode::Plot,
        1 => ViewMode::Statistics,
        2 => ViewMode::Languages,
        _ => ViewMode::Plot,
    };

    state.plot_area = None;
    match state.view_mode {
        ViewMode::Plot => draw_scatter_view(f, chunks[1], session, state),
        ViewMode::Statistics => draw_statistics_view(f, chunks[1], session),
        ViewMode::Languages => draw_languages_view(f, chunks[1], session),
    }

    let footer = match &state.status_message {
        Some((message, _)) => {
            Paragraph::new(message.as_str()).style(Style::default().fg(Color::Cyan))
        }
        None => Paragraph::new(" q quit | Tab switch view | drag to select | Esc clear | r reload | h help")
            .style(Style::default().fg(Color::DarkGray)),
    };
    f.render_widget(footer, chunks[2]);
}
