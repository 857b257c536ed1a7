//! Constituency TUI - terminal dashboard for constituency management.
//!
//! Main entry point and event loop for the application.

mod app;
mod config;
mod data;
mod error;
mod logging;
mod records;
mod report;
mod table;
mod ui;

use anyhow::Context;
use app::{App, UiMode};
use clap::Parser;
use config::Config;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use data::Dataset;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
};
use report::{Report, Role};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line options; each overrides the matching config field.
#[derive(Parser, Debug)]
#[command(version, about = "Terminal dashboard for constituency management")]
struct Cli {
    /// Path to config.jsonc
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Role: admin, mla, staff or citizen
    #[arg(short, long)]
    role: Option<Role>,
    /// Directory with <report>.json data files
    #[arg(short, long)]
    data_dir: Option<PathBuf>,
    /// Write the effective configuration to the config path and exit
    #[arg(long)]
    init_config: bool,
}

/// Main application entry point.
///
/// # Details
/// Loads configuration and data, starts file logging, then runs the event
/// loop until the user quits.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(role) = cli.role {
        config.role = role;
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.to_string_lossy().into_owned());
    }

    if cli.init_config {
        config.save(cli.config.as_deref())?;
        let path = match cli.config {
            Some(p) => p,
            None => Config::default_config_path()?,
        };
        println!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    let _logger = match config
        .log_dir_path()
        .and_then(|dir| logging::init_logging(&config.log_level, &dir))
    {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    };

    let data_dir = config.data_dir_path()?;
    let data = match data_dir.as_deref() {
        Some(dir) => Dataset::load(Some(dir)),
        None => Dataset::sample(),
    }
    .context("Failed to load report data")?;

    let mut app = App::new(&data, &config, data_dir);
    let loaded: usize = config.role.reports().iter().map(|&r| data.len(r)).sum();
    app.set_status(format!(
        "Signed in as {}: {} reports, {} records",
        config.role,
        app.panes.len(),
        loaded
    ));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match &result {
        Ok(()) => log::info!("event=app_exit status=ok"),
        Err(e) => log::error!("event=app_exit status=error error={e:#}"),
    }
    result
}

/// Render the complete UI.
///
/// # Details
/// Lays out tabs, search, filters, stat cards, table and status bar, then
/// draws the detail popup on top when open.
fn render_ui(f: &mut ratatui::Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Length(3), // Search bar
            Constraint::Length(5), // Filters
            Constraint::Length(3), // Stat cards
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    ui::render_tabs(app, chunks[0], f.buffer_mut());
    ui::render_search(app, chunks[1], f.buffer_mut());
    ui::render_filters(app, chunks[2], f.buffer_mut());
    ui::render_summary(app, chunks[3], f.buffer_mut());
    ui::render_table(app, chunks[4], f.buffer_mut());

    let status_text = app.status_message.as_deref().unwrap_or(
        "'q' quit, Tab/1-6 switch report, '/' search, 'f' filters, 's' sort, Enter details, 'r' reload",
    );
    let status = ratatui::widgets::Paragraph::new(ratatui::text::Line::from(status_text))
        .block(ratatui::widgets::Block::default().borders(ratatui::widgets::Borders::ALL));
    f.render_widget(status, chunks[5]);

    if app.mode == UiMode::Detail {
        let area = f.area();
        ui::render_detail(app, area, f.buffer_mut());
    }
}

/// Main event loop.
///
/// # Details
/// Polls for terminal events, updates state, and redraws.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key(key, app) == Flow::Quit {
                    break;
                }
            }
            Event::Mouse(mouse) => handle_mouse_event(mouse, app),
            _ => {}
        }
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Apply one key press to the application state.
fn handle_key(key: KeyEvent, app: &mut App) -> Flow {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Flow::Quit;
    }

    match app.mode {
        UiMode::List => match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Up | KeyCode::Char('k') => app.move_up(),
            KeyCode::Down | KeyCode::Char('j') => app.move_down(),
            KeyCode::PageDown | KeyCode::Char('n') => app.next_page(),
            KeyCode::PageUp | KeyCode::Char('p') => app.prev_page(),
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_tab(),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.prev_tab(),
            KeyCode::Enter | KeyCode::Char('v') => app.view_selected(),
            KeyCode::Char('e') => app.request_edit(),
            KeyCode::Char('d') => app.request_deactivate(),
            KeyCode::Char('/') => app.mode = UiMode::Search,
            KeyCode::Char('f') => app.mode = UiMode::Filters,
            KeyCode::Char('s') => app.cycle_sort(),
            KeyCode::Char('c') => app.clear_view(),
            KeyCode::Char('r') => app.reload(),
            KeyCode::Char(digit @ '1'..='6') => {
                let index = digit as usize - '1' as usize;
                app.switch_to(Report::ALL[index]);
            }
            _ => {}
        },
        UiMode::Search => match key.code {
            KeyCode::Enter | KeyCode::Esc => app.mode = UiMode::List,
            KeyCode::Backspace => app.remove_search_char(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.clear_search()
            }
            KeyCode::Char(c) => app.add_search_char(c),
            _ => {}
        },
        UiMode::Filters => match key.code {
            KeyCode::Esc | KeyCode::Char('f') => app.mode = UiMode::List,
            KeyCode::Left | KeyCode::Char('h') => app.prev_filter_column(),
            KeyCode::Right | KeyCode::Char('l') => app.next_filter_column(),
            KeyCode::Char(' ') | KeyCode::Enter => app.cycle_filter_value(),
            KeyCode::Char('s') => app.cycle_sort(),
            KeyCode::Char('c') => app.clear_view(),
            KeyCode::Up | KeyCode::Char('k') => app.move_up(),
            KeyCode::Down | KeyCode::Char('j') => app.move_down(),
            _ => {}
        },
        UiMode::Detail => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.mode = UiMode::List,
            KeyCode::Char('e') => app.request_edit(),
            KeyCode::Char('d') => app.request_deactivate(),
            _ => {}
        },
    }

    Flow::Continue
}

/// Handle mouse scroll for row navigation.
fn handle_mouse_event(mouse: MouseEvent, app: &mut App) {
    if app.mode != UiMode::List {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => app.move_up(),
        MouseEventKind::ScrollDown => app.move_down(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn sample_app() -> App {
        App::new(&Dataset::sample().unwrap(), &Config::default(), None)
    }

    #[test]
    fn test_quit_keys() {
        let mut app = sample_app();
        assert_eq!(handle_key(press(KeyCode::Char('q')), &mut app), Flow::Quit);

        let ctrl_c = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..press(KeyCode::Char('c'))
        };
        app.mode = UiMode::Search;
        assert_eq!(handle_key(ctrl_c, &mut app), Flow::Quit);
    }

    #[test]
    fn test_search_typing_does_not_quit() {
        let mut app = sample_app();
        handle_key(press(KeyCode::Char('/')), &mut app);
        assert_eq!(app.mode, UiMode::Search);
        for c in "quit".chars() {
            assert_eq!(handle_key(press(KeyCode::Char(c)), &mut app), Flow::Continue);
        }
        assert_eq!(app.pane().query().search, "quit");

        let ctrl_u = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..press(KeyCode::Char('u'))
        };
        handle_key(ctrl_u, &mut app);
        assert!(app.pane().query().search.is_empty());

        handle_key(press(KeyCode::Esc), &mut app);
        assert_eq!(app.mode, UiMode::List);
    }

    #[test]
    fn test_filter_mode_keys() {
        let mut app = sample_app();
        handle_key(press(KeyCode::Char('f')), &mut app);
        handle_key(press(KeyCode::Right), &mut app);
        handle_key(press(KeyCode::Char(' ')), &mut app);
        assert!(app.pane().query().has_active_filters());
        handle_key(press(KeyCode::Char('c')), &mut app);
        assert!(!app.pane().query().has_active_filters());
    }

    #[test]
    fn test_digit_keys_jump_to_reports() {
        let mut app = sample_app();
        handle_key(press(KeyCode::Char('6')), &mut app);
        assert_eq!(app.active_report(), Report::Logs);
        handle_key(press(KeyCode::Char('1')), &mut app);
        assert_eq!(app.active_report(), Report::Projects);
    }

    #[test]
    fn test_detail_opens_and_closes() {
        let mut app = sample_app();
        handle_key(press(KeyCode::Enter), &mut app);
        assert_eq!(app.mode, UiMode::Detail);
        handle_key(press(KeyCode::Esc), &mut app);
        assert_eq!(app.mode, UiMode::List);
    }

    #[test]
    fn test_cli_parses_role() {
        let cli = Cli::try_parse_from(["constituency-tui", "--role", "mla"]).unwrap();
        assert_eq!(cli.role, Some(Role::Mla));
        assert!(!cli.init_config);
    }
}
