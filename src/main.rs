mod app;
mod catalog;
mod modal;
mod ui;

use app::App;
use catalog::Catalog;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::layout::Position;
use std::path::PathBuf;

/// TUI browser for a static podcast catalog
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to a catalog JSON file (uses the built-in catalog if omitted)
    #[arg(short, long)]
    catalog: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let catalog = match cli.catalog {
        Some(path) => Catalog::load(&path)?,
        None => Catalog::builtin()?,
    };
    let mut app = App::new(catalog);

    let mut terminal = ratatui::init();
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run_app(&mut terminal, &mut app);

    execute!(std::io::stdout(), DisableMouseCapture)?;
    ratatui::restore();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    Ok(())
}

fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Poll for events with a 250ms timeout
        if event::poll(std::time::Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, key);
                }
                Event::Mouse(mouse) => handle_mouse(app, mouse),
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Help toggle (global)
    if key.code == KeyCode::Char('?') && !app.modal.is_open() && !app.dropdown_open {
        app.show_help = !app.show_help;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // The open overlay sees keys first; the grid handles the rest.
    if app.modal.is_open() {
        handle_modal_key(app, key);
    } else if app.dropdown_open {
        handle_dropdown_key(app, key);
    } else {
        handle_grid_key(app, key);
    }
}

fn handle_modal_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.modal.hide();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.modal.scroll_down();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.modal.scroll_up();
        }
        _ => {}
    }
}

fn handle_dropdown_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.close_dropdown();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.dropdown_next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.dropdown_prev();
        }
        KeyCode::Enter => {
            app.apply_dropdown();
        }
        _ => {}
    }
}

fn handle_grid_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.select_next();
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.select_prev();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_down();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_up();
        }
        KeyCode::Char('g') => {
            app.select_first();
        }
        KeyCode::Char('G') => {
            app.select_last();
        }
        KeyCode::Enter => {
            app.open_selected();
        }
        KeyCode::Char('f') => {
            app.open_dropdown();
        }
        KeyCode::Esc => {
            app.clear_filter();
        }
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let pos = Position::new(mouse.column, mouse.row);

    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.modal.is_open() {
        // The close control dismisses, as does a click on the backdrop
        // outside the modal box. A click inside the box does not.
        if app.hit.modal_close.is_some_and(|rect| rect.contains(pos)) {
            app.modal.hide();
        } else if app.hit.modal.is_some_and(|rect| !rect.contains(pos)) {
            app.modal.hide();
        }
        return;
    }

    if app.dropdown_open {
        match app.hit.dropdown_option_at(pos) {
            Some(i) => {
                app.dropdown_selected = i;
                app.apply_dropdown();
            }
            None => app.close_dropdown(),
        }
        return;
    }

    if app.hit.filter_control.is_some_and(|rect| rect.contains(pos)) {
        app.open_dropdown();
        return;
    }
    if let Some(slot) = app.hit.card_at(pos) {
        app.selected = slot;
        app.open_selected();
    }
}
