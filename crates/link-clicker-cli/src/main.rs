mod app;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use link_clicker_config::Config;
use link_clicker_engine::{Modifiers, vault};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env,
    fs::File,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

use app::App;

fn main() -> Result<()> {
    // The terminal is owned by the UI, so logs go to a file
    match init_logging() {
        Ok(log_path) => log::info!("link-clicker starting up, logging to {}", log_path.display()),
        Err(e) => eprintln!("Warning: logging disabled: {e:#}"),
    }

    // Determine vault path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let config;
    let from_config;

    if args.len() == 2 {
        let vault_path = PathBuf::from(&args[1]);
        config = match Config::load() {
            Ok(Some(mut config)) => {
                config.vault_path = vault_path;
                config
            }
            Ok(None) => Config::new(vault_path),
            Err(e) => {
                log::warn!("ignoring unreadable config: {e}");
                Config::new(vault_path)
            }
        };
        from_config = false;
    } else if args.len() == 1 {
        match Config::load() {
            Ok(Some(loaded)) => {
                config = loaded;
                from_config = true;
            }
            Ok(None) => {
                eprintln!("Error: No vault path provided and no config file found");
                eprintln!("Usage: {} <vault-folder-path>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {} <vault-folder-path>", args[0]);
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [vault-folder-path]", args[0]);
        process::exit(1);
    }

    if let Err(e) = vault::validate_vault_dir(&config.vault_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Vault path '{}'{} is invalid: {e}",
            config.vault_path.display(),
            source
        );
        process::exit(1);
    }

    let mut app = App::new(config, config_path)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("{err:?}");
        println!("{err:?}");
    }

    Ok(())
}

fn init_logging() -> Result<PathBuf> {
    let log_path = env::temp_dir().join("link-clicker.log");
    let file = File::create(&log_path)
        .with_context(|| format!("Failed to create log file {}", log_path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(log_path)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.editor.pending_creation.is_some() {
                    match key.code {
                        KeyCode::Char('y') | KeyCode::Enter => app.confirm_pending(),
                        KeyCode::Char('n') | KeyCode::Esc => app.cancel_pending(),
                        _ => {}
                    }
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Down | KeyCode::Char('j') => app.next_file(),
                    KeyCode::Up | KeyCode::Char('k') => app.previous_file(),
                    KeyCode::Enter => app.open_selected(),
                    KeyCode::Tab => app.editor.next_tab(),
                    KeyCode::Char('x') => app.editor.close_tab(),
                    KeyCode::Char('m') => app.cycle_view_mode(),
                    KeyCode::Char(c @ '1'..='3') => app.toggle_setting(c as u8 - b'0'),
                    _ => {}
                }
            }
            Event::Mouse(mouse)
                if mouse.kind == MouseEventKind::Down(MouseButton::Left)
                    && app.editor.pending_creation.is_none() =>
            {
                app.click(mouse.column, mouse.row, modifiers(mouse.modifiers));
            }
            _ => {}
        }
    }
}

fn modifiers(keys: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: keys.contains(KeyModifiers::CONTROL),
        meta: keys.contains(KeyModifiers::SUPER),
        shift: keys.contains(KeyModifiers::SHIFT),
        alt: keys.contains(KeyModifiers::ALT),
    }
}
