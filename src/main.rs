//! petabvis - A terminal-based viewer for PEtab measurement and simulation tables.

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use petabvis::app::App;
use petabvis::data::PetabDataset;
use petabvis::navigator::{BoundaryPolicy, GroupBy, NavigatorConfig, UnmatchedPolicy};
use petabvis::ui;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "petabvis")]
#[command(about = "A terminal-based viewer for PEtab measurement and simulation tables", long_about = None)]
struct Args {
    /// Path to the PEtab measurement table
    #[arg(short, long)]
    measurement: Option<PathBuf>,

    /// Path to the PEtab simulation table
    #[arg(short, long, requires = "measurement")]
    simulation: Option<PathBuf>,

    /// Field used to split rows into plot pages
    #[arg(long, value_enum, default_value_t = GroupBy::Condition)]
    group_by: GroupBy,

    /// Wrap around at the first and last plot instead of stopping
    #[arg(long)]
    wrap: bool,

    /// Drop simulation rows without a matching measurement instead of failing
    #[arg(long)]
    drop_unmatched: bool,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

impl Args {
    fn navigator_config(&self) -> NavigatorConfig {
        NavigatorConfig {
            group_by: self.group_by,
            boundary: if self.wrap {
                BoundaryPolicy::Wrap
            } else {
                BoundaryPolicy::Clamp
            },
            unmatched: if self.drop_unmatched {
                UnmatchedPolicy::Drop
            } else {
                UnmatchedPolicy::Reject
            },
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)?;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting petabvis");
    }

    // Load tables before touching the terminal so errors reach stderr
    let config = args.navigator_config();
    let app = match &args.measurement {
        Some(measurement) => {
            let loaded = PetabDataset::load(measurement, args.simulation.as_deref())
                .and_then(|dataset| App::with_dataset(config, dataset));
            match loaded {
                Ok(app) => app,
                Err(e) => {
                    tracing::error!("Startup load failed: {}", e);
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                },
            }
        },
        None => App::new(config),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    if args.log.is_some() {
        tracing::info!("petabvis exited");
    }

    Ok(())
}

/// What the event loop should do after a key press.
enum Flow {
    Continue,
    Quit,
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let mut pending_g = false; // For 'gg' vim binding

    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                let flow = if app.show_warnings {
                    handle_warnings_key(&mut app, key)
                } else if app.search.is_active() {
                    handle_search_key(&mut app, key)
                } else if app.goto_buffer.is_some() {
                    handle_goto_key(&mut app, key)
                } else if app.file_browser_mode {
                    handle_browser_key(&mut app, key)
                } else {
                    handle_normal_key(&mut app, key, &mut pending_g)
                };

                if let Flow::Quit = flow {
                    return Ok(());
                }
            }
        }
    }
}

fn handle_warnings_key(app: &mut App, key: KeyEvent) -> Flow {
    match key.code {
        KeyCode::Esc | KeyCode::Char('w') => app.toggle_warnings(),
        KeyCode::Char('q') => return Flow::Quit,
        _ => {},
    }
    Flow::Continue
}

fn handle_search_key(app: &mut App, key: KeyEvent) -> Flow {
    match key.code {
        KeyCode::Enter => app.search_submit(),
        KeyCode::Esc => app.search.cancel(),
        KeyCode::Backspace => app.search.backspace(),
        KeyCode::Char(c) => app.search.input(c),
        _ => {},
    }
    Flow::Continue
}

fn handle_goto_key(app: &mut App, key: KeyEvent) -> Flow {
    match key.code {
        KeyCode::Enter => app.goto_submit(),
        KeyCode::Esc => app.goto_cancel(),
        KeyCode::Backspace => app.goto_backspace(),
        KeyCode::Char(c) if c.is_ascii_digit() => app.goto_input(c),
        _ => {},
    }
    Flow::Continue
}

fn handle_browser_key(app: &mut App, key: KeyEvent) -> Flow {
    match (key.modifiers, key.code) {
        // Quit
        (KeyModifiers::NONE, KeyCode::Char('q')) => return Flow::Quit,

        // Navigation
        (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
            app.browser_up();
        },
        (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
            app.browser_down();
        },

        // Select/Open
        (KeyModifiers::NONE, KeyCode::Enter)
        | (KeyModifiers::NONE, KeyCode::Char('l'))
        | (KeyModifiers::NONE, KeyCode::Right) => {
            app.browser_select();
        },

        // Go to parent directory
        (KeyModifiers::NONE, KeyCode::Char('h')) | (KeyModifiers::NONE, KeyCode::Left) => {
            app.browser_parent();
        },

        (KeyModifiers::NONE, KeyCode::Char('.')) => app.toggle_hidden(),
        (KeyModifiers::NONE, KeyCode::Esc) => app.browser_cancel(),

        _ => {},
    }
    Flow::Continue
}

fn handle_normal_key(app: &mut App, key: KeyEvent, pending_g: &mut bool) -> Flow {
    let was_pending = std::mem::take(pending_g);

    match (key.modifiers, key.code) {
        // Quit
        (KeyModifiers::NONE, KeyCode::Char('q')) => return Flow::Quit,

        // Plot navigation
        (KeyModifiers::NONE, KeyCode::Left)
        | (KeyModifiers::NONE, KeyCode::Up)
        | (KeyModifiers::NONE, KeyCode::Char('h'))
        | (KeyModifiers::NONE, KeyCode::Char('k')) => app.previous_plot(),
        (KeyModifiers::NONE, KeyCode::Right)
        | (KeyModifiers::NONE, KeyCode::Down)
        | (KeyModifiers::NONE, KeyCode::Char('l'))
        | (KeyModifiers::NONE, KeyCode::Char('j')) => app.next_plot(),

        // Vim navigation
        (KeyModifiers::NONE, KeyCode::Char('g')) => {
            if was_pending {
                app.first_plot();
            } else {
                *pending_g = true;
            }
        },
        (KeyModifiers::NONE, KeyCode::Home) => app.first_plot(),
        (KeyModifiers::SHIFT, KeyCode::Char('G'))
        | (KeyModifiers::NONE, KeyCode::Char('G'))
        | (KeyModifiers::NONE, KeyCode::End) => app.last_plot(),
        (KeyModifiers::NONE, KeyCode::Char(c)) if c.is_ascii_digit() => app.goto_input(c),

        // Search
        (KeyModifiers::NONE, KeyCode::Char('/')) => app.search.start(),
        (KeyModifiers::NONE, KeyCode::Char('n')) => app.search_next(),
        (KeyModifiers::SHIFT, KeyCode::Char('N')) | (KeyModifiers::NONE, KeyCode::Char('N')) => {
            app.search_prev();
        },

        // Views
        (KeyModifiers::NONE, KeyCode::Tab) => app.cycle_view_mode(),
        (KeyModifiers::NONE, KeyCode::Char('b')) => app.cycle_group_by(),
        (KeyModifiers::NONE, KeyCode::Char('c')) => app.cycle_palette(),
        (KeyModifiers::SHIFT, KeyCode::Char('T')) | (KeyModifiers::NONE, KeyCode::Char('T')) => {
            app.cycle_theme();
        },
        (KeyModifiers::NONE, KeyCode::Char('w')) => app.toggle_warnings(),

        // Table scrolling
        (KeyModifiers::CONTROL, KeyCode::Char('d')) => app.scroll_table_down(10),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => app.scroll_table_up(10),

        // Clipboard and files
        (KeyModifiers::NONE, KeyCode::Char('y')) => app.copy_current(),
        (KeyModifiers::NONE, KeyCode::Char('o')) => app.open_file_browser(),

        _ => {},
    }
    Flow::Continue
}
