use std::env;
use std::io::Stdout;
use std::sync::mpsc;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::Command;
use crate::library::spawn_scan;

mod event_loop;
mod logging;
mod mpris_sync;
mod settings;
mod startup;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    logging::init_logging(&settings);
    startup::log_effective_settings(&settings);

    let root = startup::resolve_root(env::args().nth(1), settings.library.root.as_deref());
    let mut app = startup::build_app(&settings, root);
    let scan = spawn_scan(app.root().to_path_buf(), settings.library.clone());

    let (control_tx, control_rx) = mpsc::channel::<Command>();
    let mpris = crate::mpris::spawn_mpris(control_tx);
    mpris_sync::update_mpris(&mpris, &app);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = event_loop::EventLoopState::new(Some(scan));
    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &mpris,
        &control_rx,
        &mut state,
    );

    let restored = restore_terminal(&mut terminal);

    state.cancel_scan();
    if let Err(e) = app.shutdown() {
        log::error!("saving favorites at shutdown failed: {e}");
        eprintln!("cadenza: failed to save favorites: {e}");
    }
    log::info!("shut down");

    restored?;
    run_result
}

fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result<(), Box<dyn std::error::Error>> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}
