use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Rect;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Command, Flow, Pane};
use crate::audio::AudioBackend;
use crate::config;
use crate::library::{ScanTask, spawn_scan};
use crate::mpris::MprisHandle;
use crate::playback::PlaybackStatus;
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// The scan whose result has not arrived yet.
    pub scan: Option<ScanTask>,
    last_mpris_status: PlaybackStatus,
    last_mpris_path: Option<PathBuf>,
    /// Pane and screen row of the previous click. The list may scroll after
    /// a click, so a double click is matched by screen row.
    last_click: Option<(Pane, u16, Instant)>,
}

const DOUBLE_CLICK: Duration = Duration::from_millis(400);

impl EventLoopState {
    pub fn new(scan: Option<ScanTask>) -> Self {
        Self {
            pending_gg: false,
            scan,
            last_mpris_status: PlaybackStatus::Stopped,
            last_mpris_path: None,
            last_click: None,
        }
    }

    /// Stop a scan that is still walking the tree.
    pub fn cancel_scan(&mut self) {
        if let Some(task) = self.scan.take() {
            task.cancel();
        }
    }

    /// Translate a key press into a command. `g` waits for a second `g`.
    pub fn command_for_key(&mut self, key: KeyEvent) -> Option<Command> {
        let pending_gg = std::mem::take(&mut self.pending_gg);

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Command::Quit),
                KeyCode::Char('n') => Some(Command::SelectNext),
                KeyCode::Char('p') => Some(Command::SelectPrev),
                _ => None,
            };
        }

        let cmd = match key.code {
            KeyCode::Char('q') => Command::Quit,
            KeyCode::Char('g') => {
                if pending_gg {
                    Command::SelectFirst
                } else {
                    self.pending_gg = true;
                    return None;
                }
            }
            KeyCode::Char('G') | KeyCode::End => Command::SelectLast,
            KeyCode::Home => Command::SelectFirst,
            KeyCode::Char('j') | KeyCode::Down => Command::SelectNext,
            KeyCode::Char('k') | KeyCode::Up => Command::SelectPrev,
            KeyCode::Tab | KeyCode::BackTab => Command::FocusNext,
            KeyCode::Char('1') | KeyCode::Left | KeyCode::Char('h') => Command::Focus(Pane::All),
            KeyCode::Char('2') | KeyCode::Right | KeyCode::Char('l') => {
                Command::Focus(Pane::Favorites)
            }
            KeyCode::Enter => Command::Activate,
            KeyCode::Char('p') | KeyCode::Char(' ') => Command::PlayPause,
            KeyCode::Char('s') => Command::Stop,
            KeyCode::Char('f') => Command::Favorite,
            KeyCode::Char('u') => Command::Unfavorite,
            KeyCode::Char('x') => Command::RemoveFromAll,
            KeyCode::Char('d') | KeyCode::Delete => Command::RemoveSelected,
            KeyCode::Char('w') => Command::SaveFavorites,
            KeyCode::Char('R') => Command::Rescan,
            _ => return None,
        };
        Some(cmd)
    }

    /// A left click selects the row under it; a second click on the same row
    /// soon after plays it.
    pub fn command_for_mouse<B: AudioBackend>(
        &mut self,
        mouse: MouseEvent,
        area: Rect,
        app: &App<B>,
        now: Instant,
    ) -> Option<Command> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let Some((pane, index)) = ui::row_at(area, app, mouse.column, mouse.row) else {
            self.last_click = None;
            return None;
        };

        let repeat = self.last_click.take().is_some_and(|(p, row, at)| {
            p == pane && row == mouse.row && now.duration_since(at) <= DOUBLE_CLICK
        });
        if repeat {
            return Some(Command::Activate);
        }
        self.last_click = Some((pane, mouse.row, now));
        Some(Command::Select { pane, index })
    }
}

/// Main terminal event loop: applies scan results, handles input, keeps MPRIS
/// in sync and redraws. Returns `Ok(())` when shutdown is requested.
pub fn run<B: AudioBackend>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<B>,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<Command>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if let Some(outcome) = state.scan.as_ref().and_then(ScanTask::try_recv) {
            state.scan = None;
            app.apply_scan(outcome);
        }

        app.tick();
        sync_mpris(mpris, app, state);

        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_flow(app.dispatch(cmd), settings, app, state) {
                return Ok(());
            }
        }

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let cmd = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => state.command_for_key(key),
            Event::Mouse(mouse) => {
                let size = terminal.size()?;
                let area = Rect::new(0, 0, size.width, size.height);
                state.command_for_mouse(mouse, area, app, Instant::now())
            }
            _ => None,
        };
        if let Some(cmd) = cmd {
            if handle_flow(app.dispatch(cmd), settings, app, state) {
                break;
            }
        }
    }

    Ok(())
}

/// Carry out what `dispatch` asked for. Returns `true` on quit.
fn handle_flow<B: AudioBackend>(
    flow: Flow,
    settings: &config::Settings,
    app: &App<B>,
    state: &mut EventLoopState,
) -> bool {
    match flow {
        Flow::Continue => false,
        Flow::StartScan => {
            state.cancel_scan();
            state.scan = Some(spawn_scan(
                app.root().to_path_buf(),
                settings.library.clone(),
            ));
            false
        }
        Flow::Quit => true,
    }
}

// Media keys and end-of-file change playback outside of key handling, so
// compare against what was last published.
fn sync_mpris<B: AudioBackend>(mpris: &MprisHandle, app: &App<B>, state: &mut EventLoopState) {
    let status = app.player().status();
    let path = app.player().current().map(|f| f.path().to_path_buf());
    if status != state.last_mpris_status || path != state.last_mpris_path {
        update_mpris(mpris, app);
        state.last_mpris_status = status;
        state.last_mpris_path = path;
    }
}
