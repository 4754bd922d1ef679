mod ui;

use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use kidkeys::{
    app_dirs::AppDirs,
    celebration::Celebration,
    config::{Config, ConfigStore, FileConfigStore},
    level::LevelId,
    logging,
    runtime::{
        AppEvent, CrosstermEventSource, EffectExecutor, EventSource, FixedTicker, Runner, Ticker,
    },
    stats::{MemoryProgressStore, Stats},
    tutor::{Effect, Tutor, TutorEvent},
    word_source::WordBank,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    io::{self, stdin},
    path::PathBuf,
    sync::Arc,
    time::Duration,
};
use tracing::{debug, info, warn};

const TICK_RATE_MS: u64 = 100;

/// a friendly typing tutor for kids
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A friendly typing tutor for kids: type the word on screen, get a cheer for every success, and follow the glowing key to find the right finger."
)]
pub struct Cli {
    /// level to play (letters, easy, animals, colors, numbers, family)
    #[clap(short = 'l', long, value_parser = parse_level)]
    level: Option<LevelId>,

    /// milliseconds to wait after a correct word before showing the next one
    #[clap(long)]
    auto_advance_ms: Option<u64>,

    /// hide the "which finger" hint under the keyboard
    #[clap(long)]
    no_guidance: bool,

    /// write logs to this file instead of the default state directory
    #[clap(long)]
    log_file: Option<PathBuf>,
}

fn parse_level(raw: &str) -> Result<LevelId, String> {
    Ok(LevelId::parse(raw))
}

impl Cli {
    /// Command line values win over the config file.
    fn apply(&self, config: &mut Config) {
        if let Some(level) = &self.level {
            config.level = level.clone();
        }
        if let Some(ms) = self.auto_advance_ms {
            config.auto_advance_ms = ms;
        }
        if self.no_guidance {
            config.finger_guidance = false;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    Quit,
    Dispatch(TutorEvent),
    Redraw,
    Ignore,
}

#[derive(Debug)]
pub struct App {
    pub tutor: Tutor,
    pub celebration: Celebration,
    pub level_picker: bool,
}

impl App {
    pub fn new(tutor: Tutor) -> Self {
        Self {
            tutor,
            celebration: Celebration::default(),
            level_picker: false,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> KeyAction {
        if key.kind != KeyEventKind::Press {
            return KeyAction::Ignore;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if self.level_picker {
            return match key.code {
                KeyCode::Esc | KeyCode::F(2) => {
                    self.level_picker = false;
                    KeyAction::Redraw
                }
                KeyCode::Char(c @ '1'..='6') => {
                    self.level_picker = false;
                    let idx = c as usize - '1' as usize;
                    KeyAction::Dispatch(TutorEvent::ChangeLevel(LevelId::KNOWN[idx].clone()))
                }
                _ => KeyAction::Ignore,
            };
        }

        match key.code {
            KeyCode::Esc => KeyAction::Quit,
            KeyCode::Enter if self.tutor.session.is_active() => {
                KeyAction::Dispatch(TutorEvent::Submit)
            }
            KeyCode::Enter => KeyAction::Dispatch(TutorEvent::Start),
            KeyCode::Tab => KeyAction::Dispatch(TutorEvent::NextWord),
            KeyCode::F(2) => {
                self.level_picker = true;
                KeyAction::Redraw
            }
            KeyCode::Backspace => KeyAction::Dispatch(TutorEvent::Backspace),
            KeyCode::Char(c) => KeyAction::Dispatch(TutorEvent::Char(c)),
            _ => KeyAction::Ignore,
        }
    }

    fn dispatch(&mut self, event: TutorEvent, executor: &EffectExecutor) {
        let effects = self.tutor.handle(event);
        self.run_effects(effects, executor);
    }

    fn run_effects(&mut self, effects: Vec<Effect>, executor: &EffectExecutor) {
        for effect in effects {
            if let Some(ui_effect) = executor.execute(effect) {
                self.apply_ui_effect(ui_effect);
            }
        }
    }

    fn apply_ui_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Celebrate => self.celebration.start(),
            // the input line is the only focusable thing on screen
            Effect::FocusInput => {}
            other => debug!(?other, "effect not handled by the ui"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(log_path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        if let Err(err) = logging::init_tracing(&log_path) {
            eprintln!("kidkeys: logging disabled: {err:#}");
        }
    }

    let config_store = FileConfigStore::new();
    let mut config = config_store.load();
    cli.apply(&mut config);
    info!(level = %config.level, "starting kidkeys");

    let words = WordBank::builtin().context("loading built-in word lists")?;
    let progress = MemoryProgressStore::with_stats(Stats {
        level: config.level.clone(),
        ..Stats::default()
    });
    let mut app = App::new(Tutor::new(config.session_config(), config.level.clone()));

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    let events = CrosstermEventSource::new();
    let executor = EffectExecutor::new(Arc::new(words), Arc::new(progress), events.sender());
    let runner = Runner::new(events, FixedTicker::new(Duration::from_millis(TICK_RATE_MS)));

    let result = run_app(&mut terminal, &mut app, &runner, &executor);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    config.level = app.tutor.session.level.clone();
    if let Err(err) = config_store.save(&config) {
        warn!(error = %err, path = %config_store.path().display(), "could not save config");
    }
    info!("kidkeys exiting");

    result
}

fn run_app<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
    executor: &EffectExecutor,
) -> anyhow::Result<()> {
    let effects = app.tutor.initialize();
    app.run_effects(effects, executor);
    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        match runner.step() {
            AppEvent::Tick => {
                // keep animating while the bounce runs, plus one frame to settle
                let ended = app.celebration.update();
                if ended || app.celebration.is_active() {
                    terminal.draw(|f| ui::draw(app, f))?;
                }
            }
            AppEvent::Resize => {
                terminal.draw(|f| ui::draw(app, f))?;
            }
            AppEvent::Tutor(event) => {
                app.dispatch(event, executor);
                terminal.draw(|f| ui::draw(app, f))?;
            }
            AppEvent::Key(key) => match app.on_key(key) {
                KeyAction::Quit => {
                    app.dispatch(TutorEvent::Stop, executor);
                    break;
                }
                KeyAction::Dispatch(event) => {
                    app.dispatch(event, executor);
                    terminal.draw(|f| ui::draw(app, f))?;
                }
                KeyAction::Redraw => {
                    terminal.draw(|f| ui::draw(app, f))?;
                }
                KeyAction::Ignore => {}
            },
        }
    }

    Ok(())
}
