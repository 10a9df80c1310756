mod screens;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use volley::{ClientConfig, FixedTimestep, MenuOption, Scene, SceneController};

use crate::input::{HeldKeys, paddle_flag};
use crate::stats::FrameStats;

const FRAME_BUDGET: Duration = Duration::from_millis(8);

pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    enhanced_keys: bool,
    scenes: SceneController,
    keys: HeldKeys,
    timestep: FixedTimestep,
    stats: FrameStats,
}

impl Tui {
    pub fn new(config: ClientConfig) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

        let enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced_keys {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        log::debug!("Key release reporting: {}", enhanced_keys);

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            enhanced_keys,
            timestep: FixedTimestep::new(config.tick_rate),
            scenes: SceneController::new(config),
            keys: HeldKeys::new(enhanced_keys),
            stats: FrameStats::new(),
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        let mut last = Instant::now();

        while !self.scenes.should_quit() {
            self.draw()?;

            if event::poll(FRAME_BUDGET)? {
                while event::poll(Duration::ZERO)? {
                    if let Event::Key(key) = event::read()? {
                        self.handle_key(key);
                    }
                }
            }

            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f32();
            last = now;

            self.stats.record_frame(dt);
            self.step(dt, now);
        }

        Ok(())
    }

    fn step(&mut self, dt: f32, now: Instant) {
        let was_in_match = self.scenes.scene() == Scene::InMatch;
        self.scenes.update(dt);

        if self.scenes.scene() != Scene::InMatch {
            if was_in_match {
                self.keys.clear();
            }
            self.timestep.reset();
            return;
        }

        self.timestep.accumulate(dt);
        while self.timestep.consume_tick() {
            let input = self.keys.input(now);
            self.scenes.tick(input, self.timestep.dt());
            self.stats.record_tick(now);
        }
    }

    fn draw(&mut self) -> io::Result<()> {
        let scenes = &self.scenes;
        let stats = &self.stats;
        let target_rate = self.timestep.tick_rate();

        self.terminal.draw(|frame| {
            screens::render(frame, scenes, stats, target_rate);
        })?;

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.scenes.select(MenuOption::Quit);
            return;
        }

        if self.scenes.scene() == Scene::InMatch {
            if let Some(flag) = paddle_flag(key.code) {
                self.keys.handle(flag, key.kind, Instant::now());
                return;
            }
        }

        if key.kind == KeyEventKind::Release {
            return;
        }

        match self.scenes.scene() {
            Scene::Menu => self.handle_menu_key(key.code),
            Scene::Connecting | Scene::WaitingForOpponent | Scene::InMatch => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    self.scenes.leave();
                }
            }
            Scene::Disconnected => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
                    self.scenes.leave();
                }
            }
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => self.scenes.menu_up(),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => self.scenes.menu_down(),
            KeyCode::Enter => self.scenes.confirm(),
            KeyCode::Char('1') => self.scenes.select(MenuOption::SinglePlayer),
            KeyCode::Char('2') => self.scenes.select(MenuOption::Multiplayer),
            KeyCode::Char('q') | KeyCode::Esc => self.scenes.select(MenuOption::Quit),
            _ => {}
        }
    }

    pub fn restore_terminal(&mut self) -> io::Result<()> {
        if self.enhanced_keys {
            execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
            self.enhanced_keys = false;
        }
        terminal::disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

pub fn run(config: ClientConfig, single_player: bool) -> io::Result<()> {
    let mut tui = Tui::new(config)?;
    if single_player {
        tui.scenes.select(MenuOption::SinglePlayer);
    }

    let result = tui.run();
    tui.restore_terminal()?;
    result
}
