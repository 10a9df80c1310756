use std::fmt;

use crate::config::ClientConfig;
use crate::net::{
    Connection, ConnectionState, NetworkStats, ProtocolSequenceError, ServerMessage, Session,
    SessionEvent,
};
use crate::physics::LocalPhysicsEngine;
use crate::player::{PaddleInput, PredictiveInputController};
use crate::sync::{Reconciled, StateReconciler};
use crate::world::{MatchState, Role};

use super::menu::{Menu, MenuOption};
use super::timer::DelayedTransition;

pub const STATUS_SELECT_MODE: &str = "Select a mode";
pub const STATUS_CONNECTING: &str = "Connecting to server...";
pub const STATUS_WAITING: &str = "Waiting for opponent...";
pub const STATUS_CONNECT_ERROR: &str = "Connection error. Please try again.";
pub const STATUS_DISCONNECTED: &str = "Disconnected. Please try again.";
pub const STATUS_ROLE_MISSING: &str = "Error: Role not assigned before game start.";
pub const STATUS_ALREADY_CONNECTING: &str = "Already connecting or connected.";
pub const STATUS_OPPONENT_LEFT: &str = "Opponent disconnected.";
pub const STATUS_CONNECTION_LOST: &str = "Connection lost.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Menu,
    Connecting,
    WaitingForOpponent,
    InMatch,
    Disconnected,
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Menu => "menu",
            Self::Connecting => "connecting",
            Self::WaitingForOpponent => "waiting for opponent",
            Self::InMatch => "in match",
            Self::Disconnected => "disconnected",
        };
        f.write_str(name)
    }
}

pub enum Mode {
    SinglePlayer(LocalPhysicsEngine),
    Multiplayer {
        session: Session,
        reconciler: StateReconciler,
    },
}

pub type Connector = Box<dyn FnMut(&str) -> Connection>;

pub struct SceneController {
    config: ClientConfig,
    connector: Connector,
    scene: Scene,
    status: String,
    menu: Menu,
    mode: Option<Mode>,
    state: MatchState,
    controller: Option<PredictiveInputController>,
    return_to_menu: Option<DelayedTransition>,
    quit: bool,
}

impl SceneController {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_connector(config, Box::new(|url: &str| Connection::open(url)))
    }

    pub fn with_connector(config: ClientConfig, connector: Connector) -> Self {
        let state = MatchState::new(config.arena.clone());
        Self {
            config,
            connector,
            scene: Scene::Menu,
            status: STATUS_SELECT_MODE.to_string(),
            menu: Menu::default(),
            mode: None,
            state,
            controller: None,
            return_to_menu: None,
            quit: false,
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn match_state(&self) -> &MatchState {
        &self.state
    }

    pub fn mode(&self) -> Option<&Mode> {
        self.mode.as_ref()
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.mode {
            Some(Mode::Multiplayer { session, .. }) => Some(session),
            _ => None,
        }
    }

    pub fn local_role(&self) -> Option<Role> {
        self.controller.map(|c| c.role())
    }

    pub fn network_stats(&self) -> Option<NetworkStats> {
        self.session().map(|s| *s.connection().stats())
    }

    pub fn pending_return(&self) -> Option<f32> {
        self.return_to_menu
            .as_ref()
            .filter(|t| t.is_pending())
            .map(DelayedTransition::remaining)
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn menu_up(&mut self) {
        if self.scene == Scene::Menu {
            self.menu.move_up();
        }
    }

    pub fn menu_down(&mut self) {
        if self.scene == Scene::Menu {
            self.menu.move_down();
        }
    }

    pub fn confirm(&mut self) {
        match self.scene {
            Scene::Menu => self.select(self.menu.selected_option()),
            Scene::Disconnected => self.leave(),
            _ => {}
        }
    }

    pub fn select(&mut self, option: MenuOption) {
        match option {
            MenuOption::SinglePlayer => self.start_single_player(),
            MenuOption::Multiplayer => self.start_multiplayer(),
            MenuOption::Quit => {
                log::info!("Quit requested");
                self.leave();
                self.quit = true;
            }
        }
    }

    pub fn leave(&mut self) {
        if self.scene != Scene::Menu {
            log::info!("Leaving {}", self.scene);
        }
        self.teardown();
        self.go_to_menu(STATUS_SELECT_MODE);
    }

    pub fn update(&mut self, dt: f32) {
        self.poll_session();

        let fired = self
            .return_to_menu
            .as_mut()
            .is_some_and(|timer| timer.advance(dt));
        if fired {
            self.go_to_menu(STATUS_SELECT_MODE);
        }
    }

    pub fn tick(&mut self, input: PaddleInput, dt: f32) {
        if self.scene != Scene::InMatch {
            return;
        }
        let Some(controller) = self.controller else {
            return;
        };

        let moved = controller.apply(input, &mut self.state);
        match &mut self.mode {
            Some(Mode::SinglePlayer(engine)) => {
                engine.step(&mut self.state, dt);
            }
            Some(Mode::Multiplayer { session, .. }) => {
                if let Some(message) = moved {
                    session.connection_mut().send(&message);
                }
            }
            None => {}
        }
    }

    fn start_single_player(&mut self) {
        if self.scene != Scene::Menu {
            return;
        }

        log::info!("Starting single-player match");
        self.state = MatchState::new(self.config.arena.clone());
        self.state.left.highlighted = true;

        let mut engine = LocalPhysicsEngine::new();
        engine.serve(&mut self.state);

        self.mode = Some(Mode::SinglePlayer(engine));
        self.controller = Some(PredictiveInputController::new(Role::Left));
        self.scene = Scene::InMatch;
        self.status.clear();
    }

    fn start_multiplayer(&mut self) {
        let busy = self
            .session()
            .is_some_and(|s| s.connection_state() != ConnectionState::Disconnected);
        if busy {
            log::warn!("Multiplayer requested while a session is active");
            self.status = STATUS_ALREADY_CONNECTING.to_string();
            return;
        }
        if self.scene != Scene::Menu {
            return;
        }

        let connection = (self.connector)(&self.config.server_url);
        self.state = MatchState::new(self.config.arena.clone());
        self.mode = Some(Mode::Multiplayer {
            session: Session::new(connection),
            reconciler: StateReconciler::new(),
        });
        self.controller = None;
        self.scene = Scene::Connecting;
        self.status = STATUS_CONNECTING.to_string();
    }

    fn poll_session(&mut self) {
        let events = match &mut self.mode {
            Some(Mode::Multiplayer { session, .. }) => session.connection_mut().poll(),
            _ => return,
        };

        for event in events {
            // A teardown earlier in the batch drops the session; the rest
            // belongs to a connection that no longer exists.
            if self.session().is_none() {
                break;
            }
            self.handle_session_event(event);
        }
    }

    fn handle_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Open => {
                if self.scene == Scene::Connecting {
                    self.status = STATUS_WAITING.to_string();
                }
            }
            SessionEvent::Message(message) => self.handle_message(&message),
            SessionEvent::Error(error) => {
                log::warn!("Session error while {}: {}", self.scene, error);
                self.connection_ended(STATUS_CONNECT_ERROR);
            }
            SessionEvent::Close => {
                log::info!("Session closed while {}", self.scene);
                self.connection_ended(STATUS_DISCONNECTED);
            }
        }
    }

    fn handle_message(&mut self, message: &ServerMessage) {
        let Some(Mode::Multiplayer {
            session,
            reconciler,
        }) = &mut self.mode
        else {
            return;
        };

        match reconciler.apply(message, session, &mut self.state) {
            Ok(Reconciled::Assigned(role)) => {
                self.controller = Some(PredictiveInputController::new(role));
                if self.scene == Scene::Connecting {
                    self.scene = Scene::WaitingForOpponent;
                }
                self.status = format!("You are player: {}. Waiting for game start.", role);
            }
            Ok(Reconciled::Started) => {
                if self.scene == Scene::WaitingForOpponent {
                    log::info!("Match started");
                    self.scene = Scene::InMatch;
                    self.status.clear();
                }
            }
            Ok(Reconciled::OpponentLeft) => {
                if self.scene == Scene::InMatch {
                    log::info!("Opponent disconnected");
                    self.end_match(STATUS_OPPONENT_LEFT);
                } else {
                    log::debug!("Opponent disconnect ignored while {}", self.scene);
                }
            }
            Ok(_) => {}
            Err(error @ ProtocolSequenceError::StartWithoutRole) => {
                log::error!("{}", error);
                self.status = STATUS_ROLE_MISSING.to_string();
            }
            Err(error) => log::error!("{}", error),
        }
    }

    fn connection_ended(&mut self, status: &str) {
        match self.scene {
            Scene::InMatch => self.end_match(STATUS_CONNECTION_LOST),
            Scene::Connecting | Scene::WaitingForOpponent => {
                self.teardown();
                self.go_to_menu(status);
            }
            Scene::Menu | Scene::Disconnected => self.teardown(),
        }
    }

    fn end_match(&mut self, status: &str) {
        self.teardown();
        self.scene = Scene::Disconnected;
        self.status = status.to_string();
        self.return_to_menu = Some(DelayedTransition::new(
            self.config.return_to_menu_delay_secs,
        ));
    }

    fn teardown(&mut self) {
        if let Some(Mode::Multiplayer { session, .. }) = &mut self.mode {
            session.close();
        }
        if let Some(timer) = &mut self.return_to_menu {
            timer.cancel();
        }
        self.mode = None;
        self.controller = None;
    }

    fn go_to_menu(&mut self, status: &str) {
        log::info!("Returning to menu: {}", status);
        self.return_to_menu = None;
        self.scene = Scene::Menu;
        self.status = status.to_string();
    }
}
