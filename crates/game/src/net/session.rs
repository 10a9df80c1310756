use glam::Vec2;

use crate::world::{MatchConfig, Role};

use super::connection::{Connection, ConnectionState};
use super::protocol::{MatchSettings, PlayerAssignment, Point};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProtocolSequenceError {
    #[error("GAME_START received without player role assigned")]
    StartWithoutRole,
    #[error("GAME_START received for a match already in progress")]
    DuplicateStart,
    #[error("role already assigned as {assigned}, ignoring assignment as {offered}")]
    DuplicateAssignment { assigned: Role, offered: Role },
}

impl From<Point> for Vec2 {
    fn from(point: Point) -> Self {
        Vec2::new(point.x, point.y)
    }
}

impl From<&MatchSettings> for MatchConfig {
    fn from(settings: &MatchSettings) -> Self {
        Self {
            paddle_width: settings.paddle_width,
            paddle_height: settings.paddle_height,
            paddle_speed: settings.paddle_speed,
            ball_size: settings.ball_size,
            initial_left: settings.initial_player1.into(),
            initial_right: settings.initial_player2.into(),
            initial_ball: settings.initial_ball.into(),
        }
    }
}

pub struct Session {
    connection: Connection,
    role: Option<Role>,
    config: Option<MatchConfig>,
    started: bool,
}

impl Session {
    pub fn new(connection: Connection) -> Self {
        Self {
            connection,
            role: None,
            config: None,
            started: false,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn config(&self) -> Option<&MatchConfig> {
        self.config.as_ref()
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.connection
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    pub fn assign(
        &mut self,
        assignment: &PlayerAssignment,
    ) -> Result<(Role, &MatchConfig), ProtocolSequenceError> {
        if let Some(assigned) = self.role {
            return Err(ProtocolSequenceError::DuplicateAssignment {
                assigned,
                offered: assignment.player_role,
            });
        }

        log::info!("Assigned role: {}", assignment.player_role);
        self.role = Some(assignment.player_role);
        let config = self.config.insert(MatchConfig::from(&assignment.settings));
        Ok((assignment.player_role, config))
    }

    pub fn start(&mut self) -> Result<(), ProtocolSequenceError> {
        if self.role.is_none() {
            return Err(ProtocolSequenceError::StartWithoutRole);
        }
        if self.started {
            return Err(ProtocolSequenceError::DuplicateStart);
        }
        self.started = true;
        Ok(())
    }

    pub fn close(&mut self) {
        self.connection.close();
    }
}
