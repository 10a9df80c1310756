use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::world::Role;

pub const PLAYER_MOVE: &str = "PLAYER_MOVE";
pub const PLAYER_ASSIGNMENT: &str = "PLAYER_ASSIGNMENT";
pub const GAME_START: &str = "GAME_START";
pub const GAME_STATE: &str = "GAME_STATE";
pub const SCORE_UPDATE: &str = "SCORE_UPDATE";
pub const RESET_BALL: &str = "RESET_BALL";
pub const OPPONENT_DISCONNECTED: &str = "OPPONENT_DISCONNECTED";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSettings {
    pub paddle_speed: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub ball_size: f32,
    pub initial_player1: Point,
    pub initial_player2: Point,
    pub initial_ball: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAssignment {
    pub player_role: Role,
    pub settings: MatchSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStart {
    pub initial_ball_x: f32,
    pub initial_ball_y: f32,
    pub initial_ball_velocity_x: f32,
    pub initial_ball_velocity_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleState {
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreState {
    pub player1: u32,
    pub player2: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub player1: PaddleState,
    pub player2: PaddleState,
    pub ball: BallState,
    pub score: ScoreState,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreUpdate {
    pub score_left: u32,
    pub score_right: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetBall {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    /// Paddle moved; `y` is the top edge of the paddle.
    #[serde(rename = "PLAYER_MOVE")]
    PlayerMove { y: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    PlayerAssignment(PlayerAssignment),
    GameStart(GameStart),
    GameState(GameState),
    ScoreUpdate(ScoreUpdate),
    ResetBall(ResetBall),
    OpponentDisconnected,
    Unknown { kind: String },
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed message: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("invalid {kind} payload: {source}")]
    Payload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
#[error("encoding failed: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

impl ClientMessage {
    pub fn kind(&self) -> &str {
        match self {
            Self::PlayerMove { .. } => PLAYER_MOVE,
        }
    }

    pub fn encode(&self) -> Result<String, EncodeError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(text).map_err(DecodeError::Malformed)
    }
}

impl ServerMessage {
    pub fn kind(&self) -> &str {
        match self {
            Self::PlayerAssignment(_) => PLAYER_ASSIGNMENT,
            Self::GameStart(_) => GAME_START,
            Self::GameState(_) => GAME_STATE,
            Self::ScoreUpdate(_) => SCORE_UPDATE,
            Self::ResetBall(_) => RESET_BALL,
            Self::OpponentDisconnected => OPPONENT_DISCONNECTED,
            Self::Unknown { kind } => kind.as_str(),
        }
    }

    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        let envelope: Envelope = serde_json::from_str(text).map_err(DecodeError::Malformed)?;
        let Envelope { kind, payload } = envelope;

        let message = match kind.as_str() {
            PLAYER_ASSIGNMENT => Self::PlayerAssignment(payload_of(&kind, payload)?),
            GAME_START => Self::GameStart(payload_of(&kind, payload)?),
            GAME_STATE => Self::GameState(payload_of(&kind, payload)?),
            SCORE_UPDATE => Self::ScoreUpdate(payload_of(&kind, payload)?),
            RESET_BALL => Self::ResetBall(payload_of(&kind, payload)?),
            OPPONENT_DISCONNECTED => Self::OpponentDisconnected,
            _ => Self::Unknown { kind },
        };

        Ok(message)
    }

    pub fn encode(&self) -> Result<String, EncodeError> {
        let payload = match self {
            Self::PlayerAssignment(p) => serde_json::to_value(p)?,
            Self::GameStart(p) => serde_json::to_value(p)?,
            Self::GameState(p) => serde_json::to_value(p)?,
            Self::ScoreUpdate(p) => serde_json::to_value(p)?,
            Self::ResetBall(p) => serde_json::to_value(p)?,
            Self::OpponentDisconnected | Self::Unknown { .. } => Value::Object(Default::default()),
        };

        let envelope = Envelope {
            kind: self.kind().to_string(),
            payload,
        };
        Ok(serde_json::to_string(&envelope)?)
    }
}

fn payload_of<T: DeserializeOwned>(kind: &str, payload: Value) -> Result<T, DecodeError> {
    serde_json::from_value(payload).map_err(|source| DecodeError::Payload {
        kind: kind.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_move_wire_format() {
        let text = ClientMessage::PlayerMove { y: 150.0 }.encode().unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], PLAYER_MOVE);
        assert_eq!(ClientMessage::PlayerMove { y: 150.0 }.kind(), PLAYER_MOVE);
        assert_eq!(value["payload"]["y"], 150.0);
    }

    #[test]
    fn decodes_player_assignment() {
        let text = r#"{
            "type": "PLAYER_ASSIGNMENT",
            "payload": {
                "playerRole": "right",
                "settings": {
                    "paddleSpeed": 5,
                    "paddleWidth": 15,
                    "paddleHeight": 100,
                    "ballSize": 10,
                    "initialPlayer1": {"x": 20, "y": 250},
                    "initialPlayer2": {"x": 765, "y": 250},
                    "initialBall": {"x": 400, "y": 250}
                }
            }
        }"#;

        let ServerMessage::PlayerAssignment(assignment) = ServerMessage::decode(text).unwrap()
        else {
            panic!("expected PLAYER_ASSIGNMENT");
        };
        assert_eq!(assignment.player_role, Role::Right);
        assert_eq!(assignment.settings.paddle_width, 15.0);
        assert_eq!(assignment.settings.initial_player2, Point { x: 765.0, y: 250.0 });
    }

    #[test]
    fn decodes_game_state() {
        let text = r#"{"type":"GAME_STATE","payload":{
            "player1":{"y":150},"player2":{"y":40.5},
            "ball":{"x":300,"y":200,"vx":-120,"vy":80},
            "score":{"player1":3,"player2":1}}}"#;

        let message = ServerMessage::decode(text).unwrap();
        let ServerMessage::GameState(state) = message else {
            panic!("expected GAME_STATE");
        };
        assert_eq!(state.player1.y, 150.0);
        assert_eq!(state.player2.y, 40.5);
        assert_eq!(state.ball.vx, -120.0);
        assert_eq!(state.score.player1, 3);
    }

    #[test]
    fn opponent_disconnected_without_payload() {
        let message = ServerMessage::decode(r#"{"type":"OPPONENT_DISCONNECTED"}"#).unwrap();
        assert_eq!(message, ServerMessage::OpponentDisconnected);
    }

    #[test]
    fn unknown_kind_is_not_an_error() {
        let message = ServerMessage::decode(r#"{"type":"NOT_A_REAL_TYPE","payload":{}}"#).unwrap();
        assert_eq!(
            message,
            ServerMessage::Unknown {
                kind: "NOT_A_REAL_TYPE".to_string()
            }
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            ServerMessage::decode("not json at all"),
            Err(DecodeError::Malformed(_))
        ));
        assert!(matches!(
            ServerMessage::decode(r#"{"payload":{}}"#),
            Err(DecodeError::Malformed(_))
        ));
        assert!(matches!(
            ServerMessage::decode("[1, 2, 3]"),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_known_kind_with_bad_payload() {
        let result = ServerMessage::decode(r#"{"type":"SCORE_UPDATE","payload":{"scoreLeft":"x"}}"#);
        match result {
            Err(DecodeError::Payload { kind, .. }) => assert_eq!(kind, SCORE_UPDATE),
            other => panic!("expected payload error, got {:?}", other),
        }
    }

    #[test]
    fn server_messages_survive_the_wire() {
        let message = ServerMessage::ResetBall(ResetBall {
            x: 390.0,
            y: 240.0,
            velocity_x: 150.0,
            velocity_y: -75.0,
        });
        let text = message.encode().unwrap();
        assert!(text.contains("\"velocityX\""));
        assert_eq!(ServerMessage::decode(&text).unwrap(), message);
    }
}
