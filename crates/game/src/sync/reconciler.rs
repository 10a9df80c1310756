use glam::Vec2;

use crate::net::{
    BallState, GameStart, GameState, ProtocolSequenceError, ResetBall, ServerMessage, Session,
};
use crate::world::{MatchState, Role, Score, top_left_to_center};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    Assigned(Role),
    Started,
    Snapshot,
    ScoreChanged,
    BallReset,
    OpponentLeft,
    Ignored,
}

/// There is no blending: the last snapshot received wins, including for the
/// paddle the local player is predicting. Snapshots carry no sequence number,
/// so a reordered snapshot would also win.
#[derive(Debug, Default)]
pub struct StateReconciler {
    snapshots: u64,
}

impl StateReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots_applied(&self) -> u64 {
        self.snapshots
    }

    pub fn apply(
        &mut self,
        message: &ServerMessage,
        session: &mut Session,
        state: &mut MatchState,
    ) -> Result<Reconciled, ProtocolSequenceError> {
        match message {
            ServerMessage::PlayerAssignment(assignment) => {
                let (role, config) = session.assign(assignment)?;
                state.configure(config, role);
                log::debug!("Match configured for {} player: {:?}", role, config);
                Ok(Reconciled::Assigned(role))
            }
            ServerMessage::GameStart(start) => {
                session.start()?;
                apply_start(start, state);
                log::debug!("Match started, ball at {}", state.ball.position);
                Ok(Reconciled::Started)
            }
            ServerMessage::GameState(snapshot) => {
                apply_snapshot(snapshot, state);
                self.snapshots += 1;
                log::trace!("Snapshot {} applied", self.snapshots);
                Ok(Reconciled::Snapshot)
            }
            ServerMessage::ScoreUpdate(update) => {
                state.score = Score::new(update.score_left, update.score_right);
                log::debug!("Score is now {}", state.score);
                Ok(Reconciled::ScoreChanged)
            }
            ServerMessage::ResetBall(reset) => {
                apply_reset(reset, state);
                log::debug!("Ball reset to {}", state.ball.position);
                Ok(Reconciled::BallReset)
            }
            ServerMessage::OpponentDisconnected => Ok(Reconciled::OpponentLeft),
            ServerMessage::Unknown { kind } => {
                log::debug!("Ignoring unknown message type {}", kind);
                Ok(Reconciled::Ignored)
            }
        }
    }
}

fn ball_center(x: f32, y: f32, size: f32) -> Vec2 {
    Vec2::new(top_left_to_center(x, size), top_left_to_center(y, size))
}

fn apply_start(start: &GameStart, state: &mut MatchState) {
    let position = ball_center(start.initial_ball_x, start.initial_ball_y, state.ball.size);
    let velocity = Vec2::new(start.initial_ball_velocity_x, start.initial_ball_velocity_y);
    state.reset_ball(position, velocity);
    state.score = Score::default();
}

fn apply_snapshot(snapshot: &GameState, state: &mut MatchState) {
    let BallState { x, y, vx, vy } = snapshot.ball;
    let position = ball_center(x, y, state.ball.size);
    state.reset_ball(position, Vec2::new(vx, vy));

    for (role, paddle_state) in [
        (Role::Left, snapshot.player1),
        (Role::Right, snapshot.player2),
    ] {
        let paddle = state.paddle_mut(role);
        paddle.position.y = top_left_to_center(paddle_state.y, paddle.height);
    }

    state.score = Score::new(snapshot.score.player1, snapshot.score.player2);
}

fn apply_reset(reset: &ResetBall, state: &mut MatchState) {
    let position = ball_center(reset.x, reset.y, state.ball.size);
    state.reset_ball(position, Vec2::new(reset.velocity_x, reset.velocity_y));
}
