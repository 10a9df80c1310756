use crate::net::ClientMessage;
use crate::world::{MatchState, Role, center_to_top_left};

use super::PaddleInput;

/// Moves the locally owned paddle immediately and tells the authority where
/// it ended up. Whatever the authority says next wins.
#[derive(Debug, Clone, Copy)]
pub struct PredictiveInputController {
    role: Role,
}

impl PredictiveInputController {
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn apply(&self, input: PaddleInput, state: &mut MatchState) -> Option<ClientMessage> {
        let arena_height = state.arena.height;
        let paddle = state.paddle_mut(self.role);

        let half = paddle.half_height();
        let top_limit = half;
        let bottom_limit = arena_height - half;

        let before = paddle.position.y;
        let mut y = before;
        match input.direction() {
            d if d < 0.0 && y > top_limit => y -= paddle.speed,
            d if d > 0.0 && y < bottom_limit => y += paddle.speed,
            _ => {}
        }
        y = y.clamp(top_limit, bottom_limit.max(top_limit));

        if y == before {
            return None;
        }

        paddle.position.y = y;
        log::trace!("{} paddle predicted at {}", self.role, y);

        Some(ClientMessage::PlayerMove {
            y: center_to_top_left(y, paddle.height),
        })
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::config::ArenaConfig;
    use crate::world::MatchConfig;

    fn multiplayer_state(local: Role) -> MatchState {
        let mut state = MatchState::new(ArenaConfig::default());
        state.configure(
            &MatchConfig {
                paddle_width: 15.0,
                paddle_height: 100.0,
                paddle_speed: 5.0,
                ball_size: 10.0,
                initial_left: Vec2::new(20.0, 200.0),
                initial_right: Vec2::new(765.0, 200.0),
                initial_ball: Vec2::new(400.0, 250.0),
            },
            local,
        );
        state
    }

    #[test]
    fn moves_local_paddle_and_reports_top_left() {
        let mut state = multiplayer_state(Role::Right);
        let controller = PredictiveInputController::new(Role::Right);

        let message = controller.apply(PaddleInput::DOWN, &mut state);
        assert_eq!(state.right.position.y, 255.0);
        assert_eq!(message, Some(ClientMessage::PlayerMove { y: 205.0 }));
        assert_eq!(state.left.position.y, 250.0);
    }

    #[test]
    fn idle_input_sends_nothing() {
        let mut state = multiplayer_state(Role::Left);
        let controller = PredictiveInputController::new(Role::Left);

        assert_eq!(controller.apply(PaddleInput::empty(), &mut state), None);
        assert_eq!(
            controller.apply(PaddleInput::UP | PaddleInput::DOWN, &mut state),
            None
        );
        assert_eq!(state.left.position.y, 250.0);
    }

    #[test]
    fn pinned_at_edge_sends_nothing() {
        let mut state = multiplayer_state(Role::Left);
        state.left.position.y = 50.0;
        let controller = PredictiveInputController::new(Role::Left);

        assert_eq!(controller.apply(PaddleInput::UP, &mut state), None);
        assert_eq!(state.left.position.y, 50.0);
    }

    #[test]
    fn paddle_never_leaves_the_field() {
        let mut state = multiplayer_state(Role::Left);
        let controller = PredictiveInputController::new(Role::Left);
        let half = state.left.half_height();
        let height = state.arena.height;

        let pattern = [
            PaddleInput::UP,
            PaddleInput::UP,
            PaddleInput::DOWN,
            PaddleInput::empty(),
        ];
        for i in 0..500 {
            let input = if i < 200 {
                PaddleInput::UP
            } else if i < 400 {
                PaddleInput::DOWN
            } else {
                pattern[i % pattern.len()]
            };

            controller.apply(input, &mut state);
            let y = state.left.position.y;
            assert!(y >= half && y <= height - half, "tick {i}: {y}");
        }
    }

    #[test]
    fn clamps_partial_step_at_edge() {
        let mut state = multiplayer_state(Role::Left);
        state.left.position.y = 447.0;
        let controller = PredictiveInputController::new(Role::Left);

        let message = controller.apply(PaddleInput::DOWN, &mut state);
        assert_eq!(state.left.position.y, 450.0);
        assert_eq!(message, Some(ClientMessage::PlayerMove { y: 400.0 }));
    }
}
