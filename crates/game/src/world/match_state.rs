use glam::Vec2;

use crate::config::ArenaConfig;

use super::entity::{Ball, Paddle, Role, Score};
use super::top_left_to_center;

/// Positions are top-left-relative, exactly as they arrive on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub ball_size: f32,
    pub initial_left: Vec2,
    pub initial_right: Vec2,
    pub initial_ball: Vec2,
}

#[derive(Debug, Clone)]
pub struct MatchState {
    pub arena: ArenaConfig,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub score: Score,
}

impl MatchState {
    pub fn new(arena: ArenaConfig) -> Self {
        let center = arena.center();
        let left = Paddle::new(
            Role::Left,
            Vec2::new(arena.left_paddle_x, center.y),
            arena.paddle_width,
            arena.paddle_height,
            arena.paddle_speed,
        );
        let right = Paddle::new(
            Role::Right,
            Vec2::new(arena.right_paddle_x, center.y),
            arena.paddle_width,
            arena.paddle_height,
            arena.paddle_speed,
        );
        let ball = Ball::new(center, arena.ball_size);

        Self {
            arena,
            left,
            right,
            ball,
            score: Score::default(),
        }
    }

    pub fn paddle(&self, role: Role) -> &Paddle {
        match role {
            Role::Left => &self.left,
            Role::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, role: Role) -> &mut Paddle {
        match role {
            Role::Left => &mut self.left,
            Role::Right => &mut self.right,
        }
    }

    pub fn configure(&mut self, config: &MatchConfig, local: Role) {
        for (role, initial) in [
            (Role::Left, config.initial_left),
            (Role::Right, config.initial_right),
        ] {
            let paddle = self.paddle_mut(role);
            paddle.width = config.paddle_width;
            paddle.height = config.paddle_height;
            paddle.speed = config.paddle_speed;
            paddle.position = Vec2::new(
                top_left_to_center(initial.x, config.paddle_width),
                top_left_to_center(initial.y, config.paddle_height),
            );
            paddle.highlighted = role == local;
        }

        self.ball.size = config.ball_size;
        self.ball.position = Vec2::new(
            top_left_to_center(config.initial_ball.x, config.ball_size),
            top_left_to_center(config.initial_ball.y, config.ball_size),
        );
        self.ball.velocity = Vec2::ZERO;
    }

    pub fn reset_ball(&mut self, position: Vec2, velocity: Vec2) {
        self.ball.position = position;
        self.ball.velocity = velocity;
    }
}
