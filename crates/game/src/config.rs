use glam::Vec2;

pub const DEFAULT_SERVER_URL: &str = "ws://localhost:8080/pong";
pub const DEFAULT_TICK_RATE: u32 = 60;

/// The field spans `0..width` horizontally and `0..height` vertically. A ball
/// only counts as out once its center passes `score_margin` beyond either
/// side line.
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    pub score_margin: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub left_paddle_x: f32,
    pub right_paddle_x: f32,
    pub ball_size: f32,
    pub launch_speed: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            score_margin: 50.0,
            paddle_width: 25.0,
            paddle_height: 100.0,
            paddle_speed: 10.0,
            left_paddle_x: 50.0,
            right_paddle_x: 750.0,
            ball_size: 20.0,
            launch_speed: 200.0,
        }
    }
}

impl ArenaConfig {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn clamp_paddle_y(&self, y: f32, paddle_height: f32) -> f32 {
        let half = paddle_height / 2.0;
        y.clamp(half, (self.height - half).max(half))
    }

    pub fn left_score_line(&self) -> f32 {
        -self.score_margin
    }

    pub fn right_score_line(&self) -> f32 {
        self.width + self.score_margin
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub tick_rate: u32,
    pub return_to_menu_delay_secs: f32,
    pub arena: ArenaConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            tick_rate: DEFAULT_TICK_RATE,
            return_to_menu_delay_secs: 3.0,
            arena: ArenaConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paddle_clamp_keeps_paddle_on_field() {
        let arena = ArenaConfig::default();
        assert_eq!(arena.clamp_paddle_y(-40.0, 100.0), 50.0);
        assert_eq!(arena.clamp_paddle_y(999.0, 100.0), 450.0);
        assert_eq!(arena.clamp_paddle_y(200.0, 100.0), 200.0);
    }
}
