use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Left,
    Right,
}

impl Role {
    pub fn opponent(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub role: Role,
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub highlighted: bool,
}

impl Paddle {
    pub fn new(role: Role, position: Vec2, width: f32, height: f32, speed: f32) -> Self {
        Self {
            role,
            position,
            width,
            height,
            speed,
            highlighted: false,
        }
    }

    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }

    pub fn top(&self) -> f32 {
        self.position.y - self.half_height()
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.half_height()
    }

    pub fn left(&self) -> f32 {
        self.position.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.width / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
}

impl Ball {
    pub fn new(position: Vec2, size: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
        }
    }

    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    pub fn top(&self) -> f32 {
        self.position.y - self.radius()
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.radius()
    }

    pub fn left(&self) -> f32 {
        self.position.x - self.radius()
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.radius()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn new(left: u32, right: u32) -> Self {
        Self { left, right }
    }

    pub fn award(&mut self, role: Role) {
        match role {
            Role::Left => self.left += 1,
            Role::Right => self.right += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.left + self.right
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.left, self.right)
    }
}
