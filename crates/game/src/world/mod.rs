mod entity;
mod match_state;

pub use entity::{Ball, Paddle, Role, Score};
pub use match_state::{MatchConfig, MatchState};

// The authority speaks in top-left coordinates; everything local is centered.

#[inline]
pub fn top_left_to_center(top_left: f32, extent: f32) -> f32 {
    top_left + extent / 2.0
}

#[inline]
pub fn center_to_top_left(center: f32, extent: f32) -> f32 {
    center - extent / 2.0
}
