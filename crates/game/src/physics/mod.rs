mod engine;
mod launch;

pub use engine::{LocalPhysicsEngine, PhysicsEvent, SPEED_UP};
pub use launch::{is_degenerate_angle, sample_launch_angle, velocity_from_angle};
