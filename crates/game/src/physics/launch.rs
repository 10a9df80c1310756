use glam::Vec2;
use rand::Rng;

pub const MIN_ANGLE_FROM_HORIZONTAL: f32 = 10.0;
pub const MIN_ANGLE_FROM_VERTICAL: f32 = 10.0;

pub fn is_degenerate_angle(degrees: f32) -> bool {
    let folded = degrees.rem_euclid(180.0);

    let near_vertical = (90.0 - MIN_ANGLE_FROM_VERTICAL..=90.0 + MIN_ANGLE_FROM_VERTICAL)
        .contains(&folded);
    let near_horizontal = folded <= MIN_ANGLE_FROM_HORIZONTAL
        || folded >= 180.0 - MIN_ANGLE_FROM_HORIZONTAL;

    near_vertical || near_horizontal
}

/// Draws angles uniformly from `[0, 360)` until one is playable.
pub fn sample_launch_angle<R: Rng>(rng: &mut R) -> f32 {
    loop {
        let angle = rng.gen_range(0.0..360.0);
        if !is_degenerate_angle(angle) {
            return angle;
        }
    }
}

/// Velocity pointing along `degrees`, with y growing downwards.
pub fn velocity_from_angle(degrees: f32, speed: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()) * speed
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn rejects_near_axis_angles() {
        for angle in [0.0, 5.0, 10.0, 80.0, 90.0, 100.0, 170.0, 180.0, 185.0, 270.0, 355.0] {
            assert!(is_degenerate_angle(angle), "{angle} should be rejected");
        }
        for angle in [11.0, 45.0, 79.0, 101.0, 135.0, 169.0, 200.0, 315.0] {
            assert!(!is_degenerate_angle(angle), "{angle} should be accepted");
        }
    }

    #[test]
    fn sampled_angles_are_never_degenerate() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let angle = sample_launch_angle(&mut rng);
            assert!((0.0..360.0).contains(&angle));

            let folded = angle % 180.0;
            assert!(!(80.0..=100.0).contains(&folded), "{angle}");
            assert!(folded > 10.0 && folded < 170.0, "{angle}");
        }
    }

    #[test]
    fn velocity_keeps_speed() {
        let v = velocity_from_angle(45.0, 200.0);
        assert!((v.length() - 200.0).abs() < 1e-3);
        assert!(v.x > 0.0 && v.y > 0.0);
    }
}
