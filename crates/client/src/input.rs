use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEventKind};
use volley::PaddleInput;

/// Without release events a key counts as held until this long after its
/// last press or auto-repeat.
const HOLD_TIMEOUT: Duration = Duration::from_millis(150);

pub fn paddle_flag(code: KeyCode) -> Option<PaddleInput> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(PaddleInput::UP),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(PaddleInput::DOWN),
        _ => None,
    }
}

/// Tracks which paddle directions are held down.
///
/// Terminals that support the keyboard enhancement protocol report releases;
/// everywhere else a key expires after [`HOLD_TIMEOUT`].
pub struct HeldKeys {
    pressed: HashMap<PaddleInput, Instant>,
    reports_release: bool,
}

impl HeldKeys {
    pub fn new(reports_release: bool) -> Self {
        Self {
            pressed: HashMap::new(),
            reports_release,
        }
    }

    pub fn handle(&mut self, flag: PaddleInput, kind: KeyEventKind, now: Instant) {
        if kind == KeyEventKind::Release {
            self.pressed.remove(&flag);
        } else {
            self.pressed.insert(flag, now);
        }
    }

    pub fn input(&self, now: Instant) -> PaddleInput {
        self.pressed
            .iter()
            .filter(|(_, since)| {
                self.reports_release || now.duration_since(**since) < HOLD_TIMEOUT
            })
            .fold(PaddleInput::empty(), |input, (flag, _)| input | *flag)
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_ends_hold() {
        let now = Instant::now();
        let mut keys = HeldKeys::new(true);
        keys.handle(PaddleInput::UP, KeyEventKind::Press, now);
        assert_eq!(keys.input(now + Duration::from_secs(5)), PaddleInput::UP);

        keys.handle(PaddleInput::UP, KeyEventKind::Release, now);
        assert_eq!(keys.input(now), PaddleInput::empty());
    }

    #[test]
    fn presses_expire_without_release_events() {
        let now = Instant::now();
        let mut keys = HeldKeys::new(false);
        keys.handle(PaddleInput::DOWN, KeyEventKind::Press, now);

        assert_eq!(keys.input(now + Duration::from_millis(50)), PaddleInput::DOWN);
        assert_eq!(keys.input(now + Duration::from_millis(500)), PaddleInput::empty());
    }

    #[test]
    fn maps_arrows_and_letters() {
        assert_eq!(paddle_flag(KeyCode::Char('w')), Some(PaddleInput::UP));
        assert_eq!(paddle_flag(KeyCode::Down), Some(PaddleInput::DOWN));
        assert_eq!(paddle_flag(KeyCode::Enter), None);
    }
}
