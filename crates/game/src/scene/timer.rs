#[derive(Debug, Clone)]
pub struct DelayedTransition {
    remaining: f32,
    state: TimerState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Pending,
    Fired,
    Cancelled,
}

impl DelayedTransition {
    pub fn new(delay_secs: f32) -> Self {
        Self {
            remaining: delay_secs.max(0.0),
            state: TimerState::Pending,
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_pending(&self) -> bool {
        self.state == TimerState::Pending
    }

    pub fn cancel(&mut self) {
        if self.state == TimerState::Pending {
            self.state = TimerState::Cancelled;
        }
    }

    /// Returns true on the call that runs the countdown out.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.state != TimerState::Pending {
            return false;
        }

        self.remaining = (self.remaining - dt).max(0.0);
        if self.remaining == 0.0 {
            self.state = TimerState::Fired;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_exactly_once() {
        let mut timer = DelayedTransition::new(1.0);
        assert!(!timer.advance(0.5));
        assert!(timer.advance(0.75));
        assert!(!timer.advance(1.0));
        assert!(!timer.is_pending());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timer = DelayedTransition::new(0.1);
        timer.cancel();
        assert!(!timer.advance(1.0));
        assert!(!timer.is_pending());
    }
}
