use volley::physics::PhysicsEvent;
use volley::{
    ArenaConfig, FixedTimestep, LocalPhysicsEngine, MatchState, PaddleInput,
    PredictiveInputController, Role,
};

fn run(
    seed: u64,
    seconds: u32,
    mut input: impl FnMut(u64) -> PaddleInput,
) -> (MatchState, u32) {
    let mut state = MatchState::new(ArenaConfig::default());
    let mut engine = LocalPhysicsEngine::seeded(seed);
    let controller = PredictiveInputController::new(Role::Left);
    let mut timestep = FixedTimestep::new(60);
    engine.serve(&mut state);

    let mut exits = 0;
    let mut ticks = 0u64;
    for _ in 0..seconds * 60 {
        timestep.accumulate(1.0 / 60.0);
        while timestep.consume_tick() {
            ticks += 1;
            controller.apply(input(ticks), &mut state);
            let before = state.score;
            for event in engine.step(&mut state, timestep.dt()) {
                if let PhysicsEvent::Scored { .. } = event {
                    exits += 1;
                    assert_eq!(state.score.total(), before.total() + 1);
                }
            }
        }
    }

    (state, exits)
}

#[test]
fn test_score_tracks_every_exit() {
    let (state, exits) = run(42, 300, |_| PaddleInput::empty());
    assert!(exits > 0);
    assert_eq!(state.score.total(), exits);
}

#[test]
fn test_paddle_stays_on_field_while_playing() {
    let half = ArenaConfig::default().paddle_height / 2.0;
    let height = ArenaConfig::default().height;

    let mut state = MatchState::new(ArenaConfig::default());
    let mut engine = LocalPhysicsEngine::seeded(3);
    let controller = PredictiveInputController::new(Role::Left);
    engine.serve(&mut state);

    for tick in 0..3000u32 {
        let input = match (tick / 90) % 3 {
            0 => PaddleInput::UP,
            1 => PaddleInput::DOWN,
            _ => PaddleInput::UP | PaddleInput::DOWN,
        };
        controller.apply(input, &mut state);
        engine.step(&mut state, 1.0 / 60.0);

        let y = state.left.position.y;
        assert!(y >= half && y <= height - half, "tick {tick}: {y}");
        assert!(state.ball.top() >= 0.0 && state.ball.bottom() <= height);
    }
}
