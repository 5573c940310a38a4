use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use space_shooter::compute::{init_state, snapshot, step};
use space_shooter::entities::{Cue, GameStatus, TickInput};
use space_shooter::services::*;

#[test]
fn monotonic_clock_never_goes_backwards() {
    let clock = MonotonicClock::new();
    let mut last = clock.now_ms();
    for _ in 0..1_000 {
        let now = clock.now_ms();
        assert!(now >= last);
        last = now;
    }
}

#[test]
fn frame_pacer_waits_out_the_period() {
    let period = Duration::from_millis(5);
    let start = Instant::now();
    let mut pacer = FramePacer::new(period);
    for _ in 0..3 {
        pacer.wait();
    }
    assert!(start.elapsed() >= period * 3);
}

#[test]
fn cue_players_accept_every_cue() {
    for cue in [Cue::Shoot, Cue::Explosion] {
        SilentCues.play(cue);
        LoggedCues.play(cue);
    }
}

#[test]
fn headless_session_runs_with_null_collaborators() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut renderer = NullRenderer;
    let mut cues = SilentCues;
    let mut state = init_state(1200, 900);

    let start = TickInput { acknowledge: true, ..TickInput::default() };
    step(&mut state, &start, 0, &mut rng, &mut cues);
    assert_eq!(state.status, GameStatus::Playing);

    let fire = TickInput { fire: 1, ..TickInput::default() };
    for frame in 1..=600u64 {
        step(&mut state, &fire, frame * 16, &mut rng, &mut cues);
        renderer.present(&snapshot(&state)).expect("null renderer never fails");
    }
    assert!(state.frame > 0);
}
