mod common;

use brick_breaker::Settings;
use brick_breaker::audio::SoundEffect;
use brick_breaker::consts::*;
use brick_breaker::frame_loop::FrameLoop;
use brick_breaker::platform::InputSignal;
use brick_breaker::sim::{GamePhase, PauseReason};

use common::{Call, Recorder, Script, new_game, playing_game};

/// Enough real time for exactly one tick
const ONE_TICK: f32 = SIM_DT * 1.5;

fn frame_loop() -> FrameLoop {
    FrameLoop::new(TICK_RATE, 60)
}

// ── pauses ────────────────────────────────────────────────────────────────────

#[test]
fn level_start_pause_drawn_over_field() {
    let mut state = new_game();
    let mut recorder = Recorder::default();
    frame_loop()
        .frame(&mut state, &mut recorder, &[], 0.0)
        .unwrap();

    let bricks = state.bricks.len();
    assert_eq!(
        recorder.calls,
        vec![
            Call::Draw { bricks, balls: 1 },
            Call::Pause {
                main_text: "Level: 1 - Heart".to_string(),
                sub_text: "Press ENTER to continue".to_string(),
                hide_gameplay: false,
            },
        ]
    );
}

#[test]
fn no_redraw_while_paused() {
    let mut state = new_game();
    let mut fl = frame_loop();
    let mut recorder = Recorder::default();
    fl.frame(&mut state, &mut recorder, &[], 0.0).unwrap();
    recorder.calls.clear();

    for _ in 0..20 {
        fl.frame(&mut state, &mut recorder, &[InputSignal::MoveLeft], ONE_TICK)
            .unwrap();
    }
    assert!(recorder.calls.is_empty());
    assert_eq!(state.phase, GamePhase::Paused(PauseReason::LevelStart));
}

#[test]
fn continue_resumes_and_draws() {
    let mut state = new_game();
    let mut fl = frame_loop();
    let mut recorder = Recorder::default();
    fl.frame(&mut state, &mut recorder, &[], 0.0).unwrap();
    recorder.calls.clear();

    fl.frame(&mut state, &mut recorder, &[InputSignal::Continue], ONE_TICK)
        .unwrap();
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(recorder.draws(), 1);
}

#[test]
fn continue_latched_until_a_tick_runs() {
    let mut state = new_game();
    let mut fl = frame_loop();
    let mut recorder = Recorder::default();

    // A frame too short for a tick keeps the key press
    fl.frame(&mut state, &mut recorder, &[InputSignal::Continue], 0.0)
        .unwrap();
    assert!(state.is_paused());

    fl.frame(&mut state, &mut recorder, &[], ONE_TICK).unwrap();
    assert_eq!(state.phase, GamePhase::Playing);
}

#[test]
fn level_complete_hides_gameplay() {
    let mut state = playing_game();
    let mut recorder = Recorder::default();
    frame_loop()
        .frame(
            &mut state,
            &mut recorder,
            &[InputSignal::DebugClearBricks],
            ONE_TICK,
        )
        .unwrap();

    assert_eq!(state.phase, GamePhase::Paused(PauseReason::LevelComplete));
    assert!(recorder.played(SoundEffect::LevelComplete));
    assert_eq!(
        recorder.pauses(),
        vec![("Level Complete", "Press ENTER to Continue", true)]
    );
    // Blank screen: nothing drawn behind the message
    assert_eq!(recorder.draws(), 0);
}

// ── timing ────────────────────────────────────────────────────────────────────

#[test]
fn long_stall_capped_at_max_substeps() {
    let mut state = playing_game();
    let mut recorder = Recorder::default();
    frame_loop()
        .frame(&mut state, &mut recorder, &[], 10.0)
        .unwrap();
    assert_eq!(state.frame_count, MAX_SUBSTEPS as u64);
}

#[test]
fn held_movement_applies_every_tick() {
    let mut state = playing_game();
    let start = state.paddle.pos.x;
    let mut recorder = Recorder::default();
    frame_loop()
        .frame(&mut state, &mut recorder, &[InputSignal::MoveLeft], SIM_DT * 3.5)
        .unwrap();
    assert_eq!(state.paddle.pos.x, start - 3.0 * PADDLE_SPEED);
}

#[test]
fn from_settings_uses_tick_rate() {
    let settings = Settings {
        tick_rate: 60,
        ..Settings::default()
    };
    let mut state = playing_game();
    let mut recorder = Recorder::default();
    // One 60 Hz tick fits; at 120 Hz this would be two
    FrameLoop::from_settings(&settings)
        .frame(&mut state, &mut recorder, &[], 1.5 / 60.0)
        .unwrap();
    assert_eq!(state.frame_count, 1);
}

// ── quitting ──────────────────────────────────────────────────────────────────

#[test]
fn quit_stops_without_waiting_for_a_tick() {
    let mut state = new_game();
    let mut recorder = Recorder::default();
    frame_loop()
        .frame(&mut state, &mut recorder, &[InputSignal::Quit], 0.0)
        .unwrap();
    assert!(!state.running);
    assert!(recorder.calls.is_empty());
}

#[test]
fn run_returns_after_quit() {
    let mut state = new_game();
    let mut recorder = Recorder::default();
    let mut script = Script::new(vec![
        vec![],
        vec![InputSignal::Continue],
        vec![InputSignal::Quit],
    ]);

    frame_loop()
        .run(&mut state, &mut recorder, &mut script)
        .unwrap();

    assert!(!state.running);
    assert_eq!(recorder.pauses().len(), 1);
}
