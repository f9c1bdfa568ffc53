//! Scripted input and a recording presentation for driving the frame loop

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;

use brick_breaker::LevelCatalog;
use brick_breaker::audio::SoundEffect;
use brick_breaker::platform::{InputSignal, InputSource, Presentation};
use brick_breaker::sim::{GamePhase, GameState, TickInput, tick};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Draw { bricks: usize, balls: usize },
    Sound(SoundEffect),
    Pause {
        main_text: String,
        sub_text: String,
        hide_gameplay: bool,
    },
}

/// Records every presentation call in order
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<Call>,
}

impl Recorder {
    pub fn draws(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Draw { .. }))
            .count()
    }

    pub fn pauses(&self) -> Vec<(&str, &str, bool)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Pause {
                    main_text,
                    sub_text,
                    hide_gameplay,
                } => Some((main_text.as_str(), sub_text.as_str(), *hide_gameplay)),
                _ => None,
            })
            .collect()
    }

    pub fn played(&self, effect: SoundEffect) -> bool {
        self.calls.contains(&Call::Sound(effect))
    }
}

impl Presentation for Recorder {
    fn draw_frame(&mut self, state: &GameState) -> io::Result<()> {
        self.calls.push(Call::Draw {
            bricks: state.bricks.len(),
            balls: state.balls.len(),
        });
        Ok(())
    }

    fn play_sound(&mut self, effect: SoundEffect) {
        self.calls.push(Call::Sound(effect));
    }

    fn show_pause(&mut self, main_text: &str, sub_text: &str, hide_gameplay: bool) -> io::Result<()> {
        self.calls.push(Call::Pause {
            main_text: main_text.to_string(),
            sub_text: sub_text.to_string(),
            hide_gameplay,
        });
        Ok(())
    }
}

/// Replays one batch of signals per poll, then nothing
#[derive(Debug, Default)]
pub struct Script {
    frames: VecDeque<Vec<InputSignal>>,
}

impl Script {
    pub fn new(frames: Vec<Vec<InputSignal>>) -> Self {
        Self {
            frames: frames.into(),
        }
    }
}

impl InputSource for Script {
    fn poll(&mut self) -> io::Result<Vec<InputSignal>> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }
}

pub fn new_game() -> GameState {
    GameState::new(LevelCatalog::builtin(), 7).unwrap()
}

/// A game past the level-start pause with its events drained
pub fn playing_game() -> GameState {
    let mut state = new_game();
    let input = TickInput {
        confirm: true,
        ..Default::default()
    };
    tick(&mut state, &input, brick_breaker::consts::SIM_DT).unwrap();
    assert_eq!(state.phase, GamePhase::Playing);
    state.take_events();
    state
}
