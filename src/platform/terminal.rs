//! Terminal frontend built on crossterm
//!
//! The play field is scaled onto the terminal grid: row 0 is the HUD, row 1
//! the separator line, everything below is the field. Audio is the terminal
//! bell for the longer cues; if the bell can't be written nothing happens.

use std::collections::HashMap;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
};

use super::{InputSignal, InputSource, Presentation};
use crate::audio::{AudioMixer, SoundEffect};
use crate::consts::*;
use crate::sim::{GameState, Rect};

/// Rows above the field (HUD + separator)
const HUD_ROWS: u16 = 2;

/// A key counts as held if its last press/repeat arrived within this window.
/// Terminals without release events repeat at ≥ 15 Hz, which refreshes it.
const HOLD_WINDOW: Duration = Duration::from_millis(150);

const C_HUD: Color = Color::White;
const C_PADDLE: Color = Color::White;
const C_BALL: Color = Color::White;
const C_POWERUP: Color = Color::Yellow;
const C_PAUSE: Color = Color::White;

/// Switch the terminal into game mode.
///
/// Returns whether key-release reporting was enabled, for [`leave`].
pub fn enter<W: Write>(out: &mut W) -> io::Result<bool> {
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Kitty-protocol terminals report releases; others fall back to repeats
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    Ok(keyboard_enhanced)
}

/// Restore the terminal. Best effort: errors are ignored.
pub fn leave<W: Write>(out: &mut W, keyboard_enhanced: bool) {
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

/// Maps play-field coordinates onto terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    fn field_rows(&self) -> u16 {
        self.rows.saturating_sub(HUD_ROWS).max(1)
    }

    /// Cell containing a field point (clamped to the field)
    pub fn to_cell(&self, x: f32, y: f32) -> (u16, u16) {
        let fx = (x / WINDOW_WIDTH).clamp(0.0, 1.0);
        let fy = ((y - HUD_HEIGHT) / (WINDOW_HEIGHT - HUD_HEIGHT)).clamp(0.0, 1.0);
        let col = ((fx * self.cols as f32) as u16).min(self.cols.saturating_sub(1));
        let row = ((fy * self.field_rows() as f32) as u16).min(self.field_rows() - 1);
        (col, HUD_ROWS + row)
    }

    /// Inclusive cell span covered by a rectangle
    pub fn span(&self, rect: &Rect) -> ((u16, u16), (u16, u16)) {
        let start = self.to_cell(rect.left(), rect.top());
        // Nudge inward so a rect ending on a cell boundary doesn't spill over
        let end = self.to_cell(rect.right() - 0.01, rect.bottom() - 0.01);
        (start, (end.0.max(start.0), end.1.max(start.1)))
    }

    /// Column that centers `text`
    fn centered(&self, text: &str) -> u16 {
        (self.cols / 2).saturating_sub(text.chars().count() as u16 / 2)
    }
}

/// Keyboard input with held-key tracking
pub struct TerminalInput {
    /// Each held key -> when it was last pressed or repeated
    held: HashMap<KeyCode, Instant>,
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalInput {
    pub fn new() -> Self {
        Self {
            held: HashMap::new(),
        }
    }

    fn is_held(&self, keys: &[KeyCode], now: Instant) -> bool {
        keys.iter().any(|key| {
            self.held
                .get(key)
                .map(|&last| now.duration_since(last) <= HOLD_WINDOW)
                .unwrap_or(false)
        })
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> io::Result<Vec<InputSignal>> {
        let now = Instant::now();
        let mut signals = Vec::new();

        while event::poll(Duration::ZERO)? {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event::read()?
            else {
                continue;
            };

            match kind {
                KeyEventKind::Press => {
                    self.held.insert(code, now);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            signals.push(InputSignal::Quit);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            signals.push(InputSignal::Quit);
                        }
                        KeyCode::Enter => signals.push(InputSignal::Continue),
                        KeyCode::Char('0') => signals.push(InputSignal::DebugClearBricks),
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    self.held.insert(code, now);
                }
                KeyEventKind::Release => {
                    self.held.remove(&code);
                }
            }
        }

        let left = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
        let right = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
        if self.is_held(&left, now) {
            signals.push(InputSignal::MoveLeft);
        }
        if self.is_held(&right, now) {
            signals.push(InputSignal::MoveRight);
        }

        Ok(signals)
    }
}

/// Renders the game with box-drawing characters and ANSI colors
pub struct TerminalPresentation<W: Write> {
    out: W,
    mixer: AudioMixer,
}

impl<W: Write> TerminalPresentation<W> {
    pub fn new(out: W, mixer: AudioMixer) -> Self {
        Self { out, mixer }
    }

    fn viewport() -> io::Result<Viewport> {
        let (cols, rows) = terminal::size()?;
        Ok(Viewport::new(cols, rows))
    }

    fn draw_hud(&mut self, state: &GameState, view: Viewport) -> io::Result<()> {
        let hud = state.hud();
        self.out.queue(style::SetForegroundColor(C_HUD))?;

        self.out.queue(cursor::MoveTo(1, 0))?;
        self.out.queue(Print(format!("Score: {}", hud.score)))?;

        let timer = hud.level_timer.to_string();
        self.out.queue(cursor::MoveTo(view.centered(&timer), 0))?;
        self.out.queue(Print(&timer))?;

        let lives = format!("Lives: {}", hud.lives);
        let lx = view.cols.saturating_sub(lives.chars().count() as u16 + 1);
        self.out.queue(cursor::MoveTo(lx, 0))?;
        self.out.queue(Print(&lives))?;

        self.out.queue(cursor::MoveTo(0, 1))?;
        self.out.queue(Print("─".repeat(view.cols as usize)))?;
        Ok(())
    }

    fn fill(&mut self, view: Viewport, rect: &Rect, glyph: &str, color: Color) -> io::Result<()> {
        let ((c0, r0), (c1, r1)) = view.span(rect);
        self.out.queue(style::SetForegroundColor(color))?;
        for row in r0..=r1 {
            self.out.queue(cursor::MoveTo(c0, row))?;
            self.out
                .queue(Print(glyph.repeat((c1 - c0 + 1) as usize)))?;
        }
        Ok(())
    }
}

impl<W: Write> Presentation for TerminalPresentation<W> {
    fn draw_frame(&mut self, state: &GameState) -> io::Result<()> {
        let view = Self::viewport()?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_hud(state, view)?;

        for brick in &state.bricks {
            let (r, g, b) = brick.color.rgb();
            self.fill(view, &brick.rect, "█", Color::Rgb { r, g, b })?;
        }
        for powerup in &state.powerups {
            let (col, row) = view.to_cell(powerup.pos.x, powerup.pos.y);
            self.out.queue(cursor::MoveTo(col, row))?;
            self.out.queue(style::SetForegroundColor(C_POWERUP))?;
            self.out.queue(Print("+"))?;
        }
        self.fill(view, &state.paddle.rect(), "▀", C_PADDLE)?;
        for ball in &state.balls {
            let (col, row) = view.to_cell(ball.pos.x, ball.pos.y);
            self.out.queue(cursor::MoveTo(col, row))?;
            self.out.queue(style::SetForegroundColor(C_BALL))?;
            self.out.queue(Print("●"))?;
        }

        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }

    fn play_sound(&mut self, effect: SoundEffect) {
        if effect.is_jingle() && self.mixer.is_audible(effect) {
            let _ = self.out.write_all(b"\x07");
        }
    }

    fn show_pause(&mut self, main_text: &str, sub_text: &str, hide_gameplay: bool) -> io::Result<()> {
        let view = Self::viewport()?;
        if hide_gameplay {
            self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        }

        let main_row = (view.rows as f32 * 0.57) as u16;
        self.out.queue(style::SetForegroundColor(C_PAUSE))?;
        self.out.queue(cursor::MoveTo(view.centered(main_text), main_row))?;
        self.out.queue(Print(main_text))?;
        self.out
            .queue(cursor::MoveTo(view.centered(sub_text), main_row.saturating_add(2)))?;
        self.out.queue(Print(sub_text))?;

        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_corners() {
        let view = Viewport::new(120, 42);
        assert_eq!(view.to_cell(0.0, HUD_HEIGHT), (0, HUD_ROWS));
        assert_eq!(view.to_cell(WINDOW_WIDTH, WINDOW_HEIGHT), (119, 41));
        // Points above the field land on its first row
        assert_eq!(view.to_cell(600.0, 0.0), (60, HUD_ROWS));
    }

    #[test]
    fn test_span_covers_at_least_one_cell() {
        let view = Viewport::new(80, 24);
        let tiny = Rect::new(600.0, 500.0, 1.0, 1.0);
        let ((c0, r0), (c1, r1)) = view.span(&tiny);
        assert!(c1 >= c0);
        assert!(r1 >= r0);
    }

    #[test]
    fn test_span_columns() {
        // 1200 px over 120 columns: 10 px per column
        let view = Viewport::new(120, 42);
        let rect = Rect::new(105.0, 500.0, 20.0, 10.0);
        let ((c0, _), (c1, _)) = view.span(&rect);
        assert_eq!((c0, c1), (10, 12));
    }
}
