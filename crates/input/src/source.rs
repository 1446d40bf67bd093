//! Held-state input source over terminal key events.
//!
//! The game samples five buttons once per tick. Terminals deliver key events
//! instead, and many never deliver key releases. [`KeyTracker`] turns the
//! event stream back into held state:
//!
//! - With the keyboard enhancement protocol, press/release events are exact.
//! - Without it, a key is held on the first sample after each press, and stays
//!   held while auto-repeat keeps producing presses closer together than the
//!   release timeout.
//! - Rotate and Pause act once per press, so after their first press they stay
//!   held through the auto-repeat delay. Otherwise one long hold would read as
//!   press, release, press once the repeats start.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use log::{debug, info};

use crate::map::{button_for_key, should_quit};
use crate::types::{Button, ButtonState};

/// One poll of the input source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSample {
    pub buttons: ButtonState,
    /// The player asked to leave the game
    pub quit: bool,
}

/// Anything that can report the five buttons once per tick
pub trait InputSource {
    fn poll(&mut self) -> Result<InputSample>;
}

// Auto-repeat delays are usually 250-600ms with repeats every ~30ms; 150ms sits
// comfortably between a repeat interval and a deliberate second tap.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// Longest wait between a key press and its first auto-repeat that still
/// counts as one hold for Rotate and Pause
pub const DEFAULT_KEY_REPEAT_DELAY_MS: u64 = 600;

/// Buttons that only act on a fresh press
fn bridges_repeat_delay(button: Button) -> bool {
    matches!(button, Button::Rotate | Button::Pause)
}

#[derive(Debug, Clone, Copy, Default)]
struct KeyTrack {
    last_press: Option<Instant>,
    presses: u32,
    fresh: bool,
}

/// Reconstructs held state from press/repeat/release events
#[derive(Debug, Clone)]
pub struct KeyTracker {
    keys: [KeyTrack; 5],
    release_timeout: Duration,
    repeat_delay: Duration,
    release_events: bool,
}

impl KeyTracker {
    pub fn new(release_timeout: Duration) -> Self {
        Self {
            keys: [KeyTrack::default(); 5],
            release_timeout,
            repeat_delay: Duration::from_millis(DEFAULT_KEY_REPEAT_DELAY_MS),
            release_events: false,
        }
    }

    pub fn with_repeat_delay(mut self, repeat_delay: Duration) -> Self {
        self.repeat_delay = repeat_delay;
        self
    }

    /// Trust release events instead of timing out held keys
    pub fn with_release_events(mut self, enabled: bool) -> Self {
        self.release_events = enabled;
        self
    }

    pub fn release_timeout(&self) -> Duration {
        self.release_timeout
    }

    pub fn repeat_delay(&self) -> Duration {
        self.repeat_delay
    }

    /// How long after its last press a key still counts as held
    fn hold_window(&self, button: Button) -> Duration {
        if self.keys[button as usize].presses == 1 && bridges_repeat_delay(button) {
            self.repeat_delay.max(self.release_timeout)
        } else {
            self.release_timeout
        }
    }

    pub fn press(&mut self, button: Button, now: Instant) {
        let window = self.hold_window(button);
        let key = &mut self.keys[button as usize];
        let repeating = key
            .last_press
            .is_some_and(|t| now.saturating_duration_since(t) <= window);
        key.presses = if repeating { key.presses + 1 } else { 1 };
        key.last_press = Some(now);
        key.fresh = true;
    }

    pub fn release(&mut self, button: Button) {
        self.keys[button as usize] = KeyTrack::default();
    }

    /// Held state at `now`; consumes the "pressed since last sample" marks
    pub fn sample(&mut self, now: Instant) -> ButtonState {
        let release_events = self.release_events;
        let mut state = ButtonState::default();
        for button in Button::ALL {
            let window = self.hold_window(button);
            let key = &mut self.keys[button as usize];
            let within = key
                .last_press
                .is_some_and(|t| now.saturating_duration_since(t) <= window);
            let held = if release_events {
                key.last_press.is_some()
            } else {
                key.fresh || (within && (key.presses >= 2 || bridges_repeat_delay(button)))
            };
            key.fresh = false;
            state.set(button, held);
        }
        state
    }

    pub fn reset(&mut self) {
        self.keys = [KeyTrack::default(); 5];
    }
}

/// Keyboard input from the controlling terminal
pub struct KeyboardInput {
    tracker: KeyTracker,
    enhanced: bool,
}

impl KeyboardInput {
    /// Acquire the keyboard. Expects the terminal to already be in raw mode.
    pub fn open(release_timeout: Duration, repeat_delay: Duration) -> Result<Self> {
        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .context("enabling key release reporting")?;
        }
        info!(
            "keyboard opened (release events: {}, release timeout: {:?}, repeat delay: {:?})",
            enhanced, release_timeout, repeat_delay
        );

        Ok(Self {
            tracker: KeyTracker::new(release_timeout)
                .with_repeat_delay(repeat_delay)
                .with_release_events(enhanced),
            enhanced,
        })
    }

    /// Release the keyboard. Safe to call more than once.
    pub fn close(&mut self) -> Result<()> {
        if self.enhanced {
            self.enhanced = false;
            execute!(io::stdout(), PopKeyboardEnhancementFlags)
                .context("restoring keyboard reporting")?;
        }
        Ok(())
    }
}

impl InputSource for KeyboardInput {
    fn poll(&mut self) -> Result<InputSample> {
        let mut sample = InputSample::default();
        let now = Instant::now();

        while event::poll(Duration::ZERO).context("polling terminal events")? {
            let Event::Key(key) = event::read().context("reading terminal event")? else {
                continue;
            };
            if key.kind == KeyEventKind::Press && should_quit(key) {
                debug!("quit requested");
                sample.quit = true;
                continue;
            }
            let Some(button) = button_for_key(key.code) else {
                continue;
            };
            match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => self.tracker.press(button, now),
                KeyEventKind::Release => self.tracker.release(button),
            }
        }

        sample.buttons = self.tracker.sample(now);
        Ok(sample)
    }
}

/// Discard every event already queued, returning how many were dropped
fn drain_events(
    mut poll: impl FnMut() -> io::Result<bool>,
    mut read: impl FnMut() -> io::Result<Event>,
) -> io::Result<usize> {
    let mut dropped = 0;
    while poll()? {
        read()?;
        dropped += 1;
    }
    Ok(dropped)
}

/// Block until any key is pressed. Used for the final acknowledgement after
/// the display has been released.
///
/// Keys still queued from gameplay are discarded first, so only a press made
/// after the prompt appears counts.
pub fn wait_for_key() -> Result<()> {
    terminal::enable_raw_mode().context("entering raw mode")?;
    let result = drain_events(|| event::poll(Duration::ZERO), event::read)
        .context("discarding queued key presses")
        .and_then(|dropped| {
            debug!("discarded {} queued events", dropped);
            wait_for_press()
        });
    terminal::disable_raw_mode().context("leaving raw mode")?;
    result
}

fn wait_for_press() -> Result<()> {
    loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => return Ok(()),
            Ok(_) => {}
            Err(e) => return Err(anyhow::Error::from(e).context("waiting for key press")),
        }
    }
}
