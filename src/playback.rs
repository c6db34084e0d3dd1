//! Playback controller: a small state machine over a generated [`Trace`].
//!
//! The controller holds the immutable step sequence, a current index, and
//! play/pause/speed state. The timer is cooperative and owned by the
//! controller: the embedding event loop calls [`PlaybackController::tick`]
//! with the current instant, and the index advances only while playing and
//! only once per elapsed interval. There is no background thread to leak:
//! dropping or [`replace`](PlaybackController::replace)-ing the controller
//! cancels playback by construction.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::trace;

use crate::step::{Step, Trace};

/// Interval used until the caller picks one with `set_speed`.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Where the controller is in its play/pause lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaybackState {
    /// No steps, or at index 0 and not playing.
    Idle,
    /// Timer-driven auto-advance is active.
    Playing,
    /// Timer stopped, index retained.
    Paused,
    /// Index is at the last step; auto-play is forcibly stopped.
    AtEnd,
}

/// Index selection over an immutable step sequence.
///
/// Step commands are valid in any state and implicitly pause auto-play;
/// regenerating a trace swaps the sequence wholesale via `replace`.
#[derive(Debug, Clone)]
pub struct PlaybackController<S> {
    trace: Trace<S>,
    current: usize,
    state: PlaybackState,
    interval: Duration,
    last_advance: Option<Instant>,
}

impl<S: Clone + PartialEq> PlaybackController<S> {
    /// Wrap a generated trace, idle at index 0.
    pub fn new(trace: Trace<S>) -> Self {
        Self {
            trace,
            current: 0,
            state: PlaybackState::Idle,
            interval: DEFAULT_INTERVAL,
            last_advance: None,
        }
    }

    /// The step sequence being played.
    pub fn trace(&self) -> &Trace<S> {
        &self.trace
    }

    /// Current index into the trace.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The step at the current index, `None` only for an empty trace.
    pub fn current(&self) -> Option<&Step<S>> {
        self.trace.get(self.current)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// True while the timer is auto-advancing.
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// The configured tick interval.
    pub fn speed(&self) -> Duration {
        self.interval
    }

    /// Start auto-advance. No-op if already at the last step (or empty).
    pub fn play(&mut self) {
        if self.at_last() {
            return;
        }
        self.state = PlaybackState::Playing;
        self.last_advance = None;
        trace!(index = self.current, "playback started");
    }

    /// Stop the timer, keeping the current index. No-op unless playing.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
            self.last_advance = None;
            trace!(index = self.current, "playback paused");
        }
    }

    /// Back to idle at index 0, timer stopped.
    pub fn reset(&mut self) {
        self.current = 0;
        self.state = PlaybackState::Idle;
        self.last_advance = None;
        trace!("playback reset");
    }

    /// Move one step forward, clamped to the last index. Valid in any
    /// state; implicitly pauses auto-play.
    pub fn step_forward(&mut self) {
        let target = (self.current + 1).min(self.trace.len().saturating_sub(1));
        self.manual_seek(target);
    }

    /// Move one step backward, clamped to index 0. Valid in any state;
    /// implicitly pauses auto-play.
    pub fn step_backward(&mut self) {
        let target = self.current.saturating_sub(1);
        self.manual_seek(target);
    }

    /// Change the auto-advance interval. Takes effect on the next tick.
    pub fn set_speed(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Advance the timer. Returns the new index when a step was taken.
    ///
    /// Only advances while playing and only after `speed()` has elapsed
    /// since the previous advance; the first tick after `play` arms the
    /// timer without moving. Reaching the last index transitions to
    /// [`PlaybackState::AtEnd`] and stops the timer.
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        if self.state != PlaybackState::Playing {
            return None;
        }
        match self.last_advance {
            None => {
                self.last_advance = Some(now);
                None
            }
            Some(t) if now.duration_since(t) >= self.interval => {
                self.current += 1;
                if self.at_last() {
                    self.state = PlaybackState::AtEnd;
                    self.last_advance = None;
                    trace!(index = self.current, "playback reached end");
                } else {
                    self.last_advance = Some(now);
                }
                Some(self.current)
            }
            Some(_) => None,
        }
    }

    /// Swap in a freshly generated trace, discarding the old one wholesale.
    ///
    /// A single value replacement, never an in-place patch: the controller
    /// returns to idle at index 0 with the timer stopped.
    pub fn replace(&mut self, trace: Trace<S>) {
        self.trace = trace;
        self.current = 0;
        self.state = PlaybackState::Idle;
        self.last_advance = None;
        trace!(steps = self.trace.len(), "trace replaced");
    }

    fn at_last(&self) -> bool {
        self.trace.is_empty() || self.current + 1 == self.trace.len()
    }

    fn manual_seek(&mut self, index: usize) {
        self.current = index;
        self.last_advance = None;
        self.state = if self.trace.is_empty() || index == 0 {
            PlaybackState::Idle
        } else if self.at_last() {
            PlaybackState::AtEnd
        } else {
            PlaybackState::Paused
        };
    }
}
