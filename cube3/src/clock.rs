//! Frame pacing.
//!
//! The loop targets a fixed frame interval. A [`FrameClock`] remembers when the next frame is
//! expected and blocks the calling thread until then; game state is therefore never advanced more
//! than once per elapsed interval.

use std::hint;
use std::thread;
use std::time::Duration;

/// Monotonic time source, in seconds.
pub trait Clock {
  /// Current time.
  fn now(&self) -> f64;
}

/// How to wait for the next frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pacing {
  /// Spin on the clock until the frame is due. Burns a core, never oversleeps.
  Spin,
  /// Sleep while more than `margin` remains before the frame is due, then spin.
  SleepThenSpin {
    /// Remaining time under which the wait switches to spinning.
    margin: Duration,
  },
}

impl Default for Pacing {
  fn default() -> Self {
    Pacing::Spin
  }
}

/// Expected time of the next frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameClock {
  interval: f64,
  expected: f64,
}

impl FrameClock {
  /// Start a clock at `now`; the first frame is due one `interval` later.
  pub fn new(now: f64, interval: f64) -> Self {
    FrameClock {
      interval,
      expected: now + interval,
    }
  }

  /// Start a clock targeting `frames_per_second`.
  pub fn from_rate(now: f64, frames_per_second: u32) -> Self {
    Self::new(now, 1. / frames_per_second as f64)
  }

  /// Target frame interval, in seconds.
  pub fn interval(&self) -> f64 {
    self.interval
  }

  /// Time at which the next frame is due.
  pub fn expected(&self) -> f64 {
    self.expected
  }

  /// Block until the next frame is due and schedule the one after it.
  ///
  /// The next deadline is computed from the time the wait ended, not from the previous deadline:
  /// a late frame pushes every following frame back instead of triggering a burst of catch-up
  /// frames. Returns the time the frame starts at.
  pub fn wait(&mut self, clock: &impl Clock, pacing: Pacing) -> f64 {
    if let Pacing::SleepThenSpin { margin } = pacing {
      let margin = margin.as_secs_f64();

      loop {
        let remaining = self.expected - clock.now();

        if remaining <= margin {
          break;
        }

        thread::sleep(Duration::from_secs_f64(remaining - margin));
      }
    }

    let mut now = clock.now();
    while now < self.expected {
      hint::spin_loop();
      now = clock.now();
    }

    self.expected = now + self.interval;
    now
  }
}
