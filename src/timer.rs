//! Countdown clock for a timed round.
//!
//! The timer owns no thread. Whoever drives the game loop feeds it elapsed
//! time through [`CountdownTimer::advance`], so ticks are delivered on the
//! same thread that mutates the board.

use std::time::Duration;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimerEvent {
    /// Time left after this tick.
    Tick(Duration),
    Expired,
}

#[derive(Clone, Debug)]
pub struct CountdownTimer {
    total: Duration,
    interval: Duration,
    remaining: Duration,
    carry: Duration,
    running: bool,
}

impl CountdownTimer {
    pub fn new(total: Duration, interval: Duration) -> Self {
        Self {
            total,
            interval,
            remaining: total,
            carry: Duration::ZERO,
            running: false,
        }
    }

    /// Starts a fresh countdown from the full duration.
    pub fn start(&mut self) {
        self.remaining = self.total;
        self.carry = Duration::ZERO;
        self.running = true;
    }

    /// Cancels the countdown. No further events are produced.
    pub fn stop(&mut self) {
        self.running = false;
        self.carry = Duration::ZERO;
    }

    pub fn reset(&mut self) {
        self.stop();
        self.remaining = self.total;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Feeds elapsed wall time and returns the ticks that fell due, followed
    /// by `Expired` once the countdown reaches zero.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        if !self.running {
            return events;
        }
        if self.interval.is_zero() {
            // A zero interval never ticks, so the round ends at once.
            self.remaining = Duration::ZERO;
            self.running = false;
            events.push(TimerEvent::Expired);
            return events;
        }

        self.carry = self.carry.saturating_add(elapsed);
        while self.carry >= self.interval {
            self.carry -= self.interval;
            self.remaining = self.remaining.saturating_sub(self.interval);
            events.push(TimerEvent::Tick(self.remaining));

            if self.remaining.is_zero() {
                self.running = false;
                self.carry = Duration::ZERO;
                events.push(TimerEvent::Expired);
                break;
            }
        }
        events
    }
}
