//! Frame clocks and pacing
//!
//! The simulation takes an absolute millisecond timestamp each tick. A
//! [`SimClock`] supplies it: [`FixedClock`] for reproducible runs,
//! [`WallClock`] when the shell is paced against real time.

use std::time::{Duration, Instant};

/// Source of the per-tick timestamp
pub trait SimClock {
    /// Advance to the next frame and return its timestamp in ms since start
    fn next_frame_ms(&mut self) -> u64;
}

/// Exactly one tick period per frame, no drift
#[derive(Debug, Clone)]
pub struct FixedClock {
    tick_hz: u32,
    frames: u64,
}

impl FixedClock {
    pub fn new(tick_hz: u32) -> Self {
        Self {
            tick_hz: tick_hz.max(1),
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl SimClock for FixedClock {
    fn next_frame_ms(&mut self) -> u64 {
        self.frames += 1;
        // Computed from the frame count so 60 Hz lands on 1000 ms every 60 frames
        self.frames * 1000 / u64::from(self.tick_hz)
    }
}

/// Monotonic wall time since construction
#[derive(Debug, Clone)]
pub struct WallClock {
    start: Instant,
}

impl Default for WallClock {
    fn default() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl SimClock for WallClock {
    fn next_frame_ms(&mut self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Sleeps the calling thread until the next tick boundary
#[derive(Debug)]
pub struct FramePacer {
    period: Duration,
    next_tick: Instant,
}

impl FramePacer {
    pub fn new(tick_hz: u32) -> Self {
        Self {
            period: Duration::from_nanos(1_000_000_000 / u64::from(tick_hz.max(1))),
            next_tick: Instant::now(),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Block until the next frame is due
    pub fn wait(&mut self) {
        self.next_tick += self.period;
        let now = Instant::now();
        if self.next_tick > now {
            std::thread::sleep(self.next_tick - now);
        } else if now - self.next_tick > self.period * 2 {
            // Too far behind, resync instead of bursting frames
            log::debug!("frame pacer fell behind by {:?}", now - self.next_tick);
            self.next_tick = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_hits_whole_seconds() {
        let mut clock = FixedClock::new(60);
        let stamps: Vec<u64> = (0..60).map(|_| clock.next_frame_ms()).collect();
        assert_eq!(stamps[0], 16);
        assert_eq!(stamps[29], 500);
        assert_eq!(stamps[59], 1000);
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(clock.frames(), 60);
    }

    #[test]
    fn test_wall_clock_is_monotonic() {
        let mut clock = WallClock::default();
        let a = clock.next_frame_ms();
        let b = clock.next_frame_ms();
        assert!(b >= a);
    }

    #[test]
    fn test_pacer_waits_one_period() {
        let mut pacer = FramePacer::new(200);
        assert_eq!(pacer.period(), Duration::from_millis(5));
        let start = Instant::now();
        pacer.wait();
        pacer.wait();
        assert!(start.elapsed() >= Duration::from_millis(8));
    }
}
