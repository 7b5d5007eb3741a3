//! Count-based frame admission

/// Decides, per delivered frame, whether it is forwarded this cycle
///
/// Purely count-based: every `interval`-th call admits, starting from a
/// counter of zero at construction. An irregular capture cadence passes
/// through proportionally; nothing is smoothed to wall-clock time.
#[derive(Debug)]
pub struct RateGate {
    counter: u64,
    interval: u64,
}

impl RateGate {
    /// Gate admitting every `interval`-th frame
    ///
    /// An interval of 1 admits everything; 0 is treated as 1.
    pub fn new(interval: u32) -> Self {
        Self {
            counter: 0,
            interval: u64::from(interval.max(1)),
        }
    }

    /// Default policy: every second frame, halving the capture rate
    pub fn every_second() -> Self {
        Self::new(2)
    }

    /// Count this frame and decide whether it is forwarded
    pub fn admit(&mut self) -> bool {
        self.counter += 1;
        self.counter % self.interval == 0
    }

    /// Total frames seen since construction
    pub fn frames_seen(&self) -> u64 {
        self.counter
    }
}
