//! The parameters of a single CC ramp.
//!
//! A `RampSpec` is built once from the command line and never changes.
//! Values outside the MIDI ranges are kept as given; `out_of_range`
//! lists them so the caller can warn before anything is sent.

pub const MAX_CHANNEL: i64 = 15;
pub const MAX_DATA: i64 = 127;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RampSpec {
    /// MIDI channel, 0-15
    pub channel: i64,
    /// Controller number, 0-127
    pub controller: i64,
    pub start: i64,
    pub end: i64,
    /// Signed increment between successive values. Zero means a single jump.
    pub step: i64,
    /// Delay before the first event
    pub start_delay_ms: u64,
    /// Time budget for every event after the first
    pub duration_ms: u64,
}

impl RampSpec {
    pub fn new(
        channel: i64,
        controller: i64,
        start: i64,
        end: i64,
        step: i64,
        start_delay_ms: u64,
        duration_ms: u64,
    ) -> Self {
        Self {
            channel,
            controller,
            start,
            end,
            step,
            start_delay_ms,
            duration_ms,
        }
    }

    /// Fields outside their nominal MIDI range, as `(name, value, max)`.
    pub fn out_of_range(&self) -> Vec<(&'static str, i64, i64)> {
        let checks: [(&'static str, i64, i64); 4] = [
            ("channel", self.channel, MAX_CHANNEL),
            ("cc number", self.controller, MAX_DATA),
            ("cc start value", self.start, MAX_DATA),
            ("cc end value", self.end, MAX_DATA),
        ];
        checks
            .into_iter()
            .filter(|&(_, value, max)| value < 0 || value > max)
            .collect()
    }

    /// True when a non-zero step points away from `end`, so the ramp
    /// runs the wrong way and never reaches it.
    pub fn step_points_away(&self) -> bool {
        (self.step > 0 && self.end < self.start) || (self.step < 0 && self.end > self.start)
    }

    pub fn is_ascending(&self) -> bool {
        self.step > 0
    }

    pub fn is_descending(&self) -> bool {
        self.step < 0
    }
}
