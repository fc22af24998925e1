//! Event count and spacing for a ramp.
//!
//! `event_count` counts the events after the first one: the first is sent
//! on the start delay, the rest share `duration_ms` evenly.

use crate::ramp::RampSpec;

/// Hard ceiling on the number of events one ramp may send.
pub const MAX_EVENTS: usize = 2000;

/// Count a ramp is cut down to once it reaches the ceiling.
pub const CLIPPED_EVENTS: usize = MAX_EVENTS - 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampPlan {
    pub event_count: usize,
    pub event_delay_ms: f64,
    pub clipped: bool,
}

impl RampPlan {
    /// Plans `spec` and applies the event ceiling.
    pub fn for_spec(spec: &RampSpec) -> Self {
        plan(spec.start, spec.end, spec.step, spec.duration_ms).with_ceiling()
    }

    pub fn with_ceiling(self) -> Self {
        if self.event_count < MAX_EVENTS - 2 {
            return self;
        }
        log::warn!(
            "maximum number of events reached: {} requested, clipping to {}",
            self.event_count,
            CLIPPED_EVENTS
        );
        Self {
            event_count: CLIPPED_EVENTS,
            clipped: true,
            ..self
        }
    }

    /// Inter-event delay in whole milliseconds, rounded half up.
    pub fn rounded_delay_ms(&self) -> u64 {
        (self.event_delay_ms + 0.5).floor() as u64
    }
}

pub fn plan(start: i64, end: i64, step: i64, duration_ms: u64) -> RampPlan {
    let duration: f64 = duration_ms as f64;
    let (event_count, event_delay_ms): (usize, f64) = if step != 0 {
        let steps: f64 = ((end as f64 - start as f64) / step as f64).abs().ceil();
        // start == end gives zero steps; send it as a single jump instead
        let count: usize = (steps as usize).max(1);
        (count, duration / count as f64)
    } else if start != end {
        (1, duration)
    } else {
        (1, 0.0)
    };
    log::debug!(
        "plan: {} additional events, {:.3} ms apart",
        event_count,
        event_delay_ms
    );
    RampPlan {
        event_count,
        event_delay_ms,
        clipped: false,
    }
}
