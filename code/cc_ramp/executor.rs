//! Sends a planned ramp, one paced event at a time.
//!
//! Every event is delay-then-send. The first event waits the start delay,
//! the rest wait the plan's inter-event delay rounded to whole
//! milliseconds. If the arithmetic stops short of the end value, one more
//! event carrying exactly that value is sent after another delay, so a
//! fader always lands where it was asked to.

use crate::error::RampError;
use crate::event::MidiCcEvent;
use crate::plan::RampPlan;
use crate::ramp::RampSpec;
use crate::transport::CcTransport;
use std::thread;
use std::time::Duration;

/// The blocking wait between events.
pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

/// Blocks the calling thread. Not interruptible.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, delay: Duration) {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

/// Records delays without waiting. Used for dry runs and tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingPacer {
    pub delays: Vec<Duration>,
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, delay: Duration) {
        self.delays.push(delay);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Values in the order they were sent, corrective tail included
    pub values: Vec<i64>,
    /// The delay applied before each value
    pub delays_ms: Vec<u64>,
    pub corrected: bool,
}

impl ExecutionReport {
    pub fn events_sent(&self) -> usize {
        self.values.len()
    }

    pub fn last_value(&self) -> Option<i64> {
        self.values.last().copied()
    }
}

pub fn execute<T, P>(
    spec: &RampSpec,
    plan: &RampPlan,
    transport: &mut T,
    pacer: &mut P,
) -> Result<ExecutionReport, RampError>
where
    T: CcTransport,
    P: Pacer,
{
    let plan: RampPlan = plan.with_ceiling();
    let event_delay_ms: u64 = plan.rounded_delay_ms();
    let mut report: ExecutionReport = ExecutionReport {
        values: Vec::with_capacity(plan.event_count + 1),
        delays_ms: Vec::with_capacity(plan.event_count + 1),
        corrected: false,
    };

    let mut last: i64 = spec.start;
    for index in 0..plan.event_count {
        last = spec.start.saturating_add((index as i64).saturating_mul(spec.step));
        let delay_ms: u64 = if index == 0 {
            spec.start_delay_ms
        } else {
            event_delay_ms
        };
        send_after(spec, last, delay_ms, transport, pacer, &mut report)?;
    }

    let short_of_end: bool = (spec.is_ascending() && last < spec.end)
        || (spec.is_descending() && last > spec.end);
    if short_of_end {
        send_after(spec, spec.end, event_delay_ms, transport, pacer, &mut report)?;
        report.corrected = true;
    }

    log::info!(
        "ramp done: {} events sent, last value {}{}",
        report.events_sent(),
        last_or_none(&report),
        if report.corrected { " (corrected)" } else { "" }
    );
    Ok(report)
}

fn send_after<T: CcTransport, P: Pacer>(
    spec: &RampSpec,
    value: i64,
    delay_ms: u64,
    transport: &mut T,
    pacer: &mut P,
    report: &mut ExecutionReport,
) -> Result<(), RampError> {
    pacer.pause(Duration::from_millis(delay_ms));
    let event: MidiCcEvent = MidiCcEvent::new(spec, value);
    transport.send(&event)?;
    log::debug!(
        "sent ch {} cc {} value {} after {} ms",
        event.channel,
        event.controller,
        event.value,
        delay_ms
    );
    report.values.push(value);
    report.delays_ms.push(delay_ms);
    Ok(())
}

fn last_or_none(report: &ExecutionReport) -> String {
    report
        .last_value()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "none".to_string())
}
