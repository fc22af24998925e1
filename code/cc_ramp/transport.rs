//! Where CC events go once the executor has paced them.

use crate::error::RampError;
use crate::event::MidiCcEvent;
use crate::executor::{Pacer, ThreadPacer};
use midir::{MidiOutput, MidiOutputConnection, MidiOutputPort};
use std::time::Duration;

const CLIENT_NAME: &str = "cc-ramp";

pub trait CcTransport {
    /// Sends one event right away.
    fn send(&mut self, event: &MidiCcEvent) -> Result<(), RampError>;

    fn close(self)
    where
        Self: Sized;
}

/// Output latency, waited out once before the first message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyHold {
    pending: Option<Duration>,
}

impl LatencyHold {
    pub fn new(latency_ms: u64) -> Self {
        Self {
            pending: (latency_ms > 0).then(|| Duration::from_millis(latency_ms)),
        }
    }

    /// Pauses for the latency on the first call only.
    pub fn release<P: Pacer>(&mut self, pacer: &mut P) {
        if let Some(latency) = self.pending.take() {
            pacer.pause(latency);
        }
    }
}

/// A live `midir` output connection.
///
/// Latency is a constant output delay: the stream is held back by
/// `latency` before its first message and keeps its pacing afterwards.
pub struct MidirTransport {
    conn: MidiOutputConnection,
    port_name: String,
    latency: LatencyHold,
    sent: usize,
}

impl MidirTransport {
    /// Connects to the output port at `port_index`.
    pub fn open(port_index: usize, latency_ms: u64) -> Result<Self, RampError> {
        let midi_out: MidiOutput = MidiOutput::new(CLIENT_NAME)?;
        let ports: Vec<MidiOutputPort> = midi_out.ports();
        let port: &MidiOutputPort = ports.get(port_index).ok_or_else(|| RampError::Connect {
            port: format!("#{port_index}"),
            reason: "no such output port".to_string(),
        })?;
        let port_name: String = midi_out
            .port_name(port)
            .unwrap_or_else(|_| format!("Unknown Device {port_index}"));
        let conn: MidiOutputConnection =
            midi_out
                .connect(port, "cc-ramp-out")
                .map_err(|e| RampError::Connect {
                    port: port_name.clone(),
                    reason: e.to_string(),
                })?;
        log::info!(
            "MIDI output '{}' opened with {} ms latency",
            port_name,
            latency_ms
        );
        Ok(Self::from_connection(conn, port_name, latency_ms))
    }

    /// Creates a virtual output port (appears in ALSA/JACK) instead of
    /// connecting to an existing one.
    #[cfg(unix)]
    pub fn open_virtual(port_name: &str, latency_ms: u64) -> Result<Self, RampError> {
        use midir::os::unix::VirtualOutput;

        let midi_out: MidiOutput = MidiOutput::new(CLIENT_NAME)?;
        let conn: MidiOutputConnection =
            midi_out
                .create_virtual(port_name)
                .map_err(|e| RampError::Connect {
                    port: port_name.to_string(),
                    reason: e.to_string(),
                })?;
        log::info!(
            "Created virtual MIDI port '{}:{}'",
            CLIENT_NAME,
            port_name
        );
        Ok(Self::from_connection(conn, port_name.to_string(), latency_ms))
    }

    fn from_connection(conn: MidiOutputConnection, port_name: String, latency_ms: u64) -> Self {
        Self {
            conn,
            port_name,
            latency: LatencyHold::new(latency_ms),
            sent: 0,
        }
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

impl CcTransport for MidirTransport {
    fn send(&mut self, event: &MidiCcEvent) -> Result<(), RampError> {
        self.latency.release(&mut ThreadPacer);
        self.conn
            .send(&event.to_message())
            .map_err(|e| RampError::send(self.sent, e))?;
        self.sent += 1;
        Ok(())
    }

    fn close(self) {
        let _midi_out: MidiOutput = self.conn.close();
        log::info!("closed MIDI output '{}'", self.port_name);
    }
}

/// Keeps every event instead of sending it. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    events: Vec<MidiCcEvent>,
    fail_at: Option<usize>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose send number `index` (0-based) fails.
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::default()
        }
    }

    pub fn events(&self) -> &[MidiCcEvent] {
        &self.events
    }

    pub fn values(&self) -> Vec<i64> {
        self.events.iter().map(|e| e.value).collect()
    }
}

impl CcTransport for RecordingTransport {
    fn send(&mut self, event: &MidiCcEvent) -> Result<(), RampError> {
        let index: usize = self.events.len();
        if self.fail_at == Some(index) {
            return Err(RampError::send(index, "recording transport told to fail"));
        }
        log::debug!("dry run: {:02X?}", event.to_message());
        self.events.push(*event);
        Ok(())
    }

    fn close(self) {
        log::debug!("recording transport closed after {} events", self.events.len());
    }
}
