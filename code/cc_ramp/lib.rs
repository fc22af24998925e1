//! Timed MIDI CC ramps.
//!
//! `plan` works out how many events a ramp needs and how far apart they
//! are; `executor` sends them through a `CcTransport`, sleeping between
//! events and finishing on the exact end value.

pub mod cli;
pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod executor;
pub mod hooks;
pub mod plan;
pub mod ramp;
pub mod transport;

pub use error::RampError;
pub use event::MidiCcEvent;
pub use executor::{execute, ExecutionReport, Pacer, RecordingPacer, ThreadPacer};
pub use plan::{plan, RampPlan, MAX_EVENTS};
pub use ramp::RampSpec;
pub use transport::{CcTransport, MidirTransport, RecordingTransport};
