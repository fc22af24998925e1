use std::fmt;

/// Everything that can stop a ramp, or be reported while running one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RampError {
    InvalidArgument(String),
    NoOutputDevice,
    Init(String),
    Connect { port: String, reason: String },
    Send { index: usize, reason: String },
    Config { path: String, reason: String },
    Hook { command: String, reason: String },
}

impl RampError {
    pub fn send(index: usize, reason: impl fmt::Display) -> Self {
        Self::Send {
            index,
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for RampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::NoOutputDevice => write!(f, "no MIDI output device available"),
            Self::Init(reason) => write!(f, "failed to create MIDI output: {reason}"),
            Self::Connect { port, reason } => {
                write!(f, "failed to open MIDI output '{port}': {reason}")
            }
            Self::Send { index, reason } => {
                write!(f, "failed to send CC event #{index}: {reason}")
            }
            Self::Config { path, reason } => write!(f, "config {path}: {reason}"),
            Self::Hook { command, reason } => write!(f, "hook '{command}': {reason}"),
        }
    }
}

impl std::error::Error for RampError {}

impl From<midir::InitError> for RampError {
    fn from(err: midir::InitError) -> Self {
        Self::Init(err.to_string())
    }
}
