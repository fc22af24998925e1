//! Output device lookup by name.
//!
//! midir has no notion of a system default output, so the first
//! enumerated output port stands in for it.

use crate::error::RampError;
use midir::MidiOutput;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPort {
    pub index: usize,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub port: OutputPort,
    /// True when the requested name was absent or unknown
    pub fallback: bool,
}

pub fn list_output_ports() -> Result<Vec<OutputPort>, RampError> {
    let midi_out: MidiOutput = MidiOutput::new("cc-ramp-enumerate")?;
    Ok(midi_out
        .ports()
        .iter()
        .enumerate()
        .map(|(index, port)| OutputPort {
            index,
            name: midi_out
                .port_name(port)
                .unwrap_or_else(|_| format!("Unknown Device {index}")),
        })
        .collect())
}

/// Exact name match, else the default port with `fallback` set.
pub fn resolve(ports: &[OutputPort], wanted: Option<&str>) -> Result<Resolution, RampError> {
    if let Some(name) = wanted {
        if let Some(port) = ports.iter().find(|p| p.name == name) {
            return Ok(Resolution {
                port: port.clone(),
                fallback: false,
            });
        }
    }
    let default: &OutputPort = ports.first().ok_or(RampError::NoOutputDevice)?;
    match wanted {
        Some(name) => log::warn!(
            "no output device named '{}', using default '{}'",
            name,
            default.name
        ),
        None => log::warn!("no output device given, using default '{}'", default.name),
    }
    Ok(Resolution {
        port: default.clone(),
        fallback: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ports() -> Vec<OutputPort> {
        ["Midi Through:Midi Through Port-0 14:0", "Out To MIDI Yoke:  1"]
            .iter()
            .enumerate()
            .map(|(index, name)| OutputPort {
                index,
                name: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn exact_name_wins() {
        let r: Resolution = resolve(&ports(), Some("Out To MIDI Yoke:  1")).unwrap();
        assert_eq!(r.port.index, 1);
        assert!(!r.fallback);
    }

    #[test]
    fn name_match_is_exact() {
        let r: Resolution = resolve(&ports(), Some("Out To MIDI Yoke: 1")).unwrap();
        assert_eq!(r.port.index, 0);
        assert!(r.fallback);
    }

    #[test]
    fn missing_name_falls_back_to_default() {
        let r: Resolution = resolve(&ports(), None).unwrap();
        assert_eq!(r.port.name, "Midi Through:Midi Through Port-0 14:0");
        assert!(r.fallback);
    }

    #[test]
    fn no_ports_is_an_error() {
        assert_eq!(resolve(&[], Some("anything")), Err(RampError::NoOutputDevice));
    }
}
