use crate::ramp::RampSpec;

const CONTROL_CHANGE: u8 = 0xB0;

/// One Control Change message, created and sent inside the ramp loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiCcEvent {
    pub channel: i64,
    pub controller: i64,
    /// The value computed by the ramp, before wire truncation
    pub value: i64,
    /// Always `None` while events are paced by sleeping
    pub timestamp: Option<i64>,
}

impl MidiCcEvent {
    pub fn new(spec: &RampSpec, value: i64) -> Self {
        Self {
            channel: spec.channel,
            controller: spec.controller,
            value,
            timestamp: None,
        }
    }

    /// Status byte 0xB0 + channel, then controller and value.
    /// Out-of-range numbers are truncated to their low bits, never clamped.
    pub fn to_message(&self) -> [u8; 3] {
        [
            CONTROL_CHANGE | (self.channel as u8 & 0x0F),
            self.controller as u8 & 0x7F,
            self.value as u8 & 0x7F,
        ]
    }
}
