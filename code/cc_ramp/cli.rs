use crate::error::RampError;
use crate::ramp::RampSpec;
use clap::Parser;

/// Ramp a MIDI CC value from START to END over DURATION_MS.
///
/// Example: cc_ramp -l 20 -d "Out To MIDI Yoke:  1" 1 64 101 1 -5 700 5000
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, allow_negative_numbers = true)]
pub struct Args {
    /// MIDI channel, integer between 0 and 15
    #[arg(required_unless_present = "list_devices")]
    pub channel: Option<i32>,

    /// CC number to send to, integer between 0 and 127
    #[arg(required_unless_present = "list_devices")]
    pub cc: Option<i32>,

    /// First CC value to send, integer between 0 and 127
    #[arg(required_unless_present = "list_devices")]
    pub start: Option<i32>,

    /// Last CC value to send (101 is 0 dB on a SONAR fader)
    #[arg(required_unless_present = "list_devices")]
    pub end: Option<i32>,

    /// Increment between successive values, e.g. 2 sends 0, 2, 4, 6...
    #[arg(required_unless_present = "list_devices")]
    pub step: Option<i32>,

    /// Milliseconds before the first event is sent
    #[arg(required_unless_present = "list_devices")]
    pub start_delay_ms: Option<u64>,

    /// Milliseconds the rest of the series should take
    #[arg(required_unless_present = "list_devices")]
    pub duration_ms: Option<u64>,

    /// Output latency in milliseconds
    #[arg(short = 'l', long = "latency", value_name = "MS")]
    pub latency_ms: Option<u64>,

    /// Output device name (see --list-devices)
    #[arg(short, long, value_name = "NAME")]
    pub device: Option<String>,

    /// Close the device before the post-run command; otherwise it stays
    /// open until the process exits
    #[arg(short, long, default_value_t = false)]
    pub close_on_exit: bool,

    /// Command run before the ramp starts
    #[arg(short = 'b', long = "before", value_name = "COMMAND")]
    pub pre_run: Option<String>,

    /// Command run after the ramp ends
    #[arg(short = 'e', long = "after", value_name = "COMMAND")]
    pub post_run: Option<String>,

    /// Path to a TOML file with defaults for the options above
    #[arg(long)]
    pub config: Option<String>,

    /// Create a virtual output port with this name instead of opening a device
    #[arg(long, value_name = "NAME")]
    pub virtual_port: Option<String>,

    /// Print the available output devices and exit
    #[arg(long, default_value_t = false)]
    pub list_devices: bool,

    /// Plan and log the events without opening a device or sleeping
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

impl Args {
    pub fn ramp_spec(&self) -> Result<RampSpec, RampError> {
        Ok(RampSpec::new(
            required(self.channel, "channel")?.into(),
            required(self.cc, "cc number")?.into(),
            required(self.start, "cc start value")?.into(),
            required(self.end, "cc end value")?.into(),
            required(self.step, "cc step value")?.into(),
            required(self.start_delay_ms, "start delay")?,
            required(self.duration_ms, "serie duration")?,
        ))
    }
}

fn required<T>(value: Option<T>, name: &str) -> Result<T, RampError> {
    value.ok_or_else(|| RampError::InvalidArgument(format!("missing {name}")))
}
