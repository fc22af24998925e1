//! cc_ramp - ramp a MIDI CC value over time
//!
//! # How to run
//!
//! ```sh
//! cargo run -- --list-devices
//! cargo run -- -d "Midi Through:Midi Through Port-0 14:0" 0 7 0 101 1 700 5000
//! ```
//!
//! The seven positional values are channel (0-15), CC number, start value,
//! end value, step, start delay in ms and series duration in ms. The first
//! event goes out after the start delay; the rest are spread over the
//! duration, and the last one always carries the end value.
//!
//! Set `RUST_LOG=debug` to see every event as it is sent.

use cc_ramp::cli::Args;
use cc_ramp::config::RampConfig;
use cc_ramp::device::{self, OutputPort, Resolution};
use cc_ramp::{
    execute, ExecutionReport, MidirTransport, RampError, RampPlan, RampSpec,
    RecordingPacer, RecordingTransport, ThreadPacer,
};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), RampError> {
    if args.list_devices {
        return print_devices();
    }

    let spec: RampSpec = args.ramp_spec()?;
    warn_about_inputs(&spec);
    let config: RampConfig = RampConfig::from_args(&args)?;

    let plan: RampPlan = RampPlan::for_spec(&spec);
    log::info!(
        "ramp ch {} cc {}: {} -> {} step {}, {} events after the first, {:.3} ms apart",
        spec.channel,
        spec.controller,
        spec.start,
        spec.end,
        spec.step,
        plan.event_count,
        plan.event_delay_ms
    );

    config.hooks.run_pre();

    if args.dry_run {
        let mut transport: RecordingTransport = RecordingTransport::new();
        let report: ExecutionReport =
            execute(&spec, &plan, &mut transport, &mut RecordingPacer::default())?;
        println!("{:?}", report.values);
        config.hooks.finish(transport, true);
    } else {
        let mut transport: MidirTransport = open_transport(&args, &config)?;
        execute(&spec, &plan, &mut transport, &mut ThreadPacer)?;
        // without --close-on-exit the port stays open through the post-run hook
        let _held: Option<MidirTransport> =
            config.hooks.finish(transport, config.output.close_on_exit);
    }
    Ok(())
}

fn open_transport(args: &Args, config: &RampConfig) -> Result<MidirTransport, RampError> {
    if let Some(name) = args.virtual_port.as_deref() {
        return open_virtual(name, config.output.latency_ms);
    }
    let ports: Vec<OutputPort> = device::list_output_ports()?;
    let resolution: Resolution = device::resolve(&ports, config.output.device.as_deref())?;
    log::info!("device name {}", resolution.port.name);
    MidirTransport::open(resolution.port.index, config.output.latency_ms)
}

#[cfg(unix)]
fn open_virtual(name: &str, latency_ms: u64) -> Result<MidirTransport, RampError> {
    MidirTransport::open_virtual(name, latency_ms)
}

#[cfg(not(unix))]
fn open_virtual(_name: &str, _latency_ms: u64) -> Result<MidirTransport, RampError> {
    Err(RampError::InvalidArgument(
        "virtual ports are only available on unix".to_string(),
    ))
}

fn warn_about_inputs(spec: &RampSpec) {
    for (name, value, max) in spec.out_of_range() {
        log::warn!("{} {} is outside 0-{}, sending it as is", name, value, max);
    }
    if spec.step_points_away() {
        log::warn!(
            "step {} moves away from the end value {}; the ramp will not reach it",
            spec.step,
            spec.end
        );
    }
}

fn print_devices() -> Result<(), RampError> {
    let ports: Vec<OutputPort> = device::list_output_ports()?;
    if ports.is_empty() {
        println!("No MIDI output devices found.");
        return Ok(());
    }
    println!("Available MIDI output devices:");
    for port in &ports {
        println!("{}: {}", port.index, port.name);
    }
    Ok(())
}
