use cc_ramp::plan::CLIPPED_EVENTS;
use cc_ramp::{
    execute, plan, ExecutionReport, RampPlan, RampSpec, RecordingPacer, RecordingTransport,
};
use std::time::Duration;

struct Run {
    plan: RampPlan,
    report: ExecutionReport,
    transport: RecordingTransport,
    pacer: RecordingPacer,
}

fn run(start: i64, end: i64, step: i64, start_delay_ms: u64, duration_ms: u64) -> Run {
    let spec: RampSpec = RampSpec::new(0, 7, start, end, step, start_delay_ms, duration_ms);
    let plan: RampPlan = RampPlan::for_spec(&spec);
    let mut transport: RecordingTransport = RecordingTransport::new();
    let mut pacer: RecordingPacer = RecordingPacer::default();
    let report: ExecutionReport =
        execute(&spec, &plan, &mut transport, &mut pacer).expect("recording transport never fails");
    Run {
        plan,
        report,
        transport,
        pacer,
    }
}

#[test]
fn even_ramp_lands_on_end() {
    let r: Run = run(0, 100, 10, 0, 1000);
    assert_eq!(r.plan.event_count, 10);
    assert_eq!(r.plan.event_delay_ms, 100.0);
    assert_eq!(
        r.transport.values(),
        vec![0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100]
    );
    assert_eq!(r.report.delays_ms[1..], [100; 10]);
}

#[test]
fn uneven_ramp_gets_corrective_tail() {
    let r: Run = run(0, 101, 10, 0, 1000);
    assert_eq!(r.plan.event_count, 11);
    assert!((r.plan.event_delay_ms - 1000.0 / 11.0).abs() < 1e-9);
    let values: Vec<i64> = r.transport.values();
    assert_eq!(&values[..11], &[0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
    assert_eq!(values.last(), Some(&101));
    assert!(r.report.corrected);
}

#[test]
fn flat_zero_step_sends_once_on_start_delay() {
    let r: Run = run(64, 64, 0, 250, 500);
    assert_eq!(r.plan.event_count, 1);
    assert_eq!(r.plan.event_delay_ms, 0.0);
    assert_eq!(r.transport.values(), vec![64]);
    assert_eq!(r.pacer.delays, vec![Duration::from_millis(250)]);
}

#[test]
fn mismatched_step_sign_passes_values_through() {
    let r: Run = run(0, 50, -5, 0, 200);
    assert_eq!(r.plan.event_count, 10);
    assert_eq!(
        r.transport.values(),
        vec![0, -5, -10, -15, -20, -25, -30, -35, -40, -45]
    );
    assert!(!r.report.corrected);
    for event in r.transport.events() {
        assert!(event.to_message()[2] < 0x80);
    }
}

#[test]
fn every_valid_ramp_ends_on_end_value() {
    for start in [0i64, 1, 37, 64, 127] {
        for end in [0i64, 5, 64, 101, 127] {
            for magnitude in [0i64, 1, 3, 7, 10, 127] {
                let step: i64 = if end >= start { magnitude } else { -magnitude };
                let r: Run = run(start, end, step, 0, 100);
                let last: i64 = r.report.last_value().unwrap();
                if step == 0 {
                    assert_eq!(last, start);
                } else {
                    assert_eq!(last, end, "{start} -> {end} step {step}");
                }
            }
        }
    }
}

#[test]
fn delivery_is_monotonic() {
    let up: Run = run(3, 120, 7, 0, 100);
    assert!(up.report.values.windows(2).all(|w| w[0] <= w[1]));
    let down: Run = run(120, 3, -7, 0, 100);
    assert!(down.report.values.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn huge_plan_is_clipped() {
    let raw: RampPlan = plan(0, 10_000, 1, 1000);
    assert_eq!(raw.event_count, 10_000);
    let r: Run = run(0, 10_000, 1, 0, 1000);
    assert!(r.plan.clipped);
    assert_eq!(r.plan.event_count, CLIPPED_EVENTS);
    assert_eq!(r.report.events_sent(), CLIPPED_EVENTS + 1);
}

#[test]
fn each_event_waits_before_it_is_sent() {
    let r: Run = run(0, 20, 10, 700, 5000);
    assert_eq!(r.pacer.delays.len(), r.transport.events().len());
    assert_eq!(
        r.pacer.delays,
        vec![
            Duration::from_millis(700),
            Duration::from_millis(2500),
            Duration::from_millis(2500),
        ]
    );
}
