/// Session walkthrough — drives one full resonance session headlessly.
///
/// Covenant → link → navigation → hold → report → restart, with the state
/// printed at each beat.
///
/// Run with: cargo run --example session_walkthrough
use resonance_engine::core::flow::{
    Phase, ResonanceFlow, HOLD_DURATION_MS, LINK_CROSSING_MS, LINK_SETTLE_MS,
};
use resonance_engine::schema::coordinate::BoundingRect;
use resonance_engine::schema::covenant::CovenantField;
use resonance_engine::schema::event::InputEvent;

fn main() {
    let mut flow = ResonanceFlow::builder()
        .seed(2026)
        .build()
        .expect("Failed to build flow");

    let mut now_ms: u64 = 0;
    let bounds = BoundingRect {
        left: 0.0,
        top: 0.0,
        width: 800.0,
        height: 600.0,
    };

    // --- Covenant ---
    println!("[{:>5} ms] phase: {}", now_ms, flow.phase().name());
    flow.apply(
        now_ms,
        InputEvent::TextChanged {
            field: CovenantField::UserName,
            value: "Morgan".to_string(),
        },
    );
    flow.apply(
        now_ms,
        InputEvent::TextChanged {
            field: CovenantField::TargetName,
            value: "Rei".to_string(),
        },
    );
    println!(
        "[{:>5} ms] covenant bound: '{}' × '{}'",
        now_ms,
        flow.covenant().user_name,
        flow.covenant().target_name
    );

    now_ms = run_for(&mut flow, now_ms, LINK_SETTLE_MS);
    println!("[{:>5} ms] linked: {}", now_ms, flow.is_linked());

    now_ms = run_for(&mut flow, now_ms, LINK_CROSSING_MS);
    println!("[{:>5} ms] phase: {}", now_ms, flow.phase().name());
    assert_eq!(flow.phase(), Phase::Navigating);

    // --- Navigation: drift toward the feverish-possessive corner ---
    for (px, py) in [(500.0, 300.0), (620.0, 410.0), (700.0, 480.0)] {
        flow.apply(
            now_ms,
            InputEvent::PointerMoved {
                x: px,
                y: py,
                bounds,
            },
        );
        let coords = flow.coordinate();
        println!(
            "[{:>5} ms] pointer ({:.0}, {:.0}) → coordinate ({:.2}, {:.2})",
            now_ms, px, py, coords.x, coords.y
        );
        now_ms += 120;
    }

    println!(
        "[{:>5} ms] quadrant: {}",
        now_ms,
        flow.coordinate().quadrant().key()
    );

    // --- Hold to resonate ---
    flow.apply(now_ms, InputEvent::HoldStarted);
    let half = now_ms + HOLD_DURATION_MS / 2;
    now_ms = run_for(&mut flow, now_ms, HOLD_DURATION_MS / 2);
    println!(
        "[{:>5} ms] hold progress: {:.0}%",
        now_ms,
        flow.hold_progress(half)
    );
    now_ms = run_for(&mut flow, now_ms, HOLD_DURATION_MS / 2);
    println!("[{:>5} ms] phase: {}", now_ms, flow.phase().name());

    let report = flow.report().expect("Report should exist while resonating");
    println!("\n=== Resonance Analysis ===");
    println!(
        "{} × {}\n",
        flow.covenant().user_name,
        flow.covenant().target_name
    );
    for entry in &report.composition {
        println!(
            "  {:>3}%  {}  [{}]",
            entry.percentage,
            entry.element,
            entry.kind.label()
        );
    }
    println!("\n  \"{}\"\n", report.tasting_note);

    // --- Restart ---
    flow.apply(now_ms, InputEvent::Restart);
    println!(
        "[{:>5} ms] restarted — phase: {}, names cleared: {}",
        now_ms,
        flow.phase().name(),
        !flow.covenant().is_complete()
    );
}

fn run_for(flow: &mut ResonanceFlow, mut now_ms: u64, duration_ms: u64) -> u64 {
    let end = now_ms + duration_ms;
    while now_ms < end {
        now_ms = (now_ms + 16).min(end);
        flow.tick(now_ms).expect("tick failed");
    }
    now_ms
}
