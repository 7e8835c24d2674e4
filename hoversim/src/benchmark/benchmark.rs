use std::f64::consts::TAU;
use std::time::Instant;

use tracing::info;

use crate::error::ConfigError;
use crate::input::adapter::{InputAdapter, PointerEvent};
use crate::simulation::engine::{step, SimulationContext};
use crate::simulation::params::SimulationConfig;
use crate::simulation::scheduler::FrameLoop;
use crate::simulation::states::{Body, Bounds, NVec2, PointerSample, System};

const FRAME_DT: f64 = 1.0 / 60.0;

/// Helper to build a context of `n` bodies
/// deterministic positions, no rand needed
fn make_context(n: usize) -> Result<SimulationContext, ConfigError> {
    let bodies = (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = NVec2::new((i_f * 0.37).sin() * 4.0, (i_f * 0.13).cos() * 2.5);
            let mut b = Body::new(i, x, 0.3);
            b.drift = NVec2::new((i_f * 0.7).cos(), (i_f * 0.7).sin()) * 0.004;
            b
        })
        .collect();

    SimulationContext::new(System::new(bodies, 42), SimulationConfig::default(), Bounds::new(7.0, 4.0))
}

/// Time `step` for a range of body counts, pointer active in the middle
/// Paste output directly into excel to graph
pub fn bench_step() -> Result<(), ConfigError> {
    println!("N,us_per_step,contacts_per_step");

    for n in [4, 8, 16, 32, 64, 128, 256] {
        // Small n: average over more steps to smooth noise
        let steps = if n <= 32 { 5000 } else { 500 };

        let mut ctx = make_context(n)?;
        ctx.set_pointer(PointerSample::at(0.0, 0.0));

        // Warm-up
        for _ in 0..10 {
            step(&mut ctx, FRAME_DT);
        }

        let mut contacts = 0;
        let t0 = Instant::now();
        for _ in 0..steps {
            contacts += step(&mut ctx, FRAME_DT).contacts;
        }
        let us = t0.elapsed().as_secs_f64() * 1e6 / steps as f64;

        println!("{},{:.3},{:.2}", n, us, contacts as f64 / steps as f64);
    }
    Ok(())
}

/// What a headless run observed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeadlessSummary {
    pub frames: usize,
    pub contacts: usize,
    pub max_overshoot: f64, // furthest any body edge got past the bounds
    pub all_finite: bool,
    pub contained: bool, // every center stayed within bounds + boundary_margin
}

/// Drive `frame_loop` for `frames` ticks at 60 Hz while the pointer sweeps a
/// circle across the adapter's viewport.
pub fn run_headless(frame_loop: &mut FrameLoop, adapter: &mut InputAdapter, frames: usize) -> HeadlessSummary {
    let view = adapter.viewport();
    let mut summary = HeadlessSummary {
        all_finite: true,
        contained: true,
        ..Default::default()
    };

    frame_loop.start();
    for f in 0..frames {
        let angle = f as f64 / 240.0 * TAU;
        let event = PointerEvent::MouseMove {
            client_x: view.left + view.width * (0.5 + 0.3 * angle.cos()),
            client_y: view.top + view.height * (0.5 + 0.3 * angle.sin()),
        };
        if let Some(signal) = adapter.handle(event) {
            signal.submit_to(frame_loop);
        }

        if frame_loop.tick(FRAME_DT).is_none() {
            break;
        }
        summary.frames += 1;
        summary.contacts += frame_loop.last_report().contacts;

        let ctx = frame_loop.context();
        let bounds = ctx.bounds().as_vec();
        let tolerance = bounds + NVec2::repeat(ctx.config().boundary_margin);
        for b in &ctx.system.bodies {
            summary.all_finite &= b.is_finite();
            let edge = b.x.abs() + b.half_extents - bounds;
            summary.max_overshoot = summary.max_overshoot.max(edge.max());
            summary.contained &= b.x.x.abs() <= tolerance.x && b.x.y.abs() <= tolerance.y;
        }
    }
    frame_loop.stop();

    info!(
        frames = summary.frames,
        contacts = summary.contacts,
        max_overshoot = summary.max_overshoot,
        all_finite = summary.all_finite,
        contained = summary.contained,
        "headless run finished"
    );
    summary
}
