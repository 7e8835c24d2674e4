use std::path::PathBuf;

use hoversim::simulation::integrator::{clamp_dt, MAX_DT};
use hoversim::simulation::forces::FieldInput;
use hoversim::{
    repulsion_delta, resolve_collisions, run_headless, spawn_bodies, step, Body, Bounds, Camera,
    CollisionParams, ConfigError, ForceSet, FrameLoop, InputAdapter, InputSignal, InteractionState,
    NVec2, PointerEvent, PointerRepulsion, PointerSample, Scenario, ScenarioConfig, SimulationConfig,
    SimulationContext, SpawnConfig, System, TouchPoint, Viewport,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: f64 = 1.0 / 60.0;

/// Body at rest with the default half extent
pub fn body_at(id: usize, x: f64, y: f64) -> Body {
    Body::new(id, NVec2::new(x, y), 0.5)
}

/// Context over `bodies` inside generous bounds, pointer inactive
pub fn context(bodies: Vec<Body>) -> SimulationContext {
    SimulationContext::new(System::new(bodies, 7), SimulationConfig::default(), Bounds::new(8.0, 5.0)).unwrap()
}

/// Two bodies overlapping along x, centers `dist` apart
pub fn overlapping_pair(dist: f64) -> Vec<Body> {
    vec![body_at(0, -dist / 2.0, 0.0), body_at(1, dist / 2.0, 0.0)]
}

/// reach - distance for a pair, positive when overlapping
pub fn overlap(ctx: &SimulationContext, i: usize, j: usize) -> f64 {
    let (bi, bj) = (&ctx.system.bodies[i], &ctx.system.bodies[j]);
    bi.extent() + bj.extent() + ctx.config().collision_softness - (bj.x - bi.x).norm()
}

pub fn dragged_count(ctx: &SimulationContext) -> usize {
    ctx.system.bodies.iter().filter(|b| b.dragged).count()
}

/// Start dragging body `i` by pressing on its center
pub fn grab(ctx: &mut SimulationContext, i: usize) {
    let x = ctx.system.bodies[i].x;
    ctx.set_pointer(PointerSample::at(x.x, x.y));
    ctx.press();
}

// ==================================================================================
// Repulsion tests
// ==================================================================================

#[test]
fn repulsion_zero_at_and_beyond_radius() {
    for d in [2.0, 2.5, 10.0] {
        let dv = repulsion_delta(NVec2::new(d, 0.0), 2.0, 30.0, DT);
        assert_eq!(dv, NVec2::zeros(), "non-zero repulsion at distance {}", d);
    }
}

#[test]
fn repulsion_grows_as_pointer_approaches() {
    let mut last = 0.0;
    for d in [1.9, 1.5, 1.0, 0.5, 0.1] {
        let dv = repulsion_delta(NVec2::new(0.0, d), 2.0, 30.0, DT);
        let mag = dv.norm();
        assert!(mag > last, "repulsion did not increase at distance {}: {} <= {}", d, mag, last);
        assert!(dv.y > 0.0, "repulsion does not point away from the pointer");
        last = mag;
    }
}

#[test]
fn repulsion_pointer_on_body_is_finite_impulse() {
    let mut sys = System::new(vec![body_at(0, 1.0, -1.0)], 3);
    let forces = ForceSet::new().with(PointerRepulsion {
        radius: 2.0,
        strength: 30.0,
    });
    let input = FieldInput {
        pointer: PointerSample::at(1.0, -1.0),
        bounds: Bounds::new(8.0, 5.0),
        dt: DT,
    };

    let mut out = vec![NVec2::zeros(); 1];
    forces.accumulate(&input, &mut sys, &mut out);

    assert!(out[0].iter().all(|c| c.is_finite()), "NaN from degenerate repulsion");
    assert!((out[0].norm() - 30.0 * DT).abs() < 1e-12, "expected a unit impulse scaled by strength");
}

#[test]
fn repulsion_skipped_for_inactive_pointer() {
    let mut ctx = context(vec![body_at(0, 0.5, 0.0)]);
    ctx.set_pointer(PointerSample { x: 0.0, y: 0.0, active: false });
    step(&mut ctx, DT);
    assert_eq!(ctx.system.bodies[0].v, NVec2::zeros());
}

#[test]
fn step_with_pointer_on_body_stays_finite() {
    let mut ctx = context(vec![body_at(0, 0.0, 0.0)]);
    ctx.set_pointer(PointerSample::at(0.0, 0.0));
    for _ in 0..10 {
        step(&mut ctx, DT);
    }
    assert!(ctx.system.bodies[0].is_finite());
    assert!(ctx.system.bodies[0].x.norm() > 0.0, "body never left the pointer");
}

// ==================================================================================
// Collision tests
// ==================================================================================

#[test]
fn collision_step_reduces_overlap() {
    let mut ctx = context(overlapping_pair(0.6));
    let before = overlap(&ctx, 0, 1);
    assert!(before > 0.0);

    step(&mut ctx, DT);

    let after = overlap(&ctx, 0, 1);
    assert!(after < before, "overlap did not shrink: {} -> {}", before, after);
}

#[test]
fn collision_impulse_is_equal_and_opposite() {
    let mut bodies = overlapping_pair(0.8);
    bodies[0].v = NVec2::new(2.0, 0.5);
    bodies[1].v = NVec2::new(-0.5, 0.0);
    let mut sys = System::new(bodies, 1);
    let v0: Vec<NVec2> = sys.bodies.iter().map(|b| b.v).collect();

    let contacts = resolve_collisions(&mut sys, &CollisionParams::from_config(&SimulationConfig::default()));
    assert_eq!(contacts, 1);

    let dv0 = sys.bodies[0].v - v0[0];
    let dv1 = sys.bodies[1].v - v0[1];
    assert!(dv0.norm() > 0.0, "approaching pair got no impulse");
    assert!((dv0 + dv1).norm() < 1e-12, "impulses not opposite: {:?} vs {:?}", dv0, dv1);
    assert!(dv0.x < 0.0, "body 0 should be pushed back along -x");
}

#[test]
fn step_collision_conserves_momentum_up_to_damping() {
    let mut bodies = overlapping_pair(0.8);
    bodies[0].v = NVec2::new(2.0, 0.5);
    bodies[1].v = NVec2::new(-0.5, 0.0);
    let total_before = bodies[0].v + bodies[1].v;
    let mut ctx = context(bodies);
    let damping = ctx.config().damping;

    let report = step(&mut ctx, DT);
    assert_eq!(report.contacts, 1);
    assert_eq!(report.clamped, 0);

    let (v0, v1) = (ctx.system.bodies[0].v, ctx.system.bodies[1].v);
    let total_after = v0 + v1;
    assert!(
        (total_after - total_before * damping).norm() < 1e-12,
        "pair momentum changed: {:?} -> {:?}",
        total_before,
        total_after
    );
    assert!(v0.x < 2.0 * damping, "body 0 got no impulse");
}

#[test]
fn collision_spin_is_cosmetic() {
    let mut bodies = overlapping_pair(0.8);
    bodies[0].v = NVec2::new(0.0, 1.0);
    let mut sys = System::new(bodies, 1);
    resolve_collisions(&mut sys, &CollisionParams::from_config(&SimulationConfig::default()));

    assert!(sys.bodies[0].spin != 0.0 && sys.bodies[1].spin != 0.0);
    // sliding past each other does not change normal velocity
    assert_eq!(sys.bodies[0].v, NVec2::new(0.0, 1.0));
}

#[test]
fn separated_bodies_do_not_interact() {
    let mut sys = System::new(overlapping_pair(3.0), 1);
    let contacts = resolve_collisions(&mut sys, &CollisionParams::from_config(&SimulationConfig::default()));
    assert_eq!(contacts, 0);
    assert_eq!(sys.bodies[0].x, NVec2::new(-1.5, 0.0));
}

#[test]
fn dragged_body_pushes_but_is_not_pushed() {
    let mut ctx = context(overlapping_pair(0.6));
    grab(&mut ctx, 0);
    let held = ctx.system.bodies[0].x;
    let other = ctx.system.bodies[1].x;

    let params = CollisionParams::from_config(ctx.config());
    resolve_collisions(&mut ctx.system, &params);

    assert_eq!(ctx.system.bodies[0].x, held);
    assert!(ctx.system.bodies[1].x.x > other.x);
}

// ==================================================================================
// Degeneracy tests
// ==================================================================================

#[test]
fn coincident_bodies_separate_without_nan() {
    let mut ctx = context(vec![body_at(0, 1.0, 1.0), body_at(1, 1.0, 1.0)]);
    step(&mut ctx, DT);

    for b in &ctx.system.bodies {
        assert!(b.is_finite(), "non-finite state after coincident step: {:?}", b);
    }
    let d = (ctx.system.bodies[0].x - ctx.system.bodies[1].x).norm();
    assert!(d > 0.0, "coincident bodies still on the same spot");
}

#[test]
fn coincident_bodies_under_pointer_stay_finite() {
    let mut ctx = context(vec![body_at(0, 0.0, 0.0), body_at(1, 0.0, 0.0), body_at(2, 0.0, 0.0)]);
    ctx.set_pointer(PointerSample::at(0.0, 0.0));
    for _ in 0..120 {
        step(&mut ctx, DT);
    }
    assert!(ctx.system.bodies.iter().all(|b| b.is_finite()));
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn dt_is_clamped() {
    assert_eq!(clamp_dt(10.0), MAX_DT);
    assert_eq!(clamp_dt(-1.0), 0.0);
    assert_eq!(clamp_dt(f64::NAN), 0.0);
    assert_eq!(clamp_dt(f64::INFINITY), 0.0);
    assert_eq!(clamp_dt(0.01), 0.01);

    let mut ctx = context(vec![body_at(0, 0.0, 0.0)]);
    let report = step(&mut ctx, 30.0);
    assert_eq!(report.dt, MAX_DT);
    assert!((ctx.system.t - MAX_DT).abs() < 1e-15);
}

#[test]
fn damping_decays_free_motion() {
    let mut b = body_at(0, 0.0, 0.0);
    b.v = NVec2::new(1.0, 0.0);
    let mut ctx = context(vec![b]);
    step(&mut ctx, DT);
    let damping = ctx.config().damping;
    assert!((ctx.system.bodies[0].v.x - damping).abs() < 1e-12);
    assert!((ctx.system.bodies[0].x.x - damping * DT).abs() < 1e-12);
}

#[test]
fn drift_is_applied_every_frame() {
    let mut b = body_at(0, 0.0, 0.0);
    b.drift = NVec2::new(0.01, 0.0);
    let mut ctx = context(vec![b]);
    for _ in 0..60 {
        step(&mut ctx, DT);
    }
    assert!(ctx.system.bodies[0].x.x > 0.0);
    assert!(ctx.system.bodies[0].v.x > 0.0);
}

#[test]
fn speed_ceiling_holds() {
    let mut b = body_at(0, 0.0, 0.0);
    b.v = NVec2::new(1.0e6, -1.0e6);
    let mut ctx = context(vec![b]);
    let report = step(&mut ctx, DT);
    assert_eq!(report.clamped, 1);
    assert!(ctx.system.bodies[0].v.norm() <= ctx.config().max_speed + 1e-9);
}

// ==================================================================================
// Containment tests
// ==================================================================================

#[test]
fn spawned_bodies_stay_contained() {
    let scenario = Scenario::build_scenario(ScenarioConfig::default()).unwrap();
    let (mut frame_loop, _adapter) = scenario.instantiate().unwrap();
    frame_loop.start();

    let margin = scenario.config.boundary_margin;
    for _ in 0..3000 {
        frame_loop.tick(DT);
        let ctx = frame_loop.context();
        let limit = ctx.bounds().as_vec() + NVec2::repeat(margin);
        for b in &ctx.system.bodies {
            assert!(b.x.x.abs() <= limit.x && b.x.y.abs() <= limit.y, "body {} escaped to {:?}", b.id, b.x);
        }
    }
}

#[test]
fn boundary_pushes_only_past_the_bounds() {
    let config = SimulationConfig::default();
    // edges at 7.9 (inside) and 8.1 (outside) of a half width of 8
    let mut sys = System::new(vec![body_at(0, 7.4, 0.0), body_at(1, 7.6, 0.0)], 1);
    let input = FieldInput {
        pointer: PointerSample::inactive(),
        bounds: Bounds::new(8.0, 5.0),
        dt: DT,
    };
    let mut out = vec![NVec2::zeros(); 2];
    ForceSet::from_config(&config).accumulate(&input, &mut sys, &mut out);

    assert_eq!(out[0], NVec2::zeros());
    assert!((out[1].x + config.boundary_strength * DT).abs() < 1e-12);
    assert_eq!(out[1].y, 0.0);
}

#[test]
fn escaped_body_is_pulled_back() {
    let mut ctx = SimulationContext::new(
        System::new(vec![body_at(0, 12.0, -9.0)], 1),
        SimulationConfig::default(),
        Bounds::new(5.0, 3.0),
    )
    .unwrap();
    let margin = ctx.config().boundary_margin;

    for _ in 0..2000 {
        step(&mut ctx, DT);
    }
    let x = ctx.system.bodies[0].x;
    assert!(x.x.abs() <= 5.0 + margin && x.y.abs() <= 3.0 + margin, "still outside at {:?}", x);
}

#[test]
fn resize_does_not_move_bodies() {
    let mut b = body_at(0, 2.0, 1.0);
    b.v = NVec2::new(0.3, -0.2);
    let mut ctx = context(vec![b, body_at(1, -2.0, 0.0)]);
    grab(&mut ctx, 1);
    let before: Vec<(NVec2, NVec2)> = ctx.system.bodies.iter().map(|b| (b.x, b.v)).collect();

    ctx.set_bounds(Bounds::new(1.0, 1.0));

    let after: Vec<(NVec2, NVec2)> = ctx.system.bodies.iter().map(|b| (b.x, b.v)).collect();
    assert_eq!(before, after);
    assert_eq!(ctx.bounds(), Bounds::new(1.0, 1.0));
    assert_eq!(ctx.interaction().state(), InteractionState::Dragging(1));
}

// ==================================================================================
// Interaction tests
// ==================================================================================

#[test]
fn hover_follows_pointer() {
    let mut ctx = context(vec![body_at(0, 0.0, 0.0), body_at(1, 3.0, 0.0)]);

    ctx.set_pointer(PointerSample::at(2.8, 0.1));
    step(&mut ctx, DT);
    assert_eq!(ctx.interaction().state(), InteractionState::Hover(1));
    assert_eq!(ctx.frame().hovered, Some(1));

    ctx.set_pointer(PointerSample::at(-5.0, 4.0));
    step(&mut ctx, DT);
    assert_eq!(ctx.interaction().state(), InteractionState::Idle);

    ctx.set_pointer(PointerSample::at(0.0, 0.0));
    step(&mut ctx, DT);
    ctx.set_pointer(PointerSample { active: false, ..ctx.pointer() });
    step(&mut ctx, DT);
    assert_eq!(ctx.interaction().state(), InteractionState::Idle);
    assert!(ctx.system.bodies.iter().all(|b| !b.hovered));
}

#[test]
fn press_on_empty_space_does_nothing() {
    let mut ctx = context(vec![body_at(0, 0.0, 0.0)]);
    ctx.set_pointer(PointerSample::at(4.0, 4.0));
    ctx.press();
    assert_eq!(dragged_count(&ctx), 0);
}

#[test]
fn drag_converges_on_pointer() {
    let mut ctx = context(vec![body_at(0, 0.0, 0.0)]);
    grab(&mut ctx, 0);

    let target = NVec2::new(3.0, 1.0);
    ctx.set_pointer(PointerSample::at(target.x, target.y));

    let mut last = (ctx.system.bodies[0].x - target).norm();
    for frame in 0..120 {
        step(&mut ctx, DT);
        let d = (ctx.system.bodies[0].x - target).norm();
        assert!(d < last, "distance grew on frame {}: {} -> {}", frame, last, d);
        last = d;
    }
    assert!(last < 1e-3, "drag did not converge: {}", last);
}

#[test]
fn release_keeps_direction_and_damps_speed() {
    let mut ctx = context(vec![body_at(0, 0.0, 0.0)]);
    grab(&mut ctx, 0);
    ctx.set_pointer(PointerSample::at(-2.0, 1.5));
    for _ in 0..5 {
        step(&mut ctx, DT);
    }

    let v_last = ctx.system.bodies[0].v;
    ctx.release();
    let v_after = ctx.system.bodies[0].v;

    let k = ctx.config().release_damping;
    assert!((v_after - v_last * k).norm() < 1e-12);
    assert!((v_after.normalize().dot(&v_last.normalize()) - 1.0).abs() < 1e-12);
    assert_eq!(dragged_count(&ctx), 0);
}

#[test]
fn released_body_keeps_moving() {
    let mut ctx = context(vec![body_at(0, 0.0, 0.0)]);
    grab(&mut ctx, 0);
    ctx.set_pointer(PointerSample::at(2.0, 0.0));
    step(&mut ctx, DT);
    ctx.release();

    let x0 = ctx.system.bodies[0].x.x;
    step(&mut ctx, DT);
    assert!(ctx.system.bodies[0].x.x > x0, "tossed body stopped dead");
}

#[test]
fn pointer_leave_releases_drag() {
    let mut ctx = context(vec![body_at(0, 0.0, 0.0)]);
    grab(&mut ctx, 0);
    ctx.set_pointer(PointerSample { active: false, ..ctx.pointer() });
    step(&mut ctx, DT);
    assert_eq!(dragged_count(&ctx), 0);
    assert_eq!(ctx.interaction().state(), InteractionState::Idle);
}

#[test]
fn at_most_one_body_dragged() {
    let mut ctx = context(vec![body_at(0, -3.0, 0.0), body_at(1, 0.0, 0.0), body_at(2, 3.0, 0.0)]);

    for i in [0, 1, 2, 1, 0] {
        grab(&mut ctx, i);
        assert_eq!(dragged_count(&ctx), 1);
        assert!(ctx.system.bodies[i].dragged);
    }
    step(&mut ctx, DT);
    assert_eq!(dragged_count(&ctx), 1);
    assert_eq!(ctx.frame().dragged, Some(0));
}

#[test]
fn rapid_presses_through_frame_loop_keep_single_drag() {
    let mut frame_loop = FrameLoop::new(context(vec![body_at(0, -1.0, 0.0), body_at(1, 1.0, 0.0)]));
    frame_loop.start();
    for x in [-1.0, 1.0, -1.0] {
        frame_loop.submit_press(PointerSample::at(x, 0.0));
    }
    frame_loop.tick(DT);
    assert_eq!(dragged_count(frame_loop.context()), 1);
    assert!(frame_loop.context().system.bodies[0].dragged);
}

#[test]
fn press_grabs_where_it_happened_even_if_pointer_moves_on() {
    let mut frame_loop = FrameLoop::new(context(vec![body_at(0, 0.0, 0.0)]));
    frame_loop.start();

    InputSignal::Press(PointerSample::at(0.0, 0.0)).submit_to(&mut frame_loop);
    InputSignal::Sample(PointerSample::at(3.0, 3.0)).submit_to(&mut frame_loop);

    let frame = frame_loop.tick(DT).unwrap();
    assert_eq!(frame.dragged, Some(0));
    assert_eq!(frame_loop.context().pointer(), PointerSample::at(3.0, 3.0));
}

// ==================================================================================
// Read-out tests
// ==================================================================================

#[test]
fn float_offset_is_read_out_only() {
    let mut b = body_at(0, 1.0, 2.0);
    b.phase = std::f64::consts::FRAC_PI_2;
    b.float_speed = 1.0;
    b.depth = -0.5;
    let ctx = context(vec![b]);

    let frame = ctx.frame();
    let amp = ctx.config().float_amplitude;
    let r = &frame.transforms[0];
    assert!((r.position.y - (2.0 + amp)).abs() < 1e-12);
    assert_eq!(r.position.z, -0.5);
    assert_eq!(ctx.system.bodies[0].x, NVec2::new(1.0, 2.0));
}

#[test]
fn hovered_body_is_scaled() {
    let mut ctx = context(vec![body_at(0, 0.0, 0.0), body_at(1, 3.0, 0.0)]);
    ctx.set_pointer(PointerSample::at(0.0, 0.0));
    step(&mut ctx, DT);

    let frame = ctx.frame();
    assert_eq!(frame.transforms[0].scale, ctx.config().hover_scale);
    assert_eq!(frame.transforms[1].scale, 1.0);
    assert_eq!(frame.transforms.iter().map(|r| r.id).collect::<Vec<_>>(), vec![0, 1]);
}

// ==================================================================================
// Input adapter tests
// ==================================================================================

pub fn unit_adapter() -> InputAdapter {
    // 90 degree fov at distance 1 sees one unit either side vertically
    InputAdapter::new(
        Camera {
            fov_degrees: 90.0,
            distance: 1.0,
        },
        Viewport::sized(200.0, 100.0),
    )
}

#[test]
fn adapter_maps_client_to_world() {
    let mut adapter = unit_adapter();
    let b = adapter.bounds();
    assert!((b.half_height - 1.0).abs() < 1e-9);
    assert!((b.half_width - 2.0).abs() < 1e-9);

    let center = adapter.on_pointer_move(100.0, 50.0);
    assert!(center.active);
    assert!(center.x.abs() < 1e-9 && center.y.abs() < 1e-9);

    let corner = adapter.on_pointer_move(0.0, 0.0);
    assert!((corner.x + 2.0).abs() < 1e-9 && (corner.y - 1.0).abs() < 1e-9);
}

#[test]
fn adapter_leave_keeps_position() {
    let mut adapter = unit_adapter();
    let moved = adapter.on_pointer_move(150.0, 25.0);
    let left = adapter.on_pointer_leave();
    assert!(!left.active);
    assert_eq!((left.x, left.y), (moved.x, moved.y));
}

#[test]
fn adapter_ignores_empty_touch_lists() {
    let mut adapter = unit_adapter();
    assert_eq!(adapter.handle(PointerEvent::TouchStart(&[])), None);
    assert_eq!(adapter.handle(PointerEvent::TouchMove(&[])), None);

    let touches = [TouchPoint {
        client_x: 100.0,
        client_y: 50.0,
    }];
    assert!(matches!(adapter.handle(PointerEvent::TouchStart(&touches)), Some(InputSignal::Press(s)) if s.active));
    assert!(matches!(adapter.handle(PointerEvent::TouchEnd), Some(InputSignal::Release(s)) if !s.active));
}

#[test]
fn adapter_mouse_and_touch_agree() {
    let mut adapter = unit_adapter();
    let mouse = adapter
        .handle(PointerEvent::MouseMove {
            client_x: 40.0,
            client_y: 70.0,
        })
        .map(|s| s.sample());
    let touch = adapter
        .handle(PointerEvent::TouchMove(&[TouchPoint {
            client_x: 40.0,
            client_y: 70.0,
        }]))
        .map(|s| s.sample());
    assert_eq!(mouse, touch);
}

#[test]
fn adapter_resize_to_zero_stays_finite() {
    let mut adapter = unit_adapter();
    let b = adapter.on_resize(Viewport::sized(0.0, 0.0));
    assert!(b.half_width.is_finite() && b.half_height.is_finite());
    let s = adapter.on_pointer_move(10.0, 10.0);
    assert!(s.x.is_finite() && s.y.is_finite());
}

// ==================================================================================
// Scheduler tests
// ==================================================================================

#[test]
fn frame_loop_start_stop_idempotent() {
    let mut frame_loop = FrameLoop::new(context(vec![body_at(0, 0.0, 0.0)]));
    assert!(frame_loop.tick(DT).is_none(), "stopped loop produced a frame");

    frame_loop.start();
    frame_loop.start();
    assert!(frame_loop.is_running());
    assert!(frame_loop.tick(DT).is_some());

    frame_loop.stop();
    frame_loop.stop();
    assert!(!frame_loop.is_running());
}

#[test]
fn stopped_loop_touches_nothing() {
    let mut b = body_at(0, 0.0, 0.0);
    b.v = NVec2::new(1.0, 1.0);
    let mut frame_loop = FrameLoop::new(context(vec![b]));
    frame_loop.start();
    frame_loop.tick(DT);
    frame_loop.stop();

    let x = frame_loop.context().system.bodies[0].x;
    frame_loop.submit_pointer(PointerSample::at(0.0, 0.0));
    frame_loop.submit_bounds(Bounds::new(1.0, 1.0));
    assert!(frame_loop.tick(DT).is_none());
    assert_eq!(frame_loop.context().system.bodies[0].x, x);
    assert_eq!(frame_loop.context().bounds(), Bounds::new(8.0, 5.0));
}

#[test]
fn frame_loop_applies_latest_samples() {
    let mut frame_loop = FrameLoop::new(context(vec![body_at(0, 0.0, 0.0)]));
    frame_loop.start();

    frame_loop.submit_pointer(PointerSample::at(1.0, 1.0));
    frame_loop.submit_pointer(PointerSample::at(-2.0, 0.5));
    frame_loop.submit_bounds(Bounds::new(6.0, 4.0));

    let frame = frame_loop.tick(DT).unwrap();
    assert_eq!(frame.transforms.len(), 1);
    assert_eq!(frame_loop.context().pointer(), PointerSample::at(-2.0, 0.5));
    assert_eq!(frame_loop.context().bounds(), Bounds::new(6.0, 4.0));
}

#[test]
fn input_signal_drives_drag() {
    let mut adapter = unit_adapter();
    let mut frame_loop = FrameLoop::new(context(vec![body_at(0, 0.0, 0.0)]));
    frame_loop.start();

    let down = adapter
        .handle(PointerEvent::MouseDown {
            client_x: 100.0,
            client_y: 50.0,
        })
        .unwrap();
    down.submit_to(&mut frame_loop);
    let frame = frame_loop.tick(DT).unwrap();
    assert_eq!(frame.dragged, Some(0));

    adapter.handle(PointerEvent::MouseUp).unwrap().submit_to(&mut frame_loop);
    let frame = frame_loop.tick(DT).unwrap();
    assert_eq!(frame.dragged, None);
}

// ==================================================================================
// Configuration tests
// ==================================================================================

#[test]
fn presets_are_valid() {
    assert!(SimulationConfig::cards().validate().is_ok());
    assert!(SimulationConfig::cubes().validate().is_ok());
    assert_ne!(SimulationConfig::cards(), SimulationConfig::cubes());
}

#[test]
fn invalid_config_is_rejected() {
    let bad_damping = SimulationConfig {
        damping: 0.0,
        ..SimulationConfig::default()
    };
    assert!(matches!(bad_damping.validate(), Err(ConfigError::OutOfRange { field: "damping", .. })));

    let fast_drag = SimulationConfig {
        drag_follow_gain: 25.0,
        ..SimulationConfig::default()
    };
    assert!(matches!(fast_drag.validate(), Err(ConfigError::DragGainTooHigh { .. })));

    let no_radius = SimulationConfig {
        repulsion_radius: 0.0,
        ..SimulationConfig::default()
    };
    assert!(SimulationContext::new(System::new(vec![], 0), no_radius, Bounds::new(1.0, 1.0)).is_err());
}

#[test]
fn yaml_overrides_apply_on_top_of_preset() {
    let cfg = ScenarioConfig::from_yaml_str("preset: cards\nsimulation:\n  damping: 0.9\n").unwrap();
    let sim = cfg.simulation_config().unwrap();
    assert_eq!(sim.damping, 0.9);
    assert_eq!(sim.repulsion_radius, SimulationConfig::cards().repulsion_radius);
}

#[test]
fn yaml_errors_are_reported() {
    let unknown = ScenarioConfig::from_yaml_str("preset: spheres\n").unwrap();
    assert!(matches!(unknown.simulation_config(), Err(ConfigError::UnknownPreset(_))));

    assert!(matches!(
        ScenarioConfig::from_yaml_str("simulation:\n  dampnig: 0.9\n"),
        Err(ConfigError::Yaml(_))
    ));
}

#[test]
fn empty_yaml_is_default_scenario() {
    let cfg = ScenarioConfig::from_yaml_str("").unwrap();
    assert_eq!(cfg.preset, "cubes");
    assert_eq!(cfg.simulation_config().unwrap(), SimulationConfig::cubes());
}

#[test]
fn shipped_scenarios_load() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios");
    for file in ["cards.yaml", "cubes.yaml"] {
        let cfg = ScenarioConfig::from_path(&dir.join(file)).unwrap();
        let scenario = Scenario::build_scenario(cfg).unwrap();
        let (frame_loop, _) = scenario.instantiate().unwrap();
        assert_eq!(frame_loop.context().system.bodies.len(), scenario.spawn.count);
    }
}

#[test]
fn bad_spawn_is_rejected() {
    let mut cfg = ScenarioConfig::default();
    cfg.spawn.radial_min = 0.9;
    cfg.spawn.radial_max = 0.1;
    assert!(matches!(Scenario::build_scenario(cfg), Err(ConfigError::Spawn(_))));
}

#[test]
fn non_finite_spawn_ranges_are_rejected() {
    for yaml in [
        "spawn:\n  depth_min: .nan\n  depth_max: .nan\n",
        "spawn:\n  radial_max: .inf\n",
        "spawn:\n  float_speed_min: -.inf\n",
    ] {
        let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
        assert!(
            matches!(Scenario::build_scenario(cfg), Err(ConfigError::Spawn(_))),
            "accepted {:?}",
            yaml
        );
    }
}

// ==================================================================================
// Spawn tests
// ==================================================================================

#[test]
fn spawn_is_seeded_and_inside_bounds() {
    let spawn = SpawnConfig::default();
    let bounds = Bounds::new(7.0, 4.0);
    let a = spawn_bodies(&spawn, bounds, 0.005, &mut StdRng::seed_from_u64(11));
    let b = spawn_bodies(&spawn, bounds, 0.005, &mut StdRng::seed_from_u64(11));

    assert_eq!(a.len(), spawn.count);
    for (ba, bb) in a.iter().zip(b.iter()) {
        assert_eq!(ba.x, bb.x);
        assert!(ba.x.norm() <= spawn.radial_max * 4.0 + 1e-12);
        assert!(ba.drift.norm() <= 0.005 + 1e-12);
        assert!(!ba.dragged && !ba.hovered);
    }
}

// ==================================================================================
// Headless run
// ==================================================================================

#[test]
fn headless_run_stays_finite() {
    let scenario = Scenario::build_scenario(ScenarioConfig::default()).unwrap();
    let (mut frame_loop, mut adapter) = scenario.instantiate().unwrap();
    let summary = run_headless(&mut frame_loop, &mut adapter, 600);

    assert_eq!(summary.frames, 600);
    assert!(summary.all_finite);
    assert!(!frame_loop.is_running());
}

#[test]
fn headless_sweep_follows_scenario_viewport() {
    let mut cfg = ScenarioConfig::default();
    cfg.view.width = 400.0;
    cfg.view.height = 400.0;
    let scenario = Scenario::build_scenario(cfg).unwrap();
    let (mut frame_loop, mut adapter) = scenario.instantiate().unwrap();

    let summary = run_headless(&mut frame_loop, &mut adapter, 60);
    assert_eq!(summary.frames, 60);

    let pointer = frame_loop.context().pointer();
    let bounds = adapter.bounds();
    assert!(pointer.active);
    assert!(
        pointer.x.abs() <= 0.6 * bounds.half_width + 1e-9 && pointer.y.abs() <= 0.6 * bounds.half_height + 1e-9,
        "pointer swept outside the viewport: {:?}",
        pointer
    );
}
