use bevy::app::AppExit;
use bevy::input::touch::Touches;
use bevy::math::primitives::Rectangle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::{CursorLeft, PrimaryWindow, WindowResized};

use crate::error::ConfigError;
use crate::input::adapter::{InputAdapter, PointerEvent, TouchPoint, Viewport};
use crate::simulation::readout::Frame;
use crate::simulation::scenario::Scenario;
use crate::simulation::scheduler::FrameLoop;

#[derive(Component)]
struct BodyIndex(pub usize);

/// Everything the bevy systems share: the frame loop, the adapter feeding it,
/// and the last frame to draw.
#[derive(Resource)]
struct Viewer {
    frame_loop: FrameLoop,
    adapter: InputAdapter,
    frame: Frame,
    pixels_per_unit: f32, // world -> screen
}

pub fn run_2d(scenario: Scenario) -> Result<(), ConfigError> {
    let (mut frame_loop, adapter) = scenario.instantiate()?;
    frame_loop.start();

    let frame = frame_loop.context().frame();
    let pixels_per_unit = (scenario.viewport.height / (2.0 * adapter.bounds().half_height)) as f32;

    App::new()
        .insert_resource(Viewer {
            frame_loop,
            adapter,
            frame,
            pixels_per_unit,
        })
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "hoversim".into(),
                resolution: (scenario.viewport.width as f32, scenario.viewport.height as f32).into(),
                ..default()
            }),
            ..default()
        }))
        .add_systems(Startup, setup_bodies_system)
        .add_systems(Update, (input_system, physics_step_system, sync_transforms_system).chain())
        .add_systems(Last, stop_on_exit_system)
        .run();
    Ok(())
}

fn setup_bodies_system(
    mut commands: Commands,
    viewer: Res<Viewer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn(Camera2dBundle::default());

    let bodies = &viewer.frame_loop.context().system.bodies;
    info!("run_2d: starting viewer with {} bodies", bodies.len());
    let n = bodies.len().max(1) as f32;
    for (i, body) in bodies.iter().enumerate() {
        // mesh in world units, transform scale carries pixels per unit
        let w = (2.0 * body.half_extents.x) as f32;
        let h = (2.0 * body.half_extents.y) as f32;

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Rectangle::new(w, h))),
                material: materials.add(ColorMaterial::from(Color::hsl(360.0 * i as f32 / n, 0.55, 0.65))),
                transform: Transform::from_xyz(
                    body.x.x as f32 * viewer.pixels_per_unit,
                    body.x.y as f32 * viewer.pixels_per_unit,
                    body.depth as f32,
                )
                .with_scale(Vec3::new(viewer.pixels_per_unit, viewer.pixels_per_unit, 1.0)),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }
}

/// Translate window, mouse and touch state into adapter events.
fn input_system(
    mut viewer: ResMut<Viewer>,
    windows: Query<&Window, With<PrimaryWindow>>,
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut resized: EventReader<WindowResized>,
    mut cursor_left: EventReader<CursorLeft>,
) {
    let Viewer {
        frame_loop,
        adapter,
        pixels_per_unit,
        ..
    } = &mut *viewer;

    for ev in resized.read() {
        let bounds = adapter.on_resize(Viewport::sized(ev.width as f64, ev.height as f64));
        frame_loop.submit_bounds(bounds);
        *pixels_per_unit = ev.height / (2.0 * bounds.half_height as f32);
    }

    let touch_points: Vec<TouchPoint> = touches
        .iter()
        .map(|t| {
            let p = t.position();
            TouchPoint {
                client_x: p.x as f64,
                client_y: p.y as f64,
            }
        })
        .collect();

    let mut events = Vec::new();
    if touches.any_just_pressed() {
        events.push(PointerEvent::TouchStart(&touch_points));
    } else if !touch_points.is_empty() {
        events.push(PointerEvent::TouchMove(&touch_points));
    }
    if touches.any_just_released() && touch_points.is_empty() {
        events.push(PointerEvent::TouchEnd);
    }

    let cursor = windows.get_single().ok().and_then(|w| w.cursor_position());
    match cursor {
        Some(p) if buttons.just_pressed(MouseButton::Left) => events.push(PointerEvent::MouseDown {
            client_x: p.x as f64,
            client_y: p.y as f64,
        }),
        Some(p) => events.push(PointerEvent::MouseMove {
            client_x: p.x as f64,
            client_y: p.y as f64,
        }),
        None if cursor_left.read().count() > 0 => events.push(PointerEvent::MouseLeave),
        None => {}
    }
    if buttons.just_released(MouseButton::Left) {
        events.push(PointerEvent::MouseUp);
    }

    for event in events {
        if let Some(signal) = adapter.handle(event) {
            signal.submit_to(frame_loop);
        }
    }
}

fn physics_step_system(time: Res<Time>, mut viewer: ResMut<Viewer>) {
    if let Some(frame) = viewer.frame_loop.tick(time.delta_seconds() as f64) {
        viewer.frame = frame;
    }
}

fn sync_transforms_system(viewer: Res<Viewer>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    let ppu = viewer.pixels_per_unit;
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(r) = viewer.frame.transforms.get(*i) {
            transform.translation = Vec3::new(
                r.position.x as f32 * ppu,
                r.position.y as f32 * ppu,
                r.position.z as f32,
            );
            transform.rotation = Quat::from_rotation_z(r.rotation as f32);
            transform.scale = Vec3::new(r.scale as f32 * ppu, r.scale as f32 * ppu, 1.0);
        }
    }
}

fn stop_on_exit_system(mut exits: EventReader<AppExit>, mut viewer: ResMut<Viewer>) {
    if exits.read().count() > 0 {
        viewer.frame_loop.stop();
    }
}
