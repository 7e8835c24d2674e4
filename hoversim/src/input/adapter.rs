//! Pointer, touch and resize normalization
//!
//! Turns client-space events into world-space [`PointerSample`]s and
//! [`Bounds`], so the simulation never sees event types. Mouse and touch
//! produce the same signals; an empty touch list is a no-op, never an error.
//!
//! World space is the camera's view of the `z = 0` plane: the visible half
//! height is `distance * tan(fov / 2)`, +y is up, the origin is the viewport
//! center.

use crate::simulation::scheduler::FrameLoop;
use crate::simulation::states::{Bounds, PointerSample};

/// Container rectangle in client pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn sized(width: f64, height: f64) -> Self {
        Self { left: 0.0, top: 0.0, width, height }
    }
}

/// Perspective camera looking down -z at the interaction plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fov_degrees: f64, // vertical field of view
    pub distance: f64, // from the z = 0 plane
}

impl Camera {
    pub fn visible_half_height(&self) -> f64 {
        self.distance * (self.fov_degrees.to_radians() * 0.5).tan()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub client_x: f64,
    pub client_y: f64,
}

#[derive(Debug, Clone, Copy)]
pub enum PointerEvent<'a> {
    MouseMove { client_x: f64, client_y: f64 },
    MouseDown { client_x: f64, client_y: f64 },
    MouseUp,
    MouseLeave,
    TouchStart(&'a [TouchPoint]),
    TouchMove(&'a [TouchPoint]),
    TouchEnd,
}

/// What the frame loop should receive for one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputSignal {
    Sample(PointerSample),
    Press(PointerSample),
    Release(PointerSample),
}

impl InputSignal {
    pub fn sample(&self) -> PointerSample {
        match *self {
            InputSignal::Sample(s) | InputSignal::Press(s) | InputSignal::Release(s) => s,
        }
    }

    pub fn submit_to(self, frame_loop: &mut FrameLoop) {
        match self {
            InputSignal::Sample(s) => frame_loop.submit_pointer(s),
            InputSignal::Press(s) => frame_loop.submit_press(s),
            InputSignal::Release(s) => frame_loop.submit_release(s),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputAdapter {
    camera: Camera,
    viewport: Viewport,
    bounds: Bounds,
    last: PointerSample,
}

impl InputAdapter {
    pub fn new(camera: Camera, viewport: Viewport) -> Self {
        let mut adapter = Self {
            camera,
            viewport,
            bounds: Bounds::new(0.0, 0.0),
            last: PointerSample::inactive(),
        };
        adapter.on_resize(viewport);
        adapter
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Recompute world bounds for a new container size. Degenerate sizes are
    /// treated as one pixel.
    pub fn on_resize(&mut self, viewport: Viewport) -> Bounds {
        self.viewport = Viewport {
            width: viewport.width.max(1.0),
            height: viewport.height.max(1.0),
            ..viewport
        };
        let half_height = self.camera.visible_half_height();
        let aspect = self.viewport.width / self.viewport.height;
        self.bounds = Bounds::new(half_height * aspect, half_height);
        self.bounds
    }

    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64) -> PointerSample {
        let nx = (client_x - self.viewport.left) / self.viewport.width * 2.0 - 1.0;
        let ny = -((client_y - self.viewport.top) / self.viewport.height * 2.0 - 1.0);
        self.last = PointerSample::at(nx * self.bounds.half_width, ny * self.bounds.half_height);
        self.last
    }

    /// Keeps the last coordinates, only clears `active`.
    pub fn on_pointer_leave(&mut self) -> PointerSample {
        self.last.active = false;
        self.last
    }

    /// Mouse and touch in, one signal out. `None` for touch events without touches.
    pub fn handle(&mut self, event: PointerEvent<'_>) -> Option<InputSignal> {
        match event {
            PointerEvent::MouseMove { client_x, client_y } => {
                Some(InputSignal::Sample(self.on_pointer_move(client_x, client_y)))
            }
            PointerEvent::MouseDown { client_x, client_y } => {
                Some(InputSignal::Press(self.on_pointer_move(client_x, client_y)))
            }
            PointerEvent::MouseUp => Some(InputSignal::Release(self.last)),
            PointerEvent::MouseLeave => Some(InputSignal::Sample(self.on_pointer_leave())),
            PointerEvent::TouchStart(touches) => {
                let t = touches.first()?;
                Some(InputSignal::Press(self.on_pointer_move(t.client_x, t.client_y)))
            }
            PointerEvent::TouchMove(touches) => {
                let t = touches.first()?;
                Some(InputSignal::Sample(self.on_pointer_move(t.client_x, t.client_y)))
            }
            // a lifted finger leaves no hover behind
            PointerEvent::TouchEnd => Some(InputSignal::Release(self.on_pointer_leave())),
        }
    }
}
