//! Hover and drag tracking
//!
//! `Idle -> Hover -> Dragging -> (Idle | Hover)`. The machine is the only
//! writer of `Body::hovered` and `Body::dragged`, and it keeps at most one body
//! dragged at any time.

use tracing::debug;

use crate::simulation::states::{PointerSample, System};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Hover(usize), // index into System::bodies
    Dragging(usize),
}

#[derive(Debug, Clone)]
pub struct Interaction {
    state: InteractionState,
    pick_padding: f64,
    release_damping: f64,
}

impl Interaction {
    pub fn new(pick_padding: f64, release_damping: f64) -> Self {
        Self {
            state: InteractionState::Idle,
            pick_padding,
            release_damping,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn hovered(&self) -> Option<usize> {
        match self.state {
            InteractionState::Hover(i) => Some(i),
            _ => None,
        }
    }

    pub fn dragged(&self) -> Option<usize> {
        match self.state {
            InteractionState::Dragging(i) => Some(i),
            _ => None,
        }
    }

    /// Nearest body whose extent plus padding reaches the pointer.
    pub fn hit_test(&self, sys: &System, pointer: &PointerSample) -> Option<usize> {
        if !pointer.active {
            return None;
        }
        let p = pointer.position();
        sys.bodies
            .iter()
            .enumerate()
            .filter_map(|(i, b)| {
                let d = (b.x - p).norm();
                (d <= b.extent() + self.pick_padding).then_some((i, d))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Re-evaluate hover from the latest pointer sample. A drag survives pointer
    /// motion but is released when the pointer leaves the surface.
    pub fn update(&mut self, sys: &mut System, pointer: &PointerSample) {
        if let InteractionState::Dragging(_) = self.state {
            if pointer.active {
                return;
            }
            self.release(sys, pointer);
        }

        self.state = match self.hit_test(sys, pointer) {
            Some(i) => InteractionState::Hover(i),
            None => InteractionState::Idle,
        };
        self.sync_flags(sys);
    }

    /// Pointer down. Picks at the press position so touch, which has no hover
    /// beforehand, grabs the body under the finger. Any previous drag target is
    /// cleared first.
    pub fn press(&mut self, sys: &mut System, pointer: &PointerSample) {
        let target = self
            .hit_test(sys, pointer)
            .or(self.dragged())
            .or(self.hovered());
        let Some(target) = target else {
            return;
        };

        for b in sys.bodies.iter_mut() {
            b.dragged = false;
        }
        self.state = InteractionState::Dragging(target);
        self.sync_flags(sys);
        debug!(body = sys.bodies[target].id, "drag start");
    }

    /// Pointer up. The body keeps a damped share of its last velocity.
    pub fn release(&mut self, sys: &mut System, pointer: &PointerSample) {
        let InteractionState::Dragging(i) = self.state else {
            return;
        };
        let body = &mut sys.bodies[i];
        body.v *= self.release_damping;
        debug!(body = body.id, vx = body.v.x, vy = body.v.y, "drag release");

        self.state = match self.hit_test(sys, pointer) {
            Some(j) => InteractionState::Hover(j),
            None => InteractionState::Idle,
        };
        self.sync_flags(sys);
    }

    fn sync_flags(&self, sys: &mut System) {
        let (hover, drag) = match self.state {
            InteractionState::Idle => (None, None),
            InteractionState::Hover(i) => (Some(i), None),
            InteractionState::Dragging(i) => (Some(i), Some(i)),
        };
        for (i, b) in sys.bodies.iter_mut().enumerate() {
            b.hovered = hover == Some(i);
            b.dragged = drag == Some(i);
        }
    }
}
