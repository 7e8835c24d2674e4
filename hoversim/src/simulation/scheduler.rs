//! Frame driver independent of any UI lifecycle
//!
//! Event handlers write into a mailbox between frames; `tick` snapshots it at
//! the top of a frame, runs one step and returns the frame to render. Pointer
//! and bounds are replaced as whole values so a frame never sees half an
//! update. Button edges are queued with the pointer sample they happened at,
//! so rapid presses keep their order and their position.

use tracing::info;

use crate::simulation::engine::{step, SimulationContext, StepReport};
use crate::simulation::readout::Frame;
use crate::simulation::states::{Bounds, PointerSample};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonEdge {
    Press(PointerSample),
    Release(PointerSample),
}

#[derive(Debug, Default)]
struct Mailbox {
    pointer: Option<PointerSample>,
    bounds: Option<Bounds>,
    buttons: Vec<ButtonEdge>,
}

pub struct FrameLoop {
    ctx: SimulationContext,
    mailbox: Mailbox,
    running: bool,
    last_report: StepReport,
}

impl FrameLoop {
    /// A stopped loop around `ctx`.
    pub fn new(ctx: SimulationContext) -> Self {
        Self {
            ctx,
            mailbox: Mailbox::default(),
            running: false,
            last_report: StepReport::default(),
        }
    }

    pub fn start(&mut self) {
        if !self.running {
            info!(bodies = self.ctx.system.bodies.len(), "frame loop started");
            self.running = true;
        }
    }

    /// Idempotent. After stopping, `tick` touches nothing.
    pub fn stop(&mut self) {
        if self.running {
            info!(t = self.ctx.system.t, "frame loop stopped");
            self.running = false;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn submit_pointer(&mut self, sample: PointerSample) {
        self.mailbox.pointer = Some(sample);
    }

    pub fn submit_bounds(&mut self, bounds: Bounds) {
        self.mailbox.bounds = Some(bounds);
    }

    /// Pointer down at `at`. Also counts as the latest pointer sample.
    pub fn submit_press(&mut self, at: PointerSample) {
        self.mailbox.pointer = Some(at);
        self.mailbox.buttons.push(ButtonEdge::Press(at));
    }

    pub fn submit_release(&mut self, at: PointerSample) {
        self.mailbox.pointer = Some(at);
        self.mailbox.buttons.push(ButtonEdge::Release(at));
    }

    /// Run one frame of `elapsed` seconds, or `None` if stopped.
    pub fn tick(&mut self, elapsed: f64) -> Option<Frame> {
        if !self.running {
            return None;
        }

        let Mailbox { pointer, bounds, buttons } = std::mem::take(&mut self.mailbox);
        if let Some(bounds) = bounds {
            self.ctx.set_bounds(bounds);
        }
        // each edge hit-tests where it happened, then the latest sample wins
        for edge in buttons {
            match edge {
                ButtonEdge::Press(at) => {
                    self.ctx.set_pointer(at);
                    self.ctx.press();
                }
                ButtonEdge::Release(at) => {
                    self.ctx.set_pointer(at);
                    self.ctx.release();
                }
            }
        }
        if let Some(pointer) = pointer {
            self.ctx.set_pointer(pointer);
        }

        self.last_report = step(&mut self.ctx, elapsed);
        Some(self.ctx.frame())
    }

    pub fn last_report(&self) -> StepReport {
        self.last_report
    }

    pub fn context(&self) -> &SimulationContext {
        &self.ctx
    }
}
