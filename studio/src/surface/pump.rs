//! Persistent event entry point shared by every surface listener.
//!
//! Listeners hold an `Rc<EventPump>` and never capture session state
//! themselves, so there is nothing to rebind after a redraw. Surfaces may fire
//! events synchronously from inside a redraw (clearing features changes the
//! selection, for instance); such an event finds the studio already borrowed,
//! is queued, and is handled in order by the dispatch that is running.

use super::{DrawSurface, SurfaceEvent};
use crate::error::Result;
use crate::{EventOutcome, Studio};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

pub struct EventPump<S: DrawSurface> {
    studio: Rc<RefCell<Studio<S>>>,
    queue: RefCell<VecDeque<SurfaceEvent>>,
}

impl<S: DrawSurface> EventPump<S> {
    pub fn new(studio: Rc<RefCell<Studio<S>>>) -> Self {
        EventPump { studio, queue: RefCell::new(VecDeque::new()) }
    }

    pub fn studio(&self) -> &Rc<RefCell<Studio<S>>> {
        &self.studio
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Queue `event` and, if the studio is free, drain the queue.
    ///
    /// Returns the outcome of every event handled by this call, oldest first.
    /// Returns nothing when another dispatch is already running; that one
    /// picks the event up.
    pub fn push(&self, event: SurfaceEvent) -> Vec<Result<EventOutcome>> {
        self.queue.borrow_mut().push_back(event);
        self.flush()
    }

    /// Drain queued events if the studio is free.
    ///
    /// Callers that borrowed the studio directly call this after releasing it,
    /// so events fired during their borrow are not left behind.
    pub fn flush(&self) -> Vec<Result<EventOutcome>> {
        let Ok(mut studio) = self.studio.try_borrow_mut() else {
            tracing::debug!(pending = self.pending(), "studio busy, event queued");
            return Vec::new();
        };
        let mut outcomes = Vec::new();
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(event) = next else { break };
            outcomes.push(studio.dispatch(event));
        }
        outcomes
    }
}
