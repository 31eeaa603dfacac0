//! # Navigation Session
//!
//! One session per hosting surface. The session owns the bus and the
//! controller, wires one subscription per action kind at construction, and
//! is torn down with the surface; the graph and back-stack die with it.
//!
//! Two ways to run one:
//!
//! - [`NavigationSession`]: single-threaded, dispatch is a plain synchronous
//!   call on the host's control thread.
//! - [`SessionWorker`]: the session pinned to a dedicated thread behind a
//!   channel, for hosts whose events arrive from multiple threads. The
//!   channel is the single exclusive-access point, so actions still apply in
//!   exactly the order they are sent.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use log::{debug, info, warn};
use uuid::Uuid;

use crate::bridge::registry::ComponentRegistry;
use crate::core::action::{Action, ActionKind};
use crate::core::bus::ActionBus;
use crate::core::controller::{BackStackController, ControllerState, Outcome};
use crate::core::error::NavError;
use crate::core::events::EventSink;
use crate::core::graph::DestinationId;

/// A fully wired navigation session: bus, controller, subscriptions.
///
/// Not `Send`: the controller is shared with the bus handlers through
/// `Rc<RefCell<_>>`. Hosts that need cross-thread dispatch wrap it in a
/// [`SessionWorker`] instead of moving it.
pub struct NavigationSession {
    id: Uuid,
    bus: ActionBus,
    controller: Rc<RefCell<BackStackController>>,
}

impl NavigationSession {
    pub fn new(components: Arc<dyn ComponentRegistry>, sink: Arc<dyn EventSink>) -> Self {
        let id = Uuid::new_v4();
        let controller = Rc::new(RefCell::new(BackStackController::new(components, sink)));
        let mut bus = ActionBus::new();
        for kind in ActionKind::ALL {
            let controller = Rc::clone(&controller);
            bus.subscribe(kind, move |action| controller.borrow_mut().handle(action));
        }
        info!("Navigation session {id} wired");
        Self {
            id,
            bus,
            controller,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Dispatches one action through the bus, synchronously.
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, NavError> {
        self.bus.dispatch(action)
    }

    pub fn state(&self) -> ControllerState {
        self.controller.borrow().state()
    }

    pub fn depth(&self) -> usize {
        self.controller.borrow().depth()
    }

    pub fn current_destination_id(&self) -> Option<DestinationId> {
        self.controller.borrow().current_destination_id()
    }
}

enum WorkerMessage {
    Dispatch(Action),
    Shutdown,
}

/// A session running on its own thread, fed through a channel.
///
/// The session is constructed inside the worker thread and never leaves it;
/// callers only hold the sending half. Dispatch errors are logged by the
/// worker rather than returned, so hosts that need an answer attach a reply
/// handle to the action itself.
pub struct SessionWorker {
    tx: mpsc::Sender<WorkerMessage>,
    handle: thread::JoinHandle<()>,
}

impl SessionWorker {
    pub fn spawn(components: Arc<dyn ComponentRegistry>, sink: Arc<dyn EventSink>) -> Self {
        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            let mut session = NavigationSession::new(components, sink);
            let id = session.id();
            while let Ok(message) = rx.recv() {
                match message {
                    WorkerMessage::Dispatch(action) => {
                        if let Err(err) = session.dispatch(action) {
                            warn!("Session {id} dropped action: {err}");
                        }
                    }
                    WorkerMessage::Shutdown => break,
                }
            }
            debug!("Session {id} worker stopped");
        });
        Self { tx, handle }
    }

    /// Queues one action. Ordering across callers follows the channel: all
    /// actions apply in the order their sends complete.
    pub fn dispatch(&self, action: Action) {
        if self.tx.send(WorkerMessage::Dispatch(action)).is_err() {
            warn!("Session worker is gone; action dropped");
        }
    }

    /// Stops the worker after it drains everything already queued.
    pub fn shutdown(self) {
        let _ = self.tx.send(WorkerMessage::Shutdown);
        let _ = self.handle.join();
    }
}
