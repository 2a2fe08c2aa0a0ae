//! Signal bus with disposable subscriptions

use crate::collab::{EventSink, PageStateProvider, StrategyCache};
use crate::engine::AdStrategyEngine;
use crate::event::{Signal, SignalKind};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::warn;

type Handler = Rc<RefCell<dyn FnMut(&Signal)>>;

struct Listener {
    id: u64,
    kind: SignalKind,
    handler: Handler,
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<Listener>,
}

impl Listeners {
    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|l| l.id == id)
    }
}

/// Synchronous, single-threaded dispatcher for host signals.
///
/// Handlers run in registration order. A handler may dispose any
/// subscription, including its own, while a signal is being dispatched;
/// disposed handlers that have not run yet are skipped.
#[derive(Default)]
pub struct SignalBus {
    listeners: Rc<RefCell<Listeners>>,
}

impl SignalBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind`; the handler lives as long as the returned subscription
    pub fn subscribe<F>(&self, kind: SignalKind, handler: F) -> Subscription
    where
        F: FnMut(&Signal) + 'static,
    {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push(Listener {
            id,
            kind,
            handler: Rc::new(RefCell::new(handler)),
        });

        Subscription {
            id,
            kind,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Deliver a signal; returns how many handlers ran
    pub fn dispatch(&self, signal: &Signal) -> usize {
        let kind = signal.kind();
        let matching: Vec<(u64, Handler)> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .filter(|l| l.kind == kind)
            .map(|l| (l.id, Rc::clone(&l.handler)))
            .collect();

        let mut ran = 0;
        for (id, handler) in matching {
            if !self.listeners.borrow().contains(id) {
                continue;
            }
            match handler.try_borrow_mut() {
                Ok(mut handler) => {
                    (&mut *handler)(signal);
                    ran += 1;
                }
                Err(_) => warn!(signal = %kind, "re-entrant dispatch skipped"),
            }
        }
        ran
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

/// Disposer for a registered handler; dropping it unsubscribes
#[must_use = "dropping a subscription removes its handler"]
pub struct Subscription {
    id: u64,
    kind: SignalKind,
    listeners: Weak<RefCell<Listeners>>,
}

impl Subscription {
    pub fn kind(&self) -> SignalKind {
        self.kind
    }

    /// Remove the handler from the bus
    pub fn dispose(self) {
        drop(self);
    }

    fn detach(&self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().entries.retain(|l| l.id != self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Subscribe `engine` to every signal kind it handles.
///
/// Keep the returned subscriptions for the lifetime of the reading
/// session; dropping them tears the wiring down.
pub fn attach<P, C, S>(
    engine: &Rc<RefCell<AdStrategyEngine<P, C, S>>>,
    bus: &SignalBus,
) -> Vec<Subscription>
where
    P: PageStateProvider + 'static,
    C: StrategyCache + 'static,
    S: EventSink + 'static,
{
    SignalKind::ALL
        .into_iter()
        .map(|kind| {
            let engine = Rc::clone(engine);
            bus.subscribe(kind, move |signal| engine.borrow_mut().handle(signal))
        })
        .collect()
}
