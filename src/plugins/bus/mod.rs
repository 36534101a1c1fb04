//! Deferred publish/subscribe bus.
//!
//! # Contract
//! - `EventBus::publish` only queues. No handler runs inside the publishing system.
//! - `drain` runs once per tick, first thing in `TickSet::Drain`. It delivers every queued event
//!   in publish order; each event goes to the subscribers of its exact kind in registration order.
//! - Anything a handler publishes while the drain is running goes to a fresh queue and is
//!   delivered by the *next* drain, never the current one.
//!
//! # Delivery point
//! The collision sweep walks the entity stores while it publishes, so stores are mutated only by
//! their owning handlers at the tick boundary.
//!
//! # Handlers
//! A handler is a Bevy one-shot system whose input is `In<Published<E>>` and whose output is
//! `Result`. It can take any system params it needs, including `ResMut<EventBus>` to publish
//! follow-up events. Handlers live in the `World`, so dropping the `App` drops its subscriptions.
//!
//! # Failure
//! - No subscriber for a kind: the event is dropped silently.
//! - A nested drain (an exclusive handler calling `drain`): `BusError::ReentrantDrain`.
//! - A handler returning `Err`: the drain stops with `BusError::Handler`, which the scheduled
//!   system turns into a Bevy error (panic under the default error handler).

use std::any::{type_name, Any};
use std::fmt::Debug;
use std::ops::Deref;

use bevy::ecs::system::SystemId;
use bevy::prelude::*;
use thiserror::Error;

use crate::common::schedule::TickSet;

pub mod events;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId(pub u64);

/// Marker for bus payloads. Events are plain values: handlers read them, never change them.
pub trait GameEvent: Clone + Debug + Send + Sync + 'static {}

/// An event as handed to subscribers: the payload plus the id the bus stamped on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Published<E> {
    pub id: EventId,
    pub event: E,
}

impl<E> Deref for Published<E> {
    type Target = E;

    fn deref(&self) -> &E {
        &self.event
    }
}

pub type Handler<E> = SystemId<In<Published<E>>, Result>;

#[derive(Debug, Error)]
pub enum BusError {
    #[error("event bus drained while another drain was in progress")]
    ReentrantDrain,
    #[error("handler for {event} failed: {reason}")]
    Handler { event: &'static str, reason: String },
}

/// Registered handlers for one event kind, in registration order.
#[derive(Resource)]
struct Subscribers<E: GameEvent> {
    handlers: Vec<Handler<E>>,
}

impl<E: GameEvent> Default for Subscribers<E> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

/// Handle returned by `subscribe`; pass it to `unsubscribe` to detach the handler.
#[derive(Debug)]
pub struct Subscription<E: GameEvent> {
    handler: Handler<E>,
}

/// Type-erased queue entry. Knows how to find its own subscribers.
trait Queued: Send + Sync {
    fn deliver(self: Box<Self>, world: &mut World) -> Result<(), BusError>;
    fn as_any(&self) -> &dyn Any;
}

impl<E: GameEvent> Queued for Published<E> {
    fn deliver(self: Box<Self>, world: &mut World) -> Result<(), BusError> {
        let Some(subscribers) = world.get_resource::<Subscribers<E>>() else {
            trace!("no subscribers for {}", type_name::<E>());
            return Ok(());
        };
        // Copy the ids out: a handler may subscribe or unsubscribe while we iterate.
        let handlers = subscribers.handlers.clone();

        for handler in handlers {
            // Unsubscribed by an earlier handler of this delivery.
            let still_subscribed = world
                .get_resource::<Subscribers<E>>()
                .is_some_and(|current| current.handlers.contains(&handler));
            if !still_subscribed {
                continue;
            }
            let outcome = world
                .run_system_with(handler, (*self).clone())
                .map_err(|err| BusError::Handler {
                    event: type_name::<E>(),
                    reason: err.to_string(),
                })?;
            outcome.map_err(|err| BusError::Handler {
                event: type_name::<E>(),
                reason: err.to_string(),
            })?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Resource, Default)]
pub struct EventBus {
    queue: Vec<Box<dyn Queued>>,
    last_id: u64,
    draining: bool,
}

impl Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("pending", &self.queue.len())
            .field("last_id", &self.last_id)
            .field("draining", &self.draining)
            .finish()
    }
}

impl EventBus {
    /// Queue `event` for the next drain and return the id stamped on it.
    pub fn publish<E: GameEvent>(&mut self, event: E) -> EventId {
        self.last_id += 1;
        let id = EventId(self.last_id);
        trace!("publish {} {:?}", type_name::<E>(), id);
        self.queue.push(Box::new(Published { id, event }));
        id
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_draining(&self) -> bool {
        self.draining
    }

    /// Copies of the queued events of kind `E`, in publish order.
    pub fn queued<E: Clone + 'static>(&self) -> Vec<E> {
        self.queue
            .iter()
            .filter_map(|entry| entry.as_any().downcast_ref::<Published<E>>())
            .map(|published| published.event.clone())
            .collect()
    }

    fn begin_drain(&mut self) -> Result<Vec<Box<dyn Queued>>, BusError> {
        if self.draining {
            return Err(BusError::ReentrantDrain);
        }
        self.draining = true;
        Ok(std::mem::take(&mut self.queue))
    }

    /// Returns how many events were published while draining.
    fn end_drain(&mut self) -> usize {
        self.draining = false;
        self.queue.len()
    }
}

/// Register `handler` for events of kind `E`.
pub fn subscribe<E: GameEvent, M>(
    world: &mut World,
    handler: impl IntoSystem<In<Published<E>>, Result, M> + 'static,
) -> Subscription<E> {
    let handler = world.register_system(handler);
    world
        .get_resource_or_insert_with(Subscribers::<E>::default)
        .handlers
        .push(handler);
    Subscription { handler }
}

/// Detach a handler. Returns false if it was not subscribed.
pub fn unsubscribe<E: GameEvent>(world: &mut World, subscription: Subscription<E>) -> bool {
    let removed = match world.get_resource_mut::<Subscribers<E>>() {
        Some(mut subscribers) => {
            let before = subscribers.handlers.len();
            subscribers.handlers.retain(|h| *h != subscription.handler);
            subscribers.handlers.len() != before
        }
        None => false,
    };
    removed && world.unregister_system(subscription.handler).is_ok()
}

/// Deliver everything queued so far. Returns the number of events delivered.
pub fn drain(world: &mut World) -> Result<usize, BusError> {
    let batch = world.resource_mut::<EventBus>().begin_drain()?;
    let delivered = batch.len();

    let mut outcome = Ok(delivered);
    for entry in batch {
        if let Err(err) = entry.deliver(world) {
            outcome = Err(err);
            break;
        }
    }

    let deferred = world.resource_mut::<EventBus>().end_drain();
    if deferred > 0 {
        debug!("{deferred} events published during drain, deferred to next tick");
    }
    outcome
}

pub fn drain_event_bus(world: &mut World) -> Result {
    drain(world)?;
    Ok(())
}

/// Builder-style subscription for plugin wiring.
pub trait SubscribeAppExt {
    fn subscribe<E: GameEvent, M>(
        &mut self,
        handler: impl IntoSystem<In<Published<E>>, Result, M> + 'static,
    ) -> &mut Self;
}

impl SubscribeAppExt for App {
    fn subscribe<E: GameEvent, M>(
        &mut self,
        handler: impl IntoSystem<In<Published<E>>, Result, M> + 'static,
    ) -> &mut Self {
        subscribe(self.world_mut(), handler);
        self
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<EventBus>()
        .add_systems(FixedUpdate, drain_event_bus.in_set(TickSet::Drain));
}
