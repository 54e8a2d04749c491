//! Spawn cycles
//!
//! A spawn stream is a self-perpetuating looper task: each firing composes and
//! adds one element, then posts its own successor. The stream's slot always
//! holds the id of the one task it is waiting on, so cancelling that id stops
//! the stream. A firing whose stream has been removed does nothing.

use crate::completion;
use crate::composer;
use crate::container::SpawnedElement;
use crate::view::Shared;
use rainfall_core::TaskId;
use slotmap::new_key_type;
use std::rc::{Rc, Weak};

new_key_type! {
    /// Handle to an armed spawn stream
    pub(crate) struct StreamId;
}

/// Arm a new stream whose first cycle fires one spawn delay from now
///
/// The first cycle uses the raw delay, so a zero delay spawns at once; only
/// successors are held to the frame interval.
pub(crate) fn arm_stream(shared: &Rc<Shared>) -> StreamId {
    let mut state = shared.state.borrow_mut();
    let delay_ms = state.config.spawn_delay_ms;
    state
        .streams
        .insert_with_key(|stream| schedule_cycle(shared, stream, delay_ms))
}

fn schedule_cycle(shared: &Rc<Shared>, stream: StreamId, delay_ms: u64) -> TaskId {
    let view = Rc::downgrade(shared);
    shared
        .looper
        .post_delayed(delay_ms, move || run_cycle(&view, stream))
}

fn run_cycle(view: &Weak<Shared>, stream: StreamId) {
    let Some(shared) = view.upgrade() else {
        return;
    };
    let now_ms = shared.looper.now_ms();
    let mut guard = shared.state.borrow_mut();
    let state = &mut *guard;

    if !state.streams.contains_key(stream) {
        tracing::trace!("RainView: spawn cycle fired after stop, ignoring");
        return;
    }
    state.cycles_fired += 1;

    // Snapshot: a reconfigure during this cycle only affects the next one
    let config = Rc::clone(&state.config);
    let measured = state.container.measured_size();

    match composer::compose(&config, measured, state.rng.as_mut()) {
        Some(composed) => {
            let lifetime_ms = composed.animation.duration_ms();
            let id = state
                .container
                .add_child(SpawnedElement::new(composed, now_ms));
            let task = completion::schedule_animation_end(&shared, id, lifetime_ms);
            if let Some(element) = state.container.child_mut(id) {
                element.pending_task = Some(task);
            }
            tracing::trace!(
                "RainView: spawned element ({} live, ends in {}ms)",
                state.container.len(),
                lifetime_ms
            );
        }
        None => {
            tracing::trace!("RainView: nothing to spawn (measured {:?})", measured);
        }
    }

    let next = schedule_cycle(&shared, stream, config.spawn_interval_ms());
    if let Some(slot) = state.streams.get_mut(stream) {
        *slot = next;
    }
}
