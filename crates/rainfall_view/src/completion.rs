//! Completion handling
//!
//! When an element's animation ends it is hidden and detached at once, but the
//! removal from the container runs as a separate looper task rather than inside
//! the callback that reported completion. Both steps look the element up by
//! its generational id, so callbacks that outlive a `stop()` are no-ops.

use crate::container::ElementId;
use crate::view::Shared;
use rainfall_core::TaskId;
use std::rc::{Rc, Weak};

/// Report the end of an element's animation after `lifetime_ms`
pub(crate) fn schedule_animation_end(
    shared: &Rc<Shared>,
    id: ElementId,
    lifetime_ms: u64,
) -> TaskId {
    let view = Rc::downgrade(shared);
    shared
        .looper
        .post_delayed(lifetime_ms, move || on_animation_end(&view, id))
}

fn on_animation_end(view: &Weak<Shared>, id: ElementId) {
    let Some(shared) = view.upgrade() else {
        return;
    };
    let mut state = shared.state.borrow_mut();
    let Some(element) = state.container.child_mut(id) else {
        return;
    };

    element.finish();
    let view = Rc::downgrade(&shared);
    element.pending_task = Some(shared.looper.post(move || remove_element(&view, id)));
    tracing::trace!("RainView: animation ended, removal queued");
}

fn remove_element(view: &Weak<Shared>, id: ElementId) {
    let Some(shared) = view.upgrade() else {
        return;
    };
    let mut state = shared.state.borrow_mut();
    if state.container.remove_child(id).is_some() {
        tracing::trace!("RainView: element removed ({} live)", state.container.len());
    }
}
