//! Container child collection
//!
//! The container exclusively owns every live element. Elements are never
//! reused: each spawn inserts a fresh child and each removal destroys it.

use crate::composer::ComposedElement;
use crate::config::DrawableId;
use rainfall_animation::{AnimationSet, Transformation};
use rainfall_core::{Size, TaskId};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a spawned element
    pub struct ElementId;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Visible,
    /// Finished animating, waiting for removal
    Gone,
}

/// A transient element owned by the container
#[derive(Clone, Debug)]
pub struct SpawnedElement {
    drawable: DrawableId,
    size: Size,
    scale_divisor: u32,
    left_margin: u32,
    animation: Option<AnimationSet>,
    started_at_ms: u64,
    visibility: Visibility,
    /// Completion or removal task currently armed for this element
    pub(crate) pending_task: Option<TaskId>,
}

impl SpawnedElement {
    pub(crate) fn new(composed: ComposedElement, started_at_ms: u64) -> Self {
        Self {
            drawable: composed.drawable,
            size: composed.size,
            scale_divisor: composed.scale_divisor,
            left_margin: composed.left_margin,
            animation: Some(composed.animation),
            started_at_ms,
            visibility: Visibility::Visible,
            pending_task: None,
        }
    }

    pub fn drawable(&self) -> DrawableId {
        self.drawable
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn scale_divisor(&self) -> u32 {
        self.scale_divisor
    }

    pub fn left_margin(&self) -> u32 {
        self.left_margin
    }

    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// The bound animation; cleared once it has completed
    pub fn animation(&self) -> Option<&AnimationSet> {
        self.animation.as_ref()
    }

    /// Sampled transformation at `now_ms`, if still animating
    pub fn transformation_at(&self, now_ms: u64) -> Option<Transformation> {
        let elapsed = now_ms.saturating_sub(self.started_at_ms);
        self.animation.as_ref().map(|animation| animation.sample(elapsed))
    }

    /// Detach after the animation completed
    pub(crate) fn finish(&mut self) {
        self.animation = None;
        self.visibility = Visibility::Gone;
    }
}

/// The container's measured size and its live children
#[derive(Debug, Default)]
pub struct Container {
    measured: Size,
    children: SlotMap<ElementId, SpawnedElement>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn measured_size(&self) -> Size {
        self.measured
    }

    pub fn set_measured_size(&mut self, size: Size) {
        self.measured = size;
    }

    pub fn add_child(&mut self, element: SpawnedElement) -> ElementId {
        self.children.insert(element)
    }

    /// Remove and destroy a child; `None` if it is already gone
    pub fn remove_child(&mut self, id: ElementId) -> Option<SpawnedElement> {
        self.children.remove(id)
    }

    pub fn child(&self, id: ElementId) -> Option<&SpawnedElement> {
        self.children.get(id)
    }

    pub(crate) fn child_mut(&mut self, id: ElementId) -> Option<&mut SpawnedElement> {
        self.children.get_mut(id)
    }

    pub fn children(&self) -> impl Iterator<Item = (ElementId, &SpawnedElement)> {
        self.children.iter()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.children
            .values()
            .filter(|child| child.visibility == Visibility::Visible)
            .count()
    }

    /// Remove every child, returning them
    pub fn drain(&mut self) -> Vec<SpawnedElement> {
        self.children.drain().map(|(_, child)| child).collect()
    }
}
