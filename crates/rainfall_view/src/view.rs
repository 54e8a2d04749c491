//! The rain view
//!
//! [`RainView`] is the lifecycle controller: it holds the single authoritative
//! [`Config`], owns the container and its live elements, and exposes the
//! start/stop surface the host screen drives.
//!
//! All work happens on one [`Looper`]. Spawn cycles, completions and removals
//! are looper tasks that hold the view weakly, so a dropped view is never kept
//! alive by its own timers and a torn-down session ignores callbacks that were
//! already queued.

use crate::attrs::AttributeSet;
use crate::composer;
use crate::config::{Config, DrawableConfig, DrawableId};
use crate::container::{Container, ElementId, Visibility};
use crate::error::Result;
use crate::spawner::{self, StreamId};
use rainfall_animation::{AnimationSet, Transformation};
use rainfall_core::{Looper, Size, TaskId};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use slotmap::SlotMap;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

// ============================================================================
// Public types
// ============================================================================

/// What `start()` does while a session is already spawning
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StartBehavior {
    /// Keep the existing spawn cycle; only the configuration is replaced
    #[default]
    Idempotent,
    /// Arm one more independent spawn cycle per call
    Additive,
}

/// Spawner state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnState {
    /// No spawn cycle armed
    Idle,
    /// Armed, first cycle not fired yet
    Scheduled,
    /// At least one cycle has fired since the last start
    Running,
}

/// Point-in-time view of one live element
#[derive(Clone, Debug)]
pub struct ElementSnapshot {
    pub id: ElementId,
    pub drawable: DrawableId,
    pub size: Size,
    pub scale_divisor: u32,
    pub left_margin: u32,
    pub visibility: Visibility,
    /// Sampled at the looper's current time; `None` once completed
    pub transformation: Option<Transformation>,
    pub animation: Option<AnimationSet>,
}

// ============================================================================
// Shared state
// ============================================================================

pub(crate) struct ViewState {
    pub(crate) config: Rc<Config>,
    pub(crate) container: Container,
    /// Armed spawn cycles and the task each is waiting on
    pub(crate) streams: SlotMap<StreamId, TaskId>,
    pub(crate) rng: Box<dyn RngCore>,
    pub(crate) start_behavior: StartBehavior,
    pub(crate) cycles_fired: u64,
}

impl ViewState {
    /// Remove every stream and element, returning the tasks to cancel
    fn tear_down(&mut self) -> Vec<TaskId> {
        let mut tasks: Vec<TaskId> = self.streams.drain().map(|(_, task)| task).collect();
        tasks.extend(
            self.container
                .drain()
                .into_iter()
                .filter_map(|element| element.pending_task),
        );
        self.cycles_fired = 0;
        tasks
    }
}

pub(crate) struct Shared {
    pub(crate) looper: Looper,
    pub(crate) state: RefCell<ViewState>,
}

impl Drop for Shared {
    fn drop(&mut self) {
        for task in self.state.get_mut().tear_down() {
            self.looper.cancel(task);
        }
    }
}

// ============================================================================
// RainView
// ============================================================================

/// A container that periodically spawns falling elements
///
/// Cloning yields another handle to the same view.
///
/// # Example
///
/// ```rust
/// use rainfall_core::{Looper, Size};
/// use rainfall_view::{Config, DrawableConfig, DrawableId, RainView};
///
/// let looper = Looper::new();
/// let view = RainView::with_config(
///     &looper,
///     Config::default().drawable(DrawableConfig::new(DrawableId(1))),
/// );
/// view.set_measured_size(Size::new(400, 800));
///
/// view.start();
/// looper.advance_by(500);
/// assert_eq!(view.live_elements(), 1);
///
/// view.stop();
/// assert_eq!(view.live_elements(), 0);
/// ```
#[derive(Clone)]
pub struct RainView {
    pub(crate) shared: Rc<Shared>,
}

impl RainView {
    /// Create a view with the default configuration
    pub fn new(looper: &Looper) -> Self {
        Self::with_config(looper, Config::default())
    }

    pub fn with_config(looper: &Looper, config: Config) -> Self {
        Self {
            shared: Rc::new(Shared {
                looper: looper.clone(),
                state: RefCell::new(ViewState {
                    config: Rc::new(config),
                    container: Container::new(),
                    streams: SlotMap::with_key(),
                    rng: Box::new(SmallRng::from_entropy()),
                    start_behavior: StartBehavior::default(),
                    cycles_fired: 0,
                }),
            }),
        }
    }

    /// Create a view from declarative attributes
    ///
    /// Fails before anything is spawned if an attribute is invalid.
    pub fn from_attributes(looper: &Looper, attrs: &AttributeSet) -> Result<Self> {
        Ok(Self::with_config(looper, Config::from_attributes(attrs)?))
    }

    /// Replace the randomness source
    pub fn with_rng(self, rng: impl RngCore + 'static) -> Self {
        self.shared.state.borrow_mut().rng = Box::new(rng);
        self
    }

    pub fn with_start_behavior(self, behavior: StartBehavior) -> Self {
        self.shared.state.borrow_mut().start_behavior = behavior;
        self
    }

    /// Record the container size from the host layout pass
    pub fn set_measured_size(&self, size: Size) {
        self.shared.state.borrow_mut().container.set_measured_size(size);
    }

    pub fn measured_size(&self) -> Size {
        self.shared.state.borrow().container.measured_size()
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Begin spawning with the current configuration
    ///
    /// The first element appears one spawn delay from now.
    pub fn start(&self) {
        let (behavior, armed) = {
            let state = self.shared.state.borrow();
            (state.start_behavior, state.streams.len())
        };

        if armed > 0 && behavior == StartBehavior::Idempotent {
            tracing::debug!("RainView: start ignored, already spawning");
            return;
        }

        spawner::arm_stream(&self.shared);
        tracing::debug!("RainView: started ({} spawn cycles armed)", armed + 1);
    }

    /// Replace the configuration, then begin spawning
    ///
    /// Elements already in flight keep their animation.
    pub fn start_with_config(&self, config: Config) {
        self.shared.state.borrow_mut().config = Rc::new(config);
        tracing::debug!("RainView: configuration replaced");
        self.start();
    }

    /// Replace only the drawable appearance, then begin spawning
    pub fn start_with_drawable(&self, drawable: DrawableConfig) {
        let config = self.config().with_drawable(drawable);
        self.start_with_config(config);
    }

    /// Cancel spawning and destroy every live element
    ///
    /// Safe to call at any time, including from inside a looper task, and a
    /// no-op while idle.
    pub fn stop(&self) {
        let tasks = self.shared.state.borrow_mut().tear_down();
        if tasks.is_empty() {
            return;
        }

        let cancelled = tasks
            .into_iter()
            .filter(|task| self.shared.looper.cancel(*task))
            .count();
        tracing::debug!("RainView: stopped ({} pending tasks cancelled)", cancelled);
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// The active configuration snapshot
    pub fn config(&self) -> Rc<Config> {
        Rc::clone(&self.shared.state.borrow().config)
    }

    pub fn start_behavior(&self) -> StartBehavior {
        self.shared.state.borrow().start_behavior
    }

    pub fn spawn_state(&self) -> SpawnState {
        let state = self.shared.state.borrow();
        if state.streams.is_empty() {
            SpawnState::Idle
        } else if state.cycles_fired == 0 {
            SpawnState::Scheduled
        } else {
            SpawnState::Running
        }
    }

    /// Number of elements owned by the container
    pub fn live_elements(&self) -> usize {
        self.shared.state.borrow().container.len()
    }

    /// Number of elements still animating
    pub fn visible_elements(&self) -> usize {
        self.shared.state.borrow().container.visible_count()
    }

    /// Number of armed spawn cycles
    pub fn pending_spawns(&self) -> usize {
        self.shared
            .state
            .borrow()
            .streams
            .values()
            .filter(|task| self.shared.looper.is_pending(**task))
            .count()
    }

    /// Snapshot every live element at the looper's current time
    pub fn elements(&self) -> Vec<ElementSnapshot> {
        let now_ms = self.shared.looper.now_ms();
        let state = self.shared.state.borrow();
        state
            .container
            .children()
            .map(|(id, element)| ElementSnapshot {
                id,
                drawable: element.drawable(),
                size: element.size(),
                scale_divisor: element.scale_divisor(),
                left_margin: element.left_margin(),
                visibility: element.visibility(),
                transformation: element.transformation_at(now_ms),
                animation: element.animation().cloned(),
            })
            .collect()
    }

    pub fn looper(&self) -> &Looper {
        &self.shared.looper
    }

    /// Expected lifetime of elements spawned with the active configuration
    pub fn element_lifetime_ms(&self) -> u64 {
        composer::travel_duration_ms(self.config().duration_ms)
    }

    pub fn downgrade(&self) -> WeakRainView {
        WeakRainView {
            shared: Rc::downgrade(&self.shared),
        }
    }
}

impl std::fmt::Debug for RainView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state.borrow();
        f.debug_struct("RainView")
            .field("config", &state.config)
            .field("streams", &state.streams.len())
            .field("elements", &state.container.len())
            .finish()
    }
}

/// A weak handle to a [`RainView`]
#[derive(Clone)]
pub struct WeakRainView {
    shared: Weak<Shared>,
}

impl WeakRainView {
    pub fn upgrade(&self) -> Option<RainView> {
        self.shared.upgrade().map(|shared| RainView { shared })
    }
}
