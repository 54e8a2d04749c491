//! Host lifecycle binding
//!
//! Ties a view's start/stop to the host screen's visibility so the host does
//! not have to forward `Resumed`/`Suspended` by hand.

use crate::view::RainView;
use rainfall_core::{Lifecycle, LifecycleEvent, ObserverId};

/// Keeps a view bound to a lifecycle; dropping it unbinds
#[must_use = "dropping the binding unregisters it"]
pub struct LifecycleBinding {
    lifecycle: Lifecycle,
    observer: Option<ObserverId>,
}

impl LifecycleBinding {
    pub fn is_bound(&self) -> bool {
        self.observer.is_some()
    }

    /// Unregister now instead of on drop
    pub fn unbind(&mut self) {
        if let Some(observer) = self.observer.take() {
            self.lifecycle.remove(observer);
        }
    }
}

impl Drop for LifecycleBinding {
    fn drop(&mut self) {
        self.unbind();
    }
}

impl RainView {
    /// Start on `Resumed` and stop on `Suspended`
    ///
    /// Starts immediately if the lifecycle is already resumed. The binding
    /// holds the view weakly.
    pub fn bind_lifecycle(&self, lifecycle: &Lifecycle) -> LifecycleBinding {
        let view = self.downgrade();
        let observer = lifecycle.observe(move |event| {
            let Some(view) = view.upgrade() else {
                return;
            };
            match event {
                LifecycleEvent::Resumed => view.start(),
                LifecycleEvent::Suspended => view.stop(),
                LifecycleEvent::LowMemory => {}
            }
        });

        if lifecycle.is_resumed() {
            self.start();
        }
        tracing::debug!("RainView: bound to host lifecycle");

        LifecycleBinding {
            lifecycle: lifecycle.clone(),
            observer: Some(observer),
        }
    }
}
