//! Rain Demo
//!
//! Drives a rain view through one screen visit without a host toolkit:
//! - attributes parsed from TOML
//! - host lifecycle resume, a few seconds of frames, suspend
//! - live element count logged once per second
//!
//! Run with: RUST_LOG=rainfall_view=trace cargo run -p rainfall_view --example rain_demo

use anyhow::Result;
use rainfall_core::{Lifecycle, LifecycleEvent, Looper, Size};
use rainfall_view::{AttributeSet, RainView};
use tracing_subscriber::EnvFilter;

const ATTRIBUTES: &str = r#"
direction = 0
duration = 2400
spawnDelay = 150
simulate3D = true
simulateWind = true
interpolator = 1
drawableId = 7
drawableHeight = 32
drawableWidth = 18
alphaAnimation = true
alphaFromAnimation = 1.0
alphaToAnimation = 0.3
alphaDurationAnimation = 2000
alphaDelayAnimation = 400
"#;

/// One frame at 60 fps
const FRAME_MS: u64 = 16;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let looper = Looper::new();
    let lifecycle = Lifecycle::new();

    let attrs = AttributeSet::from_toml_str(ATTRIBUTES)?;
    let view = RainView::from_attributes(&looper, &attrs)?;
    view.set_measured_size(Size::new(360, 640));
    let _binding = view.bind_lifecycle(&lifecycle);

    lifecycle.dispatch(LifecycleEvent::Resumed);
    for second in 1..=5 {
        for _ in 0..(1000 / FRAME_MS) {
            looper.advance_by(FRAME_MS);
        }
        tracing::info!(
            "t={}s: {} live elements ({} animating), state {:?}",
            second,
            view.live_elements(),
            view.visible_elements(),
            view.spawn_state()
        );
    }

    if let Some(element) = view.elements().first() {
        tracing::info!("Sample element: {:?}", element.transformation);
    }

    lifecycle.dispatch(LifecycleEvent::Suspended);
    tracing::info!(
        "Suspended: {} live elements, {} pending tasks",
        view.live_elements(),
        looper.pending_count()
    );

    Ok(())
}
