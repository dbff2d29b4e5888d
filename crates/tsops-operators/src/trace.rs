//! Tracing hooks. Compile to no-ops without the `tracing` feature.

#[cfg(feature = "tracing")]
pub(crate) fn stage_built(stage: &str, detail: &str) {
    tracing::debug!(target: "tsops::operators", stage, detail, "stage built");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn stage_built(_stage: &str, _detail: &str) {}

#[cfg(feature = "tracing")]
pub(crate) fn window_evicted(stage: &str, window: usize) {
    tracing::trace!(target: "tsops::operators", stage, window, "evicted oldest record");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn window_evicted(_stage: &str, _window: usize) {}
