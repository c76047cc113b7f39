//! Wiring of the scene, animation and render pieces into a running backdrop.

/// The running backdrop and its per-callback entry points.
pub mod backdrop;
/// Page lookup and texture loading before the loop starts.
pub mod bootstrap;
/// Simulated refresh loop with scripted scrolling.
pub mod host;
/// JSON page document.
pub mod page;
