use crate::sample::Sample;

/// All messages (events) that can flow through the application event bus.
///
/// Sources:
/// - Poller task          → `SampleReceived`, `PollFailed`
/// - Config watcher task  → `ConfigReloaded`
/// - User actions         → `ThemeToggled`
#[derive(Debug, Clone)]
pub enum Message {
    // ── Poller ────────────────────────────────────────────────────────────────
    /// A fresh sample arrived from the polled endpoint.
    SampleReceived(Sample),
    /// A poll attempt failed (transport error or malformed payload). The
    /// display keeps its previous state; carries the reason for logging.
    PollFailed(String),

    // ── Config ────────────────────────────────────────────────────────────────
    /// Config file changed on disk — triggers a live reload.
    ConfigReloaded,

    // ── User actions ──────────────────────────────────────────────────────────
    /// Header button clicked — flip between dark and light mode.
    ThemeToggled,
}
