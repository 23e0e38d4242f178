//! Shared constants used across the application

/// Fallback assistant reply shown in the transcript when a chat request
/// fails. The raw error never reaches the transcript; it goes to the
/// tracing diagnostics instead.
pub const CHAT_FALLBACK_TEXT: &str =
    "Sorry, there was an error processing your request. Please try again.";

/// Status value the health endpoint must report for the backend to count
/// as ready.
pub const HEALTHY_STATUS: &str = "healthy";

/// Identifier and label of the synthetic selector entry that is always
/// offered, even when the catalog has never loaded.
pub const DEMO_MODEL_ID: &str = "demo";
pub const DEMO_MODEL_LABEL: &str = "Demo Mode";

/// Backend consulted when neither the --server flag, CAUSERIE_SERVER, nor
/// the config file names one. Matches the demo server's default bind.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Space reserved for the sending indicator + margin in the input area.
/// This must be consistently used in both UI rendering and cursor
/// calculations to prevent the indicator from overlapping typed text.
pub const INDICATOR_SPACE: u16 = 4;
