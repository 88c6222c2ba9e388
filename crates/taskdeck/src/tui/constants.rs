//! Shared constants for the TUI to keep layout and timing in sync.

/// Interval in milliseconds between UI ticks/redraws.
pub const TUI_TICK_RATE_MS: u64 = 200;
/// Time-to-live in seconds for transient status messages.
pub const UI_MESSAGE_TTL_SECS: u64 = 5;
/// Frames cycled by the loading spinner, one per tick.
pub const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];
/// Highlight symbol shown beside selected list entries.
pub const TASK_LIST_HIGHLIGHT_SYMBOL: &str = "▶ ";
/// Marker for completed tasks.
pub const DONE_MARKER: &str = "✓";
/// Marker for open tasks.
pub const OPEN_MARKER: &str = "□";
/// Width percentage of the task list when the detail pane is shown.
pub const TASK_LIST_PERCENT: u16 = 45;
/// Width of the status filter dropdown.
pub const STATUS_DROPDOWN_WIDTH: u16 = 16;
/// Key in the preferences file holding UI preferences.
pub const PREFS_KEY: &str = "ui";
