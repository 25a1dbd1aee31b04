/// Arrows shot per end when nothing else is configured.
pub const DEFAULT_ARROWS_PER_END: u32 = 3;

/// Ends in a default (WA 18m style) session.
pub const DEFAULT_ENDS_PLANNED: u32 = 10;

/// Highest ordinary ring value on a standard 10-zone face.
pub const DEFAULT_MAX_SCORE: u32 = 10;

/// Points for an X on a standard face (same as the 10 ring).
pub const DEFAULT_X_VALUE: u32 = 10;

/// Keypad / export label for an X.
pub const X_LABEL: &str = "X";

/// Keypad / export label for a miss.
pub const MISS_LABEL: &str = "M";
