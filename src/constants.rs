/// Default probability of the "defeat"/"scream" wording for one voice update
pub const DEFAULT_SCREAM_CHANCE: f64 = 0.01;

/// Zero-width space inserted after `@` so names cannot ping anyone
pub const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// Characters Discord treats as markdown in message content
pub const MARKDOWN_CHARS: &[char] = &['\\', '*', '_', '~', '|', '>', '`', '#', '[', ']'];

/// Characters that only start markdown at the beginning of a line (list items, subtext)
pub const LINE_START_CHARS: &[char] = &['-', '+'];

/// Log directive for the application
pub const LOG_DIRECTIVE: &str = "voicelog_rs=info";
