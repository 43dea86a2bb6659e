//! Pure functions for formatting voice notifications (Discord-agnostic)
//!
//! `member` is expected to be sanitized already.

/// Format a join notification
pub fn format_joined(member: &str, channel: &str) -> String {
    format!("{} joined {}", member, channel)
}

/// Format a leave notification
pub fn format_left(member: &str, channel: &str) -> String {
    format!("{} left {}", member, channel)
}

/// Format a channel move notification
pub fn format_moved(member: &str, from: &str, to: &str) -> String {
    format!("{} moved from {} to {}", member, from, to)
}

/// Format a flag change notification
pub fn format_flag_change(member: &str, phrase: &str) -> String {
    format!("{} {}", member, phrase)
}
