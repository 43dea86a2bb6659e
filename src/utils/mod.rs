/// Utility modules for common functionality
pub mod labels;
pub mod messages;
pub mod string_utils;
pub mod validation;
