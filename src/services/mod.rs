/// Business logic independent of the Discord client
pub mod voice_notifier;
