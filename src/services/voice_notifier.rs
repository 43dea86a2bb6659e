//! Voice notifier - turns a voice presence transition into announcement messages
use async_trait::async_trait;
use rand::Rng;

use crate::{
    models::{Error, VoicePresence},
    utils::{
        labels::flag_labels,
        messages::{format_flag_change, format_joined, format_left, format_moved},
        string_utils::sanitize,
    },
};

/// Destination for announcement messages
#[async_trait]
pub trait AnnouncementSink: Send + Sync {
    /// Deliver one message
    async fn send(&self, text: &str) -> Result<(), Error>;
}

/// Decide whether this update uses the alternate wording
pub fn roll_scream(chance: f64) -> bool {
    rand::thread_rng().gen_bool(chance)
}

/// Check whether a transition produces any message, without needing names
pub fn is_announced(previous: &VoicePresence, current: &VoicePresence) -> bool {
    match (previous.channel_id(), current.channel_id()) {
        (None, None) => false,
        (Some(old), Some(new)) if old == new => flag_labels(false)
            .iter()
            .any(|label| previous.flag(label.flag) != current.flag(label.flag)),
        _ => true,
    }
}

/// Build the messages announcing a transition, in send order
pub fn compose(
    member_name: &str,
    previous: &VoicePresence,
    current: &VoicePresence,
    scream: bool,
) -> Vec<String> {
    let name = sanitize(member_name);

    let (old_channel, new_channel) = match (&previous.channel, &current.channel) {
        (None, Some(new)) => return vec![format_joined(&name, &new.name)],
        (Some(old), None) => return vec![format_left(&name, &old.name)],
        (None, None) => return Vec::new(),
        (Some(old), Some(new)) => (old, new),
    };

    let mut messages = Vec::new();
    if old_channel.id != new_channel.id {
        messages.push(format_moved(&name, &old_channel.name, &new_channel.name));
    }

    for label in flag_labels(scream) {
        let value = current.flag(label.flag);
        if previous.flag(label.flag) != value {
            messages.push(format_flag_change(&name, label.phrase(value)));
        }
    }

    messages
}

/// Compose the messages for a transition and send them one at a time
///
/// Stops at the first delivery failure and returns it.
pub async fn compose_and_send<S: AnnouncementSink + ?Sized>(
    member_name: &str,
    previous: &VoicePresence,
    current: &VoicePresence,
    scream: bool,
    sink: &S,
) -> Result<usize, Error> {
    let messages = compose(member_name, previous, current, scream);
    for message in &messages {
        sink.send(message).await?;
    }
    Ok(messages.len())
}
