//! Flag-label table: how a voice flag change is worded
use crate::models::VoiceFlag;

use super::string_utils::replace_in_pair;

/// Phrases for each announced flag, `[when false, when true]`, in announcement order
const FLAG_LABELS: &[(VoiceFlag, [&str; 2])] = &[
    (VoiceFlag::SelfDeaf, ["undeafened", "deafened"]),
    // (VoiceFlag::SelfMute, ["unmuted", "muted"]),
    (VoiceFlag::SelfVideo, ["turned off video", "turned on video"]),
    (VoiceFlag::ServerDeaf, ["server undeafened", "server deafened"]),
    (VoiceFlag::ServerMute, ["server unmuted", "server muted"]),
    (VoiceFlag::Streaming, ["stopped streaming", "started streaming"]),
];

/// One row of the label table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlagLabel {
    pub flag: VoiceFlag,
    pub phrases: [String; 2],
}

impl FlagLabel {
    /// Phrase describing the flag's new value
    pub fn phrase(&self, value: bool) -> &str {
        &self.phrases[usize::from(value)]
    }
}

/// Build the label table for one voice update
///
/// With `scream` set, deafen phrases read "defeat" and the streaming phrases
/// read "scream". The returned table is a fresh copy; `FLAG_LABELS` is never
/// modified.
pub fn flag_labels(scream: bool) -> Vec<FlagLabel> {
    FLAG_LABELS
        .iter()
        .map(|(flag, [off, on])| {
            let phrases = [off.to_string(), on.to_string()];
            let phrases = match flag {
                _ if !scream => phrases,
                f if f.name().contains("Deaf") => replace_in_pair(&phrases, "deafen", "defeat"),
                VoiceFlag::Streaming => replace_in_pair(&phrases, "stream", "scream"),
                _ => phrases,
            };
            FlagLabel {
                flag: *flag,
                phrases,
            }
        })
        .collect()
}
