use poise::serenity_prelude::{ChannelId, GuildId, Mentionable, VoiceState};

/// A voice channel as seen in one presence snapshot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoiceChannel {
    pub id: ChannelId,
    pub name: String,
}

impl VoiceChannel {
    /// A channel whose name has not been looked up yet, shown as its mention
    pub fn unresolved(id: ChannelId) -> Self {
        Self {
            id,
            name: id.mention().to_string(),
        }
    }
}

/// Voice-related state of a guild member at one point in time
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoicePresence {
    /// Channel the member is connected to, if any
    pub channel: Option<VoiceChannel>,
    pub self_deaf: bool,
    pub self_mute: bool,
    pub self_video: bool,
    pub server_deaf: bool,
    pub server_mute: bool,
    pub streaming: bool,
}

impl VoicePresence {
    /// Snapshot a serenity voice state; `channel` describes `state.channel_id`
    pub fn from_voice_state(state: &VoiceState, channel: Option<VoiceChannel>) -> Self {
        Self {
            channel,
            self_deaf: state.self_deaf,
            self_mute: state.self_mute,
            self_video: state.self_video,
            server_deaf: state.deaf,
            server_mute: state.mute,
            streaming: state.self_stream.unwrap_or(false),
        }
    }

    /// Snapshot with channel names left unresolved; a missing state is not connected
    pub fn unresolved(state: Option<&VoiceState>) -> Self {
        state
            .map(|s| Self::from_voice_state(s, s.channel_id.map(VoiceChannel::unresolved)))
            .unwrap_or_default()
    }

    /// Read a single flag
    pub fn flag(&self, flag: VoiceFlag) -> bool {
        match flag {
            VoiceFlag::SelfDeaf => self.self_deaf,
            VoiceFlag::SelfMute => self.self_mute,
            VoiceFlag::SelfVideo => self.self_video,
            VoiceFlag::ServerDeaf => self.server_deaf,
            VoiceFlag::ServerMute => self.server_mute,
            VoiceFlag::Streaming => self.streaming,
        }
    }

    /// Flags whose value differs between `self` and `other`, in declaration order
    pub fn changed_flags(&self, other: &VoicePresence) -> Vec<VoiceFlag> {
        VoiceFlag::ALL
            .iter()
            .copied()
            .filter(|&flag| self.flag(flag) != other.flag(flag))
            .collect()
    }

    /// Id of the connected channel
    pub fn channel_id(&self) -> Option<ChannelId> {
        self.channel.as_ref().map(|c| c.id)
    }
}

/// Voice states to search for the member's display name, in priority order
///
/// A join prefers the new state; every other update prefers the old one.
pub fn member_sources<'a>(
    old_state: Option<&'a VoiceState>,
    new_state: &'a VoiceState,
) -> [Option<&'a VoiceState>; 2] {
    let joined = old_state.and_then(|old| old.channel_id).is_none();
    if joined {
        [Some(new_state), old_state]
    } else {
        [old_state, Some(new_state)]
    }
}

/// Boolean voice flags carried by a presence snapshot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VoiceFlag {
    SelfDeaf,
    SelfMute,
    SelfVideo,
    ServerDeaf,
    ServerMute,
    Streaming,
}

impl VoiceFlag {
    pub const ALL: [VoiceFlag; 6] = [
        VoiceFlag::SelfDeaf,
        VoiceFlag::SelfMute,
        VoiceFlag::SelfVideo,
        VoiceFlag::ServerDeaf,
        VoiceFlag::ServerMute,
        VoiceFlag::Streaming,
    ];

    /// Gateway-style name of the flag
    pub fn name(self) -> &'static str {
        match self {
            VoiceFlag::SelfDeaf => "selfDeaf",
            VoiceFlag::SelfMute => "selfMute",
            VoiceFlag::SelfVideo => "selfVideo",
            VoiceFlag::ServerDeaf => "serverDeaf",
            VoiceFlag::ServerMute => "serverMute",
            VoiceFlag::Streaming => "streaming",
        }
    }
}

/// Bot state shared across all handlers
#[derive(Clone, Debug)]
pub struct Data {
    /// Only voice updates from this guild are announced
    pub guild_id: GuildId,
    /// Resolved announcement channel; `None` when it could not be found at startup
    pub announcement_channel: Option<ChannelId>,
    /// Probability of the alternate wording per voice update
    pub scream_chance: f64,
}

impl Data {
    /// Create a new Data instance
    pub fn new(
        guild_id: GuildId,
        announcement_channel: Option<ChannelId>,
        scream_chance: f64,
    ) -> Self {
        Self {
            guild_id,
            announcement_channel,
            scream_chance,
        }
    }

    /// Check whether an event from `guild_id` should be announced
    pub fn is_watched_guild(&self, guild_id: GuildId) -> bool {
        guild_id == self.guild_id
    }
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changed_flags_in_declaration_order() {
        let before = VoicePresence::default();
        let after = VoicePresence {
            streaming: true,
            self_mute: true,
            self_deaf: true,
            ..Default::default()
        };

        assert_eq!(
            before.changed_flags(&after),
            vec![VoiceFlag::SelfDeaf, VoiceFlag::SelfMute, VoiceFlag::Streaming]
        );
        assert!(after.changed_flags(&after).is_empty());
    }

    #[test]
    fn test_flag_names() {
        assert_eq!(VoiceFlag::ServerDeaf.name(), "serverDeaf");
        assert_eq!(VoiceFlag::Streaming.name(), "streaming");
    }

    #[test]
    fn test_is_watched_guild() {
        let data = Data::new(GuildId::new(42), None, 0.01);
        assert!(data.is_watched_guild(GuildId::new(42)));
        assert!(!data.is_watched_guild(GuildId::new(7)));
    }

    fn voice_state(overrides: serde_json::Value) -> VoiceState {
        let mut json = serde_json::json!({
            "guild_id": "42",
            "channel_id": "1",
            "user_id": "1000",
            "member": null,
            "session_id": "abc",
            "deaf": false,
            "mute": false,
            "self_deaf": false,
            "self_mute": false,
            "self_stream": null,
            "self_video": false,
            "suppress": false,
            "request_to_speak_timestamp": null
        });
        if let (Some(base), Some(extra)) = (json.as_object_mut(), overrides.as_object()) {
            for (key, value) in extra {
                base.insert(key.clone(), value.clone());
            }
        }
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_from_voice_state_missing_stream_is_off() {
        let state = voice_state(serde_json::json!({}));
        let presence = VoicePresence::from_voice_state(&state, None);
        assert!(!presence.streaming);
        assert_eq!(presence, VoicePresence::default());

        let state = voice_state(serde_json::json!({ "self_stream": true }));
        assert!(VoicePresence::from_voice_state(&state, None).streaming);
    }

    #[test]
    fn test_from_voice_state_server_flags() {
        let state = voice_state(serde_json::json!({ "deaf": true }));
        let presence = VoicePresence::from_voice_state(&state, None);
        assert!(presence.server_deaf);
        assert!(!presence.server_mute);
        assert!(!presence.self_deaf);

        let state = voice_state(serde_json::json!({ "mute": true }));
        let presence = VoicePresence::from_voice_state(&state, None);
        assert!(presence.server_mute);
        assert!(!presence.server_deaf);
        assert!(!presence.self_mute);
    }

    #[test]
    fn test_from_voice_state_self_flags() {
        let state = voice_state(serde_json::json!({
            "self_deaf": true,
            "self_mute": true,
            "self_video": true
        }));
        let presence = VoicePresence::from_voice_state(&state, None);
        assert!(presence.self_deaf);
        assert!(presence.self_mute);
        assert!(presence.self_video);
        assert!(!presence.server_deaf);
        assert!(!presence.server_mute);
    }

    #[test]
    fn test_from_voice_state_keeps_channel() {
        let state = voice_state(serde_json::json!({}));
        let channel = state.channel_id.map(VoiceChannel::unresolved);
        let presence = VoicePresence::from_voice_state(&state, channel);
        assert_eq!(presence.channel_id(), Some(ChannelId::new(1)));
        assert_eq!(presence.channel.unwrap().name, "<#1>");
    }

    #[test]
    fn test_unresolved_missing_state_is_not_connected() {
        assert_eq!(VoicePresence::unresolved(None), VoicePresence::default());

        let state = voice_state(serde_json::json!({ "self_video": true }));
        let presence = VoicePresence::unresolved(Some(&state));
        assert_eq!(presence.channel_id(), Some(ChannelId::new(1)));
        assert!(presence.self_video);
    }

    fn session_ids(sources: [Option<&VoiceState>; 2]) -> Vec<&str> {
        sources
            .into_iter()
            .flatten()
            .map(|state| state.session_id.as_str())
            .collect()
    }

    #[test]
    fn test_member_sources_join_prefers_new_state() {
        let old = voice_state(serde_json::json!({ "channel_id": null, "session_id": "old" }));
        let new = voice_state(serde_json::json!({ "session_id": "new" }));
        assert_eq!(session_ids(member_sources(Some(&old), &new)), vec!["new", "old"]);
        assert_eq!(session_ids(member_sources(None, &new)), vec!["new"]);
    }

    #[test]
    fn test_member_sources_other_updates_prefer_old_state() {
        let old = voice_state(serde_json::json!({ "session_id": "old" }));
        let left = voice_state(serde_json::json!({ "channel_id": null, "session_id": "new" }));
        assert_eq!(session_ids(member_sources(Some(&old), &left)), vec!["old", "new"]);

        let moved = voice_state(serde_json::json!({ "channel_id": "2", "session_id": "new" }));
        assert_eq!(session_ids(member_sources(Some(&old), &moved)), vec!["old", "new"]);
    }
}
