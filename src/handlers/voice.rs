use async_trait::async_trait;
use poise::serenity_prelude::{
    self as serenity, ChannelId, CreateAllowedMentions, CreateMessage, GuildId, Http,
    Mentionable, VoiceState,
};
use tracing::{debug, error, info, warn};

use crate::{
    models::{Data, Error, VoicePresence, member_sources},
    services::voice_notifier::{AnnouncementSink, compose_and_send, is_announced, roll_scream},
};

/// Announcement sink backed by a Discord text channel
pub struct ChannelSink<'a> {
    http: &'a Http,
    channel_id: ChannelId,
}

impl<'a> ChannelSink<'a> {
    pub fn new(http: &'a Http, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

#[async_trait]
impl AnnouncementSink for ChannelSink<'_> {
    async fn send(&self, text: &str) -> Result<(), Error> {
        let message = CreateMessage::new()
            .content(text)
            .allowed_mentions(CreateAllowedMentions::new());
        self.channel_id.send_message(self.http, message).await?;
        Ok(())
    }
}

/// Handle voice state updates (joins, leaves, moves and flag changes)
pub async fn handle_voice_state_update(
    ctx: &serenity::Context,
    old_state: Option<VoiceState>,
    new_state: VoiceState,
    data: &Data,
) {
    let guild_id = match new_state.guild_id {
        Some(id) => id,
        None => return,
    };
    if !data.is_watched_guild(guild_id) {
        return;
    }

    let announcement_channel = match data.announcement_channel {
        Some(id) => id,
        None => {
            debug!("No announcement channel, skipping voice update");
            return;
        }
    };

    let mut previous = VoicePresence::unresolved(old_state.as_ref());
    let mut current = VoicePresence::unresolved(Some(&new_state));

    debug!(
        "Voice update for {}: {:?} -> {:?}, changed flags {:?}",
        new_state.user_id,
        previous.channel_id(),
        current.channel_id(),
        previous.changed_flags(&current)
    );

    if !is_announced(&previous, &current) {
        return;
    }

    resolve_channel_names(ctx, &mut previous, &mut current).await;
    let member_name = resolve_member_name(ctx, guild_id, old_state.as_ref(), &new_state).await;

    let scream = roll_scream(data.scream_chance);
    let sink = ChannelSink::new(&ctx.http, announcement_channel);

    match compose_and_send(&member_name, &previous, &current, scream, &sink).await {
        Ok(0) => {}
        Ok(sent) => info!(
            "Announced {} voice update(s) for {} in {}",
            sent, new_state.user_id, announcement_channel
        ),
        Err(e) => error!("Failed to send voice notification: {}", e),
    }
}

/// Fill in channel names, looking each distinct channel up once
async fn resolve_channel_names(
    ctx: &serenity::Context,
    previous: &mut VoicePresence,
    current: &mut VoicePresence,
) {
    if let Some(channel) = previous.channel.as_mut() {
        channel.name = channel_name(ctx, channel.id).await;
    }

    if let Some(channel) = current.channel.as_mut() {
        match &previous.channel {
            Some(old) if old.id == channel.id => channel.name = old.name.clone(),
            _ => channel.name = channel_name(ctx, channel.id).await,
        }
    }
}

/// Look up a channel's name, falling back to its mention
async fn channel_name(ctx: &serenity::Context, channel_id: ChannelId) -> String {
    match channel_id.to_channel(ctx).await {
        Ok(channel) => match channel.guild() {
            Some(guild_channel) => guild_channel.name,
            None => channel_id.mention().to_string(),
        },
        Err(e) => {
            warn!("Failed to resolve channel {}: {}", channel_id, e);
            channel_id.mention().to_string()
        }
    }
}

/// Pick the display name of the member behind a voice update
async fn resolve_member_name(
    ctx: &serenity::Context,
    guild_id: GuildId,
    old_state: Option<&VoiceState>,
    new_state: &VoiceState,
) -> String {
    let cached = member_sources(old_state, new_state)
        .into_iter()
        .flatten()
        .find_map(|state| state.member.as_ref())
        .map(|member| member.display_name().to_string());
    if let Some(name) = cached {
        return name;
    }

    match guild_id.member(ctx, new_state.user_id).await {
        Ok(member) => member.display_name().to_string(),
        Err(e) => {
            warn!("Failed to get member {}: {}", new_state.user_id, e);
            new_state.user_id.to_string()
        }
    }
}
