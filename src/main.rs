mod constants;
mod handlers;
mod models;
mod services;
mod utils;

use poise::serenity_prelude as serenity;
use tracing::{error, info, warn};

use crate::{
    constants::{DEFAULT_SCREAM_CHANCE, LOG_DIRECTIVE},
    handlers::handle_voice_state_update,
    models::{Data, Error},
    utils::validation::{ConfigError, parse_chance, parse_id, require},
};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    initialize_logging();

    // Load configuration from environment
    let config = match load_configuration() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Create and start the bot
    if let Err(e) = start_bot(config).await {
        error!("Bot error: {}", e);
        std::process::exit(1);
    }
}

/// Configuration loaded from environment variables
struct Config {
    discord_token: String,
    guild_id: serenity::GuildId,
    channel_id: serenity::ChannelId,
    scream_chance: f64,
}

/// Initialize the logging system
fn initialize_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(LOG_DIRECTIVE.parse().expect("valid log directive")),
        )
        .init();
}

/// Load configuration from environment variables
fn load_configuration() -> Result<Config, ConfigError> {
    let discord_token = require(
        "DISCORD_TOKEN",
        std::env::var("DISCORD_TOKEN").ok(),
        "export DISCORD_TOKEN=your_bot_token",
    )?;

    let guild_id = require(
        "VOICE_LOG_GUILD_ID",
        std::env::var("VOICE_LOG_GUILD_ID").ok(),
        "export VOICE_LOG_GUILD_ID=guild_to_watch",
    )?;
    let guild_id = serenity::GuildId::new(parse_id("VOICE_LOG_GUILD_ID", &guild_id)?);

    let channel_id = require(
        "VOICE_LOG_CHANNEL_ID",
        std::env::var("VOICE_LOG_CHANNEL_ID").ok(),
        "export VOICE_LOG_CHANNEL_ID=text_channel_for_announcements",
    )?;
    let channel_id = serenity::ChannelId::new(parse_id("VOICE_LOG_CHANNEL_ID", &channel_id)?);

    // Optional: chance of the alternate wording, defaults to 1%
    let scream_chance = match std::env::var("VOICE_LOG_SCREAM_CHANCE") {
        Ok(value) => parse_chance(&value)?,
        Err(_) => DEFAULT_SCREAM_CHANCE,
    };

    info!(
        "Watching guild {}, announcing in channel {}",
        guild_id, channel_id
    );

    Ok(Config {
        discord_token,
        guild_id,
        channel_id,
        scream_chance,
    })
}

/// Resolve the announcement channel, returning `None` if it is unusable
async fn resolve_announcement_channel(
    ctx: &serenity::Context,
    channel_id: serenity::ChannelId,
) -> Option<serenity::ChannelId> {
    match channel_id.to_channel(ctx).await {
        Ok(channel) => match channel.guild() {
            Some(guild_channel) => {
                info!("Announcing voice updates in #{}", guild_channel.name);
                Some(channel_id)
            }
            None => {
                warn!(
                    "Announcement channel {} is not a guild channel, voice updates will not be announced",
                    channel_id
                );
                None
            }
        },
        Err(e) => {
            warn!(
                "Failed to resolve announcement channel {}: {}. Voice updates will not be announced",
                channel_id, e
            );
            None
        }
    }
}

/// Create and start the Discord bot
async fn start_bot(config: Config) -> Result<(), Error> {
    let Config {
        discord_token,
        guild_id,
        channel_id,
        scream_chance,
    } = config;

    // Create framework
    let framework = poise::Framework::<Data, Error>::builder()
        .options(poise::FrameworkOptions {
            event_handler: |ctx, event, _framework, data| {
                Box::pin(async move {
                    if let serenity::FullEvent::VoiceStateUpdate { old, new } = event {
                        handle_voice_state_update(ctx, old.clone(), new.clone(), data).await;
                    }
                    Ok(())
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, _framework| {
            Box::pin(async move {
                let announcement_channel = resolve_announcement_channel(ctx, channel_id).await;

                info!("Bot is ready!");

                Ok(Data::new(guild_id, announcement_channel, scream_chance))
            })
        })
        .build();

    // Create client with required intents
    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::GUILD_VOICE_STATES
        | serenity::GatewayIntents::GUILD_MEMBERS;

    let mut client = serenity::ClientBuilder::new(discord_token, intents)
        .framework(framework)
        .await?;

    // Start the bot
    info!("Starting bot...");
    client.start().await?;

    Ok(())
}
