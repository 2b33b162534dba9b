//! Zulip bot CLI
//!
//! Sends messages and watches events as a configured bot identity.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zulip_bot::config::Config;
use zulip_bot::{parse_event_messages, ApiResponse, Bot, EventMessage, Message, ZulipClient};

#[derive(Parser)]
#[command(name = "zulip-bot")]
#[command(about = "Bot client for the Zulip chat API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Store bot credentials
    Login {
        /// Zulip site URL, e.g. https://chat.example.com
        #[arg(long)]
        site: String,

        /// Bot email address
        #[arg(long)]
        email: String,

        /// Bot API key
        #[arg(long)]
        api_key: String,
    },

    /// Show the stored bot identity
    Status,

    /// Send a message to a stream topic or to users
    Send {
        /// Stream to post to (stream message)
        #[arg(short, long)]
        stream: Option<String>,

        /// Topic to post under (stream message)
        #[arg(short, long)]
        topic: Option<String>,

        /// Recipient email (private message; repeatable)
        #[arg(long)]
        to: Vec<String>,

        /// Message content
        message: String,
    },

    /// Poll for incoming messages and print them
    Listen {
        /// Reply to every incoming message with this text
        #[arg(long)]
        reply: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Login {
            site,
            email,
            api_key,
        } => {
            login(site, email, api_key)?;
        }
        Commands::Status => {
            status()?;
        }
        Commands::Send {
            stream,
            topic,
            to,
            message,
        } => {
            send(stream, topic, to, message).await?;
        }
        Commands::Listen { reply } => {
            listen(reply).await?;
        }
    }

    Ok(())
}

fn login(site: String, email: String, api_key: String) -> Result<()> {
    let config = Config {
        site,
        email,
        api_key,
    };
    config.save()?;
    println!("Credentials stored for {}", config.email);
    Ok(())
}

fn status() -> Result<()> {
    let config = Config::load()?;
    if !config.is_complete() {
        println!("Not configured. Run 'zulip-bot login'.");
        return Ok(());
    }
    println!("Site:  {}", config.site);
    println!("Email: {}", config.email);
    Ok(())
}

/// Load credentials and build a bot over the live transport.
fn load_bot() -> Result<(Config, Bot)> {
    let config = Config::load()?;
    if !config.is_complete() {
        bail!("Missing credentials. Run 'zulip-bot login' first.");
    }
    let bot = Bot::new(config.email.clone(), Box::new(ZulipClient::new(&config)));
    Ok((config, bot))
}

/// Turn a non-2xx API response into a clear error.
fn check_response(resp: &ApiResponse) -> Result<()> {
    if !resp.status.is_success() {
        bail!("HTTP {}: {}", resp.status.as_u16(), resp.body);
    }
    Ok(())
}

async fn send(
    stream: Option<String>,
    topic: Option<String>,
    to: Vec<String>,
    content: String,
) -> Result<()> {
    let (_, bot) = load_bot()?;
    let message = Message {
        stream: stream.unwrap_or_default(),
        topic: topic.unwrap_or_default(),
        emails: to,
        content,
    };

    let resp = bot.send(&message).await?;
    check_response(&resp)?;
    println!("Message sent.");
    Ok(())
}

/// Where a message came from, for display.
fn message_context(message: &EventMessage) -> String {
    if message.subject.is_empty() {
        "pm".to_string()
    } else {
        format!("{}/{}", message.display_recipient.topic(), message.subject)
    }
}

async fn listen(reply: Option<String>) -> Result<()> {
    let (config, bot) = load_bot()?;
    let client = ZulipClient::new(&config);

    let mut queue = client.register_message_queue().await?;
    tracing::info!("Listening (queue {})", queue.queue_id);

    loop {
        let raw = client.poll_events(&mut queue).await?;
        let messages = match parse_event_messages(&raw) {
            Ok(messages) => messages,
            Err(e) => {
                // Heartbeat-only batches carry no message objects
                tracing::debug!("Skipping undecodable batch: {}", e);
                continue;
            }
        };

        for message in &messages {
            println!(
                "[{}] {}: {}",
                message_context(message),
                message.sender_full_name,
                message.content
            );

            if let Some(ref text) = reply {
                if message.sender_email != config.email {
                    let resp = bot.respond(message, text).await?;
                    check_response(&resp)?;
                }
            }
        }
    }
}
