//! Channel-driven bot server.
//!
//! The transport is an external collaborator: it feeds [`InboundCommand`]s in
//! through an mpsc channel and delivers the [`OutboundReply`]s the server
//! pushes out on the other. `run` processes one inbound command at a time and
//! finishes it (including persistence) before receiving the next, which
//! serializes all per-user operations by construction. The loop ends when the
//! inbound channel closes.

use anyhow::Result;
use log::{debug, error, info};
use tokio::sync::mpsc;

use crate::bot::commands::MenuCommand;
use crate::bot::handlers::TreeHandlers;
use crate::bot::render;
use crate::config::Config;
use crate::logutil::escape_log;
use crate::tree::cooldown::CooldownPolicy;
use crate::tree::storage::TreeStore;
use crate::tree::types::UserId;

/// One user action as delivered by the transport.
#[derive(Debug, Clone)]
pub struct InboundCommand {
    pub user_id: UserId,
    pub display_name: String,
    pub text: String,
}

/// One plain-text reply addressed back to the originating user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundReply {
    pub user_id: UserId,
    pub text: String,
}

pub struct BotServer {
    handlers: TreeHandlers,
    inbound: mpsc::UnboundedReceiver<InboundCommand>,
    outbound: mpsc::UnboundedSender<OutboundReply>,
}

impl BotServer {
    /// Open the user store under the configured data directory and wire the
    /// server to the transport channels.
    pub fn new(
        config: &Config,
        inbound: mpsc::UnboundedReceiver<InboundCommand>,
        outbound: mpsc::UnboundedSender<OutboundReply>,
    ) -> Result<Self> {
        let store = TreeStore::open(&config.storage.data_dir)?;
        let cooldowns = CooldownPolicy::from_config(&config.cooldowns);
        let handlers = TreeHandlers::new(store, cooldowns, config.bot.welcome_message.clone());
        Ok(Self::with_handlers(handlers, inbound, outbound))
    }

    /// Wire a pre-built handler set (tests inject scratch stores this way).
    pub fn with_handlers(
        handlers: TreeHandlers,
        inbound: mpsc::UnboundedReceiver<InboundCommand>,
        outbound: mpsc::UnboundedSender<OutboundReply>,
    ) -> Self {
        Self {
            handlers,
            inbound,
            outbound,
        }
    }

    /// Receive and process inbound commands until the transport hangs up.
    pub async fn run(mut self) -> Result<()> {
        info!("bot server running");
        while let Some(inbound) = self.inbound.recv().await {
            let replies = self.process(&inbound);
            for reply in replies {
                if self.outbound.send(reply).is_err() {
                    info!("reply channel closed; stopping");
                    return Ok(());
                }
            }
        }
        info!("inbound channel closed; bot server stopping");
        Ok(())
    }

    /// Parse, dispatch, and map errors to a generic failure reply. Storage
    /// failures never leak details to the user; they are logged here.
    fn process(&self, inbound: &InboundCommand) -> Vec<OutboundReply> {
        let command = MenuCommand::parse(&inbound.text);
        debug!(
            "user {} -> {:?} ({})",
            inbound.user_id,
            command,
            escape_log(&inbound.text)
        );
        let texts = match self
            .handlers
            .dispatch(&command, inbound.user_id, &inbound.display_name)
        {
            Ok(texts) => texts,
            Err(err) => {
                error!("action failed for user {}: {}", inbound.user_id, err);
                vec![render::generic_failure()]
            }
        };
        texts
            .into_iter()
            .map(|text| OutboundReply {
                user_id: inbound.user_id,
                text,
            })
            .collect()
    }
}
