//! # Wildtree - Virtual Tree Companion Bot
//!
//! Wildtree is a message-driven virtual-pet bot core: every user tends a
//! personal tree through a fixed menu of care actions and levels it up by
//! accumulating experience. The chat transport is an external collaborator
//! wired in over channels, so the same core runs under any front end.
//!
//! ## Features
//!
//! - **Cooldown-Gated Actions**: Watering, sunshine, and a daily bonus, each
//!   with its own per-user minimum interval and wait-remaining messages.
//! - **Experience Leveling**: A strictly increasing experience curve with
//!   level-up rollover, per-level sun/water bonuses, and a hard level cap.
//! - **Durable User State**: One record per user in an embedded Sled store
//!   with idempotent creation and atomic partial updates.
//! - **Channel Transport Contract**: Inbound commands and outbound replies
//!   are plain mpsc messages; the binary ships a console driver.
//! - **Async Design**: Built with Tokio; one command is fully processed and
//!   persisted before the next is received.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tokio::sync::mpsc;
//! use wildtree::bot::BotServer;
//! use wildtree::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!
//!     // The transport owns the other ends of these channels.
//!     let (_inbound_tx, inbound_rx) = mpsc::unbounded_channel();
//!     let (outbound_tx, _outbound_rx) = mpsc::unbounded_channel();
//!
//!     let server = BotServer::new(&config, inbound_rx, outbound_tx)?;
//!     server.run().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`bot`] - Menu parsing, action handlers, reply rendering, server loop
//! - [`tree`] - User records, persistence, cooldowns, and progression
//! - [`config`] - Configuration management and validation
//! - [`validation`] - Display-name sanitation
//! - [`logutil`] - Single-line log escaping for user-supplied text
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   Bot Server    │ ← Command routing and replies
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │  Tree Engine    │ ← Cooldowns and progression
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   User Store    │ ← Sled persistence
//! └─────────────────┘
//! ```

pub mod bot;
pub mod config;
pub mod logutil;
pub mod tree;
pub mod validation;
