//! Interaction layer: menu command parsing, action handlers, reply rendering,
//! and the channel-driven server loop that ties them to a transport.

pub mod commands;
pub mod handlers;
pub mod render;
pub mod server;

pub use commands::MenuCommand;
pub use handlers::TreeHandlers;
pub use server::{BotServer, InboundCommand, OutboundReply};
