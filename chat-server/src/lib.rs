#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(clippy::pedantic)]

//! The concurrent RPC engine behind the chat service: a user directory with
//! login/logout lifecycle, a per-user mailbox, a broadcast chat room, and
//! the per-connection session loop that dispatches the six wire operations
//! against them.
//!
//! Every accepted TCP connection is handled by one [`tokio::spawn`]ed task
//! running straight-line `async` code (see [`session`]) rather than a
//! hand-rolled completion-queue state machine. The one place this crate
//! reaches for an actor is the chat room broadcast fan-out (see
//! [`chatroom`]), where message-passing is a better fit than a lock held
//! across a slow client's write.

pub mod chatroom;
pub mod config;
pub mod directory;
pub mod error;
pub mod mailbox;
pub mod session;
