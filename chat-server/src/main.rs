//! The chat server binary: binds the configured listen address, logs a
//! startup banner, then spawns one task per accepted connection against a
//! directory and chat room shared across the whole process.

use std::sync::Arc;

use chat_server::chatroom::ChatRoomState;
use chat_server::directory::UserDirectory;
use chat_server::session::{handle_connection, SharedState};
use shakespeare::ActorSpawn;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_env("CHAT_SERVER_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.init();

	let addr = chat_server::config::listen_addr();
	let listener = TcpListener::bind(&addr)
		.await
		.expect("failed to bind configured listen address");
	info!(%addr, "chat server listening");

	let ActorSpawn {
		actor: chat_room, ..
	} = ChatRoomState::start(ChatRoomState::default());
	let state = Arc::new(SharedState {
		directory: Arc::new(UserDirectory::new()),
		chat_room,
	});

	loop {
		let (socket, peer) = match listener.accept().await {
			Ok(pair) => pair,
			Err(err) => {
				warn!(error = %err, "failed to accept connection");
				continue;
			}
		};
		info!(%peer, "connection accepted");
		let state = Arc::clone(&state);
		tokio::spawn(async move {
			handle_connection(socket, peer, state).await;
		});
	}
}
