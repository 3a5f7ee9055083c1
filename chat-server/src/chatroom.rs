//! The shared chat room: a [`shakespeare`] actor pair grounding `Chat`'s
//! fan-out in message passing rather than a shared, lockable broadcast list.
//!
//! [`ChatRoom`] holds one [`ChatEndpoint`] handle per currently-chatting
//! session. [`ChatEndpoint`] does nothing but forward a line to the
//! session's writer task; it exists so that a slow or dead session can
//! never block the room itself, nor the other sessions it forwards to —
//! each endpoint's mailbox is independent, and `ChatRoom::broadcast`
//! fires every `send_out` call without waiting for the target session to
//! do anything with it.

use std::collections::HashMap;
use std::sync::Arc;

use chat_protocol::{ChatLine, ServerMessage};
use tokio::sync::mpsc::UnboundedSender;

use crate::error::SessionError;

/// Identifies one live Chat endpoint, independent of the user name it
/// happens to carry. Membership and sender suppression are keyed on this,
/// not on `ChatLine::user` — two concurrent Chat streams logged in under the
/// same name are two distinct endpoints and must still see each other.
pub type EndpointId = u64;

#[shakespeare::actor]
pub mod ChatRoom {
	#[derive(Default)]
	pub struct ChatRoomState {
		members: HashMap<EndpointId, Arc<dyn ChatOutboundRole>>,
	}

	#[shakespeare::performance(canonical)]
	impl ChatRoomRole for ChatRoomState {
		/// Registers `id`'s endpoint. Each connection's Chat stream gets a
		/// fresh `id`, so this never collides with a still-live endpoint.
		fn join(&mut self, id: EndpointId, endpoint: Arc<dyn ChatOutboundRole>) {
			self.members.insert(id, endpoint);
		}

		/// Unregisters `id`. Not an error if `id` was never joined.
		fn leave(&mut self, id: EndpointId) {
			self.members.remove(&id);
		}

		/// Forwards `messages` to every member except `from` itself.
		///
		/// `from` identifies the sender's own endpoint, not its user name:
		/// two simultaneous Chat streams under the same name are distinct
		/// endpoints and each sees the other's lines.
		///
		/// Best-effort: a `send_out` failure (the target session's writer
		/// task has already exited) is swallowed here. The target's own
		/// connection handler is responsible for calling `leave` when it
		/// notices its session has ended.
		async fn broadcast(&mut self, from: EndpointId, user: String, messages: String) {
			for (id, endpoint) in &self.members {
				if *id == from {
					continue;
				}
				let _ = endpoint
					.send_out(ChatLine {
						user: user.clone(),
						messages: messages.clone(),
					})
					.await;
			}
		}
	}
}

#[shakespeare::actor]
pub mod ChatEndpoint {
	pub struct ChatEndpointState {
		pub writer: UnboundedSender<ServerMessage>,
	}

	#[shakespeare::performance(canonical)]
	impl ChatOutboundRole for ChatEndpointState {
		/// Hands `line` to the session's writer task. The writer task owns
		/// actually serializing it onto the socket; this method only needs
		/// to get it there, or fail silently if the session is gone.
		fn send_out(&mut self, line: ChatLine) {
			let _ = self.writer.send(ServerMessage::Chat(line));
		}
	}

	fn catch(_panic: Box<dyn std::any::Any + Send>) -> SessionError {
		SessionError::EndpointPanicked
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use shakespeare::ActorSpawn;
	use tokio::sync::mpsc::unbounded_channel;
	use tokio::time::timeout;

	use super::{ChatEndpointState, ChatOutboundRole, ChatRoomRole, ChatRoomState};

	#[tokio::test]
	async fn broadcast_reaches_everyone_but_the_sender() {
		let ActorSpawn { actor: room, .. } = ChatRoomState::start(ChatRoomState::default());

		let (alice_tx, mut alice_rx) = unbounded_channel();
		let ActorSpawn { actor: alice, .. } =
			ChatEndpointState::start(ChatEndpointState { writer: alice_tx });
		let (bob_tx, mut bob_rx) = unbounded_channel();
		let ActorSpawn { actor: bob, .. } =
			ChatEndpointState::start(ChatEndpointState { writer: bob_tx });

		room.join(1, alice as std::sync::Arc<dyn ChatOutboundRole>)
			.await
			.unwrap();
		room.join(2, bob as std::sync::Arc<dyn ChatOutboundRole>)
			.await
			.unwrap();

		room.broadcast(1, "Alice".to_owned(), "hello".to_owned())
			.await
			.unwrap();

		let received = bob_rx.recv().await.unwrap();
		match received {
			chat_protocol::ServerMessage::Chat(line) => {
				assert_eq!(line.user, "Alice");
				assert_eq!(line.messages, "hello");
			}
			other => panic!("unexpected message: {other:?}"),
		}

		assert!(timeout(Duration::from_millis(50), alice_rx.recv())
			.await
			.is_err());
	}

	#[tokio::test]
	async fn leaving_stops_further_delivery() {
		let ActorSpawn { actor: room, .. } = ChatRoomState::start(ChatRoomState::default());
		let (bob_tx, mut bob_rx) = unbounded_channel();
		let ActorSpawn { actor: bob, .. } =
			ChatEndpointState::start(ChatEndpointState { writer: bob_tx });

		room.join(2, bob as std::sync::Arc<dyn ChatOutboundRole>)
			.await
			.unwrap();
		room.leave(2).await.unwrap();
		room.broadcast(1, "Alice".to_owned(), "hello".to_owned())
			.await
			.unwrap();

		assert!(timeout(Duration::from_millis(50), bob_rx.recv())
			.await
			.is_err());
	}

	/// Two simultaneous Chat streams logged in under the same name are
	/// distinct endpoints: suppression is by endpoint id, not by the name
	/// carried in `ChatLine`, so each still sees the other's lines.
	#[tokio::test]
	async fn same_name_two_endpoints_both_receive() {
		let ActorSpawn { actor: room, .. } = ChatRoomState::start(ChatRoomState::default());

		let (first_tx, mut first_rx) = unbounded_channel();
		let ActorSpawn { actor: first, .. } =
			ChatEndpointState::start(ChatEndpointState { writer: first_tx });
		let (second_tx, mut second_rx) = unbounded_channel();
		let ActorSpawn { actor: second, .. } =
			ChatEndpointState::start(ChatEndpointState { writer: second_tx });

		room.join(10, first as std::sync::Arc<dyn ChatOutboundRole>)
			.await
			.unwrap();
		room.join(11, second as std::sync::Arc<dyn ChatOutboundRole>)
			.await
			.unwrap();

		room.broadcast(10, "Alice".to_owned(), "from first".to_owned())
			.await
			.unwrap();

		let received = second_rx.recv().await.unwrap();
		match received {
			chat_protocol::ServerMessage::Chat(line) => {
				assert_eq!(line.user, "Alice");
				assert_eq!(line.messages, "from first");
			}
			other => panic!("unexpected message: {other:?}"),
		}
		assert!(timeout(Duration::from_millis(50), first_rx.recv())
			.await
			.is_err());
	}
}
