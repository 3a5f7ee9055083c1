#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(clippy::pedantic)]

//! Wire message shapes for the chat service and the framing that carries them.
//!
//! The protocol the service implements was originally specified as six
//! separate gRPC calls (`LogIn`, `LogOut`, `List`, `SendMessage`,
//! `ReceiveMessage`, `Chat`). This crate reflects that onto a single framed
//! TCP connection per session: every request and reply is a JSON object
//! tagged with a `kind` field, carried one-per-line by [`codec::MessageCodec`].

mod codec;

pub use codec::{CodecError, MessageCodec};
use serde::{Deserialize, Serialize};

/// Outcome of a `LogIn` attempt.
///
/// `SERVER_OFF` has no server-side representation: it is the value a client
/// should assume when a `LogIn` round-trip produced no reply at all (the
/// connection never reached the server). The server never constructs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginState {
	Invalid,
	Already,
	Success,
}

/// Whether a mailbox had content at the moment of a `pop_one`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueState {
	Empty,
	NonEmpty,
}

/// Whether `SendMessage`'s named recipient has ever logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipientState {
	NoExist,
	Exist,
}

/// The two phases a `SendMessage` call moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SendRequestState {
	Initial,
	Processing,
}

/// One line of chat, as seen by the server: `user` is the sender's
/// authenticated session name, never a client-supplied claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatLine {
	pub user: String,
	pub messages: String,
}

/// Every request shape a client may send, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClientMessage {
	LogIn {
		user: String,
	},
	LogOut {
		user: String,
	},
	List,
	ReceiveMessage {
		user: String,
	},
	SendMessage {
		requeststate: SendRequestState,
		user: String,
		recipient: String,
		messages: String,
	},
	Chat(ChatLine),
}

/// Every reply shape the server may send, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServerMessage {
	LogInReply {
		loginstate: LoginState,
	},
	LogOutReply {
		confirmation: String,
	},
	ListReply {
		list: String,
	},
	ReceiveMessageReply {
		queuestate: QueueState,
		messages: String,
	},
	SendMessageReply {
		recipientstate: RecipientState,
		confirmation: String,
	},
	Chat(ChatLine),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn login_request_round_trips_through_json() {
		let msg = ClientMessage::LogIn {
			user: "Alice".to_owned(),
		};
		let encoded = serde_json::to_string(&msg).unwrap();
		assert_eq!(encoded, r#"{"kind":"log_in","user":"Alice"}"#);
		let decoded: ClientMessage = serde_json::from_str(&encoded).unwrap();
		assert_eq!(decoded, msg);
	}

	#[test]
	fn send_message_carries_its_phase() {
		let msg = ClientMessage::SendMessage {
			requeststate: SendRequestState::Processing,
			user: "Bob".to_owned(),
			recipient: "Alice".to_owned(),
			messages: "hi".to_owned(),
		};
		let encoded = serde_json::to_string(&msg).unwrap();
		let decoded: ClientMessage = serde_json::from_str(&encoded).unwrap();
		assert_eq!(decoded, msg);
	}

	#[test]
	fn list_request_has_no_body() {
		let encoded = serde_json::to_string(&ClientMessage::List).unwrap();
		assert_eq!(encoded, r#"{"kind":"list"}"#);
	}

	#[test]
	fn chat_reply_round_trips() {
		let msg = ServerMessage::Chat(ChatLine {
			user: "Alice".to_owned(),
			messages: "hello".to_owned(),
		});
		let encoded = serde_json::to_string(&msg).unwrap();
		let decoded: ServerMessage = serde_json::from_str(&encoded).unwrap();
		assert_eq!(decoded, msg);
	}
}
