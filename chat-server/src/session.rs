//! The per-connection dispatcher.
//!
//! One [`tokio::spawn`]ed task per accepted TCP connection runs
//! [`handle_connection`] end to end: a login loop, then a straight-line
//! read loop that dispatches each subsequent frame to the handler for its
//! `kind`. There is no tag-dispatched `CREATE`/`PROCESS`/`FINISH` state
//! machine here — the `async` function's own control flow *is* the state
//! machine, and the runtime suspends and resumes it at every `.await`.
//!
//! The six gRPC calls of the original protocol are reground onto one
//! multiplexed, tagged-JSON connection (see `chat-protocol`): `SendMessage`'s
//! two phases and `ReceiveMessage`'s drain loop are just ordinary frames on
//! that connection rather than separate streams, and `Chat` membership is
//! tied to the life of the connection itself rather than a distinct
//! sub-stream, since nothing in the wire format currently distinguishes
//! "enter chat" from "logged in".

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chat_protocol::{
	ClientMessage, MessageCodec, QueueState, RecipientState, SendRequestState, ServerMessage,
};
use futures::{SinkExt, StreamExt};
use shakespeare::ActorSpawn;
use tokio::net::TcpStream;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{info, warn};

use crate::chatroom::{ChatEndpointState, ChatOutboundRole, ChatRoom, ChatRoomRole, EndpointId};
use crate::directory::{LoginOutcome, UserDirectory};
use crate::error::SessionError;

/// Hands out a fresh [`EndpointId`] to each connection that joins the chat
/// room, so two connections logged in under the same name are still
/// distinguishable members (see `chatroom`'s doc comment).
fn next_endpoint_id() -> EndpointId {
	static NEXT: AtomicU64 = AtomicU64::new(1);
	NEXT.fetch_add(1, Ordering::Relaxed)
}

/// State every connection's task needs a handle on.
#[derive(Debug)]
pub struct SharedState {
	pub directory: Arc<UserDirectory>,
	pub chat_room: Arc<ChatRoom>,
}

/// Runs one connection end to end, logging (not propagating) its outcome.
///
/// A single session's failure — a dropped socket, a malformed frame — never
/// escapes this function: it is logged at `warn` and the task simply ends,
/// leaving every other connection untouched.
pub async fn handle_connection(socket: TcpStream, peer: SocketAddr, state: Arc<SharedState>) {
	match run_session(socket, &state).await {
		Ok(()) => info!(%peer, "session ended"),
		Err(err) => warn!(%peer, error = %err, "session ended with error"),
	}
}

async fn run_session(socket: TcpStream, state: &Arc<SharedState>) -> Result<(), SessionError> {
	let (read_half, write_half) = socket.into_split();
	let mut reader = FramedRead::new(read_half, MessageCodec::<ClientMessage>::new());
	let mut raw_writer = FramedWrite::new(write_half, MessageCodec::<ServerMessage>::new());

	let (out_tx, mut out_rx) = mpsc::unbounded_channel::<ServerMessage>();

	let writer_task = tokio::spawn(async move {
		while let Some(msg) = out_rx.recv().await {
			if raw_writer.send(msg).await.is_err() {
				break;
			}
		}
	});

	let login_result = login_loop(&mut reader, &out_tx, state).await;
	let Some(name) = login_result else {
		drop(out_tx);
		let _ = writer_task.await;
		return Err(SessionError::LoginIncomplete);
	};

	let endpoint_id = next_endpoint_id();
	let ActorSpawn {
		actor: endpoint, ..
	} = ChatEndpointState::start(ChatEndpointState {
		writer: out_tx.clone(),
	});
	let _ = state
		.chat_room
		.join(endpoint_id, endpoint as Arc<dyn ChatOutboundRole>)
		.await;
	info!(user = %name, "chat endpoint joined");

	let result = dispatch_loop(&mut reader, &out_tx, state, &name, endpoint_id).await;

	let _ = state.chat_room.leave(endpoint_id).await;
	drop(out_tx);
	let _ = writer_task.await;
	result
}

/// Consumes `LogIn` frames until one succeeds or the peer disconnects.
///
/// `INVALID`/`ALREADY` replies leave the loop running for another attempt;
/// anything other than a `LogIn` frame is ignored rather than treated as
/// fatal, matching the "no server crash on misuse" rule.
async fn login_loop(
	reader: &mut FramedRead<tokio::net::tcp::OwnedReadHalf, MessageCodec<ClientMessage>>,
	out_tx: &UnboundedSender<ServerMessage>,
	state: &Arc<SharedState>,
) -> Option<String> {
	loop {
		let msg = match reader.next().await {
			Some(Ok(msg)) => msg,
			Some(Err(err)) => {
				warn!(error = %err, "codec error before login completed");
				return None;
			}
			None => return None,
		};

		let ClientMessage::LogIn { user } = msg else {
			continue;
		};

		let outcome = state.directory.login(&user).await;
		let loginstate = outcome.wire_state();
		let _ = out_tx.send(ServerMessage::LogInReply { loginstate });

		if let LoginOutcome::Success(record) = outcome {
			return Some(record.name.clone());
		}
	}
}

/// The post-login loop: reads one frame, dispatches it, repeats.
async fn dispatch_loop(
	reader: &mut FramedRead<tokio::net::tcp::OwnedReadHalf, MessageCodec<ClientMessage>>,
	out_tx: &UnboundedSender<ServerMessage>,
	state: &Arc<SharedState>,
	name: &str,
	endpoint_id: EndpointId,
) -> Result<(), SessionError> {
	loop {
		let msg = match reader.next().await {
			Some(Ok(msg)) => msg,
			Some(Err(err)) => return Err(err.into()),
			None => return Ok(()),
		};

		match msg {
			ClientMessage::LogIn { user } => {
				// A stray LogIn after the session is already bound: answer
				// truthfully (the repeat attempt resolves to `Already`)
				// rather than treating it as a protocol violation.
				let outcome = state.directory.login(&user).await;
				let _ = out_tx.send(ServerMessage::LogInReply {
					loginstate: outcome.wire_state(),
				});
			}
			ClientMessage::LogOut { user } => {
				state.directory.logout(&user).await;
				let _ = out_tx.send(ServerMessage::LogOutReply {
					confirmation: format!("{user} logged out"),
				});
			}
			ClientMessage::List => {
				let names = state.directory.snapshot_online().await;
				let _ = out_tx.send(ServerMessage::ListReply {
					list: format_online_list(&names),
				});
			}
			ClientMessage::ReceiveMessage { user } => {
				handle_receive_message(&user, out_tx, state).await;
			}
			ClientMessage::SendMessage {
				requeststate,
				user,
				recipient,
				messages,
			} => {
				handle_send_message(requeststate, &user, &recipient, &messages, out_tx, state)
					.await;
			}
			ClientMessage::Chat(line) => {
				let _ = state
					.chat_room
					.broadcast(endpoint_id, name.to_owned(), line.messages)
					.await;
			}
		}
	}
}

/// Formats the `List` reply: `"[name1] [name2] ...\n"`, or just `"\n"` when
/// nobody is online.
fn format_online_list(names: &[String]) -> String {
	let mut out = String::new();
	for (i, name) in names.iter().enumerate() {
		if i > 0 {
			out.push(' ');
		}
		out.push('[');
		out.push_str(name);
		out.push(']');
	}
	out.push('\n');
	out
}

/// Drains `user`'s mailbox one message at a time, stopping as soon as the
/// queue reports empty — whether that's on the first probe or after several
/// messages.
async fn handle_receive_message(
	user: &str,
	out_tx: &UnboundedSender<ServerMessage>,
	state: &Arc<SharedState>,
) {
	let Some(record) = state.directory.lookup(user).await else {
		let _ = out_tx.send(ServerMessage::ReceiveMessageReply {
			queuestate: QueueState::Empty,
			messages:   String::new(),
		});
		return;
	};

	loop {
		let (queuestate, msg) = record.mailbox.pop_one().await;
		let Some(text) = msg else {
			let _ = out_tx.send(ServerMessage::ReceiveMessageReply {
				queuestate: QueueState::Empty,
				messages:   String::new(),
			});
			return;
		};
		let _ = out_tx.send(ServerMessage::ReceiveMessageReply {
			queuestate,
			messages: text,
		});
		if queuestate == QueueState::Empty {
			return;
		}
	}
}

/// Implements `SendMessage`'s two phases: the `INITIAL` existence probe and
/// each `PROCESSING` append.
async fn handle_send_message(
	requeststate: SendRequestState,
	user: &str,
	recipient: &str,
	messages: &str,
	out_tx: &UnboundedSender<ServerMessage>,
	state: &Arc<SharedState>,
) {
	match requeststate {
		SendRequestState::Initial => {
			let exists = state.directory.lookup(recipient).await.is_some();
			let (recipientstate, confirmation) = if exists {
				(RecipientState::Exist, String::new())
			} else {
				(
					RecipientState::NoExist,
					format!("No such user: {recipient}"),
				)
			};
			let _ = out_tx.send(ServerMessage::SendMessageReply {
				recipientstate,
				confirmation,
			});
		}
		SendRequestState::Processing => match state.directory.lookup(recipient).await {
			Some(record) => {
				record
					.mailbox
					.append(format!("Message from {user}: {messages}"))
					.await;
				let _ = out_tx.send(ServerMessage::SendMessageReply {
					recipientstate: RecipientState::Exist,
					confirmation:   format!("Message delivered to {recipient}"),
				});
			}
			None => {
				let _ = out_tx.send(ServerMessage::SendMessageReply {
					recipientstate: RecipientState::NoExist,
					confirmation:   format!("No such user: {recipient}"),
				});
			}
		},
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use chat_protocol::{QueueState, RecipientState, SendRequestState, ServerMessage};
	use shakespeare::ActorSpawn;
	use tokio::sync::mpsc;

	use super::{format_online_list, handle_receive_message, handle_send_message, SharedState};
	use crate::chatroom::ChatRoomState;
	use crate::directory::UserDirectory;

	#[test]
	fn empty_list_is_just_a_newline() {
		assert_eq!(format_online_list(&[]), "\n");
	}

	#[test]
	fn one_name_is_bracketed_with_a_trailing_newline() {
		assert_eq!(format_online_list(&["Alice".to_owned()]), "[Alice]\n");
	}

	#[test]
	fn multiple_names_are_space_separated() {
		assert_eq!(
			format_online_list(&["Alice".to_owned(), "Bob".to_owned()]),
			"[Alice] [Bob]\n"
		);
	}

	fn new_state() -> Arc<SharedState> {
		let ActorSpawn {
			actor: chat_room, ..
		} = ChatRoomState::start(ChatRoomState::default());
		Arc::new(SharedState {
			directory: Arc::new(UserDirectory::new()),
			chat_room,
		})
	}

	/// Scenario: Alice logs in and out, Bob sends her a message while she's
	/// offline, Alice logs back in and receives it on her first
	/// `ReceiveMessage`, then sees `EMPTY` on the next one.
	#[tokio::test]
	async fn offline_mailbox_is_delivered_on_next_receive() {
		let state = new_state();
		state.directory.login("Alice").await;
		state.directory.logout("Alice").await;
		state.directory.login("Bob").await;

		let (tx, mut rx) = mpsc::unbounded_channel();
		handle_send_message(
			SendRequestState::Initial,
			"Bob",
			"Alice",
			"",
			&tx,
			&state,
		)
		.await;
		assert_eq!(
			rx.recv().await.unwrap(),
			ServerMessage::SendMessageReply {
				recipientstate: RecipientState::Exist,
				confirmation:   String::new(),
			}
		);

		handle_send_message(
			SendRequestState::Processing,
			"Bob",
			"Alice",
			"hi",
			&tx,
			&state,
		)
		.await;
		assert_eq!(
			rx.recv().await.unwrap(),
			ServerMessage::SendMessageReply {
				recipientstate: RecipientState::Exist,
				confirmation:   "Message delivered to Alice".to_owned(),
			}
		);

		state.directory.login("Alice").await;

		handle_receive_message("Alice", &tx, &state).await;
		assert_eq!(
			rx.recv().await.unwrap(),
			ServerMessage::ReceiveMessageReply {
				queuestate: QueueState::Empty,
				messages:   "Message from Bob: hi".to_owned(),
			}
		);

		handle_receive_message("Alice", &tx, &state).await;
		assert_eq!(
			rx.recv().await.unwrap(),
			ServerMessage::ReceiveMessageReply {
				queuestate: QueueState::Empty,
				messages:   String::new(),
			}
		);
	}

	/// Scenario: `SendMessage` to a name nobody has ever logged in under
	/// reports `NO_EXIST` on the initial probe.
	#[tokio::test]
	async fn send_to_unknown_recipient_reports_no_exist() {
		let state = new_state();
		let (tx, mut rx) = mpsc::unbounded_channel();

		handle_send_message(SendRequestState::Initial, "Bob", "Zed", "", &tx, &state).await;

		let ServerMessage::SendMessageReply {
			recipientstate,
			confirmation,
		} = rx.recv().await.unwrap()
		else {
			panic!("expected a SendMessageReply");
		};
		assert_eq!(recipientstate, RecipientState::NoExist);
		assert!(!confirmation.is_empty());
	}

	#[tokio::test]
	async fn receive_on_a_name_that_never_logged_in_reports_empty() {
		let state = new_state();
		let (tx, mut rx) = mpsc::unbounded_channel();

		handle_receive_message("Ghost", &tx, &state).await;

		assert_eq!(
			rx.recv().await.unwrap(),
			ServerMessage::ReceiveMessageReply {
				queuestate: QueueState::Empty,
				messages:   String::new(),
			}
		);
	}
}
