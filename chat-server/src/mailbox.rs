use std::collections::VecDeque;

use chat_protocol::QueueState;
use tokio::sync::Mutex;

/// A per-user FIFO queue of pending private messages.
///
/// `append` and `pop_one` each take the internal lock for the duration of a
/// single queue operation only; nothing here holds the lock across an
/// `.await` belonging to a caller, so two mailboxes never contend with each
/// other and a slow reader of one mailbox cannot stall a writer to another.
#[derive(Debug, Default)]
pub struct Mailbox {
	messages: Mutex<VecDeque<String>>,
}

impl Mailbox {
	#[must_use]
	pub fn new() -> Self {
		Mailbox::default()
	}

	/// Adds `msg` to the tail of the queue. Never fails; the queue is unbounded.
	pub async fn append(&self, msg: String) {
		self.messages.lock().await.push_back(msg);
	}

	/// Removes and returns the oldest message, if any.
	///
	/// The returned [`QueueState`] reflects the queue *after* the pop: callers
	/// (namely `ReceiveMessage`) use it to decide whether to keep draining
	/// without taking a second, separate peek at the queue.
	pub async fn pop_one(&self) -> (QueueState, Option<String>) {
		let mut guard = self.messages.lock().await;
		let Some(msg) = guard.pop_front() else {
			return (QueueState::Empty, None);
		};
		let state = if guard.is_empty() {
			QueueState::Empty
		} else {
			QueueState::NonEmpty
		};
		(state, Some(msg))
	}

	/// Concatenates every pending message in FIFO order and empties the queue.
	///
	/// Equivalent to repeated `pop_one`, provided as a convenience for callers
	/// that want the whole backlog in one string rather than a reply per
	/// message; `ReceiveMessage` itself uses `pop_one`.
	pub async fn drain_all(&self) -> String {
		let mut guard = self.messages.lock().await;
		guard.drain(..).collect::<Vec<_>>().concat()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn pop_one_on_empty_queue_reports_empty() {
		let mailbox = Mailbox::new();
		assert_eq!(mailbox.pop_one().await, (QueueState::Empty, None));
	}

	#[tokio::test]
	async fn pop_one_drains_in_fifo_order() {
		let mailbox = Mailbox::new();
		mailbox.append("first".to_owned()).await;
		mailbox.append("second".to_owned()).await;

		assert_eq!(
			mailbox.pop_one().await,
			(QueueState::NonEmpty, Some("first".to_owned()))
		);
		assert_eq!(
			mailbox.pop_one().await,
			(QueueState::Empty, Some("second".to_owned()))
		);
		assert_eq!(mailbox.pop_one().await, (QueueState::Empty, None));
	}

	#[tokio::test]
	async fn drain_all_concatenates_and_empties() {
		let mailbox = Mailbox::new();
		mailbox.append("a".to_owned()).await;
		mailbox.append("b".to_owned()).await;

		assert_eq!(mailbox.drain_all().await, "ab");
		assert_eq!(mailbox.pop_one().await, (QueueState::Empty, None));
	}

	#[tokio::test]
	async fn a_drained_message_is_removed_exactly_once() {
		let mailbox = Mailbox::new();
		mailbox.append("only".to_owned()).await;

		let (_, first) = mailbox.pop_one().await;
		let (state, second) = mailbox.pop_one().await;

		assert_eq!(first, Some("only".to_owned()));
		assert_eq!(second, None);
		assert_eq!(state, QueueState::Empty);
	}
}
