use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chat_protocol::LoginState;
use tokio::sync::RwLock;

use crate::mailbox::Mailbox;

/// A name is valid iff non-empty and every character's code point falls in
/// `65..=122` (`'A'..='z'`): uppercase letters, the six punctuation
/// characters between `Z` and `a` (`[ \ ] ^ _ \``), and lowercase letters.
/// Narrower than "alphabetic", but this is the rule required for
/// interoperability with the rest of the protocol.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
	!name.is_empty() && name.chars().all(|c| ('A'..='z').contains(&c))
}

/// One user's identity, online status, and mailbox.
///
/// Retained for the life of the process once created: logging out only
/// flips `online`, so a later `login` of the same name reuses the same
/// mailbox rather than starting fresh.
#[derive(Debug)]
pub struct UserRecord {
	pub name: String,
	online: AtomicBool,
	pub mailbox: Mailbox,
}

impl UserRecord {
	fn new(name: String) -> Self {
		UserRecord {
			name,
			online: AtomicBool::new(true),
			mailbox: Mailbox::new(),
		}
	}

	pub fn is_online(&self) -> bool {
		self.online.load(Ordering::Acquire)
	}
}

/// The directory's verdict on a `login` attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
	Invalid,
	Already,
	Success(Arc<UserRecord>),
}

impl LoginOutcome {
	#[must_use]
	pub fn wire_state(&self) -> LoginState {
		match self {
			LoginOutcome::Invalid => LoginState::Invalid,
			LoginOutcome::Already => LoginState::Already,
			LoginOutcome::Success(_) => LoginState::Success,
		}
	}
}

/// The set of known users, keyed by name.
///
/// Guarded by a single reader/writer lock: `lookup` and `snapshot_online`
/// only ever need a read lock, `login`'s possible insertion and `logout`'s
/// flip both take the write lock, which is what makes two concurrent logins
/// of the same fresh name resolve to exactly one `SUCCESS` and one `ALREADY`.
#[derive(Debug, Default)]
pub struct UserDirectory {
	users: RwLock<HashMap<String, Arc<UserRecord>>>,
}

impl UserDirectory {
	#[must_use]
	pub fn new() -> Self {
		UserDirectory::default()
	}

	/// Validates `name`, then either creates a fresh record, flips an
	/// existing offline record back online, or reports that the name is
	/// already claimed by a live session.
	pub async fn login(&self, name: &str) -> LoginOutcome {
		if !is_valid_name(name) {
			return LoginOutcome::Invalid;
		}

		// A read lock suffices for the common case of a returning user: the
		// atomic CAS on `online` is what keeps two racing logins for the
		// same existing name from both succeeding.
		if let Some(record) = self.users.read().await.get(name) {
			return match record.online.compare_exchange(
				false,
				true,
				Ordering::AcqRel,
				Ordering::Acquire,
			) {
				Ok(_) => LoginOutcome::Success(record.clone()),
				Err(_) => LoginOutcome::Already,
			};
		}

		// No record yet: take the write lock and re-check, since another
		// caller may have inserted (or even logged in and out of) this name
		// while we didn't hold any lock at all.
		let mut guard = self.users.write().await;
		if let Some(record) = guard.get(name) {
			return match record.online.compare_exchange(
				false,
				true,
				Ordering::AcqRel,
				Ordering::Acquire,
			) {
				Ok(_) => LoginOutcome::Success(record.clone()),
				Err(_) => LoginOutcome::Already,
			};
		}
		let record = Arc::new(UserRecord::new(name.to_owned()));
		guard.insert(name.to_owned(), record.clone());
		LoginOutcome::Success(record)
	}

	/// Flips `name`'s record offline. Not an error if the name is unknown or
	/// already offline; the mailbox is untouched either way.
	pub async fn logout(&self, name: &str) {
		if let Some(record) = self.users.read().await.get(name) {
			record.online.store(false, Ordering::Release);
		}
	}

	pub async fn lookup(&self, name: &str) -> Option<Arc<UserRecord>> {
		self.users.read().await.get(name).cloned()
	}

	/// Names of every record currently online, in unspecified order.
	pub async fn snapshot_online(&self) -> Vec<String> {
		self.users
			.read()
			.await
			.values()
			.filter(|record| record.is_online())
			.map(|record| record.name.clone())
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::*;

	#[test]
	fn boundary_names() {
		assert!(!is_valid_name(""));
		assert!(!is_valid_name("A B")); // space is code point 32
		assert!(!is_valid_name("A@B")); // '@' is code point 64
		assert!(!is_valid_name("A{B")); // '{' is code point 123
		assert!(is_valid_name("A"));
		assert!(is_valid_name("z"));
		assert!(is_valid_name("[Bracket]"));
	}

	#[tokio::test]
	async fn login_of_a_fresh_name_succeeds_and_flags_online() {
		let dir = UserDirectory::new();
		let outcome = dir.login("Alice").await;
		assert_eq!(outcome.wire_state(), LoginState::Success);
		assert!(dir.snapshot_online().await.contains(&"Alice".to_owned()));
	}

	#[tokio::test]
	async fn login_of_an_invalid_name_never_admits_it() {
		let dir = UserDirectory::new();
		assert_eq!(dir.login("A B").await.wire_state(), LoginState::Invalid);
		assert!(dir.lookup("A B").await.is_none());
	}

	#[tokio::test]
	async fn second_login_while_still_online_is_already() {
		let dir = UserDirectory::new();
		dir.login("Alice").await;
		assert_eq!(dir.login("Alice").await.wire_state(), LoginState::Already);
	}

	#[tokio::test]
	async fn logout_is_idempotent_and_preserves_the_mailbox() {
		let dir = UserDirectory::new();
		let LoginOutcome::Success(record) = dir.login("Alice").await else {
			panic!("expected success");
		};
		record.mailbox.append("queued".to_owned()).await;

		dir.logout("Alice").await;
		dir.logout("Alice").await; // idempotent
		assert!(!dir.snapshot_online().await.contains(&"Alice".to_owned()));

		let outcome = dir.login("Alice").await;
		let LoginOutcome::Success(record) = outcome else {
			panic!("expected success on re-login");
		};
		assert_eq!(
			record.mailbox.pop_one().await,
			(chat_protocol::QueueState::Empty, Some("queued".to_owned()))
		);
	}

	#[tokio::test]
	async fn concurrent_logins_of_the_same_fresh_name_yield_one_success() {
		let dir = Arc::new(UserDirectory::new());
		let (a, b) = tokio::join!(dir.clone().login_owned("Carol"), dir.clone().login_owned("Carol"));

		let successes = [&a, &b]
			.iter()
			.filter(|o| o.wire_state() == LoginState::Success)
			.count();
		let aleadys = [&a, &b]
			.iter()
			.filter(|o| o.wire_state() == LoginState::Already)
			.count();
		assert_eq!(successes, 1);
		assert_eq!(aleadys, 1);
	}
}

#[cfg(test)]
impl UserDirectory {
	/// Test helper so two concurrent logins can each own an `Arc` without a
	/// shared `&self` borrow getting in the way of `tokio::join!`.
	async fn login_owned(self: Arc<Self>, name: &str) -> LoginOutcome {
		self.login(name).await
	}
}
