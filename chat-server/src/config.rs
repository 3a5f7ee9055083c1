//! Runtime configuration, read entirely from the environment.
//!
//! Matches the rest of this codebase's "no CLI parser" stance: a single
//! process-wide listen address, overridable by `CHAT_SERVER_ADDR`, with a
//! compiled-in default so the server runs out of the box.

use std::env;

const DEFAULT_ADDR: &str = "0.0.0.0:50051";
const ADDR_VAR: &str = "CHAT_SERVER_ADDR";

/// Returns the address to bind the listener to.
///
/// Reads `CHAT_SERVER_ADDR` if set, otherwise falls back to
/// [`DEFAULT_ADDR`]. Does not validate the value; an unparsable address
/// surfaces as a bind error at startup.
#[must_use]
pub fn listen_addr() -> String {
	env::var(ADDR_VAR).unwrap_or_else(|_| DEFAULT_ADDR.to_owned())
}

#[cfg(test)]
mod tests {
	use std::env;

	use super::*;

	#[test]
	fn falls_back_to_the_compiled_in_default() {
		unsafe {
			env::remove_var(ADDR_VAR);
		}
		assert_eq!(listen_addr(), DEFAULT_ADDR);
	}

	#[test]
	fn honors_the_environment_override() {
		unsafe {
			env::set_var(ADDR_VAR, "127.0.0.1:9999");
		}
		assert_eq!(listen_addr(), "127.0.0.1:9999");
		unsafe {
			env::remove_var(ADDR_VAR);
		}
	}
}
