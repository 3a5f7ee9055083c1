use quote::ToTokens;
use syn::Path;

use super::ActorName;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DataName(Path);

impl DataName {
	pub(crate) fn new(p: Path) -> Self {
		debug_assert!(!p.segments.is_empty());
		Self(p)
	}

	/// A standalone `#[performance]` block (outside an `#[actor]` module) is
	/// implemented directly on the actor's own struct, so its data type and
	/// actor type are one and the same.
	pub(crate) fn actor_path(&self) -> ActorName {
		ActorName::new(self.0.clone())
	}
}

impl ToTokens for DataName {
	fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
		self.0.to_tokens(tokens);
	}
}
