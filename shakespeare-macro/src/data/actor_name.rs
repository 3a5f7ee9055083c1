use quote::ToTokens;
use syn::Path;

pub(crate) struct ActorName(Path);

impl ActorName {
	pub(crate) fn new(p: Path) -> ActorName {
		ActorName(p)
	}
}

impl ToTokens for ActorName {
	fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
		self.0.to_tokens(tokens);
	}
}
