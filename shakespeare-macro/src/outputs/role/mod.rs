mod payload_enum;

use payload_enum::PayloadEnum;
use quote::ToTokens;
use syn::fold::Fold;
use syn::{ItemImpl, ItemTrait, Result};

use crate::data::RoleName;
use crate::declarations::RoleDecl;
use crate::interfacerewriter::InterfaceRewriter;
use crate::macros::fallible_quote;

#[derive(Debug)]
pub(crate) struct RoleOutput {
	payload_enum:     PayloadEnum,
	trait_definition: ItemTrait,
	role_impl:        ItemImpl,
}

impl RoleOutput {
	pub(crate) fn new(role: RoleDecl) -> Result<RoleOutput> {
		let RoleDecl {
			name: role_name,
			signatures,
			vis,
		} = role;
		let role_name = RoleName::new(role_name);
		let payload_type = role_name.payload_path();

		let payload_enum = PayloadEnum::new(&payload_type, &signatures)?;

		let mut rewriter = InterfaceRewriter::new(&role_name);
		let signatures = signatures.into_iter().map(|s| rewriter.fold_signature(s));

		let trait_definition = fallible_quote! {
			#[::shakespeare::async_trait_export::async_trait]
			#vis trait #role_name: 'static + Send + Sync {
				#(#signatures;)*
				fn clone_sender(&self) -> ::shakespeare::Role2Sender<dyn #role_name>;
			}
		}?;

		let role_impl = fallible_quote! {
			impl<'a> ::shakespeare::Role for dyn #role_name+'a {
				type Payload = #payload_type;
				type Channel = ::shakespeare::TokioUnbounded<#payload_type>;
				fn clone_sender(&self) -> ::shakespeare::Role2Sender<Self> {
					<Self as #role_name>::clone_sender(self)
				}
			}
		}?;

		Ok(RoleOutput {
			payload_enum,
			trait_definition,
			role_impl,
		})
	}
}

impl ToTokens for RoleOutput {
	fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
		self.payload_enum.to_tokens(tokens);
		self.trait_definition.to_tokens(tokens);
		self.role_impl.to_tokens(tokens);
	}
}
