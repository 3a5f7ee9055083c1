use convert_case::{Case, Casing};
use quote::ToTokens;
use syn::{FnArg, Ident, ItemEnum, Path, Result, Signature, Type, Variant};

use crate::macros::{fallible_quote, map_or_bail};

#[derive(Debug)]
pub(crate) struct PayloadEnum {
	definition: ItemEnum,
}

impl PayloadEnum {
	pub(crate) fn new(payload_type: &Path, methods: &[Signature]) -> Result<PayloadEnum> {
		let variants = map_or_bail!(methods, Self::create_variant);

		let definition = fallible_quote! {
			#[allow(unused_parens)]
			pub enum #payload_type { #(#variants),* }
		}?;

		Ok(PayloadEnum { definition })
	}

	fn create_variant(sig: &Signature) -> Result<Variant> {
		let types = Self::extract_input_type_vector(sig);

		let variant_name = variant_name_from_sig(sig);

		fallible_quote! { #variant_name ((#(#types),*)) }
	}

	fn extract_input_type_vector(sig: &Signature) -> Vec<&Type> {
		sig.inputs
			.iter()
			.filter_map(|arg| match arg {
				FnArg::Typed(p) => Some(&*p.ty),
				FnArg::Receiver(_) => None,
			})
			.collect()
	}
}

impl ToTokens for PayloadEnum {
	fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
		self.definition.to_tokens(tokens);
	}
}

fn variant_name_from_sig(sig: &Signature) -> Ident {
	quote::format_ident!("{}", sig.ident.to_string().to_case(Case::UpperCamel))
}
