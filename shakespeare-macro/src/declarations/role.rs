use itertools::Itertools;
use syn::{Path, Signature, Visibility};

use crate::data::SignatureExt;

pub(crate) struct RoleDecl {
	pub(crate) name:       Path,
	pub(crate) vis:        Visibility,
	pub(crate) signatures: Vec<Signature>,
}

impl RoleDecl {
	pub(crate) fn new(
		name: Path,
		vis: Visibility,
		signatures: impl Iterator<Item = Signature>,
	) -> RoleDecl {
		let mut signatures = signatures.collect_vec();

		signatures.iter_mut().for_each(Signature::remove_context_param);

		RoleDecl { name, vis, signatures }
	}
}
