mod actor;
mod performance;
mod role;

pub(crate) use actor::ActorDecl;
pub(crate) use performance::PerformanceDecl;
pub(crate) use role::RoleDecl;
