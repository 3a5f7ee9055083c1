mod actor;
mod performance;
mod role;

pub(crate) use actor::ActorOutput;
pub(crate) use performance::PerfDispatch;
pub(crate) use role::RoleOutput;
