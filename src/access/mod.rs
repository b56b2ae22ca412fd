//! Role-based access control for mutating precompile calls.

mod allow_list;
mod gate;

pub use allow_list::{AllowList, Role};
pub use gate::{AccessError, ensure_can_mutate};
