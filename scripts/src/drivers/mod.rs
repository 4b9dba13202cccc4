//! Drivers sequencing chain operations with manifest updates.
//!
//! Every driver awaits on-chain acceptance before touching a manifest, so an
//! interrupted script leaves only fully confirmed steps recorded.

mod declare;
mod deploy;
mod invoke;

pub use declare::Declarer;
pub use deploy::Deployer;
pub use invoke::{Invoker, Querier};
