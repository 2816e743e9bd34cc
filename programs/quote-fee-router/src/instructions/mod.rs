pub mod distribute_fees;
pub mod initialize_policy;
pub mod initialize_position;
pub mod initialize_progress;

pub use distribute_fees::*;
pub use initialize_policy::*;
pub use initialize_position::*;
pub use initialize_progress::*;
