//! Pure domain model for daymark: the collected commit record, the working
//! time window, and the effort-weighted allocation that partitions the
//! window into per-commit timestamps. No I/O lives here.

pub mod allocate;
pub mod commit;
pub mod error;
pub mod window;

pub use allocate::allocate;
pub use commit::Commit;
pub use error::Error;
pub use window::{Clock, TimeWindow};
