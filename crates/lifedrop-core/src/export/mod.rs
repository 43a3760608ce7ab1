//! Export functionality for donor summaries.

mod summary;

pub use summary::*;
