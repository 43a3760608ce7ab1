//! Gateway facade over the externally owned auth and storage backend.
//!
//! The core library never issues network calls; it consumes profile and
//! donation data as already-resolved values. This crate defines the
//! shape of the collaborators that produce those values (auth/session,
//! profile store, donation store) plus an explicit session context: a
//! passed-in object carrying a defined refresh contract, in place of
//! ambient shared auth state.

pub mod memory;
pub mod session;
pub mod stores;

pub use memory::*;
pub use session::*;
pub use stores::*;
