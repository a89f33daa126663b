//! Canonical content: concept types, the remote-backed catalog and the
//! user-authored list.

pub mod authored;
pub mod store;
pub mod types;
