//! Ordered associative containers.
//!
//! ## Contents
//!
//! - [`ds`]: the red-black tree engine ([`ds::rb_tree`]).
//! - [`ops`]: key extraction and comparison strategies
//!   ([`ops::key_compare`]).
//! - [`naive`]: slow reference containers used to check the fast ones.

pub use ds;
pub use naive;
pub use ops;
