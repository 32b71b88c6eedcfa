//! Command implementations

mod prune;
mod validate;

pub use prune::prune;
pub use validate::validate;
