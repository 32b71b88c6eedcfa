//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between core business logic
//! and external systems (the repository host API, console reporting).
//!
//! Implementations live in the `adapters` and `output` modules.
//!
//! ## Design Principle
//!
//! The core domain logic depends only on these traits, never on concrete
//! implementations. This enables:
//!
//! - **Testability**: Mock implementations for unit tests
//! - **Flexibility**: Swap implementations without changing business logic
//! - **Clarity**: Clear boundaries between layers

mod host;
mod report_sink;

pub use host::{Comparison, RepositoryHost};
pub use report_sink::{NullSink, ReportSink};
