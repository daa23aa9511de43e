//! TTE core
//!
//! Everything an activity agent needs between "the host handed us a location"
//! and "the daemon acknowledged it": identity normalization, the `TTE:` wire
//! message and the classification of the daemon's reply.

mod error;
pub mod identity;
pub mod message;
pub mod outcome;
mod source;
pub mod wire;

pub use error::{ReportError, ReportResult};
pub use identity::{CanonicalIdentity, HostnameNormalizer, Normalizer, Verbatim};
pub use message::Message;
pub use outcome::{interpret, DeliveryResult, TransportFailure};
pub use source::{Source, UnknownSource};
