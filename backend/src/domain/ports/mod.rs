//! Domain ports for the hexagonal boundary.
//!
//! The domain owns these contracts; outbound adapters implement them and
//! inbound adapters only ever see the trait objects.

mod profile_source;

#[cfg(test)]
pub use profile_source::MockProfileSource;
pub use profile_source::{ProfileSource, ProfileSourceError};
