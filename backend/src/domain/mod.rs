//! Domain model and the profile lookup service.
//!
//! Purpose: keep the contributions summary model and its failure semantics
//! independent of actix-web and reqwest. Adapters depend on this module,
//! never the other way round.
//!
//! Public surface:
//! - `ProfileSummary`, `Username`, `ContributionWindow`: value types.
//! - `ProfileLookup`: the uniform failure boundary used by page handlers.
//! - `Error`, `ErrorCode`: errors rendered by the HTTP adapter.
//! - `TraceId`: request correlation identifier.

pub mod error;
pub mod ports;
mod profile;
mod profile_lookup;
mod trace_id;

pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::profile::{
    ContributionWindow, ContributionWindowError, ProfileSummary, Username,
    UsernameValidationError,
};
pub use self::profile_lookup::{ProfileLookup, ProfileUnavailable, USER_NOT_FOUND_MESSAGE};
pub use self::trace_id::TraceId;
