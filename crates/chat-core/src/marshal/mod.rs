//! Payload marshalling - the safe field extractor and its caster set
//!
//! Builders read scalar fields through [`get`] and friends, passing one of
//! the named casters in [`casters`]. Absence (missing key or JSON `null`)
//! resolves to a default; a present value of the wrong shape is an error.

pub mod casters;
mod extract;
mod payload;

pub use extract::{get, get_object, get_or, get_or_default, require};
pub use payload::{into_payload, parse_payload, Payload};
