//! Error types for payload marshalling

pub(crate) mod marshal_error;

pub use marshal_error::{CastError, MarshalError, MarshalResult};
