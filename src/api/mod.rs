//! Purpose: Define the stable public Rust API boundary for queryjson.
//! Exports: The deserializer, the query model, and error types.
//! Role: Public, additive-only surface used by the CLI, the C ABI, and Rust callers.
//! Invariants: `deserialize` collapses every failure into `None`.
//! Invariants: `try_deserialize` reports the first failure only, for diagnostics.

mod deserializer;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::dispatch::{DispatchTable, Extractor};
pub use crate::core::document::{DocumentView, RawDocument};
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::query::{Query, QueryEnvelope, QueryPayload, QueryType, Signature};
pub use deserializer::{QueryDeserializer, deserialize, try_deserialize};
