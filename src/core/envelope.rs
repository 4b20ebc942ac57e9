//! Purpose: Validate the envelope members every query document carries.
//! Exports: `ENVELOPE_FIELDS`, `SIGNATURE_FIELDS`, `validate_envelope`.
//! Invariants: All six envelope members are checked for presence before any value is read.
//! Invariants: `created_ts` and `query_hash` are required but never copied.

use crate::core::document::{DocumentView, read_object, read_string, read_u64, require_fields};
use crate::core::error::Error;
use crate::core::query::{QueryEnvelope, Signature};

pub const ENVELOPE_FIELDS: [&str; 6] = [
    "signature",
    "creator_account_id",
    "created_ts",
    "query_hash",
    "query_counter",
    "query_type",
];

pub const SIGNATURE_FIELDS: [&str; 2] = ["pubkey", "signature"];

pub fn validate_envelope(doc: &dyn DocumentView) -> Result<QueryEnvelope, Error> {
    require_fields(doc, &ENVELOPE_FIELDS)?;

    let signature = read_object(doc, "signature")?;
    require_fields(signature, &SIGNATURE_FIELDS).map_err(|err| {
        let field = err.field().unwrap_or_default();
        Error::missing_field(&format!("signature.{field}"))
    })?;

    Ok(QueryEnvelope {
        signature: Signature {
            pubkey: read_string(signature, "pubkey")?.to_string(),
            signature: read_string(signature, "signature")?.to_string(),
        },
        creator_account_id: read_string(doc, "creator_account_id")?.to_string(),
        query_counter: read_u64(doc, "query_counter")?,
    })
}
