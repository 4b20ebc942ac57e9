//! Purpose: Typed query model produced by the deserializer.
//! Exports: `Query`, `QueryEnvelope`, `Signature`, `QueryPayload`, `QueryType`.
//! Role: Output contract consumed by downstream query processing.
//! Invariants: A `Query` always carries a complete envelope and exactly one payload variant.
//! Invariants: The serde rendering is stable; fields are additive-only.

use serde::Serialize;
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Signature {
    pub pubkey: String,
    pub signature: String,
}

/// Metadata shared by every query kind.
///
/// `created_ts` and `query_hash` are required on input but are not part of
/// the envelope.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct QueryEnvelope {
    pub signature: Signature,
    pub creator_account_id: String,
    pub query_counter: u64,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryPayload {
    GetAccount { account_id: String },
    GetAccountAssets { account_id: String, asset_id: String },
    GetAccountAssetTransactions { account_id: String, asset_id: String },
    GetAccountTransactions { account_id: String },
    GetAccountSignatories { account_id: String },
}

impl QueryPayload {
    pub fn query_type(&self) -> QueryType {
        match self {
            QueryPayload::GetAccount { .. } => QueryType::GetAccount,
            QueryPayload::GetAccountAssets { .. } => QueryType::GetAccountAssets,
            QueryPayload::GetAccountAssetTransactions { .. } => {
                QueryType::GetAccountAssetTransactions
            }
            QueryPayload::GetAccountTransactions { .. } => QueryType::GetAccountTransactions,
            QueryPayload::GetAccountSignatories { .. } => QueryType::GetAccountSignatories,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Query {
    pub envelope: QueryEnvelope,
    pub payload: QueryPayload,
}

impl Query {
    pub fn query_type(&self) -> QueryType {
        self.payload.query_type()
    }
}

/// Closed set of query kinds accepted in the `query_type` member.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum QueryType {
    GetAccount,
    GetAccountAssets,
    GetAccountAssetTransactions,
    GetAccountTransactions,
    GetAccountSignatories,
}

impl QueryType {
    pub const ALL: [QueryType; 5] = [
        QueryType::GetAccount,
        QueryType::GetAccountAssets,
        QueryType::GetAccountAssetTransactions,
        QueryType::GetAccountTransactions,
        QueryType::GetAccountSignatories,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QueryType::GetAccount => "get_account",
            QueryType::GetAccountAssets => "get_account_assets",
            QueryType::GetAccountAssetTransactions => "get_account_asset_transactions",
            QueryType::GetAccountTransactions => "get_account_transactions",
            QueryType::GetAccountSignatories => "get_account_signatories",
        }
    }

    /// Payload members that must be present for this kind.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            QueryType::GetAccount
            | QueryType::GetAccountTransactions
            | QueryType::GetAccountSignatories => &["account_id"],
            QueryType::GetAccountAssets | QueryType::GetAccountAssetTransactions => {
                &["account_id", "asset_id"]
            }
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
