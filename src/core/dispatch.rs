//! Purpose: Map `query_type` identifiers to payload extractors.
//! Exports: `Extractor`, `DispatchTable`.
//! Role: Keeps the set of supported query kinds as data rather than control flow.
//! Invariants: The table is populated in `new` and never mutated afterwards.
//! Invariants: `global` is initialized once per process and shared read-only.

use crate::core::document::DocumentView;
use crate::core::error::Error;
use crate::core::extract;
use crate::core::query::{QueryPayload, QueryType};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

pub type Extractor = fn(&dyn DocumentView) -> Result<QueryPayload, Error>;

pub struct DispatchTable {
    entries: HashMap<&'static str, Extractor>,
}

impl DispatchTable {
    pub fn new() -> Self {
        let entries = [
            (QueryType::GetAccount, extract::get_account as Extractor),
            (
                QueryType::GetAccountAssets,
                extract::get_account_assets as Extractor,
            ),
            (
                QueryType::GetAccountAssetTransactions,
                extract::get_account_asset_transactions as Extractor,
            ),
            (
                QueryType::GetAccountTransactions,
                extract::get_account_transactions as Extractor,
            ),
            (
                QueryType::GetAccountSignatories,
                extract::get_account_signatories as Extractor,
            ),
        ];
        Self {
            entries: entries
                .into_iter()
                .map(|(query_type, extractor)| (query_type.as_str(), extractor))
                .collect(),
        }
    }

    pub fn global() -> &'static DispatchTable {
        static TABLE: OnceLock<DispatchTable> = OnceLock::new();
        TABLE.get_or_init(DispatchTable::new)
    }

    pub fn lookup(&self, query_type: &str) -> Option<Extractor> {
        self.entries.get(query_type).copied()
    }

    /// Known identifiers in sorted order.
    pub fn query_types(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTable")
            .field("query_types", &self.query_types())
            .finish()
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}
