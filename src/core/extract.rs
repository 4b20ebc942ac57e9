//! Purpose: Per-kind payload extractors selected through the dispatch table.
//! Exports: one extractor function per `QueryType`.
//! Role: Check the kind's required members, then build its payload variant.
//! Invariants: Presence of every required member is checked before any value is read.
//! Invariants: An extractor either returns a complete payload or an error, never a partial one.

use crate::core::document::{DocumentView, read_string, require_fields};
use crate::core::error::Error;
use crate::core::query::{QueryPayload, QueryType};

pub fn get_account(doc: &dyn DocumentView) -> Result<QueryPayload, Error> {
    require_fields(doc, QueryType::GetAccount.required_fields())?;
    Ok(QueryPayload::GetAccount {
        account_id: read_string(doc, "account_id")?.to_string(),
    })
}

pub fn get_account_assets(doc: &dyn DocumentView) -> Result<QueryPayload, Error> {
    require_fields(doc, QueryType::GetAccountAssets.required_fields())?;
    let account_id = read_string(doc, "account_id")?;
    let asset_id = read_string(doc, "asset_id")?;
    Ok(QueryPayload::GetAccountAssets {
        account_id: account_id.to_string(),
        asset_id: asset_id.to_string(),
    })
}

pub fn get_account_asset_transactions(doc: &dyn DocumentView) -> Result<QueryPayload, Error> {
    require_fields(doc, QueryType::GetAccountAssetTransactions.required_fields())?;
    let account_id = read_string(doc, "account_id")?;
    let asset_id = read_string(doc, "asset_id")?;
    Ok(QueryPayload::GetAccountAssetTransactions {
        account_id: account_id.to_string(),
        asset_id: asset_id.to_string(),
    })
}

pub fn get_account_transactions(doc: &dyn DocumentView) -> Result<QueryPayload, Error> {
    require_fields(doc, QueryType::GetAccountTransactions.required_fields())?;
    Ok(QueryPayload::GetAccountTransactions {
        account_id: read_string(doc, "account_id")?.to_string(),
    })
}

pub fn get_account_signatories(doc: &dyn DocumentView) -> Result<QueryPayload, Error> {
    require_fields(doc, QueryType::GetAccountSignatories.required_fields())?;
    Ok(QueryPayload::GetAccountSignatories {
        account_id: read_string(doc, "account_id")?.to_string(),
    })
}
