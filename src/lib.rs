//! Purpose: Library crate turning JSON query documents into typed `Query` values.
//! Exports: `api` (deserializer, query model, errors) and `core` (validation building blocks).
//! Role: Backs the `queryjson` CLI and the C ABI; usable directly from Rust.
//! Invariants: A returned `Query` is always complete; failures never leak partial values.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
mod abi;
pub mod api;
pub mod core;
pub(crate) mod json;
