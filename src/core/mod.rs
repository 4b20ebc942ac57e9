// Core modules implementing document access, validation, dispatch, and error modeling.
pub mod dispatch;
pub mod document;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod query;
