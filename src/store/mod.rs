//! Key-value store
//!
//! This module provides the in-memory document types, their conversions,
//! the document codec and the `KeyValueStore` that persists them.

pub mod codec;
pub mod convert;
pub mod document;
pub mod error;
pub mod kv_store;
pub mod value;

pub use codec::{CodecError, DocumentCodec, JsonCodec, DEFAULT_NESTING_LIMIT};
pub use convert::FromValue;
pub use document::Document;
pub use error::StoreError;
pub use kv_store::{BeginOutcome, KeyValueStore, StoreState};
pub use value::Value;
