//! Input/output helpers.
//!
//! - resource fetch, file or HTTP (`fetch`)
//! - CSV ingest into loosely typed records (`ingest`)
//! - chart payload JSON and summary CSV exports (`export`)

pub mod export;
pub mod fetch;
pub mod ingest;

pub use export::*;
pub use fetch::*;
pub use ingest::*;
