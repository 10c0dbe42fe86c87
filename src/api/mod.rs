pub mod client;
pub mod error;
pub mod types;

pub use client::{RecordClient, RecordStore};
pub use error::TransportError;
pub use types::{FormDraft, Record};
