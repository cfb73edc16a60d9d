// Article corpora — the record type and its file codecs.

pub mod record;
pub mod tabular;

pub use record::{fields, Record};
