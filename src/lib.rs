// Blogsift: near-duplicate and unique article detection for crawled blogs
//
// This is the library root. Each module corresponds to a layer of the
// engine: text normalization, TF-IDF vector spaces and cosine scoring at the
// core, batch pipelines on top, and storage, delivery and serving around them.

pub mod config;
pub mod corpus;
pub mod notify;
pub mod output;
pub mod pipeline;
pub mod similarity;
pub mod status;
pub mod store;
pub mod text;

#[cfg(feature = "web")]
pub mod web;
