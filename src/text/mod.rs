// Text preparation — stopwords and the normalizer built on them.

pub mod normalize;
pub mod stopwords;

pub use normalize::Normalizer;
pub use stopwords::Stopwords;
