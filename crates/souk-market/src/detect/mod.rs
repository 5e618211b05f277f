//! Free-text category detection.

mod detector;
mod lexicon;

pub use detector::{detect, CategoryDetector, CategoryScore, DetectorConfig};
pub use lexicon::{slug_for, LexiconEntry, LEXICON, LOGICAL_SLUGS};
