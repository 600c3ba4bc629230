//! URL classifier: assigns a category label to a URL from its title and snippet.

mod client;
mod payload;

pub use client::{Classify, ClassifierClient};
pub use payload::{encode_payload, parse_category, Classification};
