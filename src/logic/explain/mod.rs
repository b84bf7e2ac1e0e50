//! Explain Module
//!
//! Reads the external explainer's attribution tensor and turns it into
//! top contributing features for the model's predicted class.
//! Attribution values are never computed here.
//!
//! ## Structure
//! - `types`: FeatureContribution, TopFeatures, PrimaryFactor, DecodeWarning
//! - `tensor`: AttributionTensor (stacked / per-class / single-output)
//! - `layout`: FeatureLayout (ordered names + CRC32 hash)
//! - `extractor`: top-K ranking and class fallback

pub mod types;
pub mod tensor;
pub mod layout;
pub mod extractor;

pub use types::{DecodeWarning, FeatureContribution, PrimaryFactor, TopFeatures};
pub use tensor::AttributionTensor;
pub use layout::FeatureLayout;
pub use extractor::{top_features, AttributionExtractor, Extraction, DEFAULT_TOP_K};
