//! Attribution Extractor
//!
//! Picks the top-K features pushing toward (positive) and away from
//! (negative) the model's predicted class for one sample.
//! Works on raw attribution values; formatting is the caller's business.

use std::cmp::Ordering;

use super::layout::FeatureLayout;
use super::tensor::AttributionTensor;
use super::types::{DecodeWarning, FeatureContribution, PrimaryFactor, TopFeatures};

/// Default number of features per direction
pub const DEFAULT_TOP_K: usize = 3;

// ============================================================================
// EXTRACTION RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub top: TopFeatures,
    /// Class actually read (0 after an out-of-range fallback)
    pub class_used: usize,
    /// Recovered problems; the extraction is still usable
    pub warnings: Vec<DecodeWarning>,
}

// ============================================================================
// EXTRACTOR
// ============================================================================

#[derive(Debug, Clone)]
pub struct AttributionExtractor {
    k: usize,
}

impl Default for AttributionExtractor {
    fn default() -> Self {
        Self { k: DEFAULT_TOP_K }
    }
}

impl AttributionExtractor {
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Top features of `sample` for `predicted_class`.
    ///
    /// An out-of-range class falls back to class 0 and a feature-count
    /// mismatch truncates to the shorter side; both are reported as
    /// warnings inside the `Extraction`. `Err` means nothing could be read.
    pub fn extract(
        &self,
        tensor: &AttributionTensor,
        sample: usize,
        predicted_class: usize,
        layout: &FeatureLayout,
    ) -> Result<Extraction, DecodeWarning> {
        let classes = tensor.class_count();
        if classes == 0 {
            return Err(DecodeWarning::EmptyClassDimension);
        }

        let mut warnings = Vec::new();
        let class_used = if predicted_class < classes {
            predicted_class
        } else {
            warnings.push(DecodeWarning::ClassIndexOutOfRange {
                requested: predicted_class,
                available: classes,
            });
            0
        };

        let values = tensor.slice_for(sample, class_used)?.to_vec();
        let (top, rank_warnings) = top_features(&values, layout.names(), self.k);
        warnings.extend(rank_warnings);

        Ok(Extraction {
            top,
            class_used,
            warnings,
        })
    }

    /// Feature with the largest |value| over every class of the sample
    pub fn primary_factor(
        &self,
        tensor: &AttributionTensor,
        sample: usize,
        layout: &FeatureLayout,
    ) -> Option<PrimaryFactor> {
        let mut best: Option<PrimaryFactor> = None;

        for class in 0..tensor.class_count() {
            let values = match tensor.slice_for(sample, class) {
                Ok(v) => v,
                Err(_) => return None,
            };
            for (i, &value) in values.iter().enumerate().take(layout.len()) {
                if !value.is_finite() || value == 0.0 {
                    continue;
                }
                // Ties keep the earliest feature, then the earliest class
                let better = match &best {
                    None => true,
                    Some(b) => {
                        let current = layout.index_of(&b.name).unwrap_or(usize::MAX);
                        value.abs() > b.value.abs() || (value.abs() == b.value.abs() && i < current)
                    }
                };
                if better {
                    best = Some(PrimaryFactor {
                        name: layout.name(i).unwrap_or_default().to_string(),
                        class_index: class,
                        value,
                    });
                }
            }
        }

        best
    }
}

// ============================================================================
// RANKING
// ============================================================================

/// Rank one feature vector.
///
/// Positives: value > 0, descending. Negatives: value < 0, ascending.
/// Both stable (ties keep feature index order) and padded to `k` with
/// placeholders.
pub fn top_features(values: &[f64], names: &[String], k: usize) -> (TopFeatures, Vec<DecodeWarning>) {
    let mut warnings = Vec::new();

    let used = values.len().min(names.len());
    if values.len() != names.len() {
        warnings.push(DecodeWarning::FeatureCountMismatch {
            slice: values.len(),
            names: names.len(),
            used,
        });
    }

    let non_finite = values[..used].iter().filter(|v| !v.is_finite()).count();
    if non_finite > 0 {
        warnings.push(DecodeWarning::NonFiniteValues { count: non_finite });
    }

    let pairs: Vec<(&str, f64)> = names[..used]
        .iter()
        .map(String::as_str)
        .zip(values[..used].iter().copied())
        .filter(|(_, v)| v.is_finite())
        .collect();

    let mut positive: Vec<(&str, f64)> = pairs.iter().copied().filter(|(_, v)| *v > 0.0).collect();
    positive.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let mut negative: Vec<(&str, f64)> = pairs.iter().copied().filter(|(_, v)| *v < 0.0).collect();
    negative.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    let top = TopFeatures {
        positive: pad(positive, k),
        negative: pad(negative, k),
    };
    (top, warnings)
}

fn pad(ranked: Vec<(&str, f64)>, k: usize) -> Vec<FeatureContribution> {
    let mut out: Vec<FeatureContribution> = ranked
        .into_iter()
        .take(k)
        .map(|(name, value)| FeatureContribution::new(name, value))
        .collect();
    out.resize(k, FeatureContribution::placeholder());
    out
}

// ============================================================================
// TESTS
// ============================================================================
