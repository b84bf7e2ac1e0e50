//! Attribution Tensor
//!
//! The explainer hands over attributions in one of several layouts.
//! All branching on layout lives here; callers only see `slice_for`.

use ndarray::{Array2, Array3, ArrayView1, Axis};

use super::types::DecodeWarning;
use crate::error::{EngineError, EngineResult};

// ============================================================================
// TENSOR LAYOUTS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum AttributionTensor {
    /// Single array indexed [sample, feature, class]
    Stacked(Array3<f64>),
    /// One [sample, feature] array per class
    PerClass(Vec<Array2<f64>>),
    /// Single-output model: [sample, feature], one class
    SingleOutput(Array2<f64>),
}

impl AttributionTensor {
    pub fn stacked(values: Array3<f64>) -> Self {
        AttributionTensor::Stacked(values)
    }

    /// Per-class arrays must all share the same [sample, feature] shape
    pub fn per_class(arrays: Vec<Array2<f64>>) -> EngineResult<Self> {
        if let Some(first) = arrays.first() {
            let (samples, features) = first.dim();
            for array in arrays.iter().skip(1) {
                let (s, f) = array.dim();
                if s != samples {
                    return Err(EngineError::shape("attribution class array (samples)", samples, s));
                }
                if f != features {
                    return Err(EngineError::shape("attribution class array (features)", features, f));
                }
            }
        }
        Ok(AttributionTensor::PerClass(arrays))
    }

    pub fn single_output(values: Array2<f64>) -> Self {
        AttributionTensor::SingleOutput(values)
    }

    /// Build [sample][feature][class] from nested vectors; ragged input is a shape error
    pub fn from_nested(values: Vec<Vec<Vec<f64>>>) -> EngineResult<Self> {
        let samples = values.len();
        let features = values.first().map(|s| s.len()).unwrap_or(0);
        let classes = values
            .first()
            .and_then(|s| s.first())
            .map(|c| c.len())
            .unwrap_or(0);

        let mut flat = Vec::with_capacity(samples * features * classes);
        for sample in values {
            if sample.len() != features {
                return Err(EngineError::shape("attribution features", features, sample.len()));
            }
            for row in sample {
                if row.len() != classes {
                    return Err(EngineError::shape("attribution classes", classes, row.len()));
                }
                flat.extend(row);
            }
        }

        let array = Array3::from_shape_vec((samples, features, classes), flat)
            .map_err(|e| EngineError::InvalidConfig(format!("attribution tensor: {}", e)))?;
        Ok(AttributionTensor::Stacked(array))
    }

    pub fn sample_count(&self) -> usize {
        match self {
            AttributionTensor::Stacked(a) => a.len_of(Axis(0)),
            AttributionTensor::PerClass(arrays) => arrays.first().map(|a| a.nrows()).unwrap_or(0),
            AttributionTensor::SingleOutput(a) => a.nrows(),
        }
    }

    pub fn feature_count(&self) -> usize {
        match self {
            AttributionTensor::Stacked(a) => a.len_of(Axis(1)),
            AttributionTensor::PerClass(arrays) => arrays.first().map(|a| a.ncols()).unwrap_or(0),
            AttributionTensor::SingleOutput(a) => a.ncols(),
        }
    }

    pub fn class_count(&self) -> usize {
        match self {
            AttributionTensor::Stacked(a) => a.len_of(Axis(2)),
            AttributionTensor::PerClass(arrays) => arrays.len(),
            AttributionTensor::SingleOutput(_) => 1,
        }
    }

    /// Feature vector for one sample and one class. Strict: no fallback here.
    pub fn slice_for(&self, sample: usize, class: usize) -> Result<ArrayView1<'_, f64>, DecodeWarning> {
        let available = self.sample_count();
        if sample >= available {
            return Err(DecodeWarning::SampleOutOfRange { sample, available });
        }
        let classes = self.class_count();
        if classes == 0 {
            return Err(DecodeWarning::EmptyClassDimension);
        }
        if class >= classes {
            return Err(DecodeWarning::ClassIndexOutOfRange {
                requested: class,
                available: classes,
            });
        }

        let view = match self {
            AttributionTensor::Stacked(a) => a.index_axis(Axis(0), sample).index_axis_move(Axis(1), class),
            AttributionTensor::PerClass(arrays) => arrays[class].row(sample),
            AttributionTensor::SingleOutput(a) => a.row(sample),
        };
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn stacked_2x3x2() -> AttributionTensor {
        // sample 0: features f0..f2, classes c0/c1
        AttributionTensor::from_nested(vec![
            vec![vec![0.1, -0.1], vec![0.2, -0.2], vec![0.3, -0.3]],
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
        ])
        .unwrap()
    }

    #[test]
    fn test_stacked_dimensions() {
        let t = stacked_2x3x2();
        assert_eq!(t.sample_count(), 2);
        assert_eq!(t.feature_count(), 3);
        assert_eq!(t.class_count(), 2);
    }

    #[test]
    fn test_stacked_slice_selects_class_column() {
        let t = stacked_2x3x2();
        let s = t.slice_for(1, 1).unwrap();
        assert_eq!(s.to_vec(), vec![2.0, 4.0, 6.0]);
        let s = t.slice_for(0, 0).unwrap();
        assert_eq!(s.to_vec(), vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_per_class_matches_stacked() {
        let per_class = AttributionTensor::per_class(vec![
            array![[0.1, 0.2, 0.3], [1.0, 3.0, 5.0]],
            array![[-0.1, -0.2, -0.3], [2.0, 4.0, 6.0]],
        ])
        .unwrap();
        let stacked = stacked_2x3x2();

        for sample in 0..2 {
            for class in 0..2 {
                assert_eq!(
                    per_class.slice_for(sample, class).unwrap(),
                    stacked.slice_for(sample, class).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_per_class_rejects_ragged_arrays() {
        let result = AttributionTensor::per_class(vec![
            array![[0.1, 0.2], [0.3, 0.4]],
            array![[0.1, 0.2]],
        ]);
        assert!(matches!(result, Err(EngineError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_from_nested_rejects_ragged() {
        let result = AttributionTensor::from_nested(vec![
            vec![vec![0.1, 0.2], vec![0.3, 0.4]],
            vec![vec![0.1, 0.2]],
        ]);
        assert!(matches!(result, Err(EngineError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_slice_errors() {
        let t = stacked_2x3x2();
        assert_eq!(
            t.slice_for(5, 0),
            Err(DecodeWarning::SampleOutOfRange { sample: 5, available: 2 })
        );
        assert_eq!(
            t.slice_for(0, 7),
            Err(DecodeWarning::ClassIndexOutOfRange { requested: 7, available: 2 })
        );
    }

    #[test]
    fn test_single_output_has_one_class() {
        let t = AttributionTensor::single_output(array![[0.5, -0.5]]);
        assert_eq!(t.class_count(), 1);
        assert_eq!(t.slice_for(0, 0).unwrap().to_vec(), vec![0.5, -0.5]);
    }

    #[test]
    fn test_empty_per_class_has_no_samples() {
        let t = AttributionTensor::per_class(vec![]).unwrap();
        assert_eq!(t.sample_count(), 0);
        assert_eq!(t.class_count(), 0);
    }
}
