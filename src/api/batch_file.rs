//! Batch file format
//!
//! JSON input for one run: class names, feature names, records,
//! classifier outputs and the attribution tensor.

use std::path::Path;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::logic::decision::{ClassList, ClassifierOutput};
use crate::logic::explain::{AttributionTensor, FeatureLayout};
use crate::logic::record::StudentRecord;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFile {
    pub class_names: Vec<String>,
    pub feature_names: Vec<String>,
    pub records: Vec<StudentRecord>,
    pub classifier_outputs: Vec<ClassifierOutput>,
    pub attributions: AttributionInput,
}

/// Attribution values as the explainer dumped them
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "layout", content = "values", rename_all = "snake_case")]
pub enum AttributionInput {
    /// [sample][feature][class]
    Stacked(Vec<Vec<Vec<f64>>>),
    /// [class][sample][feature]
    PerClass(Vec<Vec<Vec<f64>>>),
    /// [sample][feature]
    SingleOutput(Vec<Vec<f64>>),
}

/// Validated, domain-typed batch
#[derive(Debug, Clone)]
pub struct PreparedBatch {
    pub classes: ClassList,
    pub layout: FeatureLayout,
    pub records: Vec<StudentRecord>,
    pub outputs: Vec<ClassifierOutput>,
    pub tensor: AttributionTensor,
}

// ============================================================================
// LOADING
// ============================================================================

impl BatchFile {
    pub fn load(path: &Path) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: BatchFile = serde_json::from_str(&content)?;
        log::debug!(
            "Loaded {} records, {} classes, {} features from {}",
            file.records.len(),
            file.class_names.len(),
            file.feature_names.len(),
            path.display()
        );
        Ok(file)
    }

    pub fn prepare(self) -> EngineResult<PreparedBatch> {
        Ok(PreparedBatch {
            classes: ClassList::new(&self.class_names)?,
            layout: FeatureLayout::new(self.feature_names),
            records: self.records,
            outputs: self.classifier_outputs,
            tensor: self.attributions.into_tensor()?,
        })
    }
}

impl AttributionInput {
    pub fn into_tensor(self) -> EngineResult<AttributionTensor> {
        match self {
            AttributionInput::Stacked(values) => AttributionTensor::from_nested(values),
            AttributionInput::PerClass(classes) => {
                let arrays = classes
                    .into_iter()
                    .map(to_array2)
                    .collect::<EngineResult<Vec<_>>>()?;
                AttributionTensor::per_class(arrays)
            }
            AttributionInput::SingleOutput(rows) => Ok(AttributionTensor::single_output(to_array2(rows)?)),
        }
    }
}

/// Rows of equal length into a [rows, cols] array
fn to_array2(rows: Vec<Vec<f64>>) -> EngineResult<Array2<f64>> {
    let n = rows.len();
    let cols = rows.first().map(|r| r.len()).unwrap_or(0);

    let mut flat = Vec::with_capacity(n * cols);
    for row in rows {
        if row.len() != cols {
            return Err(EngineError::shape("attribution features", cols, row.len()));
        }
        flat.extend(row);
    }

    Array2::from_shape_vec((n, cols), flat)
        .map_err(|e| EngineError::InvalidConfig(format!("attribution array: {}", e)))
}
