//! Request payload normalization
//!
//! Turns a parsed JSON body into a [`FeatureBatch`]. Accepts either a single
//! sample (`[1, 2, 3]`) or a batch (`[[1, 2], [3, 4]]`); the first element
//! decides which. Vectors are not required to share a length, that is left
//! to the scorer.

use serde_json::Value;

use crate::error::{PredictError, PredictResult};

const EXPECTED_ARRAY: &str = "Request body must be a non-empty JSON array.";
const EXPECTED_SAMPLE: &str = "Each sample must be a non-empty array of numeric features.";
const EXPECTED_NUMERIC: &str = "All feature values must be numeric.";

pub type FeatureVector = Vec<f64>;

/// Non-empty, ordered list of non-empty feature vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureBatch {
    rows: Vec<FeatureVector>,
}

impl FeatureBatch {
    pub fn rows(&self) -> &[FeatureVector] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeatureVector> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<FeatureVector> {
        self.rows
    }
}

impl TryFrom<Vec<FeatureVector>> for FeatureBatch {
    type Error = PredictError;

    fn try_from(rows: Vec<FeatureVector>) -> PredictResult<Self> {
        if rows.is_empty() {
            return Err(PredictError::InvalidInput(EXPECTED_ARRAY));
        }
        if rows.iter().any(|row| row.is_empty()) {
            return Err(PredictError::InvalidInput(EXPECTED_SAMPLE));
        }
        Ok(FeatureBatch { rows })
    }
}

impl<'a> IntoIterator for &'a FeatureBatch {
    type Item = &'a FeatureVector;
    type IntoIter = std::slice::Iter<'a, FeatureVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

pub fn normalize_features(payload: &Value) -> PredictResult<FeatureBatch> {
    let items = match payload {
        Value::Array(items) if !items.is_empty() => items,
        _ => return Err(PredictError::InvalidInput(EXPECTED_ARRAY)),
    };

    let samples: Vec<&Value> = if items[0].is_array() {
        items.iter().collect()
    } else {
        vec![payload]
    };

    let rows = samples
        .into_iter()
        .map(normalize_sample)
        .collect::<PredictResult<Vec<_>>>()?;
    Ok(FeatureBatch { rows })
}

fn normalize_sample(sample: &Value) -> PredictResult<FeatureVector> {
    let values = match sample {
        Value::Array(values) if !values.is_empty() => values,
        _ => return Err(PredictError::InvalidInput(EXPECTED_SAMPLE)),
    };
    values
        .iter()
        .map(|value| to_float(value).ok_or(PredictError::InvalidInput(EXPECTED_NUMERIC)))
        .collect()
}

/// Numbers pass through; strings count when their trimmed text parses as a float.
fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_float(text.trim()),
        _ => None,
    }
}

/// `str::parse` plus `_` digit separators (`"1_000.5"`), allowed only between two digits.
fn parse_float(text: &str) -> Option<f64> {
    if !text.contains('_') {
        return text.parse().ok();
    }
    let bytes = text.as_bytes();
    let separators_ok = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    });
    if !separators_ok {
        return None;
    }
    text.replace('_', "").parse().ok()
}
