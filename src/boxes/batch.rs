//! Batch construction from array-like input.
//!
//! Input is any row-major array whose trailing dimension is exactly 4.
//! Every group of four values becomes one box and the leading dimensions
//! are kept as the batch shape, so `(2, 3, 4)` input gives a `(2, 3)`
//! batch and a plain `(4,)` input gives a single box with an empty shape.

use log::debug;
use serde_json::Value;

use super::any::AnyBox;
use super::bounding_box::BoundingBox;
use super::format::{BoxFormat, Format};
use super::space::BoxOptions;
use crate::error::BBoxError;

/// Boxes laid out in a row-major array of `shape`.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxBatch<T> {
    shape: Vec<usize>,
    items: Vec<T>,
}

impl<T> BoxBatch<T> {
    /// Leading dimensions of the input (the trailing 4 removed).
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Looks up a box by its multi-dimensional index.
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut flat = 0;
        for (&i, &dim) in index.iter().zip(&self.shape) {
            if i >= dim {
                return None;
            }
            flat = flat * dim + i;
        }
        self.items.get(flat)
    }

    /// The box of a single-box input (empty shape).
    pub fn into_single(self) -> Option<T> {
        if self.shape.is_empty() {
            self.items.into_iter().next()
        } else {
            None
        }
    }
}

impl<'a, T> IntoIterator for &'a BoxBatch<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<F: Format> BoundingBox<F> {
    /// Builds one box per trailing group of 4 values in `data`.
    ///
    /// # Errors
    /// [`BBoxError::Shape`] if the trailing dimension is not 4 or `data`
    /// does not hold exactly `shape` values; otherwise the first error
    /// from constructing an element.
    pub fn from_array(
        data: &[f64],
        shape: &[usize],
        options: BoxOptions,
    ) -> Result<BoxBatch<Self>, BBoxError> {
        build_batch(data, shape, |raw| Self::from_raw(raw, options))
    }

    /// Builds boxes from nested JSON arrays, e.g. `[[0, 0, 10, 10], [5, 5, 20, 20]]`.
    pub fn from_nested(value: &Value, options: BoxOptions) -> Result<BoxBatch<Self>, BBoxError> {
        let (data, shape) = flatten_nested(value)?;
        Self::from_array(&data, &shape, options)
    }
}

impl AnyBox {
    /// Runtime-format counterpart of [`BoundingBox::from_array`].
    pub fn from_array(
        format: BoxFormat,
        data: &[f64],
        shape: &[usize],
        options: BoxOptions,
    ) -> Result<BoxBatch<AnyBox>, BBoxError> {
        build_batch(data, shape, |raw| AnyBox::from_raw(format, raw, options))
    }

    /// Runtime-format counterpart of [`BoundingBox::from_nested`].
    pub fn from_nested(
        format: BoxFormat,
        value: &Value,
        options: BoxOptions,
    ) -> Result<BoxBatch<AnyBox>, BBoxError> {
        let (data, shape) = flatten_nested(value)?;
        AnyBox::from_array(format, &data, &shape, options)
    }
}

fn build_batch<T>(
    data: &[f64],
    shape: &[usize],
    mut build: impl FnMut([f64; 4]) -> Result<T, BBoxError>,
) -> Result<BoxBatch<T>, BBoxError> {
    let leading = check_shape(data.len(), shape)?;
    debug!("building {} box(es) with shape {:?}", data.len() / 4, leading);

    let items = data
        .chunks_exact(4)
        .map(|c| build([c[0], c[1], c[2], c[3]]))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(BoxBatch {
        shape: leading,
        items,
    })
}

/// Validates a batch shape and returns its leading dimensions.
fn check_shape(len: usize, shape: &[usize]) -> Result<Vec<usize>, BBoxError> {
    let Some((&last, leading)) = shape.split_last() else {
        return Err(BBoxError::shape(
            "input must have bounding box values at dim -1 as 4, got a scalar",
        ));
    };
    if last != 4 {
        return Err(BBoxError::shape(format!(
            "input must have bounding box values at dim -1 as 4, got shape {shape:?}"
        )));
    }
    let expected = shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .ok_or_else(|| BBoxError::shape(format!("shape {shape:?} is too large")))?;
    if expected != len {
        return Err(BBoxError::shape(format!(
            "shape {shape:?} needs {expected} values, got {len}"
        )));
    }
    Ok(leading.to_vec())
}

/// Flattens nested JSON arrays of numbers into row-major data and a shape.
pub fn flatten_nested(value: &Value) -> Result<(Vec<f64>, Vec<usize>), BBoxError> {
    let mut data = Vec::new();
    let shape = flatten_into(value, &mut data)?;
    Ok((data, shape))
}

fn flatten_into(value: &Value, data: &mut Vec<f64>) -> Result<Vec<usize>, BBoxError> {
    match value {
        Value::Number(n) => {
            let v = n
                .as_f64()
                .ok_or_else(|| BBoxError::invalid_value(format!("{n} is not representable")))?;
            data.push(v);
            Ok(Vec::new())
        }
        Value::Array(items) => {
            let mut inner: Option<Vec<usize>> = None;
            for item in items {
                let item_shape = flatten_into(item, data)?;
                match &inner {
                    None => inner = Some(item_shape),
                    Some(prev) if *prev != item_shape => {
                        return Err(BBoxError::shape(format!(
                            "ragged input: found sub-arrays of shape {prev:?} and {item_shape:?}"
                        )));
                    }
                    Some(_) => {}
                }
            }
            let mut shape = vec![items.len()];
            shape.extend(inner.unwrap_or_default());
            Ok(shape)
        }
        other => Err(BBoxError::invalid_value(format!(
            "expected a number or an array, got {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::{BBoxXYXY, CocoBox, OobState, VocBox, YoloBox};
    use serde_json::json;

    #[test]
    fn test_single_box_has_empty_shape() {
        let batch = VocBox::from_array(&[0.0, 0.0, 10.0, 10.0], &[4], BoxOptions::default())
            .unwrap();
        assert!(batch.shape().is_empty());
        let single = batch.into_single().unwrap();
        assert_eq!(single.values(), [0, 0, 10, 10]);
    }

    #[test]
    fn test_leading_dimensions_are_preserved() {
        let data: Vec<f64> = (0..6)
            .flat_map(|i| {
                let i = i as f64;
                [i, i, i + 10.0, i + 10.0]
            })
            .collect();
        let batch = VocBox::from_array(&data, &[2, 3, 4], BoxOptions::default()).unwrap();
        assert_eq!(batch.shape(), &[2, 3]);
        assert_eq!(batch.len(), 6);
        assert_eq!(batch.get(&[1, 2]).unwrap().values(), [5, 5, 15, 15]);
        assert_eq!(batch.get(&[0, 1]).unwrap().values(), [1, 1, 11, 11]);
        assert!(batch.get(&[2, 0]).is_none());
        assert!(batch.get(&[0]).is_none());
        assert!(batch.clone().into_single().is_none());
    }

    #[test]
    fn test_trailing_dimension_must_be_four() {
        let err = VocBox::from_array(&[0.0; 6], &[2, 3], BoxOptions::default());
        assert!(matches!(err, Err(BBoxError::Shape { .. })));

        let err = VocBox::from_array(&[0.0; 4], &[], BoxOptions::default());
        assert!(matches!(err, Err(BBoxError::Shape { .. })));
    }

    #[test]
    fn test_data_length_must_match_shape() {
        let err = VocBox::from_array(&[0.0; 4], &[2, 4], BoxOptions::default());
        assert!(matches!(err, Err(BBoxError::Shape { .. })));

        let err = VocBox::from_array(&[0.0; 4], &[usize::MAX, 2, 4], BoxOptions::default());
        assert!(matches!(err, Err(BBoxError::Shape { .. })));
    }

    #[test]
    fn test_element_errors_propagate() {
        let data = [0.0, 0.0, 10.0, 10.0, 5.0, 5.0, 5.0, 10.0];
        let err = VocBox::from_array(&data, &[2, 4], BoxOptions::default());
        assert!(matches!(err, Err(BBoxError::InvalidCoordinates { .. })));
    }

    #[test]
    fn test_from_nested() {
        let input = json!([[[0, 0, 10, 10], [5, 5, 10, 10]]]);
        let batch = CocoBox::from_nested(&input, BoxOptions::with_image_size(12, 12)).unwrap();
        assert_eq!(batch.shape(), &[1, 2]);
        let states: Vec<OobState> = batch.iter().map(|b| b.oob()).collect();
        assert_eq!(states, vec![OobState::InBounds, OobState::OutOfBounds]);
        assert_eq!(
            *batch.get(&[0, 1]).unwrap().canonical(),
            BBoxXYXY::new(5, 5, 15, 15)
        );
    }

    #[test]
    fn test_from_nested_rejects_ragged_and_non_numeric() {
        let ragged = json!([[0, 0, 10, 10], [0, 0, 10]]);
        assert!(matches!(
            VocBox::from_nested(&ragged, BoxOptions::default()),
            Err(BBoxError::Shape { .. })
        ));

        let text = json!([0, 0, "10", 10]);
        assert!(matches!(
            VocBox::from_nested(&text, BoxOptions::default()),
            Err(BBoxError::InvalidValue { .. })
        ));

        assert!(matches!(
            VocBox::from_nested(&json!([]), BoxOptions::default()),
            Err(BBoxError::Shape { .. })
        ));
    }

    #[test]
    fn test_any_box_batch() {
        let input = json!([[0.5, 0.5, 0.2, 0.2], [0.1, 0.1, 0.1, 0.1]]);
        let batch = AnyBox::from_nested(
            BoxFormat::Yolo,
            &input,
            BoxOptions::with_image_size(100, 100),
        )
        .unwrap();
        assert_eq!(batch.shape(), &[2]);
        let corners: Vec<BBoxXYXY> = batch.iter().map(|b| *b.canonical()).collect();
        assert_eq!(
            corners,
            vec![BBoxXYXY::new(40, 40, 60, 60), BBoxXYXY::new(5, 5, 15, 15)]
        );

        let typed = YoloBox::from_nested(&input, BoxOptions::default());
        assert!(matches!(typed, Err(BBoxError::MissingContext { .. })));
    }
}
