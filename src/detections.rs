// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Columnar container for the detections (or tracklets) of a single frame.
//!
//! [`Detections`] stores every attribute as a column whose leading dimension is
//! the number of detections `N`. Subsetting re-indexes every present column
//! identically so rows stay aligned across fields.

use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

use ndarray::{Array1, Array2, Array3, ArrayD, ArrayView1, ArrayView2, Axis, Slice};

use crate::anchors::{box_anchors, mask_centroids, Position};
use crate::error::{AnalyzerError, Result};

/// Scalar stored in a list-backed `extra` column.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtraValue {
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// String value.
    Str(String),
}

impl fmt::Display for ExtraValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
        }
    }
}

impl From<&str> for ExtraValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ExtraValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for ExtraValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ExtraValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Auxiliary per-detection column.
///
/// Array columns accept every [`DetectionIndex`] form. List columns accept
/// single positions, ranges and position lists but reject boolean masks.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtraColumn {
    /// Numeric array whose first axis has length `N`.
    Array(ArrayD<f64>),
    /// Ordered list of length `N`.
    List(Vec<ExtraValue>),
}

impl ExtraColumn {
    /// Number of rows (leading dimension).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Array(array) => array.shape().first().copied().unwrap_or(0),
            Self::List(list) => list.len(),
        }
    }

    /// Check if the column has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value of row `i` rendered as text, used for labels.
    #[must_use]
    pub fn display_row(&self, i: usize) -> Option<String> {
        match self {
            Self::List(list) => list.get(i).map(ToString::to_string),
            Self::Array(array) => {
                if i >= self.len() {
                    return None;
                }
                let row = array.index_axis(Axis(0), i);
                if row.ndim() == 0 {
                    row.iter().next().map(ToString::to_string)
                } else {
                    Some(
                        row.iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(" "),
                    )
                }
            }
        }
    }

    fn subset(&self, index: &DetectionIndex, n: usize) -> Result<Self> {
        if let (Self::List(_), DetectionIndex::Mask(_)) = (self, index) {
            return Err(AnalyzerError::InvalidArgument(
                "boolean mask indexing is not supported on list-backed data fields".to_string(),
            ));
        }
        let positions = index.resolve(n)?;
        Ok(self.gather(&positions))
    }

    // Positions must already be validated against `len()`.
    fn gather(&self, positions: &[usize]) -> Self {
        match self {
            Self::Array(array) => Self::Array(array.select(Axis(0), positions)),
            Self::List(list) => Self::List(positions.iter().map(|&i| list[i].clone()).collect()),
        }
    }
}

impl From<Vec<ExtraValue>> for ExtraColumn {
    fn from(list: Vec<ExtraValue>) -> Self {
        Self::List(list)
    }
}

impl From<Vec<String>> for ExtraColumn {
    fn from(list: Vec<String>) -> Self {
        Self::List(list.into_iter().map(ExtraValue::Str).collect())
    }
}

impl From<ArrayD<f64>> for ExtraColumn {
    fn from(array: ArrayD<f64>) -> Self {
        Self::Array(array)
    }
}

impl From<Array1<f64>> for ExtraColumn {
    fn from(array: Array1<f64>) -> Self {
        Self::Array(array.into_dyn())
    }
}

/// Row selector for [`Detections::subset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionIndex {
    /// One row; the result still has `N = 1`.
    Single(usize),
    /// Half-open range. Ends past `N` are clamped, reversed ranges are empty.
    Range(Range<usize>),
    /// Explicit positions, gathered in the given order (repeats allowed).
    List(Vec<usize>),
    /// Boolean mask of length `N`; keeps rows where `true`.
    Mask(Vec<bool>),
}

impl DetectionIndex {
    /// Resolve to explicit row positions for a set of `n` rows.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::OutOfBounds`] for positions `>= n` and
    /// [`AnalyzerError::LengthMismatch`] for masks whose length is not `n`.
    pub fn resolve(&self, n: usize) -> Result<Vec<usize>> {
        match self {
            Self::Single(i) => {
                if *i >= n {
                    return Err(AnalyzerError::OutOfBounds { index: *i, len: n });
                }
                Ok(vec![*i])
            }
            Self::Range(range) => {
                let end = range.end.min(n);
                Ok((range.start.min(end)..end).collect())
            }
            Self::List(positions) => {
                if let Some(&bad) = positions.iter().find(|&&i| i >= n) {
                    return Err(AnalyzerError::OutOfBounds { index: bad, len: n });
                }
                Ok(positions.clone())
            }
            Self::Mask(mask) => {
                if mask.len() != n {
                    return Err(AnalyzerError::LengthMismatch {
                        what: "boolean index".to_string(),
                        expected: n,
                        actual: mask.len(),
                    });
                }
                Ok(mask
                    .iter()
                    .enumerate()
                    .filter_map(|(i, &keep)| keep.then_some(i))
                    .collect())
            }
        }
    }
}

impl From<usize> for DetectionIndex {
    fn from(i: usize) -> Self {
        Self::Single(i)
    }
}

impl From<Range<usize>> for DetectionIndex {
    fn from(range: Range<usize>) -> Self {
        Self::Range(range)
    }
}

impl From<Vec<usize>> for DetectionIndex {
    fn from(positions: Vec<usize>) -> Self {
        Self::List(positions)
    }
}

impl From<&[usize]> for DetectionIndex {
    fn from(positions: &[usize]) -> Self {
        Self::List(positions.to_vec())
    }
}

impl From<Array1<usize>> for DetectionIndex {
    fn from(positions: Array1<usize>) -> Self {
        Self::List(positions.to_vec())
    }
}

impl From<Vec<bool>> for DetectionIndex {
    fn from(mask: Vec<bool>) -> Self {
        Self::Mask(mask)
    }
}

impl From<&[bool]> for DetectionIndex {
    fn from(mask: &[bool]) -> Self {
        Self::Mask(mask.to_vec())
    }
}

impl From<Array1<bool>> for DetectionIndex {
    fn from(mask: Array1<bool>) -> Self {
        Self::Mask(mask.to_vec())
    }
}

/// Detections or tracklets present in one frame.
///
/// Every present field has `N` rows, where `N` is the row count of `xyxy`.
/// This is a caller contract; [`Detections::validate`] checks it on request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detections {
    /// Boxes with shape `(N, 4)`, rows `[x1, y1, x2, y2]` in pixels.
    pub xyxy: Array2<f32>,
    /// Instance masks with shape `(N, H, W)`.
    pub mask: Option<Array3<bool>>,
    /// Confidence scores with shape `(N,)`.
    pub confidence: Option<Array1<f32>>,
    /// Class IDs with shape `(N,)`.
    pub class_id: Option<Array1<i64>>,
    /// Persistent track IDs with shape `(N,)`, set by a tracker.
    pub track_id: Option<Array1<i64>>,
    /// Auxiliary per-detection columns.
    pub data: HashMap<String, ExtraColumn>,
}

impl Detections {
    /// Create a set holding only boxes.
    #[must_use]
    pub fn new(xyxy: Array2<f32>) -> Self {
        Self {
            xyxy,
            ..Self::default()
        }
    }

    /// A set with zero detections.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Array2::zeros((0, 4)))
    }

    /// Attach instance masks.
    #[must_use]
    pub fn with_mask(mut self, mask: Array3<bool>) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Attach confidence scores.
    #[must_use]
    pub fn with_confidence(mut self, confidence: Array1<f32>) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Attach class IDs.
    #[must_use]
    pub fn with_class_id(mut self, class_id: Array1<i64>) -> Self {
        self.class_id = Some(class_id);
        self
    }

    /// Attach track IDs.
    #[must_use]
    pub fn with_track_id(mut self, track_id: Array1<i64>) -> Self {
        self.track_id = Some(track_id);
        self
    }

    /// Attach an auxiliary column under `key`, replacing any previous one.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, column: impl Into<ExtraColumn>) -> Self {
        self.data.insert(key.into(), column.into());
        self
    }

    /// Build a set from detector rows `[x1, y1, x2, y2, confidence, class_id]`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::InvalidArgument`] unless `rows` has 6 columns.
    pub fn from_detector_output(rows: ArrayView2<'_, f32>) -> Result<Self> {
        if rows.ncols() != 6 {
            return Err(AnalyzerError::InvalidArgument(format!(
                "detector output must have 6 columns (x1, y1, x2, y2, confidence, class_id), got {}",
                rows.ncols()
            )));
        }
        Ok(Self::new(rows.slice_axis(Axis(1), Slice::from(0..4_usize)).to_owned())
            .with_confidence(rows.column(4).to_owned())
            .with_class_id(rows.column(5).mapv(|c| c as i64)))
    }

    /// Build a set from tracker rows `[x1, y1, x2, y2, score, class_id, track_id]`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::InvalidArgument`] unless `rows` has 7 columns.
    pub fn from_tracker_output(rows: ArrayView2<'_, f32>) -> Result<Self> {
        if rows.ncols() != 7 {
            return Err(AnalyzerError::InvalidArgument(format!(
                "tracker output must have 7 columns (x1, y1, x2, y2, score, class_id, track_id), got {}",
                rows.ncols()
            )));
        }
        Ok(Self::new(rows.slice_axis(Axis(1), Slice::from(0..4_usize)).to_owned())
            .with_confidence(rows.column(4).to_owned())
            .with_class_id(rows.column(5).mapv(|c| c as i64))
            .with_track_id(rows.column(6).mapv(|t| t as i64)))
    }

    /// Number of detections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.xyxy.nrows()
    }

    /// Check if there are no detections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that every present field has `len()` rows.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::InvalidArgument`] if `xyxy` is not 4 columns wide
    /// and [`AnalyzerError::LengthMismatch`] naming the first misaligned field.
    pub fn validate(&self) -> Result<()> {
        if self.xyxy.ncols() != 4 {
            return Err(AnalyzerError::InvalidArgument(format!(
                "xyxy must have 4 columns, got {}",
                self.xyxy.ncols()
            )));
        }

        let n = self.len();
        let check = |what: &str, actual: usize| {
            if actual == n {
                Ok(())
            } else {
                Err(AnalyzerError::LengthMismatch {
                    what: what.to_string(),
                    expected: n,
                    actual,
                })
            }
        };

        if let Some(ref mask) = self.mask {
            check("mask", mask.len_of(Axis(0)))?;
        }
        if let Some(ref confidence) = self.confidence {
            check("confidence", confidence.len())?;
        }
        if let Some(ref class_id) = self.class_id {
            check("class_id", class_id.len())?;
        }
        if let Some(ref track_id) = self.track_id {
            check("track_id", track_id.len())?;
        }
        for (key, column) in &self.data {
            check(&format!("data['{key}']"), column.len())?;
        }
        Ok(())
    }

    /// Iterate over detections in insertion order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            detections: self,
            range: 0..self.len(),
        }
    }

    /// New set with every present field re-indexed by `index`.
    ///
    /// A single position yields a set of length one, not a scalar row.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::OutOfBounds`] or [`AnalyzerError::LengthMismatch`]
    /// if `index` does not fit this set, and [`AnalyzerError::InvalidArgument`]
    /// when a boolean mask is applied to a list-backed data column.
    pub fn subset(&self, index: impl Into<DetectionIndex>) -> Result<Self> {
        let index = index.into();
        let n = self.len();
        let positions = index.resolve(n)?;

        let mut data = HashMap::with_capacity(self.data.len());
        for (key, column) in &self.data {
            data.insert(key.clone(), column.subset(&index, n)?);
        }

        Ok(Self {
            xyxy: self.xyxy.select(Axis(0), &positions),
            mask: self.mask.as_ref().map(|m| m.select(Axis(0), &positions)),
            confidence: self
                .confidence
                .as_ref()
                .map(|c| c.select(Axis(0), &positions)),
            class_id: self.class_id.as_ref().map(|c| c.select(Axis(0), &positions)),
            track_id: self.track_id.as_ref().map(|t| t.select(Axis(0), &positions)),
            data,
        })
    }

    /// Whole `data[key]` column, not row-indexed.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&ExtraColumn> {
        self.data.get(key)
    }

    /// Anchor coordinates `(x, y)` for every detection, shape `(N, 2)`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::MissingField`] if `position` is
    /// [`Position::CenterOfMass`] and the set has no masks.
    pub fn anchor_coordinates(&self, position: Position) -> Result<Array2<f32>> {
        if position == Position::CenterOfMass {
            let mask = self.mask.as_ref().ok_or_else(|| {
                AnalyzerError::MissingField(
                    "cannot compute center of mass: detections have no mask".to_string(),
                )
            })?;
            return Ok(mask_centroids(mask.view()));
        }
        box_anchors(self.xyxy.view(), position)
    }

    /// Box areas, shape `(N,)`.
    #[must_use]
    pub fn area(&self) -> Array1<f32> {
        self.xyxy
            .axis_iter(Axis(0))
            .map(|row| (row[2] - row[0]) * (row[3] - row[1]))
            .collect()
    }

    fn row_data(&self, i: usize) -> HashMap<String, ExtraColumn> {
        self.data
            .iter()
            .map(|(key, column)| (key.clone(), column.gather(&[i])))
            .collect()
    }
}

impl fmt::Display for Detections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = vec!["xyxy"];
        if self.mask.is_some() {
            fields.push("mask");
        }
        if self.confidence.is_some() {
            fields.push("confidence");
        }
        if self.class_id.is_some() {
            fields.push("class_id");
        }
        if self.track_id.is_some() {
            fields.push("track_id");
        }
        let mut keys: Vec<&str> = self.data.keys().map(String::as_str).collect();
        keys.sort_unstable();
        write!(
            f,
            "Detections(n={}, fields=[{}], data=[{}])",
            self.len(),
            fields.join(", "),
            keys.join(", ")
        )
    }
}

/// One row of a [`Detections`] set. Absent fields are `None`.
#[derive(Debug, Clone)]
pub struct Detection<'a> {
    /// Box `[x1, y1, x2, y2]`.
    pub xyxy: ArrayView1<'a, f32>,
    /// Instance mask `(H, W)`.
    pub mask: Option<ArrayView2<'a, bool>>,
    /// Confidence score.
    pub confidence: Option<f32>,
    /// Class ID.
    pub class_id: Option<i64>,
    /// Track ID.
    pub track_id: Option<i64>,
    /// Auxiliary columns restricted to this row (length one each).
    pub data: HashMap<String, ExtraColumn>,
}

/// Iterator over the rows of a [`Detections`] set.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    detections: &'a Detections,
    range: Range<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Detection<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.range.next()?;
        let d = self.detections;
        Some(Detection {
            xyxy: d.xyxy.row(i),
            mask: d.mask.as_ref().map(|m| m.index_axis(Axis(0), i)),
            confidence: d.confidence.as_ref().map(|c| c[i]),
            class_id: d.class_id.as_ref().map(|c| c[i]),
            track_id: d.track_id.as_ref().map(|t| t[i]),
            data: d.row_data(i),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Detections {
    type Item = Detection<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> Detections {
        Detections::new(array![
            [0.0, 0.0, 10.0, 10.0],
            [10.0, 20.0, 30.0, 40.0],
            [5.0, 5.0, 15.0, 25.0],
        ])
        .with_confidence(array![0.9, 0.8, 0.7])
        .with_class_id(array![0, 2, 1])
        .with_track_id(array![11, 12, 13])
        .with_data(
            "class_name",
            vec!["person".to_string(), "car".to_string(), "bike".to_string()],
        )
        .with_data("score2", array![1.0, 2.0, 3.0])
    }

    #[test]
    fn test_len_and_empty() {
        assert_eq!(sample().len(), 3);
        assert!(!sample().is_empty());
        assert!(Detections::empty().is_empty());
        assert_eq!(Detections::empty().len(), 0);
    }

    #[test]
    fn test_iter_yields_rows() {
        let detections = sample();
        let rows: Vec<_> = detections.iter().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].xyxy, array![10.0, 20.0, 30.0, 40.0]);
        assert_eq!(rows[1].class_id, Some(2));
        assert_eq!(rows[1].track_id, Some(12));
        assert!(rows[1].mask.is_none());
        assert_eq!(
            rows[1].data["class_name"],
            ExtraColumn::List(vec![ExtraValue::from("car")])
        );

        // restartable
        assert_eq!(detections.iter().count(), 3);
        assert_eq!(detections.iter().len(), 3);
    }

    #[test]
    fn test_iter_absent_fields() {
        let detections = Detections::new(array![[1.0, 2.0, 3.0, 4.0]]);
        let row = detections.iter().next().unwrap();
        assert!(row.confidence.is_none());
        assert!(row.class_id.is_none());
        assert!(row.track_id.is_none());
        assert!(row.data.is_empty());
    }

    #[test]
    fn test_subset_single_keeps_rows_aligned() {
        let detections = sample();
        for (i, original) in detections.iter().enumerate() {
            let single = detections.subset(i).unwrap();
            assert_eq!(single.len(), 1);
            let row = single.iter().next().unwrap();
            assert_eq!(row.xyxy, original.xyxy);
            assert_eq!(row.confidence, original.confidence);
            assert_eq!(row.class_id, original.class_id);
            assert_eq!(row.track_id, original.track_id);
            assert_eq!(row.data, original.data);
        }
    }

    #[test]
    fn test_subset_range_and_list() {
        let detections = sample();

        let head = detections.subset(1_usize..10).unwrap();
        assert_eq!(head.len(), 2);
        assert_eq!(head.class_id, Some(array![2, 1]));
        assert_eq!(
            head.field("class_name"),
            Some(&ExtraColumn::from(vec!["car".to_string(), "bike".to_string()]))
        );

        let picked = detections.subset(vec![2_usize, 0, 2]).unwrap();
        assert_eq!(picked.track_id, Some(array![13, 11, 13]));
        assert_eq!(
            picked.field("score2"),
            Some(&ExtraColumn::Array(array![3.0, 1.0, 3.0].into_dyn()))
        );

        #[allow(clippy::reversed_empty_ranges)]
        let empty = detections.subset(2_usize..1).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_subset_mask_on_array_fields() {
        let detections = sample().with_data("score2", array![1.0, 2.0, 3.0]);
        let mut no_list = detections.clone();
        no_list.data.remove("class_name");

        let kept = no_list.subset(vec![true, false, true]).unwrap();
        assert_eq!(kept.len(), 2);
        assert_eq!(kept.confidence, Some(array![0.9, 0.7]));
        assert_eq!(
            kept.field("score2"),
            Some(&ExtraColumn::Array(array![1.0, 3.0].into_dyn()))
        );
    }

    #[test]
    fn test_subset_mask_rejected_on_list_fields() {
        let err = sample().subset(vec![true, false, true]).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidArgument(_)));
    }

    #[test]
    fn test_subset_errors() {
        let detections = sample();
        assert!(matches!(
            detections.subset(3_usize),
            Err(AnalyzerError::OutOfBounds { index: 3, len: 3 })
        ));
        assert!(matches!(
            detections.subset(vec![0_usize, 7]),
            Err(AnalyzerError::OutOfBounds { index: 7, .. })
        ));
        assert!(matches!(
            detections.subset(vec![true]),
            Err(AnalyzerError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_field_lookup_is_unindexed() {
        let detections = sample();
        let column = detections.field("class_name").unwrap();
        assert_eq!(column.len(), 3);
        assert!(detections.field("missing").is_none());

        let sub = detections.subset(0_usize).unwrap();
        assert_eq!(detections.field("class_name").unwrap().len(), 3);
        assert_eq!(sub.field("class_name").unwrap().len(), 1);
    }

    #[test]
    fn test_anchor_coordinates() {
        let detections = sample().subset(1_usize).unwrap();
        assert_eq!(
            detections.anchor_coordinates(Position::TopLeft).unwrap(),
            array![[10.0, 20.0]]
        );
        assert_eq!(
            detections.anchor_coordinates(Position::BottomRight).unwrap(),
            array![[30.0, 40.0]]
        );
        assert_eq!(
            detections.anchor_coordinates(Position::Center).unwrap(),
            array![[20.0, 30.0]]
        );
    }

    #[test]
    fn test_center_of_mass_requires_mask() {
        let err = sample()
            .anchor_coordinates(Position::CenterOfMass)
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::MissingField(_)));

        let mut mask = Array3::from_elem((1, 4, 4), false);
        mask[[0, 1, 1]] = true;
        let detections = Detections::new(array![[0.0, 0.0, 4.0, 4.0]]).with_mask(mask);
        assert_eq!(
            detections
                .anchor_coordinates(Position::CenterOfMass)
                .unwrap(),
            array![[1.0, 1.0]]
        );
    }

    #[test]
    fn test_subset_masks() {
        let mut mask = Array3::from_elem((2, 2, 2), false);
        mask[[1, 0, 1]] = true;
        let detections =
            Detections::new(array![[0.0, 0.0, 1.0, 1.0], [0.0, 0.0, 2.0, 2.0]]).with_mask(mask);
        let second = detections.subset(1_usize).unwrap();
        let m = second.mask.unwrap();
        assert_eq!(m.shape(), &[1, 2, 2]);
        assert!(m[[0, 0, 1]]);
    }

    #[test]
    fn test_from_detector_and_tracker_output() {
        let rows = array![[1.0, 2.0, 3.0, 4.0, 0.5, 7.0]];
        let detections = Detections::from_detector_output(rows.view()).unwrap();
        assert_eq!(detections.xyxy, array![[1.0, 2.0, 3.0, 4.0]]);
        assert_eq!(detections.class_id, Some(array![7]));
        assert!(detections.track_id.is_none());

        let rows = array![[1.0, 2.0, 3.0, 4.0, 0.5, 7.0, 42.0]];
        let tracklets = Detections::from_tracker_output(rows.view()).unwrap();
        assert_eq!(tracklets.track_id, Some(array![42]));
        assert_eq!(tracklets.xyxy, array![[1.0, 2.0, 3.0, 4.0]]);
        assert_eq!(tracklets.confidence, Some(array![0.5]));

        assert!(Detections::from_detector_output(array![[1.0, 2.0]].view()).is_err());
        let six = rows.slice_axis(Axis(1), Slice::from(0..6_usize));
        assert!(Detections::from_tracker_output(six).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(sample().validate().is_ok());

        let bad = sample().with_confidence(array![0.1]);
        assert!(matches!(
            bad.validate(),
            Err(AnalyzerError::LengthMismatch { expected: 3, actual: 1, .. })
        ));

        let bad = sample().with_data("labels", vec!["a".to_string()]);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_area_and_display() {
        let detections = sample();
        assert_eq!(detections.area(), array![100.0, 400.0, 200.0]);
        assert_eq!(
            detections.to_string(),
            "Detections(n=3, fields=[xyxy, confidence, class_id, track_id], data=[class_name, score2])"
        );
    }

    #[test]
    fn test_display_row() {
        let detections = sample();
        assert_eq!(
            detections.field("class_name").unwrap().display_row(2),
            Some("bike".to_string())
        );
        assert_eq!(
            detections.field("score2").unwrap().display_row(1),
            Some("2".to_string())
        );
        assert_eq!(detections.field("score2").unwrap().display_row(9), None);
    }
}
