use std::ops::Range;
use ndarray::{s, Array1, Array2, ArrayView1, Axis};
use crate::plotting::PlotError;
/// Smallest height (or width) an axis range may collapse to. Flat signals are
/// centred inside a range of this span.
pub const MIN_AXIS_SPAN: f64 = 1.0;
/// What the shared axis vector measures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisKind {
    Time,
    Frequency,
}
impl AxisKind {
    pub fn description(self) -> &'static str {
        match self {
            AxisKind::Time => "Time (sec)",
            AxisKind::Frequency => "Frequency (Hz)",
        }
    }
}
/// Half-open sample range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleWindow {
    pub start: usize,
    pub end: usize,
}
impl SampleWindow {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
    /// Window of `half_width` samples on each side of `center`, clamped to `[0, len)`.
    pub fn around(center: usize, half_width: usize, len: usize) -> Self {
        Self {
            start: center.saturating_sub(half_width),
            end: center.saturating_add(half_width).min(len),
        }
    }
    pub fn validate(&self, len: usize) -> Result<(), PlotError> {
        if self.start >= self.end || self.end > len {
            return Err(PlotError::InvalidWindow {
                start: self.start,
                end: self.end,
                len,
            });
        }
        Ok(())
    }
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}
/// Lower and upper bound of the finite values of one or more channels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YBounds {
    pub min: f64,
    pub max: f64,
}
impl YBounds {
    /// `None` when no value is finite.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some(YBounds { min: v, max: v }),
                Some(b) => Some(YBounds {
                    min: b.min.min(v),
                    max: b.max.max(v),
                }),
            })
    }
    /// Same as [`YBounds::from_values`] but falls back to a range around zero.
    pub fn of<I: IntoIterator<Item = f64>>(values: I) -> Self {
        Self::from_values(values).unwrap_or(YBounds { min: 0.0, max: 0.0 })
    }
    pub fn to_range(self) -> Range<f64> {
        spanned_range(self.min, self.max)
    }
}
/// `min..max`, widened to [`MIN_AXIS_SPAN`] around the midpoint when the two collapse.
pub fn spanned_range(min: f64, max: f64) -> Range<f64> {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    if hi - lo < f64::EPSILON {
        let mid = (lo + hi) / 2.0;
        return (mid - MIN_AXIS_SPAN / 2.0)..(mid + MIN_AXIS_SPAN / 2.0);
    }
    lo..hi
}
/// Channels aligned on an explicit axis vector. One row per channel.
#[derive(Clone, Debug)]
pub struct SignalMatrix {
    kind: AxisKind,
    axis: Array1<f64>,
    channels: Array2<f64>,
    labels: Option<Vec<String>>,
}
impl SignalMatrix {
    pub fn new(kind: AxisKind, axis: Array1<f64>, channels: Array2<f64>) -> Result<Self, PlotError> {
        if axis.is_empty() || channels.nrows() == 0 {
            return Err(PlotError::EmptySignal);
        }
        if channels.ncols() != axis.len() {
            return Err(PlotError::LengthMismatch {
                what: "channel",
                expected: axis.len(),
                actual: channels.ncols(),
            });
        }
        Ok(Self {
            kind,
            axis,
            channels,
            labels: None,
        })
    }
    /// Builds a matrix from plain vectors; every channel must match the axis length.
    pub fn from_channels(
        kind: AxisKind,
        axis: Vec<f64>,
        channels: Vec<Vec<f64>>,
    ) -> Result<Self, PlotError> {
        let samples = axis.len();
        if samples == 0 || channels.is_empty() {
            return Err(PlotError::EmptySignal);
        }
        if let Some(bad) = channels.iter().find(|c| c.len() != samples) {
            return Err(PlotError::LengthMismatch {
                what: "channel",
                expected: samples,
                actual: bad.len(),
            });
        }
        let rows = channels.len();
        let flat: Vec<f64> = channels.into_iter().flatten().collect();
        let channels = Array2::from_shape_vec((rows, samples), flat)
            .map_err(|e| PlotError::Render(e.to_string()))?;
        Self::new(kind, Array1::from(axis), channels)
    }
    /// Splits the coursework layout where row 0 holds the axis and rows 1.. the channels.
    pub fn from_axis_rows(kind: AxisKind, rows: Array2<f64>) -> Result<Self, PlotError> {
        if rows.nrows() < 2 {
            return Err(PlotError::EmptySignal);
        }
        let axis = rows.row(0).to_owned();
        let channels = rows.slice(s![1.., ..]).to_owned();
        Self::new(kind, axis, channels)
    }
    pub fn with_labels<S: Into<String>>(
        mut self,
        labels: impl IntoIterator<Item = S>,
    ) -> Result<Self, PlotError> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() != self.num_channels() {
            return Err(PlotError::LabelMismatch {
                expected: self.num_channels(),
                actual: labels.len(),
            });
        }
        self.labels = Some(labels);
        Ok(self)
    }
    pub fn kind(&self) -> AxisKind {
        self.kind
    }
    pub fn axis(&self) -> ArrayView1<'_, f64> {
        self.axis.view()
    }
    pub fn channels(&self) -> &Array2<f64> {
        &self.channels
    }
    pub fn channel(&self, index: usize) -> Result<ArrayView1<'_, f64>, PlotError> {
        if index >= self.num_channels() {
            return Err(PlotError::IndexOutOfRange {
                index,
                len: self.num_channels(),
            });
        }
        Ok(self.channels.row(index))
    }
    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels
            .as_ref()
            .and_then(|l| l.get(index))
            .map(String::as_str)
    }
    pub fn num_channels(&self) -> usize {
        self.channels.nrows()
    }
    pub fn num_samples(&self) -> usize {
        self.axis.len()
    }
    /// Keeps the samples in `window` for the axis and every channel.
    pub fn crop(&self, window: SampleWindow) -> Result<Self, PlotError> {
        window.validate(self.num_samples())?;
        Ok(Self {
            kind: self.kind,
            axis: self.axis.slice(s![window.start..window.end]).to_owned(),
            channels: self
                .channels
                .slice(s![.., window.start..window.end])
                .to_owned(),
            labels: self.labels.clone(),
        })
    }
    /// A one-channel matrix holding channel `index` and its label.
    pub fn select_channel(&self, index: usize) -> Result<Self, PlotError> {
        let row = self.channel(index)?.to_owned();
        Ok(Self {
            kind: self.kind,
            axis: self.axis.clone(),
            channels: row.insert_axis(Axis(0)),
            labels: self
                .label(index)
                .map(|l| vec![l.to_owned()]),
        })
    }
    /// Global bounds over every channel; the axis is never included.
    pub fn bounds(&self) -> YBounds {
        YBounds::of(self.channels.iter().copied())
    }
    pub fn channel_bounds(&self, index: usize) -> Result<YBounds, PlotError> {
        Ok(YBounds::of(self.channel(index)?.iter().copied()))
    }
    /// `[axis.first, axis.last]`.
    pub fn x_range(&self) -> Range<f64> {
        let first = self.axis[0];
        let last = self.axis[self.axis.len() - 1];
        spanned_range(first, last)
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    fn three_channels() -> SignalMatrix {
        SignalMatrix::from_axis_rows(
            AxisKind::Time,
            array![
                [0.0, 0.1, 0.2, 0.3],
                [1.0, 2.0, 3.0, 4.0],
                [-5.0, 0.0, 0.0, 0.0],
                [0.0, 9.0, 0.0, 0.0]
            ],
        )
        .unwrap()
    }
    #[test]
    fn axis_row_is_split_from_channels() {
        let m = three_channels();
        assert_eq!(m.num_channels(), 3);
        assert_eq!(m.num_samples(), 4);
        assert_eq!(m.axis().to_vec(), vec![0.0, 0.1, 0.2, 0.3]);
        assert_eq!(m.channel(0).unwrap().to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
    }
    #[test]
    fn bounds_ignore_axis_and_nan() {
        let mut m = three_channels();
        m.channels[[0, 0]] = f64::NAN;
        let b = m.bounds();
        assert_eq!(b, YBounds { min: -5.0, max: 9.0 });
    }
    #[test]
    fn label_count_must_match_channels() {
        let err = three_channels().with_labels(["Fp1", "Fp2"]).unwrap_err();
        assert!(matches!(
            err,
            PlotError::LabelMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }
    #[test]
    fn ragged_channels_are_rejected() {
        let err = SignalMatrix::from_channels(
            AxisKind::Time,
            vec![0.0, 1.0, 2.0],
            vec![vec![1.0, 2.0, 3.0], vec![1.0, 2.0]],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PlotError::LengthMismatch {
                expected: 3,
                actual: 2,
                ..
            }
        ));
    }
    #[test]
    fn crop_keeps_half_open_window() {
        let m = three_channels().crop(SampleWindow::new(1, 3)).unwrap();
        assert_eq!(m.axis().to_vec(), vec![0.1, 0.2]);
        assert_eq!(m.x_range(), 0.1..0.2);
        assert!(three_channels().crop(SampleWindow::new(2, 2)).is_err());
        assert!(three_channels().crop(SampleWindow::new(0, 5)).is_err());
    }
    #[test]
    fn flat_range_gets_minimum_span() {
        assert_eq!(spanned_range(2.0, 2.0), 1.5..2.5);
        assert_eq!(YBounds::of([f64::NAN]).to_range(), -0.5..0.5);
    }
    #[test]
    fn window_around_is_clamped() {
        assert_eq!(SampleWindow::around(10, 6000, 20_000), SampleWindow::new(0, 6010));
        assert_eq!(SampleWindow::around(19_000, 6000, 20_000), SampleWindow::new(13_000, 20_000));
    }
}
