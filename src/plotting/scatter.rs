use crate::plotting::figure::{Column, Decoration, Figure, Panel, Plot, Trace, TraceStyle};
use crate::plotting::signal::{SampleWindow, YBounds};
use crate::plotting::style::{FigureSize, RenderConfig};
use crate::plotting::PlotError;
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScatterMode {
    Line,
    Points,
}
/// Indices of `indices` that fall inside `window`, re-based to the window start.
pub fn crop_highlights(indices: &[usize], window: SampleWindow) -> Vec<usize> {
    indices
        .iter()
        .filter(|&&i| window.contains(i))
        .map(|&i| i - window.start)
        .collect()
}
/// A 2-D curve or point cloud with an optional highlighted subset.
#[derive(Clone, Debug)]
pub struct ScatterPlot<'a> {
    x: &'a [f64],
    y: &'a [f64],
    highlights: &'a [usize],
    mode: ScatterMode,
    title: Option<String>,
    x_label: String,
    y_label: String,
    window: Option<SampleWindow>,
    size: FigureSize,
}
impl<'a> ScatterPlot<'a> {
    /// Plain point cloud, e.g. two principal components against each other.
    pub fn points(x: &'a [f64], y: &'a [f64]) -> Self {
        Self {
            x,
            y,
            highlights: &[],
            mode: ScatterMode::Points,
            title: None,
            x_label: String::new(),
            y_label: String::new(),
            window: None,
            size: FigureSize::new(6.4, 4.8),
        }
    }
    /// Curve with its detected maxima marked.
    pub fn maxima(x: &'a [f64], y: &'a [f64], maxima: &'a [usize]) -> Self {
        Self {
            highlights: maxima,
            mode: ScatterMode::Line,
            ..Self::points(x, y)
        }
    }
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
    pub fn axis_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }
    /// Restricts both coordinates and the highlights to `[start, end)`.
    pub fn window(mut self, window: SampleWindow) -> Self {
        self.window = Some(window);
        self
    }
    pub fn size(mut self, size: FigureSize) -> Self {
        self.size = size;
        self
    }
}
impl Plot for ScatterPlot<'_> {
    fn layout(&self, config: &RenderConfig) -> Result<Figure, PlotError> {
        let len = self.x.len();
        if len == 0 {
            return Err(PlotError::EmptySignal);
        }
        if self.y.len() != len {
            return Err(PlotError::LengthMismatch {
                what: "coordinate",
                expected: len,
                actual: self.y.len(),
            });
        }
        if let Some(&bad) = self.highlights.iter().find(|&&i| i >= len) {
            return Err(PlotError::IndexOutOfRange { index: bad, len });
        }
        let window = self.window.unwrap_or(SampleWindow::new(0, len));
        window.validate(len)?;
        let xs = &self.x[window.start..window.end];
        let ys = &self.y[window.start..window.end];
        let highlights = crop_highlights(self.highlights, window);
        let style = match self.mode {
            ScatterMode::Line => TraceStyle::Line { width: 2 },
            ScatterMode::Points => TraceStyle::Points { radius: 2 },
        };
        let mut panel = Panel::new(
            YBounds::of(xs.iter().copied()).to_range(),
            YBounds::of(ys.iter().copied()).to_range(),
        )
        .with_trace(Trace::new(
            xs.iter().copied(),
            ys.iter().copied(),
            config.series_color(0),
            style,
        ))
        .with_decoration(Decoration::Full);
        panel.markers = highlights.iter().map(|&i| (xs[i], ys[i])).collect();
        panel.x_desc = Some(self.x_label.clone()).filter(|s| !s.is_empty());
        panel.y_desc = Some(self.y_label.clone()).filter(|s| !s.is_empty());
        let column = Column {
            panels: vec![panel],
            ..Column::default()
        };
        let mut figure = Figure::new(self.size).with_column(column);
        figure.title = self.title.clone();
        Ok(figure)
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn highlights_are_filtered_and_rebased() {
        let window = SampleWindow::new(10, 20);
        assert_eq!(crop_highlights(&[3, 10, 15, 19, 20, 42], window), vec![0, 5, 9]);
    }
    #[test]
    fn maxima_follow_the_crop() {
        let x: Vec<f64> = (0..10).map(f64::from).collect();
        let y = vec![0.0, 3.0, 0.0, 5.0, 0.0, 1.0, 0.0, 9.0, 0.0, 0.0];
        let maxima = [1, 3, 5, 7];
        let figure = ScatterPlot::maxima(&x, &y, &maxima)
            .axis_labels("Time (sec)", "Amplitude")
            .window(SampleWindow::new(2, 7))
            .layout(&RenderConfig::default())
            .unwrap();
        let panel = figure.panels().next().unwrap();
        assert_eq!(panel.markers, vec![(3.0, 5.0), (5.0, 1.0)]);
        assert_eq!(panel.x_range, 2.0..6.0);
        assert_eq!(panel.traces[0].points.len(), 5);
        assert_eq!(panel.decoration, Decoration::Full);
        assert_eq!(panel.y_desc.as_deref(), Some("Amplitude"));
    }
    #[test]
    fn points_keep_title_and_style() {
        let x = [1.0, 2.0, 3.0];
        let y = [3.0, 1.0, 2.0];
        let figure = ScatterPlot::points(&x, &y)
            .title("PC1 vs PC2")
            .layout(&RenderConfig::default())
            .unwrap();
        assert_eq!(figure.title.as_deref(), Some("PC1 vs PC2"));
        let panel = figure.panels().next().unwrap();
        assert!(panel.markers.is_empty());
        assert_eq!(panel.traces[0].style, TraceStyle::Points { radius: 2 });
        assert!(panel.x_desc.is_none());
    }
    #[test]
    fn mismatched_coordinates_are_rejected() {
        let err = ScatterPlot::points(&[1.0, 2.0], &[1.0])
            .layout(&RenderConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            PlotError::LengthMismatch {
                expected: 2,
                actual: 1,
                ..
            }
        ));
        let err = ScatterPlot::maxima(&[1.0, 2.0], &[1.0, 2.0], &[2])
            .layout(&RenderConfig::default())
            .unwrap_err();
        assert!(matches!(err, PlotError::IndexOutOfRange { index: 2, len: 2 }));
    }
}
