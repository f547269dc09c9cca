use std::path::PathBuf;
use crate::plotting::figure::{Column, Decoration, Figure, Panel, Plot, Trace, TraceStyle};
use crate::plotting::signal::{spanned_range, AxisKind, SampleWindow, YBounds};
use crate::plotting::sink::{Output, Renderer};
use crate::plotting::style::{FigureSize, RenderConfig};
use crate::plotting::PlotError;
/// Samples kept on each side of an event boundary.
pub const EVENT_HALF_WIDTH: usize = 6000;
/// Indices `i` where `track[i - 1]` and `track[i]` are both defined (not NaN)
/// and differ.
pub fn detect_boundaries(track: &[f64]) -> Vec<usize> {
    track
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| !pair[0].is_nan() && !pair[1].is_nan() && pair[0] != pair[1])
        .map(|(i, _)| i + 1)
        .collect()
}
/// Signal above, target track below, on a shared time axis.
#[derive(Clone, Debug)]
pub struct SignalTargetPlot<'a> {
    axis: &'a [f64],
    signal: &'a [f64],
    target: &'a [f64],
    window: SampleWindow,
    title: Option<String>,
    size: FigureSize,
}
impl<'a> SignalTargetPlot<'a> {
    pub fn new(axis: &'a [f64], signal: &'a [f64], target: &'a [f64]) -> Result<Self, PlotError> {
        let len = axis.len();
        if len == 0 {
            return Err(PlotError::EmptySignal);
        }
        for (what, other) in [("signal", signal.len()), ("target", target.len())] {
            if other != len {
                return Err(PlotError::LengthMismatch {
                    what,
                    expected: len,
                    actual: other,
                });
            }
        }
        Ok(Self {
            axis,
            signal,
            target,
            window: SampleWindow::new(0, len),
            title: None,
            size: FigureSize::new(12.0, 6.0),
        })
    }
    pub fn window(mut self, window: SampleWindow) -> Self {
        self.window = window;
        self
    }
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
    pub fn size(mut self, size: FigureSize) -> Self {
        self.size = size;
        self
    }
}
impl Plot for SignalTargetPlot<'_> {
    fn layout(&self, config: &RenderConfig) -> Result<Figure, PlotError> {
        let window = self.window;
        window.validate(self.axis.len())?;
        let axis = &self.axis[window.start..window.end];
        let signal = &self.signal[window.start..window.end];
        let target = &self.target[window.start..window.end];
        let x_range = spanned_range(axis[0], axis[axis.len() - 1]);
        let mut top = Panel::new(x_range.clone(), YBounds::of(signal.iter().copied()).to_range())
            .with_trace(Trace::new(
                axis.iter().copied(),
                signal.iter().copied(),
                config.series_color(0),
                TraceStyle::Line { width: 1 },
            ))
            .with_decoration(Decoration::YAxis);
        top.y_desc = Some("Signal".to_owned());
        let mut bottom = Panel::new(x_range, YBounds::of(target.iter().copied()).to_range())
            .with_trace(Trace::new(
                axis.iter().copied(),
                target.iter().copied(),
                config.series_color(1),
                TraceStyle::Line { width: 2 },
            ))
            .with_decoration(Decoration::Full);
        bottom.x_desc = Some(AxisKind::Time.description().to_owned());
        bottom.y_desc = Some("Target".to_owned());
        let mut figure = Figure::new(self.size).with_column(Column {
            panels: vec![top, bottom],
            ..Column::default()
        });
        figure.title = self.title.clone();
        Ok(figure)
    }
}
/// Cuts one [`SignalTargetPlot`] per label transition of the target track.
#[derive(Clone, Debug)]
pub struct EventWindowPlot<'a> {
    base: SignalTargetPlot<'a>,
    half_width: usize,
}
impl<'a> EventWindowPlot<'a> {
    pub fn new(axis: &'a [f64], signal: &'a [f64], target: &'a [f64]) -> Result<Self, PlotError> {
        Ok(Self {
            base: SignalTargetPlot::new(axis, signal, target)?,
            half_width: EVENT_HALF_WIDTH,
        })
    }
    /// Samples kept on each side of a boundary. At least one, so every window
    /// holds the boundary sample itself.
    pub fn half_width(mut self, samples: usize) -> Self {
        self.half_width = samples.max(1);
        self
    }
    pub fn size(mut self, size: FigureSize) -> Self {
        self.base = self.base.size(size);
        self
    }
    pub fn boundaries(&self) -> Vec<usize> {
        detect_boundaries(self.base.target)
    }
    /// Window around `boundary`, clamped to the track.
    pub fn window_for(&self, boundary: usize) -> SampleWindow {
        SampleWindow::around(boundary, self.half_width, self.base.axis.len())
    }
    pub fn event(&self, boundary: usize) -> SignalTargetPlot<'a> {
        self.base
            .clone()
            .window(self.window_for(boundary))
            .title(format!("Event at sample {boundary}"))
    }
    /// Renders every event to `path_for(boundary)`. The first failure aborts the
    /// batch; files already written are kept.
    pub fn render_each<F>(
        &self,
        renderer: &Renderer,
        path_for: F,
        show: bool,
    ) -> Result<Vec<PathBuf>, PlotError>
    where
        F: Fn(usize) -> PathBuf,
    {
        let boundaries = self.boundaries();
        if boundaries.is_empty() {
            log::warn!("no label transition found; no event figure written");
        }
        let mut written = Vec::with_capacity(boundaries.len());
        for boundary in boundaries {
            let path = path_for(boundary);
            renderer.draw(&self.event(boundary), &Output::file(&path).show(show))?;
            written.push(path);
        }
        Ok(written)
    }
}
