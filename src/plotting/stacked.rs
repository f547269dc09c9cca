use std::borrow::Cow;
use crate::plotting::figure::{Column, Figure, LabelAnchor, Panel, Plot, Trace, TraceStyle};
use crate::plotting::signal::{SampleWindow, SignalMatrix};
use crate::plotting::style::{FigureSize, RenderConfig};
use crate::plotting::PlotError;
pub const ECG_AMPLITUDE_LABEL: &str = "Amplitude (mv)";
/// One panel per channel, stacked on a shared x axis and a shared y scale.
#[derive(Clone, Debug)]
pub struct StackedPlot<'a> {
    signals: &'a SignalMatrix,
    window: Option<SampleWindow>,
    size: FigureSize,
    line_width: u32,
    require_labels: bool,
    frame_label: Option<String>,
}
impl<'a> StackedPlot<'a> {
    pub fn new(signals: &'a SignalMatrix) -> Self {
        Self {
            signals,
            window: None,
            size: FigureSize::new(12.0, 8.0),
            line_width: 1,
            require_labels: true,
            frame_label: None,
        }
    }
    /// EEG montage: one-pixel lines, one label per electrode.
    pub fn eeg(signals: &'a SignalMatrix) -> Self {
        Self::new(signals)
    }
    /// ECG leads: two-pixel lines, amplitude label on the background frame,
    /// channel labels drawn only when the matrix carries them.
    pub fn ecg(signals: &'a SignalMatrix) -> Self {
        Self {
            size: FigureSize::new(12.0, 4.0),
            line_width: 2,
            require_labels: false,
            frame_label: Some(ECG_AMPLITUDE_LABEL.to_owned()),
            ..Self::new(signals)
        }
    }
    pub fn window(mut self, window: SampleWindow) -> Self {
        self.window = Some(window);
        self
    }
    pub fn size(mut self, size: FigureSize) -> Self {
        self.size = size;
        self
    }
    pub fn line_width(mut self, width: u32) -> Self {
        self.line_width = width.max(1);
        self
    }
    /// Draws the panels without channel labels.
    pub fn without_labels(mut self) -> Self {
        self.require_labels = false;
        self
    }
    pub fn frame_label(mut self, label: impl Into<String>) -> Self {
        self.frame_label = Some(label.into());
        self
    }
}
impl Plot for StackedPlot<'_> {
    fn layout(&self, config: &RenderConfig) -> Result<Figure, PlotError> {
        if self.require_labels && self.signals.labels().is_none() {
            return Err(PlotError::LabelMismatch {
                expected: self.signals.num_channels(),
                actual: 0,
            });
        }
        let signals = match self.window {
            Some(window) => Cow::Owned(self.signals.crop(window)?),
            None => Cow::Borrowed(self.signals),
        };
        let column = stacked_column(&signals, config, self.line_width)?;
        let column = match &self.frame_label {
            Some(label) => column.with_frame_label(label.clone()),
            None => column,
        };
        log::debug!(
            "stacked layout: {} channels x {} samples",
            signals.num_channels(),
            signals.num_samples()
        );
        Ok(Figure::new(self.size).with_column(column))
    }
}
/// Panels for every channel of `signals` scaled on the global bounds, labels on the left.
pub(crate) fn stacked_column(
    signals: &SignalMatrix,
    config: &RenderConfig,
    line_width: u32,
) -> Result<Column, PlotError> {
    let x_range = signals.x_range();
    let y_range = signals.bounds().to_range();
    let axis = signals.axis();
    let color = config.series_color(0);
    let panels = (0..signals.num_channels())
        .map(|idx| {
            let channel = signals.channel(idx)?;
            Ok(Panel::new(x_range.clone(), y_range.clone())
                .with_trace(Trace::new(
                    axis.iter().copied(),
                    channel.iter().copied(),
                    color,
                    TraceStyle::Line { width: line_width },
                ))
                .with_label(signals.label(idx).map(str::to_owned), LabelAnchor::Left))
        })
        .collect::<Result<Vec<_>, PlotError>>()?;
    Ok(Column::stacked(panels, signals.kind().description()))
}
