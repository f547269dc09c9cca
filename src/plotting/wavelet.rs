use crate::plotting::figure::{Column, Decoration, Figure, LabelAnchor, Panel, Plot, Trace, TraceStyle};
use crate::plotting::signal::{spanned_range, YBounds};
use crate::plotting::style::{FigureSize, RenderConfig, Rgb};
use crate::plotting::PlotError;
/// Discrete wavelet decomposition: original signal on top, coarsest approximation
/// on the left, every detail level on the right.
#[derive(Clone, Debug)]
pub struct WaveletPlot<'a> {
    signal: &'a [f64],
    approximations: &'a [Vec<f64>],
    details: &'a [Vec<f64>],
    size: FigureSize,
}
impl<'a> WaveletPlot<'a> {
    /// Levels are ordered finest first, so lengths decrease.
    pub fn new(signal: &'a [f64], approximations: &'a [Vec<f64>], details: &'a [Vec<f64>]) -> Self {
        Self {
            signal,
            approximations,
            details,
            size: FigureSize::new(20.0, 10.0),
        }
    }
    pub fn size(mut self, size: FigureSize) -> Self {
        self.size = size;
        self
    }
}
fn index_panel(values: &[f64], color: Rgb) -> Panel {
    let last = values.len().saturating_sub(1) as f64;
    Panel::new(
        spanned_range(0.0, last),
        YBounds::of(values.iter().copied()).to_range(),
    )
    .with_trace(Trace::new(
        (0..values.len()).map(|i| i as f64),
        values.iter().copied(),
        color,
        TraceStyle::Line { width: 1 },
    ))
}
impl Plot for WaveletPlot<'_> {
    fn layout(&self, config: &RenderConfig) -> Result<Figure, PlotError> {
        if self.signal.is_empty() {
            return Err(PlotError::EmptySignal);
        }
        let levels = self.approximations.len();
        if self.details.len() != levels {
            return Err(PlotError::LengthMismatch {
                what: "decomposition level",
                expected: levels,
                actual: self.details.len(),
            });
        }
        let coarsest = match self.approximations.last() {
            Some(level) if !level.is_empty() => level,
            _ => return Err(PlotError::EmptySignal),
        };
        if self.details.iter().any(Vec::is_empty) {
            return Err(PlotError::EmptySignal);
        }
        let header = index_panel(self.signal, config.series_color(0));
        let approximation = index_panel(coarsest, Rgb::TEAL)
            .with_label(Some(format!("A{levels}")), LabelAnchor::Left)
            .with_decoration(Decoration::XAxis);
        let details = self
            .details
            .iter()
            .enumerate()
            .map(|(i, level)| {
                let decoration = if i + 1 == levels {
                    Decoration::XAxis
                } else {
                    Decoration::Hidden
                };
                index_panel(level, Rgb::CRIMSON)
                    .with_label(Some(format!("D{}", i + 1)), LabelAnchor::Left)
                    .with_decoration(decoration)
            })
            .collect();
        let mut figure = Figure::new(self.size)
            .with_column(Column {
                panels: vec![approximation],
                leading_gaps: levels - 1,
                frame_label: None,
            })
            .with_column(Column {
                panels: details,
                ..Column::default()
            });
        figure.header = Some(header);
        log::debug!("wavelet layout: {levels} levels over {} samples", self.signal.len());
        Ok(figure)
    }
}
