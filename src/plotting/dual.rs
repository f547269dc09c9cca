use std::borrow::Cow;
use std::ops::Range;
use crate::plotting::figure::{Column, Figure, LabelAnchor, Panel, Plot, Trace, TraceStyle};
use crate::plotting::signal::{SampleWindow, SignalMatrix};
use crate::plotting::style::{FigureSize, RenderConfig};
use crate::plotting::PlotError;
/// How panels inside one column are scaled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnScale {
    /// One y range for the whole column, from its global bounds.
    Shared,
    /// Each panel scaled on its own channel.
    PerChannel,
}
/// Time-domain column next to a frequency-domain column for the same channels.
#[derive(Clone, Debug)]
pub struct DualDomainPlot<'a> {
    time: &'a SignalMatrix,
    frequency: &'a SignalMatrix,
    window: Option<SampleWindow>,
    size: FigureSize,
    scale: ColumnScale,
    line_width: u32,
}
impl<'a> DualDomainPlot<'a> {
    /// ECG leads with their spectra; each column on one shared scale.
    pub fn ecg(time: &'a SignalMatrix, frequency: &'a SignalMatrix) -> Self {
        Self {
            time,
            frequency,
            window: None,
            size: FigureSize::new(12.0, 8.0),
            scale: ColumnScale::Shared,
            line_width: 2,
        }
    }
    /// Neurogram recordings: amplitudes differ too much between channels to share a scale.
    pub fn neurogram(time: &'a SignalMatrix, frequency: &'a SignalMatrix) -> Self {
        Self {
            size: FigureSize::new(14.0, 10.0),
            scale: ColumnScale::PerChannel,
            ..Self::ecg(time, frequency)
        }
    }
    /// Crops the time-domain matrix only; the spectrum is drawn whole.
    pub fn window(mut self, window: SampleWindow) -> Self {
        self.window = Some(window);
        self
    }
    pub fn size(mut self, size: FigureSize) -> Self {
        self.size = size;
        self
    }
    pub fn scale(mut self, scale: ColumnScale) -> Self {
        self.scale = scale;
        self
    }
}
impl Plot for DualDomainPlot<'_> {
    fn layout(&self, config: &RenderConfig) -> Result<Figure, PlotError> {
        let channels = self.time.num_channels();
        if self.frequency.num_channels() != channels {
            return Err(PlotError::ChannelMismatch {
                expected: channels,
                actual: self.frequency.num_channels(),
            });
        }
        let labels = self
            .time
            .labels()
            .or_else(|| self.frequency.labels())
            .ok_or(PlotError::LabelMismatch {
                expected: channels,
                actual: 0,
            })?;
        let time = match self.window {
            Some(window) => Cow::Owned(self.time.crop(window)?),
            None => Cow::Borrowed(self.time),
        };
        let label_anchor = match self.scale {
            ColumnScale::Shared => LabelAnchor::Inside {
                x_frac: 0.65,
                y_frac: 0.85,
            },
            ColumnScale::PerChannel => LabelAnchor::Inside {
                x_frac: 0.6,
                y_frac: 0.9,
            },
        };
        let time_column = domain_column(&time, self.scale, config, self.line_width, |_| None)?;
        let frequency_column = domain_column(
            self.frequency,
            self.scale,
            config,
            self.line_width,
            |idx| labels.get(idx).map(|l| (l.clone(), label_anchor)),
        )?;
        Ok(Figure::new(self.size)
            .with_column(time_column)
            .with_column(frequency_column))
    }
}
fn domain_column<F>(
    signals: &SignalMatrix,
    scale: ColumnScale,
    config: &RenderConfig,
    line_width: u32,
    label_for: F,
) -> Result<Column, PlotError>
where
    F: Fn(usize) -> Option<(String, LabelAnchor)>,
{
    let x_range = signals.x_range();
    let shared: Range<f64> = signals.bounds().to_range();
    let axis = signals.axis();
    let color = config.series_color(0);
    let mut panels = Vec::with_capacity(signals.num_channels());
    for idx in 0..signals.num_channels() {
        let y_range = match scale {
            ColumnScale::Shared => shared.clone(),
            ColumnScale::PerChannel => signals.channel_bounds(idx)?.to_range(),
        };
        let channel = signals.channel(idx)?;
        let mut panel = Panel::new(x_range.clone(), y_range).with_trace(Trace::new(
            axis.iter().copied(),
            channel.iter().copied(),
            color,
            TraceStyle::Line { width: line_width },
        ));
        if let Some((label, anchor)) = label_for(idx) {
            panel = panel.with_label(Some(label), anchor);
        }
        panels.push(panel);
    }
    Ok(Column::stacked(panels, signals.kind().description()))
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::signal::AxisKind;
    fn time_domain() -> SignalMatrix {
        SignalMatrix::from_channels(
            AxisKind::Time,
            vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5],
            vec![
                vec![0.0, 1.0, 0.0, -1.0, 0.0, 1.0],
                vec![0.0, 2.0, 0.0, -2.0, 0.0, 2.0],
            ],
        )
        .unwrap()
        .with_labels(["I", "II"])
        .unwrap()
    }
    fn frequency_domain() -> SignalMatrix {
        SignalMatrix::from_channels(
            AxisKind::Frequency,
            vec![0.0, 1.0, 2.0],
            vec![vec![0.0, 50.0, 5.0], vec![0.0, 100.0, 10.0]],
        )
        .unwrap()
    }
    #[test]
    fn columns_are_index_aligned_and_scaled_independently() {
        let (t, f) = (time_domain(), frequency_domain());
        let figure = DualDomainPlot::ecg(&t, &f)
            .layout(&RenderConfig::default())
            .unwrap();
        assert_eq!(figure.columns.len(), 2);
        let (left, right) = (&figure.columns[0], &figure.columns[1]);
        assert_eq!(left.panels.len(), 2);
        assert_eq!(right.panels.len(), 2);
        assert!(left.panels.iter().all(|p| p.y_range == (-2.0..2.0)));
        assert!(right.panels.iter().all(|p| p.y_range == (0.0..100.0)));
        assert_eq!(right.panels[1].label.as_deref(), Some("II"));
        assert_eq!(left.panels[1].x_desc.as_deref(), Some("Time (sec)"));
        assert_eq!(right.panels[1].x_desc.as_deref(), Some("Frequency (Hz)"));
    }
    #[test]
    fn time_window_sets_exact_x_range() {
        let (t, f) = (time_domain(), frequency_domain());
        let figure = DualDomainPlot::ecg(&t, &f)
            .window(SampleWindow::new(2, 5))
            .layout(&RenderConfig::default())
            .unwrap();
        assert!(figure.columns[0].panels.iter().all(|p| p.x_range == (0.2..0.4)));
        assert!(figure.columns[1].panels.iter().all(|p| p.x_range == (0.0..2.0)));
    }
    #[test]
    fn neurogram_scales_each_panel() {
        let (t, f) = (time_domain(), frequency_domain());
        let figure = DualDomainPlot::neurogram(&t, &f)
            .layout(&RenderConfig::default())
            .unwrap();
        assert_eq!(figure.columns[1].panels[0].y_range, 0.0..50.0);
        assert_eq!(figure.columns[1].panels[1].y_range, 0.0..100.0);
        assert_eq!(figure.columns[0].panels[0].y_range, -1.0..1.0);
    }
    #[test]
    fn channel_counts_must_agree() {
        let t = time_domain();
        let f = frequency_domain().select_channel(0).unwrap();
        let err = DualDomainPlot::ecg(&t, &f)
            .layout(&RenderConfig::default())
            .unwrap_err();
        assert!(matches!(err, PlotError::ChannelMismatch { expected: 2, actual: 1 }));
    }
}
