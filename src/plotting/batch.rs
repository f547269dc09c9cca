//! Batch loops writing to the fixed figure layout under a base directory.
use std::path::{Path, PathBuf};
use crate::plotting::dual::DualDomainPlot;
use crate::plotting::events::{EventWindowPlot, SignalTargetPlot};
use crate::plotting::paths;
use crate::plotting::signal::{AxisKind, SignalMatrix};
use crate::plotting::sink::{Output, Renderer};
use crate::plotting::spectrum::SpectrumBuilder;
use crate::plotting::stacked::StackedPlot;
use crate::plotting::PlotError;
/// One dual-domain figure per channel, each with that channel alone.
pub fn plot_channel_spectra(
    renderer: &Renderer,
    signals: &SignalMatrix,
    spectrum: &SpectrumBuilder,
    base: &Path,
    show: bool,
) -> Result<Vec<PathBuf>, PlotError> {
    let mut written = Vec::with_capacity(signals.num_channels());
    for idx in 0..signals.num_channels() {
        let time = signals.select_channel(idx)?;
        let time = match time.labels() {
            Some(_) => time,
            None => time.with_labels([format!("Channel {idx}")])?,
        };
        let frequency = spectrum.compute(&time)?;
        let path = paths::channel_spectrum(base, idx);
        renderer.draw(
            &DualDomainPlot::ecg(&time, &frequency),
            &Output::file(&path).show(show),
        )?;
        written.push(path);
    }
    Ok(written)
}
/// Stacks channel `channel` of several spectra (raw, filtered, ...) sharing one
/// frequency axis. Each entry is `(name, spectrum)`; names become panel labels.
pub fn plot_spectrum_comparison(
    renderer: &Renderer,
    spectra: &[(&str, &SignalMatrix)],
    channel: usize,
    base: &Path,
    show: bool,
) -> Result<PathBuf, PlotError> {
    let (_, first) = spectra.first().ok_or(PlotError::EmptySignal)?;
    let rows = spectra
        .iter()
        .map(|(_, s)| s.channel(channel).map(|c| c.to_vec()))
        .collect::<Result<Vec<_>, PlotError>>()?;
    let comparison = SignalMatrix::from_channels(AxisKind::Frequency, first.axis().to_vec(), rows)?
        .with_labels(spectra.iter().map(|(name, _)| *name))?;
    let label = first
        .label(channel)
        .map(str::to_owned)
        .unwrap_or_else(|| channel.to_string());
    paths::check_file_label(&label)?;
    let path = paths::spectrum_comparison(base, &label);
    renderer.draw(&StackedPlot::new(&comparison), &Output::file(&path).show(show))?;
    Ok(path)
}
/// Whole-recording signal and target figure named after the recording. The
/// label must be usable as part of a file name.
pub fn plot_target_overview(
    renderer: &Renderer,
    label: &str,
    axis: &[f64],
    signal: &[f64],
    target: &[f64],
    base: &Path,
    show: bool,
) -> Result<PathBuf, PlotError> {
    paths::check_file_label(label)?;
    let plot = SignalTargetPlot::new(axis, signal, target)?.title(label);
    let path = paths::target_overview(base, label);
    renderer.draw(&plot, &Output::file(&path).show(show))?;
    Ok(path)
}
/// One figure per target transition, named by the boundary sample.
pub fn plot_event_windows(
    renderer: &Renderer,
    axis: &[f64],
    signal: &[f64],
    target: &[f64],
    base: &Path,
    show: bool,
) -> Result<Vec<PathBuf>, PlotError> {
    EventWindowPlot::new(axis, signal, target)?.render_each(
        renderer,
        |boundary| paths::event_window(base, boundary),
        show,
    )
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::style::RenderConfig;
    fn small_renderer() -> Renderer {
        Renderer::new(RenderConfig {
            dpi: 30,
            font_size: 8,
            tick_label_size: 8,
            ..RenderConfig::default()
        })
        .unwrap()
    }
    fn two_sines() -> SignalMatrix {
        let axis: Vec<f64> = (0..64).map(|i| i as f64 / 64.0).collect();
        let channels: Vec<Vec<f64>> = [4.0, 9.0]
            .iter()
            .map(|f| {
                axis.iter()
                    .map(|t| (std::f64::consts::TAU * f * t).sin())
                    .collect::<Vec<f64>>()
            })
            .collect();
        SignalMatrix::from_channels(AxisKind::Time, axis, channels).unwrap()
    }
    #[test]
    fn every_channel_gets_a_spectrum_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let written = plot_channel_spectra(
            &small_renderer(),
            &two_sines(),
            &SpectrumBuilder::new(),
            dir.path(),
            false,
        )
        .unwrap();
        assert_eq!(
            written,
            vec![
                dir.path().join("frequential/signal_freq_0.png"),
                dir.path().join("frequential/signal_freq_1.png"),
            ]
        );
        assert!(written.iter().all(|p| p.exists()));
    }
    #[test]
    fn comparison_is_named_after_the_channel_label() {
        let dir = tempfile::tempdir().expect("tempdir");
        let raw = two_sines().with_labels(["Fp1", "Fp2"]).unwrap();
        let raw = SpectrumBuilder::new().compute(&raw).unwrap();
        let halved = SignalMatrix::new(
            AxisKind::Frequency,
            raw.axis().to_owned(),
            raw.channels() / 2.0,
        )
        .unwrap();
        let path = plot_spectrum_comparison(
            &small_renderer(),
            &[("raw", &raw), ("filtered", &halved)],
            1,
            dir.path(),
            false,
        )
        .unwrap();
        assert_eq!(path, dir.path().join("frequential/signal_freq_w_Fp2_comparison.png"));
        assert!(path.exists());
        assert!(matches!(
            plot_spectrum_comparison(&small_renderer(), &[], 0, dir.path(), false),
            Err(PlotError::EmptySignal)
        ));
    }
    #[test]
    fn target_and_event_figures_follow_templates() {
        let dir = tempfile::tempdir().expect("tempdir");
        let axis: Vec<f64> = (0..40).map(f64::from).collect();
        let signal: Vec<f64> = axis.iter().map(|t| t.cos()).collect();
        let target: Vec<f64> = (0..40).map(|i| if i < 25 { 0.0 } else { 3.0 }).collect();
        let renderer = small_renderer();
        let overview =
            plot_target_overview(&renderer, "subject1", &axis, &signal, &target, dir.path(), false)
                .unwrap();
        assert_eq!(overview, dir.path().join("target/signal_target_subject1.png"));
        let events =
            plot_event_windows(&renderer, &axis, &signal, &target, dir.path(), false).unwrap();
        assert_eq!(events, vec![dir.path().join("delay/delay_nofilter_25.png")]);
        assert!(overview.exists() && events[0].exists());
    }
    #[test]
    fn labels_with_separators_are_refused() {
        let dir = tempfile::tempdir().expect("tempdir");
        let axis = [0.0, 1.0, 2.0];
        let values = [0.0, 1.0, 1.0];
        let err = plot_target_overview(
            &small_renderer(),
            "../outside",
            &axis,
            &values,
            &values,
            dir.path(),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, PlotError::InvalidFileLabel(_)));
        assert!(!dir.path().join("target").exists());
        let raw = two_sines().with_labels(["a/b", "Fp2"]).unwrap();
        let raw = SpectrumBuilder::new().compute(&raw).unwrap();
        let err = plot_spectrum_comparison(&small_renderer(), &[("raw", &raw)], 0, dir.path(), false)
            .unwrap_err();
        assert!(matches!(err, PlotError::InvalidFileLabel(_)));
    }
}
