// src/main.rs
use std::f64::consts::TAU;
use std::path::Path;
use anyhow::{Context, Result};
use physio_figures::plotting::{
    paths, plot_channel_spectra, plot_event_windows, plot_spectrum_comparison,
    plot_target_overview, AxisKind, DualDomainPlot, Output, RenderConfig, Renderer,
    SampleWindow, ScatterPlot, SignalMatrix, SpectrumBuilder, StackedPlot, WaveletPlot,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
const CONFIG_ENV: &str = "PHYSIO_FIGURES_CONFIG";
const SAMPLE_RATE_HZ: f64 = 256.0;
const DURATION_SEC: f64 = 8.0;
const EEG_LABELS: [&str; 4] = ["Fp1", "Fp2", "C3", "C4"];
// 合成 EEG：每个电极一个主频加噪声
fn synthetic_eeg(rng: &mut StdRng, axis: &[f64]) -> Result<SignalMatrix> {
    let rhythms = [10.0, 11.5, 20.0, 6.0];
    let channels = rhythms
        .iter()
        .map(|hz| {
            axis.iter()
                .map(|t| 30.0 * (TAU * hz * t).sin() + rng.gen_range(-8.0..8.0))
                .collect::<Vec<f64>>()
        })
        .collect();
    Ok(SignalMatrix::from_channels(AxisKind::Time, axis.to_vec(), channels)?
        .with_labels(EEG_LABELS)?)
}
// 合成 ECG：每秒一个尖峰
fn synthetic_ecg(rng: &mut StdRng, axis: &[f64]) -> Result<SignalMatrix> {
    let leads = [1.0, 0.6];
    let channels = leads
        .iter()
        .map(|gain| {
            axis.iter()
                .map(|t| {
                    let phase = t.fract() - 0.5;
                    gain * (1.2 * (-phase * phase / 0.0004).exp() + 0.1 * (TAU * t).sin())
                        + rng.gen_range(-0.02..0.02)
                })
                .collect::<Vec<f64>>()
        })
        .collect();
    Ok(SignalMatrix::from_channels(AxisKind::Time, axis.to_vec(), channels)?
        .with_labels(["I", "II"])?)
}
fn local_maxima(values: &[f64]) -> Vec<usize> {
    values
        .windows(3)
        .enumerate()
        .filter(|(_, w)| w[1] > w[0] && w[1] >= w[2] && w[1] > 0.8)
        .map(|(i, _)| i + 1)
        .collect()
}
// Haar 分解，返回 (近似, 细节)，最细一级在前
fn haar_levels(signal: &[f64], levels: usize) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let mut approximations = Vec::with_capacity(levels);
    let mut details = Vec::with_capacity(levels);
    let mut current = signal.to_vec();
    for _ in 0..levels {
        let (a, d): (Vec<f64>, Vec<f64>) = current
            .chunks_exact(2)
            .map(|p| {
                (
                    (p[0] + p[1]) / std::f64::consts::SQRT_2,
                    (p[0] - p[1]) / std::f64::consts::SQRT_2,
                )
            })
            .unzip();
        current = a.clone();
        approximations.push(a);
        details.push(d);
    }
    (approximations, details)
}
fn load_config() -> Result<RenderConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            let config = RenderConfig::from_json_file(&path)
                .with_context(|| format!("loading {CONFIG_ENV}={}", Path::new(&path).display()))?;
            log::info!("render config loaded from {}", Path::new(&path).display());
            Ok(config)
        }
        None => Ok(RenderConfig::default()),
    }
}
fn main() -> Result<()> {
    env_logger::init();
    let renderer = Renderer::new(load_config()?)?;
    let base = Path::new(paths::DEFAULT_FIGURES_DIR);
    let mut rng = StdRng::seed_from_u64(7);
    let samples = (SAMPLE_RATE_HZ * DURATION_SEC) as usize;
    let axis: Vec<f64> = (0..samples).map(|i| i as f64 / SAMPLE_RATE_HZ).collect();
    let eeg = synthetic_eeg(&mut rng, &axis)?;
    let ecg = synthetic_ecg(&mut rng, &axis)?;
    let spectrum = SpectrumBuilder::new().with_sample_rate(SAMPLE_RATE_HZ);
    renderer.draw(&StackedPlot::eeg(&eeg), &Output::file(base.join("eeg_montage.png")))?;
    let two_seconds = SampleWindow::new(0, (2.0 * SAMPLE_RATE_HZ) as usize);
    renderer.draw(
        &StackedPlot::ecg(&ecg).window(two_seconds),
        &Output::file(base.join("ecg_leads.png")),
    )?;
    let ecg_spectrum = spectrum.compute(&ecg)?;
    renderer.draw(
        &DualDomainPlot::ecg(&ecg, &ecg_spectrum).window(two_seconds),
        &Output::file(base.join("ecg_dual.png")),
    )?;
    let eeg_spectrum = spectrum.compute(&eeg)?;
    renderer.draw(
        &DualDomainPlot::neurogram(&eeg, &eeg_spectrum),
        &Output::file(base.join("neurogram_dual.png")),
    )?;
    plot_channel_spectra(&renderer, &eeg, &spectrum, base, false)?;
    // 平滑后的频谱作为对照
    let smoothed: Vec<Vec<f64>> = eeg
        .channels()
        .rows()
        .into_iter()
        .map(|row| {
            let row = row.to_vec();
            (0..row.len())
                .map(|i| row[i.saturating_sub(2)..(i + 3).min(row.len())].iter().sum::<f64>() / 5.0)
                .collect()
        })
        .collect();
    let smoothed = SignalMatrix::from_channels(AxisKind::Time, axis.clone(), smoothed)?
        .with_labels(EEG_LABELS)?;
    let smoothed_spectrum = spectrum.compute(&smoothed)?;
    plot_spectrum_comparison(
        &renderer,
        &[("raw", &eeg_spectrum), ("smoothed", &smoothed_spectrum)],
        0,
        base,
        false,
    )?;
    let lead = ecg.channel(0)?.to_vec();
    let peaks = local_maxima(&lead);
    renderer.draw(
        &ScatterPlot::maxima(&axis, &lead, &peaks)
            .title("R peaks")
            .axis_labels(AxisKind::Time.description(), "Amplitude (mv)")
            .window(two_seconds),
        &Output::file(base.join("ecg_peaks.png")),
    )?;
    let fp1 = eeg.channel(0)?.to_vec();
    let (approximations, details) = haar_levels(&fp1, 3);
    renderer.draw(
        &WaveletPlot::new(&fp1, &approximations, &details),
        &Output::file(base.join("fp1_wavelet.png")),
    )?;
    // 目标轨迹：中段切换状态，开头两个缺失值
    let mut target: Vec<f64> = (0..samples)
        .map(|i| if i < samples / 2 { 0.0 } else { 1.0 })
        .collect();
    target[2] = f64::NAN;
    target[5] = f64::NAN;
    plot_target_overview(&renderer, "synthetic", &axis, &fp1, &target, base, false)?;
    let events = plot_event_windows(&renderer, &axis, &fp1, &target, base, false)?;
    log::info!("gallery done, {} event figure(s) under {}", events.len(), base.display());
    Ok(())
}
