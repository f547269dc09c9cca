use ndarray::{Array1, Array2};
use rustfft::{num_complex::Complex64, FftPlanner};
use crate::plotting::signal::{AxisKind, SignalMatrix};
use crate::plotting::PlotError;
/// Sample rate implied by the spacing of the first two axis values.
pub fn infer_sample_rate(signals: &SignalMatrix) -> Result<f64, PlotError> {
    let axis = signals.axis();
    if axis.len() < 2 {
        return Err(PlotError::InvalidSampleRate);
    }
    let rate = 1.0 / (axis[1] - axis[0]);
    if !rate.is_finite() || rate <= 0.0 {
        return Err(PlotError::InvalidSampleRate);
    }
    Ok(rate)
}
/// One-sided magnitude spectrum of every channel.
#[derive(Clone, Debug, Default)]
pub struct SpectrumBuilder {
    sample_rate_hz: Option<f64>,
    fft_size: Option<usize>,
}
impl SpectrumBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    /// Overrides the rate inferred from the time axis.
    pub fn with_sample_rate(mut self, sample_rate_hz: f64) -> Self {
        self.sample_rate_hz = Some(sample_rate_hz);
        self
    }
    /// Truncates or zero-pads every channel to `fft_size` samples.
    pub fn with_size(mut self, fft_size: usize) -> Self {
        self.fft_size = Some(fft_size);
        self
    }
    pub fn compute(&self, signals: &SignalMatrix) -> Result<SignalMatrix, PlotError> {
        let rate = match self.sample_rate_hz {
            Some(rate) if rate.is_finite() && rate > 0.0 => rate,
            Some(_) => return Err(PlotError::InvalidSampleRate),
            None => infer_sample_rate(signals)?,
        };
        let fft_size = self.fft_size.unwrap_or(signals.num_samples());
        if fft_size < 2 {
            return Err(PlotError::EmptySignal);
        }
        let bins = fft_size / 2;
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(fft_size);
        let frequencies: Array1<f64> = (0..bins)
            .map(|k| k as f64 * rate / fft_size as f64)
            .collect();
        let mut magnitudes = Array2::<f64>::zeros((signals.num_channels(), bins));
        for (channel, mut out) in signals
            .channels()
            .rows()
            .into_iter()
            .zip(magnitudes.rows_mut())
        {
            let mut buffer: Vec<Complex64> = channel
                .iter()
                .take(fft_size)
                .map(|&v| Complex64::new(if v.is_finite() { v } else { 0.0 }, 0.0))
                .collect();
            buffer.resize(fft_size, Complex64::new(0.0, 0.0));
            fft.process(&mut buffer);
            for (slot, c) in out.iter_mut().zip(buffer.iter().take(bins)) {
                *slot = c.norm() / fft_size as f64;
            }
        }
        let spectrum = SignalMatrix::new(AxisKind::Frequency, frequencies, magnitudes)?;
        match signals.labels() {
            Some(labels) => spectrum.with_labels(labels.iter().cloned()),
            None => Ok(spectrum),
        }
    }
}
