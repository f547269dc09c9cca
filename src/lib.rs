//! Figures for physiological recordings: stacked EEG/ECG montages, time and
//! frequency columns side by side, scatter views, event windows around label
//! changes and wavelet decompositions, saved as raster images or shown in a window.
pub mod plotting;
pub use plotting::{Output, Plot, PlotError, RenderConfig, Renderer};
