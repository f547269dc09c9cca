// src/plotting/mod.rs
pub mod batch;
pub mod dual;
pub mod error;
pub mod events;
pub mod figure;
pub mod paths;
pub mod scatter;
pub mod signal;
pub mod sink;
pub mod spectrum;
pub mod stacked;
pub mod style;
pub mod viewer;
pub mod wavelet;
pub use batch::{
    plot_channel_spectra, plot_event_windows, plot_spectrum_comparison, plot_target_overview,
};
pub use dual::{ColumnScale, DualDomainPlot};
pub use error::PlotError;
pub use events::{detect_boundaries, EventWindowPlot, SignalTargetPlot, EVENT_HALF_WIDTH};
pub use figure::{Figure, Plot, RenderedFigure};
pub use scatter::{crop_highlights, ScatterPlot};
pub use signal::{AxisKind, SampleWindow, SignalMatrix, YBounds};
pub use sink::{Output, Renderer};
pub use spectrum::SpectrumBuilder;
pub use stacked::StackedPlot;
pub use style::{FigureSize, RenderConfig, Rgb};
pub use wavelet::WaveletPlot;
