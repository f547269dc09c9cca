use std::fs;
use std::path::{Path, PathBuf};
use image::ImageFormat;
use crate::plotting::figure::{Figure, Plot, RenderedFigure};
use crate::plotting::style::RenderConfig;
use crate::plotting::viewer;
use crate::plotting::PlotError;
/// Where a rendered figure goes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Output {
    pub path: Option<PathBuf>,
    pub show: bool,
}
impl Output {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            show: false,
        }
    }
    pub fn screen() -> Self {
        Self {
            path: None,
            show: true,
        }
    }
    pub fn show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }
}
/// Image format implied by the path extension.
pub fn image_format_for(path: &Path) -> Result<ImageFormat, PlotError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => Ok(ImageFormat::Png),
        Some("jpg") | Some("jpeg") => Ok(ImageFormat::Jpeg),
        Some("bmp") => Ok(ImageFormat::Bmp),
        _ => Err(PlotError::UnsupportedFormat(path.to_path_buf())),
    }
}
/// Encodes `figure` by extension and writes it, creating missing parent directories.
pub fn save(figure: &RenderedFigure, path: &Path) -> Result<(), PlotError> {
    let format = image_format_for(path)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| PlotError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
            log::debug!("created {}", parent.display());
        }
    }
    let bytes = figure.encode(format)?;
    fs::write(path, bytes).map_err(|source| PlotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("figure saved as '{}'", path.display());
    Ok(())
}
/// Saves and/or shows `figure`, then releases it. The figure is dropped on every
/// path out of this function, errors included.
pub fn emit(figure: RenderedFigure, output: &Output, title: &str) -> Result<(), PlotError> {
    if let Some(path) = &output.path {
        save(&figure, path)?;
    }
    if output.show {
        viewer::show_blocking(&figure, title)?;
    }
    Ok(())
}
/// Holds the render configuration chosen at start-up and runs plots through
/// layout, rendering and the output sink.
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    config: RenderConfig,
}
impl Renderer {
    pub fn new(config: RenderConfig) -> Result<Self, PlotError> {
        config.validate()?;
        Ok(Self { config })
    }
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
    /// Lays out, renders and emits `plot`. Returns the layout that was drawn.
    pub fn draw<P: Plot + ?Sized>(&self, plot: &P, output: &Output) -> Result<Figure, PlotError> {
        let figure = plot.layout(&self.config)?;
        let rendered = figure.render(&self.config)?;
        let title = output
            .path
            .as_deref()
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str())
            .or(figure.title.as_deref())
            .unwrap_or("figure")
            .to_owned();
        emit(rendered, output, &title)?;
        Ok(figure)
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::figure::{Column, Panel, Trace, TraceStyle};
    use crate::plotting::style::{FigureSize, Rgb};
    struct OnePanel;
    impl Plot for OnePanel {
        fn layout(&self, _config: &RenderConfig) -> Result<Figure, PlotError> {
            let panel = Panel::new(0.0..2.0, 0.0..4.0).with_trace(Trace::new(
                [0.0, 1.0, 2.0],
                [0.0, 4.0, 1.0],
                Rgb::BLACK,
                TraceStyle::Line { width: 1 },
            ));
            Ok(Figure::new(FigureSize::new(3.0, 2.0))
                .with_column(Column::stacked(vec![panel], "Time (sec)")))
        }
    }
    fn small_renderer() -> Renderer {
        Renderer::new(RenderConfig {
            dpi: 40,
            font_size: 8,
            tick_label_size: 8,
            ..RenderConfig::default()
        })
        .unwrap()
    }
    #[test]
    fn format_follows_extension() {
        assert_eq!(image_format_for(Path::new("a/b.PNG")).unwrap(), ImageFormat::Png);
        assert_eq!(image_format_for(Path::new("b.jpeg")).unwrap(), ImageFormat::Jpeg);
        assert!(matches!(
            image_format_for(Path::new("b.svg")),
            Err(PlotError::UnsupportedFormat(_))
        ));
        assert!(image_format_for(Path::new("noext")).is_err());
    }
    #[test]
    fn saving_creates_missing_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("figures").join("nested").join("one.png");
        small_renderer()
            .draw(&OnePanel, &Output::file(&path))
            .unwrap();
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (120, 80));
    }
    #[test]
    fn same_inputs_give_identical_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("again.png");
        let renderer = small_renderer();
        renderer.draw(&OnePanel, &Output::file(&path)).unwrap();
        let first = fs::read(&path).unwrap();
        renderer.draw(&OnePanel, &Output::file(&path)).unwrap();
        assert_eq!(first, fs::read(&path).unwrap());
    }
    #[test]
    fn unsupported_extension_fails_before_writing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out").join("figure.svg");
        let err = small_renderer()
            .draw(&OnePanel, &Output::file(&path))
            .unwrap_err();
        assert!(matches!(err, PlotError::UnsupportedFormat(_)));
        assert!(!path.exists());
    }
    #[test]
    fn failed_write_releases_figure_and_renderer_recovers() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();
        let renderer = small_renderer();
        let err = renderer
            .draw(&OnePanel, &Output::file(blocker.join("one.png")))
            .unwrap_err();
        assert!(matches!(err, PlotError::Io { .. }));
        let path = dir.path().join("after.png");
        renderer.draw(&OnePanel, &Output::file(&path)).unwrap();
        assert!(path.exists());
    }
    #[test]
    fn invalid_config_is_rejected() {
        let err = Renderer::new(RenderConfig {
            dpi: 0,
            ..RenderConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, PlotError::Config(_)));
    }
}
