use std::fs;
use std::path::Path;
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use crate::plotting::PlotError;
/// Serializable RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);
impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const RED: Rgb = Rgb(214, 39, 40);
    pub const TEAL: Rgb = Rgb(0, 128, 128);
    pub const CRIMSON: Rgb = Rgb(220, 20, 60);
    pub fn to_plotters(self) -> RGBColor {
        RGBColor(self.0, self.1, self.2)
    }
}
/// Figure size in inches; converted to pixels with [`RenderConfig::dpi`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FigureSize {
    pub width_in: f64,
    pub height_in: f64,
}
impl FigureSize {
    pub const fn new(width_in: f64, height_in: f64) -> Self {
        Self {
            width_in,
            height_in,
        }
    }
    pub fn pixels(self, dpi: u32) -> (u32, u32) {
        let to_px = |inches: f64| ((inches * dpi as f64).round() as u32).max(1);
        (to_px(self.width_in), to_px(self.height_in))
    }
}
/// Process-wide look of every figure. Build one at start-up and hand it to
/// [`crate::plotting::Renderer::new`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub font_family: String,
    pub font_size: u32,
    pub tick_label_size: u32,
    pub dpi: u32,
    pub background: Rgb,
    pub foreground: Rgb,
    pub palette: Vec<Rgb>,
    pub highlight: Rgb,
    pub marker_radius: u32,
}
impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_owned(),
            font_size: 16,
            tick_label_size: 16,
            dpi: 100,
            background: Rgb::WHITE,
            foreground: Rgb::BLACK,
            // matplotlib "tab10" order
            palette: vec![
                Rgb(31, 119, 180),
                Rgb(255, 127, 14),
                Rgb(44, 160, 44),
                Rgb(214, 39, 40),
                Rgb(148, 103, 189),
                Rgb(140, 86, 75),
                Rgb(227, 119, 194),
                Rgb(127, 127, 127),
                Rgb(188, 189, 34),
                Rgb(23, 190, 207),
            ],
            highlight: Rgb::RED,
            marker_radius: 5,
        }
    }
}
impl RenderConfig {
    pub fn from_json_str(json: &str) -> Result<Self, PlotError> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PlotError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| PlotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
    pub fn validate(&self) -> Result<(), PlotError> {
        if self.font_size == 0 || self.tick_label_size == 0 {
            return Err(PlotError::Config("font sizes must be positive".into()));
        }
        if self.dpi == 0 {
            return Err(PlotError::Config("dpi must be positive".into()));
        }
        if self.palette.is_empty() {
            return Err(PlotError::Config("palette needs at least one colour".into()));
        }
        Ok(())
    }
    pub fn series_color(&self, index: usize) -> Rgb {
        self.palette[index % self.palette.len()]
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn partial_json_keeps_defaults() {
        let config = RenderConfig::from_json_str(r#"{ "font_size": 12, "dpi": 72 }"#).unwrap();
        assert_eq!(config.font_size, 12);
        assert_eq!(config.dpi, 72);
        assert_eq!(config.tick_label_size, 16);
        assert_eq!(config.background, Rgb::WHITE);
    }
    #[test]
    fn empty_palette_is_rejected() {
        let err = RenderConfig::from_json_str(r#"{ "palette": [] }"#).unwrap_err();
        assert!(matches!(err, PlotError::Config(_)));
    }
    #[test]
    fn figure_size_scales_with_dpi() {
        assert_eq!(FigureSize::new(12.0, 8.0).pixels(100), (1200, 800));
        assert_eq!(FigureSize::new(12.0, 4.0).pixels(50), (600, 200));
    }
}
