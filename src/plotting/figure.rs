use std::io::Cursor;
use std::ops::Range;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb as ImageRgb};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use crate::plotting::style::{FigureSize, RenderConfig, Rgb};
use crate::plotting::PlotError;
/// Which axes a panel draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decoration {
    /// No ticks, tick labels or spines.
    Hidden,
    /// Bottom axis with tick labels and description.
    XAxis,
    /// Left axis with tick labels and description.
    YAxis,
    Full,
}
impl Decoration {
    pub fn shows_x(self) -> bool {
        matches!(self, Decoration::XAxis | Decoration::Full)
    }
    pub fn shows_y(self) -> bool {
        matches!(self, Decoration::YAxis | Decoration::Full)
    }
}
/// Where a panel's label is written.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LabelAnchor {
    /// In the gutter left of the plotting area, vertically centred.
    Left,
    /// Inside the plot, at fractions of the x and y ranges.
    Inside { x_frac: f64, y_frac: f64 },
}
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TraceStyle {
    Line { width: u32 },
    Points { radius: u32 },
}
#[derive(Clone, Debug)]
pub struct Trace {
    pub points: Vec<(f64, f64)>,
    pub color: Rgb,
    pub style: TraceStyle,
}
impl Trace {
    pub fn new<X, Y>(xs: X, ys: Y, color: Rgb, style: TraceStyle) -> Self
    where
        X: IntoIterator<Item = f64>,
        Y: IntoIterator<Item = f64>,
    {
        Self {
            points: xs.into_iter().zip(ys).collect(),
            color,
            style,
        }
    }
    /// Runs of consecutive finite points; missing samples break the line.
    pub fn segments(&self) -> Vec<&[(f64, f64)]> {
        self.points
            .split(|(x, y)| !x.is_finite() || !y.is_finite())
            .filter(|run| !run.is_empty())
            .collect()
    }
}
/// One plotting slot of a figure.
#[derive(Clone, Debug)]
pub struct Panel {
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub traces: Vec<Trace>,
    pub markers: Vec<(f64, f64)>,
    pub label: Option<String>,
    pub label_anchor: LabelAnchor,
    pub decoration: Decoration,
    pub x_desc: Option<String>,
    pub y_desc: Option<String>,
}
impl Panel {
    pub fn new(x_range: Range<f64>, y_range: Range<f64>) -> Self {
        Self {
            x_range,
            y_range,
            traces: Vec::new(),
            markers: Vec::new(),
            label: None,
            label_anchor: LabelAnchor::Left,
            decoration: Decoration::Hidden,
            x_desc: None,
            y_desc: None,
        }
    }
    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.traces.push(trace);
        self
    }
    pub fn with_label(mut self, label: Option<String>, anchor: LabelAnchor) -> Self {
        self.label = label;
        self.label_anchor = anchor;
        self
    }
    pub fn with_decoration(mut self, decoration: Decoration) -> Self {
        self.decoration = decoration;
        self
    }
}
/// Vertically stacked panels. `leading_gaps` empty slots sit above the first panel.
#[derive(Clone, Debug, Default)]
pub struct Column {
    pub panels: Vec<Panel>,
    pub leading_gaps: usize,
    /// Aggregate y description written on the background frame of the column.
    pub frame_label: Option<String>,
}
impl Column {
    /// Declutters a stack: only the last panel keeps its x axis and `x_desc`.
    pub fn stacked(panels: Vec<Panel>, x_desc: &str) -> Self {
        let last = panels.len().saturating_sub(1);
        let panels = panels
            .into_iter()
            .enumerate()
            .map(|(idx, mut panel)| {
                if idx == last {
                    panel.decoration = Decoration::XAxis;
                    panel.x_desc = Some(x_desc.to_owned());
                } else {
                    panel.decoration = Decoration::Hidden;
                    panel.x_desc = None;
                }
                panel
            })
            .collect();
        Self {
            panels,
            leading_gaps: 0,
            frame_label: None,
        }
    }
    pub fn with_frame_label(mut self, label: impl Into<String>) -> Self {
        self.frame_label = Some(label.into());
        self
    }
    fn slots(&self) -> usize {
        self.leading_gaps + self.panels.len()
    }
}
/// Layout of a whole figure: optional title, optional full-width header panel,
/// then side-by-side columns.
#[derive(Clone, Debug)]
pub struct Figure {
    pub size: FigureSize,
    pub title: Option<String>,
    pub header: Option<Panel>,
    pub columns: Vec<Column>,
}
impl Figure {
    pub fn new(size: FigureSize) -> Self {
        Self {
            size,
            title: None,
            header: None,
            columns: Vec::new(),
        }
    }
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.header
            .iter()
            .chain(self.columns.iter().flat_map(|c| c.panels.iter()))
    }
    pub fn panel_count(&self) -> usize {
        self.panels().count()
    }
    pub fn render(&self, config: &RenderConfig) -> Result<RenderedFigure, PlotError> {
        if self.columns.iter().all(|c| c.panels.is_empty()) && self.header.is_none() {
            return Err(PlotError::Render("figure has no panels".into()));
        }
        let (width, height) = self.size.pixels(config.dpi);
        let mut buffer = vec![0u8; (width as usize) * (height as usize) * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&config.background.to_plotters())?;
            let mut body = root.margin(8, 8, 8, 8);
            if let Some(title) = &self.title {
                body = body.titled(title, text_style(config, config.font_size))?;
            }
            if let Some(header) = &self.header {
                let rows = self.columns.iter().map(Column::slots).max().unwrap_or(0) + 1;
                let (_, body_height) = body.dim_in_pixel();
                let (top, rest) = body.split_vertically(body_height / rows as u32);
                let gutter = Gutter::for_panels(std::slice::from_ref(header), config);
                draw_panel(&top, header, gutter, config)?;
                body = rest;
            }
            if !self.columns.is_empty() {
                let column_areas = body.split_evenly((1, self.columns.len()));
                for (column, area) in self.columns.iter().zip(column_areas.iter()) {
                    draw_column(area, column, config)?;
                }
            }
            root.present()?;
        }
        log::debug!(
            "rendered {}x{} figure with {} panels",
            width,
            height,
            self.panel_count()
        );
        Ok(RenderedFigure {
            width,
            height,
            rgb: buffer,
        })
    }
}
/// Anything that lays itself out as a [`Figure`].
pub trait Plot {
    fn layout(&self, config: &RenderConfig) -> Result<Figure, PlotError>;
}
/// Pixels of a rendered figure. Dropping it releases the buffer.
pub struct RenderedFigure {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}
impl RenderedFigure {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }
    pub fn encode(&self, format: ImageFormat) -> Result<Vec<u8>, PlotError> {
        let image = ImageBuffer::<ImageRgb<u8>, _>::from_raw(self.width, self.height, self.rgb.clone())
            .ok_or_else(|| PlotError::Render("failed to allocate image buffer".into()))?;
        let mut output = Vec::new();
        let dynamic = DynamicImage::ImageRgb8(image);
        dynamic.write_to(&mut Cursor::new(&mut output), format)?;
        Ok(output)
    }
}
impl std::fmt::Debug for RenderedFigure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderedFigure")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
impl Drop for RenderedFigure {
    fn drop(&mut self) {
        log::trace!("released {}x{} figure", self.width, self.height);
    }
}
fn text_style(config: &RenderConfig, size: u32) -> TextStyle<'_> {
    (config.font_family.as_str(), size)
        .into_font()
        .color(&config.foreground.to_plotters())
}
/// Horizontal room reserved left of every panel of a column so the x axes line up.
#[derive(Clone, Copy, Debug)]
struct Gutter {
    label: u32,
    y_axis: u32,
}
impl Gutter {
    fn for_panels(panels: &[Panel], config: &RenderConfig) -> Self {
        let has_left_label = panels
            .iter()
            .any(|p| p.label.is_some() && p.label_anchor == LabelAnchor::Left);
        let has_y_axis = panels.iter().any(|p| p.decoration.shows_y());
        Self {
            label: if has_left_label { config.font_size * 4 } else { 0 },
            y_axis: if has_y_axis { config.tick_label_size * 5 } else { 0 },
        }
    }
}
fn draw_column(
    area: &DrawingArea<BitMapBackend, Shift>,
    column: &Column,
    config: &RenderConfig,
) -> Result<(), PlotError> {
    let mut area = area.clone();
    if let Some(frame_label) = &column.frame_label {
        let frame_width = config.font_size * 2;
        let (frame, rest) = area.split_horizontally(frame_width);
        let (_, h) = frame.dim_in_pixel();
        let style = text_style(config, config.font_size)
            .transform(FontTransform::Rotate270)
            .pos(Pos::new(HPos::Center, VPos::Center));
        frame.draw(&Text::new(
            frame_label.as_str(),
            (frame_width as i32 / 2, h as i32 / 2),
            style,
        ))?;
        area = rest;
    }
    let slots = column.slots();
    if slots == 0 {
        return Ok(());
    }
    let gutter = Gutter::for_panels(&column.panels, config);
    let slot_areas = area.split_evenly((slots, 1));
    for (panel, slot) in column
        .panels
        .iter()
        .zip(slot_areas.iter().skip(column.leading_gaps))
    {
        draw_panel(slot, panel, gutter, config)?;
    }
    Ok(())
}
fn draw_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    panel: &Panel,
    gutter: Gutter,
    config: &RenderConfig,
) -> Result<(), PlotError> {
    let fg = config.foreground.to_plotters();
    let (label_area, plot_area) = area.split_horizontally(gutter.label);
    let x_area = if panel.decoration.shows_x() {
        config.tick_label_size + config.font_size * 2
    } else {
        0
    };
    let mut chart = ChartBuilder::on(&plot_area)
        .margin_top(4)
        .margin_right(12)
        .x_label_area_size(x_area)
        .y_label_area_size(gutter.y_axis)
        .build_cartesian_2d(panel.x_range.clone(), panel.y_range.clone())?;
    if panel.decoration != Decoration::Hidden {
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
            .axis_style(fg)
            .x_labels(6)
            .y_labels(5)
            .x_label_style(text_style(config, config.tick_label_size))
            .y_label_style(text_style(config, config.tick_label_size))
            .axis_desc_style(text_style(config, config.font_size));
        if !panel.decoration.shows_x() {
            mesh.disable_x_axis();
        }
        if !panel.decoration.shows_y() {
            mesh.disable_y_axis();
        }
        if let Some(desc) = &panel.x_desc {
            mesh.x_desc(desc.as_str());
        }
        if let Some(desc) = &panel.y_desc {
            mesh.y_desc(desc.as_str());
        }
        mesh.draw()?;
    }
    for trace in &panel.traces {
        let color = trace.color.to_plotters();
        match trace.style {
            TraceStyle::Line { width } => {
                for run in trace.segments() {
                    chart.draw_series(LineSeries::new(
                        run.iter().copied(),
                        color.stroke_width(width),
                    ))?;
                }
            }
            TraceStyle::Points { radius } => {
                chart.draw_series(
                    trace
                        .points
                        .iter()
                        .filter(|(x, y)| x.is_finite() && y.is_finite())
                        .map(|&p| Circle::new(p, radius, color.filled())),
                )?;
            }
        }
    }
    if !panel.markers.is_empty() {
        let highlight = config.highlight.to_plotters();
        chart.draw_series(
            panel
                .markers
                .iter()
                .map(|&p| Circle::new(p, config.marker_radius, highlight.filled())),
        )?;
    }
    if let Some(label) = &panel.label {
        match panel.label_anchor {
            LabelAnchor::Left => {
                let (_, h) = label_area.dim_in_pixel();
                let style = text_style(config, config.font_size)
                    .pos(Pos::new(HPos::Left, VPos::Center));
                label_area.draw(&Text::new(label.as_str(), (2, h as i32 / 2), style))?;
            }
            LabelAnchor::Inside { x_frac, y_frac } => {
                let x = panel.x_range.start + x_frac * (panel.x_range.end - panel.x_range.start);
                let y = panel.y_range.start + y_frac * (panel.y_range.end - panel.y_range.start);
                let style = text_style(config, config.font_size);
                chart.draw_series(std::iter::once(Text::new(label.clone(), (x, y), style)))?;
            }
        }
    }
    Ok(())
}
