use eframe::egui;
use crate::plotting::figure::RenderedFigure;
use crate::plotting::PlotError;
struct FigureViewer {
    pending: Option<egui::ColorImage>,
    texture: Option<egui::TextureHandle>,
}
impl eframe::App for FigureViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(image) = self.pending.take() {
            self.texture = Some(ctx.load_texture("figure", image, egui::TextureOptions::LINEAR));
        }
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(texture) = &self.texture {
                egui::ScrollArea::both().show(ui, |ui| {
                    ui.image((texture.id(), texture.size_vec2()));
                });
            }
        });
    }
}
/// Opens a window with the figure and blocks until it is closed.
pub fn show_blocking(figure: &RenderedFigure, title: &str) -> Result<(), PlotError> {
    let (width, height) = figure.dimensions();
    let image = egui::ColorImage::from_rgb([width as usize, height as usize], figure.rgb());
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([width as f32, height as f32])
        .with_title(title);
    let options = eframe::NativeOptions {
        viewport,
        // lets later figures open their own window after this one closes
        run_and_return: true,
        ..Default::default()
    };
    log::debug!("showing {width}x{height} figure '{title}'");
    eframe::run_native(
        title,
        options,
        Box::new(move |_cc| {
            Box::new(FigureViewer {
                pending: Some(image),
                texture: None,
            })
        }),
    )
    .map_err(|e| PlotError::Viewer(e.to_string()))
}
