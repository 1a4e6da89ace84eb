use eframe::egui::{self, Color32, Pos2, Rect, Vec2};

pub const HUD_MESSAGE: &str = "Please wait...";
pub const LOADING_MESSAGE: &str = "Looking for wallpapers";

/// Where the image lands when fitted and centred inside the canvas.
pub struct ImageMetrics {
    pub image_rect: Rect,
}

impl ImageMetrics {
    pub fn new(canvas: Rect, image_size: Vec2) -> Self {
        let (display, _) = fit_within(image_size, canvas.size());
        let offset = (canvas.size() - display) * 0.5;
        let image_rect = Rect::from_min_size(canvas.min + offset, display);
        Self { image_rect }
    }
}

pub fn fit_within(image_size: Vec2, available: Vec2) -> (Vec2, f32) {
    let safe_size = egui::vec2(image_size.x.max(1.0), image_size.y.max(1.0));
    let scale = (available.x / safe_size.x)
        .min(available.y / safe_size.y)
        .max(0.01);
    (safe_size * scale, scale)
}

pub struct KeyboardState {
    pub next_image: bool,
    pub prev_image: bool,
    pub reload: bool,
    pub escape: bool,
}

impl KeyboardState {
    pub fn read(input: &egui::InputState) -> Self {
        Self {
            next_image: input.key_pressed(egui::Key::Space)
                || input.key_pressed(egui::Key::ArrowRight),
            prev_image: input.key_pressed(egui::Key::Backspace)
                || input.key_pressed(egui::Key::ArrowLeft),
            reload: input.key_pressed(egui::Key::R),
            escape: input.key_pressed(egui::Key::Escape),
        }
    }
}

/// Dims the whole screen and shows a spinner while a save is running.
pub fn draw_hud(ui: &egui::Ui, painter: &egui::Painter, screen: Rect) {
    painter.rect_filled(screen, 0.0, Color32::from_black_alpha(128));
    let spinner_rect = Rect::from_center_size(screen.center() - egui::vec2(60.0, 0.0), Vec2::splat(32.0));
    egui::Spinner::new()
        .size(32.0)
        .color(Color32::WHITE)
        .paint_at(ui, spinner_rect);
    painter.text(
        screen.center() + egui::vec2(-30.0, 0.0),
        egui::Align2::LEFT_CENTER,
        HUD_MESSAGE,
        egui::FontId::proportional(18.0),
        Color32::WHITE,
    );
}

/// Draws `text` with a translucent backdrop anchored at `pos`.
pub fn draw_label(
    painter: &egui::Painter,
    pos: Pos2,
    align: egui::Align2,
    text: String,
    font: egui::FontId,
    color: Color32,
) {
    let galley = painter.layout_no_wrap(text, font, color);
    let rect = align.anchor_size(pos, galley.size());
    painter.rect_filled(rect.expand(4.0), 4.0, Color32::from_black_alpha(204));
    painter.galley(rect.min, galley, color);
}
