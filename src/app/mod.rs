pub mod loader;
pub mod touch;

use std::{
    path::PathBuf,
    sync::{mpsc::Receiver, Arc},
};

use anyhow::Result;
use eframe::{
    egui::{self, Color32, ViewportCommand},
    App, Frame,
};
use log::{info, warn};
use rand::rngs::StdRng;

use crate::{
    catalog::{DirectorySource, ImageSource},
    config::ViewerConfig,
    coordinator::{SaveCoordinator, SaveEvent, SaveOutcome, Trigger},
    gallery::{Gallery, LoadState},
    gesture::TapTracker,
    sampler::Sampler,
    store::LibraryStore,
    ui::{draw_hud, draw_label, ImageMetrics, KeyboardState, LOADING_MESSAGE},
};

use self::loader::Loader;

pub struct SplashWallsApp {
    pub config: ViewerConfig,
    pub source: Box<dyn ImageSource>,
    pub sampler: Sampler<StdRng>,
    pub gallery: Gallery,
    pub loader: Loader,
    pub taps: TapTracker,
    pub status: String,
    save_events: Option<Receiver<SaveEvent>>,
    hud_visible: bool,
    texture: Option<(PathBuf, egui::TextureHandle)>,
    finished: bool,
    // Declared last so subscribers above are dropped first
    pub coordinator: SaveCoordinator,
}

impl SplashWallsApp {
    pub fn new(config: ViewerConfig) -> Result<Self> {
        let source = DirectorySource::new(&config.directory, config.recursive, &config.exclude)?;
        let store = LibraryStore::new(&config.library, config.format, config.quality);
        let sampler = match config.seed {
            Some(seed) => Sampler::seeded(seed),
            None => Sampler::from_entropy(),
        };

        let mut app = Self {
            taps: TapTracker::new(config.classifier()),
            source: Box::new(source),
            sampler,
            gallery: Gallery::new(),
            loader: Loader::new(),
            status: String::from("Ready"),
            save_events: None,
            hud_visible: false,
            texture: None,
            finished: false,
            coordinator: SaveCoordinator::new(Arc::new(store)),
            config,
        };
        // Listen for save events before the first images are picked
        app.save_events = Some(app.coordinator.subscribe());
        app.reload();
        Ok(app)
    }

    /// Throws away the current set and picks a fresh one.
    pub fn reload(&mut self) {
        self.gallery.initialize();
        self.loader.clear();
        self.taps.reset();
        self.texture = None;

        match self
            .gallery
            .refresh(self.source.as_ref(), &mut self.sampler, self.config.count)
        {
            Ok(records) => {
                for record in records {
                    self.loader.load_image(&record.source);
                }
                self.status = format!("Picked {} wallpapers", records.len());
            }
            Err(err) => {
                self.status = format!("{err:#}");
            }
        }
    }

    fn show(&mut self, index: usize) {
        self.gallery.on_scroll_settled(index);
        self.taps.reset();
    }

    fn next(&mut self) {
        let len = self.gallery.records().len();
        if len > 0 {
            self.show((self.gallery.current_index() + 1).min(len - 1));
        }
    }

    fn previous(&mut self) {
        self.show(self.gallery.current_index().saturating_sub(1));
    }

    fn drain_save_events(&mut self) {
        let Some(events) = &self.save_events else {
            return;
        };
        while let Ok(event) = events.try_recv() {
            match event {
                SaveEvent::Visibility(visible) => self.hud_visible = visible,
                SaveEvent::Outcome(SaveOutcome::Succeeded { media, .. }) => {
                    self.status = format!("Saved to {}", media.path.display());
                }
                SaveEvent::Outcome(SaveOutcome::Failed { error, .. }) => {
                    self.status = format!("Error saving wallpaper: {error}");
                }
            }
        }
    }

    fn handle_taps(&mut self, ctx: &egui::Context, area: egui::Rect) {
        let (events, time) = ctx.input(|i| (i.events.clone(), i.time));
        for gesture in touch::gesture_events(&events, time, area) {
            if !self.taps.observe(gesture) {
                continue;
            }
            // Index is read in the same frame the tap arrived in
            let index = self.gallery.current_index();
            match self.coordinator.on_double_tap(index, self.gallery.records()) {
                Ok(Trigger::Started) => self.status = String::from("Saving..."),
                Ok(Trigger::Ignored) => {}
                Err(err) => {
                    warn!("could not start save: {err}");
                    self.status = format!("Error saving wallpaper: {err}");
                }
            }
        }
    }

    fn current_texture(&mut self, ctx: &egui::Context) -> Option<egui::TextureHandle> {
        let record = self.gallery.current()?;
        if let Some((path, texture)) = &self.texture {
            if *path == record.source {
                return Some(texture.clone());
            }
        }
        let preloaded = self.loader.get_from_cache(&record.source)?;
        let texture = ctx.load_texture(
            "splashwalls-current",
            preloaded.color_image.clone(),
            egui::TextureOptions::LINEAR,
        );
        self.texture = Some((record.source.clone(), texture.clone()));
        Some(texture)
    }

    fn request_shutdown(&mut self, ctx: &egui::Context) {
        self.finished = true;
        if !self.coordinator.is_visible() {
            info!("shutting down");
            ctx.send_viewport_cmd(ViewportCommand::Close);
        } else {
            self.status = String::from("Waiting for the current save to finish...");
        }
    }
}

impl App for SplashWallsApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut Frame) {
        let _ = frame;

        self.loader.update();
        self.coordinator.poll();
        self.drain_save_events();

        if self.finished {
            self.request_shutdown(ctx);
        }

        let keys = ctx.input(KeyboardState::read);
        if keys.escape {
            self.request_shutdown(ctx);
        }
        if keys.reload {
            self.reload();
        }
        if keys.next_image {
            self.next();
        }
        if keys.prev_image {
            self.previous();
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                let screen = response.rect;
                painter.rect_filled(screen, 0.0, Color32::BLACK);

                let texture = self.current_texture(ctx);
                match (self.gallery.state().clone(), texture) {
                    (LoadState::Failed(reason), _) => {
                        draw_label(
                            &painter,
                            screen.center(),
                            egui::Align2::CENTER_CENTER,
                            format!("{reason}\nPress R to try again"),
                            egui::FontId::proportional(18.0),
                            Color32::WHITE,
                        );
                    }
                    (LoadState::Ready, Some(texture)) => {
                        let metrics = ImageMetrics::new(screen, texture.size_vec2());
                        painter.image(
                            texture.id(),
                            metrics.image_rect,
                            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                            Color32::WHITE,
                        );
                        if let Some(record) = self.gallery.current() {
                            draw_label(
                                &painter,
                                screen.left_top() + egui::vec2(20.0, 20.0),
                                egui::Align2::LEFT_TOP,
                                format!("Photo by\n{}", record.author),
                                egui::FontId::proportional(15.0),
                                Color32::WHITE,
                            );
                        }
                        self.handle_taps(ctx, metrics.image_rect);
                    }
                    _ => {
                        draw_label(
                            &painter,
                            screen.center(),
                            egui::Align2::CENTER_CENTER,
                            format!("{LOADING_MESSAGE} in {}", self.config.directory.display()),
                            egui::FontId::proportional(18.0),
                            Color32::WHITE,
                        );
                    }
                }

                let count = self.gallery.records().len();
                if count > 0 {
                    draw_label(
                        &painter,
                        screen.center_bottom() + egui::vec2(0.0, -40.0),
                        egui::Align2::CENTER_BOTTOM,
                        format!("{} / {count}", self.gallery.current_index() + 1),
                        egui::FontId::proportional(14.0),
                        Color32::WHITE,
                    );
                }

                draw_label(
                    &painter,
                    screen.left_bottom() + egui::vec2(12.0, -12.0),
                    egui::Align2::LEFT_BOTTOM,
                    self.status.clone(),
                    egui::FontId::monospace(14.0),
                    Color32::WHITE,
                );
                draw_label(
                    &painter,
                    screen.right_bottom() + egui::vec2(-12.0, -12.0),
                    egui::Align2::RIGHT_BOTTOM,
                    String::from("Double tap: Save | Left/Right: Browse | R: Reload | Esc: Quit"),
                    egui::FontId::monospace(14.0),
                    Color32::from_gray(200),
                );

                if self.hud_visible {
                    draw_hud(ui, &painter, screen);
                }
            });

        ctx.request_repaint();
    }
}
