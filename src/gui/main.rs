use folio::catalog::{Catalog, Section};
use folio::contact::{self, ContactForm, Field, FormStatus, Submission};
use folio::controller::{ControllerEvent, GalleryController};
use folio::filter::Category;
use folio::item::BrowsableItem;
use folio::theme::ThemeMode;
use rfd::FileDialog;
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::time::Instant;

const CARD_WIDTH: f32 = 220.0;
const CARD_IMAGE_HEIGHT: f32 = 140.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    About,
    Gallery,
    Projects,
    Contact,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::About, Tab::Gallery, Tab::Projects, Tab::Contact];

    fn label(&self) -> &'static str {
        match self {
            Tab::About => "About",
            Tab::Gallery => "Gallery",
            Tab::Projects => "Projects",
            Tab::Contact => "Contact",
        }
    }

    fn section(&self) -> Option<Section> {
        match self {
            Tab::Gallery => Some(Section::Gallery),
            Tab::Projects => Some(Section::Projects),
            Tab::About | Tab::Contact => None,
        }
    }
}

/// User input collected while drawing, applied once the frame is laid out.
#[derive(Debug, Clone)]
enum Action {
    SetCategory(Category),
    NextPage,
    PrevPage,
    ToggleShowAll,
    Open(usize),
    Close,
    NextImage,
    PrevImage,
    JumpTo(usize),
}

struct FolioGui {
    catalog: Catalog,
    tab: Tab,
    gallery: GalleryController,
    projects: GalleryController,
    theme: ThemeMode,
    contact: ContactForm,
    contact_error: Option<String>,
    submit_rx: Option<Receiver<Submission>>,
    submitted_at: Option<Instant>,
    runtime: tokio::runtime::Runtime,
    // None marks references that failed to load or are remote
    textures: HashMap<String, Option<egui::TextureHandle>>,
    // sections whose modal is open; their browser does not scroll
    scroll_locks: HashSet<Section>,
    status_message: String,
}

impl FolioGui {
    fn new(catalog: Catalog) -> std::io::Result<Self> {
        let status_message = format!(
            "Loaded {} gallery items and {} projects",
            catalog.gallery.len(),
            catalog.projects.len()
        );
        Ok(Self {
            gallery: GalleryController::new(catalog.gallery.clone()),
            projects: GalleryController::new(catalog.projects.clone()),
            catalog,
            tab: Tab::Gallery,
            theme: ThemeMode::default(),
            contact: ContactForm::new(),
            contact_error: None,
            submit_rx: None,
            submitted_at: None,
            runtime: tokio::runtime::Runtime::new()?,
            textures: HashMap::new(),
            scroll_locks: HashSet::new(),
            status_message,
        })
    }

    fn controller(&self, section: Section) -> &GalleryController {
        match section {
            Section::Gallery => &self.gallery,
            Section::Projects => &self.projects,
        }
    }

    fn controller_mut(&mut self, section: Section) -> &mut GalleryController {
        match section {
            Section::Gallery => &mut self.gallery,
            Section::Projects => &mut self.projects,
        }
    }
}

impl eframe::App for FolioGui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(if self.theme.is_dark() {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        self.poll_submission(ctx);

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("navigation").show(ctx, |ui| {
            self.show_navigation(ui);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(&self.status_message);
        });

        let section = self.tab.section();
        if let Some(section) = section {
            self.load_textures_for(ctx, section);
        }

        egui::CentralPanel::default().show(ctx, |ui| match section {
            Some(section) => {
                let controller = self.controller(section);
                let open = controller.is_open();
                egui::ScrollArea::vertical()
                    .enable_scrolling(!self.scroll_locks.contains(&section))
                    .show(ui, |ui| {
                        ui.add_enabled_ui(!open, |ui| {
                            show_browser(ui, controller, &self.textures, &mut actions);
                        });
                    });
            }
            None if self.tab == Tab::Contact => self.show_contact(ui, ctx),
            None => self.show_about(ui),
        });

        if let Some(section) = section {
            if self.controller(section).is_open() {
                show_modal(ctx, self.controller(section), &self.textures, &mut actions);
            }

            // Handle keyboard shortcuts
            if self.controller(section).is_open() {
                if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft)) {
                    actions.push(Action::PrevImage);
                }
                if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight)) {
                    actions.push(Action::NextImage);
                }
                if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                    actions.push(Action::Close);
                }
            }

            self.apply(section, actions);
        }
    }
}

impl FolioGui {
    fn show_navigation(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let title = self
                .catalog
                .profile
                .as_ref()
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "Portfolio".to_string());
            ui.heading(title);
            ui.separator();

            for tab in Tab::ALL {
                if ui.selectable_label(self.tab == tab, tab.label()).clicked() {
                    self.tab = tab;
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(self.theme.toggle_icon())
                    .on_hover_text("Toggle theme")
                    .clicked()
                {
                    let mode = self.theme.toggle();
                    log::debug!("theme switched to {}", mode);
                }
                if ui.button("📁 Open Catalog").clicked() {
                    self.select_catalog();
                }
            });
        });
    }

    fn select_catalog(&mut self) {
        let Some(path) = FileDialog::new()
            .add_filter("Catalog", &["json"])
            .pick_file()
        else {
            return;
        };

        match Catalog::load(&path) {
            Ok(catalog) => {
                self.gallery.replace_items(catalog.gallery.clone());
                self.projects.replace_items(catalog.projects.clone());
                for section in Section::ALL {
                    self.handle_events(section);
                }
                self.textures.clear();
                self.status_message = format!(
                    "Loaded {} gallery items and {} projects from {}",
                    catalog.gallery.len(),
                    catalog.projects.len(),
                    path.display()
                );
                self.catalog = catalog;
            }
            Err(e) => {
                log::error!("failed to load catalog {}: {}", path.display(), e);
                self.status_message = format!("Could not load catalog: {}", e);
            }
        }
    }

    /// Upload textures for the visible covers and the open image.
    fn load_textures_for(&mut self, ctx: &egui::Context, section: Section) {
        let controller = self.controller(section);
        let mut wanted: Vec<String> = controller
            .visible_items()
            .iter()
            .map(|item| item.cover().to_string())
            .collect();
        if let Some(image) = controller.current_image() {
            wanted.push(image.to_string());
        }

        for reference in wanted {
            if self.textures.contains_key(&reference) {
                continue;
            }
            let texture = self
                .catalog
                .resolve_image(&reference)
                .and_then(|path| load_texture(ctx, &reference, path));
            self.textures.insert(reference, texture);
        }
    }

    fn apply(&mut self, section: Section, actions: Vec<Action>) {
        let controller = self.controller_mut(section);
        for action in actions {
            match action {
                Action::SetCategory(category) => controller.set_category(category),
                Action::NextPage => controller.next_page(),
                Action::PrevPage => controller.prev_page(),
                Action::ToggleShowAll => controller.toggle_show_all(),
                Action::Open(index) => controller.select(index),
                Action::Close => controller.deselect(),
                Action::NextImage => controller.next_image(),
                Action::PrevImage => controller.prev_image(),
                Action::JumpTo(index) => controller.jump_to(index),
            }
        }
        self.handle_events(section);
    }

    fn handle_events(&mut self, section: Section) {
        for event in self.controller_mut(section).drain_events() {
            log::debug!("{} event: {:?}", section, event);
            match event {
                ControllerEvent::Opened { .. } => {
                    self.scroll_locks.insert(section);
                }
                ControllerEvent::Closed => {
                    self.scroll_locks.remove(&section);
                }
                _ => {}
            }
        }
    }

    fn show_about(&self, ui: &mut egui::Ui) {
        let Some(profile) = &self.catalog.profile else {
            ui.centered_and_justified(|ui| {
                ui.label("This catalog has no profile");
            });
            return;
        };

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading(&profile.name);
            ui.label(&profile.role);
            if let Some(summary) = &profile.summary {
                ui.add_space(8.0);
                ui.label(summary);
            }

            if !profile.skills.is_empty() {
                ui.separator();
                ui.heading("Skills");
                for group in &profile.skills {
                    ui.label(egui::RichText::new(&group.title).strong());
                    ui.horizontal_wrapped(|ui| {
                        for skill in &group.skills {
                            ui.label(egui::RichText::new(skill).monospace());
                        }
                    });
                }
            }

            if !profile.experience.is_empty() {
                ui.separator();
                ui.heading("Experience");
                for job in &profile.experience {
                    ui.collapsing(format!("{} @ {} ({})", job.title, job.company, job.period), |ui| {
                        if let Some(description) = &job.description {
                            ui.label(description);
                        }
                        for achievement in &job.achievements {
                            ui.label(format!("• {}", achievement));
                        }
                        if !job.technologies.is_empty() {
                            ui.label(egui::RichText::new(job.technologies.join(" · ")).weak());
                        }
                    });
                }
            }
        });
    }

    fn show_contact(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.heading("Get In Touch");
        ui.label("Let's discuss your next project or just say hello");
        if let Some(email) = self.catalog.profile.as_ref().and_then(|p| p.email.as_ref()) {
            ui.label(format!("✉ {}", email));
        }
        ui.separator();

        match self.contact.status() {
            FormStatus::Submitted => {
                ui.label(egui::RichText::new("✔ Message sent! I'll get back to you soon.").strong());
                return;
            }
            FormStatus::Submitting => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Sending...");
                });
            }
            FormStatus::Idle => {}
        }

        let submitting = self.contact.is_submitting();
        ui.add_enabled_ui(!submitting, |ui| {
            for field in Field::ALL {
                ui.label(field.label());
                let value = self.contact.field_mut(field);
                if field == Field::Message {
                    ui.add(egui::TextEdit::multiline(value).desired_rows(6));
                } else {
                    ui.text_edit_singleline(value);
                }
            }
        });

        if let Some(error) = &self.contact_error {
            ui.colored_label(egui::Color32::RED, error);
        }

        if ui
            .add_enabled(!submitting, egui::Button::new("Send Message"))
            .clicked()
        {
            self.submit_contact(ctx);
        }
    }

    fn submit_contact(&mut self, ctx: &egui::Context) {
        let submission = match self.contact.begin_submit() {
            Ok(submission) => submission,
            Err(e) => {
                self.contact_error = Some(e.to_string());
                return;
            }
        };
        self.contact_error = None;

        let (tx, rx) = channel();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let accepted = contact::simulate_submission(submission, contact::SUBMIT_DELAY).await;
            let _ = tx.send(accepted);
            ctx.request_repaint();
        });
        self.submit_rx = Some(rx);
    }

    fn poll_submission(&mut self, ctx: &egui::Context) {
        if let Some(rx) = &self.submit_rx {
            if let Ok(accepted) = rx.try_recv() {
                self.contact.finish_submit();
                self.submitted_at = Some(Instant::now());
                self.submit_rx = None;
                self.status_message = format!("Message from {} sent", accepted.email);
            }
        }

        if let Some(at) = self.submitted_at {
            let elapsed = at.elapsed();
            if elapsed >= contact::CONFIRMATION_PERIOD {
                self.contact.reset();
                self.submitted_at = None;
            } else {
                ctx.request_repaint_after(contact::CONFIRMATION_PERIOD - elapsed);
            }
        }
    }
}

fn load_texture(ctx: &egui::Context, name: &str, path: PathBuf) -> Option<egui::TextureHandle> {
    let img = match image::open(&path) {
        Ok(img) => img,
        Err(e) => {
            log::warn!("could not load {}: {}", path.display(), e);
            return None;
        }
    };
    let rgba_img = img.to_rgba8();
    let color_image = egui::ColorImage::from_rgba_unmultiplied(
        [rgba_img.width() as usize, rgba_img.height() as usize],
        rgba_img.as_raw(),
    );
    Some(ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR))
}

/// Draw `reference` fitted into `max`, or a placeholder for remote and
/// missing images.
fn show_image(
    ui: &mut egui::Ui,
    textures: &HashMap<String, Option<egui::TextureHandle>>,
    reference: &str,
    max: egui::Vec2,
) {
    match textures.get(reference).and_then(Option::as_ref) {
        Some(texture) => {
            let size = texture.size_vec2();
            // Calculate display size to fit in available space while maintaining aspect ratio
            let scale = (max.x / size.x).min(max.y / size.y).min(1.0);
            ui.image((texture.id(), size * scale));
        }
        None => {
            let (rect, _) = ui.allocate_exact_size(max, egui::Sense::hover());
            ui.painter()
                .rect_filled(rect, 6.0, ui.visuals().faint_bg_color);
            ui.put(
                rect.shrink(8.0),
                egui::Label::new(egui::RichText::new(reference).small().weak()).truncate(),
            );
        }
    }
}

fn show_browser(
    ui: &mut egui::Ui,
    controller: &GalleryController,
    textures: &HashMap<String, Option<egui::TextureHandle>>,
    actions: &mut Vec<Action>,
) {
    // Category filter buttons
    ui.horizontal_wrapped(|ui| {
        for category in controller.categories() {
            let active = controller.active_category() == &category;
            if ui.selectable_label(active, category.label()).clicked() && !active {
                actions.push(Action::SetCategory(category));
            }
        }
    });
    ui.separator();

    let visible = controller.visible_items();
    if visible.is_empty() {
        ui.label("No items in this category");
    }

    ui.horizontal_wrapped(|ui| {
        for (slot, item) in visible.iter().enumerate() {
            let index = controller.visible_offset() + slot;
            show_card(ui, item, textures, index, actions);
        }
    });

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        if controller.show_all() {
            if ui.button("Show Less").clicked() {
                actions.push(Action::ToggleShowAll);
            }
            return;
        }
        if ui
            .add_enabled(controller.can_go_previous(), egui::Button::new("◀ Prev"))
            .clicked()
        {
            actions.push(Action::PrevPage);
        }
        ui.label(format!(
            "Page {} of {}",
            controller.current_page(),
            controller.total_pages()
        ));
        if ui
            .add_enabled(controller.can_go_next(), egui::Button::new("Next ▶"))
            .clicked()
        {
            actions.push(Action::NextPage);
        }
        if ui.button("View All").clicked() {
            actions.push(Action::ToggleShowAll);
        }
    });
}

fn show_card(
    ui: &mut egui::Ui,
    item: &BrowsableItem,
    textures: &HashMap<String, Option<egui::TextureHandle>>,
    index: usize,
    actions: &mut Vec<Action>,
) {
    ui.group(|ui| {
        ui.set_width(CARD_WIDTH);
        ui.vertical(|ui| {
            show_image(
                ui,
                textures,
                item.cover(),
                egui::vec2(CARD_WIDTH, CARD_IMAGE_HEIGHT),
            );
            ui.label(egui::RichText::new(&item.title).strong());
            if let Some(caption) = item.caption() {
                ui.add(egui::Label::new(egui::RichText::new(caption).small()).wrap());
            }
            if !item.tags.is_empty() {
                ui.label(egui::RichText::new(item.tags.join(" · ")).small().weak());
            }
            if ui.button(format!("View ({} images)", item.image_count())).clicked() {
                actions.push(Action::Open(index));
            }
        });
    });
}

fn show_modal(
    ctx: &egui::Context,
    controller: &GalleryController,
    textures: &HashMap<String, Option<egui::TextureHandle>>,
    actions: &mut Vec<Action>,
) {
    let (Some(item), Some(image)) = (controller.current_item(), controller.current_image()) else {
        return;
    };

    let mut open = true;
    egui::Window::new(item.title.as_str())
        .id(egui::Id::new("item_modal"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut open)
        .show(ctx, |ui| {
            let max = egui::vec2(720.0, ctx.screen_rect().height() * 0.6);
            ui.horizontal(|ui| {
                if ui.button("◀").clicked() {
                    actions.push(Action::PrevImage);
                }
                show_image(ui, textures, image, max);
                if ui.button("▶").clicked() {
                    actions.push(Action::NextImage);
                }
            });

            // Pager dots
            ui.horizontal(|ui| {
                for i in 0..controller.image_count() {
                    let current = i == controller.selected_image_index();
                    if ui.selectable_label(current, if current { "●" } else { "○" }).clicked() {
                        actions.push(Action::JumpTo(i));
                    }
                }
            });

            if let Some(caption) = item.caption() {
                ui.label(caption);
            }
            ui.label(
                egui::RichText::new(format!(
                    "Image {} of {}",
                    controller.selected_image_index() + 1,
                    controller.image_count()
                ))
                .weak(),
            );
            ui.horizontal(|ui| {
                if let Some(github) = &item.links.github {
                    ui.hyperlink_to("Code", github);
                }
                if let Some(live) = &item.links.live {
                    ui.hyperlink_to("Live Demo", live);
                }
            });
        });

    if !open {
        actions.push(Action::Close);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let catalog_path = std::env::args().nth(1).map(PathBuf::from);
    let catalog = Catalog::load_or_builtin(catalog_path.as_deref())?;
    let app = FolioGui::new(catalog)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Folio",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )?;
    Ok(())
}
