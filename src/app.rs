use eframe::{App, CreationContext, Frame};
use egui::text::{CCursor, CCursorRange};
use egui::{Color32, ColorImage, RichText, TextureHandle, TextureOptions};
use std::collections::HashMap;
use std::time::Instant;
use zeroize::Zeroize;

use protectit::complexity::IndicatorClass;
use protectit::controller::{Action, Controller, FocusRequest, ViewState};
use protectit::fingerprint::{FingerprintKind, Surface};
use protectit::settings::Settings;

const PASSWORD_FIELD: &str = "password_field";

/// The eframe app: draws the controller's state and forwards input
pub struct ProtectItApp {
    controller: Controller,
    // Uploaded fingerprints, keyed by the surface revision they show
    textures: HashMap<FingerprintKind, (u64, TextureHandle)>,
}

impl ProtectItApp {
    pub fn new(cc: &CreationContext<'_>, settings: &Settings) -> Self {
        let canvas_supported = cc.wgpu_render_state.is_some() || cc.gl.is_some();
        if !canvas_supported {
            log::warn!("no render backend, visual hash disabled");
        }
        Self {
            controller: Controller::new(settings, canvas_supported),
            textures: HashMap::new(),
        }
    }
}

impl App for ProtectItApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let now = Instant::now();
        self.controller.tick(now);

        let blocked = self.controller.state().notification().is_some();
        // Keep the focus request until the notification is gone
        let focus = if blocked {
            FocusRequest::None
        } else {
            self.controller.take_focus()
        };

        let mut actions = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let state = self.controller.state();
                    show_options(ui, state, &mut actions);
                    ui.separator();
                    show_password_field(ui, state, focus, &mut actions);
                    show_buttons(ui, state, &mut actions);
                    ui.separator();
                    show_strength(ui, state);
                    show_spelling(ui, state);
                    show_fingerprints(ui, state, &mut self.textures);
                });
            });
        });
        show_notification(ctx, self.controller.state(), &mut actions);

        for action in actions {
            self.controller.dispatch(action, now);
        }
        if let Some(wait) = self.controller.next_roll_in(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }
}

fn show_options(ui: &mut egui::Ui, state: &ViewState, actions: &mut Vec<Action>) {
    ui.heading("Protect It! Password Generator");

    let mut options = state.options;
    ui.horizontal_wrapped(|ui| {
        ui.checkbox(&mut options.use_symbols, "Symbols (&€#...)");
        ui.checkbox(&mut options.use_uppercase, "Uppercase (A-Z)");
        ui.checkbox(&mut options.use_digits, "Digits (0-9)");
        ui.checkbox(&mut options.use_lowercase, "Lowercase (a-z)");
    });
    ui.horizontal(|ui| {
        ui.label("Length:");
        ui.add(egui::DragValue::new(&mut options.length).speed(0.2));
        ui.label(RichText::new("(2 to 128)").weak());
    });
    if options != state.options {
        actions.push(Action::SetOptions(options));
    }

    let mut spelling = state.spell_password;
    let mut request = state.fingerprint_request;
    ui.horizontal_wrapped(|ui| {
        ui.checkbox(&mut spelling, "Spell password");
        ui.checkbox(&mut request.qr, "QR code hash");
        ui.checkbox(&mut request.visual, "Visual hash");
    });
    if spelling != state.spell_password {
        actions.push(Action::SetSpelling(spelling));
    }
    if request != state.fingerprint_request {
        actions.push(Action::SetFingerprints(request));
    }
}

fn show_password_field(
    ui: &mut egui::Ui,
    state: &ViewState,
    focus: FocusRequest,
    actions: &mut Vec<Action>,
) {
    let id = egui::Id::new(PASSWORD_FIELD);
    ui.label("Password:");

    let response = if state.read_only {
        // A &str buffer can be selected but not edited
        let mut view: &str = &state.password;
        ui.add(
            egui::TextEdit::singleline(&mut view)
                .id(id)
                .password(state.masked)
                .desired_width(f32::INFINITY),
        )
    } else {
        let mut text = state.password.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut text)
                .id(id)
                .password(state.masked)
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            actions.push(Action::Edit(text));
        } else {
            text.zeroize();
        }
        response
    };

    match focus {
        FocusRequest::None => {}
        FocusRequest::Focus => response.request_focus(),
        FocusRequest::Blur => response.surrender_focus(),
        FocusRequest::SelectAll => {
            let mut edit_state = egui::TextEdit::load_state(ui.ctx(), id).unwrap_or_default();
            let end = CCursor::new(state.password.chars().count());
            edit_state
                .cursor
                .set_char_range(Some(CCursorRange::two(CCursor::new(0), end)));
            egui::TextEdit::store_state(ui.ctx(), id, edit_state);
            response.request_focus();
        }
    }
}

fn show_buttons(ui: &mut egui::Ui, state: &ViewState, actions: &mut Vec<Action>) {
    ui.horizontal(|ui| {
        if ui.button("Generate").clicked() {
            actions.push(Action::Generate);
        }
        if ui.button("Clear").clicked() {
            actions.push(Action::Clear);
        }
        let mask_label = if state.masked { "Show" } else { "Hide" };
        if ui.button(mask_label).clicked() {
            actions.push(Action::ToggleMask);
        }
        let lock_label = if state.read_only { "Writable" } else { "Read-only" };
        if ui.button(lock_label).clicked() {
            actions.push(Action::ToggleReadOnly);
        }
        if ui.button("Copy").clicked() {
            actions.push(Action::CopyAssist);
        }
    });
}

fn indicator_color(class: IndicatorClass) -> Color32 {
    match class {
        IndicatorClass::Invalid => Color32::RED,
        IndicatorClass::Middle => Color32::YELLOW,
        IndicatorClass::Valid => Color32::GREEN,
    }
}

fn show_strength(ui: &mut egui::Ui, state: &ViewState) {
    let indicator = &state.indicator;
    ui.horizontal(|ui| {
        ui.label("Complexity:");
        ui.add(
            egui::ProgressBar::new((indicator.width / 100.0) as f32)
                .fill(indicator_color(indicator.class))
                .text(RichText::new(&indicator.label).color(Color32::BLACK)),
        );
    });
    ui.label(format!("Brute force time: {}", state.crack_time));
}

fn show_spelling(ui: &mut egui::Ui, state: &ViewState) {
    if let Some(spelling) = &state.spelling {
        ui.add_space(5.0);
        ui.label("Spelling:");
        let mut view: &str = spelling;
        ui.add(
            egui::TextEdit::multiline(&mut view)
                .desired_rows(2)
                .desired_width(f32::INFINITY),
        );
    }
}

fn show_fingerprints(
    ui: &mut egui::Ui,
    state: &ViewState,
    textures: &mut HashMap<FingerprintKind, (u64, TextureHandle)>,
) {
    let panel = &state.fingerprints;
    // Drop uploads of surfaces the controller has discarded
    if panel.qr.is_none() {
        textures.remove(&FingerprintKind::Qr);
    }
    if panel.visual.is_none() {
        textures.remove(&FingerprintKind::VisualHash);
    }
    if !panel.visible {
        return;
    }
    ui.add_space(5.0);
    ui.label("Hashes:");
    ui.horizontal(|ui| {
        for (kind, surface) in [
            (FingerprintKind::Qr, &panel.qr),
            (FingerprintKind::VisualHash, &panel.visual),
        ] {
            let Some(surface) = surface.as_ref().filter(|s| !s.is_hidden()) else {
                continue;
            };
            let texture = texture_for(textures, ui.ctx(), kind, surface);
            ui.image((texture.id(), texture.size_vec2()))
                .on_hover_text(kind.to_string());
        }
    });
}

fn to_color_image(surface: &Surface) -> ColorImage {
    let image = surface.image();
    ColorImage::from_rgba_unmultiplied(
        [image.width() as usize, image.height() as usize],
        image.as_raw(),
    )
}

/// Upload `surface` unless the cached texture already shows this revision.
fn texture_for<'a>(
    textures: &'a mut HashMap<FingerprintKind, (u64, TextureHandle)>,
    ctx: &egui::Context,
    kind: FingerprintKind,
    surface: &Surface,
) -> &'a TextureHandle {
    let (revision, texture) = textures.entry(kind).or_insert_with(|| {
        (
            surface.revision(),
            ctx.load_texture(kind.to_string(), to_color_image(surface), TextureOptions::NEAREST),
        )
    });
    if *revision != surface.revision() {
        texture.set(to_color_image(surface), TextureOptions::NEAREST);
        *revision = surface.revision();
    }
    texture
}

fn show_notification(ctx: &egui::Context, state: &ViewState, actions: &mut Vec<Action>) {
    let Some(message) = state.notification() else {
        return;
    };
    egui::Window::new("Protect It!")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(message);
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                actions.push(Action::DismissNotification);
            }
        });
}
