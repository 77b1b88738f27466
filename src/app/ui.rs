use super::content;
use super::state::{DropZones, Notice};
use super::{DocToDataApp, PanelAction, ScrollTarget};
use crate::upload::{ConversionMode, ConvertPayload, SessionStatus, UploadSession};
use crate::utils::file_size::{describe_selection, format_size};
use eframe::egui::{self, Align, Color32, Layout, Margin, RichText, Stroke};

const ACCENT: Color32 = Color32::from_rgb(37, 99, 235);
const SUCCESS: Color32 = Color32::from_rgb(22, 163, 74);
const ERROR: Color32 = Color32::from_rgb(220, 50, 50);
const WARNING: Color32 = Color32::from_rgb(217, 119, 6);
const HINT_FILL: Color32 = Color32::from_rgb(239, 246, 255);
const HINT_STROKE: Color32 = Color32::from_rgb(191, 219, 254);

const PREVIEW_LINES: usize = 5;

fn muted(ui: &egui::Ui) -> Color32 {
    ui.visuals().text_color().gamma_multiply(0.7)
}

impl DocToDataApp {
    pub fn render(&mut self, ctx: &egui::Context) {
        let files_hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());

        egui::TopBottomPanel::bottom("notice").show_animated(ctx, self.state.notice.is_some(), |ui| {
            self.render_notice(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.add_space(10.0);
                    self.render_header(ui);
                    ui.add_space(30.0);
                    self.render_hero(ui);
                    ui.add_space(40.0);
                    self.render_upload_section(ui, files_hovering);
                    ui.add_space(40.0);
                    self.render_card_grid(ui, "Why Choose DocToData?", &content::FEATURES, 3);
                    ui.add_space(40.0);
                    self.render_upcoming(ui);
                    ui.add_space(40.0);
                    self.render_subscription(ui);
                    ui.add_space(40.0);
                    self.render_use_cases(ui);
                    ui.add_space(40.0);
                    self.render_footer(ui);
                    ui.add_space(20.0);
                });
        });
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("📊").size(24.0));
            ui.label(RichText::new(content::PRODUCT_NAME).size(24.0).strong());
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("Get Started").clicked() {
                    self.scroll_to = Some(ScrollTarget::Upload);
                }
            });
        });
        ui.separator();
    }

    fn render_hero(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(content::HERO_TITLE).size(36.0).strong());
            ui.add_space(10.0);
            ui.label(RichText::new(content::HERO_SUBTITLE).size(16.0).color(muted(ui)));
            ui.add_space(20.0);

            let button = egui::Button::new(RichText::new("Start Converting Now").size(18.0))
                .fill(ACCENT)
                .min_size(egui::vec2(240.0, 44.0));
            if ui.add(button).clicked() {
                self.scroll_to = Some(ScrollTarget::Upload);
            }
            ui.add_space(24.0);

            ui.columns(content::TRUST_INDICATORS.len(), |columns| {
                for (column, (figure, caption)) in columns.iter_mut().zip(content::TRUST_INDICATORS) {
                    column.vertical_centered(|ui| {
                        ui.label(RichText::new(figure).size(28.0).strong().color(ACCENT));
                        ui.label(RichText::new(caption).small().color(muted(ui)));
                    });
                }
            });
        });
    }

    fn render_upload_section(&mut self, ui: &mut egui::Ui, files_hovering: bool) {
        let heading = ui
            .vertical_centered(|ui| {
                let heading = ui.heading(content::UPLOAD_HEADING);
                ui.label(RichText::new(content::UPLOAD_SUBHEADING).color(muted(ui)));
                heading
            })
            .inner;
        if self.scroll_to == Some(ScrollTarget::Upload) {
            heading.scroll_to_me(Some(Align::TOP));
            self.scroll_to = None;
        }
        ui.add_space(20.0);

        let mut actions: Vec<(ConversionMode, PanelAction)> = Vec::new();
        let drop_zones = &mut self.drop_zones;
        let state = &mut self.state;
        ui.columns(2, |columns| {
            for (column, session) in columns.iter_mut().zip([&mut state.ai, &mut state.standard]) {
                let mode = session.mode();
                for action in render_upload_panel(column, session, drop_zones, files_hovering) {
                    actions.push((mode, action));
                }
            }
        });

        for (mode, action) in actions {
            self.apply_panel_action(mode, action);
        }
    }

    fn render_card_grid(
        &mut self,
        ui: &mut egui::Ui,
        title: &str,
        cards: &[(&str, &str)],
        per_row: usize,
    ) {
        ui.vertical_centered(|ui| {
            ui.heading(title);
        });
        ui.add_space(16.0);

        for row in cards.chunks(per_row) {
            ui.columns(per_row, |columns| {
                for (column, (card_title, body)) in columns.iter_mut().zip(row) {
                    egui::Frame::group(column.style())
                        .inner_margin(Margin::same(14.0))
                        .rounding(12.0)
                        .show(column, |ui| {
                            ui.set_min_width(ui.available_width());
                            ui.label(RichText::new(*card_title).strong().size(16.0));
                            ui.add_space(6.0);
                            ui.label(RichText::new(*body).color(muted(ui)));
                        });
                }
            });
            ui.add_space(10.0);
        }
    }

    fn render_upcoming(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("Coming Soon").small().strong().color(ACCENT));
        });
        self.render_card_grid(ui, "Exciting Features on the Way", &content::UPCOMING, 3);
        ui.vertical_centered(|ui| {
            if ui.button("Join the Waitlist").clicked() {
                self.scroll_to = Some(ScrollTarget::Subscribe);
            }
        });
    }

    fn render_subscription(&mut self, ui: &mut egui::Ui) {
        let mut submit = false;
        let form = &mut self.state.subscription;

        let heading = ui
            .vertical_centered(|ui| {
                let heading = ui.heading(content::SUBSCRIBE_HEADING);
                ui.label(RichText::new(content::SUBSCRIBE_PITCH).color(muted(ui)));
                ui.add_space(12.0);

                ui.horizontal(|ui| {
                    let submitted = form.is_submitted();
                    let input = ui.add(
                        egui::TextEdit::singleline(&mut form.email)
                            .hint_text("Enter your email address")
                            .desired_width(280.0),
                    );
                    let enter = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                    let label = if submitted { "✓ Subscribed!" } else { "Subscribe" };
                    let clicked = ui.add_enabled(!submitted, egui::Button::new(label)).clicked();
                    submit = !submitted && (clicked || enter);
                });

                if let Some(error) = form.error_message() {
                    ui.colored_label(ERROR, error);
                }
                ui.label(RichText::new(content::SUBSCRIBE_FINE_PRINT).small().color(muted(ui)));
                heading
            })
            .inner;

        if self.scroll_to == Some(ScrollTarget::Subscribe) {
            heading.scroll_to_me(Some(Align::TOP));
            self.scroll_to = None;
        }
        if submit {
            self.submit_subscription();
        }
    }

    fn render_use_cases(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading("Perfect For Every Use Case");
            ui.label(
                RichText::new("From personal finance to enterprise document processing").color(muted(ui)),
            );
        });
        ui.add_space(12.0);
        for row in content::USE_CASES.chunks(4) {
            ui.columns(4, |columns| {
                for (column, use_case) in columns.iter_mut().zip(row) {
                    egui::Frame::group(column.style())
                        .rounding(8.0)
                        .show(column, |ui| {
                            ui.set_min_width(ui.available_width());
                            ui.label(format!("✓ {}", use_case));
                        });
                }
            });
        }
    }

    fn render_footer(&mut self, ui: &mut egui::Ui) {
        ui.separator();
        ui.columns(3, |columns| {
            columns[0].label(RichText::new(content::PRODUCT_NAME).strong());
            columns[0].label(RichText::new(content::FOOTER_BLURB).small());

            columns[1].label(RichText::new("Products").strong());
            for item in content::FOOTER_PRODUCTS {
                columns[1].label(RichText::new(item).small());
            }

            columns[2].label(RichText::new("Support").strong());
            for item in content::FOOTER_SUPPORT {
                columns[2].label(RichText::new(item).small());
            }
        });
        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(content::COPYRIGHT).small().color(muted(ui)));
        });
    }

    fn render_notice(&mut self, ui: &mut egui::Ui) {
        let mut dismiss = false;
        if let Some(notice) = &self.state.notice {
            ui.horizontal(|ui| {
                match notice {
                    Notice::Info(text) => ui.colored_label(SUCCESS, text),
                    Notice::Error(text) => ui.colored_label(ERROR, text),
                };
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    dismiss = ui.small_button("✕").clicked();
                });
            });
        }
        if dismiss {
            self.state.notice = None;
        }
    }
}

/// Draw one conversion widget and report what the user clicked.
fn render_upload_panel(
    ui: &mut egui::Ui,
    session: &mut UploadSession,
    drop_zones: &mut DropZones,
    files_hovering: bool,
) -> Vec<PanelAction> {
    let mut actions = Vec::new();
    let mode = session.mode();

    egui::Frame::group(ui.style())
        .inner_margin(Margin::same(16.0))
        .rounding(16.0)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new(mode.title()).size(22.0).strong());
            ui.label(RichText::new(mode.description()).color(muted(ui)));
            ui.add_space(12.0);

            if mode.supports_columns() {
                render_column_editor(ui, session, &mut actions);
                ui.add_space(12.0);
            }

            let uploading = session.is_uploading();
            let highlighted = files_hovering && drop_zones.hovered() == Some(mode);
            let stroke_color = if highlighted { ACCENT } else { ui.visuals().widgets.noninteractive.bg_stroke.color };

            let zone = egui::Frame::none()
                .stroke(Stroke::new(2.0, stroke_color))
                .rounding(12.0)
                .inner_margin(Margin::same(24.0))
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.vertical_centered(|ui| {
                        if uploading {
                            ui.spinner();
                            ui.label(RichText::new("Converting...").strong().size(16.0));
                        } else {
                            ui.label(RichText::new("📤").size(32.0));
                            ui.label(RichText::new(content::DROP_PROMPT).strong().size(16.0));
                        }
                        ui.label(RichText::new(content::DROP_LIMITS).small().color(muted(ui)));

                        if let Some(file) = session.selected_file() {
                            ui.add_space(8.0);
                            ui.colored_label(ACCENT, describe_selection(&file.name, file.size));
                            if !file.has_accepted_extension() {
                                ui.colored_label(WARNING, "This file type may not be supported");
                            }
                            if file.exceeds_advised_size() {
                                ui.colored_label(
                                    WARNING,
                                    format!(
                                        "Larger than the recommended {}",
                                        format_size(crate::upload::ADVISED_MAX_BYTES)
                                    ),
                                );
                            }
                        }
                    });
                })
                .response;

            let zone = ui.interact(zone.rect, ui.id().with(("drop-zone", mode)), egui::Sense::click());
            if zone.clicked() && !uploading {
                actions.push(PanelAction::PickFile);
            }
            drop_zones.record(mode, zone.rect, ui.rect_contains_pointer(zone.rect));

            match session.status() {
                SessionStatus::Idle => {}
                SessionStatus::Uploading => {
                    ui.add_space(8.0);
                    if ui.button("Cancel").clicked() {
                        actions.push(PanelAction::Cancel);
                    }
                }
                SessionStatus::Failed => {
                    ui.add_space(12.0);
                    outcome_frame(ERROR).show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.colored_label(ERROR, session.error_message().unwrap_or_default());
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                if ui.button("Try again").clicked() {
                                    actions.push(PanelAction::Retry);
                                }
                            });
                        });
                    });
                }
                SessionStatus::Succeeded => {
                    ui.add_space(12.0);
                    outcome_frame(SUCCESS).show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.colored_label(SUCCESS, RichText::new("Conversion completed!").strong());
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                let label = match session.payload() {
                                    Some(ConvertPayload::DownloadUrl { .. }) => "⬇ Open Download Link",
                                    _ => "⬇ Download CSV",
                                };
                                if ui.add(egui::Button::new(label).fill(SUCCESS)).clicked() {
                                    actions.push(PanelAction::Download);
                                }
                            });
                        });

                        if let Some(ConvertPayload::Csv(text)) = session.payload() {
                            let preview: Vec<&str> = text.lines().take(PREVIEW_LINES).collect();
                            if !preview.is_empty() {
                                ui.add_space(6.0);
                                ui.label(RichText::new(preview.join("\n")).monospace().small());
                            }
                        }
                    });
                }
            }
        });

    actions
}

fn render_column_editor(ui: &mut egui::Ui, session: &mut UploadSession, actions: &mut Vec<PanelAction>) {
    egui::Frame::none()
        .fill(HINT_FILL)
        .stroke(Stroke::new(1.0, HINT_STROKE))
        .rounding(12.0)
        .inner_margin(Margin::same(12.0))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(content::COLUMN_HINT_TITLE).strong().color(Color32::BLACK));
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let label = if session.column_editor_visible { "Done" } else { "Add columns" };
                    if ui.small_button(label).clicked() {
                        actions.push(PanelAction::ToggleColumns);
                    }
                });
            });
            ui.label(RichText::new(content::COLUMN_HINT_PITCH).small().color(Color32::DARK_GRAY));

            if session.column_editor_visible {
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    let input = ui.add(
                        egui::TextEdit::singleline(&mut session.column_input)
                            .hint_text(content::COLUMN_HINT_PLACEHOLDER)
                            .desired_width(ui.available_width() - 60.0),
                    );
                    let enter = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if ui.button("Add").clicked() || enter {
                        actions.push(PanelAction::AddColumn);
                    }
                });
                for (kind, columns) in content::COLUMN_HINT_EXAMPLES {
                    ui.label(
                        RichText::new(format!("{}: {}", kind, columns))
                            .small()
                            .color(Color32::DARK_GRAY),
                    );
                }
            }

            if !session.target_columns.is_empty() {
                ui.add_space(8.0);
                ui.label(
                    RichText::new(format!(
                        "AI will extract these {} columns:",
                        session.target_columns.len()
                    ))
                    .small()
                    .color(Color32::BLACK),
                );
                ui.horizontal_wrapped(|ui| {
                    for (index, column) in session.target_columns.as_slice().iter().enumerate() {
                        ui.label(RichText::new(column).strong().color(ACCENT));
                        if ui.small_button("×").on_hover_text("Remove").clicked() {
                            actions.push(PanelAction::RemoveColumn(index));
                        }
                    }
                });
                ui.colored_label(
                    SUCCESS,
                    "✓ Column specification will improve extraction accuracy and maintain perfect alignment",
                );
            }
        });
}

fn outcome_frame(color: Color32) -> egui::Frame {
    egui::Frame::none()
        .stroke(Stroke::new(1.0, color))
        .rounding(8.0)
        .inner_margin(Margin::same(12.0))
}
