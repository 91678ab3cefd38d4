//! Single-page disclosure form: inputs on the left, generated text below, history on the right.

use std::time::Duration;

use client_core::{
    form::{MAX_YEAR, MIN_YEAR},
    FormController,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    domain::{Framework, Tone},
    protocol::{DisclosureResponse, HistoryItem},
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent,
    orchestration::dispatch_backend_command,
    reducer::{history_command, reduce, submit_command},
};

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(200);

pub struct DesktopGuiApp {
    controller: FormController,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    base_url: String,
    status: String,
}

impl DesktopGuiApp {
    pub fn new(
        controller: FormController,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        base_url: String,
    ) -> Self {
        let mut app = Self {
            controller,
            cmd_tx,
            ui_rx,
            base_url,
            status: String::new(),
        };
        let initial = history_command(&app.controller);
        app.dispatch(initial);
        app
    }

    fn dispatch(&mut self, cmd: BackendCommand) -> bool {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status)
    }

    fn submit(&mut self) {
        let Some(cmd) = submit_command(&mut self.controller) else {
            return;
        };
        if !self.dispatch(cmd) {
            self.controller.finish_submit_err();
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            if let Some(follow_up) = reduce(&mut self.controller, event, &mut self.status) {
                self.dispatch(follow_up);
            }
        }
    }

    fn show_header(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("ESG disclosure generator");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(self.base_url.as_str());
                if !self.status.is_empty() {
                    ui.label(self.status.as_str());
                    ui.separator();
                }
            });
        });
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let form = &mut self.controller.form;

        egui::Grid::new("company_fields")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Company name");
                ui.text_edit_singleline(&mut form.company_name);
                ui.end_row();

                ui.label("Sector");
                ui.text_edit_singleline(&mut form.sector);
                ui.end_row();

                ui.label("Reporting year");
                ui.add(egui::DragValue::new(&mut form.year).range(MIN_YEAR..=MAX_YEAR));
                ui.end_row();

                ui.label("Tone");
                ui.horizontal(|ui| {
                    for tone in [Tone::Regulatory, Tone::InvestorFriendly] {
                        ui.radio_value(&mut form.tone, tone, tone.label());
                    }
                });
                ui.end_row();

                ui.label("Frameworks");
                ui.horizontal(|ui| {
                    for framework in Framework::ALL {
                        ui.checkbox(form.frameworks.flag_mut(framework), framework.as_str());
                    }
                });
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.strong("Metrics");
        let mut remove_at = None;
        egui::Grid::new("metric_rows")
            .num_columns(4)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                for (index, row) in form.metrics.iter_mut().enumerate() {
                    ui.add(egui::TextEdit::singleline(&mut row.name).hint_text("Name"));
                    ui.add(
                        egui::TextEdit::singleline(&mut row.value)
                            .hint_text("Value")
                            .desired_width(90.0),
                    );
                    ui.add(
                        egui::TextEdit::singleline(&mut row.unit)
                            .hint_text("Unit")
                            .desired_width(70.0),
                    );
                    if ui.small_button("Remove").clicked() {
                        remove_at = Some(index);
                    }
                    ui.end_row();
                }
            });
        if let Some(index) = remove_at {
            form.remove_metric(index);
        }
        if ui.button("Add metric").clicked() {
            form.add_metric();
        }

        ui.add_space(8.0);
        ui.strong("Initiatives and highlights");
        ui.add(
            egui::TextEdit::multiline(&mut form.initiatives)
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );

        ui.add_space(8.0);
        let loading = self.controller.is_loading();
        let mut submit_clicked = false;
        ui.horizontal(|ui| {
            submit_clicked = ui
                .add_enabled(!loading, egui::Button::new("Generate disclosure"))
                .clicked();
            if loading {
                ui.spinner();
                ui.weak("Generating...");
            }
        });
        if let Some(message) = self.controller.error_message() {
            let error_color = ui.visuals().error_fg_color;
            ui.colored_label(error_color, message);
        }
        if submit_clicked {
            self.submit();
        }
    }

    fn show_result(&self, ui: &mut egui::Ui) {
        let Some(result) = self.controller.result() else {
            return;
        };
        show_disclosure(ui, result);
    }

    fn show_history(&self, ui: &mut egui::Ui) {
        ui.heading("History");
        ui.separator();
        let items = self.controller.history();
        if items.is_empty() {
            ui.weak("No disclosures generated yet.");
            return;
        }
        egui::ScrollArea::vertical()
            .id_salt("history_scroll")
            .show(ui, |ui| {
                for item in items {
                    show_history_item(ui, item);
                }
            });
    }
}

fn show_disclosure(ui: &mut egui::Ui, result: &DisclosureResponse) {
    ui.horizontal(|ui| {
        ui.heading("Disclosure");
        if ui.small_button("Copy").clicked() {
            ui.ctx().copy_text(result.disclosure_text.clone());
        }
    });
    ui.label(result.disclosure_text.as_str());

    if !result.improvement_suggestions.is_empty() {
        ui.add_space(6.0);
        ui.strong("Suggestions for improvement");
        for suggestion in &result.improvement_suggestions {
            ui.label(format!("\u{2022} {suggestion}"));
        }
    }

    if result.has_usage() {
        ui.add_space(6.0);
        let count = |n: Option<u64>| n.map_or_else(|| "-".to_string(), |n| n.to_string());
        ui.weak(format!(
            "model {} | prompt {} | completion {} | total {} tokens",
            result.model.as_deref().unwrap_or("-"),
            count(result.prompt_tokens),
            count(result.completion_tokens),
            count(result.total_tokens),
        ));
    }
}

fn show_history_item(ui: &mut egui::Ui, item: &HistoryItem) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.strong(format!("{} ({})", item.company_name, item.year));
        let frameworks = item
            .frameworks
            .iter()
            .map(|framework| framework.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let created = item
            .created_at_utc()
            .map(|ts| ts.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| item.created_at.clone());
        ui.small(format!("#{} | {} | {}", item.id.0, frameworks, created));
        ui.label(item.disclosure_preview.as_str());
    });
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("header").show(ctx, |ui| self.show_header(ui));
        egui::SidePanel::right("history_panel")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.show_history(ui));
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("form_scroll")
                .show(ui, |ui| {
                    self.show_form(ui);
                    ui.separator();
                    self.show_result(ui);
                });
        });

        // Worker replies arrive over a channel; keep polling for them.
        ctx.request_repaint_after(EVENT_POLL_INTERVAL);
    }
}
