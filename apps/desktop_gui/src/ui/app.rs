use crossbeam_channel::{Receiver, Sender};
use shared::domain::ChatAuthor;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    actions::{request_sensor_list, request_sensor_query, submit_chat},
    events::UiEvent,
    orchestration::dispatch_backend_command,
    reducer,
    state::{Action, ConsoleState},
};

const ME_BUBBLE: egui::Color32 = egui::Color32::from_rgb(44, 92, 160);
const BOT_BUBBLE: egui::Color32 = egui::Color32::from_rgb(52, 56, 64);

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    server_url: String,
    state: ConsoleState,
}

impl DesktopGuiApp {
    /// Sensor loading is queued once here, the same as pressing "List sensors".
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        server_url: String,
        state: ConsoleState,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            server_url,
            state,
        };
        if let Some(cmd) = request_sensor_list(&mut app.state) {
            dispatch_backend_command(&app.cmd_tx, cmd, &mut app.state);
        }
        app
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            reducer::apply(&mut self.state, event);
        }
    }

    fn dispatch(&mut self, cmd: Option<BackendCommand>) {
        if let Some(cmd) = cmd {
            dispatch_backend_command(&self.cmd_tx, cmd, &mut self.state);
        }
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(egui::RichText::new(&self.state.status).weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(egui::RichText::new(&self.server_url).weak());
                });
            });
        });
    }

    fn show_sensor_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("sensor_panel")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                ui.heading("Sensors");
                ui.add_space(6.0);

                let list_busy = self.state.statuses.is_pending(Action::ListSensors);
                if ui
                    .add_enabled(!list_busy, egui::Button::new("List sensors"))
                    .clicked()
                {
                    let cmd = request_sensor_list(&mut self.state);
                    self.dispatch(cmd);
                }

                ui.add_space(6.0);
                let selected_text = self
                    .state
                    .selected_sensor_label()
                    .unwrap_or("(no sensor)")
                    .to_string();
                let ConsoleState {
                    sensors,
                    selected_sensor,
                    windows,
                    window,
                    range_start,
                    range_end,
                    ..
                } = &mut self.state;

                egui::Grid::new("sensor_query_grid")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Sensor");
                        egui::ComboBox::from_id_salt("sensor_select")
                            .selected_text(selected_text)
                            .width(200.0)
                            .show_ui(ui, |ui| {
                                for sensor in sensors.iter() {
                                    ui.selectable_value(
                                        selected_sensor,
                                        Some(sensor.sensor_id.clone()),
                                        sensor.label(),
                                    );
                                }
                            });
                        ui.end_row();

                        ui.label("Window");
                        egui::ComboBox::from_id_salt("window_select")
                            .selected_text(window.as_str())
                            .show_ui(ui, |ui| {
                                for preset in windows.iter() {
                                    ui.selectable_value(window, preset.clone(), preset.as_str());
                                }
                            });
                        ui.end_row();

                        ui.label("Start");
                        ui.add(
                            egui::TextEdit::singleline(range_start)
                                .hint_text("ISO-8601, used when window is empty"),
                        );
                        ui.end_row();

                        ui.label("End");
                        ui.add(egui::TextEdit::singleline(range_end).hint_text("ISO-8601"));
                        ui.end_row();
                    });

                ui.add_space(6.0);
                let query_busy = self.state.statuses.is_pending(Action::QuerySensor);
                if ui
                    .add_enabled(!query_busy, egui::Button::new("Query"))
                    .clicked()
                {
                    let cmd = request_sensor_query(&mut self.state);
                    self.dispatch(cmd);
                }

                ui.separator();
                egui::ScrollArea::vertical()
                    .id_salt("sensor_output")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(&self.state.sensor_output).monospace(),
                            )
                            .wrap(),
                        );
                    });
            });
    }

    fn show_composer(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("composer")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(10, 8)))
            .show(ctx, |ui| {
                let chat_busy = self.state.statuses.is_pending(Action::Chat);
                ui.horizontal(|ui| {
                    let send_width = 72.0;
                    let response = ui.add_sized(
                        [(ui.available_width() - send_width - 8.0).max(80.0), 24.0],
                        egui::TextEdit::singleline(&mut self.state.prompt)
                            .id_salt("prompt")
                            .hint_text("Ask something (Enter to send)"),
                    );
                    let send_shortcut =
                        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    let clicked_send = ui
                        .add_enabled(!chat_busy, egui::Button::new("Send").min_size([send_width, 24.0].into()))
                        .clicked();

                    if send_shortcut || clicked_send {
                        let cmd = submit_chat(&mut self.state);
                        self.dispatch(cmd);
                        response.request_focus();
                    }
                });
            });
    }

    fn show_chat_log(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Chat");
            ui.separator();
            egui::ScrollArea::vertical()
                .id_salt("chat_log")
                .stick_to_bottom(true)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let max_bubble = ui.available_width() * 0.75;
                    for message in &self.state.chat_log {
                        let (align, fill) = match message.author {
                            ChatAuthor::Me => (egui::Align::Max, ME_BUBBLE),
                            ChatAuthor::Bot => (egui::Align::Min, BOT_BUBBLE),
                        };
                        ui.with_layout(egui::Layout::top_down(align), |ui| {
                            egui::Frame::new()
                                .fill(fill)
                                .corner_radius(8.0)
                                .inner_margin(egui::Margin::symmetric(10, 6))
                                .show(ui, |ui| {
                                    ui.set_max_width(max_bubble);
                                    ui.add(
                                        egui::Label::new(
                                            egui::RichText::new(&message.text)
                                                .color(egui::Color32::WHITE),
                                        )
                                        .wrap(),
                                    );
                                });
                        });
                        ui.add_space(4.0);
                    }
                });
        });
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_status_bar(ctx);
        self.show_sensor_panel(ctx);
        self.show_composer(ctx);
        self.show_chat_log(ctx);
    }
}

#[cfg(test)]
#[path = "../tests/app_tests.rs"]
mod tests;
