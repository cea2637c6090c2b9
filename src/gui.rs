use cinelist::movie::ListName;
use cinelist::state::{DialogKind, UiState};
use cinelist::worker::{WorkerCommand, WorkerEvent};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use eframe::egui;
use std::time::Duration;

pub struct MovieLookupApp {
    state: UiState,
    cmd_tx: Sender<WorkerCommand>,
    event_rx: Receiver<WorkerEvent>,
}

impl MovieLookupApp {
    pub fn new(
        state: UiState,
        cmd_tx: Sender<WorkerCommand>,
        event_rx: Receiver<WorkerEvent>,
    ) -> Self {
        Self {
            state,
            cmd_tx,
            event_rx,
        }
    }

    fn process_worker_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.state.apply_event(event);
        }
    }

    fn dispatch(&mut self, cmd: Option<WorkerCommand>) {
        let Some(cmd) = cmd else {
            return;
        };
        let name = cmd.name();
        match self.cmd_tx.try_send(cmd) {
            Ok(()) => tracing::debug!(command = name, "queued ui->worker command"),
            Err(TrySendError::Full(_)) => {
                self.state
                    .command_rejected("Too many requests in flight; please retry");
            }
            Err(TrySendError::Disconnected(_)) => {
                self.state
                    .command_rejected("Background worker stopped; restart the application");
            }
        }
    }

    fn show_search_row(&mut self, ui: &mut egui::Ui) {
        let busy = self.state.is_busy();
        ui.horizontal(|ui| {
            ui.label("Search for a Movie:");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.state.search_input)
                    .hint_text("Title or TMDB id")
                    .desired_width(320.0),
            );
            let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            let clicked = ui.add_enabled(!busy, egui::Button::new("Search")).clicked();
            if clicked || (enter && !busy) {
                let cmd = self.state.submit_search();
                self.dispatch(cmd);
            }
        });
        ui.horizontal(|ui| {
            for list in [ListName::Watchlist, ListName::Watched] {
                let label = format!("Add to {}", list.label());
                if ui.add_enabled(!busy, egui::Button::new(label)).clicked() {
                    let cmd = self.state.submit_add_to_list(list);
                    self.dispatch(cmd);
                }
            }
            if busy {
                ui.spinner();
            }
        });
    }

    fn show_details(&mut self, ui: &mut egui::Ui) {
        ui.heading("Details");
        egui::ScrollArea::vertical()
            .id_salt("details")
            .max_height(220.0)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut self.state.details.as_str())
                        .desired_width(f32::INFINITY)
                        .desired_rows(8),
                );
            });
    }

    fn show_list(&mut self, ui: &mut egui::Ui) {
        ui.heading("My List");
        egui::ScrollArea::vertical()
            .id_salt("list")
            .show(ui, |ui| {
                if self.state.list_entries.is_empty() {
                    ui.weak("Nothing here yet");
                }
                for entry in &self.state.list_entries {
                    ui.label(entry.as_str());
                }
            });
    }

    fn show_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.state.dialog.clone() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new(dialog.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                let color = match dialog.kind {
                    DialogKind::Info => ui.visuals().text_color(),
                    DialogKind::Warning => ui.visuals().warn_fg_color,
                    DialogKind::Error => ui.visuals().error_fg_color,
                };
                ui.label(egui::RichText::new(dialog.message.as_str()).color(color));
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.state.dismiss_dialog();
        }
    }
}

impl eframe::App for MovieLookupApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_worker_events();

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.state.status.as_str());
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(self.state.dialog.is_none(), |ui| {
                self.show_search_row(ui);
                ui.separator();
                self.show_details(ui);
                ui.separator();
                self.show_list(ui);
            });
        });
        self.show_dialog(ctx);

        if self.state.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
