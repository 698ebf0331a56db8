use crate::QuizApp;
use crate::ui::layout::centered_panel;
use egui::{Context, Spinner};

pub fn ui_loading(app: &mut QuizApp, ctx: &Context) {
    let Some(pending) = app.session.pending() else {
        return;
    };
    let text = format!(
        "Consulting the AI Professor about \"{}\" ({})...",
        pending.topic, pending.difficulty
    );

    centered_panel(ctx, 120.0, 520.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.add(Spinner::new().size(40.0));
            ui.add_space(12.0);
            ui.label(text);
        });
    });
}
