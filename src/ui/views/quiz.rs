use crate::QuizApp;
use crate::ui::helpers::{WRONG, big_button, option_button};
use crate::ui::layout::centered_panel;
use egui::{Align, Context, Layout, ProgressBar, RichText};

pub fn ui_quiz(app: &mut QuizApp, ctx: &Context) {
    let Some(view) = app.question_view() else {
        return;
    };

    let mut picked: Option<String> = None;
    let mut next = false;

    centered_panel(ctx, 460.0, 680.0, |ui| {
        let width = ui.available_width();

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.small("TOPIC");
                ui.label(
                    RichText::new(format!("{} ({})", view.topic, view.difficulty)).strong(),
                );
            });
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let timer = RichText::new(format!("⏱ {}", view.time_label()))
                    .monospace()
                    .size(18.0);
                ui.label(if view.time_is_low() {
                    timer.color(WRONG)
                } else {
                    timer
                });
                ui.add_space(12.0);
                ui.label(RichText::new(view.progress_label()).strong());
            });
        });
        ui.add(ProgressBar::new(view.progress_fraction()).desired_height(6.0));
        ui.add_space(16.0);

        ui.label(RichText::new(&view.text).size(20.0).strong());
        ui.add_space(12.0);

        for row in &view.options {
            if option_button(ui, row, width) {
                picked = Some(row.text.clone());
            }
            ui.add_space(4.0);
        }

        if view.answered {
            ui.add_space(12.0);
            ui.with_layout(Layout::right_to_left(Align::Min), |ui| {
                next = big_button(ui, view.next_label(), 160.0, 36.0, true);
            });
        }
    });

    if let Some(option) = picked {
        app.select_option(&option);
    }
    if next {
        app.next_question();
    }
}
