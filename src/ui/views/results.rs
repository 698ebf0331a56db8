use crate::QuizApp;
use crate::quiz::{FinishReason, ReviewRow};
use crate::ui::helpers::{ACCENT, CORRECT, WRONG, big_button};
use crate::ui::layout::scroll_panel;
use egui::{Context, Frame, RichText, Stroke, Ui};

pub fn ui_results(app: &mut QuizApp, ctx: &Context) {
    let Some(summary) = app.session.summary() else {
        return;
    };
    let mut new_topic = false;

    scroll_panel(ctx, "results_scroll", 720.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(if summary.passed() { "✅" } else { "📖" }).size(40.0));
            ui.heading("Quiz Completed!");
            if summary.reason == FinishReason::TimeExpired {
                ui.label(RichText::new("Time's up!").color(WRONG));
            }
            ui.label(
                RichText::new(format!(
                    "You scored {} out of {} ({}%)",
                    summary.score, summary.total, summary.percentage
                ))
                .size(18.0),
            );
            ui.add_space(10.0);
            new_topic = big_button(ui, "🔄 New Topic", 160.0, 36.0, true);
        });

        ui.add_space(20.0);
        ui.heading("Detailed Review");
        ui.separator();

        for row in &summary.rows {
            review_card(ui, row);
            ui.add_space(8.0);
        }
    });

    if new_topic {
        app.new_topic();
    }
}

fn review_card(ui: &mut Ui, row: &ReviewRow) {
    let colour = if row.status.is_correct() { CORRECT } else { WRONG };
    Frame::group(ui.style())
        .stroke(Stroke::new(1.0, colour))
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new(format!("Q{}.", row.number)).weak().strong());
                ui.label(RichText::new(&row.text).strong());
            });
            ui.horizontal(|ui| {
                ui.label("Your Answer:");
                ui.label(RichText::new(row.submitted_label()).color(colour));
                ui.label(if row.status.is_correct() { "✅" } else { "❌" });
            });
            if row.shows_correct_answer() {
                ui.horizontal(|ui| {
                    ui.label("Correct Answer:");
                    ui.label(RichText::new(&row.correct_answer).color(CORRECT));
                });
            }
            ui.add_space(4.0);
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new("Explanation:").strong().color(ACCENT));
                ui.label(&row.explanation);
            });
        });
}
