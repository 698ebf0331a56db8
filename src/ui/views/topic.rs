use crate::QuizApp;
use crate::model::Difficulty;
use crate::ui::helpers::WRONG;
use crate::ui::layout::centered_panel;
use egui::{Button, ComboBox, Context, Key, RichText, TextEdit};

pub fn ui_topic(app: &mut QuizApp, ctx: &Context) {
    centered_panel(ctx, 220.0, 640.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("What do you want to learn?");
            ui.label("Enter any topic and select your difficulty level.");
        });
        ui.add_space(18.0);

        let mut submit = false;
        ui.horizontal(|ui| {
            ComboBox::from_id_salt("difficulty")
                .selected_text(app.difficulty.label())
                .show_ui(ui, |ui| {
                    for level in Difficulty::ALL {
                        ui.selectable_value(&mut app.difficulty, level, level.label());
                    }
                });

            let input_width = (ui.available_width() - 110.0).max(120.0);
            let input = ui.add(
                TextEdit::singleline(&mut app.topic_input)
                    .hint_text("Enter topic (e.g., Python, History)...")
                    .desired_width(input_width),
            );
            if input.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                submit = true;
            }

            if ui.add_sized([100.0, 28.0], Button::new("Start Quiz")).clicked() {
                submit = true;
            }
        });

        if submit {
            app.submit_topic();
        }

        if !app.message.is_empty() {
            ui.add_space(12.0);
            ui.label(RichText::new(&app.message).color(WRONG));
        }
    });
}
