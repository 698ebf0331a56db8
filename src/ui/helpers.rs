// src/ui/helpers.rs
use crate::view_models::{OptionRow, OptionState};
use egui::{Button, Color32, RichText, Stroke, Ui, Vec2};

pub const CORRECT: Color32 = Color32::from_rgb(22, 163, 74);
pub const WRONG: Color32 = Color32::from_rgb(220, 38, 38);
pub const ACCENT: Color32 = Color32::from_rgb(37, 99, 235);

pub fn big_button(ui: &mut Ui, label: &str, width: f32, height: f32, enabled: bool) -> bool {
    ui.add_enabled(enabled, Button::new(label).min_size(Vec2::new(width, height)))
        .clicked()
}

/// One answer option. Only `Open` options react to clicks.
pub fn option_button(ui: &mut Ui, row: &OptionRow, width: f32) -> bool {
    let label = match row.state.marker() {
        "" => row.text.clone(),
        marker => format!("{}   {marker}", row.text),
    };

    let button = match row.state {
        OptionState::Open => Button::new(label),
        OptionState::SelectedCorrect => {
            Button::new(RichText::new(label).color(Color32::WHITE).strong()).fill(CORRECT)
        }
        OptionState::SelectedWrong => {
            Button::new(RichText::new(label).color(Color32::WHITE).strong()).fill(WRONG)
        }
        OptionState::RevealedCorrect => {
            Button::new(RichText::new(label).color(CORRECT)).stroke(Stroke::new(2.0, CORRECT))
        }
        OptionState::Dimmed => Button::new(RichText::new(label).weak()),
    }
    .min_size(Vec2::new(width, 40.0));

    // answered rows keep their colours instead of the disabled grey
    if row.state.is_clickable() {
        ui.add(button).clicked()
    } else {
        ui.add(button.sense(egui::Sense::hover()));
        false
    }
}
