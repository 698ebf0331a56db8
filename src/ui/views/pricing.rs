use crate::QuizApp;
use crate::model::Plan;
use crate::ui::helpers::{ACCENT, CORRECT, WRONG};
use crate::ui::layout::scroll_panel;
use egui::{Button, Color32, Context, Frame, RichText, Stroke, TextEdit, Ui, Vec2};

const KEY_HELP: &str = "1. Log in to Razorpay Dashboard.\n\
2. Go to Settings → API Keys.\n\
3. Generate \"Test Mode\" Key.\n\
4. Copy Key ID (starts with rzp_test_...).";

pub fn ui_pricing(app: &mut QuizApp, ctx: &Context) {
    let mut buy: Option<usize> = None;

    scroll_panel(ctx, "pricing_scroll", 760.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new("Simple, Transparent Pricing").size(26.0));
            ui.label("Choose the plan that fits your learning needs.");
        });
        ui.add_space(12.0);

        key_box(app, ui);
        ui.add_space(8.0);

        if !app.message.is_empty() {
            let colour = if app.last_payment.is_some() && app.message.starts_with("Payment") {
                CORRECT
            } else {
                WRONG
            };
            ui.label(RichText::new(&app.message).color(colour));
        }
        if app.is_checkout_pending() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Waiting for the checkout window...");
            });
        }
        ui.add_space(12.0);

        if app.plans.is_empty() {
            ui.label("No plans available right now.");
        }
        let card_width = ((ui.available_width() - 16.0) / 2.0).max(220.0);
        ui.horizontal_wrapped(|ui| {
            for (index, plan) in app.plans.iter().enumerate() {
                if plan_card(ui, plan, card_width) {
                    buy = Some(index);
                }
            }
        });

        if let Some(receipt) = &app.last_payment {
            ui.add_space(12.0);
            ui.small(format!(
                "Last payment: {} ({})",
                receipt.payment_id, receipt.description
            ));
        }
    });

    if let Some(index) = buy {
        app.buy_plan(index);
    }
}

fn key_box(app: &mut QuizApp, ui: &mut Ui) {
    Frame::group(ui.style())
        .fill(Color32::from_rgb(254, 252, 232))
        .stroke(Stroke::new(1.0, Color32::from_rgb(253, 230, 138)))
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new("ℹ Demo Configuration")
                    .strong()
                    .color(Color32::from_rgb(133, 77, 14)),
            );
            ui.label(
                RichText::new(
                    "Since this is a client-side demo, please enter your Razorpay Test Key ID below to activate the buttons.",
                )
                .small()
                .color(Color32::from_rgb(161, 98, 7)),
            );
            if ui.link("How to get API Key?").clicked() {
                app.show_key_help = !app.show_key_help;
            }
            if app.show_key_help {
                ui.label(RichText::new(KEY_HELP).small().color(Color32::DARK_GRAY));
            }
            ui.add(
                TextEdit::singleline(&mut app.checkout_key)
                    .hint_text("Enter rzp_test_...")
                    .desired_width(f32::INFINITY),
            );
        });
}

/// Returns true when the plan's buy button was clicked.
fn plan_card(ui: &mut Ui, plan: &Plan, width: f32) -> bool {
    let border = if plan.popular { ACCENT } else { Color32::GRAY };
    let mut clicked = false;

    Frame::group(ui.style())
        .stroke(Stroke::new(if plan.popular { 2.0 } else { 1.0 }, border))
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.set_width(width - 32.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new(&plan.name).size(18.0).strong());
                if plan.popular {
                    ui.label(RichText::new(" POPULAR ").small().strong().background_color(ACCENT).color(Color32::WHITE));
                }
            });
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("₹{}", plan.price)).size(32.0).strong());
                ui.label(RichText::new("/mo").weak());
            });
            ui.label(RichText::new(&plan.tagline).weak());
            ui.add_space(8.0);

            let mut button = Button::new(format!("Buy {}", plan.name)).min_size(Vec2::new(ui.available_width(), 32.0));
            if plan.popular {
                button = button.fill(ACCENT);
            }
            clicked = ui.add(button).clicked();

            ui.add_space(8.0);
            ui.small("WHAT'S INCLUDED");
            for feature in &plan.features {
                ui.label(format!("✔ {feature}"));
            }
        });

    clicked
}
