mod helpers;
pub mod layout;
pub mod views;

use crate::app::QuizApp;
use crate::model::Screen;
use crate::quiz::PhaseKind;
use eframe::{App, Frame};
use egui::Context;
use layout::{bottom_panel, top_panel};
use std::time::Duration;

/// Repaint cadence while waiting on a worker or the checkout widget.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

impl App for QuizApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        let now = ctx.input(|i| i.time);

        self.poll_generation(now);
        self.poll_checkout();
        self.drive_clock(now);

        top_panel(self, ctx);
        bottom_panel(ctx);

        match self.screen {
            Screen::Pricing => views::pricing::ui_pricing(self, ctx),
            Screen::Quiz => match self.session.kind() {
                PhaseKind::Idle => views::topic::ui_topic(self, ctx),
                PhaseKind::Generating => views::loading::ui_loading(self, ctx),
                PhaseKind::Active => views::quiz::ui_quiz(self, ctx),
                PhaseKind::Finished => views::results::ui_results(self, ctx),
            },
        }

        if self.confirm_leave {
            self.confirm_leave(ctx);
        }

        if self.is_generation_pending() || self.is_checkout_pending() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }
        // the countdown only advances when a frame runs
        if let Some(wait) = self.session.until_next_tick(now) {
            ctx.request_repaint_after(Duration::from_secs_f64(wait.max(0.01)));
        }
    }
}
