use super::*;
use crate::quiz::PhaseKind;

impl QuizApp {
    /// Leaving the quiz screen mid-quiz asks first; everything else switches at once.
    pub fn open_pricing(&mut self) {
        if self.screen == Screen::Pricing {
            return;
        }
        if matches!(self.session.kind(), PhaseKind::Generating | PhaseKind::Active) {
            self.confirm_leave = true;
            return;
        }
        self.leave_quiz_screen();
    }

    pub fn open_quiz(&mut self) {
        if self.screen != Screen::Quiz {
            // pricing messages do not belong under the topic form
            self.message.clear();
        }
        self.confirm_leave = false;
        self.screen = Screen::Quiz;
    }

    /// The quiz screen going away takes its session with it.
    pub(super) fn leave_quiz_screen(&mut self) {
        self.pending_generation = None;
        self.session.teardown();
        self.confirm_leave = false;
        self.message.clear();
        self.screen = Screen::Pricing;
    }
}
