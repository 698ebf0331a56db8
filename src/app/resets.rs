use super::*;

impl QuizApp {
    /// "New Topic" on the results screen.
    pub fn new_topic(&mut self) {
        if self.session.reset() {
            self.message.clear();
        }
    }

    /// Drops the running quiz and any request in flight.
    pub fn shutdown(&mut self) {
        self.pending_generation = None;
        self.pending_checkout = None;
        self.session.teardown();
    }

    pub fn confirm_leave(&mut self, ctx: &egui::Context) {
        egui::Window::new("Leave the quiz?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Your current quiz will be lost and cannot be resumed.");
                ui.horizontal(|ui| {
                    if ui.button("Leave").clicked() {
                        self.leave_quiz_screen();
                    }
                    if ui.button("Stay").clicked() {
                        self.confirm_leave = false;
                    }
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;
    use crate::quiz::PhaseKind;

    fn finished_app() -> QuizApp {
        let mut app = QuizApp::new(AppConfig {
            question_count: 1,
            ..AppConfig::default()
        });
        app.topic_input = "Rust".into();
        let request = app
            .session
            .submit(&app.topic_input, app.difficulty)
            .expect("submit");
        let question = Question {
            id: 1,
            text: "Borrow checker?".into(),
            options: ["A", "B", "C", "D"].map(String::from).to_vec(),
            correct_answer: "A".into(),
            explanation: "A.".into(),
        };
        app.session
            .complete_generation(request.id, Ok(vec![question]), 0.0)
            .expect("generation");
        app.next_question();
        app
    }

    #[test]
    fn new_topic_keeps_the_form_values() {
        let mut app = finished_app();
        app.difficulty = Difficulty::Hard;
        assert_eq!(app.session.kind(), PhaseKind::Finished);
        app.new_topic();
        assert_eq!(app.session.kind(), PhaseKind::Idle);
        assert_eq!(app.topic_input, "Rust");
        assert_eq!(app.difficulty, Difficulty::Hard);
    }

    #[test]
    fn new_topic_is_ignored_mid_quiz() {
        let mut app = QuizApp::default();
        app.topic_input = "Rust".into();
        app.session
            .submit(&app.topic_input, app.difficulty)
            .expect("submit");
        app.new_topic();
        assert_eq!(app.session.kind(), PhaseKind::Generating);
        assert_eq!(app.topic_input, "Rust");
    }

    #[test]
    fn leaving_tears_the_session_down() {
        let mut app = finished_app();
        app.leave_quiz_screen();
        assert_eq!(app.screen, Screen::Pricing);
        assert_eq!(app.session.kind(), PhaseKind::Idle);
    }

    #[test]
    fn shutdown_drops_pending_work() {
        let mut app = QuizApp::default();
        app.topic_input = "Rust".into();
        app.submit_topic();
        app.shutdown();
        assert!(!app.is_generation_pending());
        assert_eq!(app.session.kind(), PhaseKind::Idle);
    }
}
