use super::*;

impl QuizApp {
    /// Everything the question screen draws, or `None` outside an active quiz.
    pub fn question_view(&self) -> Option<QuestionView> {
        let active = self.session.active()?;
        let question = active.current_question();
        let selected = active.current_answer();

        let options = question
            .options
            .iter()
            .map(|option| OptionRow {
                text: option.clone(),
                state: OptionState::for_option(question, selected, option),
            })
            .collect();

        Some(QuestionView {
            topic: active.topic().to_string(),
            difficulty: active.difficulty(),
            number: active.current_index() + 1,
            total: active.total(),
            text: question.text.clone(),
            options,
            answered: selected.is_some(),
            is_last: active.is_last(),
            time_remaining_secs: active.time_remaining_secs(),
        })
    }
}
