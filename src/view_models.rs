// src/view_models.rs

use crate::model::{Difficulty, Question};

/// Below this many seconds the timer is drawn as a warning.
pub const TIME_WARNING_SECS: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    /// Nothing picked yet; clickable.
    Open,
    SelectedCorrect,
    SelectedWrong,
    /// Not picked, but it is the right answer.
    RevealedCorrect,
    Dimmed,
}

impl OptionState {
    pub fn for_option(question: &Question, selected: Option<&str>, option: &str) -> Self {
        let Some(selected) = selected else {
            return OptionState::Open;
        };
        let is_selected = selected == option;
        let is_correct = question.is_correct(option);
        match (is_selected, is_correct) {
            (true, true) => OptionState::SelectedCorrect,
            (true, false) => OptionState::SelectedWrong,
            (false, true) => OptionState::RevealedCorrect,
            (false, false) => OptionState::Dimmed,
        }
    }

    pub fn is_clickable(self) -> bool {
        matches!(self, OptionState::Open)
    }

    pub fn marker(self) -> &'static str {
        match self {
            OptionState::SelectedCorrect | OptionState::RevealedCorrect => "✅",
            OptionState::SelectedWrong => "❌",
            OptionState::Open | OptionState::Dimmed => "",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OptionRow {
    pub text: String,
    pub state: OptionState,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionView {
    pub topic: String,
    pub difficulty: Difficulty,
    pub number: usize,
    pub total: usize,
    pub text: String,
    pub options: Vec<OptionRow>,
    pub answered: bool,
    pub is_last: bool,
    pub time_remaining_secs: u32,
}

impl QuestionView {
    pub fn progress_label(&self) -> String {
        format!("{} / {}", self.number, self.total)
    }

    pub fn progress_fraction(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.number as f32 / self.total as f32
        }
    }

    pub fn time_label(&self) -> String {
        format_time(self.time_remaining_secs)
    }

    pub fn time_is_low(&self) -> bool {
        self.time_remaining_secs < TIME_WARNING_SECS
    }

    pub fn next_label(&self) -> &'static str {
        if self.is_last {
            "Finish & Review"
        } else {
            "Next Question"
        }
    }
}

/// `m:ss`
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question {
            id: 1,
            text: "2 + 2?".into(),
            options: ["3", "4", "5", "6"].map(String::from).to_vec(),
            correct_answer: "4".into(),
            explanation: "Arithmetic.".into(),
        }
    }

    #[test]
    fn time_is_formatted_as_minutes_and_seconds() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(59), "0:59");
        assert_eq!(format_time(300), "5:00");
        assert_eq!(format_time(61), "1:01");
    }

    #[test]
    fn options_are_open_until_answered() {
        let q = question();
        assert_eq!(OptionState::for_option(&q, None, "3"), OptionState::Open);
        assert!(OptionState::Open.is_clickable());
    }

    #[test]
    fn reveal_after_wrong_answer() {
        let q = question();
        let states: Vec<_> = q
            .options
            .iter()
            .map(|o| OptionState::for_option(&q, Some("5"), o))
            .collect();
        assert_eq!(
            states,
            vec![
                OptionState::Dimmed,
                OptionState::RevealedCorrect,
                OptionState::SelectedWrong,
                OptionState::Dimmed
            ]
        );
        assert!(states.iter().all(|s| !s.is_clickable()));
        assert_eq!(OptionState::SelectedWrong.marker(), "❌");
    }

    #[test]
    fn reveal_after_right_answer() {
        let q = question();
        assert_eq!(
            OptionState::for_option(&q, Some("4"), "4"),
            OptionState::SelectedCorrect
        );
    }

    #[test]
    fn question_view_labels() {
        let view = QuestionView {
            topic: "Maths".into(),
            difficulty: Difficulty::Easy,
            number: 3,
            total: 3,
            text: "2 + 2?".into(),
            options: vec![],
            answered: true,
            is_last: true,
            time_remaining_secs: 29,
        };
        assert_eq!(view.progress_label(), "3 / 3");
        assert_eq!(view.next_label(), "Finish & Review");
        assert!(view.time_is_low());
        assert_eq!(view.time_label(), "0:29");
        assert!((view.progress_fraction() - 1.0).abs() < f32::EPSILON);
    }
}
