use crate::model::{Difficulty, Question};
use std::collections::BTreeMap;

/// Percentage at or above which the results screen celebrates.
pub const PASS_PERCENTAGE: u32 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Completed,
    TimeExpired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStatus {
    Correct,
    Incorrect,
    Skipped,
}

impl AnswerStatus {
    pub fn is_correct(self) -> bool {
        matches!(self, AnswerStatus::Correct)
    }
}

/// One line of the detailed review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRow {
    /// 1-based position in the quiz.
    pub number: usize,
    pub question_id: u64,
    pub text: String,
    pub submitted: Option<String>,
    pub correct_answer: String,
    pub explanation: String,
    pub status: AnswerStatus,
}

impl ReviewRow {
    pub fn submitted_label(&self) -> &str {
        self.submitted.as_deref().unwrap_or("Skipped")
    }

    /// The correct answer is only spelled out when the user missed it.
    pub fn shows_correct_answer(&self) -> bool {
        !self.status.is_correct()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub topic: String,
    pub difficulty: Difficulty,
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub reason: FinishReason,
    pub rows: Vec<ReviewRow>,
}

impl Summary {
    pub fn build(
        topic: &str,
        difficulty: Difficulty,
        questions: &[Question],
        answers: &BTreeMap<usize, String>,
        score: usize,
        reason: FinishReason,
    ) -> Self {
        let rows = questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let submitted = answers.get(&i).cloned();
                let status = match submitted.as_deref() {
                    None => AnswerStatus::Skipped,
                    Some(answer) if q.is_correct(answer) => AnswerStatus::Correct,
                    Some(_) => AnswerStatus::Incorrect,
                };
                ReviewRow {
                    number: i + 1,
                    question_id: q.id,
                    text: q.text.clone(),
                    submitted,
                    correct_answer: q.correct_answer.clone(),
                    explanation: q.explanation.clone(),
                    status,
                }
            })
            .collect();

        Self {
            topic: topic.to_string(),
            difficulty,
            score,
            total: questions.len(),
            percentage: percentage(score, questions.len()),
            reason,
            rows,
        }
    }

    pub fn passed(&self) -> bool {
        self.percentage >= PASS_PERCENTAGE
    }

    pub fn skipped(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.status == AnswerStatus::Skipped)
            .count()
    }
}

/// `round(100 * score / total)`, halves rounding up, in integer arithmetic.
pub fn percentage(score: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rounded = (200 * score + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u64, correct: &str) -> Question {
        Question {
            id,
            text: format!("Question {id}?"),
            options: ["A", "B", "C", "D"].map(String::from).to_vec(),
            correct_answer: correct.to_string(),
            explanation: format!("Because {correct}."),
        }
    }

    #[test]
    fn percentage_rounds_like_the_results_screen() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(5, 5), 100);
        assert_eq!(percentage(0, 5), 0);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn rows_classify_each_answer() {
        let questions = vec![question(1, "A"), question(2, "B"), question(3, "C")];
        let mut answers = BTreeMap::new();
        answers.insert(0, "A".to_string());
        answers.insert(1, "D".to_string());

        let summary = Summary::build(
            "Python",
            Difficulty::Easy,
            &questions,
            &answers,
            1,
            FinishReason::TimeExpired,
        );

        let statuses: Vec<_> = summary.rows.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                AnswerStatus::Correct,
                AnswerStatus::Incorrect,
                AnswerStatus::Skipped
            ]
        );
        assert_eq!(summary.rows[2].submitted_label(), "Skipped");
        assert!(!summary.rows[0].shows_correct_answer());
        assert!(summary.rows[1].shows_correct_answer());
        assert_eq!(summary.rows[1].correct_answer, "B");
        assert_eq!(summary.rows[2].explanation, "Because C.");
        assert_eq!(summary.skipped(), 1);
        assert_eq!(summary.percentage, 33);
        assert!(!summary.passed());
    }

    #[test]
    fn seventy_percent_passes() {
        let questions: Vec<_> = (0..10).map(|i| question(i, "A")).collect();
        let answers: BTreeMap<usize, String> = (0..7).map(|i| (i, "A".to_string())).collect();
        let summary = Summary::build(
            "Rust",
            Difficulty::Hard,
            &questions,
            &answers,
            7,
            FinishReason::Completed,
        );
        assert_eq!(summary.percentage, 70);
        assert!(summary.passed());
    }
}
