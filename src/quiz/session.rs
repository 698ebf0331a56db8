use super::countdown::Countdown;
use super::summary::{FinishReason, Summary};
use crate::config::{DEFAULT_QUESTION_COUNT, DEFAULT_SECONDS_PER_QUESTION};
use crate::error::{GenerationError, QuizError};
use crate::model::{Difficulty, Question};
use std::collections::BTreeMap;

/// What the question source must be asked for after a successful `submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub id: u64,
    pub topic: String,
    pub difficulty: Difficulty,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuiz {
    pub request_id: u64,
    pub topic: String,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveQuiz {
    topic: String,
    difficulty: Difficulty,
    questions: Vec<Question>,
    current_index: usize,
    answers: BTreeMap<usize, String>,
    score: usize,
    time_remaining_secs: u32,
    countdown: Countdown,
}

impl ActiveQuiz {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }

    pub fn answer_for(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    pub fn current_answer(&self) -> Option<&str> {
        self.answer_for(self.current_index)
    }

    pub fn answers(&self) -> &BTreeMap<usize, String> {
        &self.answers
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn time_remaining_secs(&self) -> u32 {
        self.time_remaining_secs
    }

    fn record(&mut self, index: usize, option: &str) -> bool {
        let Some(question) = self.questions.get(index) else {
            return false;
        };
        if self.answers.contains_key(&index) || !question.has_option(option) {
            return false;
        }
        let correct = question.is_correct(option);
        self.answers.insert(index, option.to_string());
        if correct {
            self.score += 1;
        }
        log::debug!("question {} answered (correct: {correct})", index + 1);
        true
    }

    fn into_finished(mut self, reason: FinishReason) -> FinishedQuiz {
        self.countdown.cancel();
        FinishedQuiz {
            topic: self.topic,
            difficulty: self.difficulty,
            questions: self.questions,
            answers: self.answers,
            score: self.score,
            time_remaining_secs: self.time_remaining_secs,
            reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinishedQuiz {
    topic: String,
    difficulty: Difficulty,
    questions: Vec<Question>,
    answers: BTreeMap<usize, String>,
    score: usize,
    time_remaining_secs: u32,
    reason: FinishReason,
}

impl FinishedQuiz {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &BTreeMap<usize, String> {
        &self.answers
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn time_remaining_secs(&self) -> u32 {
        self.time_remaining_secs
    }

    pub fn reason(&self) -> FinishReason {
        self.reason
    }

    pub fn summary(&self) -> Summary {
        Summary::build(
            &self.topic,
            self.difficulty,
            &self.questions,
            &self.answers,
            self.score,
            self.reason,
        )
    }
}

/// Each phase carries only the data that is meaningful in it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Generating(PendingQuiz),
    Active(ActiveQuiz),
    Finished(FinishedQuiz),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Idle,
    Generating,
    Active,
    Finished,
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Idle => PhaseKind::Idle,
            Phase::Generating(_) => PhaseKind::Generating,
            Phase::Active(_) => PhaseKind::Active,
            Phase::Finished(_) => PhaseKind::Finished,
        }
    }
}

/// Single-user quiz controller.
#[derive(Debug, Clone)]
pub struct QuizSession {
    phase: Phase,
    question_count: usize,
    seconds_per_question: u32,
    last_request_id: u64,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(DEFAULT_QUESTION_COUNT, DEFAULT_SECONDS_PER_QUESTION)
    }
}

impl QuizSession {
    pub fn new(question_count: usize, seconds_per_question: u32) -> Self {
        Self {
            phase: Phase::Idle,
            question_count: question_count.max(1),
            seconds_per_question: seconds_per_question.max(1),
            last_request_id: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    pub fn pending(&self) -> Option<&PendingQuiz> {
        match &self.phase {
            Phase::Generating(pending) => Some(pending),
            _ => None,
        }
    }

    pub fn active(&self) -> Option<&ActiveQuiz> {
        match &self.phase {
            Phase::Active(active) => Some(active),
            _ => None,
        }
    }

    pub fn finished(&self) -> Option<&FinishedQuiz> {
        match &self.phase {
            Phase::Finished(finished) => Some(finished),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<Summary> {
        self.finished().map(FinishedQuiz::summary)
    }

    /// Starts a new quiz. Allowed from `Idle` and `Finished`; any previous
    /// quiz is discarded.
    pub fn submit(
        &mut self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<GenerationRequest, QuizError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(QuizError::EmptyTopic);
        }
        if matches!(self.phase, Phase::Generating(_) | Phase::Active(_)) {
            return Err(QuizError::Busy);
        }

        self.last_request_id += 1;
        let request = GenerationRequest {
            id: self.last_request_id,
            topic: topic.to_string(),
            difficulty,
            count: self.question_count,
        };
        self.phase = Phase::Generating(PendingQuiz {
            request_id: request.id,
            topic: request.topic.clone(),
            difficulty,
        });
        log::info!(
            "generating {} {} questions about {:?} (request {})",
            request.count,
            difficulty,
            request.topic,
            request.id
        );
        Ok(request)
    }

    /// Applies the outcome of a generation request. Results for a request that
    /// is no longer pending are dropped.
    pub fn complete_generation(
        &mut self,
        request_id: u64,
        result: Result<Vec<Question>, GenerationError>,
        now: f64,
    ) -> Result<(), QuizError> {
        if !matches!(&self.phase, Phase::Generating(p) if p.request_id == request_id) {
            log::debug!("discarding stale generation result for request {request_id}");
            return Ok(());
        }
        let Phase::Generating(pending) = std::mem::take(&mut self.phase) else {
            return Ok(());
        };

        let questions = match result {
            Ok(questions) if !questions.is_empty() => questions,
            Ok(_) => {
                log::warn!("request {request_id} produced no questions");
                return Err(GenerationError::WrongCount {
                    expected: self.question_count,
                    received: 0,
                }
                .into());
            }
            Err(err) => {
                log::warn!("request {request_id} failed: {err}");
                return Err(err.into());
            }
        };

        let time_remaining_secs = u32::try_from(questions.len())
            .unwrap_or(u32::MAX)
            .saturating_mul(self.seconds_per_question);
        log::info!(
            "quiz on {:?} started: {} questions, {}s on the clock",
            pending.topic,
            questions.len(),
            time_remaining_secs
        );
        self.phase = Phase::Active(ActiveQuiz {
            topic: pending.topic,
            difficulty: pending.difficulty,
            questions,
            current_index: 0,
            answers: BTreeMap::new(),
            score: 0,
            time_remaining_secs,
            countdown: Countdown::start(now),
        });
        Ok(())
    }

    /// Records the first answer for `index`. Returns false when nothing changed.
    pub fn select_option(&mut self, index: usize, option: &str) -> bool {
        match &mut self.phase {
            Phase::Active(active) => active.record(index, option),
            _ => false,
        }
    }

    pub fn select_current(&mut self, option: &str) -> bool {
        match &mut self.phase {
            Phase::Active(active) => {
                let index = active.current_index;
                active.record(index, option)
            }
            _ => false,
        }
    }

    /// Moves to the next question, or finishes after the last one.
    pub fn advance(&mut self) {
        let finished = match &mut self.phase {
            Phase::Active(active) if !active.is_last() => {
                active.current_index += 1;
                false
            }
            Phase::Active(_) => true,
            _ => return,
        };
        if finished {
            self.finish(FinishReason::Completed);
        }
    }

    /// One second of quiz time.
    pub fn tick(&mut self) {
        let expired = match &mut self.phase {
            Phase::Active(active) => {
                active.time_remaining_secs = active.time_remaining_secs.saturating_sub(1);
                active.time_remaining_secs == 0
            }
            _ => return,
        };
        if expired {
            self.finish(FinishReason::TimeExpired);
        }
    }

    /// Applies every tick the active countdown has accumulated up to `now`.
    pub fn advance_clock(&mut self, now: f64) {
        let due = match &mut self.phase {
            Phase::Active(active) => active.countdown.due_ticks(now),
            _ => return,
        };
        for _ in 0..due {
            if !matches!(self.phase, Phase::Active(_)) {
                break;
            }
            self.tick();
        }
    }

    /// Seconds until the running countdown next ticks, if one is running.
    pub fn until_next_tick(&self, now: f64) -> Option<f64> {
        self.active().map(|a| a.countdown.until_next_tick(now))
    }

    /// Leaves the results screen. Returns false outside `Finished`.
    pub fn reset(&mut self) -> bool {
        if matches!(self.phase, Phase::Finished(_)) {
            self.phase = Phase::Idle;
            log::info!("session reset");
            true
        } else {
            false
        }
    }

    /// Drops whatever is in flight. Used when the owning view goes away.
    pub fn teardown(&mut self) {
        if let Phase::Active(active) = &mut self.phase {
            active.countdown.cancel();
        }
        if self.kind() != PhaseKind::Idle {
            log::info!("tearing down session in {:?}", self.kind());
        }
        self.phase = Phase::Idle;
    }

    fn finish(&mut self, reason: FinishReason) {
        if let Phase::Active(active) = std::mem::take(&mut self.phase) {
            log::info!(
                "quiz finished ({reason:?}): {}/{}",
                active.score,
                active.questions.len()
            );
            self.phase = Phase::Finished(active.into_finished(reason));
        }
    }
}
