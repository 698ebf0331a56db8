//! Quiz session state machine: phases, countdown and end-of-quiz review.

pub mod countdown;
pub mod session;
pub mod summary;

pub use session::{
    ActiveQuiz, FinishedQuiz, GenerationRequest, PendingQuiz, Phase, PhaseKind, QuizSession,
};
pub use summary::{AnswerStatus, FinishReason, ReviewRow, Summary};
