use crate::checkout::{CheckoutEvent, PaymentReceipt};
use crate::config::AppConfig;
use crate::data::read_plans_embedded;
use crate::generator::GenerationOutcome;
use crate::model::{Difficulty, Plan, Screen};
use crate::quiz::QuizSession;
use std::sync::mpsc::Receiver;

// impl blocks
pub mod actions;
pub mod navigation;
pub mod resets;
pub mod view_models;

pub use crate::view_models::{OptionRow, OptionState, QuestionView};

pub struct QuizApp {
    pub config: AppConfig,
    pub session: QuizSession,
    pub screen: Screen,
    pub topic_input: String,
    pub difficulty: Difficulty,
    pub message: String,
    pub plans: Vec<Plan>,
    pub checkout_key: String,
    pub show_key_help: bool,
    pub last_payment: Option<PaymentReceipt>,
    pub confirm_leave: bool,
    pending_generation: Option<Receiver<GenerationOutcome>>,
    pending_checkout: Option<Receiver<CheckoutEvent>>,
}

impl QuizApp {
    pub fn new(config: AppConfig) -> Self {
        let plans = read_plans_embedded().unwrap_or_else(|err| {
            log::error!("could not load pricing plans: {err}");
            Vec::new()
        });

        Self {
            session: QuizSession::new(config.question_count, config.seconds_per_question),
            screen: Screen::Quiz,
            topic_input: String::new(),
            difficulty: Difficulty::default(),
            message: String::new(),
            plans,
            checkout_key: config.checkout_key.clone().unwrap_or_default(),
            show_key_help: false,
            last_payment: None,
            confirm_leave: false,
            pending_generation: None,
            pending_checkout: None,
            config,
        }
    }

    pub fn is_generation_pending(&self) -> bool {
        self.pending_generation.is_some()
    }

    pub fn is_checkout_pending(&self) -> bool {
        self.pending_checkout.is_some()
    }
}

impl Default for QuizApp {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl Drop for QuizApp {
    fn drop(&mut self) {
        self.shutdown();
    }
}
