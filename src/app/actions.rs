use super::*;
use crate::checkout::{CheckoutEvent, CheckoutRequest, open_checkout};
use crate::error::{GenerationError, PaymentError};
use crate::generator::spawn_generation;
use crate::quiz::GenerationRequest;
use std::sync::mpsc::TryRecvError;

impl QuizApp {
    /// Handler for the topic form.
    pub fn submit_topic(&mut self) {
        if let Some(request) = self.begin_generation() {
            self.pending_generation = Some(spawn_generation(self.config.clone(), request));
        }
    }

    fn begin_generation(&mut self) -> Option<GenerationRequest> {
        match self.session.submit(&self.topic_input, self.difficulty) {
            Ok(request) => {
                self.message.clear();
                // a leftover receiver belongs to an older request
                self.pending_generation = None;
                Some(request)
            }
            Err(err) => {
                self.message = err.user_message();
                None
            }
        }
    }

    pub fn poll_generation(&mut self, now: f64) {
        let outcome = match self.pending_generation.as_ref().map(|rx| rx.try_recv()) {
            None | Some(Err(TryRecvError::Empty)) => return,
            Some(Ok(outcome)) => outcome,
            Some(Err(TryRecvError::Disconnected)) => {
                let Some(pending) = self.session.pending() else {
                    self.pending_generation = None;
                    return;
                };
                log::error!("generation worker for request {} stopped", pending.request_id);
                crate::generator::GenerationOutcome {
                    request_id: pending.request_id,
                    result: Err(GenerationError::Transport("worker stopped".into())),
                }
            }
        };
        self.pending_generation = None;

        match self
            .session
            .complete_generation(outcome.request_id, outcome.result, now)
        {
            Ok(()) => {}
            Err(err) => self.message = err.user_message(),
        }
    }

    pub fn select_option(&mut self, option: &str) {
        if self.session.select_current(option) {
            self.message.clear();
        }
    }

    pub fn next_question(&mut self) {
        self.session.advance();
    }

    pub fn drive_clock(&mut self, now: f64) {
        self.session.advance_clock(now);
    }

    pub fn buy_plan(&mut self, index: usize) {
        if self.pending_checkout.is_some() {
            self.message = "A checkout window is already open.".into();
            return;
        }
        let Some(plan) = self.plans.get(index) else {
            log::warn!("no pricing plan at index {index}");
            return;
        };
        let request = CheckoutRequest::for_plan(plan);
        match open_checkout(&self.checkout_key, &request) {
            Ok(rx) => {
                self.message.clear();
                self.pending_checkout = Some(rx);
            }
            Err(err) => {
                if err == PaymentError::MissingKey {
                    self.show_key_help = true;
                }
                log::warn!("checkout for {:?} not opened: {err}", plan.name);
                self.message = err.to_string();
            }
        }
    }

    pub fn poll_checkout(&mut self) {
        let event = match self.pending_checkout.as_ref().map(|rx| rx.try_recv()) {
            None | Some(Err(TryRecvError::Empty)) => return,
            Some(Ok(event)) => event,
            Some(Err(TryRecvError::Disconnected)) => {
                log::warn!("checkout channel closed without an event");
                CheckoutEvent::Dismissed
            }
        };
        self.pending_checkout = None;

        match event {
            CheckoutEvent::Paid(receipt) => {
                self.message = format!("Payment Successful! Payment ID: {}", receipt.payment_id);
                self.last_payment = Some(receipt);
            }
            CheckoutEvent::Dismissed => log::debug!("checkout closed without payment"),
        }
    }
}
