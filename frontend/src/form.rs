//! Contact form submission lifecycle.

use std::future::Future;

use gloo_timers::future::TimeoutFuture;
use log::debug;
use serde::Serialize;

use crate::error::SubmitError;

pub const SUBMIT_LABEL: &str = "Send Message";
pub const SENDING_LABEL: &str = "Sending...";
pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent successfully.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Company,
    Message,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Company => &self.company,
            Field::Message => &self.message,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Company => &mut self.company,
            Field::Message => &mut self.message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    pub fn class(&self) -> &'static str {
        match self {
            BannerKind::Success => "success",
            BannerKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: u64,
    pub kind: BannerKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
}

/// Where a submission goes. The site ships with [`SimulatedSubmitter`].
pub trait Submitter {
    fn submit(
        &self,
        fields: ContactFields,
    ) -> impl Future<Output = Result<(), SubmitError>> + 'static;
}

/// Stand-in for a real backend: waits, then reports success.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedSubmitter {
    delay_ms: u32,
}

impl SimulatedSubmitter {
    pub fn new(delay_ms: u32) -> Self {
        Self { delay_ms }
    }
}

impl Submitter for SimulatedSubmitter {
    fn submit(
        &self,
        fields: ContactFields,
    ) -> impl Future<Output = Result<(), SubmitError>> + 'static {
        let delay_ms = self.delay_ms;
        async move {
            debug!(
                "Simulating submission {}",
                serde_json::to_string(&fields).unwrap_or_default()
            );
            TimeoutFuture::new(delay_ms).await;
            Ok(())
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormMachine {
    fields: ContactFields,
    phase: FormPhase,
    banners: Vec<Banner>,
    next_banner: u64,
}

impl Default for FormMachine {
    fn default() -> Self {
        Self {
            fields: ContactFields::default(),
            phase: FormPhase::Idle,
            banners: Vec::new(),
            next_banner: 1,
        }
    }
}

impl FormMachine {
    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn submit_label(&self) -> &'static str {
        match self.phase {
            FormPhase::Idle => SUBMIT_LABEL,
            FormPhase::Submitting => SENDING_LABEL,
        }
    }

    pub fn set_field(&mut self, field: Field, value: String) {
        *self.fields.slot(field) = value;
    }

    /// Locks the form and hands out what to send. `None` while a submission
    /// is already in flight.
    pub fn begin_submit(&mut self) -> Option<ContactFields> {
        if self.is_submitting() {
            return None;
        }
        self.phase = FormPhase::Submitting;
        Some(self.fields.clone())
    }

    /// Unlocks the form and posts a banner for the outcome. Returns the
    /// banner id so its expiry can be scheduled.
    pub fn finish(&mut self, outcome: Result<(), SubmitError>) -> u64 {
        self.phase = FormPhase::Idle;
        let (kind, text) = match outcome {
            Ok(()) => {
                self.fields = ContactFields::default();
                (BannerKind::Success, SUCCESS_MESSAGE.to_string())
            }
            Err(err) => (BannerKind::Error, format!("Error: {}", err)),
        };
        let id = self.next_banner;
        self.next_banner += 1;
        self.banners.push(Banner { id, kind, text });
        id
    }

    /// Removes a banner on dismissal or expiry.
    pub fn remove_banner(&mut self, id: u64) -> bool {
        let before = self.banners.len();
        self.banners.retain(|b| b.id != id);
        self.banners.len() != before
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::timing::manual::ManualScheduler;
    use crate::timing::Scheduler;

    struct RejectingSubmitter(&'static str);

    impl Submitter for RejectingSubmitter {
        fn submit(
            &self,
            _fields: ContactFields,
        ) -> impl Future<Output = Result<(), SubmitError>> + 'static {
            let reason = self.0;
            async move { Err(SubmitError::Rejected(reason.to_string())) }
        }
    }

    struct AcceptingSubmitter;

    impl Submitter for AcceptingSubmitter {
        fn submit(
            &self,
            _fields: ContactFields,
        ) -> impl Future<Output = Result<(), SubmitError>> + 'static {
            async { Ok(()) }
        }
    }

    fn filled() -> FormMachine {
        let mut form = FormMachine::default();
        form.set_field(Field::Name, "Ada".into());
        form.set_field(Field::Email, "ada@example.com".into());
        form.set_field(Field::Message, "We would like an AI roadmap.".into());
        form
    }

    #[test]
    fn success_clears_fields_and_unlocks() {
        let mut form = filled();
        assert_eq!(form.submit_label(), SUBMIT_LABEL);
        let sent = form.begin_submit().unwrap();
        assert_eq!(sent.email, "ada@example.com");
        assert!(form.is_submitting());
        assert_eq!(form.submit_label(), SENDING_LABEL);

        let outcome = block_on(AcceptingSubmitter.submit(sent));
        form.finish(outcome);
        assert_eq!(form.phase(), FormPhase::Idle);
        assert_eq!(form.submit_label(), SUBMIT_LABEL);
        assert_eq!(form.fields(), &ContactFields::default());
        assert_eq!(form.banners()[0].kind, BannerKind::Success);
        assert_eq!(form.banners()[0].text, SUCCESS_MESSAGE);
    }

    #[test]
    fn failure_keeps_fields_and_shows_reason() {
        let mut form = filled();
        let sent = form.begin_submit().unwrap();
        let outcome = block_on(RejectingSubmitter("mailbox full").submit(sent));
        form.finish(outcome);
        assert!(!form.is_submitting());
        assert_eq!(form.fields().name, "Ada");
        assert_eq!(form.banners()[0].kind, BannerKind::Error);
        assert_eq!(form.banners()[0].text, "Error: mailbox full");
    }

    #[test]
    fn second_submit_while_sending_is_ignored() {
        let mut form = filled();
        assert!(form.begin_submit().is_some());
        assert!(form.begin_submit().is_none());
        form.finish(Err(SubmitError::Timeout));
        assert_eq!(form.banners()[0].text, "Error: the request timed out");
        assert!(form.begin_submit().is_some());
    }

    #[test]
    fn banners_expire_after_their_lifetime() {
        let mut form = filled();
        let mut timers = ManualScheduler::default();
        form.begin_submit();
        let first = form.finish(Ok(()));
        timers.schedule(5_000, first);
        timers.set_now(2_000);
        form.begin_submit();
        let second = form.finish(Err(SubmitError::Timeout));
        timers.schedule(5_000, second);

        while let Some(id) = timers.pop_due(4_999) {
            form.remove_banner(id);
        }
        assert_eq!(form.banners().len(), 2);
        while let Some(id) = timers.pop_due(5_000) {
            form.remove_banner(id);
        }
        assert_eq!(form.banners().len(), 1);
        assert_eq!(form.banners()[0].id, second);
        while let Some(id) = timers.pop_due(7_000) {
            form.remove_banner(id);
        }
        assert!(form.banners().is_empty());
    }

    #[test]
    fn dismissing_twice_is_harmless() {
        let mut form = filled();
        form.begin_submit();
        let id = form.finish(Ok(()));
        assert!(form.remove_banner(id));
        assert!(!form.remove_banner(id));
    }
}
