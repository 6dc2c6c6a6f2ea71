//! Registration wizard state machine
//!
//! The wizard never performs I/O. Operations that need a slow collaborator
//! return an [`Effect`]; the caller runs it and hands the result back as an
//! [`Outcome`] through [`Wizard::apply`]. `is_submitting` covers the whole
//! window between the two, so at most one transition is ever in flight.

use super::forms::{
    cycle_option, is_pin_code, validate_field, validate_step, FieldErrors, FieldKind, FieldName,
    FormValues, StepDefinition, StepFocus, WizardStep,
};
use super::records::{Address, Receipt};
use std::collections::BTreeSet;
use thiserror::Error;

pub const OTP_LENGTH: usize = 6;
pub const OTP_MESSAGE: &str = "Please enter a valid 6-digit OTP.";

/// Work the wizard needs done outside the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SendOtp {
        aadhaar_number: String,
    },
    ConfirmOtp {
        aadhaar_number: String,
        code: String,
    },
    VerifyPan {
        pan_number: String,
    },
    Submit {
        values: FormValues,
    },
    LookupAddress {
        pin_code: String,
        generation: u64,
    },
}

/// Result of an [`Effect`], fed back into the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    OtpSent(Result<(), String>),
    OtpConfirmed(Result<(), String>),
    PanVerified(Result<(), String>),
    Submitted(Result<Receipt, String>),
    AddressResolved {
        pin_code: String,
        generation: u64,
        result: Result<Option<Address>, String>,
    },
}

/// Why an operation was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("a request is already in progress")]
    Busy,
    #[error("registration has already been submitted")]
    Finished,
    #[error("some fields need attention")]
    Invalid(FieldErrors),
    #[error("waiting for OTP confirmation")]
    AwaitingOtp,
    #[error("no OTP has been requested")]
    NoOtpPrompt,
    #[error("{}", OTP_MESSAGE)]
    InvalidOtp,
    #[error("{0} cannot be edited")]
    ReadOnly(FieldName),
    #[error("{0} is not part of the current step")]
    NotOnStep(FieldName),
    #[error("waiting for the address lookup to finish")]
    LookupPending,
}

/// Which kind of transition is outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    SendOtp,
    ConfirmOtp,
    VerifyPan,
    Submit,
}

/// OTP confirmation prompt shown over the Aadhaar step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpPrompt {
    pub code: String,
    pub error: Option<String>,
}

impl OtpPrompt {
    /// Exactly six ASCII digits
    pub fn is_well_formed(&self) -> bool {
        self.code.len() == OTP_LENGTH && self.code.bytes().all(|b| b.is_ascii_digit())
    }
}

/// Success message shown after a transition completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub description: &'static str,
}

pub const OTP_NOTICE: Notice = Notice {
    title: "OTP Validated Successfully",
    description: "Please proceed with PAN verification.",
};
pub const PAN_NOTICE: Notice = Notice {
    title: "PAN Validated Successfully",
    description: "Please fill in your address details.",
};
pub const SUBMITTED_NOTICE: Notice = Notice {
    title: "Registration Submitted",
    description: "Your registration has been processed successfully.",
};

/// Diff-based watcher for the PIN code field
#[derive(Debug, Clone, Default)]
struct PinWatch {
    observed: String,
    generation: u64,
    /// Generation of the last lookup whose result was applied
    applied: u64,
}

impl PinWatch {
    /// Compare against the last observed value. Any change invalidates
    /// lookups already in flight; a complete PIN starts a new one.
    fn observe(&mut self, pin_code: &str) -> Option<Effect> {
        if pin_code == self.observed {
            return None;
        }
        self.observed = pin_code.to_string();
        self.generation += 1;

        is_pin_code(pin_code).then(|| Effect::LookupAddress {
            pin_code: pin_code.to_string(),
            generation: self.generation,
        })
    }

    fn is_current(&self, pin_code: &str, generation: u64) -> bool {
        generation == self.generation && pin_code == self.observed
    }

    /// City and state belong to the PIN as it stands now
    fn is_settled(&self) -> bool {
        self.applied == self.generation
    }
}

/// One registration session
#[derive(Debug, Clone, Default)]
pub struct Wizard {
    step: WizardStep,
    values: FormValues,
    errors: FieldErrors,
    touched: BTreeSet<FieldName>,
    is_submitting: bool,
    pending: Option<Pending>,
    otp: Option<OtpPrompt>,
    pin_watch: PinWatch,
    notice: Option<Notice>,
    failure: Option<String>,
    receipt: Option<Receipt>,
    pub focus: StepFocus,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn definition(&self) -> Option<&'static StepDefinition> {
        self.step.definition()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error_for(&self, field: FieldName) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn otp(&self) -> Option<&OtpPrompt> {
        self.otp.as_ref()
    }

    pub fn is_otp_open(&self) -> bool {
        self.otp.is_some()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn receipt(&self) -> Option<&Receipt> {
        self.receipt.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn dismiss_failure(&mut self) {
        self.failure = None;
    }

    // === Field editing ===

    /// Replace the text of a field on the current step
    pub fn set_text(&mut self, field: FieldName, text: &str) -> Result<Option<Effect>, WizardError> {
        self.check_editable(field)?;
        let slot = self
            .values
            .text_mut(field)
            .ok_or(WizardError::ReadOnly(field))?;
        slot.clear();
        slot.push_str(text);
        Ok(self.after_edit(field))
    }

    /// Flip a checkbox on the current step
    pub fn toggle(&mut self, field: FieldName) -> Result<Option<Effect>, WizardError> {
        self.check_editable(field)?;
        let flag = self
            .values
            .flag_mut(field)
            .ok_or(WizardError::ReadOnly(field))?;
        *flag = !*flag;
        Ok(self.after_edit(field))
    }

    /// Pick a radio option by value
    pub fn select_option(&mut self, field: FieldName, value: &str) -> Result<(), WizardError> {
        self.check_editable(field)?;
        let known = self
            .definition()
            .and_then(|d| d.field(field))
            .and_then(|spec| spec.option_label(value))
            .is_some();
        if !known {
            return Err(WizardError::ReadOnly(field));
        }
        if let Some(slot) = self.values.text_mut(field) {
            *slot = value.to_string();
        }
        self.after_edit(field);
        Ok(())
    }

    /// Mark a field as visited and validate it
    pub fn touch(&mut self, field: FieldName) {
        if field.is_spacer() {
            return;
        }
        self.touched.insert(field);
        self.refresh_error(field);
    }

    fn check_editable(&self, field: FieldName) -> Result<(), WizardError> {
        if self.step.is_terminal() {
            return Err(WizardError::Finished);
        }
        if self.is_submitting {
            return Err(WizardError::Busy);
        }
        if self.otp.is_some() {
            return Err(WizardError::AwaitingOtp);
        }
        let spec = self
            .definition()
            .and_then(|d| d.field(field))
            .ok_or(WizardError::NotOnStep(field))?;
        if !spec.is_focusable() {
            return Err(WizardError::ReadOnly(field));
        }
        Ok(())
    }

    fn after_edit(&mut self, field: FieldName) -> Option<Effect> {
        if self.touched.contains(&field) {
            self.refresh_error(field);
        }
        if field == FieldName::PinCode {
            self.pin_watch.observe(&self.values.pin_code)
        } else {
            None
        }
    }

    fn refresh_error(&mut self, field: FieldName) {
        match validate_field(field, &self.values) {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    // === Focused-field helpers used by the key handler ===

    /// Move focus forward, validating the field being left
    pub fn focus_next(&mut self) {
        if let Some(def) = self.definition() {
            self.blur_active(def);
            self.focus.next(def);
        }
    }

    /// Move focus backward, validating the field being left
    pub fn focus_prev(&mut self) {
        if let Some(def) = self.definition() {
            self.blur_active(def);
            self.focus.prev(def);
        }
    }

    fn blur_active(&mut self, def: &StepDefinition) {
        if let Some(spec) = self.focus.active_field(def) {
            self.touch(spec.name);
        }
    }

    /// Append a character to the focused text field
    pub fn input_char(&mut self, c: char) -> Result<Option<Effect>, WizardError> {
        let Some(field) = self.focused_text_field() else {
            return Ok(None);
        };
        let mut text = self.values.get(field).as_text().to_string();
        text.push(c);
        self.set_text(field, &text)
    }

    /// Remove the last character of the focused text field
    pub fn backspace(&mut self) -> Result<Option<Effect>, WizardError> {
        let Some(field) = self.focused_text_field() else {
            return Ok(None);
        };
        let mut text = self.values.get(field).as_text().to_string();
        if text.pop().is_none() {
            return Ok(None);
        }
        self.set_text(field, &text)
    }

    /// Toggle the focused checkbox
    pub fn toggle_focused(&mut self) -> Result<Option<Effect>, WizardError> {
        let Some(spec) = self.definition().and_then(|d| self.focus.active_field(d)) else {
            return Ok(None);
        };
        match spec.kind {
            FieldKind::Checkbox => self.toggle(spec.name),
            _ => Ok(None),
        }
    }

    /// Step the focused radio field to its next or previous option
    pub fn cycle_focused(&mut self, forward: bool) -> Result<(), WizardError> {
        let Some(spec) = self.definition().and_then(|d| self.focus.active_field(d)) else {
            return Ok(());
        };
        let current = self.values.get(spec.name);
        match cycle_option(spec, current.as_text(), forward) {
            Some(value) => self.select_option(spec.name, value),
            None => Ok(()),
        }
    }

    fn focused_text_field(&self) -> Option<FieldName> {
        let spec = self.definition().and_then(|d| self.focus.active_field(d))?;
        matches!(spec.kind, FieldKind::Text { read_only: false, .. }).then_some(spec.name)
    }

    pub fn is_button_focused(&self) -> bool {
        self.definition()
            .is_some_and(|d| self.focus.is_button_active(d))
    }

    // === Transitions ===

    /// Validate the current step and start its transition
    pub fn advance(&mut self) -> Result<Effect, WizardError> {
        if self.step.is_terminal() {
            return Err(WizardError::Finished);
        }
        if self.is_submitting {
            return Err(WizardError::Busy);
        }
        if self.otp.is_some() {
            return Err(WizardError::AwaitingOtp);
        }

        let definition = self.definition().ok_or(WizardError::Finished)?;
        for field in definition.required {
            self.touched.insert(*field);
            self.refresh_error(*field);
        }
        validate_step(self.step, &self.values).map_err(WizardError::Invalid)?;
        if self.step == WizardStep::Address && !self.pin_watch.is_settled() {
            return Err(WizardError::LookupPending);
        }

        let (pending, effect) = match self.step {
            WizardStep::Aadhaar => (
                Pending::SendOtp,
                Effect::SendOtp {
                    aadhaar_number: self.values.aadhaar_number.clone(),
                },
            ),
            WizardStep::Pan => (
                Pending::VerifyPan,
                Effect::VerifyPan {
                    pan_number: self.values.pan_number.clone(),
                },
            ),
            WizardStep::Address => (
                Pending::Submit,
                Effect::Submit {
                    values: self.values.clone(),
                },
            ),
            WizardStep::Submitted => return Err(WizardError::Finished),
        };

        self.failure = None;
        self.begin(pending);
        tracing::info!(step = self.step.number(), "starting step transition");
        Ok(effect)
    }

    fn begin(&mut self, pending: Pending) {
        self.is_submitting = true;
        self.pending = Some(pending);
    }

    fn finish(&mut self, pending: Pending) -> bool {
        if self.pending != Some(pending) {
            tracing::warn!(?pending, outstanding = ?self.pending, "ignoring unexpected outcome");
            return false;
        }
        self.pending = None;
        self.is_submitting = false;
        true
    }

    fn move_to(&mut self, step: WizardStep) {
        debug_assert!(step > self.step);
        self.step = step;
        self.focus.reset();
    }

    // === OTP prompt ===

    /// Type into the OTP prompt, capped at six characters
    pub fn otp_input(&mut self, c: char) {
        if self.is_submitting || c.is_control() {
            return;
        }
        if let Some(otp) = self.otp.as_mut() {
            if otp.code.chars().count() < OTP_LENGTH {
                otp.code.push(c);
            }
        }
    }

    pub fn otp_backspace(&mut self) {
        if self.is_submitting {
            return;
        }
        if let Some(otp) = self.otp.as_mut() {
            otp.code.pop();
        }
    }

    /// Check the entered code and start confirmation
    pub fn confirm_otp(&mut self) -> Result<Effect, WizardError> {
        if self.is_submitting {
            return Err(WizardError::Busy);
        }
        let otp = self.otp.as_mut().ok_or(WizardError::NoOtpPrompt)?;
        if !otp.is_well_formed() {
            otp.error = Some(OTP_MESSAGE.to_string());
            return Err(WizardError::InvalidOtp);
        }
        otp.error = None;
        let code = otp.code.clone();

        self.begin(Pending::ConfirmOtp);
        Ok(Effect::ConfirmOtp {
            aadhaar_number: self.values.aadhaar_number.clone(),
            code,
        })
    }

    /// Close the OTP prompt without advancing
    pub fn cancel_otp(&mut self) -> Result<(), WizardError> {
        if self.is_submitting {
            return Err(WizardError::Busy);
        }
        self.otp = None;
        Ok(())
    }

    // === Outcomes ===

    /// Apply the result of a previously returned effect
    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::OtpSent(result) => {
                if !self.finish(Pending::SendOtp) {
                    return;
                }
                match result {
                    Ok(()) => self.otp = Some(OtpPrompt::default()),
                    Err(message) => {
                        tracing::warn!(%message, "OTP issuance failed");
                        self.failure = Some(message);
                    }
                }
            }
            Outcome::OtpConfirmed(result) => {
                if !self.finish(Pending::ConfirmOtp) {
                    return;
                }
                match result {
                    Ok(()) => {
                        self.otp = None;
                        self.move_to(WizardStep::Pan);
                        self.notice = Some(OTP_NOTICE);
                    }
                    Err(message) => {
                        tracing::warn!(%message, "OTP confirmation rejected");
                        if let Some(otp) = self.otp.as_mut() {
                            otp.error = Some(message);
                        }
                    }
                }
            }
            Outcome::PanVerified(result) => {
                if !self.finish(Pending::VerifyPan) {
                    return;
                }
                match result {
                    Ok(()) => {
                        self.move_to(WizardStep::Address);
                        self.notice = Some(PAN_NOTICE);
                    }
                    Err(message) => {
                        tracing::warn!(%message, "PAN verification failed");
                        self.failure = Some(message);
                    }
                }
            }
            Outcome::Submitted(result) => {
                if !self.finish(Pending::Submit) {
                    return;
                }
                match result {
                    Ok(receipt) => {
                        tracing::info!(reference = %receipt.reference, "registration submitted");
                        self.receipt = Some(receipt);
                        self.move_to(WizardStep::Submitted);
                        self.notice = Some(SUBMITTED_NOTICE);
                    }
                    Err(message) => {
                        tracing::warn!(%message, "registration submission failed");
                        self.failure = Some(message);
                    }
                }
            }
            Outcome::AddressResolved {
                pin_code,
                generation,
                result,
            } => self.apply_address(&pin_code, generation, result),
        }
    }

    fn apply_address(
        &mut self,
        pin_code: &str,
        generation: u64,
        result: Result<Option<Address>, String>,
    ) {
        if self.step.is_terminal() || !self.pin_watch.is_current(pin_code, generation) {
            tracing::debug!(pin_code, generation, "discarding stale address lookup");
            return;
        }
        self.pin_watch.applied = generation;

        match result {
            Ok(Some(address)) => {
                self.values.city = address.city;
                self.values.state = address.state;
                self.touch(FieldName::City);
                self.touch(FieldName::State);
            }
            Ok(None) => {
                tracing::debug!(pin_code, "no address found for PIN code");
                self.clear_address();
            }
            Err(message) => {
                tracing::warn!(pin_code, %message, "address lookup failed");
                self.clear_address();
            }
        }
    }

    fn clear_address(&mut self) {
        self.values.clear_address();
        for field in [FieldName::City, FieldName::State] {
            if self.touched.contains(&field) {
                self.refresh_error(field);
            }
        }
    }
}
