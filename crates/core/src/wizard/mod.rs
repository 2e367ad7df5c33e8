//! Registration wizard
//!
//! A multi-step form over a single [`RegistrationDraft`]. Each step commits
//! its own values; a commit validates them and, only on success, merges them
//! into the draft and marks the step valid. Navigation forward is gated on
//! the current step being valid. The location step is backed by an embedded
//! [`GeoCascade`], and the contact step validates the mobile number against
//! the country chosen there.

use jiff::civil::Date;
use thiserror::Error;

use crate::geo::{Applied, Cascade, FetchTicket, GeoCascade, GeoError, GeoFetchError, GeoPayload};

mod draft;
mod fields;
mod rules;
mod steps;

pub use draft::{Gender, GenderError, Password, RegistrationDraft, RegistrationRequest};
pub use fields::{Field, FieldError, FieldErrors, FieldProblem};
pub use rules::MINIMUM_AGE;
pub use steps::{
    ContactDetails, CredentialDetails, LocationDetails, PersonalDetails, PlacementDetails, Step,
    StepValues,
};

/// Errors raised by wizard navigation and submission.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum WizardError {
    /// The current step has not been committed successfully.
    #[error("complete the {0} step before continuing")]
    StepNotValid(Step),

    /// There is no step after the last one.
    #[error("already on the last step")]
    NoNextStep,

    /// There is no step before the first one.
    #[error("already on the first step")]
    NoPreviousStep,

    /// Submission with a step still invalid.
    #[error("registration is incomplete: {0} step is not valid")]
    Incomplete(Step),
}

/// Set of steps currently marked valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ValidSteps(u8);

impl ValidSteps {
    const fn contains(self, step: Step) -> bool {
        self.0 & step.bit() != 0
    }

    const fn insert(&mut self, step: Step) {
        self.0 |= step.bit();
    }

    const fn remove(&mut self, step: Step) {
        self.0 &= !step.bit();
    }
}

/// The registration wizard.
#[derive(Debug, Clone)]
pub struct RegistrationWizard {
    draft: RegistrationDraft,
    valid: ValidSteps,
    current: Step,
    geo: GeoCascade,
    today: Date,
}

impl RegistrationWizard {
    /// Start an empty wizard. `today` anchors date-of-birth checks.
    pub fn new(today: Date) -> Self {
        Self {
            draft: RegistrationDraft::default(),
            valid: ValidSteps::default(),
            current: Step::FIRST,
            geo: GeoCascade::new(),
            today,
        }
    }

    /// The accumulated draft.
    pub const fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    /// The step being shown.
    pub const fn current(&self) -> Step {
        self.current
    }

    /// The embedded geography cascade.
    pub const fn geo(&self) -> &GeoCascade {
        &self.geo
    }

    /// Placeholder prefix for the mobile field, e.g. `+234`.
    pub fn mobile_placeholder(&self) -> Option<String> {
        self.geo.calling_code()
    }

    /// Whether `step` has been committed successfully and not invalidated since.
    pub const fn is_step_valid(&self, step: Step) -> bool {
        self.valid.contains(step)
    }

    /// Whether every step is valid.
    pub fn is_complete(&self) -> bool {
        self.first_invalid_step().is_none()
    }

    /// First step that is not valid.
    pub fn first_invalid_step(&self) -> Option<Step> {
        Step::ALL
            .into_iter()
            .find(|step| !self.is_step_valid(*step))
    }

    /// Validate `values` against their step's rules and, on success, merge
    /// them into the draft and mark the step valid. On failure the draft is
    /// untouched, the step is marked invalid and every field problem is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] describing each failing field.
    pub fn commit(&mut self, values: impl Into<StepValues>) -> Result<(), FieldErrors> {
        let values = values.into();
        let step = values.step();

        let result = match values {
            StepValues::Personal(values) => self.commit_personal(&values),
            StepValues::Location(values) => self.commit_location(&values),
            StepValues::Contact(values) => self.commit_contact(&values),
            StepValues::Placement(values) => self.commit_placement(&values),
            StepValues::Credentials(values) => self.commit_credentials(&values),
        };

        match result {
            Ok(()) => self.valid.insert(step),
            Err(_) => self.valid.remove(step),
        }

        result
    }

    /// Move to the next step; only allowed when the current step is valid.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::StepNotValid`] or [`WizardError::NoNextStep`].
    pub fn advance(&mut self) -> Result<Step, WizardError> {
        if !self.is_step_valid(self.current) {
            return Err(WizardError::StepNotValid(self.current));
        }

        let next = self.current.next().ok_or(WizardError::NoNextStep)?;

        self.current = next;

        Ok(next)
    }

    /// Move to the previous step. Always allowed except on the first step.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::NoPreviousStep`] on the first step.
    pub fn back(&mut self) -> Result<Step, WizardError> {
        let previous = self.current.previous().ok_or(WizardError::NoPreviousStep)?;

        self.current = previous;

        Ok(previous)
    }

    /// Jump to `step`: backwards freely, forwards only over valid steps.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::StepNotValid`] naming the first invalid step
    /// before `step`.
    pub fn go_to(&mut self, step: Step) -> Result<Step, WizardError> {
        if step <= self.current {
            self.current = step;

            return Ok(step);
        }

        if let Some(blocking) = Step::ALL
            .into_iter()
            .take_while(|earlier| *earlier < step)
            .find(|earlier| !self.is_step_valid(*earlier))
        {
            return Err(WizardError::StepNotValid(blocking));
        }

        self.current = step;

        Ok(step)
    }

    /// Build the registration request from the whole draft.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::Incomplete`] naming the first invalid step.
    pub fn submit(&self) -> Result<RegistrationRequest, WizardError> {
        if let Some(step) = self.first_invalid_step() {
            return Err(WizardError::Incomplete(step));
        }

        let draft = &self.draft;

        let field = |value: Option<&String>, step: Step| {
            value.cloned().ok_or(WizardError::Incomplete(step))
        };

        Ok(RegistrationRequest {
            first_name: field(draft.first_name.as_ref(), Step::Personal)?,
            last_name: field(draft.last_name.as_ref(), Step::Personal)?,
            date_of_birth: draft
                .date_of_birth
                .ok_or(WizardError::Incomplete(Step::Personal))?,
            gender: draft.gender.ok_or(WizardError::Incomplete(Step::Personal))?,
            country: field(draft.country.as_ref(), Step::Location)?,
            state: field(draft.state.as_ref(), Step::Location)?,
            city: field(draft.city.as_ref(), Step::Location)?,
            email: field(draft.email.as_ref(), Step::Contact)?,
            mobile: field(draft.mobile.as_ref(), Step::Contact)?,
            stockist: field(draft.stockist.as_ref(), Step::Placement)?,
            package: field(draft.package.as_ref(), Step::Placement)?,
            username: field(draft.username.as_ref(), Step::Credentials)?,
            password: draft
                .password
                .clone()
                .ok_or(WizardError::Incomplete(Step::Credentials))?,
        })
    }

    /// Discard everything and start over.
    pub fn reset(&mut self) {
        *self = Self::new(self.today);
    }

    fn commit_personal(&mut self, values: &PersonalDetails) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        let first_name = errors.check(Field::FirstName, rules::name(&values.first_name));
        let last_name = errors.check(Field::LastName, rules::name(&values.last_name));
        let date_of_birth = errors.check(
            Field::DateOfBirth,
            rules::date_of_birth(&values.date_of_birth, self.today),
        );
        let gender = errors.check(Field::Gender, rules::gender(&values.gender));

        errors.into_result()?;

        self.draft.first_name = first_name;
        self.draft.last_name = last_name;
        self.draft.date_of_birth = date_of_birth;
        self.draft.gender = gender;

        Ok(())
    }

    fn commit_location(&mut self, values: &LocationDetails) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        let country = errors.check(
            Field::Country,
            selection(
                &values.country,
                self.geo.countries().is_selectable(),
                self.geo.countries().selected(),
                self.geo.countries().find(&values.country).is_some(),
            ),
        );
        let state = errors.check(
            Field::State,
            selection(
                &values.state,
                self.geo.states().is_selectable(),
                self.geo.states().selected(),
                self.geo.states().find(&values.state).is_some(),
            ),
        );
        let city = errors.check(
            Field::City,
            selection(
                &values.city,
                self.geo.cities().is_selectable(),
                self.geo.cities().selected(),
                self.geo.cities().find(&values.city).is_some(),
            ),
        );

        errors.into_result()?;

        self.draft.country = country;
        self.draft.state = state;
        self.draft.city = city;

        // A new location invalidates the phone-format baseline.
        self.draft.mobile = None;
        self.valid.remove(Step::Contact);

        Ok(())
    }

    fn commit_contact(&mut self, values: &ContactDetails) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        let email = errors.check(Field::Email, rules::email(&values.email));

        let mobile = match self.draft.country.as_deref() {
            Some(country) if self.is_step_valid(Step::Location) => errors.check(
                Field::Mobile,
                rules::mobile(&values.mobile, self.geo.iso2_of(country)),
            ),
            _ => {
                errors.push(Field::Mobile, FieldProblem::Pending);
                None
            }
        };

        errors.into_result()?;

        self.draft.email = email;
        self.draft.mobile = mobile;

        Ok(())
    }

    fn commit_placement(&mut self, values: &PlacementDetails) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        let stockist = errors.check(Field::Stockist, rules::identifier(&values.stockist));
        let package = errors.check(Field::Package, rules::identifier(&values.package));

        errors.into_result()?;

        self.draft.stockist = stockist;
        self.draft.package = package;

        Ok(())
    }

    fn commit_credentials(&mut self, values: &CredentialDetails) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = errors.check(Field::Username, rules::username(&values.username));
        let password = errors.check(Field::Password, rules::password(&values.password));

        errors.check(
            Field::PasswordConfirmation,
            rules::confirmation(&values.password, &values.password_confirmation),
        );

        errors.into_result()?;

        self.draft.username = username;
        self.draft.password = password.map(Password::new);

        Ok(())
    }

    fn invalidate_location(&mut self) {
        self.draft.state = None;
        self.draft.city = None;
        self.draft.mobile = None;
        self.valid.remove(Step::Location);
        self.valid.remove(Step::Contact);
    }
}

/// Rule for a cascade-backed field: it must match the live selection, which in
/// turn must come from a loaded option list. Unloaded levels are pending.
fn selection(
    value: &str,
    loaded: bool,
    selected: Option<&str>,
    known: bool,
) -> Result<String, FieldProblem> {
    let value = value.trim();

    if !loaded {
        return Err(FieldProblem::Pending);
    }

    if value.is_empty() {
        return Err(FieldProblem::Required);
    }

    if !known {
        return Err(FieldProblem::invalid("select an option from the list"));
    }

    match selected {
        Some(selected) if selected.eq_ignore_ascii_case(value) => Ok(selected.to_string()),
        Some(_) => Err(FieldProblem::invalid("does not match the current selection")),
        None => Err(FieldProblem::Pending),
    }
}

impl Cascade for RegistrationWizard {
    fn load_countries(&mut self) -> FetchTicket {
        self.draft.country = None;
        self.invalidate_location();

        self.geo.load_countries()
    }

    fn select_country(&mut self, name: &str) -> Result<FetchTicket, GeoError> {
        let ticket = self.geo.select_country(name)?;

        self.invalidate_location();

        Ok(ticket)
    }

    fn select_state(&mut self, name: &str) -> Result<FetchTicket, GeoError> {
        let ticket = self.geo.select_state(name)?;

        self.draft.city = None;
        self.valid.remove(Step::Location);

        Ok(ticket)
    }

    fn select_city(&mut self, name: &str) -> Result<(), GeoError> {
        self.geo.select_city(name)?;
        self.valid.remove(Step::Location);

        Ok(())
    }

    fn apply(
        &mut self,
        ticket: &FetchTicket,
        result: Result<GeoPayload, GeoFetchError>,
    ) -> Applied {
        self.geo.apply(ticket, result)
    }
}

#[cfg(test)]
mod tests;
