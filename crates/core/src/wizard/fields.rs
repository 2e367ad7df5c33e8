//! Field-level validation results

use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

use smallvec::SmallVec;

/// A registration form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// First name
    FirstName,
    /// Last name
    LastName,
    /// Date of birth
    DateOfBirth,
    /// Gender
    Gender,
    /// Country
    Country,
    /// State
    State,
    /// City / LGA
    City,
    /// Email address
    Email,
    /// Mobile number
    Mobile,
    /// Stockist
    Stockist,
    /// Package
    Package,
    /// Username
    Username,
    /// Password
    Password,
    /// Password confirmation
    PasswordConfirmation,
}

impl Field {
    /// Machine name of the field, matching the submitted payload.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::DateOfBirth => "date_of_birth",
            Self::Gender => "gender",
            Self::Country => "country",
            Self::State => "state",
            Self::City => "lga",
            Self::Email => "email",
            Self::Mobile => "mobile",
            Self::Stockist => "stockist",
            Self::Package => "package",
            Self::Username => "username",
            Self::Password => "password",
            Self::PasswordConfirmation => "password_confirmation",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// What is wrong with a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProblem {
    /// No value entered.
    Required,

    /// The field depends on data that has not resolved yet; not an error the
    /// user can fix by typing.
    Pending,

    /// The value breaks a rule; carries the message shown to the user.
    Invalid(String),
}

impl FieldProblem {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

impl Display for FieldProblem {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Required => f.write_str("is required"),
            Self::Pending => f.write_str("is not available yet"),
            Self::Invalid(message) => f.write_str(message),
        }
    }
}

/// A problem attached to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The field
    pub field: Field,

    /// The problem
    pub problem: FieldProblem,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}", self.field, self.problem)
    }
}

/// Every field problem found while validating a step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(SmallVec<[FieldError; 4]>);

impl FieldErrors {
    /// No errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem for `field`.
    pub fn push(&mut self, field: Field, problem: FieldProblem) {
        self.0.push(FieldError { field, problem });
    }

    /// Record the error of `result`, if any, and hand back its value.
    pub(crate) fn check<T>(&mut self, field: Field, result: Result<T, FieldProblem>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(problem) => {
                self.push(field, problem);
                None
            }
        }
    }

    /// Problem recorded for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&FieldProblem> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| &error.problem)
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded problems.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether every problem is [`FieldProblem::Pending`].
    pub fn is_pending_only(&self) -> bool {
        !self.is_empty()
            && self
                .0
                .iter()
                .all(|error| error.problem == FieldProblem::Pending)
    }

    /// Recorded problems, in field order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub(crate) fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }

            Display::fmt(error, f)?;
        }

        Ok(())
    }
}

impl Error for FieldErrors {}
