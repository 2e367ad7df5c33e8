//! Registration draft and the final request

use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::civil::Date;
use serde::{Serialize, Serializer};
use thiserror::Error;
use zeroize::Zeroize;

/// Gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    /// Male
    Male,

    /// Female
    Female,
}

/// Unrecognised gender value.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("select Male or Female")]
pub struct GenderError;

impl FromStr for Gender {
    type Err = GenderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            _ => Err(GenderError),
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Male => "Male",
            Self::Female => "Female",
        })
    }
}

/// A password held in memory: redacted in `Debug`, zeroed on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Wrap a plaintext password.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The plaintext.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("Password(**redacted**)")
    }
}

impl Drop for Password {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl Serialize for Password {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Values accumulated across wizard steps. Each step's commit fills its own
/// fields; later steps may read earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    /// First name
    pub first_name: Option<String>,
    /// Last name
    pub last_name: Option<String>,
    /// Date of birth
    pub date_of_birth: Option<Date>,
    /// Gender
    pub gender: Option<Gender>,
    /// Country name
    pub country: Option<String>,
    /// State name
    pub state: Option<String>,
    /// City / LGA name
    pub city: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Mobile number in E.164 form
    pub mobile: Option<String>,
    /// Stockist identifier
    pub stockist: Option<String>,
    /// Package identifier
    pub package: Option<String>,
    /// Username
    pub username: Option<String>,
    /// Password
    pub password: Option<Password>,
}

/// The whole draft, as submitted to the registration endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Date of birth
    pub date_of_birth: Date,
    /// Gender
    pub gender: Gender,
    /// Country name
    pub country: String,
    /// State name
    pub state: String,
    /// City / LGA name
    #[serde(rename = "lga")]
    pub city: String,
    /// Email address
    pub email: String,
    /// Mobile number in E.164 form
    pub mobile: String,
    /// Stockist identifier
    pub stockist: String,
    /// Package identifier
    pub package: String,
    /// Username
    pub username: String,
    /// Password
    pub password: Password,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_redacted() {
        let password = Password::new("hunter2A");

        assert_eq!(format!("{password:?}"), "Password(**redacted**)");
        assert_eq!(password.expose(), "hunter2A");
    }

    #[test]
    fn gender_parses_loosely() {
        assert_eq!("FEMALE".parse(), Ok(Gender::Female));
        assert_eq!(" m ".parse(), Ok(Gender::Male));
        assert_eq!("other".parse::<Gender>(), Err(GenderError));
    }
}
