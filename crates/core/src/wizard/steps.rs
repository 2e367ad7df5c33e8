//! Wizard steps and the raw values each one commits

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Wizard step, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    /// Name, date of birth and gender
    Personal,

    /// Country, state and city
    Location,

    /// Email and mobile number
    Contact,

    /// Stockist and package
    Placement,

    /// Username and password
    Credentials,
}

impl Step {
    /// Every step, in order.
    pub const ALL: [Self; 5] = [
        Self::Personal,
        Self::Location,
        Self::Contact,
        Self::Placement,
        Self::Credentials,
    ];

    /// First step.
    pub const FIRST: Self = Self::Personal;

    /// Last step.
    pub const LAST: Self = Self::Credentials;

    /// Zero-based position.
    pub const fn index(self) -> usize {
        match self {
            Self::Personal => 0,
            Self::Location => 1,
            Self::Contact => 2,
            Self::Placement => 3,
            Self::Credentials => 4,
        }
    }

    /// Step at a zero-based position.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Personal),
            1 => Some(Self::Location),
            2 => Some(Self::Contact),
            3 => Some(Self::Placement),
            4 => Some(Self::Credentials),
            _ => None,
        }
    }

    /// Following step.
    pub const fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Preceding step.
    pub const fn previous(self) -> Option<Self> {
        match self.index().checked_sub(1) {
            Some(index) => Self::from_index(index),
            None => None,
        }
    }

    pub(crate) const fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Personal => "personal details",
            Self::Location => "location",
            Self::Contact => "contact details",
            Self::Placement => "stockist and package",
            Self::Credentials => "account credentials",
        })
    }
}

/// Personal step input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalDetails {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Date of birth, `YYYY-MM-DD`
    pub date_of_birth: String,
    /// Gender
    pub gender: String,
}

/// Location step input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationDetails {
    /// Country name
    pub country: String,
    /// State name
    pub state: String,
    /// City / LGA name
    pub city: String,
}

/// Contact step input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    /// Email address
    pub email: String,
    /// Mobile number in any accepted form
    pub mobile: String,
}

/// Placement step input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementDetails {
    /// Stockist identifier
    pub stockist: String,
    /// Package identifier
    pub package: String,
}

/// Credentials step input.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialDetails {
    /// Username
    pub username: String,
    /// Password
    pub password: String,
    /// Password, again
    pub password_confirmation: String,
}

impl std::fmt::Debug for CredentialDetails {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CredentialDetails")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Values committed for one step; the variant names the step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepValues {
    /// Personal step
    Personal(PersonalDetails),
    /// Location step
    Location(LocationDetails),
    /// Contact step
    Contact(ContactDetails),
    /// Placement step
    Placement(PlacementDetails),
    /// Credentials step
    Credentials(CredentialDetails),
}

impl StepValues {
    /// Step these values belong to.
    pub const fn step(&self) -> Step {
        match self {
            Self::Personal(_) => Step::Personal,
            Self::Location(_) => Step::Location,
            Self::Contact(_) => Step::Contact,
            Self::Placement(_) => Step::Placement,
            Self::Credentials(_) => Step::Credentials,
        }
    }
}

impl From<PersonalDetails> for StepValues {
    fn from(values: PersonalDetails) -> Self {
        Self::Personal(values)
    }
}

impl From<LocationDetails> for StepValues {
    fn from(values: LocationDetails) -> Self {
        Self::Location(values)
    }
}

impl From<ContactDetails> for StepValues {
    fn from(values: ContactDetails) -> Self {
        Self::Contact(values)
    }
}

impl From<PlacementDetails> for StepValues {
    fn from(values: PlacementDetails) -> Self {
        Self::Placement(values)
    }
}

impl From<CredentialDetails> for StepValues {
    fn from(values: CredentialDetails) -> Self {
        Self::Credentials(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_walk_in_order() {
        assert_eq!(Step::FIRST.previous(), None);
        assert_eq!(Step::Personal.next(), Some(Step::Location));
        assert_eq!(Step::Credentials.next(), None);
        assert_eq!(Step::Contact.previous(), Some(Step::Location));

        for (index, step) in Step::ALL.iter().enumerate() {
            assert_eq!(Step::from_index(index), Some(*step));
        }
    }

    #[test]
    fn credentials_debug_hides_password() {
        let details = CredentialDetails {
            username: "ada".to_string(),
            password: "Secret123".to_string(),
            password_confirmation: "Secret123".to_string(),
        };

        assert!(!format!("{details:?}").contains("Secret123"));
    }
}
