//! Field rules

use jiff::civil::Date;

use crate::{
    phone,
    wizard::{FieldProblem, Gender},
};

/// Minimum applicant age, in whole years.
pub const MINIMUM_AGE: i16 = 18;

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;
const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 20;
const PASSWORD_MIN: usize = 8;

fn required(value: &str) -> Result<&str, FieldProblem> {
    let value = value.trim();

    if value.is_empty() {
        Err(FieldProblem::Required)
    } else {
        Ok(value)
    }
}

pub(crate) fn name(value: &str) -> Result<String, FieldProblem> {
    let value = required(value)?;
    let length = value.chars().count();

    if !(NAME_MIN..=NAME_MAX).contains(&length) {
        return Err(FieldProblem::invalid(format!(
            "must be between {NAME_MIN} and {NAME_MAX} characters"
        )));
    }

    if !value
        .chars()
        .all(|c| c.is_alphabetic() || matches!(c, ' ' | '\'' | '-'))
    {
        return Err(FieldProblem::invalid(
            "may only contain letters, spaces, apostrophes and hyphens",
        ));
    }

    Ok(value.to_string())
}

pub(crate) fn date_of_birth(value: &str, today: Date) -> Result<Date, FieldProblem> {
    let date: Date = required(value)?
        .parse()
        .map_err(|_err| FieldProblem::invalid("must be a date in YYYY-MM-DD format"))?;

    if date > today {
        return Err(FieldProblem::invalid("cannot be in the future"));
    }

    let mut age = today.year() - date.year();

    if (today.month(), today.day()) < (date.month(), date.day()) {
        age -= 1;
    }

    if age < MINIMUM_AGE {
        return Err(FieldProblem::invalid(format!(
            "applicant must be at least {MINIMUM_AGE} years old"
        )));
    }

    Ok(date)
}

pub(crate) fn gender(value: &str) -> Result<Gender, FieldProblem> {
    required(value)?
        .parse()
        .map_err(|error| FieldProblem::invalid(format!("{error}")))
}

pub(crate) fn email(value: &str) -> Result<String, FieldProblem> {
    let value = required(value)?;

    let invalid = || FieldProblem::invalid("must be a valid email address");

    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;

    let domain_ok = !domain.contains('@')
        && domain.contains('.')
        && domain
            .split('.')
            .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'));

    if local.is_empty() || !domain_ok {
        return Err(invalid());
    }

    Ok(value.to_ascii_lowercase())
}

pub(crate) fn mobile(value: &str, iso2: Option<&str>) -> Result<String, FieldProblem> {
    required(value)?;

    phone::parse_mobile(value, iso2)
        .map(|number| number.e164())
        .map_err(|error| FieldProblem::invalid(error.to_string()))
}

pub(crate) fn identifier(value: &str) -> Result<String, FieldProblem> {
    required(value).map(str::to_string)
}

pub(crate) fn username(value: &str) -> Result<String, FieldProblem> {
    let value = required(value)?;

    if !(USERNAME_MIN..=USERNAME_MAX).contains(&value.len()) {
        return Err(FieldProblem::invalid(format!(
            "must be between {USERNAME_MIN} and {USERNAME_MAX} characters"
        )));
    }

    let mut chars = value.chars();

    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());

    if !starts_with_letter || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(FieldProblem::invalid(
            "must start with a letter and contain only letters, digits and underscores",
        ));
    }

    Ok(value.to_string())
}

pub(crate) fn password(value: &str) -> Result<String, FieldProblem> {
    if value.is_empty() {
        return Err(FieldProblem::Required);
    }

    let strong = value.chars().count() >= PASSWORD_MIN
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_digit());

    if strong {
        Ok(value.to_string())
    } else {
        Err(FieldProblem::invalid(format!(
            "must be at least {PASSWORD_MIN} characters with upper-case, lower-case and a digit"
        )))
    }
}

pub(crate) fn confirmation(password: &str, confirmation: &str) -> Result<(), FieldProblem> {
    if confirmation.is_empty() {
        Err(FieldProblem::Required)
    } else if password == confirmation {
        Ok(())
    } else {
        Err(FieldProblem::invalid("does not match the password"))
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn names_allow_hyphens_and_apostrophes() {
        assert_eq!(name(" Chi-Chi O'Neil "), Ok("Chi-Chi O'Neil".to_string()));
        assert_eq!(name(""), Err(FieldProblem::Required));
        assert!(matches!(name("A"), Err(FieldProblem::Invalid(_))));
        assert!(matches!(name("R2D2"), Err(FieldProblem::Invalid(_))));
    }

    #[test]
    fn date_of_birth_enforces_minimum_age() -> TestResult {
        let today = date(2026, 10, 19);

        assert_eq!(date_of_birth("2008-10-19", today)?, date(2008, 10, 19));
        assert!(matches!(
            date_of_birth("2008-10-20", today),
            Err(FieldProblem::Invalid(_))
        ));
        assert!(matches!(
            date_of_birth("2030-01-01", today),
            Err(FieldProblem::Invalid(_))
        ));
        assert!(matches!(
            date_of_birth("19/10/1990", today),
            Err(FieldProblem::Invalid(_))
        ));

        Ok(())
    }

    #[test]
    fn email_shapes() {
        assert_eq!(email("Ada@Example.com"), Ok("ada@example.com".to_string()));

        for bad in ["ada", "ada@", "@example.com", "ada@example", "a b@example.com", "a@b@c.com"] {
            assert!(
                matches!(email(bad), Err(FieldProblem::Invalid(_))),
                "{bad} should be invalid"
            );
        }
    }

    #[test]
    fn mobile_uses_country_rule() {
        assert_eq!(mobile("0803 123 4567", Some("NG")), Ok("+2348031234567".to_string()));
        assert!(matches!(mobile("0241234567", Some("NG")), Err(FieldProblem::Invalid(_))));
        assert_eq!(mobile(" ", Some("NG")), Err(FieldProblem::Required));
    }

    #[test]
    fn usernames() {
        assert_eq!(username("ada_99"), Ok("ada_99".to_string()));

        for bad in ["ab", "9lives", "ada-99", "a_very_long_username_indeed"] {
            assert!(
                matches!(username(bad), Err(FieldProblem::Invalid(_))),
                "{bad} should be invalid"
            );
        }
    }

    #[test]
    fn passwords() {
        assert!(password("Secret123").is_ok());
        assert!(matches!(password("secret123"), Err(FieldProblem::Invalid(_))));
        assert!(matches!(password("Short1"), Err(FieldProblem::Invalid(_))));
        assert_eq!(password(""), Err(FieldProblem::Required));
        assert_eq!(confirmation("Secret123", "Secret123"), Ok(()));
        assert!(matches!(
            confirmation("Secret123", "Secret124"),
            Err(FieldProblem::Invalid(_))
        ));
    }
}
