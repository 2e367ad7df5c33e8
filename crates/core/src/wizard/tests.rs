use jiff::civil::date;
use testresult::TestResult;

use super::*;
use crate::geo::{City, Country, State};

fn wizard() -> RegistrationWizard {
    RegistrationWizard::new(date(2026, 10, 19))
}

fn personal() -> PersonalDetails {
    PersonalDetails {
        first_name: "Ada".to_string(),
        last_name: "Obi".to_string(),
        date_of_birth: "1990-04-12".to_string(),
        gender: "Female".to_string(),
    }
}

fn contact(mobile: &str) -> ContactDetails {
    ContactDetails {
        email: "ada@example.com".to_string(),
        mobile: mobile.to_string(),
    }
}

fn location(country: &str, state: &str, city: &str) -> LocationDetails {
    LocationDetails {
        country: country.to_string(),
        state: state.to_string(),
        city: city.to_string(),
    }
}

fn placement() -> PlacementDetails {
    PlacementDetails {
        stockist: "ST-001".to_string(),
        package: "3".to_string(),
    }
}

fn credentials(confirmation: &str) -> CredentialDetails {
    CredentialDetails {
        username: "ada_obi".to_string(),
        password: "Secret123".to_string(),
        password_confirmation: confirmation.to_string(),
    }
}

fn load_countries(wizard: &mut RegistrationWizard) {
    let ticket = wizard.load_countries();

    wizard.apply(
        &ticket,
        Ok(GeoPayload::Countries(vec![
            Country {
                name: "Nigeria".to_string(),
                iso2: Some("NG".to_string()),
            },
            Country {
                name: "Ghana".to_string(),
                iso2: Some("GH".to_string()),
            },
        ])),
    );
}

fn pick(
    wizard: &mut RegistrationWizard,
    country: &str,
    state: &str,
    city: &str,
) -> Result<(), GeoError> {
    let ticket = wizard.select_country(country)?;
    wizard.apply(
        &ticket,
        Ok(GeoPayload::States(vec![State {
            name: state.to_string(),
            country: country.to_string(),
        }])),
    );

    let ticket = wizard.select_state(state)?;
    wizard.apply(
        &ticket,
        Ok(GeoPayload::Cities(vec![City {
            name: city.to_string(),
            state: state.to_string(),
        }])),
    );

    wizard.select_city(city)
}

fn located_in_lagos() -> TestResult<RegistrationWizard> {
    let mut wizard = wizard();

    load_countries(&mut wizard);
    pick(&mut wizard, "Nigeria", "Lagos", "Ikeja")?;

    wizard.commit(personal())?;
    wizard.commit(location("Nigeria", "Lagos", "Ikeja"))?;

    Ok(wizard)
}

#[test]
fn cannot_advance_past_an_invalid_step() {
    let mut wizard = wizard();

    assert_eq!(
        wizard.advance(),
        Err(WizardError::StepNotValid(Step::Personal))
    );
    assert_eq!(wizard.current(), Step::Personal);
}

#[test]
fn failed_commit_reports_every_field_and_keeps_the_draft() {
    let mut wizard = wizard();

    let result = wizard.commit(PersonalDetails {
        first_name: String::new(),
        last_name: "O".to_string(),
        date_of_birth: "2015-01-01".to_string(),
        gender: "Female".to_string(),
    });

    let Err(errors) = result else {
        panic!("expected field errors");
    };

    assert_eq!(errors.len(), 3);
    assert_eq!(errors.get(Field::FirstName), Some(&FieldProblem::Required));
    assert!(matches!(
        errors.get(Field::LastName),
        Some(FieldProblem::Invalid(_))
    ));
    assert!(matches!(
        errors.get(Field::DateOfBirth),
        Some(FieldProblem::Invalid(_))
    ));
    assert_eq!(errors.get(Field::Gender), None);
    assert_eq!(wizard.draft(), &RegistrationDraft::default());
    assert!(!wizard.is_step_valid(Step::Personal));
}

#[test]
fn committing_then_advancing_moves_forward() -> TestResult {
    let mut wizard = wizard();

    wizard.commit(personal())?;

    assert_eq!(wizard.advance()?, Step::Location);
    assert_eq!(wizard.back()?, Step::Personal);
    assert_eq!(wizard.back(), Err(WizardError::NoPreviousStep));
    assert_eq!(wizard.draft().first_name.as_deref(), Some("Ada"));
    assert_eq!(wizard.draft().gender, Some(Gender::Female));

    Ok(())
}

#[test]
fn location_is_pending_until_options_load() {
    let mut wizard = wizard();

    let Err(errors) = wizard.commit(location("Nigeria", "Lagos", "Ikeja")) else {
        panic!("expected pending fields");
    };

    assert!(errors.is_pending_only());
}

#[test]
fn location_must_match_the_cascade_selection() -> TestResult {
    let mut wizard = wizard();

    load_countries(&mut wizard);
    pick(&mut wizard, "Nigeria", "Lagos", "Ikeja")?;

    let Err(errors) = wizard.commit(location("Ghana", "Lagos", "Ikeja")) else {
        panic!("expected a mismatch");
    };

    assert!(matches!(
        errors.get(Field::Country),
        Some(FieldProblem::Invalid(_))
    ));

    wizard.commit(location("nigeria", "lagos", "ikeja"))?;

    assert_eq!(wizard.draft().country.as_deref(), Some("Nigeria"));
    assert_eq!(wizard.draft().city.as_deref(), Some("Ikeja"));

    Ok(())
}

#[test]
fn mobile_is_normalised_for_the_selected_country() -> TestResult {
    let mut wizard = located_in_lagos()?;

    assert_eq!(wizard.mobile_placeholder().as_deref(), Some("+234"));

    wizard.commit(contact("0803 123 4567"))?;

    assert_eq!(wizard.draft().mobile.as_deref(), Some("+2348031234567"));

    Ok(())
}

#[test]
fn contact_is_pending_without_a_valid_location() {
    let mut wizard = wizard();

    let Err(errors) = wizard.commit(contact("+2348031234567")) else {
        panic!("expected a pending mobile");
    };

    assert_eq!(errors.get(Field::Mobile), Some(&FieldProblem::Pending));
}

#[test]
fn changing_country_invalidates_location_and_contact() -> TestResult {
    let mut wizard = located_in_lagos()?;

    wizard.commit(contact("+2348031234567"))?;

    assert!(wizard.is_step_valid(Step::Contact));

    pick(&mut wizard, "Ghana", "Greater Accra", "Accra")?;

    assert!(!wizard.is_step_valid(Step::Location));
    assert!(!wizard.is_step_valid(Step::Contact));
    assert_eq!(wizard.draft().state, None);
    assert_eq!(wizard.draft().city, None);
    assert_eq!(wizard.draft().mobile, None);
    assert_eq!(wizard.mobile_placeholder().as_deref(), Some("+233"));

    wizard.commit(location("Ghana", "Greater Accra", "Accra"))?;

    let Err(errors) = wizard.commit(contact("+2348031234567")) else {
        panic!("a Nigerian number must not pass for Ghana");
    };

    assert!(matches!(
        errors.get(Field::Mobile),
        Some(FieldProblem::Invalid(_))
    ));
    assert!(!wizard.is_step_valid(Step::Contact));

    wizard.commit(contact("024 123 4567"))?;

    assert_eq!(wizard.draft().mobile.as_deref(), Some("+233241234567"));

    Ok(())
}

#[test]
fn recommitting_location_clears_the_mobile() -> TestResult {
    let mut wizard = located_in_lagos()?;

    wizard.commit(contact("+2348031234567"))?;
    wizard.commit(location("Nigeria", "Lagos", "Ikeja"))?;

    assert_eq!(wizard.draft().mobile, None);
    assert!(!wizard.is_step_valid(Step::Contact));

    Ok(())
}

#[test]
fn password_confirmation_must_match() {
    let mut wizard = wizard();

    let Err(errors) = wizard.commit(credentials("Secret124")) else {
        panic!("expected a confirmation mismatch");
    };

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors.get(Field::PasswordConfirmation),
        Some(FieldProblem::Invalid(_))
    ));
    assert_eq!(wizard.draft().password, None);
}

#[test]
fn go_to_only_skips_over_valid_steps() -> TestResult {
    let mut wizard = located_in_lagos()?;

    assert_eq!(wizard.go_to(Step::Contact)?, Step::Contact);
    assert_eq!(
        wizard.go_to(Step::Credentials),
        Err(WizardError::StepNotValid(Step::Contact))
    );
    assert_eq!(wizard.go_to(Step::Personal)?, Step::Personal);

    Ok(())
}

#[test]
fn going_back_is_allowed_after_a_country_change() -> TestResult {
    let mut wizard = located_in_lagos()?;

    wizard.commit(contact("+2348031234567"))?;
    wizard.commit(placement())?;
    wizard.go_to(Step::Placement)?;

    pick(&mut wizard, "Ghana", "Greater Accra", "Accra")?;

    assert!(!wizard.is_step_valid(Step::Location));
    assert_eq!(wizard.go_to(Step::Contact), Ok(Step::Contact));
    assert_eq!(wizard.current(), Step::Contact);
    assert_eq!(
        wizard.go_to(Step::Placement),
        Err(WizardError::StepNotValid(Step::Location))
    );

    Ok(())
}

#[test]
fn submit_requires_every_step() -> TestResult {
    let mut wizard = located_in_lagos()?;

    wizard.commit(contact("+2348031234567"))?;
    wizard.commit(placement())?;

    assert_eq!(
        wizard.submit(),
        Err(WizardError::Incomplete(Step::Credentials))
    );

    wizard.commit(credentials("Secret123"))?;

    assert!(wizard.is_complete());

    let request = wizard.submit()?;

    assert_eq!(request.city, "Ikeja");
    assert_eq!(request.mobile, "+2348031234567");
    assert_eq!(request.password.expose(), "Secret123");
    assert_eq!(request.date_of_birth, date(1990, 4, 12));

    Ok(())
}

#[test]
fn advancing_from_the_last_step_is_an_error() -> TestResult {
    let mut wizard = located_in_lagos()?;

    wizard.commit(contact("+2348031234567"))?;
    wizard.commit(placement())?;
    wizard.commit(credentials("Secret123"))?;
    wizard.go_to(Step::Credentials)?;

    assert_eq!(wizard.advance(), Err(WizardError::NoNextStep));

    wizard.reset();

    assert_eq!(wizard.current(), Step::Personal);
    assert!(!wizard.is_complete());

    Ok(())
}
