use std::io;

use clap::Args;
use jiff::Zoned;
use tracing::{debug, info};

use upline::{
    geo::Cascade,
    wizard::{
        ContactDetails, CredentialDetails, LocationDetails, PersonalDetails, PlacementDetails,
        RegistrationWizard, Step, StepValues,
    },
};

use crate::{
    commands::{CommandError, Env, geo::loaded},
    render,
};

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    /// Date of birth as `YYYY-MM-DD`.
    #[arg(long)]
    date_of_birth: String,

    /// `male` or `female`.
    #[arg(long)]
    gender: String,

    #[arg(long)]
    country: String,

    #[arg(long)]
    state: String,

    /// City or local government area.
    #[arg(long)]
    city: String,

    #[arg(long)]
    email: String,

    /// Mobile number, local or international format.
    #[arg(long)]
    mobile: String,

    /// Stockist the member buys through.
    #[arg(long)]
    stockist: String,

    /// Starter package.
    #[arg(long)]
    package: String,

    #[arg(long)]
    username: String,

    #[arg(long, env = "UPLINE_NEW_PASSWORD", hide_env_values = true)]
    password: String,

    /// Defaults to `--password`.
    #[arg(long)]
    password_confirmation: Option<String>,
}

/// Drive the wizard step by step, stopping at the first step that fails.
pub(super) async fn run<W: io::Write>(
    args: RegisterArgs,
    env: &mut Env<'_, W>,
) -> Result<(), CommandError> {
    let mut wizard = RegistrationWizard::new(Zoned::now().date());
    let resolver = &env.context.geo;

    commit(
        &mut wizard,
        PersonalDetails {
            first_name: args.first_name,
            last_name: args.last_name,
            date_of_birth: args.date_of_birth,
            gender: args.gender,
        },
    )?;

    resolver.load_countries(&mut wizard).await;
    loaded(wizard.geo().countries())?;

    resolver.select_country(&mut wizard, &args.country).await?;
    loaded(wizard.geo().states())?;

    resolver.select_state(&mut wizard, &args.state).await?;
    loaded(wizard.geo().cities())?;

    wizard.select_city(&args.city)?;

    commit(
        &mut wizard,
        LocationDetails {
            country: args.country,
            state: args.state,
            city: args.city,
        },
    )?;

    if let Some(placeholder) = wizard.mobile_placeholder() {
        debug!(%placeholder, "mobile number format");
    }

    commit(
        &mut wizard,
        ContactDetails {
            email: args.email,
            mobile: args.mobile,
        },
    )?;

    commit(
        &mut wizard,
        PlacementDetails {
            stockist: args.stockist,
            package: args.package,
        },
    )?;

    let password_confirmation = args
        .password_confirmation
        .unwrap_or_else(|| args.password.clone());

    commit(
        &mut wizard,
        CredentialDetails {
            username: args.username,
            password: args.password,
            password_confirmation,
        },
    )?;

    let message = env.context.account.register(&wizard).await?;

    info!(username = ?wizard.draft().username, "registration submitted");

    render::line(env.out, "Registered", message)?;

    Ok(())
}

/// Commit one step's values and move past it.
fn commit(
    wizard: &mut RegistrationWizard,
    values: impl Into<StepValues>,
) -> Result<(), CommandError> {
    let values = values.into();
    let step = values.step();

    wizard
        .commit(values)
        .map_err(|errors| CommandError::Fields { step, errors })?;

    if wizard.current() == step && step != Step::LAST {
        wizard.advance()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use upline::wizard::Field;

    use super::*;

    #[test]
    fn a_failed_step_reports_its_fields() {
        let mut wizard = RegistrationWizard::new(date(2026, 10, 19));

        let result = commit(
            &mut wizard,
            PersonalDetails {
                first_name: "Ada".to_string(),
                last_name: String::new(),
                date_of_birth: "2015-01-01".to_string(),
                gender: "female".to_string(),
            },
        );

        assert!(matches!(
            &result,
            Err(CommandError::Fields { step: Step::Personal, errors })
                if errors.get(Field::LastName).is_some()
                    && errors.get(Field::DateOfBirth).is_some()
        ));
        assert_eq!(wizard.current(), Step::Personal);
    }

    #[test]
    fn a_committed_step_advances() {
        let mut wizard = RegistrationWizard::new(date(2026, 10, 19));

        let result = commit(
            &mut wizard,
            PersonalDetails {
                first_name: "Ada".to_string(),
                last_name: "Obi".to_string(),
                date_of_birth: "1990-05-17".to_string(),
                gender: "female".to_string(),
            },
        );

        assert!(result.is_ok());
        assert_eq!(wizard.current(), Step::Location);
    }
}
