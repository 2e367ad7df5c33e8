use std::io;

use clap::Subcommand;

use upline::geo::{GeoCascade, GeoOption, Slice, SliceStatus};

use crate::{
    commands::{CommandError, Env},
    render,
};

#[derive(Debug, Subcommand)]
pub enum GeoCommand {
    /// List countries.
    Countries,

    /// List a country's states.
    States {
        /// Country name.
        #[arg(long)]
        country: String,
    },

    /// List a state's cities.
    Cities {
        /// Country name.
        #[arg(long)]
        country: String,

        /// State name.
        #[arg(long)]
        state: String,
    },
}

pub(super) async fn run<W: io::Write>(
    command: GeoCommand,
    env: &mut Env<'_, W>,
) -> Result<(), CommandError> {
    let resolver = &env.context.geo;
    let mut cascade = GeoCascade::new();

    resolver.load_countries(&mut cascade).await;
    loaded(cascade.countries())?;

    match command {
        GeoCommand::Countries => {
            render::table(
                env.out,
                ["Country", "ISO"],
                cascade.countries().options().iter().map(|country| {
                    [
                        country.name.clone(),
                        country.iso2.clone().unwrap_or_default(),
                    ]
                }),
                &[],
            )?;
        }
        GeoCommand::States { country } => {
            resolver.select_country(&mut cascade, &country).await?;

            names(env.out, "State", loaded(cascade.states())?)?;
        }
        GeoCommand::Cities { country, state } => {
            resolver.select_country(&mut cascade, &country).await?;
            loaded(cascade.states())?;

            resolver.select_state(&mut cascade, &state).await?;

            names(env.out, "City", loaded(cascade.cities())?)?;
        }
    }

    Ok(())
}

/// The slice's options, or its failure message.
pub(super) fn loaded<T: GeoOption>(slice: &Slice<T>) -> Result<&[T], CommandError> {
    match slice.status() {
        SliceStatus::Failed(message) => Err(CommandError::Input(message.clone())),
        _ => Ok(slice.options()),
    }
}

fn names<T: GeoOption>(out: &mut impl io::Write, header: &str, options: &[T]) -> io::Result<()> {
    render::table(
        out,
        [header],
        options.iter().map(|option| [option.name().to_string()]),
        &[],
    )
}
