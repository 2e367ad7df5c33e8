//! Subcommands.

use std::io;

use clap::Subcommand;
use thiserror::Error;

use upline::{
    cart::CartError,
    geo::GeoError,
    money::AmountError,
    store::FileStore,
    wizard::{FieldErrors, Step, WizardError},
};
use upline_app::{
    context::AppContext,
    services::{AccountServiceError, DashboardServiceError, PackagesServiceError},
    session::Session,
};

use crate::state::StateError;

mod account;
mod cart;
mod dashboard;
mod geo;
mod packages;
mod register;

#[derive(Debug, Error)]
pub(crate) enum CommandError {
    #[error(transparent)]
    Account(#[from] AccountServiceError),

    #[error(transparent)]
    Dashboard(#[from] DashboardServiceError),

    #[error(transparent)]
    Packages(#[from] PackagesServiceError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Geo(#[from] GeoError),

    #[error("{field}: {source}")]
    Amount {
        field: &'static str,
        #[source]
        source: AmountError,
    },

    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error("{step} step: {errors}")]
    Fields { step: Step, errors: FieldErrors },

    #[error("{0}")]
    Input(String),

    #[error("failed to write output")]
    Output(#[from] io::Error),
}

/// Top-level command.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and remember the session.
    Login(account::LoginArgs),

    /// Forget the stored session.
    Logout,

    /// Register a new member.
    Register(Box<register::RegisterArgs>),

    /// Dashboard summary cards for the signed-in user.
    Cards,

    /// Latest referrals.
    Referrals,

    /// Members, administrators excluded.
    Members,

    /// Bottle commissions.
    Commissions,

    /// The signed-in user's e-wallet deposits.
    Deposits(dashboard::DepositsArgs),

    /// Manage packages.
    #[command(subcommand)]
    Packages(packages::PackagesCommand),

    /// Manage the local cart.
    #[command(subcommand)]
    Cart(cart::CartCommand),

    /// Look up countries, states and cities.
    #[command(subcommand)]
    Geo(geo::GeoCommand),
}

/// Everything a command may touch.
pub(crate) struct Env<'a, W> {
    pub(crate) context: &'a AppContext,
    pub(crate) session: &'a mut Session,
    pub(crate) store: &'a mut FileStore,
    pub(crate) out: &'a mut W,
}

pub(crate) async fn run<W: io::Write>(
    command: Command,
    env: &mut Env<'_, W>,
) -> Result<(), CommandError> {
    match command {
        Command::Login(args) => account::login(args, env).await,
        Command::Logout => account::logout(env),
        Command::Register(args) => register::run(*args, env).await,
        Command::Cards => dashboard::cards(env).await,
        Command::Referrals => dashboard::referrals(env).await,
        Command::Members => dashboard::members(env).await,
        Command::Commissions => dashboard::commissions(env).await,
        Command::Deposits(args) => dashboard::deposits(args, env).await,
        Command::Packages(command) => packages::run(command, env).await,
        Command::Cart(command) => cart::run(command, env).await,
        Command::Geo(command) => geo::run(command, env).await,
    }
}
