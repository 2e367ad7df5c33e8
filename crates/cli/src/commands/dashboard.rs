use std::io;

use clap::Args;
use jiff::Timestamp;

use upline::money::format_minor;

use crate::{
    commands::{CommandError, Env},
    render,
};

#[derive(Debug, Clone, Copy, Args)]
pub struct DepositsArgs {
    /// One-based page number.
    #[arg(long, default_value_t = 1)]
    page: u32,
}

fn day(timestamp: Option<Timestamp>) -> String {
    timestamp.map_or_else(String::new, |ts| ts.strftime("%Y-%m-%d").to_string())
}

pub(super) async fn cards<W: io::Write>(env: &mut Env<'_, W>) -> Result<(), CommandError> {
    let cards = env.context.dashboard.cards(env.session).await?;
    let currency = env.context.currency;

    render::table(
        env.out,
        ["Card", "Value"],
        cards
            .iter()
            .map(|card| [card.title().to_string(), card.headline(currency)]),
        &[1],
    )?;

    Ok(())
}

pub(super) async fn referrals<W: io::Write>(env: &mut Env<'_, W>) -> Result<(), CommandError> {
    let referrals = env.context.dashboard.latest_referrals(env.session).await?;

    render::table(
        env.out,
        ["Name", "Username", "Joined"],
        referrals.into_iter().map(|referral| {
            [
                referral.fullname.unwrap_or_default(),
                referral.username,
                day(referral.joined),
            ]
        }),
        &[],
    )?;

    Ok(())
}

pub(super) async fn members<W: io::Write>(env: &mut Env<'_, W>) -> Result<(), CommandError> {
    let members = env.context.dashboard.members(env.session).await?;

    render::table(
        env.out,
        ["ID", "Username", "Name", "Email"],
        members.into_iter().map(|member| {
            [
                member.id.map(|id| id.to_string()).unwrap_or_default(),
                member.username,
                member.fullname.unwrap_or_default(),
                member.email.unwrap_or_default(),
            ]
        }),
        &[0],
    )?;

    Ok(())
}

pub(super) async fn commissions<W: io::Write>(env: &mut Env<'_, W>) -> Result<(), CommandError> {
    let commissions = env.context.dashboard.bottle_commissions(env.session).await?;
    let currency = env.context.currency;

    render::table(
        env.out,
        ["User", "Total", "Transactions"],
        commissions.into_iter().map(|commission| {
            [
                commission.username,
                format_minor(commission.total_amount, currency),
                commission.total_transactions.to_string(),
            ]
        }),
        &[1, 2],
    )?;

    Ok(())
}

pub(super) async fn deposits<W: io::Write>(
    args: DepositsArgs,
    env: &mut Env<'_, W>,
) -> Result<(), CommandError> {
    let page = env.context.dashboard.deposits(env.session, args.page).await?;
    let currency = env.context.currency;

    render::table(
        env.out,
        ["ID", "Amount", "Status", "Date"],
        page.deposits.into_iter().map(|deposit| {
            [
                deposit.id.to_string(),
                format_minor(deposit.amount, currency),
                deposit.status.unwrap_or_default(),
                day(deposit.created_at),
            ]
        }),
        &[0, 1],
    )?;

    render::line(env.out, "Page", page.page)?;
    render::line(env.out, "Total deposits", page.total)?;

    if page.has_next {
        render::line(env.out, "Next page", page.page.saturating_add(1))?;
    }

    Ok(())
}
