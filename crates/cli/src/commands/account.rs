use std::io;

use clap::Args;
use tracing::info;

use upline::wizard::Password;

use crate::{
    commands::{CommandError, Env},
    render,
    state::save_session,
};

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username or email address.
    #[arg(long)]
    login: String,

    /// Account password.
    #[arg(long, env = "UPLINE_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(super) async fn login<W: io::Write>(
    args: LoginArgs,
    env: &mut Env<'_, W>,
) -> Result<(), CommandError> {
    let password = Password::new(args.password);

    let user = env
        .context
        .account
        .login(env.session, &args.login, &password)
        .await?;

    save_session(env.store, env.session)?;

    info!(user_id = user.id, "signed in");

    render::line(env.out, "Signed in as", &user.username)?;

    if user.is_admin() {
        render::line(env.out, "Role", "admin")?;
    }

    Ok(())
}

pub(super) fn logout<W: io::Write>(env: &mut Env<'_, W>) -> Result<(), CommandError> {
    env.context.account.logout(env.session);

    save_session(env.store, env.session)?;

    writeln!(env.out, "Signed out")?;

    Ok(())
}
