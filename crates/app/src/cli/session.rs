use clap::Args;
use lotus::{context::AppContext, guard::GuardState};
use lotus_app::{errors::CommandError, notifications::Notification};

use super::report;

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Admin email address
    #[arg(long, env = "LOTUS_ADMIN_EMAIL")]
    email: String,

    /// Admin password
    #[arg(long, env = "LOTUS_ADMIN_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn login(context: &AppContext, args: LoginArgs) -> Result<(), CommandError> {
    match context.login(&args.email, &args.password).await {
        Ok(_) => report(
            Notification::success("Login successful").with_description("Welcome to admin dashboard"),
        ),
        Err(error) => Err(CommandError::Failed(Notification::from_error(
            "Login failed",
            &error,
        ))),
    }
}

pub(crate) fn logout(context: &AppContext) -> Result<(), CommandError> {
    context.logout();

    report(Notification::success("Logged out"))
}

pub(crate) fn status(context: &AppContext) -> Result<(), CommandError> {
    match context.guard.state() {
        GuardState::Unlocked => println!("signed in: admin pages unlocked"),
        GuardState::Locked => println!("signed out: admin pages locked"),
    }

    Ok(())
}
