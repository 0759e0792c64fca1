use std::sync::Arc;

use clap::{Parser, Subcommand};
use lotus::{
    context::AppContext,
    guard::{Guarded, Route},
    session::{FileStorage, SystemClock},
};
use lotus_app::{
    config::{AppConfig, AppConfigError},
    errors::CommandError,
    notifications::Notification,
    views::Applied,
};

mod content;
mod dashboard;
mod instructors;
mod orders;
mod session;
mod shop;
mod users;

#[derive(Debug, Parser)]
#[command(name = "lotus-app", about = "Lotus studio admin dashboard", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign in as an admin
    Login(session::LoginArgs),
    /// Sign out and forget the stored session
    Logout,
    /// Show whether admin pages are unlocked
    Status,
    /// Studio overview
    Dashboard,
    Users(users::UsersCommand),
    Instructors(instructors::InstructorsCommand),
    Shop(shop::ShopCommand),
    Orders(orders::OrdersCommand),
    Content(content::ContentCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), CommandError> {
        let config = self.config;
        let session_path = config.session.session_path()?;
        let clock = Arc::new(SystemClock);

        let api = config.api.to_api_config().map_err(AppConfigError::from)?;

        let context = AppContext::new(
            api,
            Arc::new(FileStorage::new(session_path, clock.clone())),
            clock,
        )?;

        match self.command {
            Commands::Login(args) => session::login(&context, args).await,
            Commands::Logout => session::logout(&context),
            Commands::Status => session::status(&context),
            Commands::Dashboard => dashboard::run(&context).await,
            Commands::Users(command) => users::run(&context, command).await,
            Commands::Instructors(command) => instructors::run(&context, command).await,
            Commands::Shop(command) => shop::run(&context, command).await,
            Commands::Orders(command) => orders::run(&context, command).await,
            Commands::Content(command) => content::run(&context, &config.session.content_file, command),
        }
    }
}

/// Mount a view behind the route guard.
fn mount<T>(context: &AppContext, route: Route, view: impl FnOnce() -> T) -> Result<T, CommandError> {
    match context.guard.render(route, view) {
        Guarded::Content(view) => Ok(view),
        Guarded::Redirect { from, .. } => Err(CommandError::LoginRequired { from }),
    }
}

/// Print a success toast, or turn a failure into the command's error.
fn report(notification: Notification) -> Result<(), CommandError> {
    if notification.is_destructive() {
        return Err(CommandError::Failed(notification));
    }

    eprintln!("{notification}");

    Ok(())
}

fn loaded(applied: Applied) -> Result<(), CommandError> {
    match applied {
        Applied::Failed(notification) => Err(CommandError::Failed(notification)),
        Applied::Updated(_) | Applied::Discarded => Ok(()),
    }
}
