use clap::{Args, Subcommand};
use lotus::{context::AppContext, guard::Route};
use lotus_app::{
    errors::CommandError,
    views::{UsersView, ViewScope},
};

use super::{loaded, mount};

#[derive(Debug, Args)]
pub(crate) struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Debug, Subcommand)]
enum UsersSubcommand {
    /// List registered users
    List {
        /// Filter by name or email
        #[arg(long, default_value = "")]
        search: String,
    },
}

pub(crate) async fn run(context: &AppContext, command: UsersCommand) -> Result<(), CommandError> {
    let scope = ViewScope::new();
    let mut view = mount(context, Route::Users, || {
        UsersView::new(context.users.clone(), &scope)
    })?;

    match command.command {
        UsersSubcommand::List { search } => {
            loaded(view.load().await)?;
            view.set_search(search);

            println!("{}", view.render());
        }
    }

    scope.unmount();

    Ok(())
}
