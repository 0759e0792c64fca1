use std::path::Path;

use clap::{Args, Subcommand};
use lotus::{context::AppContext, guard::Route};
use lotus_app::{
    content::{ContentKind, ContentStore, PublishState},
    errors::CommandError,
    views::ContentView,
};

use super::{mount, report};

#[derive(Debug, Args)]
pub(crate) struct ContentCommand {
    #[command(subcommand)]
    command: ContentSubcommand,
}

#[derive(Debug, Subcommand)]
enum ContentSubcommand {
    /// List testimonials and blog posts
    List,
    /// Publish an entry
    Publish {
        #[arg(value_enum)]
        kind: ContentKind,

        id: u32,
    },
    /// Move an entry back to draft
    Unpublish {
        #[arg(value_enum)]
        kind: ContentKind,

        id: u32,
    },
}

pub(crate) fn run(
    context: &AppContext,
    content_file: &Path,
    command: ContentCommand,
) -> Result<(), CommandError> {
    let mut view = mount(context, Route::Content, || {
        ContentView::load(ContentStore::new(content_file))
    })??;

    match command.command {
        ContentSubcommand::List => {
            println!("{}", view.render());
            Ok(())
        }
        ContentSubcommand::Publish { kind, id } => {
            report(view.set_status(kind, id, PublishState::Published)?)
        }
        ContentSubcommand::Unpublish { kind, id } => {
            report(view.set_status(kind, id, PublishState::Draft)?)
        }
    }
}
