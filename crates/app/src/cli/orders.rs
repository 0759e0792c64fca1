use clap::{Args, Subcommand};
use lotus::{
    context::AppContext,
    guard::Route,
    resources::store::models::{OrderId, OrderStatus},
};
use lotus_app::{
    errors::CommandError,
    views::{OrdersView, ViewScope},
};

use super::{loaded, mount, report};

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List orders (pending orders are not shown)
    List {
        /// Only show orders with this status
        #[arg(long)]
        status: Option<OrderStatus>,

        /// Filter by customer name or email
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Set an order's status (pending, processing, completed, cancelled)
    SetStatus {
        /// Order id
        id: String,

        status: OrderStatus,
    },
}

pub(crate) async fn run(context: &AppContext, command: OrdersCommand) -> Result<(), CommandError> {
    let scope = ViewScope::new();
    let mut view = mount(context, Route::Orders, || {
        OrdersView::new(context.store.clone(), &scope)
    })?;

    let result = match command.command {
        OrdersSubcommand::List { status, search } => {
            loaded(view.load().await)?;
            view.set_status_filter(status);
            view.set_search(search);
            println!("{}", view.render());
            Ok(())
        }
        OrdersSubcommand::SetStatus { id, status } => {
            report(view.set_status(&OrderId::new(id), status).await)
        }
    };

    scope.unmount();

    result
}
