use clap::{Args, Subcommand};
use lotus::{
    context::AppContext,
    guard::Route,
    resources::store::models::{StoreItemId, StoreItemInput},
};
use lotus_app::{
    errors::CommandError,
    notifications::Notification,
    views::{ShopView, ViewScope},
};
use rust_decimal::Decimal;

use super::{loaded, mount, report};

#[derive(Debug, Args)]
pub(crate) struct ShopCommand {
    #[command(subcommand)]
    command: ShopSubcommand,
}

#[derive(Debug, Subcommand)]
enum ShopSubcommand {
    /// List store items
    List {
        /// Filter by item name
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Add an item
    Add(ItemArgs),
    /// Update an item; omitted fields keep their current value
    Update {
        /// Item id
        id: String,

        #[command(flatten)]
        fields: ItemArgs,
    },
    /// Delete an item
    Delete {
        /// Item id
        id: String,
    },
}

#[derive(Debug, Args)]
struct ItemArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    price: Option<Decimal>,

    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// Image URL
    #[arg(long)]
    image: Option<String>,
}

impl ItemArgs {
    fn apply_to(self, mut input: StoreItemInput) -> StoreItemInput {
        if let Some(name) = self.name {
            input.name = name;
        }
        if let Some(price) = self.price {
            input.price = price;
        }
        if let Some(category) = self.category {
            input.category = category;
        }
        if let Some(description) = self.description {
            input.description = description;
        }
        if let Some(image) = self.image {
            input.image = image;
        }

        input
    }
}

pub(crate) async fn run(context: &AppContext, command: ShopCommand) -> Result<(), CommandError> {
    let scope = ViewScope::new();
    let mut view = mount(context, Route::Shop, || {
        ShopView::new(context.store.clone(), &scope)
    })?;

    let result = match command.command {
        ShopSubcommand::List { search } => {
            loaded(view.load().await)?;
            view.set_search(search);
            println!("{}", view.render());
            Ok(())
        }
        ShopSubcommand::Add(fields) => {
            let input = fields.apply_to(StoreItemInput::default());

            report(view.add(&input).await)
        }
        ShopSubcommand::Update { id, fields } => {
            let id = StoreItemId::new(id);

            loaded(view.load().await)?;

            let Some(current) = view.find(&id) else {
                return Err(CommandError::Failed(Notification::destructive(
                    "Error",
                    format!("no store item with id {id}"),
                )));
            };

            let input = fields.apply_to(current.to_input());

            report(view.update(&id, &input).await)
        }
        ShopSubcommand::Delete { id } => report(view.delete(&StoreItemId::new(id)).await),
    };

    scope.unmount();

    result
}
