use clap::{Args, Subcommand};
use lotus::{
    context::AppContext,
    guard::Route,
    resources::instructors::models::{BookingId, BookingStatus, InstructorId, NewInstructor},
};
use lotus_app::{
    errors::CommandError,
    views::{InstructorsView, ViewScope},
};
use rust_decimal::Decimal;

use super::{loaded, mount, report};

#[derive(Debug, Args)]
pub(crate) struct InstructorsCommand {
    #[command(subcommand)]
    command: InstructorsSubcommand,
}

#[derive(Debug, Subcommand)]
enum InstructorsSubcommand {
    /// List instructors
    List,
    /// Add an instructor
    Add(AddInstructorArgs),
    /// Remove an instructor
    Remove {
        /// Instructor id
        id: String,
    },
    /// List bookings with a known user and instructor
    Bookings,
    /// Set a booking's status (pending, confirmed, cancelled)
    BookingStatus {
        /// Booking id
        id: String,

        status: BookingStatus,
    },
}

#[derive(Debug, Args)]
struct AddInstructorArgs {
    #[arg(long)]
    name: String,

    /// Photo URL
    #[arg(long)]
    image: String,

    /// Star rating, 1 to 5
    #[arg(long, default_value_t = 5)]
    rating: u8,

    /// Price per session
    #[arg(long)]
    price: Decimal,

    #[arg(long)]
    description: String,
}

pub(crate) async fn run(
    context: &AppContext,
    command: InstructorsCommand,
) -> Result<(), CommandError> {
    let scope = ViewScope::new();
    let mut view = mount(context, Route::Instructors, || {
        InstructorsView::new(context.instructors.clone(), &scope)
    })?;

    let result = match command.command {
        InstructorsSubcommand::List => {
            loaded(view.load_instructors().await)?;
            println!("{}", view.render_instructors());
            Ok(())
        }
        InstructorsSubcommand::Add(args) => {
            let form = NewInstructor {
                name: args.name,
                image: args.image,
                rating: args.rating,
                price: args.price,
                description: args.description,
            };

            report(view.add(&form).await)
        }
        InstructorsSubcommand::Remove { id } => report(view.remove(&InstructorId::new(id)).await),
        InstructorsSubcommand::Bookings => {
            loaded(view.load_bookings().await)?;
            println!("{}", view.render_bookings());
            Ok(())
        }
        InstructorsSubcommand::BookingStatus { id, status } => {
            report(view.set_booking_status(&BookingId::new(id), status).await)
        }
    };

    scope.unmount();

    result
}
