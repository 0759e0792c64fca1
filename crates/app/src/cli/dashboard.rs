use lotus::context::AppContext;
use lotus_app::{errors::CommandError, views::DashboardView};

pub(crate) async fn run(context: &AppContext) -> Result<(), CommandError> {
    let mut view = DashboardView::new(
        context.guard.clone(),
        context.users.clone(),
        context.instructors.clone(),
        context.store.clone(),
    );

    for failure in view.load().await {
        eprintln!("{failure}");
    }

    println!("{}", view.render());

    Ok(())
}
