//! Resource views: list state, mutations and table rendering for each admin page.

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

mod content;
mod dashboard;
mod instructors;
mod orders;
mod scope;
mod shop;
mod users;

pub use content::ContentView;
pub use dashboard::{DashboardCounts, DashboardView};
pub use instructors::InstructorsView;
pub use orders::OrdersView;
pub use scope::{Applied, ListView, Ticket, ViewScope};
pub use shop::ShopView;
pub use users::UsersView;

/// Render rows as a rounded table, or `empty` when there are none.
///
/// Columns listed in `numeric` are right aligned.
pub(crate) fn render_table<const N: usize>(
    header: [&str; N],
    rows: impl IntoIterator<Item = [String; N]>,
    numeric: &[usize],
    empty: &str,
) -> String {
    let mut builder = Builder::default();
    builder.push_record(header);

    let mut count = 0_usize;
    for row in rows {
        builder.push_record(row);
        count += 1;
    }

    if count == 0 {
        return empty.to_string();
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());

    for &column in numeric {
        table.modify(Columns::new(column..=column), Alignment::right());
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rows_render_placeholder() {
        let table = render_table(["Name"], Vec::<[String; 1]>::new(), &[], "nothing here");

        assert_eq!(table, "nothing here");
    }

    #[test]
    fn rows_render_with_header() {
        let table = render_table(
            ["Name", "Price"],
            [["Mat".to_string(), "49.99".to_string()]],
            &[1],
            "nothing here",
        );

        assert!(table.contains("Name"), "header missing from {table}");
        assert!(table.contains("49.99"), "row missing from {table}");
    }
}
