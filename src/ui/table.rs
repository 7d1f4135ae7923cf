use tabled::{settings::Style, Table, Tabled};
use crate::model::{BookmarkGroup, Branch, BranchCheckout, GroupId};

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "Group")]
    name: String,
    #[tabled(rename = "Created")]
    created: String,
}

#[derive(Tabled)]
struct BranchRow {
    #[tabled(rename = "Branch")]
    name: String,
    #[tabled(rename = "Alias")]
    alias: String,
}

#[derive(Tabled)]
struct CheckoutRow {
    #[tabled(rename = "Branch")]
    name: String,
    #[tabled(rename = "Checkouts")]
    count: i64,
    #[tabled(rename = "Last checkout")]
    last: String,
    #[tabled(rename = "Latest commit")]
    message: String,
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    if rows.is_empty() {
        return String::new();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Groups with a `*` next to the current one
pub fn groups_table(groups: &[BookmarkGroup], current: GroupId) -> String {
    render(
        groups
            .iter()
            .map(|g| GroupRow {
                marker: if g.id == current { "*" } else { "" },
                name: g.name.clone(),
                created: g.created_at.format("%Y-%m-%d %H:%M").to_string(),
            })
            .collect(),
    )
}

pub fn branches_table(branches: &[Branch]) -> String {
    render(
        branches
            .iter()
            .map(|b| BranchRow {
                name: b.name.clone(),
                alias: b.alias.clone().unwrap_or_default(),
            })
            .collect(),
    )
}

pub fn checkouts_table(checkouts: &[BranchCheckout]) -> String {
    render(
        checkouts
            .iter()
            .map(|c| CheckoutRow {
                name: c.name.clone(),
                count: c.checkout_count,
                last: c
                    .last_checked_out_at
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string(),
                message: c.latest_commit_msg.clone(),
            })
            .collect(),
    )
}
