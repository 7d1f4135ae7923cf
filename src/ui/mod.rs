pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{confirm, error, header, info, muted, plain, success, warn};
pub use table::{branches_table, checkouts_table, groups_table};
pub use theme::{theme, Theme};
