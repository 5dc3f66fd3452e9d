//! Board presentation model
//!
//! - [`MenuOption`] - sidebar options
//! - [`projector`] - filters, table status, order groups, detail panel

pub mod menu;
pub mod projector;

pub use menu::{MenuOption, UnknownMenuOption};
pub use projector::{
    BoardView, DeliveryStatus, DetailPanel, MenuEntry, OrderGroup, TableStatus, TableTile,
    filter_for_display, group_orders, menu_entries, project, table_grid, table_status,
};
