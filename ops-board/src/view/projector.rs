//! View projection
//!
//! Pure functions from `(orders, menu option, selected table)` to what the
//! board displays. Nothing here fetches or mutates.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use shared::{Dish, OrderRecord, ReservationRecord};

use super::MenuOption;
use crate::core::BoardState;
use crate::orders::Counters;

/// Label shown in place of a table number for takeaway orders
pub const TAKEAWAY_LABEL: &str = "Tap and Collect";

// ============================================================================
// Filtering
// ============================================================================

/// Orders listed under a menu option
///
/// `Reservations` lists no orders; that panel reads the reservation store.
pub fn filter_for_display(
    orders: &[OrderRecord],
    menu_option: MenuOption,
    selected_table: Option<u32>,
) -> Vec<&OrderRecord> {
    match menu_option {
        MenuOption::AllOrders | MenuOption::UndeliveredOrders => orders
            .iter()
            .filter(|o| menu_option == MenuOption::AllOrders || o.is_pending())
            .filter(|o| selected_table.is_none_or(|table| o.table_number == table))
            .collect(),
        MenuOption::TapAndCollect => orders.iter().filter(|o| o.is_takeaway()).collect(),
        MenuOption::Reservations => Vec::new(),
    }
}

// ============================================================================
// Tables
// ============================================================================

/// Occupancy of a physical table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    /// At least one undelivered order
    Pending,
    /// Nothing outstanding
    #[serde(rename = "none")]
    Idle,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Pending => "pending",
            TableStatus::Idle => "none",
        }
    }
}

pub fn table_status(orders: &[OrderRecord], table_number: u32) -> TableStatus {
    let pending = orders
        .iter()
        .any(|o| o.table_number == table_number && o.is_pending());
    if pending {
        TableStatus::Pending
    } else {
        TableStatus::Idle
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableTile {
    pub number: u32,
    pub status: TableStatus,
    pub selected: bool,
}

/// Physical tables `1..=table_count`; the takeaway table 0 is never listed
pub fn table_grid(orders: &[OrderRecord], table_count: u32, selected_table: Option<u32>) -> Vec<TableTile> {
    (1..=table_count)
        .map(|number| TableTile {
            number,
            status: table_status(orders, number),
            selected: selected_table == Some(number),
        })
        .collect()
}

// ============================================================================
// Order groups
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeliveryStatus {
    Pending,
    Delivered,
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryStatus::Pending => f.write_str("Pending"),
            DeliveryStatus::Delivered => f.write_str("Delivered"),
        }
    }
}

/// One order with its dish lines
///
/// Table, date/time, token, status and action belong to the order and are
/// rendered once, spanning all of its dish lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderGroup {
    pub order_id: String,
    pub table_label: String,
    pub created_at: DateTime<Utc>,
    /// Collection token, only listed under Tap and Collect
    pub token: Option<String>,
    pub status: DeliveryStatus,
    /// Whether the mark-delivered action is offered
    pub can_mark_delivered: bool,
    pub dishes: Vec<Dish>,
}

impl OrderGroup {
    /// Number of display rows the order-level cells span
    pub fn row_span(&self) -> usize {
        self.dishes.len()
    }

    pub fn date_label<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.created_at.with_timezone(tz).format("%Y-%m-%d").to_string()
    }

    pub fn time_label<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.created_at.with_timezone(tz).format("%H:%M:%S").to_string()
    }
}

pub fn table_label(order: &OrderRecord) -> String {
    if order.is_takeaway() {
        TAKEAWAY_LABEL.to_string()
    } else {
        order.table_number.to_string()
    }
}

pub fn group_orders(orders: &[&OrderRecord], menu_option: MenuOption) -> Vec<OrderGroup> {
    let with_token = menu_option == MenuOption::TapAndCollect;

    orders
        .iter()
        .map(|order| OrderGroup {
            order_id: order.id.clone(),
            table_label: table_label(order),
            created_at: order.created_at,
            token: with_token.then(|| order.token_label().to_string()),
            status: if order.is_delivered {
                DeliveryStatus::Delivered
            } else {
                DeliveryStatus::Pending
            },
            can_mark_delivered: order.is_pending(),
            dishes: order.dishes.clone(),
        })
        .collect()
}

// ============================================================================
// Menu
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub option: MenuOption,
    pub active: bool,
    /// Counter badge, hidden when zero
    pub badge: Option<usize>,
}

pub fn menu_entries(counters: &Counters, active: MenuOption) -> Vec<MenuEntry> {
    MenuOption::ALL
        .iter()
        .map(|&option| {
            let count = match option {
                MenuOption::AllOrders => counters.new_orders,
                MenuOption::UndeliveredOrders => counters.pending,
                MenuOption::TapAndCollect => counters.takeaway,
                MenuOption::Reservations => 0,
            };
            MenuEntry {
                option,
                active: option == active,
                badge: (count > 0).then_some(count),
            }
        })
        .collect()
}

// ============================================================================
// Board view
// ============================================================================

/// Main panel content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DetailPanel {
    Loading,
    Error(String),
    /// No table picked yet
    SelectTable,
    Orders {
        heading: String,
        groups: Vec<OrderGroup>,
    },
    Reservations(Vec<ReservationRecord>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub menu: Vec<MenuEntry>,
    /// `None` when the active option hides the grid
    pub table_grid: Option<Vec<TableTile>>,
    pub detail: DetailPanel,
}

pub fn project(state: &BoardState, table_count: u32) -> BoardView {
    let menu = menu_entries(&state.counters, state.menu_option);

    let table_grid = state
        .menu_option
        .shows_table_grid()
        .then(|| table_grid(&state.orders, table_count, state.selected_table));

    BoardView {
        menu,
        table_grid,
        detail: detail_panel(state),
    }
}

pub fn detail_panel(state: &BoardState) -> DetailPanel {
    if state.loading {
        return DetailPanel::Loading;
    }
    if let Some(error) = &state.error {
        return DetailPanel::Error(error.clone());
    }

    match state.menu_option {
        MenuOption::Reservations => DetailPanel::Reservations(state.reservations.records().to_vec()),
        MenuOption::TapAndCollect => DetailPanel::Orders {
            heading: heading(state.menu_option, state.selected_table),
            groups: group_orders(
                &filter_for_display(&state.orders, state.menu_option, state.selected_table),
                state.menu_option,
            ),
        },
        MenuOption::AllOrders | MenuOption::UndeliveredOrders => match state.selected_table {
            None => DetailPanel::SelectTable,
            Some(table) => DetailPanel::Orders {
                heading: heading(state.menu_option, Some(table)),
                groups: group_orders(
                    &filter_for_display(&state.orders, state.menu_option, Some(table)),
                    state.menu_option,
                ),
            },
        },
    }
}

fn heading(menu_option: MenuOption, selected_table: Option<u32>) -> String {
    match selected_table {
        Some(table) => format!("{} for Table {}", menu_option, table),
        None => menu_option.to_string(),
    }
}
