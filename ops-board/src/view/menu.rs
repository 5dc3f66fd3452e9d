//! Menu options

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Sidebar menu entry selecting what the detail panel shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum MenuOption {
    #[default]
    AllOrders,
    UndeliveredOrders,
    TapAndCollect,
    Reservations,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown menu option: {0}")]
pub struct UnknownMenuOption(pub String);

impl MenuOption {
    /// Sidebar order
    pub const ALL: [MenuOption; 4] = [
        MenuOption::AllOrders,
        MenuOption::UndeliveredOrders,
        MenuOption::TapAndCollect,
        MenuOption::Reservations,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::AllOrders => "All Orders",
            MenuOption::UndeliveredOrders => "Undelivered Orders",
            MenuOption::TapAndCollect => "Tap and Collect",
            MenuOption::Reservations => "Reservations",
        }
    }

    /// Whether the table grid is shown alongside this option
    pub fn shows_table_grid(&self) -> bool {
        matches!(self, MenuOption::AllOrders | MenuOption::UndeliveredOrders)
    }
}

impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MenuOption {
    type Err = UnknownMenuOption;

    /// Accepts the sidebar labels (any case) and short forms
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "all orders" | "all" => Ok(MenuOption::AllOrders),
            "undelivered orders" | "undelivered" | "pending" => Ok(MenuOption::UndeliveredOrders),
            "tap and collect" | "takeaway" | "tap" => Ok(MenuOption::TapAndCollect),
            "reservations" => Ok(MenuOption::Reservations),
            _ => Err(UnknownMenuOption(s.trim().to_string())),
        }
    }
}
