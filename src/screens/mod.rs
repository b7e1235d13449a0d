//! Dashboard screens
//!
//! Screens are modelled as state plus operations. Each one owns a
//! [`Scope`](crate::utils::Scope); closing it drops results still in flight.

mod dashboard;
mod list;

pub use dashboard::{DashboardScreen, DashboardSummary};
pub use list::{ListScreen, ScreenState};
