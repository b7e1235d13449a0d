//! Form payloads and [`SalonRecord`](super::SalonRecord) bindings of every
//! business table

mod clients;
mod finance;
mod marketing;
mod stock;
mod work;

pub use clients::{AppointmentInput, CustomerInput};
pub use finance::{ExpenseInput, RevenueInput};
pub use marketing::{CampaignInput, CouponInput, SocialPostInput, TemplateInput};
pub use stock::{InventoryItemInput, LOW_STOCK};
pub use work::{NotificationInput, TaskInput};

use crate::utils::error::{GlowError, Result};

/// Trim an optional text field, folding blanks into `None`
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(GlowError::validation(format!(
            "{} must be zero or more",
            field
        )));
    }
    Ok(())
}
