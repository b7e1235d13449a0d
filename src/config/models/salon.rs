//! Salon business rules and demo data configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Salon configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalonConfig {
    /// Display name used in e-mails
    #[serde(default = "default_salon_name")]
    pub name: String,
    /// A cancellation closer than this to the start is recorded as late
    #[serde(default = "default_late_cancellation_hours")]
    pub late_cancellation_hours: u32,
    /// First bookable hour of the day (UTC)
    #[serde(default = "default_opening_hour")]
    pub opening_hour: u32,
    /// Hour at which the last appointment must be finished (UTC)
    #[serde(default = "default_closing_hour")]
    pub closing_hour: u32,
    /// Granularity of the booking grid
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
    /// Duration used when a booking does not specify one
    #[serde(default = "default_appointment_minutes")]
    pub default_duration_minutes: u32,
}

impl Default for SalonConfig {
    fn default() -> Self {
        Self {
            name: default_salon_name(),
            late_cancellation_hours: default_late_cancellation_hours(),
            opening_hour: default_opening_hour(),
            closing_hour: default_closing_hour(),
            slot_minutes: default_slot_minutes(),
            default_duration_minutes: default_appointment_minutes(),
        }
    }
}

impl SalonConfig {
    /// Merge salon configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.name != default_salon_name() {
            self.name = other.name;
        }
        if other.late_cancellation_hours != default_late_cancellation_hours() {
            self.late_cancellation_hours = other.late_cancellation_hours;
        }
        if other.opening_hour != default_opening_hour() {
            self.opening_hour = other.opening_hour;
        }
        if other.closing_hour != default_closing_hour() {
            self.closing_hour = other.closing_hour;
        }
        if other.slot_minutes != default_slot_minutes() {
            self.slot_minutes = other.slot_minutes;
        }
        if other.default_duration_minutes != default_appointment_minutes() {
            self.default_duration_minutes = other.default_duration_minutes;
        }
        self
    }
}

/// Demo data configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Insert sample records at startup when the customers table is empty
    #[serde(default = "default_true")]
    pub seed_on_empty: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed_on_empty: true,
        }
    }
}

impl DemoConfig {
    /// Merge demo configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.seed_on_empty {
            self.seed_on_empty = false;
        }
        self
    }
}

fn default_salon_name() -> String {
    "GlowDesk".to_string()
}

fn default_late_cancellation_hours() -> u32 {
    6
}

fn default_opening_hour() -> u32 {
    9
}

fn default_closing_hour() -> u32 {
    19
}

fn default_slot_minutes() -> u32 {
    30
}

fn default_appointment_minutes() -> u32 {
    60
}
