//! Contract date conversions.
//!
//! The directory returns contract dates in its wire format (`yyyy-MM-dd`) but
//! expects them back in its input format (`dd/MM/yyyy`). Accounts always
//! carry the input format so a value read from an account can be written to
//! the directory unchanged.

use crate::error::{ConnectorError, ConnectorResult};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use std::fmt;

/// Format used by the directory when returning records.
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";
/// Format the directory expects on input.
pub const DIRECTORY_DATE_FORMAT: &str = "%d/%m/%Y";

const WIRE_DATE_PATTERN: &str = "yyyy-MM-dd";
const DIRECTORY_DATE_PATTERN: &str = "dd/MM/yyyy";

/// A calendar day on an employee contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContractDate(NaiveDate);

impl ContractDate {
    /// Parse a date in the directory wire format (`yyyy-MM-dd`).
    pub fn from_wire(value: &str) -> ConnectorResult<Self> {
        NaiveDate::parse_from_str(value, WIRE_DATE_FORMAT)
            .map(Self)
            .map_err(|_| ConnectorError::invalid_date(value, WIRE_DATE_PATTERN))
    }

    /// Parse a date in the directory input format (`dd/MM/yyyy`).
    pub fn from_directory(value: &str) -> ConnectorResult<Self> {
        NaiveDate::parse_from_str(value, DIRECTORY_DATE_FORMAT)
            .map(Self)
            .map_err(|_| ConnectorError::invalid_date(value, DIRECTORY_DATE_PATTERN))
    }

    pub fn to_wire(&self) -> String {
        self.0.format(WIRE_DATE_FORMAT).to_string()
    }

    pub fn to_directory(&self) -> String {
        self.0.format(DIRECTORY_DATE_FORMAT).to_string()
    }

    /// The day before `now`, in local time.
    pub fn yesterday<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let today = now.naive_local().date();
        Self(today.pred_opt().unwrap_or(NaiveDate::MIN))
    }

    /// Whether the start of this day (local midnight) is at or before `now`.
    pub fn has_started<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        self.0
            .and_hms_opt(0, 0, 0)
            .is_some_and(|midnight| midnight <= now.naive_local())
    }
}

impl fmt::Display for ContractDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_directory())
    }
}

/// Current local time, used for contract decisions.
pub fn now() -> DateTime<Local> {
    Local::now()
}
