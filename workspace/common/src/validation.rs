//! Per-record validation.
//!
//! A record is turned into a [`Validation`] before anything touches the
//! database. Rejected records are logged by the caller and skipped.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{trace, warn};

use crate::record::MemberRecord;
use crate::username::{Username, UsernameError};

/// Mandatory fields, in the order they are checked.
pub const CARD_NO: &str = "CardNo";
pub const ACC_START_DATE: &str = "acc_startdate";
pub const ACC_END_DATE: &str = "acc_enddate";

/// Why a record was skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("the record of {record} was not saved because the field '{field}' is empty")]
    MissingField { record: String, field: &'static str },

    #[error("the record of {record} was not saved: {source}")]
    InvalidIdentifier {
        record: String,
        #[source]
        source: UsernameError,
    },

    #[error("the record of {record} was not saved because '{field}' is not a date: '{value}'")]
    InvalidDate {
        record: String,
        field: &'static str,
        value: String,
    },
}

/// A record that passed validation, with every field the upsert needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMember {
    /// Card number as it appeared in the export; the password is derived from it.
    pub card_no: String,
    pub username: Username,
    pub full_name: String,
    pub email: String,
    pub address: String,
    pub birthdate: Option<NaiveDate>,
    pub membership_start: NaiveDate,
    pub membership_end: NaiveDate,
    pub external_user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid(ValidatedMember),
    Rejected(Rejection),
}

impl Validation {
    pub fn as_valid(&self) -> Option<&ValidatedMember> {
        match self {
            Validation::Valid(member) => Some(member),
            Validation::Rejected(_) => None,
        }
    }
}

/// Parses the leading calendar date of an export date. Time parts such as
/// `" 00:00:00"` or `"T08:30:00Z"` are ignored.
pub fn parse_member_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let head = value.get(..10)?;

    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(head, "%Y/%m/%d"))
        .ok()
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

pub fn validate(record: &MemberRecord) -> Validation {
    trace!("Validating record {:?}", record.card_no);

    let Some(card_no) = present(&record.card_no) else {
        return missing(record, CARD_NO);
    };
    let Some(start) = present(&record.acc_startdate) else {
        return missing(record, ACC_START_DATE);
    };
    let Some(end) = present(&record.acc_enddate) else {
        return missing(record, ACC_END_DATE);
    };

    let username = match Username::parse(card_no) {
        Ok(username) => username,
        Err(source) => {
            return Validation::Rejected(Rejection::InvalidIdentifier {
                record: record.label(),
                source,
            });
        }
    };

    let Some(membership_start) = parse_member_date(start) else {
        return invalid_date(record, ACC_START_DATE, start);
    };
    let Some(membership_end) = parse_member_date(end) else {
        return invalid_date(record, ACC_END_DATE, end);
    };

    let birthdate = present(&record.birthday).and_then(|raw| {
        let parsed = parse_member_date(raw);
        if parsed.is_none() {
            warn!("Ignoring unparseable BIRTHDAY '{}' for {}", raw, record.label());
        }
        parsed
    });

    let full_name = format!(
        "{} {}",
        record.name.as_deref().unwrap_or_default(),
        record.lastname.as_deref().unwrap_or_default()
    )
    .trim()
    .to_string();

    Validation::Valid(ValidatedMember {
        card_no: card_no.to_string(),
        username,
        full_name,
        email: record.email.clone().unwrap_or_default(),
        address: record.street.clone().unwrap_or_default(),
        birthdate,
        membership_start,
        membership_end,
        external_user_id: present(&record.user_id).map(str::to_string),
    })
}

pub fn validate_all(records: &[MemberRecord]) -> Vec<Validation> {
    records.iter().map(validate).collect()
}

fn missing(record: &MemberRecord, field: &'static str) -> Validation {
    Validation::Rejected(Rejection::MissingField {
        record: record.label(),
        field,
    })
}

fn invalid_date(record: &MemberRecord, field: &'static str, value: &str) -> Validation {
    Validation::Rejected(Rejection::InvalidDate {
        record: record.label(),
        field,
        value: value.to_string(),
    })
}
