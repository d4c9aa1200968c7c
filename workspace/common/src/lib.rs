//! Source-side types shared by the upsert engine and the CLI.
//! Everything here is free of database concerns: decoding the member export,
//! normalizing card numbers and deciding whether a record may be synchronized.

pub mod reader;
pub mod record;
pub mod username;
pub mod validation;

pub use reader::{SourceError, decode_ascii, parse_records, read_records};
pub use record::MemberRecord;
pub use username::{USERNAME_WIDTH, Username, UsernameError};
pub use validation::{Rejection, ValidatedMember, Validation, parse_member_date, validate, validate_all};
