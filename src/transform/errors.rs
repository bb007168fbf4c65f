use crate::types::DealTicket;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Malformed timestamp '{value}' on deal [{ticket}]: expected '<date> <time>'")]
    MalformedTimestamp {
        ticket: DealTicket,
        value: String
    },
    #[error("Schema mismatch: missing required column(s) {}", missing.join(", "))]
    SchemaMismatch {
        missing: Vec<String>
    },
    #[error("Amount overflow while summing deals dated {date}")]
    Overflow {
        date: NaiveDate
    }
}
