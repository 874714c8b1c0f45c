use thiserror::Error;

pub type Result<T> = std::result::Result<T, WheelError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WheelError {
    #[error("wheel has no sectors to land on")]
    NoSectors,
    #[error("spin ticket {ticket} does not match the spin in flight ({pending:?})")]
    StaleTicket { ticket: u64, pending: Option<u64> },
    #[error("invalid wheel options: {0}")]
    InvalidOptions(String),
}
