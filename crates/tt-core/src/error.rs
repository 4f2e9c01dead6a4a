use thiserror::Error;

pub type TtResult<T> = Result<T, TtError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TtError {
    #[error("Invalid range for {what}: [{start}, {end}] with {count} points")]
    InvalidRange {
        what: &'static str,
        start: f64,
        end: f64,
        count: usize,
    },
}
