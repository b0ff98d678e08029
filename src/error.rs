use crate::calendar::MAX_PAGE_OFFSET;
use crate::picker::CalendarMode;
use thiserror::Error;

/// Errors raised by the calendar core in response to a caller's request
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CalendarError {
    #[error("no day is selected")]
    EmptyStore,
    #[error("{operation} is not supported in {mode} mode")]
    InvalidModeOperation {
        mode: CalendarMode,
        operation: &'static str,
    },
    #[error(
        "page offset {offset} is outside the supported window of ±{} months",
        MAX_PAGE_OFFSET
    )]
    OutOfRangePage { offset: i32 },
    #[error("reached the end of time")]
    OutOfTime,
    #[error("selected dates do not form a contiguous range")]
    NonContiguousRange,
}

/// Errors raised while assembling a picker from its configuration
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown calendar mode {0:?}")]
    UnknownMode(String),
    #[error("an initial selected date can only be given in {} mode", CalendarMode::OneDayPicker)]
    SelectionNotSupported { mode: CalendarMode },
    #[error("expected {expected} {what} names, got {got}")]
    LabelCount {
        what: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("invalid event day {value:?}: {reason}")]
    ParseEventDay { value: String, reason: String },
}
