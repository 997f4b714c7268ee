use std::{error, fmt, io, result};

#[derive(Debug)]
pub enum ErrorKind {
    /// The caller passed an argument that can never be processed, like an empty address list.
    InvalidArgument,
    /// A recipient address was rejected by validation.
    InvalidAddress,
    /// Failed to build a sendable message.
    InvalidMessage,
    Io(io::Error),
    /// One of the built-in patterns failed to compile.
    Regex(regex::Error),
    #[cfg(feature = "json")]
    /// Failed to serialize the given data to JSON.
    SerializeJSON(serde_json::Error),
}

#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    pub fn new<S: Into<String>>(kind: ErrorKind, msg: S) -> Self {
        Self {
            message: msg.into(),
            kind,
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Io(e) => Some(e),
            ErrorKind::Regex(e) => Some(e),
            #[cfg(feature = "json")]
            ErrorKind::SerializeJSON(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(io_error: io::Error) -> Self {
        Error::new(ErrorKind::Io(io_error), "Error with io")
    }
}

impl From<regex::Error> for Error {
    fn from(regex_error: regex::Error) -> Self {
        Error::new(
            ErrorKind::Regex(regex_error),
            "Failed to compile address list pattern",
        )
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for Error {
    fn from(json_error: serde_json::Error) -> Self {
        Error::new(
            ErrorKind::SerializeJSON(json_error),
            "Failed to serialize data to JSON",
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

macro_rules! err {
    ($kind:expr, $($arg:tt)*) => {{
        use crate::error::Error;

        let kind = $kind;
        let message = format!($($arg)*);
        return Err(Error::new( kind, message ));
    }};
}

pub(crate) use err;

pub type Result<T> = result::Result<T, Error>;
