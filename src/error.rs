use std::{fmt, sync::Arc};

#[derive(Debug, Clone)]
pub enum Error {
    /// A required argument was not passed to a WebRTC operation.
    MissingArgument {
        operation: &'static str,
        interface: &'static str,
    },
    HandleNotFound(usize),
    Unsupported(String),
    /// Failure reported by the host engine. Shared so that every waiter of a
    /// memoized operation sees the same error.
    Engine(Arc<anyhow::Error>),
}

impl Error {
    pub fn missing_argument(operation: &'static str, interface: &'static str) -> Self {
        Error::MissingArgument {
            operation,
            interface,
        }
    }

    pub fn handle_not_found(handle: usize) -> Self {
        Error::HandleNotFound(handle)
    }

    pub fn unsupported<T>(t: T) -> Self
    where
        T: ToString,
    {
        Error::Unsupported(t.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingArgument {
                operation,
                interface,
            } => write!(
                f,
                "Failed to execute '{operation}' on '{interface}': 1 argument required, but only 0 present."
            ),
            Error::HandleNotFound(handle) => write!(f, "transceiver {handle} not found"),
            Error::Unsupported(operation) => {
                write!(f, "{operation} is not supported by the engine")
            }
            Error::Engine(err) => write!(f, "{err}"),
        }
    }
}

impl<E> From<E> for Error
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Error::Engine(Arc::new(err.into()))
    }
}
