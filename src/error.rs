//! Process-level error type.
//!
//! Every failure carries the exit code the binary should terminate with:
//!
//! - 2: invalid input (bad flags, malformed CSV, empty candidate set)
//! - 3: no usable data after ingest
//! - 4: lookup failure (x absent from a curve's domain)

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Malformed or unusable caller input (exit code 2).
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// A source that parsed cleanly but contained nothing to work on (exit code 3).
    pub fn empty_data(message: impl Into<String>) -> Self {
        Self::new(3, message)
    }

    /// An x-value absent from a curve's domain (exit code 4).
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
