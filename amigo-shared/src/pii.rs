use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wrapper for sensitive values (card numbers, passwords) that masks its
/// content in Debug and Display output while serializing transparently.
#[derive(Clone, Deserialize)]
pub struct Masked<T>(pub T);

impl<T> Masked<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Access the real value. Callers that log must not pass this to a format macro.
    pub fn reveal(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Masked<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T: fmt::Display> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: fmt::Display> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // The wire needs the real value (login bodies, payment forms). Masking
        // only applies to log macros like tracing::info!("{:?}", form).
        self.0.serialize(serializer)
    }
}
