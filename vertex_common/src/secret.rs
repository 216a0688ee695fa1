use std::{
    fmt,
    fmt::{Debug, Display},
};

/// A credential string (the bot token, or a URL embedding it) that must never reach the logs.
/// `Debug` and `Display` both render `****`; call [`Secret::reveal`] to get at the value.
#[derive(Clone, Default)]
pub struct Secret {
    value: String,
}

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }

    pub fn reveal(&self) -> &str {
        &self.value
    }

    /// An empty secret means "not configured", which callers treat as a valid state.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self { value }
    }
}

impl Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

impl Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}
