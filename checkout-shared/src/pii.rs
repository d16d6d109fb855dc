use serde::{Serialize, Serializer};
use std::fmt;

const MASK: &str = "********";
const EMPTY: &str = "<empty>";

/// Wraps a sensitive value (payment method, card token) so it never reaches
/// log output or audit payloads in clear text.
///
/// Blank values render as `<empty>` instead of the mask, so a missing payment
/// method is still visible when diagnosing a declined submission.
#[derive(Clone, PartialEq, Eq)]
pub struct Masked<T>(pub T);

impl<T: fmt::Display> Masked<T> {
    fn rendered(&self) -> &'static str {
        if self.0.to_string().trim().is_empty() {
            EMPTY
        } else {
            MASK
        }
    }
}

impl<T: fmt::Display> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rendered())
    }
}

impl<T: fmt::Display> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rendered())
    }
}

impl<T: fmt::Display> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.rendered())
    }
}

impl<T> Masked<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}
