//! Newtype identifiers.
//!
//! Identifiers are assigned by the backend and are opaque to the client. Each
//! one gets its own newtype so a [`ReportId`] cannot be passed where a
//! [`FileId`] is expected, even though both are strings on the wire.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// Identifies a report stored by the backend (e.g. `"rpt_1a2b3c4d"`).
    ///
    /// The value is used verbatim as a URL path segment after percent-encoding,
    /// so it may contain characters such as `/`.
    ReportId
}

string_id! {
    /// Identifies an uploaded file after the backend has saved and parsed it.
    FileId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_identifier_is_rejected() {
        assert!(ReportId::new("").is_none());
        assert!(FileId::new(String::new()).is_none());
    }

    #[test]
    fn identifier_serialises_as_bare_string() {
        let id = ReportId::new("rpt_1a2b3c4d").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"rpt_1a2b3c4d\"");

        let back: ReportId = serde_json::from_str("\"rpt_1a2b3c4d\"").unwrap();
        assert_eq!(back, id);
        assert_eq!(back.to_string(), "rpt_1a2b3c4d");
    }
}
