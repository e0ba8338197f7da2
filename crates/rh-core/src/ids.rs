//! Opaque identifier newtypes.
//!
//! The remote API hands out numeric workspace ids and free-form paper ids.
//! Both are normalized to strings at the client boundary so the rest of the
//! system never depends on the server's representation.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Server-assigned workspace identifier.
    WorkspaceId
);

string_id!(
    /// Paper identifier. A search-result id is not guaranteed to survive
    /// import; membership ids are whatever the workspace list reports.
    PaperId
);

string_id!(
    /// Client-assigned document identifier (creation time in millis).
    DocumentId
);

impl From<i64> for WorkspaceId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}
