use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random id
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// The underlying UUID
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(
    /// Identity of a placed element, stable for its lifetime
    ElementId
);
define_id!(
    /// Identity of a saved map
    MapId
);
define_id!(
    /// Identity of a note
    NoteId
);
define_id!(
    /// Identity of a color history entry
    ColorId
);
define_id!(
    /// Identity of a preferences row
    PreferencesId
);
define_id!(
    /// Identity of the owning user
    UserId
);

impl UserId {
    /// The owner used when no account is signed in.
    pub fn guest() -> Self {
        Self(Uuid::nil())
    }

    /// Whether this is the guest owner.
    pub fn is_guest(&self) -> bool {
        self.0.is_nil()
    }
}
