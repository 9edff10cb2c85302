//! Closed tag sets. Anything outside a set is rejected both by serde and by
//! `FromStr`; there is no catch-all variant.

use crate::core::errors::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! closed_tag {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(ModelError::UnknownTag {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

closed_tag!(
    /// Payload kind of a direct message.
    MessageType, "message type" {
        Text => "text",
        Image => "image",
        File => "file",
    }
);

closed_tag!(
    NotificationType, "notification type" {
        Like => "like",
        Comment => "comment",
        Follow => "follow",
        Mention => "mention",
        Message => "message",
    }
);

closed_tag!(
    /// Which records a search targets.
    SearchScope, "search scope" {
        Users => "users",
        Posts => "posts",
        All => "all",
    }
);

closed_tag!(
    SortOrder, "sort order" {
        Recent => "recent",
        Popular => "popular",
        Relevance => "relevance",
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_exact_and_case_sensitive() {
        assert_eq!("image".parse::<MessageType>().unwrap(), MessageType::Image);
        assert!("Image".parse::<MessageType>().is_err());
        assert!(" text".parse::<MessageType>().is_err());
    }

    #[test]
    fn display_matches_wire_name() {
        for tag in NotificationType::ALL {
            assert_eq!(tag.to_string().parse::<NotificationType>().unwrap(), *tag);
        }
        assert_eq!(SortOrder::Relevance.to_string(), "relevance");
    }

    #[test]
    fn unknown_tag_names_kind_and_value() {
        let err = "everything".parse::<SearchScope>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown search scope tag: \"everything\"");
    }
}
