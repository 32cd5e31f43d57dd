use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::Error;
use crate::types::Chat;
use crate::Result;

/// Numeric chat id. Positive for private chats, negative for groups and
/// channels by Bot API convention (not enforced here).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A chat target: either a numeric id or an `@handle`.
///
/// Request builders embed the rendered text form wherever the API takes a
/// chat reference; on the wire it serializes as a bare JSON number (`Id`)
/// or JSON string (`Handle`).
///
/// Construction goes through the named constructors so that a bad input
/// fails at the call site instead of being silently coerced.
#[derive(Clone, Debug, Eq)]
pub enum ChatRef {
    Id(ChatId),
    Handle(String),
}

impl ChatRef {
    /// A reference by numeric id. Always valid.
    pub fn from_id(id: i64) -> Self {
        ChatRef::Id(ChatId(id))
    }

    /// A reference by `@handle`. The handle must start with `@` and be at
    /// least two characters long.
    pub fn from_handle(handle: impl Into<String>) -> Result<Self> {
        let handle = handle.into();
        if is_handle(&handle) {
            Ok(ChatRef::Handle(handle))
        } else {
            Err(Error::InvalidChatRef { raw: handle })
        }
    }

    /// Parse free-form text: an `@handle` stays a handle, anything else
    /// must parse as an integer id.
    pub fn from_text(text: &str) -> Result<Self> {
        if is_handle(text) {
            return Ok(ChatRef::Handle(text.to_string()));
        }
        text.parse::<i64>()
            .map(ChatRef::from_id)
            .map_err(|_| Error::InvalidChatRef {
                raw: text.to_string(),
            })
    }

    /// Reference a chat record, preferring its numeric id and falling back
    /// to its handle. Infallible; the remote API guarantees every chat has
    /// at least one of the two.
    pub fn from_chat(chat: &Chat) -> Self {
        if chat.id.0 != 0 {
            return ChatRef::Id(chat.id);
        }
        let username = chat.username.as_deref().unwrap_or_default();
        ChatRef::Handle(format!("@{username}"))
    }

    /// Canonical text form: the handle verbatim, or the decimal id. This
    /// is the form embedded in request fields that take a chat reference.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            ChatRef::Id(id) => Cow::Owned(id.0.to_string()),
            ChatRef::Handle(handle) => Cow::Borrowed(handle.as_str()),
        }
    }
}

fn is_handle(text: &str) -> bool {
    text.len() >= 2 && text.starts_with('@')
}

impl fmt::Display for ChatRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRef::Id(id) => write!(f, "{}", id.0),
            ChatRef::Handle(handle) => f.write_str(handle),
        }
    }
}

// Equality and hashing compare the rendered text form, matching the
// "stringable" contract of the wire format. Handles always start with `@`,
// so an id and a handle never actually render alike; still, the contract
// is the text, not the variant tag.
impl PartialEq for ChatRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ChatRef::Id(a), ChatRef::Id(b)) => a == b,
            (ChatRef::Handle(a), ChatRef::Handle(b)) => a == b,
            _ => self.as_text() == other.as_text(),
        }
    }
}

impl Hash for ChatRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_text().hash(state);
    }
}

impl From<i64> for ChatRef {
    fn from(id: i64) -> Self {
        ChatRef::from_id(id)
    }
}

impl From<i32> for ChatRef {
    fn from(id: i32) -> Self {
        ChatRef::from_id(i64::from(id))
    }
}

impl From<ChatId> for ChatRef {
    fn from(id: ChatId) -> Self {
        ChatRef::Id(id)
    }
}

impl FromStr for ChatRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ChatRef::from_text(s)
    }
}

impl Serialize for ChatRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ChatRef::Id(id) => serializer.serialize_i64(id.0),
            ChatRef::Handle(handle) => serializer.serialize_str(handle),
        }
    }
}

impl<'de> Deserialize<'de> for ChatRef {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        struct ChatRefVisitor;

        impl<'de> Visitor<'de> for ChatRefVisitor {
            type Value = ChatRef;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer chat id or an @handle string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<ChatRef, E> {
                Ok(ChatRef::from_id(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<ChatRef, E> {
                i64::try_from(v)
                    .map(ChatRef::from_id)
                    .map_err(|_| E::custom(format!("chat id {v} out of range")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<ChatRef, E> {
                ChatRef::from_text(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(ChatRefVisitor)
    }
}
