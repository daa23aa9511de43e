use std::fmt;

use serde::Serialize;

use crate::wire::{self, PREFIX, SEPARATOR};
use crate::{CanonicalIdentity, Source};

/// The request body sent to the daemon: `TTE:<Source>:<identity>:`.
///
/// The identity is written as-is; separators inside it are not escaped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Message(String);

impl Message {
    pub fn compose(source: Source, identity: &CanonicalIdentity) -> Self {
        let source = source.as_str();
        let mut body = String::with_capacity(PREFIX.len() + source.len() + identity.len() + 3);
        body.push_str(PREFIX);
        body.push(SEPARATOR);
        body.push_str(source);
        body.push(SEPARATOR);
        body.push_str(identity);
        body.push(SEPARATOR);
        Self(body)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Whether the daemon will split this body back into the same source and
    /// identity. False when the identity itself contains a separator.
    pub fn is_unambiguous(&self) -> bool {
        wire::parse(&self.0).is_some()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Message> for String {
    fn from(message: Message) -> Self {
        message.0
    }
}
