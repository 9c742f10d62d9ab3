use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Caller-supplied room identifier. Any non-empty string is valid; inbound
/// messages carry the raw string and the server parses it at the edge.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct RoomId(String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("room id must be a non-empty string")]
pub struct InvalidRoomId;

impl RoomId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RoomId {
    type Err = InvalidRoomId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(InvalidRoomId);
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
