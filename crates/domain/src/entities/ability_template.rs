//! Ability slot templates - admin-defined shape of customizable loadouts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::AbilityTemplateId;

/// The fixed set of ability key bindings. Four slots, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyBinding {
    C,
    Q,
    E,
    X,
}

impl KeyBinding {
    /// All bindings in display order.
    pub const ALL: [KeyBinding; 4] = [KeyBinding::C, KeyBinding::Q, KeyBinding::E, KeyBinding::X];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::C => "C",
            Self::Q => "Q",
            Self::E => "E",
            Self::X => "X",
        }
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyBinding {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C" => Ok(Self::C),
            "Q" => Ok(Self::Q),
            "E" => Ok(Self::E),
            "X" => Ok(Self::X),
            other => Err(DomainError::UnknownKeyBinding(other.to_string())),
        }
    }
}

/// An admin-defined ability slot (e.g. "Signature [E]").
///
/// Templates define the shape of customizable slots independent of any
/// profile; a profile's Ability rows fill them in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityTemplate {
    pub id: AbilityTemplateId,
    pub name: String,
    pub key_binding: KeyBinding,
    pub icon_url: Option<String>,
}

impl AbilityTemplate {
    pub fn new(name: impl Into<String>, key_binding: KeyBinding) -> Self {
        Self {
            id: AbilityTemplateId::new(),
            name: name.into(),
            key_binding,
            icon_url: None,
        }
    }

    pub fn with_icon_url(mut self, url: impl Into<String>) -> Self {
        self.icon_url = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_binding_round_trips_through_str() {
        for key in KeyBinding::ALL {
            assert_eq!(key.as_str().parse::<KeyBinding>().unwrap(), key);
        }
    }

    #[test]
    fn unknown_key_binding_is_rejected() {
        assert!("Z".parse::<KeyBinding>().is_err());
        assert!("c".parse::<KeyBinding>().is_err());
    }

    #[test]
    fn key_binding_serializes_as_bare_letter() {
        let json = serde_json::to_string(&KeyBinding::Q).unwrap();
        assert_eq!(json, "\"Q\"");
        let parsed: KeyBinding = serde_json::from_str("\"X\"").unwrap();
        assert_eq!(parsed, KeyBinding::X);
    }
}
