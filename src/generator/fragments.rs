//! Code fragment buffers and the shared pin assignment map.

use crate::profile::PinType;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// The three fragment buffers of a generated sketch.
///
/// Each buffer maps a unique key to a piece of code. Inserting an existing
/// key overwrites the previous fragment, so re-emitting the same block is
/// idempotent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodeFragmentSet {
    /// Includes and global declarations.
    pub definitions: IndexMap<String, String>,
    /// Statements for `setup()`.
    pub setups: IndexMap<String, String>,
    /// Statements for `loop()`.
    pub body: IndexMap<String, String>,
}

impl CodeFragmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay `other` onto `self`, key by key.
    pub fn merge(&mut self, other: CodeFragmentSet) {
        self.definitions.extend(other.definitions);
        self.setups.extend(other.setups);
        self.body.extend(other.body);
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty() && self.setups.is_empty() && self.body.is_empty()
    }
}

/// A pin already claimed for a different peripheral type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinConflict {
    pub pin: String,
    pub existing: PinType,
}

impl fmt::Display for PinConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pin {} already used as {}.", self.pin, self.existing)
    }
}

impl std::error::Error for PinConflict {}

/// Which peripheral type each pin has been claimed for during a pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PinAssignment {
    pins: IndexMap<String, PinType>,
}

impl PinAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `pin` for `pin_type`.
    ///
    /// The first claim wins. Claiming a pin again for the same type is a
    /// no-op; claiming it for a different type leaves the map unchanged and
    /// reports the conflict.
    pub fn claim(&mut self, pin: &str, pin_type: PinType) -> Result<(), PinConflict> {
        match self.pins.get(pin) {
            None => {
                self.pins.insert(pin.to_string(), pin_type);
                Ok(())
            }
            Some(&existing) if existing == pin_type => Ok(()),
            Some(&existing) => Err(PinConflict {
                pin: pin.to_string(),
                existing,
            }),
        }
    }

    pub fn get(&self, pin: &str) -> Option<PinType> {
        self.pins.get(pin).copied()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, PinType)> {
        self.pins.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
