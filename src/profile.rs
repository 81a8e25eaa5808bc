//! Arduino board profiles and peripheral pin types.
//!
//! A [`BoardProfile`] lists the digital pins offered by the pin dropdowns of
//! configuration blocks. [`PinType`] is the tag stored in the pin assignment
//! map; every component sharing that map must use the same tags.

use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Peripheral role a pin has been claimed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PinType {
    Input,
    Output,
    Pwm,
    Servo,
    Stepper,
    Serial,
    I2c,
    Spi,
}

impl PinType {
    pub fn as_str(self) -> &'static str {
        match self {
            PinType::Input => "INPUT",
            PinType::Output => "OUTPUT",
            PinType::Pwm => "PWM",
            PinType::Servo => "SERVO",
            PinType::Stepper => "STEPPER",
            PinType::Serial => "SERIAL",
            PinType::I2c => "I2C",
            PinType::Spi => "SPI",
        }
    }
}

impl fmt::Display for PinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PinType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INPUT" => Ok(PinType::Input),
            "OUTPUT" => Ok(PinType::Output),
            "PWM" => Ok(PinType::Pwm),
            "SERVO" => Ok(PinType::Servo),
            "STEPPER" => Ok(PinType::Stepper),
            "SERIAL" => Ok(PinType::Serial),
            "I2C" => Ok(PinType::I2c),
            "SPI" => Ok(PinType::Spi),
            other => Err(anyhow!("Unknown pin type: {}", other)),
        }
    }
}

/// Parse a `PIN=TYPE` pin reservation such as `3=SERVO`.
pub fn parse_pin_reservation(s: &str) -> Result<(String, PinType)> {
    let (pin, pin_type) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected PIN=TYPE, got {}", s))?;
    let pin = pin.trim();
    if pin.is_empty() {
        return Err(anyhow!("Empty pin in {}", s));
    }
    Ok((pin.to_string(), pin_type.parse()?))
}

/// Pin layout of one Arduino board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardProfile {
    /// Lookup name (e.g. "uno").
    pub name: &'static str,
    /// Human-readable board name.
    pub display_name: &'static str,
    /// Digital pin identifiers in dropdown order.
    pub digital: Vec<String>,
}

impl BoardProfile {
    fn new(name: &'static str, display_name: &'static str, digital: u32, analog: u32) -> Self {
        let digital = (0..digital)
            .map(|n| n.to_string())
            .chain((0..analog).map(|n| format!("A{}", n)))
            .collect();
        Self {
            name,
            display_name,
            digital,
        }
    }

    pub fn is_digital_pin(&self, pin: &str) -> bool {
        self.digital.iter().any(|p| p == pin)
    }

    /// The pin a freshly created pin dropdown starts with.
    pub fn default_pin(&self) -> &str {
        self.digital.first().map(|s| s.as_str()).unwrap_or("0")
    }

    /// Find a board profile by name, ignoring case.
    pub fn find(name: &str) -> Option<&'static BoardProfile> {
        BOARDS.iter().find(|b| b.name.eq_ignore_ascii_case(name))
    }

    /// The default board (Arduino Uno).
    pub fn default_board() -> &'static BoardProfile {
        &BOARDS[0]
    }

    /// All known board profiles.
    pub fn all() -> &'static [BoardProfile] {
        &BOARDS
    }
}

static BOARDS: Lazy<Vec<BoardProfile>> = Lazy::new(|| {
    vec![
        BoardProfile::new("uno", "Arduino Uno", 14, 6),
        BoardProfile::new("leonardo", "Arduino Leonardo", 14, 6),
        BoardProfile::new("mega", "Arduino Mega 2560", 54, 16),
    ]
});
