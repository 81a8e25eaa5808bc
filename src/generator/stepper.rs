//! Code emitters for the Arduino `Stepper` library blocks.
//!
//! See <http://arduino.cc/en/Reference/Stepper>. A configuration block adds
//! the library include, a global `Stepper` object and a `setSpeed()` call to
//! `setup()`; a step block produces a `steps()` call on a configured object.

use super::fragments::{CodeFragmentSet, PinAssignment};
use crate::block::EMPTY_INSTANCE_NAME;
use crate::profile::PinType;

/// Definition key of the library include, shared by all stepper instances.
pub const DEFINE_KEY: &str = "define_stepper";
pub const INCLUDE: &str = "#include <Stepper.h>";

/// Steps per revolution used when the input is empty.
pub const DEFAULT_STEPS: &str = "360";
/// Speed used when the input is empty.
pub const DEFAULT_SPEED: &str = "90";

/// Warning for a step block without a configured instance.
pub const MISSING_CONFIGURATION_WARNING: &str =
    "A STEPPER configuration block has to be added in to be able to use this block!";

/// Inputs of a `stepper_configure` block after expression resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepperConfig {
    pub instance_name: String,
    pub pin1: String,
    pub pin2: String,
    /// Steps per revolution expression; `None` when the input is empty.
    pub steps: Option<String>,
    /// Speed expression; `None` when the input is empty.
    pub speed: Option<String>,
}

impl StepperConfig {
    pub fn new(instance_name: impl Into<String>, pin1: impl Into<String>, pin2: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
            pin1: pin1.into(),
            pin2: pin2.into(),
            steps: None,
            speed: None,
        }
    }

    pub fn with_steps(mut self, steps: impl Into<String>) -> Self {
        self.steps = Some(steps.into());
        self
    }

    pub fn with_speed(mut self, speed: impl Into<String>) -> Self {
        self.speed = Some(speed.into());
        self
    }

    pub fn global_key(&self) -> String {
        format!("global_stepper_{}", self.instance_name)
    }

    pub fn setup_key(&self) -> String {
        format!("setup_stepper_{}", self.instance_name)
    }
}

/// Empty expressions count as absent inputs.
fn non_empty(expr: Option<&str>) -> Option<&str> {
    expr.filter(|e| !e.trim().is_empty())
}

/// Fragments and pin warning produced by [`emit_configure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureOutput {
    pub fragments: CodeFragmentSet,
    /// Pin conflicts; `None` means the block's pin warning is cleared.
    pub warning: Option<String>,
}

/// Emit the include, global declaration and setup call for one stepper and
/// claim its pins.
///
/// Fragments are produced even when a pin conflict is found; the conflict
/// only becomes a warning.
pub fn emit_configure(config: &StepperConfig, pins: &mut PinAssignment) -> ConfigureOutput {
    let steps = non_empty(config.steps.as_deref()).unwrap_or(DEFAULT_STEPS);
    let speed = non_empty(config.speed.as_deref()).unwrap_or(DEFAULT_SPEED);
    let name = &config.instance_name;

    let mut fragments = CodeFragmentSet::new();
    fragments
        .definitions
        .insert(DEFINE_KEY.to_string(), INCLUDE.to_string());
    fragments.definitions.insert(
        config.global_key(),
        format!("Stepper {}({}, {}, {});", name, steps, config.pin1, config.pin2),
    );
    fragments
        .setups
        .insert(config.setup_key(), format!("{}.setSpeed({});", name, speed));

    let conflicts: Vec<String> = [&config.pin1, &config.pin2]
        .into_iter()
        .filter_map(|pin| pins.claim(pin, PinType::Stepper).err())
        .map(|c| c.to_string())
        .collect();
    let warning = if conflicts.is_empty() {
        None
    } else {
        Some(conflicts.join(" "))
    };

    ConfigureOutput { fragments, warning }
}

/// Expression and warning produced by [`emit_step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutput {
    /// The `steps()` call, without a trailing semicolon. Empty when no
    /// configuration exists.
    pub code: String,
    pub warning: Option<String>,
}

/// Emit `<instance>.steps(<steps>)`, or nothing if `instance` is the empty
/// name sentinel.
pub fn emit_step(instance: &str, steps: Option<&str>) -> StepOutput {
    if instance == EMPTY_INSTANCE_NAME {
        return StepOutput {
            code: String::new(),
            warning: Some(MISSING_CONFIGURATION_WARNING.to_string()),
        };
    }
    StepOutput {
        code: format!("{}.steps({})", instance, non_empty(steps).unwrap_or("0")),
        warning: None,
    }
}
