use stepperblocks::block::EMPTY_INSTANCE_NAME;
use stepperblocks::generator::stepper::{DEFINE_KEY, MISSING_CONFIGURATION_WARNING};
use stepperblocks::generator::{PinAssignment, StepperConfig, emit_configure, emit_step};
use stepperblocks::profile::PinType;

#[test]
fn configure_emits_three_fragments() {
    let mut pins = PinAssignment::new();
    let config = StepperConfig::new("left", "8", "9").with_steps("200").with_speed("60");
    let out = emit_configure(&config, &mut pins);

    assert_eq!(out.warning, None);
    let defs = &out.fragments.definitions;
    assert_eq!(defs.get(DEFINE_KEY).map(|s| s.as_str()), Some("#include <Stepper.h>"));
    assert_eq!(
        defs.get("global_stepper_left").map(|s| s.as_str()),
        Some("Stepper left(200, 8, 9);")
    );
    assert_eq!(
        out.fragments.setups.get("setup_stepper_left").map(|s| s.as_str()),
        Some("left.setSpeed(60);")
    );
    assert!(out.fragments.body.is_empty());
    assert_eq!(pins.get("8"), Some(PinType::Stepper));
    assert_eq!(pins.get("9"), Some(PinType::Stepper));
}

#[test]
fn defaults_for_absent_inputs() {
    let mut pins = PinAssignment::new();
    let out = emit_configure(&StepperConfig::new("m", "2", "3"), &mut pins);
    assert_eq!(out.fragments.definitions["global_stepper_m"], "Stepper m(360, 2, 3);");
    assert_eq!(out.fragments.setups["setup_stepper_m"], "m.setSpeed(90);");
}

#[test]
fn reemission_is_idempotent() {
    let mut pins = PinAssignment::new();
    let config = StepperConfig::new("left", "8", "9").with_steps("100");
    let first = emit_configure(&config, &mut pins);
    let second = emit_configure(&config, &mut pins);
    assert_eq!(first, second);
    assert_eq!(second.warning, None);
    assert_eq!(pins.len(), 2);
}

#[test]
fn conflicts_are_reported_without_overwriting() {
    let mut pins = PinAssignment::new();
    pins.claim("8", PinType::Servo).expect("free pin");
    pins.claim("9", PinType::Pwm).expect("free pin");

    let out = emit_configure(&StepperConfig::new("left", "8", "9"), &mut pins);
    assert_eq!(
        out.warning.as_deref(),
        Some("Pin 8 already used as SERVO. Pin 9 already used as PWM.")
    );
    assert_eq!(pins.get("8"), Some(PinType::Servo));
    assert_eq!(pins.get("9"), Some(PinType::Pwm));
    // Code is still generated.
    assert!(out.fragments.definitions.contains_key("global_stepper_left"));
}

#[test]
fn one_conflicting_pin_still_claims_the_other() {
    let mut pins = PinAssignment::new();
    pins.claim("8", PinType::Servo).expect("free pin");
    let out = emit_configure(&StepperConfig::new("left", "8", "9"), &mut pins);
    assert_eq!(out.warning.as_deref(), Some("Pin 8 already used as SERVO."));
    assert_eq!(pins.get("9"), Some(PinType::Stepper));
}

#[test]
fn sentinel_name_still_emits() {
    let mut pins = PinAssignment::new();
    let out = emit_configure(&StepperConfig::new(EMPTY_INSTANCE_NAME, "4", "5"), &mut pins);
    assert_eq!(
        out.fragments.definitions["global_stepper_Empty_input_name"],
        "Stepper Empty_input_name(360, 4, 5);"
    );
}

#[test]
fn step_expression() {
    let out = emit_step("left", Some("100"));
    assert_eq!(out.code, "left.steps(100)");
    assert_eq!(out.warning, None);
    assert_eq!(emit_step("left", None).code, "left.steps(0)");
}

#[test]
fn step_on_sentinel_emits_nothing() {
    let out = emit_step(EMPTY_INSTANCE_NAME, Some("100"));
    assert!(out.code.is_empty());
    assert!(!out.code.contains(".steps("));
    assert_eq!(out.warning.as_deref(), Some(MISSING_CONFIGURATION_WARNING));
}

#[test]
fn empty_expressions_fall_back_to_defaults() {
    let mut pins = PinAssignment::new();
    let config = StepperConfig::new("m", "8", "9").with_steps("").with_speed("  ");
    let out = emit_configure(&config, &mut pins);
    assert_eq!(out.fragments.definitions["global_stepper_m"], "Stepper m(360, 8, 9);");
    assert_eq!(out.fragments.setups["setup_stepper_m"], "m.setSpeed(90);");
    assert_eq!(emit_step("m", Some("")).code, "m.steps(0)");
}
