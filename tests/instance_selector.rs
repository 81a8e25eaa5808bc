use stepperblocks::field::{Dropdown, DropdownOption, InstanceSelector, NO_OPTIONS_PLACEHOLDER, OptionsProvider, PinSelector};
use stepperblocks::model::{Block, Workspace};
use stepperblocks::profile::BoardProfile;

fn configure(id: &str, name: &str) -> Block {
    Block::new(id, "stepper_configure")
        .with_input("STEPPER_NAME", Block::new(format!("{}_name", id), "text").with_field("TEXT", name))
}

#[test]
fn options_are_sorted_case_insensitively() {
    let ws = Workspace::new(vec![
        configure("a", "zeta"),
        configure("b", "Alpha"),
        configure("c", "beta"),
    ]);
    let options = InstanceSelector::new(&ws).options();
    let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["Alpha", "beta", "zeta"]);
    assert!(options.iter().all(|o| o.label == o.value));
}

#[test]
fn empty_workspace_disables_dropdown() {
    let ws = Workspace::default();
    assert!(InstanceSelector::new(&ws).options().is_empty());
    let dropdown = Dropdown::new(InstanceSelector::new(&ws));
    assert!(!dropdown.is_enabled());
    assert_eq!(dropdown.value(), None);
    assert_eq!(dropdown.display_text(), NO_OPTIONS_PLACEHOLDER);
}

#[test]
fn options_are_requeried_after_rename() {
    let mut ws = Workspace::new(vec![configure("a", "left")]);
    assert_eq!(InstanceSelector::new(&ws).options(), vec![DropdownOption::same("left")]);

    ws.blocks[0]
        .inputs
        .get_mut("STEPPER_NAME")
        .expect("name input")
        .fields
        .insert("TEXT".into(), "port".into());
    assert_eq!(InstanceSelector::new(&ws).options(), vec![DropdownOption::same("port")]);
}

#[test]
fn dropdown_selection_and_default() {
    let ws = Workspace::new(vec![configure("a", "right"), configure("b", "left")]);
    let mut dropdown = Dropdown::new(InstanceSelector::new(&ws));
    assert!(dropdown.is_enabled());
    assert_eq!(dropdown.value().as_deref(), Some("left"));
    assert!(!dropdown.select("middle"));
    assert!(dropdown.select("right"));
    assert_eq!(dropdown.value().as_deref(), Some("right"));
    assert_eq!(dropdown.display_text(), "right");
}

#[test]
fn pin_selector_lists_board_pins() {
    let mega = BoardProfile::find("mega").expect("mega profile");
    let options = PinSelector::new(mega).options();
    assert_eq!(options.len(), 70);
    assert_eq!(options[0], DropdownOption::same("0"));
    assert_eq!(options.last(), Some(&DropdownOption::same("A15")));
}
