//! UI-agnostic dropdown fields.
//!
//! A [`Dropdown`] does not know where its options come from; it holds an
//! [`OptionsProvider`] and asks it again every time it is opened.
//! [`InstanceSelector`] lists configured stepper instances and
//! [`PinSelector`] lists the digital pins of a board.

use crate::block::BlockGraph;
use crate::profile::BoardProfile;
use crate::registry::list_instances;
use serde::Serialize;
use std::cmp::Ordering;

/// One selectable entry of a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    /// Text shown to the user.
    pub label: String,
    /// Value stored in the block field.
    pub value: String,
}

impl DropdownOption {
    /// An option whose label and value are the same string.
    pub fn same(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            label: text.clone(),
            value: text,
        }
    }
}

/// Source of dropdown options.
pub trait OptionsProvider {
    fn options(&self) -> Vec<DropdownOption>;
}

/// Case-insensitive ordering, ties broken by the exact text so the sort
/// is deterministic.
fn case_insensitive_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Lists the stepper instances currently configured in a workspace.
///
/// Nothing is cached: renaming an instance elsewhere in the workspace shows up
/// the next time the options are requested.
pub struct InstanceSelector<'w, G: BlockGraph> {
    workspace: &'w G,
}

impl<'w, G: BlockGraph> InstanceSelector<'w, G> {
    pub fn new(workspace: &'w G) -> Self {
        Self { workspace }
    }
}

impl<G: BlockGraph> OptionsProvider for InstanceSelector<'_, G> {
    fn options(&self) -> Vec<DropdownOption> {
        let mut names = list_instances(self.workspace.all_blocks());
        names.sort_by(|a, b| case_insensitive_cmp(a, b));
        names.into_iter().map(DropdownOption::same).collect()
    }
}

/// Lists the digital pins of a board profile.
pub struct PinSelector {
    board: &'static BoardProfile,
}

impl PinSelector {
    pub fn new(board: &'static BoardProfile) -> Self {
        Self { board }
    }
}

impl OptionsProvider for PinSelector {
    fn options(&self) -> Vec<DropdownOption> {
        self.board.digital.iter().map(DropdownOption::same).collect()
    }
}

/// Text shown by a dropdown with no options.
pub const NO_OPTIONS_PLACEHOLDER: &str = "<none>";

/// A dropdown field backed by an [`OptionsProvider`].
pub struct Dropdown<'a> {
    provider: Box<dyn OptionsProvider + 'a>,
    selected: Option<String>,
}

impl<'a> Dropdown<'a> {
    pub fn new(provider: impl OptionsProvider + 'a) -> Self {
        Self {
            provider: Box::new(provider),
            selected: None,
        }
    }

    /// Current options, re-queried from the provider.
    pub fn open(&self) -> Vec<DropdownOption> {
        self.provider.options()
    }

    /// A dropdown without options is rendered disabled.
    pub fn is_enabled(&self) -> bool {
        !self.open().is_empty()
    }

    /// Select `value` if it is one of the current options.
    pub fn select(&mut self, value: &str) -> bool {
        if self.open().iter().any(|o| o.value == value) {
            self.selected = Some(value.to_string());
            true
        } else {
            false
        }
    }

    /// The stored value, falling back to the first option like a freshly
    /// created field does.
    pub fn value(&self) -> Option<String> {
        self.selected
            .clone()
            .or_else(|| self.open().into_iter().next().map(|o| o.value))
    }

    /// Label to render: the selected option's label, or a placeholder.
    pub fn display_text(&self) -> String {
        let options = self.open();
        let current = self.selected.as_deref().or(options.first().map(|o| o.value.as_str()));
        current
            .and_then(|v| options.iter().find(|o| o.value == v))
            .map(|o| o.label.clone())
            .or_else(|| self.selected.clone())
            .unwrap_or_else(|| NO_OPTIONS_PLACEHOLDER.to_string())
    }
}
