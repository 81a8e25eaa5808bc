//! One generation pass over a workspace.
//!
//! [`GenerationPass`] owns every piece of mutable state a pass needs (the pin
//! map, the fragment buffers and the block warnings). It is created for one
//! workspace traversal and consumed by [`GenerationPass::run`].

use super::expression::input_to_code;
use super::fragments::{CodeFragmentSet, PinAssignment, PinConflict};
use super::stepper::{StepperConfig, emit_configure, emit_step};
use crate::block::{EMPTY_INSTANCE_NAME, STEPPER_CONFIGURE, STEPPER_STEP, resolve_stepper_name};
use crate::model::{Block, Workspace};
use crate::profile::{BoardProfile, PinType};
use indexmap::IndexMap;
use log::{debug, info};
use serde::Serialize;

/// What raised a block warning. Each source is set and cleared on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSource {
    InstanceName,
    InvalidPin,
    PinConflict,
    MissingConfiguration,
}

/// Per-block warning texts, as displayed by the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Warnings {
    by_block: IndexMap<String, IndexMap<WarningSource, String>>,
}

impl Warnings {
    /// Set or clear one warning source of a block.
    pub fn set(&mut self, block_id: &str, source: WarningSource, text: Option<String>) {
        match text {
            Some(text) => {
                self.by_block
                    .entry(block_id.to_string())
                    .or_default()
                    .insert(source, text);
            }
            None => {
                if let Some(entries) = self.by_block.get_mut(block_id) {
                    entries.shift_remove(&source);
                    if entries.is_empty() {
                        self.by_block.shift_remove(block_id);
                    }
                }
            }
        }
    }

    pub fn get(&self, block_id: &str, source: WarningSource) -> Option<&str> {
        self.by_block
            .get(block_id)
            .and_then(|entries| entries.get(&source))
            .map(|s| s.as_str())
    }

    /// All warnings of a block joined into one text, or `None` if it has none.
    pub fn for_block(&self, block_id: &str) -> Option<String> {
        self.by_block
            .get(block_id)
            .map(|entries| entries.values().cloned().collect::<Vec<_>>().join(" "))
    }

    /// Ids of blocks that carry at least one warning.
    pub fn blocks(&self) -> impl Iterator<Item = &str> {
        self.by_block.keys().map(|k| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.by_block.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_block.len()
    }
}

/// Result of a generation pass.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub board: String,
    pub fragments: CodeFragmentSet,
    pub pins: PinAssignment,
    pub warnings: Warnings,
}

impl GenerationReport {
    /// Render the fragments as a complete sketch.
    pub fn sketch(&self) -> String {
        super::sketch::render_sketch(&self.fragments)
    }
}

/// State of a single generation pass.
pub struct GenerationPass {
    board: &'static BoardProfile,
    pins: PinAssignment,
    fragments: CodeFragmentSet,
    warnings: Warnings,
}

impl GenerationPass {
    pub fn new(board: &'static BoardProfile) -> Self {
        Self {
            board,
            pins: PinAssignment::new(),
            fragments: CodeFragmentSet::new(),
            warnings: Warnings::default(),
        }
    }

    /// Claim a pin before the pass starts, as another peripheral component
    /// sharing the pin map would.
    pub fn reserve_pin(&mut self, pin: &str, pin_type: PinType) -> Result<(), PinConflict> {
        self.pins.claim(pin, pin_type)
    }

    /// Generate code for every block of `workspace` in workspace order.
    pub fn run(mut self, workspace: &Workspace) -> GenerationReport {
        for top in &workspace.blocks {
            let mut current = Some(top);
            while let Some(block) = current {
                if block.disabled {
                    debug!("Skipping disabled block {} and its successors", block.id);
                    break;
                }
                self.visit(block);
                current = block.next.as_deref();
            }
        }
        info!(
            "Generated {} definitions, {} setup and {} loop fragments ({} blocks with warnings)",
            self.fragments.definitions.len(),
            self.fragments.setups.len(),
            self.fragments.body.len(),
            self.warnings.len()
        );
        GenerationReport {
            board: self.board.name.to_string(),
            fragments: self.fragments,
            pins: self.pins,
            warnings: self.warnings,
        }
    }

    fn visit(&mut self, block: &Block) {
        debug!("Visiting block {} ({})", block.id, block.block_type);
        match block.block_type.as_str() {
            STEPPER_CONFIGURE => self.stepper_configure(block),
            STEPPER_STEP => self.stepper_step(block),
            other => debug!("No generator for block type {}", other),
        }
    }

    /// Pin field value, defaulting to the board's first pin like a new
    /// dropdown does. Pins unknown to the board raise a warning.
    fn pin_field(&self, block: &Block, field: &str) -> (String, Option<String>) {
        let pin = block
            .field(field)
            .unwrap_or_else(|| self.board.default_pin())
            .to_string();
        let warning = (!self.board.is_digital_pin(&pin)).then(|| {
            format!("Pin {} is not a digital pin of the {}.", pin, self.board.display_name)
        });
        (pin, warning)
    }

    fn stepper_configure(&mut self, block: &Block) {
        let resolved = resolve_stepper_name(block);
        self.warnings.set(
            &block.id,
            WarningSource::InstanceName,
            resolved.warning.map(|w| w.to_string()),
        );
        // A connected name block without text still generates code.
        let instance_name = resolved.name.unwrap_or_default();

        let (pin1, pin1_warning) = self.pin_field(block, "STEPPER_PIN1");
        let (pin2, pin2_warning) = self.pin_field(block, "STEPPER_PIN2");
        let invalid_pins: Vec<String> = pin1_warning.into_iter().chain(pin2_warning).collect();
        self.warnings.set(
            &block.id,
            WarningSource::InvalidPin,
            (!invalid_pins.is_empty()).then(|| invalid_pins.join(" ")),
        );

        let config = StepperConfig {
            instance_name,
            pin1,
            pin2,
            steps: input_to_code(block, "STEPPER_STEPS"),
            speed: input_to_code(block, "STEPPER_SPEED"),
        };
        let output = emit_configure(&config, &mut self.pins);
        self.warnings
            .set(&block.id, WarningSource::PinConflict, output.warning);
        self.fragments.merge(output.fragments);
    }

    fn stepper_step(&mut self, block: &Block) {
        let instance = block
            .field("STEPPER_NAME")
            .filter(|name| !name.is_empty())
            .unwrap_or(EMPTY_INSTANCE_NAME);
        let steps = input_to_code(block, "STEPPER_STEPS");
        let output = emit_step(instance, steps.as_deref());
        self.warnings
            .set(&block.id, WarningSource::MissingConfiguration, output.warning);
        if !output.code.is_empty() {
            self.fragments
                .body
                .insert(block.id.clone(), format!("{};", output.code));
        }
    }
}

/// Run a pass on the default board.
pub fn generate(workspace: &Workspace) -> GenerationReport {
    GenerationPass::new(BoardProfile::default_board()).run(workspace)
}
