//! Block capabilities used by the registry and the code generator.
//!
//! Host blocks are reached through [`BlockNode`]. Blocks that configure a
//! named peripheral instance additionally expose [`NameDeclaring`], which the
//! registry discovers through [`BlockNode::as_name_declaring`].

use crate::model::{Block, Workspace};

/// Block type of the stepper configuration block.
pub const STEPPER_CONFIGURE: &str = "stepper_configure";
/// Block type of the stepper `steps()` block.
pub const STEPPER_STEP: &str = "stepper_step";

/// Instance name used when a configuration block has no name input connected.
pub const EMPTY_INSTANCE_NAME: &str = "Empty_input_name";

/// Warning attached to a configuration block without a name input.
pub const MISSING_NAME_WARNING: &str =
    "A STEPPER configuration block needs to have a name to set the motor steps!";

/// A node of the host's block graph.
pub trait BlockNode {
    fn id(&self) -> &str;
    fn block_type(&self) -> &str;
    fn field_value(&self, name: &str) -> Option<&str>;

    /// Returns the name-declaring capability if this block has one.
    fn as_name_declaring(&self) -> Option<&dyn NameDeclaring> {
        None
    }
}

/// Capability of blocks that declare peripheral instance names.
pub trait NameDeclaring {
    /// The declared instance names. `None` entries come from half-built blocks.
    fn declared_instances(&self) -> Vec<Option<String>>;
}

/// A live collection of blocks, queried on every dropdown refresh.
pub trait BlockGraph {
    type Node: BlockNode;

    fn all_blocks(&self) -> Vec<&Self::Node>;
}

/// Outcome of resolving the instance name of a configuration block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    /// The instance name; `None` while the connected name block has no text.
    pub name: Option<String>,
    /// Block-level warning, `None` clears it.
    pub warning: Option<&'static str>,
}

/// Resolve the instance name of a `stepper_configure` block from the block
/// connected to its `STEPPER_NAME` input.
pub fn resolve_stepper_name(block: &Block) -> ResolvedName {
    match block.input_target("STEPPER_NAME") {
        None => ResolvedName {
            name: Some(EMPTY_INSTANCE_NAME.to_string()),
            warning: Some(MISSING_NAME_WARNING),
        },
        Some(target) => ResolvedName {
            name: target.field("TEXT").map(|s| s.to_string()),
            warning: None,
        },
    }
}

impl BlockNode for Block {
    fn id(&self) -> &str {
        &self.id
    }

    fn block_type(&self) -> &str {
        &self.block_type
    }

    fn field_value(&self, name: &str) -> Option<&str> {
        self.field(name)
    }

    fn as_name_declaring(&self) -> Option<&dyn NameDeclaring> {
        if self.block_type == STEPPER_CONFIGURE {
            Some(self)
        } else {
            None
        }
    }
}

impl NameDeclaring for Block {
    fn declared_instances(&self) -> Vec<Option<String>> {
        vec![resolve_stepper_name(self).name]
    }
}

impl BlockGraph for Workspace {
    type Node = Block;

    fn all_blocks(&self) -> Vec<&Block> {
        Workspace::all_blocks(self)
    }
}
