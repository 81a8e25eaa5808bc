use anyhow::{Context, Result};
use camino::Utf8Path;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Workspace
// ────────────────────────────────────────────────────────────────────────────

/// A snapshot of a block workspace: the top-level blocks in editor order.
///
/// Statement blocks below a top-level block hang off [`Block::next`]; value
/// blocks plugged into an input live in [`Block::inputs`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Workspace {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Parse a workspace from its JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse workspace JSON")
    }

    /// Load a workspace from a JSON file on disk.
    pub fn load_from_file(path: impl AsRef<Utf8Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("Failed to read {}", path))?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse workspace {}", path))
    }

    /// Write the workspace as pretty-printed JSON.
    pub fn save_to_file(&self, path: impl AsRef<Utf8Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_std_path(), json)
            .with_context(|| format!("Failed to write {}", path))?;
        Ok(())
    }

    /// Every block in the workspace, depth-first: each block is followed by
    /// the blocks plugged into its inputs, then by its `next` chain.
    pub fn all_blocks(&self) -> Vec<&Block> {
        let mut out = Vec::new();
        for block in &self.blocks {
            collect_blocks(block, &mut out);
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

fn collect_blocks<'a>(block: &'a Block, out: &mut Vec<&'a Block>) {
    let mut current = Some(block);
    while let Some(b) = current {
        out.push(b);
        for child in b.inputs.values() {
            collect_blocks(child, out);
        }
        current = b.next.as_deref();
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Block
// ────────────────────────────────────────────────────────────────────────────

/// A single block of the workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Workspace-unique block id.
    pub id: String,
    /// Block type (e.g. "stepper_configure", "math_number").
    #[serde(rename = "type")]
    pub block_type: String,
    /// Field values by field name, in declaration order.
    #[serde(default)]
    pub fields: IndexMap<String, String>,
    /// Value inputs by input name. Only connected inputs are present.
    #[serde(default)]
    pub inputs: IndexMap<String, Block>,
    /// The next statement block, if any.
    #[serde(default)]
    pub next: Option<Box<Block>>,
    #[serde(default)]
    pub disabled: bool,
}

impl Block {
    pub fn new(id: impl Into<String>, block_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            block_type: block_type.into(),
            fields: IndexMap::new(),
            inputs: IndexMap::new(),
            next: None,
            disabled: false,
        }
    }

    /// Builder-style helper to set a field value.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Builder-style helper to connect a block to a value input.
    pub fn with_input(mut self, name: impl Into<String>, block: Block) -> Self {
        self.inputs.insert(name.into(), block);
        self
    }

    /// Builder-style helper to attach the next statement block.
    pub fn with_next(mut self, block: Block) -> Self {
        self.next = Some(Box::new(block));
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|s| s.as_str())
    }

    /// The block connected to the named value input.
    pub fn input_target(&self, name: &str) -> Option<&Block> {
        self.inputs.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_blocks_visits_inputs_before_next() {
        let ws = Workspace::new(vec![
            Block::new("a", "stepper_configure")
                .with_input("STEPPER_NAME", Block::new("b", "text").with_field("TEXT", "m"))
                .with_next(Block::new("c", "stepper_step")),
        ]);
        let ids: Vec<&str> = ws.all_blocks().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(!ws.is_empty());
        assert!(Workspace::default().is_empty());
    }

    #[test]
    fn parse_minimal_block() {
        let ws = Workspace::from_json(r#"{"blocks":[{"id":"x","type":"math_number"}]}"#)
            .expect("parse");
        assert_eq!(ws.blocks[0].block_type, "math_number");
        assert!(ws.blocks[0].fields.is_empty());
        assert!(!ws.blocks[0].disabled);
    }
}
