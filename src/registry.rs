//! Instance registry: the set of peripheral instance names declared in a workspace.

use crate::block::BlockNode;
use indexmap::IndexMap;
use log::debug;

/// Collect every instance name declared by `blocks`.
///
/// Names are deduplicated case-insensitively; the first-seen casing is kept
/// and the result is in first-seen order. Blocks without the name-declaring
/// capability and `None` or empty names from half-built blocks are skipped.
pub fn list_instances<'a, B, I>(blocks: I) -> Vec<String>
where
    B: BlockNode + ?Sized + 'a,
    I: IntoIterator<Item = &'a B>,
{
    let mut by_key: IndexMap<String, String> = IndexMap::new();
    for block in blocks {
        let Some(declaring) = block.as_name_declaring() else {
            continue;
        };
        for name in declaring.declared_instances() {
            let Some(name) = name.filter(|n| !n.is_empty()) else {
                debug!("Block {} ({}) declares an unnamed instance", block.id(), block.block_type());
                continue;
            };
            by_key.entry(name.to_lowercase()).or_insert(name);
        }
    }
    by_key.into_values().collect()
}
