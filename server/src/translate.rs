//! TranslateBrowsePathsToNodeIds: resolve a relative path of browse-name steps against the
//! address space, one node at a time.

use opcua_types::prelude::*;

use crate::address_space::AddressSpace;

pub struct TranslateEngine<'a> {
    address_space: &'a AddressSpace,
}

impl<'a> TranslateEngine<'a> {
    pub fn new(address_space: &'a AddressSpace) -> TranslateEngine<'a> {
        TranslateEngine { address_space }
    }

    pub fn translate(&self, browse_paths: &[BrowsePath]) -> Result<Vec<BrowsePathResult>, StatusCode> {
        if browse_paths.is_empty() {
            return Err(StatusCode::BadNothingToDo);
        }
        Ok(browse_paths.iter().map(|p| self.translate_one(p)).collect())
    }

    fn translate_one(&self, path: &BrowsePath) -> BrowsePathResult {
        let mut current = path.starting_node.clone();
        for element in &path.relative_path.elements {
            match self.address_space.lookup_child_by_browse_name(Some(&current), &element.target_name) {
                Some(node) => current = node.node_id().clone(),
                None => return BrowsePathResult::no_match(),
            }
        }
        BrowsePathResult::resolved(current)
    }
}
