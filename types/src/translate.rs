use crate::node_id::NodeId;
use crate::qualified_name::QualifiedName;
use crate::status_code::StatusCode;

/// One step of a relative path. Reference-type filtering of the step is out of scope for this
/// crate, but the field is retained on the type since it's part of the wire shape and a future
/// extension might honor it.
#[derive(Debug, Clone, Serialize)]
pub struct RelativePathElement {
    pub reference_type_id: NodeId,
    pub is_inverse: bool,
    pub include_subtypes: bool,
    pub target_name: QualifiedName,
}

#[derive(Debug, Clone, Serialize)]
pub struct RelativePath {
    pub elements: Vec<RelativePathElement>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrowsePath {
    pub starting_node: NodeId,
    pub relative_path: RelativePath,
}

/// `remaining_path_index` is `u32::MAX` on a fully resolved target.
#[derive(Debug, Clone, Serialize)]
pub struct BrowsePathTarget {
    pub target_id: NodeId,
    pub remaining_path_index: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrowsePathResult {
    pub status_code: StatusCode,
    pub targets: Vec<BrowsePathTarget>,
}

impl BrowsePathResult {
    pub fn no_match() -> BrowsePathResult {
        BrowsePathResult { status_code: StatusCode::BadNoMatch, targets: Vec::new() }
    }

    pub fn resolved(target_id: NodeId) -> BrowsePathResult {
        BrowsePathResult {
            status_code: StatusCode::Good,
            targets: vec![BrowsePathTarget { target_id, remaining_path_index: u32::MAX }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TranslateBrowsePathsToNodeIdsRequest {
    pub browse_paths: Vec<BrowsePath>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranslateBrowsePathsToNodeIdsResponse {
    pub results: Vec<BrowsePathResult>,
}
