use crate::node_id::NodeId;
use crate::qualified_name::{LocalizedText, QualifiedName};
use crate::status_code::StatusCode;

bitflags! {
    /// NodeClass mask bits. A zero mask means "accept all" and is handled
    /// by the Browse engine as a special case rather than by this type, since `NodeClassMask`
    /// being empty is indistinguishable from "no classes selected" at the type level.
    pub struct NodeClassMask: u32 {
        const OBJECT = 1;
        const VARIABLE = 2;
        const METHOD = 4;
        const OBJECT_TYPE = 8;
        const VARIABLE_TYPE = 16;
        const REFERENCE_TYPE = 32;
        const DATA_TYPE = 64;
        const VIEW = 128;
    }
}

bitflags! {
    /// BrowseResultMask bits. A zero mask means "emit all" fields.
    pub struct BrowseResultMask: u32 {
        const REFERENCE_TYPE_ID = 0x01;
        const IS_FORWARD = 0x02;
        const NODE_CLASS = 0x04;
        const BROWSE_NAME = 0x08;
        const DISPLAY_NAME = 0x10;
        const TYPE_DEFINITION = 0x20;
    }
}

impl serde::Serialize for NodeClassMask {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl serde::Serialize for BrowseResultMask {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

/// BrowseDirection values.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum BrowseDirection {
    Forward,
    Inverse,
    Both,
}

/// One start point in a Browse request.
#[derive(Debug, Clone, Serialize)]
pub struct BrowseDescription {
    pub node_id: NodeId,
    pub browse_direction: BrowseDirection,
    pub reference_type_id: NodeId,
    pub include_subtypes: bool,
    pub node_class_mask: u32,
    pub result_mask: u32,
}

/// A single emitted reference, with sub-fields present only per `result_mask`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReferenceDescription {
    pub node_id: NodeId,
    pub reference_type_id: Option<NodeId>,
    pub is_forward: Option<bool>,
    pub node_class: Option<u32>,
    pub browse_name: Option<QualifiedName>,
    pub display_name: Option<LocalizedText>,
    pub type_definition: Option<NodeId>,
}

/// The result of browsing a single `BrowseDescription`.
#[derive(Debug, Clone, Serialize)]
pub struct BrowseResult {
    pub status_code: StatusCode,
    pub continuation_point: ContinuationPointHandle,
    pub references: Vec<ReferenceDescription>,
}

impl BrowseResult {
    pub fn error(status_code: StatusCode) -> BrowseResult {
        BrowseResult {
            status_code,
            continuation_point: ContinuationPointHandle::none(),
            references: Vec::new(),
        }
    }
}

/// The opaque continuation-point blob handed back to callers: a 4-byte
/// counter value. `0` means "no continuation point".
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct ContinuationPointHandle(pub u32);

impl ContinuationPointHandle {
    pub fn none() -> ContinuationPointHandle {
        ContinuationPointHandle(0)
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    pub fn as_bytes(self) -> [u8; 4] {
        self.0.to_ne_bytes()
    }

    pub fn from_bytes(bytes: [u8; 4]) -> ContinuationPointHandle {
        ContinuationPointHandle(u32::from_ne_bytes(bytes))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BrowseRequest {
    pub nodes_to_browse: Vec<BrowseDescription>,
    pub requested_max_references_per_node: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrowseResponse {
    pub results: Vec<BrowseResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrowseNextRequest {
    pub release_continuation_points: bool,
    pub continuation_points: Vec<ContinuationPointHandle>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrowseNextResponse {
    pub results: Vec<BrowseResult>,
}
