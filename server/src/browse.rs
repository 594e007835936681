//! Reference traversal with filters, result masking and continuation-point pagination. The
//! address space is immutable once built so this engine takes it by shared reference only and
//! never touches the subscription mutex.

use log::{debug, trace};

use opcua_types::prelude::*;

use crate::address_space::AddressSpace;
use crate::continuation_point::{ContinuationPointSlot, ContinuationPointState};

pub struct BrowseEngine<'a> {
    address_space: &'a AddressSpace,
    continuation_points: &'a ContinuationPointSlot,
    max_no_of_returned_references: usize,
}

impl<'a> BrowseEngine<'a> {
    pub fn new(address_space: &'a AddressSpace, continuation_points: &'a ContinuationPointSlot, max_no_of_returned_references: usize) -> BrowseEngine<'a> {
        BrowseEngine { address_space, continuation_points, max_no_of_returned_references }
    }

    fn effective_page_size(&self, requested_max_references_per_node: u32) -> usize {
        if requested_max_references_per_node > 0 {
            (requested_max_references_per_node as usize).min(self.max_no_of_returned_references)
        } else {
            self.max_no_of_returned_references
        }
    }

    pub fn browse(&self, nodes_to_browse: &[BrowseDescription], requested_max_references_per_node: u32) -> Result<Vec<BrowseResult>, StatusCode> {
        if nodes_to_browse.is_empty() {
            return Err(StatusCode::BadNothingToDo);
        }
        let page_size = self.effective_page_size(requested_max_references_per_node);
        Ok(nodes_to_browse.iter().map(|d| self.browse_one(d, page_size, 0)).collect())
    }

    fn browse_one(&self, description: &BrowseDescription, page_size: usize, resume_index: usize) -> BrowseResult {
        let Some(start) = self.address_space.lookup_by_node_id(&description.node_id) else {
            debug!("browse: start node {} not found", description.node_id);
            return BrowseResult::error(StatusCode::BadNodeIdUnknown);
        };

        let kept: Vec<&Reference> = start.references().iter()
            .skip(resume_index)
            .filter(|r| self.keep_reference(description, r))
            .collect();

        let page: Vec<&Reference> = kept.iter().take(page_size).cloned().collect();
        let has_more = kept.len() > page.len();

        let references = page.iter()
            .map(|r| self.describe_reference(description.result_mask, r))
            .collect();

        if !has_more {
            return BrowseResult {
                status_code: StatusCode::Good,
                continuation_point: ContinuationPointHandle::none(),
                references,
            };
        }

        let next_resume_index = resume_index + page.len();
        trace!("browse: {} has more references past index {}, allocating continuation point", description.node_id, next_resume_index);
        match self.continuation_points.try_acquire(description.clone(), next_resume_index, page_size) {
            Ok(handle) => BrowseResult { status_code: StatusCode::Good, continuation_point: handle, references },
            Err(status_code) => BrowseResult::error(status_code),
        }
    }

    fn keep_reference(&self, description: &BrowseDescription, r: &Reference) -> bool {
        if !self.address_space.is_subtype(&r.reference_type_id, &description.reference_type_id, description.include_subtypes) {
            return false;
        }
        let Some(target) = self.address_space.lookup_by_node_id(&r.target_node_id) else {
            return false;
        };
        if description.node_class_mask != 0 && (description.node_class_mask & target.node_class().bit()) == 0 {
            return false;
        }
        match description.browse_direction {
            BrowseDirection::Both => true,
            BrowseDirection::Forward => !r.is_inverse,
            BrowseDirection::Inverse => r.is_inverse,
        }
    }

    fn describe_reference(&self, result_mask: u32, r: &Reference) -> ReferenceDescription {
        let mask = BrowseResultMask::from_bits_truncate(result_mask);
        let emit_all = result_mask == 0;
        let target = self.address_space.lookup_by_node_id(&r.target_node_id);

        let mut rd = ReferenceDescription { node_id: r.target_node_id.clone(), ..ReferenceDescription::default() };

        if emit_all || mask.contains(BrowseResultMask::REFERENCE_TYPE_ID) {
            rd.reference_type_id = Some(r.reference_type_id.clone());
        }
        if emit_all || mask.contains(BrowseResultMask::IS_FORWARD) {
            rd.is_forward = Some(!r.is_inverse);
        }
        if let Some(target) = target {
            if emit_all || mask.contains(BrowseResultMask::NODE_CLASS) {
                rd.node_class = Some(target.node_class().bit());
            }
            if emit_all || mask.contains(BrowseResultMask::BROWSE_NAME) {
                rd.browse_name = Some(target.browse_name().clone());
            }
            if emit_all || mask.contains(BrowseResultMask::DISPLAY_NAME) {
                rd.display_name = Some(target.display_name().clone());
            }
            if (emit_all || mask.contains(BrowseResultMask::TYPE_DEFINITION)) && target.is_object_or_variable() {
                rd.type_definition = target.references().iter()
                    .find(|tr| !tr.is_inverse && tr.reference_type_id == ReferenceTypeId::HasTypeDefinition.into())
                    .map(|tr| tr.target_node_id.clone());
            }
        }
        rd
    }

    /// BrowseNext. Resumes or releases the single continuation-point slot; additive to
    /// `browse` above.
    pub fn browse_next(&self, continuation_points: &[ContinuationPointHandle], release_continuation_points: bool) -> Vec<BrowseResult> {
        continuation_points.iter().map(|&handle| self.browse_next_one(handle, release_continuation_points)).collect()
    }

    fn browse_next_one(&self, handle: ContinuationPointHandle, release_continuation_points: bool) -> BrowseResult {
        let Some(ContinuationPointState { node_to_browse, resume_index, page_size, .. }) = self.continuation_points.peek(handle) else {
            return BrowseResult::error(StatusCode::BadContinuationPointInvalid);
        };
        self.continuation_points.release(handle);
        if release_continuation_points {
            return BrowseResult { status_code: StatusCode::Good, continuation_point: ContinuationPointHandle::none(), references: Vec::new() };
        }
        self.browse_one(&node_to_browse, page_size, resume_index)
    }
}
