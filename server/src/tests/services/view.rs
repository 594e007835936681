use crate::prelude::*;
use crate::tests::*;

fn organizes_forward(node_id: &NodeId) -> BrowseDescription {
    BrowseDescription {
        node_id: node_id.clone(),
        browse_direction: BrowseDirection::Forward,
        reference_type_id: ReferenceTypeId::Organizes.into(),
        include_subtypes: true,
        node_class_mask: 0,
        result_mask: 0,
    }
}

fn browse_names(result: &BrowseResult) -> Vec<String> {
    result.references.iter().map(|r| r.browse_name.as_ref().unwrap().name.clone()).collect()
}

#[test]
fn browse_root_folder() {
    let st = ServiceTest::new(sample_address_space());
    let results = st.core.browse(&st.session_token, &[organizes_forward(&root_folder_id())], 0).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status_code, StatusCode::Good);
    assert!(results[0].continuation_point.is_none());
    assert_eq!(browse_names(&results[0]), vec!["Objects", "Types", "Views"]);
}

#[test]
fn browse_rejects_unactivated_session() {
    let st = ServiceTest::new(sample_address_space());
    let token = NodeId::new_numeric(1, 2);
    st.core.create_session(token.clone());
    let result = st.core.browse(&token, &[organizes_forward(&root_folder_id())], 0);
    assert!(matches!(result, Err(StatusCode::BadSessionNotActivated)));
}

#[test]
fn browse_rejects_unknown_session() {
    let st = ServiceTest::new(sample_address_space());
    let unknown_token = NodeId::new_numeric(9, 9);
    let result = st.core.browse(&unknown_token, &[organizes_forward(&root_folder_id())], 0);
    assert!(matches!(result, Err(StatusCode::BadSecurityChecksFailed)));
}

#[test]
fn browse_unknown_node_is_bad_node_id_unknown() {
    let st = ServiceTest::new(sample_address_space());
    let unknown = NodeId::new_numeric(1, 999);
    let results = st.core.browse(&st.session_token, &[organizes_forward(&unknown)], 0).unwrap();
    assert_eq!(results[0].status_code, StatusCode::BadNodeIdUnknown);
}

#[test]
fn browse_empty_request_is_bad_nothing_to_do() {
    let st = ServiceTest::new(sample_address_space());
    assert!(matches!(st.core.browse(&st.session_token, &[], 0), Err(StatusCode::BadNothingToDo)));
}

#[test]
fn browse_subtype_traversal_follows_hierarchical_references() {
    // Organizes and HasComponent are both subtypes of HierarchicalReferences: filtering on
    // HierarchicalReferences with include_subtypes should still surface a plain Organizes
    // reference.
    let st = ServiceTest::new(sample_address_space());
    let description = BrowseDescription {
        node_id: root_folder_id(),
        browse_direction: BrowseDirection::Forward,
        reference_type_id: ReferenceTypeId::HierarchicalReferences.into(),
        include_subtypes: true,
        node_class_mask: 0,
        result_mask: 0,
    };
    let results = st.core.browse(&st.session_token, &[description], 0).unwrap();
    assert_eq!(browse_names(&results[0]), vec!["Objects", "Types", "Views"]);
}

#[test]
fn browse_subtype_traversal_respects_include_subtypes_false() {
    let st = ServiceTest::new(sample_address_space());
    let description = BrowseDescription {
        node_id: root_folder_id(),
        browse_direction: BrowseDirection::Forward,
        reference_type_id: ReferenceTypeId::HierarchicalReferences.into(),
        include_subtypes: false,
        node_class_mask: 0,
        result_mask: 0,
    };
    let results = st.core.browse(&st.session_token, &[description], 0).unwrap();
    assert!(results[0].references.is_empty());
}

#[test]
fn browse_pagination_fits_in_one_page() {
    let (address_space, ids) = add_many_vars(sample_address_space(), &objects_folder_id(), 3);
    let st = ServiceTest::new(address_space);
    let results = st.core.browse(&st.session_token, &[organizes_forward(&objects_folder_id())], 0).unwrap();
    assert_eq!(results[0].references.len(), 3);
    assert!(results[0].continuation_point.is_none());
    assert_eq!(results[0].references[0].node_id, ids[0]);
}

#[test]
fn browse_pagination_issues_continuation_point() {
    // MAX_NO_OF_RETURNED_REFERENCES is 5; 12 children should page as 5, 5, 2.
    let (address_space, ids) = add_many_vars(sample_address_space(), &objects_folder_id(), 12);
    let st = ServiceTest::new(address_space);

    let page1 = st.core.browse(&st.session_token, &[organizes_forward(&objects_folder_id())], 0).unwrap().remove(0);
    assert_eq!(page1.references.len(), 5);
    assert!(!page1.continuation_point.is_none());
    assert_eq!(page1.references[0].node_id, ids[0]);

    let page2 = st.core.browse_next(&[page1.continuation_point], false).remove(0);
    assert_eq!(page2.references.len(), 5);
    assert!(!page2.continuation_point.is_none());
    assert_eq!(page2.references[0].node_id, ids[5]);

    let page3 = st.core.browse_next(&[page2.continuation_point], false).remove(0);
    assert_eq!(page3.references.len(), 2);
    assert!(page3.continuation_point.is_none());
    assert_eq!(page3.references[0].node_id, ids[10]);
}

#[test]
fn browse_next_release_clears_continuation_point() {
    let (address_space, _ids) = add_many_vars(sample_address_space(), &objects_folder_id(), 12);
    let st = ServiceTest::new(address_space);
    let page1 = st.core.browse(&st.session_token, &[organizes_forward(&objects_folder_id())], 0).unwrap().remove(0);

    let released = st.core.browse_next(&[page1.continuation_point], true).remove(0);
    assert_eq!(released.status_code, StatusCode::Good);
    assert!(released.references.is_empty());

    let reused = st.core.browse_next(&[page1.continuation_point], false).remove(0);
    assert_eq!(reused.status_code, StatusCode::BadContinuationPointInvalid);
}

#[test]
fn browse_next_unknown_handle_is_invalid() {
    let st = ServiceTest::new(sample_address_space());
    let results = st.core.browse_next(&[ContinuationPointHandle(42)], false);
    assert_eq!(results[0].status_code, StatusCode::BadContinuationPointInvalid);
}

#[test]
fn browse_second_call_while_continuation_point_held_is_out_of_continuation_points() {
    let (address_space, _ids) = add_many_vars(sample_address_space(), &objects_folder_id(), 12);
    let st = ServiceTest::new(address_space);
    let _page1 = st.core.browse(&st.session_token, &[organizes_forward(&objects_folder_id())], 0).unwrap().remove(0);

    let second = st.core.browse(&st.session_token, &[organizes_forward(&objects_folder_id())], 0).unwrap().remove(0);
    assert_eq!(second.status_code, StatusCode::BadNoContinuationPoints);
}

#[test]
fn translate_browse_paths_resolves_single_step() {
    let st = ServiceTest::new(sample_address_space());
    let path = BrowsePath {
        starting_node: root_folder_id(),
        relative_path: RelativePath {
            elements: vec![RelativePathElement {
                reference_type_id: ReferenceTypeId::Organizes.into(),
                is_inverse: false,
                include_subtypes: true,
                target_name: QualifiedName::new(0, "Objects"),
            }],
        },
    };
    let results = st.core.translate_browse_paths_to_node_ids(&[path]).unwrap();
    assert_eq!(results[0].status_code, StatusCode::Good);
    assert_eq!(results[0].targets[0].target_id, objects_folder_id());
    assert_eq!(results[0].targets[0].remaining_path_index, u32::MAX);
}

#[test]
fn translate_browse_paths_no_match_on_missing_step() {
    let st = ServiceTest::new(sample_address_space());
    let path = BrowsePath {
        starting_node: root_folder_id(),
        relative_path: RelativePath {
            elements: vec![RelativePathElement {
                reference_type_id: ReferenceTypeId::Organizes.into(),
                is_inverse: false,
                include_subtypes: true,
                target_name: QualifiedName::new(0, "NoSuchChild"),
            }],
        },
    };
    let results = st.core.translate_browse_paths_to_node_ids(&[path]).unwrap();
    assert_eq!(results[0].status_code, StatusCode::BadNoMatch);
    assert!(results[0].targets.is_empty());
}
