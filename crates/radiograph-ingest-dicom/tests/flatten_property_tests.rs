use proptest::prelude::*;
use radiograph_dicom::{Element, ScalarValue, Tag, Vr};
use radiograph_ingest_dicom::flatten_tree;
use radiograph_ingest_dicom::tags::INCLUDE_TAGS;

fn any_scalar() -> impl Strategy<Value = ScalarValue> {
    prop_oneof![
        Just(ScalarValue::Null),
        any::<i64>().prop_map(ScalarValue::Int),
        ".{0,24}".prop_map(ScalarValue::Text),
    ]
}

/// Flat trees mixing allow-listed and arbitrary tags.
fn any_flat_tree() -> impl Strategy<Value = Vec<Element>> {
    let any_tag = prop_oneof![
        (0..INCLUDE_TAGS.len()).prop_map(|i| INCLUDE_TAGS[i]),
        (any::<u16>(), any::<u16>()).prop_map(|(g, e)| Tag(g, e)),
    ];
    proptest::collection::vec(
        (any_tag, any_scalar(), "[A-Za-z ]{1,20}").prop_map(|(tag, value, name)| {
            Element::scalar(tag, Vr::Lo, name, value)
        }),
        0..24,
    )
}

proptest! {
    /// Flattening a sequence-free tree is idempotent and order-preserving.
    #[test]
    fn flattening_flat_trees_is_idempotent(tree in any_flat_tree()) {
        let once = flatten_tree(&tree);
        let twice = flatten_tree(&tree);
        prop_assert_eq!(&once, &twice);

        // Order preservation: output names follow input order of kept elements.
        let kept: Vec<&str> = tree
            .iter()
            .filter(|e| radiograph_ingest_dicom::tags::is_included(e.tag))
            .map(|e| e.name.as_str())
            .collect();
        let names: Vec<&str> = once.iter().map(|r| r.name.as_str()).collect();
        prop_assert_eq!(names, kept);
    }

    /// Every emitted record's tag is allow-listed.
    #[test]
    fn flattening_never_leaks_unlisted_tags(tree in any_flat_tree()) {
        for record in flatten_tree(&tree) {
            prop_assert!(radiograph_ingest_dicom::tags::is_included(record.tag));
        }
    }
}
