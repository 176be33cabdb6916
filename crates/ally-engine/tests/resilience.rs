//! Scans must survive anything a shared document can throw at them.

use ally_engine::{remove_many, scan_page, steps, PageContext};
use ally_model::{FlowKind, LandmarkKind, StepKind, StepRecords};
use ally_test_utils::{attach_layer, attach_root, attach_text_child, tree_with_page};
use ally_tree::{NodeId, NodeKind, NodeTree, Rect};

#[test]
fn one_unrecognized_child_costs_nothing_but_a_warning() {
    let (mut tree, canvas, _page) = tree_with_page("Home");
    let root = attach_root(&mut tree, &canvas, "Home", FlowKind::Web);

    attach_layer(
        &mut tree,
        &root,
        StepKind::Landmarks,
        &[
            "Landmark: header | 1:10",
            "Landmark: nav | 1:11",
            "Landmark: footer | 1:12",
        ],
    );
    let stray = tree.create(NodeKind::Frame, "Moodboard ideas", Rect::default());
    tree.append_child(&root, &stray).unwrap();

    let entry = scan_page(&tree, &root).expect("scan survives the stray child");
    assert_eq!(entry.steps_completed, vec![StepKind::Landmarks]);
    assert_eq!(entry.steps_data[&StepKind::Landmarks].existing_data.len(), 3);
}

#[test]
fn malformed_block_names_are_skipped_per_block() {
    let (mut tree, canvas, _page) = tree_with_page("Home");
    let root = attach_root(&mut tree, &canvas, "Home", FlowKind::Web);

    attach_layer(
        &mut tree,
        &root,
        StepKind::Landmarks,
        &[
            "Landmark: header | 1:10",
            "|||",
            "Landmark: mystery-region | 1:12",
            "",
        ],
    );

    let entry = scan_page(&tree, &root).unwrap();
    let StepRecords::Landmarks(records) = &entry.steps_data[&StepKind::Landmarks].existing_data
    else {
        panic!("expected landmark records");
    };
    assert_eq!(records.len(), 1);
}

#[test]
fn legacy_blocks_without_id_suffixes_still_decode() {
    let (mut tree, canvas, _page) = tree_with_page("Home");
    let root = attach_root(&mut tree, &canvas, "Home", FlowKind::Web);

    attach_layer(
        &mut tree,
        &root,
        StepKind::Landmarks,
        &["Landmark: banner", "Landmark: navigation"],
    );

    let entry = scan_page(&tree, &root).unwrap();
    let StepRecords::Landmarks(records) = &entry.steps_data[&StepKind::Landmarks].existing_data
    else {
        panic!("expected landmark records");
    };
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].kind, LandmarkKind::Header);
    assert_eq!(records[1].kind, LandmarkKind::Nav);
}

#[test]
fn reading_order_entries_without_numbers_are_skipped() {
    let (mut tree, canvas, _page) = tree_with_page("Home");
    let root = attach_root(&mut tree, &canvas, "Home", FlowKind::Web);
    let layer = attach_layer(&mut tree, &root, StepKind::ReadingOrder, &[]);

    for (label, sequence) in [("first", Some("1")), ("ghost", None), ("second", Some("2"))] {
        let block = tree.create(
            NodeKind::Frame,
            &format!("Focus order:{label} | 0:0"),
            Rect::default(),
        );
        tree.append_child(&layer, &block).unwrap();
        if let Some(sequence) = sequence {
            attach_text_child(&mut tree, &block, "Number", sequence);
        }
    }

    let entry = scan_page(&tree, &root).unwrap();
    let StepRecords::ReadingOrder(records) =
        &entry.steps_data[&StepKind::ReadingOrder].existing_data
    else {
        panic!("expected reading-order records");
    };
    let labels: Vec<&str> = records.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["first", "second"]);
}

#[test]
fn batch_removal_reports_by_id_and_skips_the_already_gone() {
    let (mut tree, _canvas, page) = tree_with_page("Home");
    let ctx = PageContext::new(page, FlowKind::Web);

    let patch = {
        steps::landmarks::add_record(&mut tree, &ctx, LandmarkKind::Header, None).unwrap();
        steps::landmarks::add_record(&mut tree, &ctx, LandmarkKind::Nav, None).unwrap()
    };
    let StepRecords::Landmarks(records) = &patch.existing_data else {
        panic!("expected landmark records");
    };
    let mut ids: Vec<NodeId> = records.iter().map(|r| r.id.clone()).collect();
    ids.push(NodeId::new("9:99")); // deleted out-of-band

    let removed = remove_many(&mut tree, &ids);
    assert_eq!(removed.len(), 2);
    assert!(!removed.contains(&NodeId::new("9:99")));
}

#[test]
fn scan_after_out_of_band_deletions_just_shrinks() {
    let (mut tree, canvas, page) = tree_with_page("Home");
    let ctx = PageContext::new(page, FlowKind::Web);
    let patch = steps::landmarks::add_record(&mut tree, &ctx, LandmarkKind::Header, None).unwrap();

    // The user deletes the whole layer directly in the document.
    tree.remove_subtree(&patch.layer_id).unwrap();

    let root = tree
        .find_child(&canvas, &|n| n.name.contains("Accessibility"))
        .unwrap();
    let entry = scan_page(&tree, &root).expect("scan still succeeds");
    assert!(entry.steps_completed.is_empty());
}
