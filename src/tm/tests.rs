use super::*;
use std::time::Instant;

use super::occurrences::{LabelRecord, LabelTrackingList, ScopeVectorList, VectorRecord};

const FOREST: [&str; 4] = ["A B -1 C -1", "A", "A C -1", "A B D -1 -1"];

const FOREST_PATTERNS: [&str; 9] = [
    "A",
    "A B -1",
    "A B -1 C -1",
    "A B D -1 -1",
    "A C -1",
    "B",
    "B D -1",
    "C",
    "D",
];

fn hosts(forest: &[&str]) -> Vec<ParsedTree> {
    let codec = TreeCodec::default();
    forest.iter().map(|tree| codec.parse_tree(tree).unwrap()).collect()
}

fn enc(tree: &str) -> TreeEncoding {
    TreeCodec::default().parse(tree).unwrap()
}

#[test]
fn test_scope_predicates() {
    let outer = Scope::new(0, 4);
    let inner = Scope::new(1, 2);

    assert!(outer.contains(&inner));
    assert!(!inner.contains(&outer));
    // Containment is strict
    assert!(!outer.contains(&outer));

    assert!(Scope::leaf(1).is_strictly_less_than(&Scope::new(2, 3)));
    assert!(!Scope::new(1, 2).is_strictly_less_than(&Scope::new(2, 3)));
    assert_eq!(outer.to_string(), "(0, 4)");
}

#[test]
fn test_parse_and_render() {
    let codec = TreeCodec::default();

    // The root's closing ascend is optional and never rendered
    let tree = codec.parse("A B -1 -1").unwrap();
    assert_eq!(codec.render(&tree), "A B -1");
    assert_eq!(tree.node_count(), 2);

    // Extra separators are ignored
    let tree = codec.parse("  A  B -1   C -1 ").unwrap();
    assert_eq!(codec.render(&tree), "A B -1 C -1");
    assert_eq!(tree.labels().collect::<Vec<_>>(), vec!["A", "B", "C"]);
}

#[test]
fn test_parse_rejects_malformed_encodings() {
    let codec = TreeCodec::default();

    for bad in ["", "   ", "-1 A", "A -1 B", "A B C -1", "A B -1 -1 -1"] {
        match codec.parse(bad) {
            Err(MineError::MalformedEncoding { input, .. }) => assert_eq!(input, bad),
            other => panic!("expected malformed encoding for {:?}, got {:?}", bad, other),
        }
    }
}

#[test]
fn test_parsed_tree_scopes() {
    let tree = hosts(&["A B -1 C -1"]).remove(0);
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.scope(0), Scope::new(0, 2));
    assert_eq!(tree.scope(1), Scope::leaf(1));
    assert_eq!(tree.scope(2), Scope::leaf(2));
    assert_eq!(tree.children(0), &[1, 2]);
    assert_eq!(tree.parent(2), Some(0));

    let tree = hosts(&["A B D -1 -1"]).remove(0);
    assert_eq!(tree.scope(1), Scope::new(1, 2));
    assert_eq!(tree.descendants(0).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(tree.descendants(2).count(), 0);
}

#[test]
fn test_add_node_to_tree() {
    let codec = TreeCodec::default();

    // Below the last node
    assert_eq!(codec.add_node_to_tree("A B -1", "C", 1).unwrap(), "A B C -1 -1");
    // Sibling of B
    assert_eq!(codec.add_node_to_tree("A B -1", "C", 0).unwrap(), "A B -1 C -1");
    // Lands after B's whole subtree, not after B itself
    assert_eq!(
        codec.add_node_to_tree("A B C -1 E -1 -1 -1", "D", 1).unwrap(),
        "A B C -1 E -1 D -1 -1"
    );
    assert_eq!(codec.add_node_to_tree("A", "B", 0).unwrap(), "A B -1");
    assert_eq!(codec.add_node_to_tree("", "A", 0).unwrap(), "A");
}

#[test]
fn test_add_node_rejects_bad_input() {
    let codec = TreeCodec::default();

    assert_eq!(
        codec.add_node_to_tree("A B -1 C -1", "D", 5),
        Err(MineError::InvalidPosition {
            position: 5,
            nodes: 3
        })
    );
    assert_eq!(
        TreeEncoding::default().add_node("A", 1),
        Err(MineError::InvalidPosition {
            position: 1,
            nodes: 0
        })
    );
    assert!(matches!(
        codec.add_node_to_tree("A", "-1", 0),
        Err(MineError::MalformedEncoding { .. })
    ));
    assert!(codec.add_node_to_tree("A", "B C", 0).is_err());
}

#[test]
fn test_tree_shape_queries() {
    let tree = enc("A B C -1 E -1 -1");

    assert_eq!(tree.number_of_children(0).unwrap(), 1);
    assert_eq!(tree.number_of_children(1).unwrap(), 2);
    assert_eq!(tree.number_of_children(2).unwrap(), 0);
    assert_eq!(tree.number_of_descendants(0).unwrap(), 3);
    assert_eq!(tree.number_of_descendants(1).unwrap(), 2);
    assert_eq!(tree.rightmost_path(), vec![0, 1, 3]);
    assert!(tree.number_of_children(4).is_err());

    let codec = TreeCodec::default();
    assert_eq!(codec.find_number_of_children_of_node("A B -1 C -1", 0).unwrap(), 2);
}

#[test]
fn test_encoding_builders() {
    let path = TreeEncoding::branch(&["A", "B", "C"]);
    assert_eq!(path.to_string(), "A B C -1 -1");

    let tree = TreeEncoding::add_children_to_node(
        "R",
        &[TreeEncoding::single("X"), TreeEncoding::branch(&["Y", "Z"])],
    );
    assert_eq!(tree.to_string(), "R X -1 Y Z -1 -1");
    assert_eq!(tree, enc("R X -1 Y Z -1 -1 -1"));
}

#[test]
fn test_contains_subtree_is_direct() {
    let codec = TreeCodec::default();

    assert!(codec.contains_subtree("A B D -1 -1", "B D -1").unwrap());
    assert!(codec.contains_subtree("A B D -1 -1", "A B -1").unwrap());
    // D is only a grandchild of A
    assert!(!codec.contains_subtree("A B D -1 -1", "A D -1").unwrap());

    // Children match as an ordered subsequence
    assert!(codec.contains_subtree("A B -1 C -1 D -1", "A B -1 D -1").unwrap());
    assert!(!codec.contains_subtree("A B -1 C -1", "A C -1 B -1").unwrap());

    // A later matching sibling is found when the first one fails
    assert!(codec.contains_subtree("A B -1 B C -1 -1", "A B C -1 -1").unwrap());

    assert!(enc("A B -1").contains_subtree(&TreeEncoding::default()));
    assert!(codec.contains_subtree("A -1 B", "A").is_err());
}

#[test]
fn test_codec_configuration() {
    assert!(matches!(TreeCodec::new("", "-1"), Err(MineError::InvalidCodec(_))));
    assert!(matches!(TreeCodec::new(" ", ""), Err(MineError::InvalidCodec(_))));
    assert!(matches!(TreeCodec::new(" ", "- 1"), Err(MineError::InvalidCodec(_))));

    let codec = TreeCodec::new(",", "^").unwrap();
    let tree = codec.parse("A,B,^,C,^").unwrap();
    assert_eq!(codec.render(&tree), "A,B,^,C,^");
    assert_eq!(tree.to_string(), "A B -1 C -1");
    assert_eq!(codec.add_node_to_tree("A,B,^", "C", 1).unwrap(), "A,B,C,^,^");
}

#[test]
fn test_label_tracking_joins() {
    let mut x = LabelTrackingList::new();
    x.add(LabelRecord::new(0, vec![0], Scope::new(1, 2)));

    let mut y = LabelTrackingList::new();
    y.add(LabelRecord::new(0, vec![0], Scope::leaf(2)));
    // Different prefix match, never joined
    y.add(LabelRecord::new(0, vec![5], Scope::leaf(2)));
    // Different tree
    y.add(LabelRecord::new(1, vec![0], Scope::leaf(2)));

    let below = x.in_scope_join(&y);
    let records: Vec<_> = below.iter().cloned().collect();
    assert_eq!(records, vec![LabelRecord::new(0, vec![0, 1], Scope::leaf(2))]);

    let mut left = LabelTrackingList::new();
    left.add(LabelRecord::new(0, vec![0], Scope::leaf(1)));
    let mut right = LabelTrackingList::new();
    right.add(LabelRecord::new(0, vec![0], Scope::leaf(2)));
    right.add(LabelRecord::new(0, vec![0], Scope::leaf(1)));

    let siblings = left.out_scope_join(&right);
    let records: Vec<_> = siblings.iter().cloned().collect();
    assert_eq!(records, vec![LabelRecord::new(0, vec![0, 1], Scope::leaf(2))]);
}

#[test]
fn test_scope_vector_in_scope_join() {
    // Chain A(0,3) B(1,3) B(2,3) C(3,3)
    let mut b = ScopeVectorList::new();
    b.add(VectorRecord::new(0, vec![Scope::new(0, 3), Scope::new(1, 3)]));
    b.add(VectorRecord::new(0, vec![Scope::new(0, 3), Scope::new(2, 3)]));

    let mut c = ScopeVectorList::new();
    c.add(VectorRecord::new(0, vec![Scope::new(0, 3), Scope::leaf(3)]));
    // Different context, never joined
    c.add(VectorRecord::new(0, vec![Scope::new(1, 3), Scope::leaf(3)]));

    let joined = b.in_scope_join(&c);
    let records: Vec<_> = joined.iter().cloned().collect();
    // Both enclosing B nodes are kept
    assert_eq!(
        records,
        vec![
            VectorRecord::new(0, vec![Scope::new(0, 3), Scope::new(1, 3), Scope::leaf(3)]),
            VectorRecord::new(0, vec![Scope::new(0, 3), Scope::new(2, 3), Scope::leaf(3)]),
        ]
    );
    assert!(c.in_scope_join(&b).is_empty());
}

#[test]
fn test_scope_vector_out_scope_join() {
    // A(0,2) B(1,1) C(2,2)
    let mut b = ScopeVectorList::new();
    b.add(VectorRecord::new(0, vec![Scope::new(0, 2), Scope::leaf(1)]));
    let mut c = ScopeVectorList::new();
    c.add(VectorRecord::new(0, vec![Scope::new(0, 2), Scope::leaf(2)]));

    let joined = b.out_scope_join(&c, 0).unwrap();
    let records: Vec<_> = joined.iter().cloned().collect();
    assert_eq!(
        records,
        vec![VectorRecord::new(0, vec![Scope::new(0, 2), Scope::leaf(2)])]
    );

    // C comes before B only in the other direction
    assert!(c.out_scope_join(&b, 0).unwrap().is_empty());
}

#[test]
fn test_scope_vector_out_scope_fails_fast() {
    let mut x = ScopeVectorList::new();
    x.add(VectorRecord::new(0, vec![Scope::new(0, 2), Scope::leaf(1)]));
    let mut y = ScopeVectorList::new();
    y.add(VectorRecord::new(0, vec![Scope::new(0, 2), Scope::leaf(2)]));

    assert_eq!(
        x.out_scope_join(&y, 1).unwrap_err(),
        MineError::DetachedOccurrence {
            depth: 1,
            path_len: 2
        }
    );

    // The other list must sit directly under the attach node
    let mut deep = ScopeVectorList::new();
    deep.add(VectorRecord::new(
        0,
        vec![Scope::new(0, 2), Scope::new(1, 2), Scope::leaf(2)],
    ));
    assert_eq!(
        x.out_scope_join(&deep, 0).unwrap_err(),
        MineError::DetachedOccurrence {
            depth: 0,
            path_len: 3
        }
    );
}

#[test]
fn test_occurrence_list_support_counts_trees() {
    let mut records = LabelTrackingList::new();
    records.add(LabelRecord::new(0, vec![0], Scope::leaf(1)));
    records.add(LabelRecord::new(0, vec![0], Scope::leaf(2)));
    records.add(LabelRecord::new(3, vec![0], Scope::leaf(1)));
    let mut list = OccurrenceList::LabelTracking(records);

    assert_eq!(list.len(), 3);
    assert_eq!(list.support(), 2);
    assert_eq!(list.kind(), OccurrenceKind::LabelTracking);

    list.retain_trees(|tree| tree != 0);
    assert_eq!(list.len(), 1);
    assert_eq!(list.trees().into_iter().collect::<Vec<_>>(), vec![3]);
}

#[test]
fn test_occurrence_kinds_never_mix() {
    let labeled = OccurrenceList::empty(OccurrenceKind::LabelTracking);
    let vector = OccurrenceList::empty(OccurrenceKind::ScopeVector);

    assert_eq!(
        labeled.in_scope_join(&vector).unwrap_err(),
        MineError::MixedOccurrenceKinds
    );
    assert_eq!(
        vector.out_scope_join(&labeled, 0).unwrap_err(),
        MineError::MixedOccurrenceKinds
    );
}

#[test]
fn test_equivalence_class_elements() {
    let mut class = EquivalenceClass::new(TreeEncoding::single("A"));
    assert_eq!(class.state(), ClassState::Candidate);

    let mut list = LabelTrackingList::new();
    list.add(LabelRecord::new(0, vec![0], Scope::leaf(1)));
    let list = OccurrenceList::LabelTracking(list);

    class.add_element(Element::new("B", 0), list.clone()).unwrap();
    // Duplicates are ignored
    class.add_element(Element::new("B", 0), list.clone()).unwrap();
    class
        .add_element(Element::new("C", 0), OccurrenceList::empty(OccurrenceKind::LabelTracking))
        .unwrap();
    assert_eq!(class.elements().len(), 2);

    assert_eq!(class.pattern_for(&Element::new("B", 0)).unwrap(), enc("A B -1"));
    assert_eq!(class.occurrences_for(&Element::new("B", 0)).unwrap(), &list);
    assert_eq!(
        class.occurrences_for(&Element::new("Z", 0)).unwrap_err(),
        MineError::MissingOccurrenceList("A Z -1".to_string())
    );

    class.discard_non_frequent_elements(1).unwrap();
    assert_eq!(class.elements(), &[Element::new("B", 0)]);
    assert_eq!(class.state(), ClassState::Confirmed);

    class.discard_non_frequent_elements(2).unwrap();
    assert!(class.is_empty());
    assert_eq!(class.state(), ClassState::Dead);
}

#[test]
fn test_frequent_f1() {
    let hosts = hosts(&FOREST);

    assert_eq!(growth::frequent_labels(&hosts, 1), vec!["A", "B", "C", "D"]);
    assert_eq!(growth::frequent_labels(&hosts, 2), vec!["A", "B", "C"]);

    let f1 = growth::find_frequent_f1(&hosts, 2, OccurrenceKind::ScopeVector).unwrap();
    assert!(f1.prefix().is_empty());
    assert_eq!(
        f1.elements(),
        &[Element::new("A", 0), Element::new("B", 0), Element::new("C", 0)]
    );
    // One record per node carrying the label
    let a = f1.occurrences_for(&Element::new("A", 0)).unwrap();
    assert_eq!(a.len(), 4);
    assert_eq!(a.support(), 4);
}

#[test]
fn test_frequent_f2() {
    let hosts = hosts(&FOREST);
    let f1 = growth::find_frequent_f1(&hosts, 1, OccurrenceKind::LabelTracking).unwrap();
    let f2 = growth::find_frequent_f2(&f1, &hosts, 1, OccurrenceKind::LabelTracking).unwrap();

    let prefixes: Vec<String> = f2.iter().map(|class| class.prefix().to_string()).collect();
    assert_eq!(prefixes, vec!["A", "B"]);

    // Ancestor-descendant pairs, so A-D is still here
    assert_eq!(
        f2[0].elements(),
        &[Element::new("B", 0), Element::new("C", 0), Element::new("D", 0)]
    );
    assert_eq!(f2[1].elements(), &[Element::new("D", 0)]);
    assert!(f2.iter().all(|class| class.state() == ClassState::Confirmed));

    let f2 = growth::find_frequent_f2(&f1, &hosts, 2, OccurrenceKind::LabelTracking).unwrap();
    assert_eq!(f2.len(), 1);
    assert_eq!(
        f2[0].elements(),
        &[Element::new("B", 0), Element::new("C", 0)]
    );
}

#[test]
fn test_expand_class() {
    let hosts = hosts(&FOREST);

    for kind in [OccurrenceKind::LabelTracking, OccurrenceKind::ScopeVector] {
        let f1 = growth::find_frequent_f1(&hosts, 1, kind).unwrap();
        let f2 = growth::find_frequent_f2(&f1, &hosts, 1, kind).unwrap();

        // A-D never occurs directly, so its branch is abandoned
        let d = f2[0].occurrences_for(&Element::new("D", 0)).unwrap();
        assert!(!growth::occurs_directly(&enc("A D -1"), d, &hosts));

        let children = growth::expand_class(&f2[0], &hosts, 1).unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].prefix(), &enc("A B -1"));
        assert_eq!(
            children[0].elements(),
            &[Element::new("C", 0), Element::new("D", 1)]
        );
    }
}

#[test]
fn test_grow_equivalence_classes() {
    let hosts = hosts(&FOREST);
    let config = MinerConfig::new(1, false);
    let f1 = growth::find_frequent_f1(&hosts, 1, config.occurrence_kind()).unwrap();
    let seeds = growth::find_frequent_f2(&f1, &hosts, 1, config.occurrence_kind()).unwrap();

    let classes = growth::grow_equivalence_classes(&hosts, seeds, &config).unwrap();
    let prefixes: Vec<String> = classes.iter().map(|class| class.prefix().to_string()).collect();
    assert_eq!(prefixes, vec!["A", "B", "A B -1"]);
}

#[test]
fn test_mine_forest() {
    let result = mine(&FOREST, 1, true).unwrap();

    assert_eq!(result.patterns, FOREST_PATTERNS);
    assert_eq!(result.characterization.dim(), (4, 9));
    assert_eq!(result.row(0), vec![1, 1, 1, 0, 1, 1, 0, 1, 0]);
    assert_eq!(result.row(1), vec![1, 0, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(result.row(2), vec![1, 0, 0, 0, 1, 0, 0, 1, 0]);
    assert_eq!(result.row(3), vec![1, 1, 0, 1, 0, 1, 1, 0, 1]);
    assert_eq!(result.supports, vec![4, 2, 1, 1, 2, 2, 1, 2, 1]);

    assert_eq!(result.column_of("B D -1"), Some(6));
    assert_eq!(result.column_of("A D -1"), None);
}

#[test]
fn test_mine_modes_agree() {
    let tracked = mine(&FOREST, 1, true).unwrap();
    let vectors = mine(&FOREST, 1, false).unwrap();

    assert_eq!(tracked.patterns, vectors.patterns);
    assert_eq!(tracked.characterization, vectors.characterization);
    assert_eq!(tracked.supports, vectors.supports);
}

#[test]
fn test_mine_repeated_children() {
    for count_multiple in [true, false] {
        let result = mine(&["A B -1 B -1"], 1, count_multiple).unwrap();
        assert_eq!(result.patterns, vec!["A", "A B -1", "A B -1 B -1", "B"]);
    }
}

#[test]
fn test_mine_repeated_labels_on_a_path() {
    let expected = vec![
        "A",
        "A B -1",
        "A B B -1 -1",
        "A B B D -1 -1 -1",
        "B",
        "B B -1",
        "B B D -1 -1",
        "B D -1",
        "D",
    ];

    let tracked = mine(&["A B B D -1 -1 -1"], 1, true).unwrap();
    let vectors = mine(&["A B B D -1 -1 -1"], 1, false).unwrap();
    assert_eq!(tracked.patterns, expected);
    assert_eq!(vectors.patterns, expected);
}

#[test]
fn test_mine_single_node() {
    let result = mine(&["A"], 1, true).unwrap();
    assert_eq!(result.patterns, vec!["A"]);
    assert_eq!(result.characterization, ndarray::array![[1u8]]);
}

#[test]
fn test_mine_edge_cases() {
    let result = mine::<&str>(&[], 1, true).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.characterization.dim(), (0, 0));

    let result = mine(&FOREST, 5, false).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.characterization.dim(), (4, 0));

    assert_eq!(
        mine(&FOREST, 0, true).unwrap_err(),
        MineError::UnsupportedMinSupport(0)
    );
    assert!(matches!(
        mine(&["A B -1", "A B"], 1, true),
        Err(MineError::MalformedEncoding { .. })
    ));
}

#[test]
fn test_mine_min_support() {
    let result = mine(&FOREST, 2, true).unwrap();
    assert_eq!(result.patterns, vec!["A", "A B -1", "A C -1", "B", "C"]);
    assert!(result.supports.iter().all(|&support| support >= 2));
}

#[test]
fn test_mine_chain() {
    let labels: Vec<String> = (0..12).map(|i| format!("n{:02}", i)).collect();
    let chain = TreeEncoding::branch(&labels).to_string();

    let result = mine(&[chain.as_str()], 1, false).unwrap();
    // Every contiguous sub-path
    assert_eq!(result.len(), 12 * 13 / 2);
    assert!(result.column_of(&chain).is_some());
}

#[test]
fn test_max_pattern_size() {
    let labels: Vec<String> = (0..12).map(|i| format!("n{:02}", i)).collect();
    let chain = TreeEncoding::branch(&labels).to_string();
    let forest = [chain.as_str()];

    for (limit, expected) in [(1, 12), (2, 23), (3, 33)] {
        let miner = TreeMiner::new(MinerConfig::new(1, true).with_max_pattern_size(limit));
        let result = miner.mine(&forest).unwrap();
        assert_eq!(result.len(), expected, "limit {}", limit);
    }
}

#[test]
fn test_deadline() {
    let miner = TreeMiner::new(MinerConfig::new(1, true).with_deadline(Instant::now()));
    assert_eq!(miner.mine(&FOREST).unwrap_err(), MineError::DeadlineExceeded);
}

#[test]
fn test_custom_codec_mining() {
    let codec = TreeCodec::new(",", "^").unwrap();
    let miner = TreeMiner::new(MinerConfig::new(2, false).with_codec(codec));

    let result = miner.mine(&["A,B,^,C,^", "A,C,^"]).unwrap();
    assert_eq!(result.patterns, vec!["A", "A,C,^", "C"]);
}

#[test]
fn test_parallel_validation_matches_sequential() {
    let sequential = TreeMiner::new(MinerConfig::new(1, true)).mine(&FOREST).unwrap();
    let parallel = TreeMiner::new(MinerConfig::new(1, true).with_parallel_validation(true))
        .mine(&FOREST)
        .unwrap();

    assert_eq!(sequential, parallel);
}

#[test]
fn test_class_summaries() {
    let result = mine(&FOREST, 1, true).unwrap();

    // Root class first, with every frequent label
    assert_eq!(result.classes[0].prefix, "");
    assert_eq!(result.classes[0].patterns, vec!["A", "B", "C", "D"]);

    let a = result
        .classes
        .iter()
        .find(|class| class.prefix == "A")
        .unwrap();
    assert_eq!(a.patterns, vec!["A B -1", "A C -1"]);
}

#[test]
fn test_frequent_subtree_finder() {
    let miner = TreeMiner::default();
    let forest: Vec<String> = FOREST.iter().map(|tree| tree.to_string()).collect();

    let patterns = miner.find_frequent_subtrees(&forest).unwrap();
    assert_eq!(patterns, FOREST_PATTERNS);
    assert!(!miner.contains_subtree("A B D -1 -1", "A D -1").unwrap());
}
