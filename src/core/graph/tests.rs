//! Graph storage and traversal tests

use super::*;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Kind {
    Folder,
    Tag,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Folder => f.write_str("folder"),
            Kind::Tag => f.write_str("tag"),
        }
    }
}

impl NodeKind for Kind {}

const FOLDER_TO_FOLDER: EdgeType<Kind> = (Kind::Folder, Kind::Folder);
const FOLDER_TO_TAG: EdgeType<Kind> = (Kind::Folder, Kind::Tag);

fn folder(id: &str) -> Node<Kind> {
    Node::new(id, Kind::Folder)
}

fn tag(id: &str) -> Node<Kind> {
    Node::new(id, Kind::Tag)
}

fn ids<'a>(nodes: impl Iterator<Item = &'a Node<Kind>>) -> Vec<&'a str> {
    nodes.map(|node| node.id()).collect()
}

/// a -> b, a -> c, b -> e, e -> f, c -> d, plus a tag on a
fn sample_tree() -> Graph<Kind> {
    let mut graph = Graph::new();
    graph.add_edge(Edge::new(folder("a"), folder("b")));
    graph.add_edge(Edge::new(folder("a"), folder("c")));
    graph.add_edge(Edge::new(folder("b"), folder("e")));
    graph.add_edge(Edge::new(folder("e"), folder("f")));
    graph.add_edge(Edge::new(folder("c"), folder("d")));
    graph.add_edge(Edge::new(folder("a"), tag("prod")));
    graph
}

#[test]
fn test_get_node_returns_canonical_instance() {
    let graph = Graph::with_nodes(vec![folder("1"), tag("2")]);

    let found = graph.get_node(&folder("1")).unwrap();
    assert_eq!(found.id(), "1");
    assert_eq!(found.kind(), Kind::Folder);
    assert_eq!(graph.get_node(&tag("2")).unwrap().kind(), Kind::Tag);

    // Same id, other kind
    assert!(graph.get_node(&tag("1")).is_none());
    assert!(graph.get_node(&folder("missing")).is_none());
}

#[test]
fn test_get_or_add_is_idempotent() {
    let mut graph = Graph::with_nodes(vec![folder("1")]);
    let existing = graph.node_id(&folder("1")).unwrap();

    assert_eq!(graph.get_or_add(folder("1")), existing);
    assert_eq!(graph.node_count(), 1);

    let added = graph.get_or_add(folder("2"));
    assert_ne!(added, existing);
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.resolve(added).unwrap().id(), "2");
}

#[test]
fn test_artefacts_take_part_in_identity() {
    let mut graph = Graph::new();
    let first = graph.get_or_add(Node::with_artefacts(
        "owner",
        Kind::Tag,
        vec!["folders/1".to_string()],
    ));
    let second = graph.get_or_add(Node::with_artefacts(
        "owner",
        Kind::Tag,
        vec!["folders/2".to_string()],
    ));

    assert_ne!(first, second);
    assert_eq!(graph.node_count(), 2);
    // Lookup by kind and id ignores artefacts and returns the first inserted
    assert_eq!(
        graph.find_node(Kind::Tag, "owner").unwrap().artefacts(),
        ["folders/1".to_string()]
    );
}

#[test]
fn test_add_edge_counts() {
    let mut graph = Graph::with_nodes(vec![folder("1"), tag("2")]);
    let nodes_before = graph.node_count();
    let edges_before = graph.edge_count();

    assert!(graph.add_edge(Edge::new(folder("1"), folder("4"))));
    assert_eq!(graph.node_count(), nodes_before + 1);
    assert_eq!(graph.edge_count(), edges_before + 1);

    // Re-adding the same edge changes nothing
    assert!(!graph.add_edge(Edge::new(folder("1"), folder("4"))));
    assert_eq!(graph.node_count(), nodes_before + 1);
    assert_eq!(graph.edge_count(), edges_before + 1);

    // Two unseen endpoints
    graph.add_edge(Edge::new(folder("7"), folder("8")));
    assert_eq!(graph.node_count(), nodes_before + 3);
    assert_eq!(graph.edge_count(), edges_before + 2);
}

#[test]
fn test_every_stored_node_is_found_by_value() {
    let mut graph = Graph::new();
    for i in 0..200 {
        graph.get_or_add(folder(&i.to_string()));
        graph.get_or_add(tag(&i.to_string()));
    }
    assert_eq!(graph.node_count(), 400);

    let stored: Vec<Node<Kind>> = graph.nodes().cloned().collect();
    for node in &stored {
        let id = graph.node_id(node).unwrap();
        assert_eq!(graph.resolve(id), Some(node));
        assert_eq!(graph.get_or_add(node.clone()), id);
    }
    assert_eq!(graph.node_count(), 400);
}

#[test]
fn test_link_rejects_handles_from_another_graph() {
    let mut large = Graph::new();
    let a = large.get_or_add(folder("a"));
    large.get_or_add(folder("b"));
    let c = large.get_or_add(folder("c"));

    let mut small = Graph::with_nodes(vec![folder("x")]);
    let x = small.node_id(&folder("x")).unwrap();

    assert!(!small.link(a, c));
    assert!(!small.link(x, c));
    assert!(!small.link(c, x));
    assert_eq!(small.edge_count(), 0);
    assert_eq!(small.node_count(), 1);

    // The rejected attempts left no stale dedup entry behind
    small.get_or_add(folder("y"));
    small.get_or_add(folder("z"));
    assert!(small.link(a, c));
    assert_eq!(ids(small.children_of(&folder("x"), None)), ["z"]);
    assert_eq!(small.edge_count(), 1);
}

#[test]
fn test_edges_by_types() {
    let mut graph = Graph::with_nodes(vec![folder("1"), tag("2")]);
    let before = graph.edges_by_types(&[FOLDER_TO_TAG]).count();

    graph.add_edge(Edge::new(folder("1"), tag("5")));
    assert_eq!(graph.edges_by_types(&[FOLDER_TO_TAG]).count(), before + 1);

    // Other edge types leave the count alone
    graph.add_edge(Edge::new(folder("1"), folder("6")));
    assert_eq!(graph.edges_by_types(&[FOLDER_TO_TAG]).count(), before + 1);

    assert_eq!(
        graph
            .edges_by_types(&[FOLDER_TO_TAG, FOLDER_TO_FOLDER])
            .count(),
        2
    );
}

#[test]
fn test_empty_type_filter_matches_nothing() {
    let graph = sample_tree();
    assert_eq!(graph.edges_by_types(&[]).count(), 0);
    assert_eq!(graph.edges().count(), 6);
}

#[test]
fn test_edge_ref_type() {
    let graph = sample_tree();
    let edge = graph.edges_by_types(&[FOLDER_TO_TAG]).next().unwrap();

    assert_eq!(edge.edge_type(), FOLDER_TO_TAG);
    assert_eq!(edge.previous.id(), "a");
    assert_eq!(edge.to_edge(), Edge::new(folder("a"), tag("prod")));
    assert_eq!(edge.to_edge().edge_type(), FOLDER_TO_TAG);
    assert_eq!(edge.to_string(), "a -[FolderToTag]-> prod");
}

#[test]
fn test_one_hop_traversal() {
    let graph = sample_tree();

    assert_eq!(ids(graph.children_of(&folder("a"), None)), ["b", "c", "prod"]);
    assert_eq!(
        ids(graph.children_of(&folder("a"), Some(FOLDER_TO_FOLDER))),
        ["b", "c"]
    );
    assert_eq!(
        ids(graph.children_of(&folder("a"), Some(FOLDER_TO_TAG))),
        ["prod"]
    );
    assert_eq!(ids(graph.parents_of(&folder("d"), None)), ["c"]);
    assert_eq!(ids(graph.parents_of(&tag("prod"), None)), ["a"]);
}

#[test]
fn test_type_filter_hides_other_relations() {
    let graph = sample_tree();

    // The tag hangs off `a` through a folder->tag edge only
    assert_eq!(
        graph
            .parents_of(&tag("prod"), Some(FOLDER_TO_FOLDER))
            .count(),
        0
    );
    assert_eq!(
        graph
            .children_of(&folder("d"), Some(FOLDER_TO_TAG))
            .count(),
        0
    );
}

#[test]
fn test_missing_node_yields_nothing() {
    let graph = sample_tree();
    assert_eq!(graph.children_of(&folder("zz"), None).count(), 0);
    assert_eq!(graph.all_parents_of(&folder("zz"), None).count(), 0);

    let empty: Graph<Kind> = Graph::default();
    assert_eq!(empty.all_children_of(&folder("a"), None).count(), 0);
}

#[test]
fn test_transitive_closure() {
    let mut graph = Graph::new();
    graph.add_edge(Edge::new(folder("3"), folder("4")));
    graph.add_edge(Edge::new(folder("3"), folder("5")));
    graph.add_edge(Edge::new(folder("5"), folder("6")));

    let children = ids(graph.all_children_of(&folder("3"), None));
    assert!(children.contains(&"4"));
    assert!(children.contains(&"5"));
    assert!(children.contains(&"6"));

    let parents = ids(graph.all_parents_of(&folder("6"), None));
    assert!(parents.contains(&"3"));
    assert!(parents.contains(&"5"));
    assert_eq!(parents.len(), 2);
}

#[test]
fn test_walk_order_yields_siblings_before_expanding() {
    let graph = sample_tree();

    assert_eq!(
        ids(graph.all_children_of(&folder("a"), Some(FOLDER_TO_FOLDER))),
        ["b", "c", "e", "f", "d"]
    );
    assert_eq!(
        ids(graph.all_parents_of(&folder("f"), Some(FOLDER_TO_FOLDER))),
        ["e", "b", "a"]
    );
}

#[test]
fn test_walk_does_not_deduplicate_diamonds() {
    let mut graph = Graph::new();
    graph.add_edge(Edge::new(folder("top"), folder("left")));
    graph.add_edge(Edge::new(folder("top"), folder("right")));
    graph.add_edge(Edge::new(folder("left"), folder("bottom")));
    graph.add_edge(Edge::new(folder("right"), folder("bottom")));

    assert_eq!(
        ids(graph.all_children_of(&folder("top"), None)),
        ["left", "right", "bottom", "bottom"]
    );
}

#[test]
fn test_walk_max_depth() {
    let graph = sample_tree();

    assert_eq!(
        ids(graph
            .all_children_of(&folder("a"), Some(FOLDER_TO_FOLDER))
            .max_depth(1)),
        ["b", "c"]
    );
    assert_eq!(
        ids(graph
            .all_children_of(&folder("a"), Some(FOLDER_TO_FOLDER))
            .max_depth(2)),
        ["b", "c", "e", "d"]
    );
    assert_eq!(
        graph
            .all_children_of(&folder("a"), None)
            .max_depth(0)
            .count(),
        0
    );
    assert_eq!(
        graph
            .all_children_of(&folder("a"), Some(FOLDER_TO_FOLDER))
            .limit(None)
            .count(),
        5
    );
}

#[test]
fn test_max_depth_terminates_on_cycle() {
    let mut graph = Graph::new();
    graph.add_edge(Edge::new(folder("x"), folder("y")));
    graph.add_edge(Edge::new(folder("y"), folder("x")));

    assert_eq!(
        ids(graph.all_children_of(&folder("x"), None).max_depth(3)),
        ["y", "x", "y"]
    );
}

#[test]
fn test_children_parents_round_trip() {
    let graph = sample_tree();

    for parent in graph.nodes() {
        for child in graph.children_of(parent, None) {
            assert!(graph.parents_of(child, None).any(|p| p == parent));
        }
    }
}

#[test]
fn test_node_display_is_id() {
    let node = Node::with_artefacts("roles/owner", Kind::Tag, vec!["folders/1".into()]);
    assert_eq!(node.to_string(), "roles/owner");
}
