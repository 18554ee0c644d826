//! Tests for the reachability engine.
//!
//! These tests verify the traversal output contract:
//! - ordering by minimum depth, ties broken by node ID
//! - deduplication of multi-path nodes at their shortest depth
//! - the self-inclusive variants
//! - depth truncation and cyclic-graph termination


use directed_core::discipline::Discipline;
use test_utils::{four_nodes, service, three_nodes, two_nodes};

// ─────────────────────────────────────────────────────────────────────────────
// Ordering
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn results_order_by_depth_then_id() {
    let service = service(Discipline::Dag);
    let (a, b, c, d) = four_nodes(&service).await;

    // Add the depth-1 children out of ID order; output must still be sorted.
    a.add_child(&c).await.unwrap();
    a.add_child(&b).await.unwrap();
    c.add_child(&d).await.unwrap();

    assert_eq!(a.descendants().await.unwrap(), vec![b.id(), c.id(), d.id()]);
}

#[tokio::test]
async fn multi_path_nodes_keep_their_minimum_depth() {
    let service = service(Discipline::Dag);
    let (a, b, c, d) = four_nodes(&service).await;

    // Diamond: d is reachable through b and through c, and must surface
    // exactly once at depth 2.
    a.add_child(&b).await.unwrap();
    a.add_child(&c).await.unwrap();
    b.add_child(&d).await.unwrap();
    c.add_child(&d).await.unwrap();

    assert_eq!(a.descendants().await.unwrap(), vec![b.id(), c.id(), d.id()]);
    assert_eq!(a.descendants_count().await.unwrap(), 3);
}

#[tokio::test]
async fn descendants_is_idempotent() {
    let service = service(Discipline::Dag);
    let (a, b, c) = three_nodes(&service).await;
    a.add_child(&b).await.unwrap();
    b.add_child(&c).await.unwrap();

    let first = a.descendants().await.unwrap();
    let second = a.descendants().await.unwrap();
    assert_eq!(first, second);
}

// ─────────────────────────────────────────────────────────────────────────────
// Empty and Self-Inclusive Variants
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn leaf_nodes_have_empty_descendant_sets() {
    let service = service(Discipline::Dag);
    let (a, b) = two_nodes(&service).await;
    a.add_child(&b).await.unwrap();

    assert!(b.descendants().await.unwrap().is_empty());
    assert_eq!(b.self_and_descendants().await.unwrap(), vec![b.id()]);
    assert!(a.ancestors().await.unwrap().is_empty());
    assert_eq!(a.self_and_ancestors().await.unwrap(), vec![a.id()]);
}

#[tokio::test]
async fn self_variants_prepend_and_append() {
    let service = service(Discipline::Dag);
    let (a, b, c) = three_nodes(&service).await;
    a.add_child(&b).await.unwrap();
    b.add_child(&c).await.unwrap();

    assert_eq!(
        a.self_and_descendants().await.unwrap(),
        vec![a.id(), b.id(), c.id()]
    );
    assert_eq!(
        a.descendants_and_self().await.unwrap(),
        vec![b.id(), c.id(), a.id()]
    );
    assert_eq!(
        c.self_and_ancestors().await.unwrap(),
        vec![c.id(), b.id(), a.id()]
    );
    assert_eq!(
        c.ancestors_and_self().await.unwrap(),
        vec![b.id(), a.id(), c.id()]
    );
}

#[tokio::test]
async fn self_appears_exactly_once_on_cyclic_graphs() {
    let service = service(Discipline::Cyclic);
    let (a, b) = two_nodes(&service).await;
    a.add_child(&b).await.unwrap();
    b.add_child(&a).await.unwrap();

    let result = a.self_and_descendants().await.unwrap();
    assert_eq!(result, vec![a.id(), b.id()]);
    assert_eq!(
        result.iter().filter(|id| **id == a.id()).count(),
        1,
        "start node must appear exactly once, at depth 0"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Direction
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ancestors_mirror_descendants() {
    let service = service(Discipline::Dag);
    let (a, b, c, d) = four_nodes(&service).await;
    a.add_child(&b).await.unwrap();
    a.add_child(&c).await.unwrap();
    b.add_child(&d).await.unwrap();
    c.add_child(&d).await.unwrap();

    assert_eq!(d.ancestors().await.unwrap(), vec![b.id(), c.id(), a.id()]);
    assert_eq!(d.ancestors_count().await.unwrap(), 3);
    assert_eq!(a.descendants_count().await.unwrap(), 3);
}

// ─────────────────────────────────────────────────────────────────────────────
// Depth Bounds
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn traversal_truncates_at_the_configured_depth() {
    let service = service(Discipline::Dag).with_max_depth(2);
    let nodes = [
        service.create_node().await.unwrap(),
        service.create_node().await.unwrap(),
        service.create_node().await.unwrap(),
        service.create_node().await.unwrap(),
    ];
    for pair in nodes.windows(2) {
        pair[0].add_child(&pair[1]).await.unwrap();
    }

    // Truncation is silent: depth 3 is simply absent.
    assert_eq!(
        nodes[0].descendants().await.unwrap(),
        vec![nodes[1].id(), nodes[2].id()]
    );
}

#[tokio::test]
async fn cyclic_traversal_terminates_within_the_bound() {
    let service = service(Discipline::Cyclic);
    let (a, b, c) = three_nodes(&service).await;
    a.add_child(&b).await.unwrap();
    b.add_child(&c).await.unwrap();
    c.add_child(&a).await.unwrap();

    assert_eq!(a.descendants().await.unwrap(), vec![b.id(), c.id()]);
    // Rootward the ring reads backwards: c is the direct parent.
    assert_eq!(a.ancestors().await.unwrap(), vec![c.id(), b.id()]);
}
