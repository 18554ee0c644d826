//! Tests for the constraint engine and the discipline check policies.
//!
//! These tests verify the edge-insertion invariants:
//! - self-link handling per discipline and configuration
//! - circular-ancestry rejection under the acyclic disciplines
//! - opt-in duplicate-edge rejection
//! - opt-in children-quantity caps


use directed_core::discipline::Discipline;
use directed_core::error::Violation;
use directed_graph::error::GraphError;
use test_utils::{config_builder, four_nodes, service, service_with, three_nodes, two_nodes};

fn violation(err: GraphError) -> Violation {
    match err {
        GraphError::Violation(violation) => violation,
        other => panic!("expected a violation, got: {other}"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Self Links
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn cyclic_rejects_self_link_by_default() {
    let service = service(Discipline::Cyclic);
    let a = service.create_node().await.unwrap();

    let err = violation(a.add_child(&a).await.unwrap_err());
    assert_eq!(err, Violation::SelfLink { node: a.id() });
}

#[tokio::test]
async fn cyclic_allows_self_link_when_configured() {
    let service = service_with(
        config_builder(Discipline::Cyclic)
            .allow_self_links(true)
            .allow_duplicate_edges(true)
            .build()
            .unwrap(),
    );
    let a = service.create_node().await.unwrap();

    let edge = a.add_child(&a).await.unwrap();
    assert_eq!(edge.parent, Some(a.id()));
    assert_eq!(edge.child, Some(a.id()));
}

#[tokio::test]
async fn self_link_is_a_duplicate_when_duplicates_are_disallowed() {
    // The duplicate check takes the parent's descendant set self-inclusive,
    // so a self link trips it even when self links are otherwise allowed.
    let service = service_with(
        config_builder(Discipline::Cyclic)
            .allow_self_links(true)
            .build()
            .unwrap(),
    );
    let a = service.create_node().await.unwrap();

    let err = violation(a.add_child(&a).await.unwrap_err());
    assert_eq!(
        err,
        Violation::DuplicateEdge {
            parent: a.id(),
            child: a.id()
        }
    );
}

#[tokio::test]
async fn dag_rejects_self_link_as_circularity_regardless_of_flag() {
    let service = service_with(
        config_builder(Discipline::Dag)
            .allow_self_links(true)
            .build()
            .unwrap(),
    );
    let a = service.create_node().await.unwrap();

    let err = violation(a.add_child(&a).await.unwrap_err());
    assert_eq!(
        err,
        Violation::Circularity {
            parent: a.id(),
            child: a.id()
        }
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Circularity
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn dag_rejects_edges_that_would_close_a_cycle() {
    let service = service(Discipline::Dag);
    let (a, b, c) = three_nodes(&service).await;

    a.add_child(&b).await.unwrap();
    b.add_child(&c).await.unwrap();

    // A is now an ancestor of C.
    let err = violation(c.add_child(&a).await.unwrap_err());
    assert_eq!(
        err,
        Violation::Circularity {
            parent: c.id(),
            child: a.id()
        }
    );

    assert_eq!(a.descendants().await.unwrap(), vec![b.id(), c.id()]);
    assert_eq!(
        a.self_and_descendants().await.unwrap(),
        vec![a.id(), b.id(), c.id()]
    );
}

#[tokio::test]
async fn dag_add_child_succeeds_iff_child_is_not_an_ancestor() {
    // With duplicates allowed, the only thing stopping an edge under DAG is
    // ancestry.
    let service = service_with(
        config_builder(Discipline::Dag)
            .allow_duplicate_edges(true)
            .build()
            .unwrap(),
    );
    let (x, y, z) = three_nodes(&service).await;

    x.add_child(&y).await.unwrap();
    y.add_child(&z).await.unwrap();

    // x -> z shortcuts an existing path but closes no cycle.
    x.add_child(&z).await.unwrap();
    // z -> x would close one.
    let err = violation(z.add_child(&x).await.unwrap_err());
    assert!(matches!(err, Violation::Circularity { .. }));
}

#[tokio::test]
async fn polytree_and_arborescence_compose_the_dag_checks() {
    for discipline in [Discipline::Polytree, Discipline::Arborescence] {
        let service = service(discipline);
        let (a, b, c) = three_nodes(&service).await;

        a.add_child(&b).await.unwrap();
        b.add_child(&c).await.unwrap();

        let err = violation(c.add_child(&a).await.unwrap_err());
        assert!(matches!(err, Violation::Circularity { .. }));
    }
}

#[tokio::test]
async fn cyclic_admits_cycles() {
    let service = service(Discipline::Cyclic);
    let (a, b) = two_nodes(&service).await;

    a.add_child(&b).await.unwrap();
    b.add_child(&a).await.unwrap();

    // The depth bound terminates traversal; the start node never echoes back.
    assert_eq!(a.descendants().await.unwrap(), vec![b.id()]);
    assert_eq!(b.descendants().await.unwrap(), vec![a.id()]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Duplicate Edges
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_edge_is_rejected_by_default() {
    let service = service(Discipline::Dag);
    let (a, b) = two_nodes(&service).await;

    a.add_child(&b).await.unwrap();
    let err = violation(a.add_child(&b).await.unwrap_err());
    assert_eq!(
        err,
        Violation::DuplicateEdge {
            parent: a.id(),
            child: b.id()
        }
    );
}

#[tokio::test]
async fn duplicate_edge_is_allowed_when_configured() {
    let service = service_with(
        config_builder(Discipline::Dag)
            .allow_duplicate_edges(true)
            .build()
            .unwrap(),
    );
    let (a, b) = two_nodes(&service).await;

    let first = a.add_child(&b).await.unwrap();
    let second = a.add_child(&b).await.unwrap();
    assert_ne!(first.id, second.id);

    // Two edges, one distinct child.
    assert_eq!(service.store().child_edge_count(a.id()).await.unwrap(), 2);
    assert_eq!(a.children().await.unwrap(), vec![b.id()]);
}

#[tokio::test]
async fn transitively_reachable_child_counts_as_duplicate() {
    let service = service(Discipline::Dag);
    let (a, b, c) = three_nodes(&service).await;

    a.add_child(&b).await.unwrap();
    b.add_child(&c).await.unwrap();

    // C is already a descendant of A through B.
    let err = violation(a.add_child(&c).await.unwrap_err());
    assert_eq!(
        err,
        Violation::DuplicateEdge {
            parent: a.id(),
            child: c.id()
        }
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Children Quantity
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn children_quantity_cap_is_enforced() {
    let service = service_with(
        config_builder(Discipline::Dag)
            .children_quantity_max(2)
            .build()
            .unwrap(),
    );
    let (a, b, c, d) = four_nodes(&service).await;

    a.add_child(&b).await.unwrap();
    a.add_child(&c).await.unwrap();

    let err = violation(a.add_child(&d).await.unwrap_err());
    assert_eq!(
        err,
        Violation::QuantityExceeded {
            parent: a.id(),
            max: 2
        }
    );

    // A node with one child is still below the cap.
    b.add_child(&d).await.unwrap();
    assert_eq!(b.children().await.unwrap(), vec![d.id()]);
}

#[tokio::test]
async fn unbounded_when_no_cap_is_configured() {
    let service = service(Discipline::Dag);
    let parent = service.create_node().await.unwrap();
    for _ in 0..10 {
        let child = service.create_node().await.unwrap();
        parent.add_child(&child).await.unwrap();
    }
    assert_eq!(parent.descendants_count().await.unwrap(), 10);
}
