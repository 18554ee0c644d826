//! Tests for the edge mutation API.
//!
//! These tests verify:
//! - single and bulk attach, in input order, without rollback
//! - the parent-side symmetry of `add_parent(s)`
//! - removal semantics, including the soft failures
//! - mutation event emission
//! - the scope context defaulting an edge's owning graph


use directed_core::discipline::Discipline;
use directed_graph::hooks::MutationEvent;
use test_utils::{EventLog, config, four_nodes, service, three_nodes, two_nodes};

// ─────────────────────────────────────────────────────────────────────────────
// Attach
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_child_returns_the_created_edge() {
    let service = service(Discipline::Dag);
    let (a, b) = two_nodes(&service).await;

    let edge = a.add_child(&b).await.unwrap();
    assert_eq!(edge.parent, Some(a.id()));
    assert_eq!(edge.child, Some(b.id()));
    assert_eq!(edge.graph, None);
    assert_eq!(edge.weight, 1);

    let stored = service.store().get_edge(&edge.id).await.unwrap().unwrap();
    assert_eq!(stored, edge);
}

#[tokio::test]
async fn add_children_preserves_input_order() {
    let service = service(Discipline::Dag);
    let (a, b, c, d) = four_nodes(&service).await;

    let edges = a
        .add_children(&[d.clone(), b.clone(), c.clone()])
        .await
        .unwrap();
    let children: Vec<_> = edges.iter().map(|edge| edge.child).collect();
    assert_eq!(children, vec![Some(d.id()), Some(b.id()), Some(c.id())]);
}

#[tokio::test]
async fn add_children_does_not_roll_back_prior_successes() {
    let service = service(Discipline::Dag);
    let (a, b, c) = three_nodes(&service).await;
    a.add_child(&b).await.unwrap();

    // c attaches, then a fails the circularity check; c stays attached.
    let result = b.add_children(&[c.clone(), a.clone()]).await;
    assert!(result.is_err());
    assert_eq!(b.children().await.unwrap(), vec![c.id()]);
}

#[tokio::test]
async fn add_parent_is_the_mirror_of_add_child() {
    let service = service(Discipline::Dag);
    let (a, b, c) = three_nodes(&service).await;

    let edge = b.add_parent(&a).await.unwrap();
    assert_eq!(edge.parent, Some(a.id()));
    assert_eq!(edge.child, Some(b.id()));

    let edges = c.add_parents(&[a.clone(), b.clone()]).await.unwrap();
    assert_eq!(edges[0].parent, Some(a.id()));
    assert_eq!(edges[1].parent, Some(b.id()));
    assert_eq!(c.parents().await.unwrap(), vec![a.id(), b.id()]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Remove
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn remove_child_deletes_the_edge_and_keeps_the_node() {
    let service = service(Discipline::Dag);
    let (a, b) = two_nodes(&service).await;
    a.add_child(&b).await.unwrap();

    assert!(a.remove_child(&b, false).await.unwrap());
    assert!(a.children().await.unwrap().is_empty());
    // B remains queryable.
    assert!(service.store().get_node(b.id()).await.unwrap().is_some());
}

#[tokio::test]
async fn remove_child_optionally_deletes_the_node() {
    let service = service(Discipline::Dag);
    let (a, b) = two_nodes(&service).await;
    a.add_child(&b).await.unwrap();

    assert!(a.remove_child(&b, true).await.unwrap());
    assert!(service.store().get_node(b.id()).await.unwrap().is_none());
}

#[tokio::test]
async fn remove_child_on_a_non_child_is_a_soft_failure() {
    let service = service(Discipline::Dag);
    let (a, b) = two_nodes(&service).await;

    let log = EventLog::attach(&service);
    assert!(!a.remove_child(&b, false).await.unwrap());
    assert!(log.is_empty(), "no event for a no-op removal");
}

#[tokio::test]
async fn remove_children_with_explicit_targets() {
    let service = service(Discipline::Dag);
    let (a, b, c, d) = four_nodes(&service).await;
    a.add_children(&[b.clone(), c.clone(), d.clone()])
        .await
        .unwrap();

    assert!(
        a.remove_children(Some(vec![b.clone(), c.clone()]), false, false)
            .await
            .unwrap()
    );
    assert_eq!(a.children().await.unwrap(), vec![d.id()]);
}

#[tokio::test]
async fn remove_children_remove_all() {
    let service = service(Discipline::Dag);
    let (a, b, c) = three_nodes(&service).await;
    a.add_children(&[b.clone(), c.clone()]).await.unwrap();

    assert!(a.remove_children(None, true, false).await.unwrap());
    assert!(a.children().await.unwrap().is_empty());
    // Nodes survive unless delete_nodes is set.
    assert!(service.store().get_node(b.id()).await.unwrap().is_some());
}

#[tokio::test]
async fn remove_children_with_neither_argument_is_a_logged_no_op() {
    let service = service(Discipline::Dag);
    let (a, b) = two_nodes(&service).await;
    a.add_child(&b).await.unwrap();

    let log = EventLog::attach(&service);
    assert!(!a.remove_children(None, false, false).await.unwrap());
    assert_eq!(a.children().await.unwrap(), vec![b.id()]);
    assert!(log.is_empty());
}

#[tokio::test]
async fn remove_children_can_delete_the_nodes() {
    let service = service(Discipline::Dag);
    let (a, b, c) = three_nodes(&service).await;
    a.add_children(&[b.clone(), c.clone()]).await.unwrap();

    assert!(a.remove_children(None, true, true).await.unwrap());
    assert!(service.store().get_node(b.id()).await.unwrap().is_none());
    assert!(service.store().get_node(c.id()).await.unwrap().is_none());
}

// ─────────────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn successful_mutations_emit_events() {
    let service = service(Discipline::Dag);
    let (a, b) = two_nodes(&service).await;
    let log = EventLog::attach(&service);

    a.add_child(&b).await.unwrap();
    a.remove_child(&b, false).await.unwrap();

    let graph = config(Discipline::Dag).graph_fullname().clone();
    assert_eq!(
        log.events(),
        vec![
            MutationEvent::ChildAdded {
                parent: a.id(),
                child: b.id(),
                graph: graph.clone(),
            },
            MutationEvent::ChildRemoved {
                parent: a.id(),
                child: b.id(),
                graph,
            },
        ]
    );
}

#[tokio::test]
async fn rejected_mutations_emit_nothing() {
    let service = service(Discipline::Dag);
    let a = service.create_node().await.unwrap();
    let log = EventLog::attach(&service);

    assert!(a.add_child(&a).await.is_err());
    assert!(log.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Scope Context
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn edges_default_to_the_scoped_graph() {
    let service = service(Discipline::Dag);
    let graph = service.create_graph().await.unwrap();
    let (a, b, c) = three_nodes(&service).await;

    {
        let _guard = graph.enter();
        let edge = a.add_child(&b).await.unwrap();
        assert_eq!(edge.graph, Some(graph.id()));
    }

    // Outside the scope the edge has no owner.
    let edge = a.add_child(&c).await.unwrap();
    assert_eq!(edge.graph, None);
    assert_eq!(graph.edge_count().await.unwrap(), 1);
}

#[tokio::test]
async fn nested_graph_scopes_stack() {
    let service = service(Discipline::Dag);
    let outer = service.create_graph().await.unwrap();
    let inner = service.create_graph().await.unwrap();
    let (a, b, c) = three_nodes(&service).await;

    let _outer_guard = outer.enter();
    {
        let _inner_guard = inner.enter();
        let edge = a.add_child(&b).await.unwrap();
        assert_eq!(edge.graph, Some(inner.id()));
    }
    let edge = a.add_child(&c).await.unwrap();
    assert_eq!(edge.graph, Some(outer.id()));
}

#[tokio::test]
async fn scoped_views_are_isolated() {
    use directed_core::scope::GraphScope;
    use std::sync::Arc;

    let service = service(Discipline::Dag);
    let graph = service.create_graph().await.unwrap();
    let other_view = service.scoped(Arc::new(GraphScope::new()));
    let (a, b) = two_nodes(&service).await;

    let _guard = graph.enter();
    // The sibling view shares the store but not the binding.
    assert_eq!(service.current_graph(), Some(graph.id()));
    assert_eq!(other_view.current_graph(), None);

    let edge = other_view.node(a.id()).add_child(&other_view.node(b.id())).await.unwrap();
    assert_eq!(edge.graph, None);
}
