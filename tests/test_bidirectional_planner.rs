use mmwave_path_engine::api::topology_dto::{AnnotationValueDto, HostDto, LinkDto, TopologyDto};
use mmwave_path_engine::domain::constraint::ConstraintPipeline;
use mmwave_path_engine::domain::request::PathRequest;
use mmwave_path_engine::domain::routing::edge_weigher::{HopCountWeigher, ReliabilityWeigher};
use mmwave_path_engine::domain::selection::{BidirectionalPlanner, NotFoundReason, PathSelector, Plan};
use mmwave_path_engine::domain::topology::connect_point::{ConnectPoint, ElementId};
use mmwave_path_engine::domain::topology::graph::TopologyGraph;
use mmwave_path_engine::domain::utils::id::{DeviceId, HostId};

fn device(id: &str) -> ElementId {
    ElementId::Device(DeviceId::new(id))
}

fn host(id: &str) -> ElementId {
    ElementId::Host(HostId::new(id))
}

fn link(src: &str, dst: &str, bidirectional: bool) -> LinkDto {
    LinkDto { src: src.to_string(), dst: dst.to_string(), bidirectional, ..Default::default() }
}

fn mmwave(src: &str, dst: &str, length: f64, bidirectional: bool) -> LinkDto {
    LinkDto {
        technology: Some("mmwave".to_string()),
        length: Some(AnnotationValueDto::Number(length)),
        ..link(src, dst, bidirectional)
    }
}

/// Forward direction prefers the millimeter-wave detour through of:3, which has no return links.
/// The way back is the direct Ethernet link only.
fn create_one_way_detour() -> TopologyGraph {
    let dto = TopologyDto {
        devices: vec!["of:1".to_string(), "of:2".to_string(), "of:3".to_string()],
        hosts: vec![
            HostDto { id: "h1".to_string(), location: "of:1/10".to_string() },
            HostDto { id: "h2".to_string(), location: "of:2/10".to_string() },
        ],
        links: vec![
            link("of:1/1", "of:2/1", true),
            mmwave("of:1/2", "of:3/1", 5.0, false),
            mmwave("of:3/2", "of:2/2", 5.0, false),
        ],
    };
    TopologyGraph::try_from(dto).unwrap()
}

#[test]
fn test_same_endpoint_yields_empty_plan() {
    let graph = create_one_way_detour();
    let planner = BidirectionalPlanner::new(PathSelector::new(&graph, &HopCountWeigher), 5);

    assert_eq!(planner.plan(&host("h1"), &host("h1"), &ConstraintPipeline::default(), false), Ok(Plan::Empty));
}

#[test]
fn test_symmetric_plan_mirrors_forward_path() {
    let graph = create_one_way_detour();
    let weigher = ReliabilityWeigher::default();
    let planner = BidirectionalPlanner::new(PathSelector::new(&graph, &weigher), 5);

    let Plan::Routed(paths) = planner.plan(&host("h1"), &host("h2"), &ConstraintPipeline::default(), false).unwrap() else {
        panic!("expected a routed plan");
    };

    assert!(!paths.asymmetric);
    assert_eq!(paths.forward.len(), 4);
    assert_eq!(paths.reverse.len(), paths.forward.len());
    assert_eq!(paths.reverse.cost(), paths.forward.cost());
    // Mirrored blindly, even though of:3 has no return links in the snapshot.
    assert_eq!(paths.reverse.vertices()[2], &device("of:3"));
    for (reverse, forward) in paths.reverse.edges().iter().zip(paths.forward.edges().iter().rev()) {
        assert_eq!(reverse.src, forward.dst);
        assert_eq!(reverse.dst, forward.src);
        assert_eq!(reverse.annotations, forward.annotations);
    }
}

#[test]
fn test_asymmetric_plan_searches_reverse_direction() {
    let graph = create_one_way_detour();
    let weigher = ReliabilityWeigher::default();
    let planner = BidirectionalPlanner::new(PathSelector::new(&graph, &weigher), 5);

    let Plan::Routed(paths) = planner.plan(&host("h1"), &host("h2"), &ConstraintPipeline::default(), true).unwrap() else {
        panic!("expected a routed plan");
    };

    assert!(paths.asymmetric);
    assert_eq!(paths.forward.len(), 4);
    assert_eq!(paths.reverse.len(), 3);
    assert_eq!(paths.reverse.src().element, host("h2"));
    assert_eq!(paths.reverse.dst().element, host("h1"));
}

#[test]
fn test_forward_failure_is_reported_with_reason() {
    let graph = create_one_way_detour();
    let planner = BidirectionalPlanner::new(PathSelector::new(&graph, &HopCountWeigher), 5);
    let constraints = PathRequest { packet_loss_ceiling: 0.0, ..Default::default() }.constraints();

    let plan = planner.plan(&host("h1"), &host("h2"), &constraints, false).unwrap();
    assert_eq!(plan, Plan::NotFound { src: host("h1"), dst: host("h2"), reason: NotFoundReason::ConstraintViolated { candidates: 2 } });

    let islands = TopologyGraph::try_from(TopologyDto { devices: vec!["of:1".to_string(), "of:2".to_string()], ..Default::default() }).unwrap();
    let planner = BidirectionalPlanner::new(PathSelector::new(&islands, &HopCountWeigher), 5);
    let plan = planner.plan(&device("of:1"), &device("of:2"), &ConstraintPipeline::default(), false).unwrap();
    assert_eq!(plan, Plan::NotFound { src: device("of:1"), dst: device("of:2"), reason: NotFoundReason::Disconnected });
}

#[test]
fn test_link_collections_for_both_directions() {
    let graph = create_one_way_detour();
    let weigher = ReliabilityWeigher::default();
    let planner = BidirectionalPlanner::new(PathSelector::new(&graph, &weigher), 5);

    let Plan::Routed(paths) = planner.plan(&host("h1"), &host("h2"), &ConstraintPipeline::default(), false).unwrap() else {
        panic!("expected a routed plan");
    };
    let (forward, reverse) = paths.link_collections().unwrap();

    assert_eq!(forward.ingress, ConnectPoint::new(DeviceId::new("of:1"), 10));
    assert_eq!(forward.egress, ConnectPoint::new(DeviceId::new("of:2"), 10));
    assert_eq!(forward.links.len(), 2);
    assert_eq!(reverse.ingress, ConnectPoint::new(DeviceId::new("of:2"), 10));
    assert_eq!(reverse.egress, ConnectPoint::new(DeviceId::new("of:1"), 10));
    assert_eq!(reverse.one, host("h2"));
}

#[test]
fn test_parallel_requests_share_one_snapshot() {
    let graph = create_one_way_detour();
    let weigher = ReliabilityWeigher::default();
    let planner = BidirectionalPlanner::new(PathSelector::new(&graph, &weigher), 5);
    let constraints = ConstraintPipeline::default();

    let expected = planner.plan(&host("h1"), &host("h2"), &constraints, false).unwrap();

    let plans: Vec<Plan> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let (planner, constraints) = (&planner, &constraints);
                scope.spawn(move || planner.plan(&host("h1"), &host("h2"), constraints, i % 2 == 1).unwrap())
            })
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    for (i, plan) in plans.iter().enumerate() {
        match plan {
            Plan::Routed(paths) if i % 2 == 1 => assert_eq!(paths.reverse.len(), 3),
            _ => assert_eq!(plan, &expected),
        }
    }
}
