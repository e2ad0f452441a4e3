use mmwave_path_engine::domain::reliability::success_probability;
use mmwave_path_engine::domain::routing::edge_weigher::{
    ETHERNET_DEFAULT_COST, EdgeWeigher, HopCountWeigher, INDIRECT_HOP_COST, ReliabilityWeigher, WeigherKind,
};
use mmwave_path_engine::domain::routing::path::Path;
use mmwave_path_engine::domain::routing::weight::Weight;
use mmwave_path_engine::domain::reliability::ReliabilityModel;
use mmwave_path_engine::domain::topology::connect_point::ConnectPoint;
use mmwave_path_engine::domain::topology::edge::{BANDWIDTH, Edge, LATENCY, LENGTH, LinkState, LinkType, Technology};
use mmwave_path_engine::domain::utils::id::DeviceId;

fn link(src: &str, dst: &str) -> Edge {
    Edge::new(ConnectPoint::new(DeviceId::new(src), 1), ConnectPoint::new(DeviceId::new(dst), 2))
}

fn mmwave(src: &str, dst: &str, length: impl ToString) -> Edge {
    link(src, dst).with_technology(Technology::MmWave).with_annotation(LENGTH, length)
}

#[test]
fn test_mmwave_edge_costs_one_plus_inverse_ps() {
    let weigher = ReliabilityWeigher::default();
    let expected = 1.0 + 1.0 / success_probability(50.0).unwrap();

    assert_eq!(weigher.weight(&mmwave("of:1", "of:2", 50)), Weight::new(expected));
    assert_eq!(weigher.weight(&mmwave("of:1", "of:2", 1)), Weight::new(2.0));
}

#[test]
fn test_conventional_edge_costs_ethernet_default() {
    let weigher = ReliabilityWeigher::default();

    assert_eq!(weigher.weight(&link("of:1", "of:2")), Weight::new(ETHERNET_DEFAULT_COST));
    assert_eq!(weigher.weight(&link("of:1", "of:2").with_type(LinkType::Edge)), Weight::new(101.0));
    // Bandwidth alone does not make a link millimeter-wave.
    assert_eq!(weigher.weight(&link("of:1", "of:2").with_annotation(BANDWIDTH, 500)), Weight::new(101.0));
}

#[test]
fn test_worked_example_two_hop_total() {
    let weigher = ReliabilityWeigher::default();
    let path = Path::from_edges(vec![mmwave("of:1", "of:2", 50), link("of:2", "of:3")], &weigher).unwrap();

    let expected = 1.0 + 1.0 / 0.0008222810887075216 + 101.0;
    assert!((path.cost().value() - expected).abs() <= expected * 1e-9);
    assert!((path.cost().value() - 1318.1291482111315).abs() < 1e-6);
}

#[test]
fn test_excluded_edges_are_non_viable() {
    let weigher = ReliabilityWeigher::default();

    assert_eq!(weigher.weight(&mmwave("of:1", "of:2", 10).with_state(LinkState::Inactive)), Weight::NON_VIABLE);
    assert_eq!(weigher.weight(&link("of:1", "of:2").with_type(LinkType::Optical)), Weight::NON_VIABLE);
    assert_eq!(HopCountWeigher.weight(&link("of:1", "of:2").with_state(LinkState::Inactive)), Weight::NON_VIABLE);
    assert_eq!(HopCountWeigher.weight(&link("of:1", "of:2").with_type(LinkType::Optical)), Weight::NON_VIABLE);
}

#[test]
fn test_malformed_or_rejected_length_is_non_viable() {
    let weigher = ReliabilityWeigher::default();

    assert_eq!(weigher.weight(&mmwave("of:1", "of:2", "far")), Weight::NON_VIABLE);
    assert_eq!(weigher.weight(&mmwave("of:1", "of:2", -3)), Weight::NON_VIABLE);
    assert_eq!(weigher.weight(&mmwave("of:1", "of:2", 0)), Weight::NON_VIABLE);
}

#[test]
fn test_malformed_latency_or_bandwidth_is_non_viable() {
    let weigher = ReliabilityWeigher::default();
    let negative_latency = mmwave("of:1", "of:2", 10).with_annotation(LATENCY, -50);
    let garbage_bandwidth = link("of:1", "of:2").with_annotation(BANDWIDTH, "garbage");
    let infinite_latency = link("of:1", "of:2").with_annotation(LATENCY, "inf");

    for edge in [&negative_latency, &garbage_bandwidth, &infinite_latency] {
        assert_eq!(weigher.weight(edge), Weight::NON_VIABLE);
        assert_eq!(HopCountWeigher.weight(edge), Weight::NON_VIABLE);
    }

    let zero_latency = mmwave("of:1", "of:2", 10).with_annotation(LATENCY, 0).with_annotation(BANDWIDTH, 1000);
    assert!(weigher.weight(&zero_latency).is_viable());
}

#[test]
fn test_vanishing_ps_is_non_viable() {
    // Ps underflows to zero for very long links.
    let weigher = ReliabilityWeigher::default();
    assert_eq!(success_probability(1e9), Ok(0.0));
    assert_eq!(weigher.weight(&mmwave("of:1", "of:2", 1e9)), Weight::NON_VIABLE);
}

#[test]
fn test_hop_count_weigher() {
    assert_eq!(HopCountWeigher.weight(&mmwave("of:1", "of:2", 50)), Weight::new(1.0));
    assert_eq!(HopCountWeigher.weight(&link("of:1", "of:2").with_type(LinkType::Indirect)), Weight::new(INDIRECT_HOP_COST));
    assert_eq!(INDIRECT_HOP_COST, 32767.0);
}

#[test]
fn test_weigher_kind_follows_request_flag() {
    let model = ReliabilityModel::default();
    let edge = mmwave("of:1", "of:2", 10);

    assert_eq!(WeigherKind::select(false, model).weight(&edge), Weight::new(1.0));
    assert_eq!(WeigherKind::select(true, model).weight(&edge), ReliabilityWeigher::new(model).weight(&edge));
    assert_eq!(WeigherKind::select(true, model).initial_weight(), Weight::INITIAL);
}
