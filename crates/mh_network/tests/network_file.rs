// crates/mh_network/tests/network_file.rs

//! 管网 JSON 文件读写测试

use mh_foundation::MhError;
use mh_network::{BoundaryNodeData, Compartment, CompartmentKind, Network, Node, NodeKind};

#[test]
fn test_load_hand_written_network() {
    let json = r#"{
        "nodes": [
            { "name": "Node1" },
            { "name": "MH1", "kind": { "manhole": { "compartments": [
                { "name": "C1" },
                { "name": "C2", "kind": { "outlet": { "surface_water_level": 1.25 } } }
            ] } } }
        ],
        "boundary_conditions": [
            { "node_name": "Node1" },
            { "node_name": "MH1", "data_type": "water_level_constant", "water_level": 3.0 }
        ]
    }"#;

    let network = Network::from_json_str(json).unwrap();
    assert_eq!(network.nodes.len(), 2);
    assert_eq!(network.nodes[0].kind, NodeKind::Plain);

    let mh = network.node("MH1").unwrap();
    assert_eq!(mh.compartments()[0].kind, CompartmentKind::Plain);
    assert_eq!(mh.outlet_index(), Some(1));
    assert_eq!(mh.outlet().unwrap().surface_water_level(), Some(1.25));

    let bc = network.boundary("MH1").unwrap();
    assert!((bc.water_level - 3.0).abs() < 1e-10);
    assert!(network.lateral_sources.is_empty());
}

#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("network.json");

    let mut network = Network::new();
    network.add_node(Node::manhole("MH1", vec![Compartment::plain("C1")]));
    network.add_boundary(BoundaryNodeData::new("MH1"));
    network.save_to_file(&path).unwrap();

    let reloaded = Network::from_file(&path).unwrap();
    assert_eq!(reloaded, network);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Network::from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, MhError::FileNotFound { .. }));
}

#[test]
fn test_malformed_json() {
    let err = Network::from_json_str("{ nodes: ").unwrap_err();
    assert!(matches!(err, MhError::Serialization { .. }));
}
