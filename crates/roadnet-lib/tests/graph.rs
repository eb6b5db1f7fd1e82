use roadnet_lib::{Error, RoadNetwork};

#[test]
fn find_segment_is_symmetric() {
    let mut network = RoadNetwork::new();
    let a = network.add_city("Alpha").unwrap();
    let b = network.add_city("Beta").unwrap();
    let c = network.add_city("Gamma").unwrap();
    let ab = network.add_segment(a, b, 7, 1990).unwrap();

    assert_eq!(network.find_segment(a, b), Some(ab));
    assert_eq!(network.find_segment(b, a), Some(ab));
    assert_eq!(network.find_segment(a, c), None);

    let segment = network.segment(ab).unwrap();
    assert!(segment.connects(b, a));
    assert_eq!(segment.other_end(a), Some(b));
    assert_eq!(segment.other_end(c), None);
}

#[test]
fn duplicate_segments_are_rejected_in_either_order() {
    let mut network = RoadNetwork::new();
    let a = network.add_city("A").unwrap();
    let b = network.add_city("B").unwrap();
    network.add_segment(a, b, 1, 1).unwrap();

    let err = network.add_segment(b, a, 2, 2).unwrap_err();
    assert!(matches!(err, Error::DuplicateSegment { .. }));
    assert_eq!(network.segment_count(), 1);
}

#[test]
fn invalid_segments_are_rejected() {
    let mut network = RoadNetwork::new();
    let a = network.add_city("A").unwrap();
    let b = network.add_city("B").unwrap();

    assert!(matches!(
        network.add_segment(a, a, 1, 1),
        Err(Error::IdenticalEndpoints { .. })
    ));
    assert_eq!(network.add_segment(a, b, 0, 1), Err(Error::InvalidLength));
    assert_eq!(
        network.add_segment(a, b, 1, 0),
        Err(Error::InvalidYear { year: 0 })
    );
    assert_eq!(network.segment_count(), 0);
}

#[test]
fn cities_are_unique_and_validated() {
    let mut network = RoadNetwork::new();
    network.add_city("Kraków").unwrap();

    assert!(matches!(
        network.add_city("Kraków"),
        Err(Error::DuplicateCity { .. })
    ));
    assert!(matches!(
        network.add_city("bad;name"),
        Err(Error::InvalidCityName { .. })
    ));
    assert_eq!(network.city_count(), 1);

    network.add_city("Łódź").unwrap();
    let names: Vec<&str> = network.cities().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Kraków", "Łódź"]);
}

#[test]
fn repairs_only_move_years_forward() {
    let mut network = RoadNetwork::new();
    let a = network.add_city("A").unwrap();
    let b = network.add_city("B").unwrap();
    let id = network.add_segment(a, b, 3, 2000).unwrap();

    assert_eq!(network.repair_segment(b, a, 2000), Ok(id));
    assert_eq!(network.repair_segment(a, b, 2010), Ok(id));
    assert_eq!(
        network.repair_segment(a, b, 2005),
        Err(Error::RepairYearTooOld {
            current: 2010,
            requested: 2005
        })
    );
    assert_eq!(
        network.repair_segment(a, b, 0),
        Err(Error::InvalidYear { year: 0 })
    );
    assert_eq!(network.segment(id).unwrap().year, 2010);
}

#[test]
fn removing_a_segment_detaches_both_endpoints() {
    let mut network = RoadNetwork::new();
    let a = network.add_city("A").unwrap();
    let b = network.add_city("B").unwrap();
    let id = network.add_segment(a, b, 3, 2000).unwrap();

    let removed = network.remove_segment(id).expect("segment exists");
    assert_eq!(removed.endpoints(), (a, b));
    assert_eq!(network.city(a).unwrap().degree(), 0);
    assert_eq!(network.city(b).unwrap().degree(), 0);
    assert_eq!(network.find_segment(a, b), None);
    assert!(network.remove_segment(id).is_none());
}

#[test]
fn unknown_city_suggests_close_names() {
    let mut network = RoadNetwork::new();
    network.add_city("Wroclaw").unwrap();
    network.add_city("Gdansk").unwrap();

    let err = network.require_city("Wroclav").unwrap_err();
    match &err {
        Error::UnknownCity { suggestions, .. } => {
            assert_eq!(suggestions, &vec!["Wroclaw".to_string()]);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(err.to_string().contains("Did you mean 'Wroclaw'?"));
}
