mod common;

use common::{map_with_roads, route_cities};
use roadnet_lib::{Error, RoadMap, RouteLeg};

fn legs(triples: &[(u32, i32, &str)]) -> Vec<RouteLeg> {
    triples
        .iter()
        .map(|&(length, year, city)| RouteLeg::new(length, year, city))
        .collect()
}

#[test]
fn defining_a_route_creates_missing_cities_and_roads() {
    let mut map = RoadMap::new();
    map.define_route(
        42,
        "Lublin",
        &legs(&[(160, 1999, "Radom"), (100, 2004, "Warszawa")]),
    )
    .unwrap();

    assert_eq!(map.network().city_count(), 3);
    assert_eq!(map.network().segment_count(), 2);
    assert_eq!(map.describe_route(42), "42;Lublin;160;1999;Radom;100;2004;Warszawa");
    assert_eq!(route_cities(&map, 42), vec!["Lublin", "Radom", "Warszawa"]);
}

#[test]
fn existing_roads_are_reused_and_repaired() {
    let mut map = map_with_roads(&[("A", "B", 5, 1990)]);
    map.define_route(1, "B", &legs(&[(5, 2000, "A"), (3, 2001, "C")]))
        .unwrap();

    assert_eq!(map.network().segment_count(), 2);
    assert_eq!(map.describe_route(1), "1;B;5;2000;A;3;2001;C");
}

#[test]
fn invalid_definitions_leave_the_map_untouched() {
    let mut map = map_with_roads(&[("A", "B", 5, 2000)]);
    map.define_route(1, "A", &legs(&[(5, 2000, "B")])).unwrap();
    let before = map.clone();

    assert_eq!(
        map.define_route(1, "X", &legs(&[(1, 1, "Y")])),
        Err(Error::RouteExists { id: 1 })
    );
    assert_eq!(
        map.define_route(0, "X", &legs(&[(1, 1, "Y")])),
        Err(Error::InvalidRouteId { id: 0 })
    );
    assert_eq!(
        map.define_route(2, "X", &[]),
        Err(Error::RouteTooShort { route: 2 })
    );
    assert_eq!(
        map.define_route(2, "X", &legs(&[(1, 1, "Y"), (1, 1, "X")])),
        Err(Error::RouteHasLoop {
            route: 2,
            city: "X".to_string()
        })
    );
    assert_eq!(
        map.define_route(2, "X", &legs(&[(1, 1, "Y"), (0, 1, "Z")])),
        Err(Error::InvalidLength)
    );
    assert_eq!(
        map.define_route(2, "X", &legs(&[(1, 0, "Y")])),
        Err(Error::InvalidYear { year: 0 })
    );
    assert!(matches!(
        map.define_route(2, "X", &legs(&[(1, 1, "Y;Z")])),
        Err(Error::InvalidCityName { .. })
    ));
    assert_eq!(
        map.define_route(2, "X", &legs(&[(1, 1, "A"), (4, 2000, "B")])),
        Err(Error::SegmentLengthMismatch {
            a: "A".to_string(),
            b: "B".to_string(),
            existing: 5,
            requested: 4
        })
    );
    assert_eq!(
        map.define_route(2, "X", &legs(&[(1, 1, "A"), (5, 1999, "B")])),
        Err(Error::RepairYearTooOld {
            current: 2000,
            requested: 1999
        })
    );
    assert_eq!(map, before);
}
