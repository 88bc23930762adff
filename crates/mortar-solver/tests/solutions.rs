// End-to-end checks against the reference map: locked regression vectors,
// output ranges over the whole map, and the elevation/range relationship.

use mortar_solver::{
    CalculatorConfig, FiringSolution, MapPoint, SolutionCalculator, SolverError,
};

fn reference() -> SolutionCalculator {
    SolutionCalculator::new(CalculatorConfig::default()).unwrap()
}

fn solve(id: &str, x: f64, y: f64) -> FiringSolution {
    reference().compute_solution(id, x, y).unwrap()
}

fn tuple(s: FiringSolution) -> (u16, u16, f64, f64) {
    (s.azimuth_deg, s.elevation_deg, s.distance, s.time_of_flight_s)
}

#[test]
fn locked_regression_vectors() {
    // (launch, target) -> (azimuth, elevation, distance, tof)
    let cases = [
        ("b2", (477.0, 64.0), (0, 85, 0.0, 0.0)),
        ("b2", (477.0, 164.0), (0, 81, 100.0, 0.9)),
        ("b2", (477.0, 14.0), (180, 83, 50.0, 0.5)),
        ("b2", (666.0, 64.0), (90, 77, 189.0, 1.7)),
        ("b2", (377.0, 64.0), (270, 81, 100.0, 0.9)),
        ("b2", (580.0, 316.0), (22, 74, 272.0, 2.3)),
        ("b3", (0.0, 573.0), (307, 50, 838.0, 4.7)),
        ("d3", (1000.0, 100.0), (117, 65, 472.0, 3.5)),
        ("b2", (1477.0, 64.0), (90, 45, 1000.0, 5.0)),
        ("b2", (500.5, 80.25), (55, 84, 29.0, 0.3)),
    ];

    for (id, (x, y), expected) in cases {
        assert_eq!(tuple(solve(id, x, y)), expected, "{id} -> ({x}, {y})");
    }
}

#[test]
fn unknown_launch_point_produces_no_solution() {
    let err = reference().compute_solution("nonexistent", 0.0, 0.0).unwrap_err();
    assert_eq!(err, SolverError::UnknownLaunchPoint { id: "nonexistent".into() });
    assert_eq!(err.to_string(), "launch point `nonexistent` not found");
}

#[test]
fn outputs_stay_in_range_across_the_map() {
    let calc = reference();
    let config = CalculatorConfig::default();

    for launch in calc.registry() {
        let mut y = -100.0;
        while y <= config.map.height + 100.0 {
            let mut x = -100.0;
            while x <= config.map.width + 100.0 {
                let s = calc.compute_solution(&launch.id, x, y).unwrap();
                assert!(s.azimuth_deg < 360, "azimuth {} at ({x}, {y})", s.azimuth_deg);
                assert!((45..=85).contains(&s.elevation_deg));
                assert!(s.distance >= 0.0 && s.distance.fract() == 0.0);
                assert!(s.time_of_flight_s >= 0.0);
                // exactly one decimal digit
                let tenths = s.time_of_flight_s * 10.0;
                assert!((tenths - tenths.round()).abs() < 1e-9);
                x += 13.7;
            }
            y += 11.3;
        }
    }
}

#[test]
fn elevation_falls_with_range_then_clamps() {
    let calc = reference();
    let launch = MapPoint::new(477.0, 64.0);
    let max_range = calc.max_range();

    let mut last = calc.solve_from(launch, launch).elevation_deg;
    assert_eq!(last, 85);

    let mut d = 0.0;
    while d <= max_range + 300.0 {
        let e = calc.solve_from(launch, MapPoint::new(launch.x + d, launch.y)).elevation_deg;
        assert!(e <= last, "elevation rose at distance {d}");
        if d >= max_range {
            assert_eq!(e, 45);
        }
        last = e;
        d += 2.5;
    }
}

#[test]
fn solution_direction_matches_compass() {
    let s = solve("b2", 580.0, 316.0);
    assert_eq!(s.compass().label(), "N");
    let s = solve("b3", 0.0, 573.0);
    assert_eq!(s.compass().label(), "NW");
}
