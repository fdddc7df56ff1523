use stl_gtfs_rules::config::AgencyConfig;
use stl_gtfs_rules::direction::Direction;
use stl_gtfs_rules::gtfs::{GCalendarDate, GRoute, GStop, GTrip};
use stl_gtfs_rules::{LavalStlBusRules, RecordProcessor, RuleError};

fn stl() -> RecordProcessor<LavalStlBusRules> {
    RecordProcessor::new(LavalStlBusRules::new(&AgencyConfig::default()).expect("default config"))
}

fn route(route_id: &str, long_name: &str) -> GRoute {
    GRoute {
        route_id: route_id.to_string(),
        route_short_name: "12".to_string(),
        route_long_name: long_name.to_string(),
    }
}

fn trip(route_id: &str, headsign: &str) -> GTrip {
    GTrip {
        route_id: route_id.to_string(),
        trip_headsign: headsign.to_string(),
    }
}

#[test]
fn test_batches_of_one_route_merge() {
    let processor = stl();
    let routes = ["JANV2412E", "JANV2412O", "OCTO2512E"]
        .iter()
        .map(|id| processor.process_route(&route(id, "boul. Ste-Rose")).unwrap())
        .collect::<Vec<_>>();

    assert!(routes.iter().all(|r| r.id == "12"));
    assert!(routes.iter().all(|r| r.long_name == "Boulevard Sainte-Rose"));

    let merged = processor.merge_routes(routes).unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].original_id, "JANV2412E");
}

#[test]
fn test_stop_end_to_end() {
    let stop = stl()
        .process_stop(&GStop {
            stop_id: "JANV24CP12345".to_string(),
            stop_code: "12345".to_string(),
            stop_name: "Boulevard Curé-Labelle / Face à l'école [12345]".to_string(),
        })
        .unwrap();

    assert_eq!(stop.id, 12345);
    assert_eq!(stop.original_id, "CP12345");
    assert_eq!(stop.code, "12345");
    assert_eq!(stop.name, "Boulevard Curé-Labelle / L'École");
}

#[test]
fn test_stop_without_numeric_code_is_rejected() {
    let result = stl().process_stop(&GStop {
        stop_id: "JANV24CP12345".to_string(),
        stop_code: "CP12345".to_string(),
        stop_name: "Gare".to_string(),
    });
    assert!(matches!(result, Err(RuleError::Format { field: "stop_code", .. })));
}

#[test]
fn test_trip_without_headsign_uses_direction() {
    let cleaned = stl().process_trip(&trip("JANV2412O", "")).unwrap();
    assert_eq!(cleaned.route_id, "12");
    assert_eq!(cleaned.headsign, "O");
    assert_eq!(cleaned.direction, Some(Direction::West));
}

#[test]
fn test_trip_headsign_is_cleaned() {
    let cleaned = stl()
        .process_trip(&trip("JANV2412N", "vers Terminus Le Carrefour"))
        .unwrap();
    assert_eq!(cleaned.headsign, "Terminus le Carrefour");
    assert_eq!(cleaned.direction, Some(Direction::North));
}

#[test]
fn test_trip_with_unknown_direction_is_rejected() {
    let result = stl().process_trip(&trip("JANV2412W", "Terminus"));
    assert!(matches!(result, Err(RuleError::PolicyViolation { .. })));
}

#[test]
fn test_calendar_exceptions() {
    let processor = stl();
    let accepted = |service_id: &str, date: &str| {
        processor.accept_calendar_date(&GCalendarDate::parse(service_id, date).unwrap())
    };

    assert!(!accepted("OCTO25SEM", "20251116"));
    assert!(!accepted("OCTO25DIM", "20251130"));
    assert!(accepted("OCTO25SAM", "20251115"));
    assert!(accepted("OCTO25SEM", "20251114"));
    assert!(accepted("JANV26SEM", "20260105"));
}

#[test]
fn test_config_file_retires_calendar_workaround() {
    let config = AgencyConfig::from_json(r#"{"duplicate_services": null}"#).unwrap();
    let processor = RecordProcessor::new(LavalStlBusRules::new(&config).unwrap());

    let date = GCalendarDate::parse("OCTO25SEM", "20251116").unwrap();
    assert!(processor.accept_calendar_date(&date));
}

#[test]
fn test_stop_name_with_feed_whitespace_is_stable() {
    let processor = stl();
    let raw = GStop {
        stop_id: "JANV24CP43210".to_string(),
        stop_code: "43210".to_string(),
        stop_name: "Dagenais\tface\u{a0}à la pharmacie [43210]".to_string(),
    };

    let stop = processor.process_stop(&raw).unwrap();
    assert_eq!(stop.name, "Dagenais la Pharmacie");

    let again = processor
        .process_stop(&GStop {
            stop_name: stop.name.clone(),
            ..raw
        })
        .unwrap();
    assert_eq!(again.name, stop.name);
}
