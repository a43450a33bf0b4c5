//! Scenario tests for the itinerary search.

use super::*;
use crate::domain::{Airport, Flight, FlightInfo, parse_local_datetime};
use crate::planner::connection::ConnectionRules;
use crate::planner::rank::compare_itineraries;
use chrono_tz::Tz;
use rust_decimal::Decimal;

fn code(s: &str) -> IataCode {
    IataCode::parse(s).unwrap()
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn airports() -> Vec<Airport> {
    let airport = |c: &str, city: &str, country: &str, tz: Tz| {
        Airport::new(code(c), format!("{city} International"), city, country, tz)
    };
    vec![
        airport("JFK", "New York", "US", chrono_tz::America::New_York),
        airport("BOS", "Boston", "US", chrono_tz::America::New_York),
        airport("ORD", "Chicago", "US", chrono_tz::America::Chicago),
        airport("DEN", "Denver", "US", chrono_tz::America::Denver),
        airport("LAX", "Los Angeles", "US", chrono_tz::America::Los_Angeles),
        airport("SEA", "Seattle", "US", chrono_tz::America::Los_Angeles),
        airport("LHR", "London", "GB", chrono_tz::Europe::London),
        airport("CDG", "Paris", "FR", chrono_tz::Europe::Paris),
        airport("SYD", "Sydney", "AU", chrono_tz::Australia::Sydney),
    ]
}

fn find(c: &str) -> Airport {
    airports().into_iter().find(|a| a.code == code(c)).unwrap()
}

/// Flight with local `YYYY-MM-DDTHH:MM` endpoints and a whole-dollar price.
fn flight(number: &str, from: &str, dep: &str, to: &str, arr: &str, price: i64) -> Flight {
    Flight::new(
        FlightInfo::new(number, "SkyPath Airways", "A320"),
        &find(from),
        parse_local_datetime(dep).unwrap(),
        &find(to),
        parse_local_datetime(arr).unwrap(),
        Decimal::new(price, 0),
    )
    .unwrap()
}

fn catalog(flights: Vec<Flight>) -> FlightCatalog {
    FlightCatalog::new(airports(), flights)
}

fn search(catalog: &FlightCatalog, from: &str, to: &str, date: NaiveDate) -> SearchResult {
    let config = SearchConfig::default();
    Planner::new(catalog, &config).search(&SearchRequest::new(code(from), code(to), date))
}

fn numbers(itinerary: &Itinerary) -> Vec<&str> {
    itinerary
        .segments()
        .iter()
        .map(|f| f.flight_number())
        .collect()
}

#[test]
fn direct_flight_found() {
    let catalog = catalog(vec![flight(
        "SP101",
        "JFK",
        "2024-03-15T08:30",
        "LAX",
        "2024-03-15T11:45",
        299,
    )]);

    let result = search(&catalog, "JFK", "LAX", date());

    assert_eq!(result.itineraries.len(), 1);
    let itinerary = &result.itineraries[0];
    assert!(itinerary.is_direct());
    assert_eq!(numbers(itinerary), vec!["SP101"]);
    // EDT to PDT is three hours; 3h15 on the clock is 6h15 elapsed
    assert_eq!(itinerary.total_duration_minutes(), 375);
    assert!(itinerary.layovers_minutes().is_empty());
    assert_eq!(itinerary.total_price(), Decimal::new(299, 0));
    assert!(result.paths_explored >= 1);
}

#[test]
fn sixty_minute_domestic_layover_is_found() {
    // BOS 07:00 EDT (11:00Z) -> ORD 08:30 CDT (13:30Z)
    // ORD 09:00 CDT leaves after 30 minutes; 09:30 CDT after 60
    let catalog = catalog(vec![
        flight("SP1", "BOS", "2024-03-15T07:00", "ORD", "2024-03-15T08:30", 150),
        flight("SP2", "ORD", "2024-03-15T09:00", "SEA", "2024-03-15T11:30", 180),
        flight("SP3", "ORD", "2024-03-15T09:30", "SEA", "2024-03-15T12:00", 200),
    ]);

    let result = search(&catalog, "BOS", "SEA", date());

    assert_eq!(result.itineraries.len(), 1);
    let itinerary = &result.itineraries[0];
    assert_eq!(numbers(itinerary), vec!["SP1", "SP3"]);
    assert_eq!(itinerary.layovers_minutes(), &[60]);
    // 11:00Z -> 19:00Z
    assert_eq!(itinerary.total_duration_minutes(), 480);
    assert_eq!(itinerary.total_price(), Decimal::new(350, 0));
}

#[test]
fn international_connection_needs_ninety_minutes() {
    // JFK 18:00 EDT (22:00Z) -> LHR 06:00 GMT next day
    let catalog = catalog(vec![
        flight("SP10", "JFK", "2024-03-15T18:00", "LHR", "2024-03-16T06:00", 500),
        flight("SP11", "LHR", "2024-03-16T07:00", "CDG", "2024-03-16T09:15", 90),
        flight("SP12", "LHR", "2024-03-16T07:30", "CDG", "2024-03-16T09:45", 110),
    ]);

    let result = search(&catalog, "JFK", "CDG", date());

    assert_eq!(result.itineraries.len(), 1);
    let itinerary = &result.itineraries[0];
    assert_eq!(numbers(itinerary), vec!["SP10", "SP12"]);
    assert_eq!(itinerary.layovers_minutes(), &[90]);
    // 22:00Z -> 08:45Z
    assert_eq!(itinerary.total_duration_minutes(), 645);
}

#[test]
fn date_line_crossing_uses_utc() {
    // SYD 10:00 AEDT is 23:00Z the day before; LAX 06:00 PDT is 13:00Z
    let catalog = catalog(vec![flight(
        "SP200",
        "SYD",
        "2024-03-15T10:00",
        "LAX",
        "2024-03-15T06:00",
        1200,
    )]);

    let result = search(&catalog, "SYD", "LAX", date());
    assert_eq!(result.itineraries.len(), 1);
    assert_eq!(result.itineraries[0].total_duration_minutes(), 840);

    // The query date is the origin's local date, not the UTC one
    let day_before = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
    assert!(search(&catalog, "SYD", "LAX", day_before).itineraries.is_empty());
}

#[test]
fn overnight_arrival_rolls_to_next_day() {
    // LAX 22:00 PDT (05:00Z) -> JFK 06:30 EDT (10:30Z)
    let catalog = catalog(vec![flight(
        "SP301",
        "LAX",
        "2024-03-15T22:00",
        "JFK",
        "2024-03-16T06:30",
        350,
    )]);

    let result = search(&catalog, "LAX", "JFK", date());
    assert_eq!(result.itineraries.len(), 1);
    assert_eq!(result.itineraries[0].total_duration_minutes(), 330);
}

#[test]
fn three_segment_itinerary() {
    // BOS 06:00 EDT (10:00Z) -> ORD -> DEN -> SEA 12:30 PDT (19:30Z)
    let catalog = catalog(vec![
        flight("SP1", "BOS", "2024-03-15T06:00", "ORD", "2024-03-15T07:30", 100),
        flight("SP2", "ORD", "2024-03-15T08:30", "DEN", "2024-03-15T10:00", 100),
        flight("SP3", "DEN", "2024-03-15T11:00", "SEA", "2024-03-15T12:30", 100),
    ]);

    let result = search(&catalog, "BOS", "SEA", date());
    assert_eq!(result.itineraries.len(), 1);
    let itinerary = &result.itineraries[0];
    assert_eq!(numbers(itinerary), vec!["SP1", "SP2", "SP3"]);
    assert_eq!(itinerary.stop_count(), 2);
    assert_eq!(itinerary.layovers_minutes(), &[60, 60]);
    assert_eq!(itinerary.total_duration_minutes(), 570);

    // With a two-segment cap the same route is out of reach
    let config = SearchConfig::new(45, 90, 360, 2);
    let capped = Planner::new(&catalog, &config)
        .search(&SearchRequest::new(code("BOS"), code("SEA"), date()));
    assert!(capped.itineraries.is_empty());
}

#[test]
fn results_ranked_by_duration_then_price_then_departure() {
    let catalog = catalog(vec![
        // All directs take 6h
        flight("DEAR", "JFK", "2024-03-15T08:00", "LAX", "2024-03-15T11:00", 300),
        flight("CHEAP-LATE", "JFK", "2024-03-15T14:00", "LAX", "2024-03-15T17:00", 200),
        flight("CHEAP-EARLY", "JFK", "2024-03-15T12:00", "LAX", "2024-03-15T15:00", 200),
        // 10:00Z -> 17:30Z via ORD, cheapest overall but slowest
        flight("VIA1", "JFK", "2024-03-15T06:00", "ORD", "2024-03-15T07:30", 50),
        flight("VIA2", "ORD", "2024-03-15T08:30", "LAX", "2024-03-15T10:30", 50),
    ]);

    let result = search(&catalog, "JFK", "LAX", date());

    let order: Vec<_> = result.itineraries.iter().map(numbers).collect();
    assert_eq!(
        order,
        vec![
            vec!["CHEAP-EARLY"],
            vec!["CHEAP-LATE"],
            vec!["DEAR"],
            vec!["VIA1", "VIA2"],
        ]
    );
}

#[test]
fn unknown_airport_is_empty_not_error() {
    let catalog = catalog(vec![flight(
        "SP101",
        "JFK",
        "2024-03-15T08:30",
        "LAX",
        "2024-03-15T11:45",
        299,
    )]);

    assert!(search(&catalog, "ZZZ", "LAX", date()).itineraries.is_empty());
    assert!(search(&catalog, "JFK", "ZZZ", date()).itineraries.is_empty());
}

#[test]
fn same_origin_and_destination_is_empty() {
    let catalog = catalog(vec![flight(
        "SP101",
        "JFK",
        "2024-03-15T08:30",
        "LAX",
        "2024-03-15T11:45",
        299,
    )]);

    let result = search(&catalog, "JFK", "JFK", date());
    assert!(result.itineraries.is_empty());
    assert_eq!(result.paths_explored, 0);
}

#[test]
fn no_flights_on_date_is_empty() {
    let catalog = catalog(vec![flight(
        "SP101",
        "JFK",
        "2024-03-15T08:30",
        "LAX",
        "2024-03-15T11:45",
        299,
    )]);

    let other = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();
    assert!(search(&catalog, "JFK", "LAX", other).itineraries.is_empty());
    assert!(search(&FlightCatalog::empty(), "JFK", "LAX", date()).itineraries.is_empty());
}

#[test]
fn enumerate_yields_unranked_candidates() {
    let catalog = catalog(vec![
        flight("SLOW", "JFK", "2024-03-15T06:00", "LAX", "2024-03-15T10:00", 100),
        flight("FAST", "JFK", "2024-03-15T08:00", "LAX", "2024-03-15T11:00", 100),
    ]);
    let config = SearchConfig::default();
    let planner = Planner::new(&catalog, &config);
    let request = SearchRequest::new(code("JFK"), code("LAX"), date());

    let candidates: Vec<_> = planner
        .enumerate(&request)
        .map(|path| path[0].flight_number().to_string())
        .collect();
    assert_eq!(candidates, vec!["SLOW", "FAST"]);

    let ranked = planner.search(&request);
    assert_eq!(numbers(&ranked.itineraries[0]), vec!["FAST"]);
}

mod proptests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;
    use std::collections::HashSet;

    const CODES: [&str; 5] = ["AAA", "BBB", "CCC", "DDD", "EEE"];

    fn query_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    /// Five airports in two countries and four zones, none changing offset
    /// in mid-January.
    fn random_airports() -> Vec<Airport> {
        let zones = [
            ("US", chrono_tz::America::New_York),
            ("US", chrono_tz::America::Chicago),
            ("US", chrono_tz::America::Los_Angeles),
            ("JP", chrono_tz::Asia::Tokyo),
            ("JP", chrono_tz::Asia::Tokyo),
        ];
        CODES
            .iter()
            .zip(zones)
            .map(|(c, (country, tz))| Airport::new(code(c), *c, *c, country, tz))
            .collect()
    }

    /// (origin index, destination offset, departure minute, duration, cents)
    type FlightSpec = (usize, usize, i64, i64, i64);

    fn build_catalog(specs: &[FlightSpec]) -> FlightCatalog {
        let airports = random_airports();
        let midnight = query_date().and_hms_opt(0, 0, 0).unwrap();

        let flights: Vec<Flight> = specs
            .iter()
            .enumerate()
            .map(|(i, &(from, offset, dep_min, duration, cents))| {
                let origin = &airports[from];
                let destination = &airports[(from + offset) % airports.len()];

                let dep_local = midnight + Duration::minutes(dep_min);
                let arr_local = origin
                    .timezone
                    .from_local_datetime(&dep_local)
                    .earliest()
                    .unwrap()
                    .with_timezone(&destination.timezone)
                    .naive_local()
                    + Duration::minutes(duration);

                Flight::new(
                    FlightInfo::new(format!("SP{i}"), "SkyPath", "A320"),
                    origin,
                    dep_local,
                    destination,
                    arr_local,
                    Decimal::new(cents, 2),
                )
                .unwrap()
            })
            .collect();

        FlightCatalog::new(airports, flights)
    }

    fn specs_strategy() -> impl Strategy<Value = Vec<FlightSpec>> {
        prop::collection::vec(
            (
                0usize..5,     // origin
                1usize..5,     // destination offset, never the origin
                0i64..1800,    // departure, minutes after local midnight
                30i64..480,    // duration
                0i64..100_000, // price in cents
            ),
            0..40,
        )
    }

    /// Count valid paths by exhaustive nested loops over the whole catalog.
    fn brute_force_count(
        catalog: &FlightCatalog,
        config: &SearchConfig,
        origin: IataCode,
        destination: IataCode,
    ) -> usize {
        let rules = ConnectionRules::new(catalog, config);
        let flights = catalog.flights();
        let mut count = 0;

        for f1 in flights
            .iter()
            .filter(|f| f.origin() == origin && f.departure_date() == query_date())
        {
            if f1.destination() == destination {
                count += 1;
                continue;
            }
            for f2 in flights.iter().filter(|f| {
                rules.is_valid_connection(f1, f) && f.destination() != origin
            }) {
                if f2.destination() == destination {
                    count += 1;
                    continue;
                }
                count += flights
                    .iter()
                    .filter(|f| {
                        rules.is_valid_connection(f2, f)
                            && f.destination() == destination
                            && f.destination() != origin
                            && f.destination() != f1.destination()
                    })
                    .count();
            }
        }

        count
    }

    proptest! {
        #[test]
        fn every_itinerary_is_valid(
            specs in specs_strategy(),
            from in 0usize..5,
            offset in 1usize..5,
        ) {
            let catalog = build_catalog(&specs);
            let config = SearchConfig::default();
            let rules = ConnectionRules::new(&catalog, &config);
            let origin = code(CODES[from]);
            let destination = code(CODES[(from + offset) % 5]);

            let result = Planner::new(&catalog, &config)
                .search(&SearchRequest::new(origin, destination, query_date()));

            for itinerary in &result.itineraries {
                let segments = itinerary.segments();
                prop_assert!((1..=3).contains(&segments.len()));
                prop_assert_eq!(itinerary.origin(), origin);
                prop_assert_eq!(itinerary.destination(), destination);
                prop_assert_eq!(segments[0].departure_date(), query_date());

                for pair in segments.windows(2) {
                    prop_assert!(rules.is_valid_connection(&pair[0], &pair[1]));
                    prop_assert!(pair[1].departure_utc() > pair[0].arrival_utc());
                }

                let visited: HashSet<_> = itinerary.airports().collect();
                prop_assert_eq!(visited.len(), segments.len() + 1);
            }

            for pair in result.itineraries.windows(2) {
                prop_assert!(compare_itineraries(&pair[0], &pair[1]).is_le());
            }
        }

        #[test]
        fn search_finds_every_valid_path(
            specs in specs_strategy(),
            from in 0usize..5,
            offset in 1usize..5,
        ) {
            let catalog = build_catalog(&specs);
            let config = SearchConfig::default();
            let origin = code(CODES[from]);
            let destination = code(CODES[(from + offset) % 5]);

            let result = Planner::new(&catalog, &config)
                .search(&SearchRequest::new(origin, destination, query_date()));

            prop_assert_eq!(
                result.itineraries.len(),
                brute_force_count(&catalog, &config, origin, destination)
            );
        }
    }
}
