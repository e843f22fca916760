//! Unit tests for the quote command.

use super::helpers::{Workspace, write_utf8};
use super::*;
use crate::quote::{QuoteConfig, execute_quote, run_quote_with};
use fleetfit_core::test_support::sample_fleet;
use fleetfit_core::{AllocationError, AllocationRequest, ConfirmedAllocation, ProposedVehicle};
use rstest::rstest;
use rust_decimal_macros::dec;

fn booking(passenger_count: u32, vehicles: &[(u64, u32)]) -> AllocationRequest {
    AllocationRequest {
        passenger_count,
        num_days: dec!(1.5),
        vehicles: vehicles
            .iter()
            .map(|&(vehicle_type_id, count)| ProposedVehicle {
                vehicle_type_id,
                count,
            })
            .collect(),
    }
}

fn config_for(workspace: &Workspace, request: &AllocationRequest) -> QuoteConfig {
    QuoteConfig {
        booking_path: workspace.json("booking.json", request),
        catalog_db: workspace.sample_catalog(),
    }
}

#[rstest]
fn converting_quote_without_booking_errors() {
    let err = QuoteConfig::try_from(QuoteArgs::default()).expect_err("missing booking");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_QUOTE_BOOKING);
            assert_eq!(env, ENV_QUOTE_BOOKING);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn quote_reprices_from_catalog() {
    let workspace = Workspace::new();
    let config = config_for(&workspace, &booking(10, &[(2, 1), (1, 1)]));

    let confirmed = execute_quote(&config).expect("quote");
    assert_eq!(confirmed.passenger_count, 10);
    assert_eq!(confirmed.billable_days, dec!(2));
    assert_eq!(
        confirmed.combination.signature().collect::<Vec<_>>(),
        vec![(1, 1), (2, 1)]
    );
    assert_eq!(confirmed.combination.unused_seats(), 1);
    assert_eq!(confirmed.combination.total_cost(), dec!(5000));
}

#[rstest]
fn quote_rejects_retired_vehicle_type() {
    let workspace = Workspace::new();
    let fleet: Vec<_> = sample_fleet()
        .into_iter()
        .map(|vehicle_type| {
            let active = vehicle_type.id != 3;
            vehicle_type.with_active(active)
        })
        .collect();
    let config = QuoteConfig {
        booking_path: workspace.json("booking.json", &booking(10, &[(3, 1)])),
        catalog_db: workspace.catalog(&fleet),
    };

    let err = execute_quote(&config).expect_err("retired van");
    match err {
        CliError::Allocation { source } => {
            assert_eq!(source, AllocationError::InactiveVehicleType { id: 3 });
        }
        other => panic!("expected Allocation, found {other:?}"),
    }
}

#[rstest]
fn quote_rejects_unknown_vehicle_type() {
    let workspace = Workspace::new();
    let config = config_for(&workspace, &booking(4, &[(404, 1)]));

    let err = execute_quote(&config).expect_err("unknown type");
    match err {
        CliError::Allocation { source } => {
            assert_eq!(source, AllocationError::UnknownVehicleType { id: 404 });
        }
        other => panic!("expected Allocation, found {other:?}"),
    }
}

#[rstest]
fn quote_reports_missing_catalog() {
    let workspace = Workspace::new();
    let config = QuoteConfig {
        booking_path: workspace.json("booking.json", &booking(4, &[(1, 1)])),
        catalog_db: workspace.path("missing.db"),
    };

    let err = execute_quote(&config).expect_err("missing catalog");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_CATALOG_DB),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn quote_reports_malformed_booking() {
    let workspace = Workspace::new();
    let booking_path = workspace.path("booking.json");
    write_utf8(&booking_path, br#"{ "passengerCount": 4 }"#);
    let config = QuoteConfig {
        booking_path: booking_path.clone(),
        catalog_db: workspace.sample_catalog(),
    };

    let err = execute_quote(&config).expect_err("malformed booking");
    match err {
        CliError::ParseInput { field, path, .. } => {
            assert_eq!(field, ARG_QUOTE_BOOKING);
            assert_eq!(path, booking_path);
        }
        other => panic!("expected ParseInput, found {other:?}"),
    }
}

#[rstest]
fn run_quote_prints_confirmed_allocation() {
    let workspace = Workspace::new();
    let config = config_for(&workspace, &booking(4, &[(1, 1)]));
    let args = QuoteArgs {
        booking_path: Some(config.booking_path.clone()),
        catalog_db: Some(config.catalog_db.clone()),
    };

    let mut stdout = Vec::new();
    run_quote_with(args, &mut stdout).expect("quote");

    let confirmed: ConfirmedAllocation =
        serde_json::from_slice(&stdout).expect("output should be a confirmed allocation");
    assert_eq!(confirmed.combination.total_cost(), dec!(2000));
    assert_eq!(confirmed.combination.unused_seats(), 0);
}
