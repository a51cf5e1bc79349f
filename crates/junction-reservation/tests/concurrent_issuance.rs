//! Concurrent issuance against a shared store.
//!
//! Many callers reserving at once must all succeed with pairwise-distinct
//! PNRs, and none of them may observe a spurious uniqueness error: commit
//! races are absorbed by the issuer's retry loop.

use jiff::civil::date;
use junction_issuer::{IssuerSettings, ThreadRngSource};
use junction_reservation::{ReservationRequest, ReservationService};
use junction_storage::InMemoryStore;
use std::collections::HashSet;
use std::sync::Arc;

fn request(passenger: &str) -> ReservationRequest {
    ReservationRequest {
        passenger_name: passenger.to_string(),
        train_number: "12951".to_string(),
        journey_date: date(2026, 9, 14),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn five_hundred_concurrent_reservations_get_distinct_pnrs() {
    let service = Arc::new(ReservationService::new(
        InMemoryStore::new(),
        ThreadRngSource,
        IssuerSettings::default(),
    ));

    let mut handles = Vec::with_capacity(500);
    for i in 0..500 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service.reserve(request(&format!("Passenger {}", i))).await
        }));
    }

    let mut pnrs = HashSet::with_capacity(500);
    for handle in handles {
        let pnr = handle
            .await
            .unwrap()
            .expect("no caller may observe a spurious uniqueness error");
        assert!(pnrs.insert(pnr), "two callers were issued the same pnr");
    }

    assert_eq!(pnrs.len(), 500);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn contended_narrow_keyspace_stays_collision_free() {
    // Three-digit keyspace with 300 concurrent reservations: roughly every
    // third candidate collides, so the check and commit retry paths are
    // exercised heavily while success stays statistically certain within
    // the attempt budget.
    let settings = IssuerSettings::builder().length(3).max_attempts(64).build();
    let service = Arc::new(ReservationService::new(
        InMemoryStore::new(),
        ThreadRngSource,
        settings,
    ));

    let mut handles = Vec::with_capacity(300);
    for i in 0..300 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service.reserve(request(&format!("Passenger {}", i))).await
        }));
    }

    let mut pnrs = HashSet::with_capacity(300);
    for handle in handles {
        let pnr = handle.await.unwrap().unwrap();
        assert_eq!(pnr.as_str().len(), 3);
        assert!(pnrs.insert(pnr), "two callers were issued the same pnr");
    }

    assert_eq!(pnrs.len(), 300);
}
