//! Scenario 2: Concurrent intake and review
//!
//! Several front-desk terminals submit the same case id at once; exactly one
//! submission wins. Several reviewers then race to verify that case; exactly
//! one attested value is recorded and exactly one `DiagnosisVerified` event
//! reaches subscribers.

use medcase_attest::AuthorityConfig;
use medcase_contracts::{
    case::Author,
    error::{RegistryError, RegistryResult},
    event::DomainEvent,
};

use crate::{clinic::Clinic, mock_data::intakes};

/// Number of simultaneous submitters / reviewers.
pub const CONTENDERS: usize = 6;

/// Outcome counts of one contended round.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RaceTally {
    pub won: usize,
    pub lost: usize,
}

fn tally<T>(
    results: &[RegistryResult<T>],
    lost: impl Fn(&RegistryError) -> bool,
) -> RegistryResult<RaceTally> {
    let mut out = RaceTally::default();
    for result in results {
        match result {
            Ok(_) => out.won += 1,
            Err(e) if lost(e) => out.lost += 1,
            Err(e) => {
                return Err(RegistryError::StorageFailure {
                    reason: format!("unexpected failure under contention: {}", e),
                })
            }
        }
    }
    Ok(out)
}

/// Run one contended create round and one contended verify round.
///
/// Returns the (create, verify) tallies.
pub fn race(clinic: &Clinic) -> RegistryResult<(RaceTally, RaceTally)> {
    let Some(intake) = intakes().into_iter().nth(1) else {
        return Ok((RaceTally::default(), RaceTally::default()));
    };

    let creates: Vec<_> = std::thread::scope(|s| {
        let workers: Vec<_> = (0..CONTENDERS)
            .map(|_| s.spawn(|| clinic.open_case(&intake)))
            .collect();
        workers
            .into_iter()
            .map(|w| {
                w.join().unwrap_or_else(|_| {
                    Err(RegistryError::StorageFailure {
                        reason: "intake thread panicked".to_string(),
                    })
                })
            })
            .collect()
    });
    let create_tally = tally(&creates, |e| matches!(e, RegistryError::AlreadyExists { .. }))?;

    let case_id = intake.case_id();
    let verifies: Vec<_> = std::thread::scope(|s| {
        let workers: Vec<_> = (0..CONTENDERS)
            .map(|n| {
                let case_id = &case_id;
                s.spawn(move || {
                    clinic.disclose_and_verify(case_id, &Author::new(format!("reviewer-{n}")))
                })
            })
            .collect();
        workers
            .into_iter()
            .map(|w| {
                w.join().unwrap_or_else(|_| {
                    Err(RegistryError::StorageFailure {
                        reason: "review thread panicked".to_string(),
                    })
                })
            })
            .collect()
    });
    let verify_tally = tally(&verifies, |e| matches!(e, RegistryError::AlreadyVerified { .. }))?;

    Ok((create_tally, verify_tally))
}

/// Run Scenario 2.
pub fn run_scenario(config: &AuthorityConfig) -> RegistryResult<()> {
    println!("=== Scenario 2: Concurrent Intake and Review ===");
    println!();

    let clinic = Clinic::new(config);
    let subscriber = clinic.bus.subscribe();

    let (creates, verifies) = race(&clinic)?;

    println!("  {} terminals submitted the same case id:", CONTENDERS);
    println!("    accepted: {}   refused (AlreadyExists): {}", creates.won, creates.lost);
    println!("  {} reviewers verified the same case:", CONTENDERS);
    println!("    accepted: {}   refused (AlreadyVerified): {}", verifies.won, verifies.lost);

    let verified_events = subscriber
        .try_iter()
        .filter(|e| matches!(e.event, DomainEvent::DiagnosisVerified { .. }))
        .count();
    println!("  DiagnosisVerified events delivered: {}", verified_events);
    println!("  Cases listed: {}", clinic.registry.case_count()?);
    println!();
    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}
