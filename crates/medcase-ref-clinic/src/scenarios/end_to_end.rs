//! Scenario 1: Intake to verified diagnosis
//!
//! Walk-through:
//!   1. Three intakes are encrypted by the co-processor and opened as cases
//!   2. Each case is listed in submission order, still sealed
//!   3. A reviewer requests public decryption of one case and submits the
//!      attested value; the case becomes Verified
//!   4. A second verification of the same case is refused
//!   5. The audit chain is checked and the event bus drained

use medcase_attest::AuthorityConfig;
use medcase_contracts::{
    case::{Author, CiphertextHandle},
    error::{RegistryError, RegistryResult},
};

use crate::{clinic::Clinic, mock_data::intakes};

/// Leading characters of a handle for display; short handles are shown whole.
fn short_handle(handle: &CiphertextHandle) -> &str {
    handle.as_str().get(..12).unwrap_or(handle.as_str())
}

/// Run Scenario 1.
pub fn run_scenario(config: &AuthorityConfig) -> RegistryResult<()> {
    println!("=== Scenario 1: Intake to Verified Diagnosis ===");
    println!();

    let clinic = Clinic::new(config);
    let ui_refresh = clinic.bus.subscribe();

    // ── Intake ────────────────────────────────────────────────────────────────

    for intake in intakes() {
        let handle = clinic.open_case(&intake)?;
        println!(
            "  Opened {} for {} by {} (handle {}…)",
            intake.case_id,
            intake.patient_id,
            intake.author,
            short_handle(&handle)
        );
    }
    println!();

    let ids: Vec<String> = clinic
        .registry
        .list_case_ids()?
        .into_iter()
        .map(|c| c.0)
        .collect();
    println!("  Registered cases:       {}", ids.join(", "));

    // ── Disclosure and verification ───────────────────────────────────────────

    let Some(target) = intakes().into_iter().next() else {
        return Ok(());
    };
    let reviewer = Author::new("reviewer-ward-7");

    let before = clinic.registry.get_case(&target.case_id())?;
    println!(
        "  {} before review:    verified={} value={}",
        target.case_id, before.is_verified, before.decrypted_value
    );

    let value = clinic.disclose_and_verify(&target.case_id(), &reviewer)?;
    let after = clinic.registry.get_case(&target.case_id())?;
    println!(
        "  {} after review:     verified={} value={}",
        target.case_id, after.is_verified, after.decrypted_value
    );
    println!("  Attested diagnosis matches intake: {}", value == target.diagnosis_code);

    match clinic.disclose_and_verify(&target.case_id(), &reviewer) {
        Err(RegistryError::AlreadyVerified { .. }) => {
            println!("  Second verification:    REFUSED (already verified)");
        }
        Ok(v) => println!("  Second verification:    UNEXPECTEDLY ACCEPTED ({})", v),
        Err(e) => return Err(e),
    }
    println!();

    // ── Audit ─────────────────────────────────────────────────────────────────

    let log = clinic.trail.export_log()?;
    println!(
        "  Audit chain integrity:  {} ({} event(s) in chain)",
        if clinic.trail.verify_integrity() { "VERIFIED" } else { "FAILED" },
        log.entries.len()
    );
    if let Some(last) = log.entries.last() {
        let json = serde_json::to_string(&last.event.event).unwrap_or_default();
        println!("  Last audited event:     {}", json);
    }
    println!("  UI refresh notifications: {}", ui_refresh.try_iter().count());
    println!();
    println!("  Scenario 1 complete.");
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use medcase_contracts::case::CiphertextHandle;

    use super::short_handle;

    #[test]
    fn test_short_handle_truncates_long_handles() {
        let handle = CiphertextHandle("0123456789abcdef".to_string());
        assert_eq!(short_handle(&handle), "0123456789ab");
    }

    /// Handles shorter than the display width are printed unchanged.
    #[test]
    fn test_short_handle_keeps_short_handles() {
        let handle = CiphertextHandle("h-7".to_string());
        assert_eq!(short_handle(&handle), "h-7");
    }
}
