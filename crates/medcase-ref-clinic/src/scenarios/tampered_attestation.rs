//! Scenario 3: Forged and substituted attestations
//!
//! Shows every way a verification can be refused without touching the case:
//! a proof lifted from another case, a cleartext rewritten after signing, a
//! proof stripped below the signer threshold, and a verification of a case
//! that was never opened. Also shows a forged input proof being refused at
//! intake.

use medcase_attest::{AuthorityConfig, DecryptionProof};
use medcase_contracts::{
    case::{Author, CaseId, NewCase, PatientId, VerifyRequest},
    error::RegistryResult,
};

use crate::{clinic::Clinic, mock_data::intakes};

fn report(label: &str, result: RegistryResult<u32>) {
    match result {
        Ok(v) => println!("  {:<34} ACCEPTED ({})", label, v),
        Err(e) => println!("  {:<34} REFUSED: {}", label, e),
    }
}

/// Run Scenario 3.
pub fn run_scenario(config: &AuthorityConfig) -> RegistryResult<()> {
    println!("=== Scenario 3: Forged and Substituted Attestations ===");
    println!();

    let clinic = Clinic::new(config);
    let cases = intakes();
    for intake in &cases {
        clinic.open_case(intake)?;
    }

    let victim = cases[0].case_id();
    let donor = cases[1].case_id();
    let mallory = Author::new("mallory");

    // A perfectly valid proof, but for a different case's handle.
    let donor_handle = clinic.registry.get_ciphertext_handle(&donor)?;
    let lifted = clinic.coprocessor.public_decrypt(&donor_handle)?;
    report(
        "Proof lifted from another case:",
        clinic.registry.verify(
            VerifyRequest {
                case_id: victim.clone(),
                claimed_cleartext: lifted.cleartext,
                proof: lifted.proof,
            },
            &mallory,
        ),
    );

    // The victim's own proof with the cleartext rewritten afterwards.
    let victim_handle = clinic.registry.get_ciphertext_handle(&victim)?;
    let genuine = clinic.coprocessor.public_decrypt(&victim_handle)?;
    let mut rewritten = DecryptionProof::from_bytes(&genuine.proof)?;
    rewritten.cleartexts = "00000001".to_string();
    report(
        "Cleartext rewritten after signing:",
        clinic.registry.verify(
            VerifyRequest {
                case_id: victim.clone(),
                claimed_cleartext: vec![0, 0, 0, 1],
                proof: rewritten.to_bytes()?,
            },
            &mallory,
        ),
    );

    // Only one signer share kept.
    let mut stripped = DecryptionProof::from_bytes(&genuine.proof)?;
    stripped.signatures.truncate(1);
    report(
        "Proof below signer threshold:",
        clinic.registry.verify(
            VerifyRequest {
                case_id: victim.clone(),
                claimed_cleartext: genuine.cleartext.clone(),
                proof: stripped.to_bytes()?,
            },
            &mallory,
        ),
    );

    report(
        "Verification of unknown case:",
        clinic.registry.verify(
            VerifyRequest {
                case_id: CaseId::new("case-9999"),
                claimed_cleartext: genuine.cleartext.clone(),
                proof: genuine.proof.clone(),
            },
            &mallory,
        ),
    );

    let view = clinic.registry.get_case(&victim)?;
    println!(
        "  {} still sealed:          verified={} value={}",
        victim, view.is_verified, view.decrypted_value
    );

    // A ciphertext encrypted for one author, submitted by another.
    let borrowed = clinic
        .coprocessor
        .encrypt_u32(1, &clinic.admission_context(&Author::new("dr-okafor")));
    let intake = clinic.registry.create(
        NewCase {
            case_id: CaseId::new("case-forged"),
            patient_id: PatientId::new("PT-0000"),
            ciphertext: borrowed.ciphertext,
            proof: borrowed.proof,
            numeric_case_identifier: 9999,
            medical_history: "fabricated".to_string(),
        },
        &mallory,
    );
    match intake {
        Ok(_) => println!("  Replayed input proof:              ACCEPTED"),
        Err(e) => println!("  Replayed input proof:              REFUSED: {}", e),
    }
    println!();
    println!("  Scenario 3 complete.");
    println!();

    Ok(())
}
