//! Simulated clinical intake data for the MEDCASE reference runtime.
//!
//! All data in this module is hardcoded and fictional. The `diagnosis_code`
//! is the sensitive value: it only ever reaches the registry encrypted.

use medcase_contracts::case::{Author, CaseId, PatientId};

/// One fictional intake, before encryption.
#[derive(Debug, Clone)]
pub struct MockIntake {
    pub case_id: &'static str,
    pub patient_id: &'static str,
    pub numeric_case_identifier: u64,
    pub medical_history: &'static str,
    pub author: &'static str,
    /// Plaintext diagnosis code, encrypted before submission.
    pub diagnosis_code: u32,
}

impl MockIntake {
    pub fn case_id(&self) -> CaseId {
        CaseId::new(self.case_id)
    }

    pub fn patient_id(&self) -> PatientId {
        PatientId::new(self.patient_id)
    }

    pub fn author(&self) -> Author {
        Author::new(self.author)
    }
}

/// The demo intake set, in submission order.
pub fn intakes() -> Vec<MockIntake> {
    vec![
        MockIntake {
            case_id: "case-0001",
            patient_id: "PT-7781",
            numeric_case_identifier: 1001,
            medical_history: "Chest pain on exertion; family history of coronary artery disease",
            author: "dr-okafor",
            diagnosis_code: 4140,
        },
        MockIntake {
            case_id: "case-0002",
            patient_id: "PT-1294",
            numeric_case_identifier: 1002,
            medical_history: "Polyuria and polydipsia for three weeks; fasting glucose 182 mg/dL",
            author: "dr-lindqvist",
            diagnosis_code: 2500,
        },
        MockIntake {
            case_id: "case-0003",
            patient_id: "PT-5530",
            numeric_case_identifier: 1003,
            medical_history: "Persistent dry cough, night sweats, weight loss of 6 kg",
            author: "dr-okafor",
            diagnosis_code: 110,
        },
    ]
}

/// Look up an intake by case id.
pub fn intake(case_id: &str) -> Option<MockIntake> {
    intakes().into_iter().find(|i| i.case_id == case_id)
}
