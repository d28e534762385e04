//! Sample data set behind every panel.
//!
//! Stands in for a future data source. The built-in set mirrors the
//! product mockups; a JSON file with the same shape can replace any part
//! of it (missing fields keep the built-in values).

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{
    Availability, HeaderCounts, Medication, Notification, Patient, Payroll, Profile, Request,
    Schedule, Stat, Therapist,
};

/// Everything the screen registry reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixtures {
    pub patients: Vec<Patient>,
    pub therapists: Vec<Therapist>,
    pub requests: Vec<Request>,
    pub medications: Vec<Medication>,
    pub notifications: Vec<Notification>,
    pub availability: Vec<Availability>,
    pub clinic_stats: Vec<Stat>,
    pub therapist_stats: Vec<Stat>,
    pub header_counts: HeaderCounts,
    pub payroll: Payroll,
    pub schedule: Schedule,
    pub profile: Profile,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self::sample()
    }
}

fn stat(label: &str, value: &str, suffix: Option<&str>, tone: &str) -> Stat {
    Stat {
        label: label.into(),
        value: value.into(),
        suffix: suffix.map(Into::into),
        tone: tone.into(),
    }
}

fn patient(id: u32, name: &str, mrn: &str, city: &str, by: &str, last: &str, status: &str) -> Patient {
    Patient {
        id,
        name: name.into(),
        mrn: mrn.into(),
        city: city.into(),
        referred_by: by.into(),
        last_visit: last.into(),
        status: status.into(),
    }
}

fn therapist(
    id: u32,
    name: &str,
    license: &str,
    specialty: &str,
    city: &str,
    patients: u32,
    status: &str,
) -> Therapist {
    Therapist {
        id,
        name: name.into(),
        license: license.into(),
        specialty: specialty.into(),
        city: city.into(),
        patients,
        status: status.into(),
    }
}

fn request(id: u32, patient: &str, city: &str, distance: &str, kind: &str, clinic: &str) -> Request {
    Request {
        id,
        patient: patient.into(),
        city: city.into(),
        distance: distance.into(),
        kind: kind.into(),
        clinic: clinic.into(),
    }
}

fn medication(name: &str, dose: &str, form: &str) -> Medication {
    Medication {
        name: name.into(),
        dose: dose.into(),
        form: form.into(),
    }
}

fn notification(title: &str, meta: &str, tone: &str) -> Notification {
    Notification {
        title: title.into(),
        meta: meta.into(),
        tone: tone.into(),
    }
}

impl Fixtures {
    /// The built-in mockup data.
    pub fn sample() -> Self {
        Fixtures {
            patients: vec![
                patient(1, "John Doe", "PT-2053-2587", "Orlando, FL", "Dr. Smith", "2 days ago", "Active"),
                patient(2, "Jane Smith", "PT-2051-1043", "Tampa, FL", "Dr. Johnson", "1 week ago", "Active"),
                patient(3, "Michael Brown", "PT-2050-3468", "Miami, FL", "Dr. Singh", "3 weeks ago", "Review"),
            ],
            therapists: vec![
                therapist(1, "Dr. Sarah Miller", "PT-12345-FL", "Physical Therapy", "Orlando, FL", 12, "Active"),
                therapist(2, "Dr. John Anderson", "OT-89021-FL", "Occupational Therapy", "Jacksonville, FL", 6, "Active"),
                therapist(3, "Dr. Emily Davis", "PT-67451-FL", "Physical Therapy", "Tampa, FL", 0, "Inactive"),
            ],
            requests: vec![
                request(1, "John Doe", "Orlando, FL", "2.3 mi", "PT", "Sunrise Rehabilitation Center"),
                request(2, "Jane Smith", "Tampa, FL", "5.7 mi", "PT", "Milton Care Center"),
            ],
            medications: vec![
                medication("Lisinopril", "10 mg", "Tablet"),
                medication("Metformin", "20 mg", "Capsule"),
                medication("Atorvastatin", "40 mg", "Tablet"),
            ],
            notifications: vec![
                notification("New patient assignment", "2 hours ago", "info"),
                notification("Therapist availability updated", "5 hours ago", "success"),
                notification("Pending payment approval needed", "1 day ago", "warning"),
            ],
            availability: [("Monday", 85), ("Tuesday", 45), ("Wednesday", 62), ("Thursday", 91), ("Friday", 30)]
                .into_iter()
                .map(|(day, percent)| Availability {
                    day: day.into(),
                    percent,
                })
                .collect(),
            clinic_stats: vec![
                stat("Active Patients", "28", Some("/ 40"), "info"),
                stat("Therapists", "45", Some("available"), "success"),
                stat("New Requests", "12", Some("pending"), "warning"),
            ],
            therapist_stats: vec![
                stat("New Requests", "8", None, "warning"),
                stat("My Patients", "10", None, "info"),
                stat("Today", "8 appts", None, "success"),
            ],
            header_counts: HeaderCounts {
                clinic_patients: 6,
                clinic_therapists: 4,
                new_requests: 3,
                therapist_patients: 4,
            },
            payroll: Payroll {
                period: "October 2025".into(),
                total: "$42,500".into(),
                processed_on: "October 28".into(),
                paid: "12".into(),
                growth: "+8%".into(),
                requests: "17".into(),
            },
            schedule: Schedule {
                done: 8,
                total: 12,
                percent: 70,
            },
            profile: Profile {
                name: "Dr. Sarah Johnson".into(),
                specialty: "Physical Therapy".into(),
                verified: true,
                email: "sarah.johnson@gmail.com".into(),
                phone: "(555) 987-6543".into(),
                license: "PT-12345-FL".into(),
            },
        }
    }

    /// Load fixtures from a JSON file.
    ///
    /// Fields absent from the file keep their built-in values.
    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Invalid fixtures: {}", e))
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
