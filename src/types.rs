//! Domain types for luminous-rehab.
//!
//! Roles, screen keys, fixture records, and the configuration structs
//! shared by the library and the CLI.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// ROLES & SCREENS
// ============================================================================

/// The two user types. Decides which tab set and fixture panels apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Clinic,
    Therapist,
}

/// Identifier of a panel inside a role's tab set.
///
/// The enum is shared between roles; [`Role::screens`] decides which keys
/// a role actually owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenKey {
    Dashboard,
    Patients,
    Therapists,
    Payroll,
    Requests,
    Medications,
    Profile,
}

const CLINIC_SCREENS: [ScreenKey; 4] = [
    ScreenKey::Dashboard,
    ScreenKey::Patients,
    ScreenKey::Therapists,
    ScreenKey::Payroll,
];

const THERAPIST_SCREENS: [ScreenKey; 5] = [
    ScreenKey::Dashboard,
    ScreenKey::Requests,
    ScreenKey::Patients,
    ScreenKey::Medications,
    ScreenKey::Profile,
];

impl Role {
    pub const ALL: [Role; 2] = [Role::Clinic, Role::Therapist];

    /// Ordered tab set for this role. Order is the tab bar order.
    pub fn screens(self) -> &'static [ScreenKey] {
        match self {
            Role::Clinic => &CLINIC_SCREENS,
            Role::Therapist => &THERAPIST_SCREENS,
        }
    }

    /// Whether `key` belongs to this role's tab set.
    pub fn owns(self, key: ScreenKey) -> bool {
        self.screens().contains(&key)
    }

    /// Display name used in portal titles ("Clinic Portal").
    pub fn label(self) -> &'static str {
        match self {
            Role::Clinic => "Clinic",
            Role::Therapist => "Therapist",
        }
    }

    /// Lowercase identifier, also the web path segment.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Clinic => "clinic",
            Role::Therapist => "therapist",
        }
    }
}

impl ScreenKey {
    /// Tab bar label.
    pub fn label(self) -> &'static str {
        match self {
            ScreenKey::Dashboard => "Dashboard",
            ScreenKey::Patients => "Patients",
            ScreenKey::Therapists => "Therapists",
            ScreenKey::Payroll => "Payroll",
            ScreenKey::Requests => "Requests",
            ScreenKey::Medications => "Medications",
            ScreenKey::Profile => "Profile",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScreenKey::Dashboard => "dashboard",
            ScreenKey::Patients => "patients",
            ScreenKey::Therapists => "therapists",
            ScreenKey::Payroll => "payroll",
            ScreenKey::Requests => "requests",
            ScreenKey::Medications => "medications",
            ScreenKey::Profile => "profile",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ScreenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clinic" => Ok(Role::Clinic),
            "therapist" => Ok(Role::Therapist),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

impl FromStr for ScreenKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Ok(ScreenKey::Dashboard),
            "patients" => Ok(ScreenKey::Patients),
            "therapists" => Ok(ScreenKey::Therapists),
            "payroll" => Ok(ScreenKey::Payroll),
            "requests" => Ok(ScreenKey::Requests),
            "medications" => Ok(ScreenKey::Medications),
            "profile" => Ok(ScreenKey::Profile),
            other => Err(format!("Unknown screen: {}", other)),
        }
    }
}

// ============================================================================
// PRESENTATION VOCABULARY
// ============================================================================

/// Badge / stat / notification tone.
///
/// `Neutral` is the fallback for anything unrecognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Success,
    Warning,
    Danger,
    Info,
}

impl Tone {
    /// Parse a tone name. Never fails: unknown names are `Neutral`.
    pub fn parse(name: &str) -> Tone {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => Tone::Success,
            "warning" => Tone::Warning,
            "danger" => Tone::Danger,
            "info" => Tone::Info,
            _ => Tone::Neutral,
        }
    }
}

/// Identity of an action button on a panel.
///
/// None of these are wired to anything: they are handed to the injected
/// [`ActionHandler`](crate::registry::ActionHandler), which does nothing
/// by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionId {
    SignIn { role: Role },
    ForgotPassword,
    CreateAccount,
    ExploreMap,
    AddPatient,
    FindTherapist,
    InviteTherapist,
    Filter { screen: ScreenKey },
    Message { name: String },
    ViewDetails { name: String },
    ViewProfile { name: String },
    ProcessPayroll,
    EditAvailability,
    AcceptRequest { id: u32 },
    DeclineRequest { id: u32 },
    AddMedication,
    EditMedication { name: String },
    EditProfile,
}

// ============================================================================
// FIXTURE RECORDS
// ============================================================================

/// Patient row shown on both the clinic and therapist patient lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: u32,
    pub name: String,
    /// Medical record number.
    pub mrn: String,
    pub city: String,
    /// Referring physician.
    pub referred_by: String,
    /// Relative time of last visit ("2 days ago").
    pub last_visit: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Therapist {
    pub id: u32,
    pub name: String,
    pub license: String,
    pub specialty: String,
    pub city: String,
    pub patients: u32,
    pub status: String,
}

/// Incoming assignment request on the therapist side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: u32,
    pub patient: String,
    pub city: String,
    pub distance: String,
    /// Discipline code, e.g. "PT".
    pub kind: String,
    pub clinic: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub dose: String,
    pub form: String,
}

/// Summary tile: label, headline value, optional suffix, tone name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub tone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    /// Relative time ("2 hours ago").
    pub meta: String,
    pub tone: String,
}

/// One day of the therapist's weekly availability bar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub day: String,
    /// Booked share of the day, 0-100. Out-of-range values are clamped.
    pub percent: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payroll {
    pub period: String,
    pub total: String,
    pub processed_on: String,
    pub paid: String,
    pub growth: String,
    pub requests: String,
}

/// Today's schedule progress on the therapist dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub done: u32,
    pub total: u32,
    /// Bar fill as shown, 0-100. Kept separate from done/total.
    pub percent: i64,
}

/// Counts shown in list header badges ("6 active").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderCounts {
    pub clinic_patients: u32,
    pub clinic_therapists: u32,
    pub new_requests: u32,
    pub therapist_patients: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub specialty: String,
    pub verified: bool,
    pub email: String,
    pub phone: String,
    pub license: String,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Which presentation of the product a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Single shell: welcome → sign-in → role shell.
    #[default]
    Mobile,
    /// Path-routed site: `/`, `/clinic`, `/therapist`.
    Web,
}

/// Configuration for a navigation session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub variant: Variant,
    /// Deployment prefix stripped from web paths before matching.
    pub base_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Mobile,
            base_path: "/luminous-rehab".to_string(),
        }
    }
}

/// Output format for printed panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Configuration for log output.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Log file. None disables logging entirely.
    pub path: Option<PathBuf>,
    /// Raise the level from info to debug.
    pub verbose: bool,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_a_non_empty_tab_set_starting_at_dashboard() {
        for role in Role::ALL {
            let screens = role.screens();
            assert!(!screens.is_empty());
            assert_eq!(screens[0], ScreenKey::Dashboard);
        }
    }

    #[test]
    fn clinic_and_therapist_tab_orders() {
        assert_eq!(
            Role::Clinic.screens(),
            &[
                ScreenKey::Dashboard,
                ScreenKey::Patients,
                ScreenKey::Therapists,
                ScreenKey::Payroll
            ]
        );
        assert_eq!(
            Role::Therapist.screens(),
            &[
                ScreenKey::Dashboard,
                ScreenKey::Requests,
                ScreenKey::Patients,
                ScreenKey::Medications,
                ScreenKey::Profile
            ]
        );
    }

    #[test]
    fn payroll_is_clinic_only() {
        assert!(Role::Clinic.owns(ScreenKey::Payroll));
        assert!(!Role::Therapist.owns(ScreenKey::Payroll));
        assert!(!Role::Clinic.owns(ScreenKey::Medications));
    }

    #[test]
    fn role_and_screen_parse_case_insensitively() {
        assert_eq!("Clinic".parse::<Role>(), Ok(Role::Clinic));
        assert_eq!(" therapist ".parse::<Role>(), Ok(Role::Therapist));
        assert!("admin".parse::<Role>().is_err());
        assert_eq!("MEDICATIONS".parse::<ScreenKey>(), Ok(ScreenKey::Medications));
        assert!("settings".parse::<ScreenKey>().is_err());
    }

    #[test]
    fn unknown_tone_falls_back_to_neutral() {
        assert_eq!(Tone::parse("info"), Tone::Info);
        assert_eq!(Tone::parse("Warning"), Tone::Warning);
        assert_eq!(Tone::parse("sparkly"), Tone::Neutral);
        assert_eq!(Tone::parse(""), Tone::Neutral);
    }

    #[test]
    fn screen_key_serializes_lowercase() {
        let json = serde_json::to_string(&ScreenKey::Medications).unwrap();
        assert_eq!(json, "\"medications\"");
    }

    #[test]
    fn session_config_defaults_to_mobile() {
        let config = SessionConfig::default();
        assert_eq!(config.variant, Variant::Mobile);
        assert_eq!(config.base_path, "/luminous-rehab");
    }
}
