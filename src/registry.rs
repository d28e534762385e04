//! Screen registry: `(Role, ScreenKey) → Panel`.
//!
//! Panels are plain data built from the injected fixtures. The only
//! computation is display formatting (initials, status tones, bar widths),
//! and every formatter is total: unexpected fixture values fall back to a
//! neutral presentation instead of failing.

use serde::Serialize;

use crate::fixtures::Fixtures;
use crate::types::{ActionId, Role, ScreenKey, Stat, Tone};

// ============================================================================
// PANEL MODEL
// ============================================================================

/// A rendered screen: a title and a sequence of display blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub role: Role,
    pub key: ScreenKey,
    pub title: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub text: String,
    pub tone: Tone,
}

/// A clickable affordance. Invoking it goes to the [`ActionHandler`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub label: String,
    pub action: ActionId,
    /// Filled (primary) rather than outlined.
    pub primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatBox {
    pub label: String,
    pub value: String,
    pub suffix: Option<String>,
    pub tone: Tone,
}

/// A list card: avatar, name, badges, detail lines, buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub initials: Option<String>,
    pub title: String,
    pub badges: Vec<Badge>,
    pub details: Vec<String>,
    pub actions: Vec<Button>,
}

/// Display blocks, in reading order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum Block {
    /// Section heading with an optional badge and buttons on the right.
    Heading {
        text: String,
        badge: Option<Badge>,
        actions: Vec<Button>,
    },
    Stats { stats: Vec<StatBox> },
    /// Search input (placeholder only; search is not implemented).
    Search { placeholder: String },
    Rows { rows: Vec<Row> },
    /// Labelled horizontal bar.
    Progress { label: String, percent: u8 },
    /// Label/value pairs.
    Info { pairs: Vec<(String, String)> },
    /// Big headline number with caption and footnote.
    Figure {
        caption: String,
        value: String,
        footnote: String,
    },
    Note { title: String, meta: String, tone: Tone },
    /// Grey box standing in for content that does not exist yet.
    Placeholder { text: String },
    /// Free-standing buttons.
    Actions { buttons: Vec<Button> },
}

impl StatBox {
    /// Value and suffix as one string: "28 / 40", "45 available".
    pub fn display(&self) -> String {
        match &self.suffix {
            Some(suffix) => format!("{} {}", self.value, suffix),
            None => self.value.clone(),
        }
    }
}

impl Panel {
    /// All buttons on the panel, in reading order.
    pub fn buttons(&self) -> Vec<&Button> {
        self.blocks.iter().flat_map(Block::buttons).collect()
    }

    /// Stat boxes of the first stats block, if any.
    pub fn stats(&self) -> &[StatBox] {
        self.blocks
            .iter()
            .find_map(|b| match b {
                Block::Stats { stats } => Some(stats.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// Titles of every list row on the panel.
    pub fn row_titles(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Rows { rows } => Some(rows),
                _ => None,
            })
            .flatten()
            .map(|r| r.title.as_str())
            .collect()
    }
}

impl Block {
    /// Buttons carried by this block, in reading order.
    pub fn buttons(&self) -> Vec<&Button> {
        match self {
            Block::Heading { actions, .. } => actions.iter().collect(),
            Block::Rows { rows } => rows.iter().flat_map(|r| r.actions.iter()).collect(),
            Block::Actions { buttons } => buttons.iter().collect(),
            _ => Vec::new(),
        }
    }
}

// ============================================================================
// FORMATTERS
// ============================================================================

/// Up to two initials from a display name: "John Doe" → "JD".
///
/// Names without any letters give "?".
pub fn initials(name: &str) -> String {
    let out: String = name
        .split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .collect();
    if out.is_empty() { "?".to_string() } else { out }
}

fn is_active(status: &str) -> bool {
    status.trim().eq_ignore_ascii_case("active")
}

/// Badge tone for a patient status: anything but active needs attention.
pub fn patient_status_tone(status: &str) -> Tone {
    if is_active(status) { Tone::Success } else { Tone::Warning }
}

/// Badge tone for a therapist status: anything but active is neutral.
pub fn therapist_status_tone(status: &str) -> Tone {
    if is_active(status) { Tone::Success } else { Tone::Neutral }
}

/// Clamp a fixture percentage into 0..=100.
pub fn clamp_percent(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

/// Number of filled cells for `percent` of a bar `width` cells wide.
pub fn bar_width(percent: u8, width: usize) -> usize {
    (percent.min(100) as usize * width) / 100
}

fn badge(text: impl Into<String>, tone: Tone) -> Badge {
    Badge {
        text: text.into(),
        tone,
    }
}

fn button(label: &str, action: ActionId) -> Button {
    Button {
        label: label.to_string(),
        action,
        primary: false,
    }
}

fn primary(label: &str, action: ActionId) -> Button {
    Button {
        primary: true,
        ..button(label, action)
    }
}

fn stat_box(stat: &Stat) -> StatBox {
    StatBox {
        label: stat.label.clone(),
        value: stat.value.clone(),
        suffix: stat.suffix.clone(),
        tone: Tone::parse(&stat.tone),
    }
}

fn count_badge(count: u32, noun: &str, tone: Tone) -> Badge {
    badge(format!("{} {}", count, noun), tone)
}

// ============================================================================
// ACTION HANDLING
// ============================================================================

/// What the data/service layer did with a button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Nothing is wired to this action.
    Inert,
    /// An integration handled it.
    Handled,
}

/// Injection point for the future service layer.
///
/// Handlers never change navigation state; they only report whether
/// anything happened.
pub trait ActionHandler: Send {
    fn handle(&self, action: &ActionId) -> ActionOutcome {
        let _ = action;
        ActionOutcome::Inert
    }
}

/// Default handler: every button is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct InertActions;

impl ActionHandler for InertActions {}

// ============================================================================
// REGISTRY
// ============================================================================

/// Builds panels from fixtures and routes button presses to a handler.
pub struct ScreenRegistry {
    fixtures: Fixtures,
    handler: Box<dyn ActionHandler>,
}

impl std::fmt::Debug for ScreenRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenRegistry")
            .field("fixtures", &self.fixtures)
            .finish_non_exhaustive()
    }
}

impl Default for ScreenRegistry {
    fn default() -> Self {
        Self::new(Fixtures::sample(), Box::new(InertActions))
    }
}

impl ScreenRegistry {
    pub fn new(fixtures: Fixtures, handler: Box<dyn ActionHandler>) -> Self {
        ScreenRegistry { fixtures, handler }
    }

    /// Registry over `fixtures` with inert buttons.
    pub fn with_fixtures(fixtures: Fixtures) -> Self {
        Self::new(fixtures, Box::new(InertActions))
    }

    /// Pass a button press to the handler.
    pub fn invoke(&self, action: &ActionId) -> ActionOutcome {
        self.handler.handle(action)
    }

    /// Panel for `key` in `role`'s shell, or None if the role has no such tab.
    pub fn render(&self, role: Role, key: ScreenKey) -> Option<Panel> {
        if !role.owns(key) {
            return None;
        }
        let blocks = match (role, key) {
            (Role::Clinic, ScreenKey::Dashboard) => self.clinic_dashboard(),
            (Role::Clinic, ScreenKey::Patients) => self.clinic_patients(),
            (Role::Clinic, ScreenKey::Therapists) => self.clinic_therapists(),
            (Role::Clinic, ScreenKey::Payroll) => self.clinic_payroll(),
            (Role::Therapist, ScreenKey::Dashboard) => self.therapist_dashboard(),
            (Role::Therapist, ScreenKey::Requests) => self.therapist_requests(),
            (Role::Therapist, ScreenKey::Patients) => self.therapist_patients(),
            (Role::Therapist, ScreenKey::Medications) => self.therapist_medications(),
            (Role::Therapist, ScreenKey::Profile) => self.therapist_profile(),
            _ => return None,
        };
        Some(Panel {
            role,
            key,
            title: key.label().to_string(),
            blocks,
        })
    }

    // -- Clinic --

    fn clinic_dashboard(&self) -> Vec<Block> {
        vec![
            Block::Heading {
                text: "Dashboard".into(),
                badge: None,
                actions: vec![],
            },
            Block::Stats {
                stats: self.fixtures.clinic_stats.iter().map(stat_box).collect(),
            },
            Block::Heading {
                text: "Find Nearby Therapists".into(),
                badge: None,
                actions: vec![button("Explore", ActionId::ExploreMap)],
            },
            Block::Placeholder {
                text: "Map preview placeholder".into(),
            },
            Block::Heading {
                text: "Quick Actions".into(),
                badge: None,
                actions: vec![button("Add Patient", ActionId::AddPatient)],
            },
            Block::Actions {
                buttons: vec![
                    button("Add Patient", ActionId::AddPatient),
                    button("Find Therapist", ActionId::FindTherapist),
                ],
            },
        ]
    }

    fn clinic_patients(&self) -> Vec<Block> {
        vec![
            Block::Heading {
                text: "Current Patients".into(),
                badge: Some(count_badge(
                    self.fixtures.header_counts.clinic_patients,
                    "active",
                    Tone::Success,
                )),
                actions: vec![
                    button("Add Patient", ActionId::AddPatient),
                    button("Filter", ActionId::Filter { screen: ScreenKey::Patients }),
                ],
            },
            Block::Search {
                placeholder: "Search patients...".into(),
            },
            Block::Rows {
                rows: self.patient_rows(),
            },
        ]
    }

    fn clinic_therapists(&self) -> Vec<Block> {
        let rows = self
            .fixtures
            .therapists
            .iter()
            .map(|t| Row {
                initials: Some(initials(&t.name)),
                title: t.name.clone(),
                badges: vec![badge(t.status.clone(), therapist_status_tone(&t.status))],
                details: vec![
                    format!("{} • {}", t.license, t.specialty),
                    format!("{} • {} patients", t.city, t.patients),
                ],
                actions: vec![
                    button("Message", ActionId::Message { name: t.name.clone() }),
                    button("View Profile", ActionId::ViewProfile { name: t.name.clone() }),
                ],
            })
            .collect();

        vec![
            Block::Heading {
                text: "Current Therapists".into(),
                badge: Some(count_badge(
                    self.fixtures.header_counts.clinic_therapists,
                    "active",
                    Tone::Success,
                )),
                actions: vec![
                    button("Invite", ActionId::InviteTherapist),
                    button("Filter", ActionId::Filter { screen: ScreenKey::Therapists }),
                ],
            },
            Block::Search {
                placeholder: "Search therapists...".into(),
            },
            Block::Rows { rows },
        ]
    }

    fn clinic_payroll(&self) -> Vec<Block> {
        let payroll = &self.fixtures.payroll;
        let mut blocks = vec![
            Block::Figure {
                caption: format!("Payroll — {}", payroll.period),
                value: payroll.total.clone(),
                footnote: format!("Processed on {}", payroll.processed_on),
            },
            Block::Info {
                pairs: vec![
                    ("Paid".into(), payroll.paid.clone()),
                    ("Growth".into(), payroll.growth.clone()),
                    ("Requests".into(), payroll.requests.clone()),
                ],
            },
            Block::Actions {
                buttons: vec![primary("Process", ActionId::ProcessPayroll)],
            },
            Block::Heading {
                text: "Notifications".into(),
                badge: None,
                actions: vec![],
            },
        ];
        blocks.extend(self.fixtures.notifications.iter().map(|n| Block::Note {
            title: n.title.clone(),
            meta: n.meta.clone(),
            tone: Tone::parse(&n.tone),
        }));
        blocks
    }

    // -- Therapist --

    fn therapist_dashboard(&self) -> Vec<Block> {
        let schedule = &self.fixtures.schedule;

        let mut blocks = vec![
            Block::Stats {
                stats: self.fixtures.therapist_stats.iter().map(stat_box).collect(),
            },
            Block::Heading {
                text: "Today's Schedule".into(),
                badge: None,
                actions: vec![],
            },
            Block::Progress {
                label: format!("{}/{} appointments", schedule.done, schedule.total),
                percent: clamp_percent(schedule.percent),
            },
            Block::Heading {
                text: "This Week's Availability".into(),
                badge: None,
                actions: vec![button("Edit", ActionId::EditAvailability)],
            },
        ];
        blocks.extend(self.fixtures.availability.iter().map(|a| Block::Progress {
            label: a.day.clone(),
            percent: clamp_percent(a.percent),
        }));
        blocks
    }

    fn therapist_requests(&self) -> Vec<Block> {
        let rows = self
            .fixtures
            .requests
            .iter()
            .map(|r| Row {
                initials: Some(initials(&r.patient)),
                title: r.patient.clone(),
                badges: vec![badge(r.kind.clone(), Tone::Info)],
                details: vec![
                    format!("{} • {}", r.city, r.distance),
                    format!("Requesting Clinic: {}", r.clinic),
                ],
                actions: vec![
                    button("Decline", ActionId::DeclineRequest { id: r.id }),
                    primary("Accept Request", ActionId::AcceptRequest { id: r.id }),
                ],
            })
            .collect();

        vec![
            Block::Heading {
                text: "Patient Requests".into(),
                badge: Some(count_badge(
                    self.fixtures.header_counts.new_requests,
                    "new assignments",
                    Tone::Warning,
                )),
                actions: vec![button("Filter", ActionId::Filter { screen: ScreenKey::Requests })],
            },
            Block::Search {
                placeholder: "Search requests...".into(),
            },
            Block::Rows { rows },
        ]
    }

    fn therapist_patients(&self) -> Vec<Block> {
        vec![
            Block::Heading {
                text: "My Patients".into(),
                badge: Some(count_badge(
                    self.fixtures.header_counts.therapist_patients,
                    "active",
                    Tone::Success,
                )),
                actions: vec![button("Filter", ActionId::Filter { screen: ScreenKey::Patients })],
            },
            Block::Search {
                placeholder: "Search patients...".into(),
            },
            Block::Rows {
                rows: self.patient_rows(),
            },
        ]
    }

    fn therapist_medications(&self) -> Vec<Block> {
        let rows = self
            .fixtures
            .medications
            .iter()
            .map(|m| Row {
                initials: None,
                title: m.name.clone(),
                badges: vec![],
                details: vec![format!("{} • {}", m.dose, m.form)],
                actions: vec![button("Edit", ActionId::EditMedication { name: m.name.clone() })],
            })
            .collect();

        vec![
            Block::Heading {
                text: "Medications".into(),
                badge: None,
                actions: vec![primary("Add Medication", ActionId::AddMedication)],
            },
            Block::Rows { rows },
        ]
    }

    fn therapist_profile(&self) -> Vec<Block> {
        let profile = &self.fixtures.profile;
        let mut badges = vec![badge(profile.specialty.clone(), Tone::Success)];
        if profile.verified {
            badges.push(badge("Verified", Tone::Info));
        }

        vec![
            Block::Rows {
                rows: vec![Row {
                    initials: Some(initials(&profile.name)),
                    title: profile.name.clone(),
                    badges,
                    details: vec![],
                    actions: vec![button("Edit Profile", ActionId::EditProfile)],
                }],
            },
            Block::Info {
                pairs: vec![
                    ("Email Address".into(), profile.email.clone()),
                    ("Phone Number".into(), profile.phone.clone()),
                    ("License Number".into(), profile.license.clone()),
                    ("Specialty".into(), profile.specialty.clone()),
                ],
            },
        ]
    }

    // -- Shared --

    fn patient_rows(&self) -> Vec<Row> {
        self.fixtures
            .patients
            .iter()
            .map(|p| Row {
                initials: Some(initials(&p.name)),
                title: p.name.clone(),
                badges: vec![badge(p.status.clone(), patient_status_tone(&p.status))],
                details: vec![
                    p.mrn.clone(),
                    format!("{} • {}", p.city, p.last_visit),
                    format!("Referring: {}", p.referred_by),
                ],
                actions: vec![
                    button("Message", ActionId::Message { name: p.name.clone() }),
                    button("View Details", ActionId::ViewDetails { name: p.name.clone() }),
                ],
            })
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
