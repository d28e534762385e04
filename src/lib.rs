//! luminous-rehab: role-based navigation shell for the Luminous Rehab
//! clinic and therapist portals.

pub mod fixtures;
pub mod logging;
pub mod registry;
pub mod report;
pub mod route;
pub mod shell;
pub mod tabs;
pub mod tui;
pub mod types;
