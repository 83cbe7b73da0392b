//! Admin access gate and admin form handling.

use std::collections::HashSet;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::model::{Admissions, Cooperation, Program, University, slugify};

/// Logo used when the admin form leaves the logo empty.
pub const PLACEHOLDER_LOGO_URL: &str = "https://placehold.co/120x120?text=University+Logo";

/// Location used when the admin form leaves the location empty.
pub const DEFAULT_LOCATION: &str = "Kazakhstan";

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("admin passcode not configured")]
    PasscodeNotConfigured,

    #[error("incorrect admin passcode")]
    IncorrectPasscode,

    #[error("admin session missing or expired")]
    Unauthorized,

    #[error("university name is required")]
    NameRequired,
}

/// Proof of a successful passcode check, valid for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminSession {
    pub token: String,
}

/// Shared-passcode gate for admin operations.
///
/// Sessions live in memory only and are lost on restart.
#[derive(Debug)]
pub struct AdminGate {
    passcode: Option<String>,
    sessions: Mutex<HashSet<String>>,
}

impl AdminGate {
    pub fn new(passcode: Option<String>) -> Self {
        Self {
            passcode: passcode.filter(|p| !p.trim().is_empty()),
            sessions: Mutex::new(HashSet::new()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.passcode.is_some()
    }

    /// Checks `input` against the passcode, both trimmed, and opens a session.
    ///
    /// # Errors
    /// - `AdminError::PasscodeNotConfigured` - No passcode configured
    /// - `AdminError::IncorrectPasscode` - Input does not match
    pub fn authorize(&self, input: &str) -> Result<AdminSession, AdminError> {
        let passcode = self
            .passcode
            .as_deref()
            .ok_or(AdminError::PasscodeNotConfigured)?;

        if input.trim() != passcode.trim() {
            warn!("Rejected admin passcode");
            return Err(AdminError::IncorrectPasscode);
        }

        let token = uuid::Uuid::new_v4().to_string();
        self.sessions.lock().insert(token.clone());
        info!("Admin session opened");
        Ok(AdminSession { token })
    }

    /// Verifies a session token.
    ///
    /// # Errors
    /// - `AdminError::PasscodeNotConfigured` - No passcode configured
    /// - `AdminError::Unauthorized` - Token unknown
    pub fn verify(&self, token: &str) -> Result<(), AdminError> {
        if !self.is_configured() {
            return Err(AdminError::PasscodeNotConfigured);
        }
        if self.sessions.lock().contains(token) {
            Ok(())
        } else {
            Err(AdminError::Unauthorized)
        }
    }

    /// Ends a session. Unknown tokens are ignored.
    pub fn revoke(&self, token: &str) {
        self.sessions.lock().remove(token);
    }
}

/// Admin form input. List fields hold one entry per line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminForm {
    pub id: Option<String>,
    pub name: String,
    pub logo_url: String,
    pub location: String,
    pub mission_history: String,
    pub mission: String,
    pub history: String,
    pub achievements: String,
    pub requirements: String,
    pub deadlines: String,
    pub scholarships: String,
    pub partners: String,
    pub exchange_programs: String,
    pub foreign_student_info: String,
    #[serde(rename = "tour3dUrl")]
    pub tour_3d_url: String,
    pub program_title: String,
    pub duration: String,
    pub tuition_fee: String,
    pub description: String,
    pub faculty: String,
}

impl AdminForm {
    /// Converts the form into a record.
    ///
    /// The id is the explicit id when given, else the slug of the name. A
    /// program is created only when a program title is given, with id
    /// `<university id>-<slug of title>`.
    ///
    /// # Errors
    /// - `AdminError::NameRequired` - Name is blank
    pub fn into_university(self) -> Result<University, AdminError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(AdminError::NameRequired);
        }

        let id = self
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| slugify(&name));

        let program_title = self.program_title.trim();
        let programs = if program_title.is_empty() {
            Vec::new()
        } else {
            vec![Program {
                id: format!("{id}-{}", slugify(program_title)),
                title: program_title.to_string(),
                duration: self.duration.trim().to_string(),
                tuition_fee: self.tuition_fee.trim().to_string(),
                description: self.description.trim().to_string(),
                faculty: non_empty(&self.faculty),
            }]
        };

        Ok(University {
            id,
            name,
            logo_url: non_empty(&self.logo_url).unwrap_or_else(|| PLACEHOLDER_LOGO_URL.to_string()),
            location: non_empty(&self.location).unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            mission_history: Some(self.mission_history.trim().to_string()),
            mission: non_empty(&self.mission),
            history: non_empty(&self.history),
            achievements: lines(&self.achievements),
            admissions: Admissions {
                requirements: lines(&self.requirements),
                deadlines: lines(&self.deadlines),
                scholarships: lines(&self.scholarships),
            },
            cooperation: Cooperation {
                partners: lines(&self.partners),
                exchange_programs: lines(&self.exchange_programs),
                foreign_student_info: self.foreign_student_info.trim().to_string(),
            },
            tour_3d_url: Some(self.tour_3d_url.trim().to_string()),
            programs,
        })
    }
}

fn lines(value: &str) -> Vec<String> {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
