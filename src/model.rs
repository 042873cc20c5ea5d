use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

/// Prefix shared by every status code.
pub const CODE_PREFIX: &str = "EST";

/// Names accepted when creating a status. Renames are not limited to this list.
pub const ALLOWED_NAMES: [&str; 6] = [
    "Creado",
    "Iniciado",
    "En evaluacion",
    "Suspendido",
    "Cancelado",
    "Finalizado",
];

/// Identifier of a status record, e.g. `EST004`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(String);

impl StatusCode {
    pub fn from_seq(seq: u64) -> Self {
        Self(format!("{CODE_PREFIX}{seq:03}"))
    }

    /// Numeric part of the code; `None` if the code does not follow the `EST<n>` shape.
    /// Digit runs too long for a `u64` saturate at `u64::MAX`.
    pub fn seq(&self) -> Option<u64> {
        let digits = self.0.strip_prefix(CODE_PREFIX)?;
        match digits.parse() {
            Ok(n) => Some(n),
            Err(_) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                Some(u64::MAX)
            }
            Err(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StatusCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub code: StatusCode,
    pub name: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub retired_at: Option<OffsetDateTime>,
}

impl StatusRecord {
    pub fn active(code: StatusCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            retired_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.retired_at.is_none()
    }
}

/// A project that points at a status by code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectReference {
    pub id: u32,
    pub name: String,
    pub status_code: StatusCode,
}

/// Serializable view of the whole catalog, used by `--json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub statuses: Vec<StatusRecord>,
    pub projects: Vec<ProjectReference>,
}

pub fn seed_statuses() -> Vec<StatusRecord> {
    ALLOWED_NAMES
        .iter()
        .take(5)
        .zip(1u64..)
        .map(|(name, seq)| StatusRecord::active(StatusCode::from_seq(seq), *name))
        .collect()
}

pub fn seed_projects() -> Vec<ProjectReference> {
    ["Proyecto Alpha", "Proyecto Beta", "Proyecto Gamma"]
        .iter()
        .zip(1u32..)
        .map(|(name, id)| ProjectReference {
            id,
            name: name.to_string(),
            status_code: StatusCode::from_seq(id.into()),
        })
        .collect()
}
