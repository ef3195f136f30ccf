use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

pub const CONTRACT_ID: &str = "signflow.records";
pub const CONTRACT_VERSION: &str = "1";

pub const SIGNED_COPY_STATUS: DocumentStatus = DocumentStatus::Aceptado;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Manager,
    Coordinator,
    Company,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One hand-drawn signature as it is persisted on a document or meeting.
///
/// `data` is a `data:image/png;base64,...` URI with a transparent background
/// and `position` is the top-left anchor in content-canvas pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    pub user_id: String,
    pub user_name: String,
    pub role: Role,
    pub data: String,
    pub position: Position,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    Borrador,
    Presentado,
    Aceptado,
    Rechazado,
}

impl DocumentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Borrador => "BORRADOR",
            DocumentStatus::Presentado => "PRESENTADO",
            DocumentStatus::Aceptado => "ACEPTADO",
            DocumentStatus::Rechazado => "RECHAZADO",
        }
    }

    // Draft -> presented -> accepted/rejected; a rejected document may be presented again.
    pub fn can_transition_to(self, next: DocumentStatus) -> bool {
        matches!(
            (self, next),
            (DocumentStatus::Borrador, DocumentStatus::Presentado)
                | (DocumentStatus::Presentado, DocumentStatus::Aceptado)
                | (DocumentStatus::Presentado, DocumentStatus::Rechazado)
                | (DocumentStatus::Rechazado, DocumentStatus::Presentado)
        )
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingStatus {
    Programada,
    EnCurso,
    Realizada,
    Cancelada,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingKind {
    Presencial,
    Online,
}

impl MeetingKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MeetingKind::Presencial => "PRESENCIAL",
            MeetingKind::Online => "ONLINE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub code: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<String>,
}

/// The person driving a signing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signer {
    pub id: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub url: String,
    pub status: DocumentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub signatures: Vec<Signature>,
    // Set on derived "- Firmado" copies; points at the unsigned original.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_from: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: String,
    pub project_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub time: String,
    pub reason: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: MeetingKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams_link: Option<String>,
    pub status: MeetingStatus,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute_pdf_url: Option<String>,
    #[serde(default)]
    pub signatures: Vec<Signature>,
    #[serde(default)]
    pub is_notified: bool,
}

pub fn has_signed(signatures: &[Signature], user_id: &str) -> bool {
    signatures.iter().any(|sig| sig.user_id == user_id)
}

pub fn artifact_sha256(bytes: &[u8]) -> String {
    hex_sha256(bytes)
}

/// SHA-256 over the canonical JSON form of a signature (object keys sorted).
pub fn signature_fingerprint(signature: &Signature) -> String {
    let canonical = serde_json::to_value(signature)
        .map(|value| value.to_string())
        .unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(CONTRACT_ID.as_bytes());
    hasher.update(b"\n");
    hasher.update(CONTRACT_VERSION.as_bytes());
    hasher.update(b"\n");
    hasher.update(canonical.as_bytes());
    hex_digest(hasher.finalize().as_slice())
}

fn hex_sha256(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex_digest(hasher.finalize().as_slice())
}

fn hex_digest(digest: &[u8]) -> String {
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        use std::fmt::Write;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
