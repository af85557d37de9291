//! Curation write-path boundary.
//!
//! The write API lives in an external service; this module pins the request
//! shapes and turns the service's plain-string responses into a structured
//! outcome so the sentinel protocol stays contained at the boundary.

use serde::Serialize;
use thiserror::Error;

/// Span-bearing statement roles accepted by the curation endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementRole {
    Entity,
    Property,
    Quantity,
    TemporalScope,
    SpatialScope,
    Reference,
    Method,
    Qualifier,
}

impl StatementRole {
    pub const ALL: [StatementRole; 8] = [
        StatementRole::Entity,
        StatementRole::Property,
        StatementRole::Quantity,
        StatementRole::TemporalScope,
        StatementRole::SpatialScope,
        StatementRole::Reference,
        StatementRole::Method,
        StatementRole::Qualifier,
    ];

    /// Wire name used by the curation endpoints.
    pub const fn as_str(self) -> &'static str {
        match self {
            StatementRole::Entity => "entity",
            StatementRole::Property => "property",
            StatementRole::Quantity => "quantity",
            StatementRole::TemporalScope => "temporal_scope",
            StatementRole::SpatialScope => "spatial_scope",
            StatementRole::Reference => "reference",
            StatementRole::Method => "method",
            StatementRole::Qualifier => "qualifier",
        }
    }
}

/// Classification-only roles; curated by label, never by span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationRole {
    Type,
    Rational,
    System,
}

impl ClassificationRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            ClassificationRole::Type => "type",
            ClassificationRole::Rational => "rational",
            ClassificationRole::System => "system",
        }
    }
}

/// Approve/reject payload for one role of one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurationRequest {
    pub statement_index: usize,
    pub role: StatementRole,
    /// Surface text of the role being curated, echoed for server-side
    /// consistency checks.
    pub surface_text: String,
    pub approve: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Surface-text replacement payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditRequest {
    pub statement_index: usize,
    pub role: StatementRole,
    pub old_text: String,
    pub new_text: String,
}

/// A curation write the service refused, carrying its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CurationRejected(pub String);

/// Parses a curation endpoint's string response.
///
/// The service signals success by including the substring "success" in the
/// body; any other body is the message to surface to the curator. The
/// sentinel never leaves this function.
pub fn parse_curation_response(body: &str) -> Result<(), CurationRejected> {
    if body.contains("success") {
        Ok(())
    } else {
        Err(CurationRejected(body.trim().to_string()))
    }
}
