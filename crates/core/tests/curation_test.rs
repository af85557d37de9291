//! Tests for the curation boundary: role wire names and response parsing.

use annotext_core::curation::{
    ClassificationRole, CurationRejected, CurationRequest, StatementRole, parse_curation_response,
};

// ============================================================================
// Response parsing
// ============================================================================

#[test]
fn test_success_sentinel_parses_to_ok() {
    assert_eq!(parse_curation_response("success"), Ok(()));
    assert_eq!(parse_curation_response("curation successfully stored"), Ok(()));
}

#[test]
fn test_other_bodies_become_rejections() {
    let err = parse_curation_response("annotation surface does not match\n").unwrap_err();
    assert_eq!(err, CurationRejected("annotation surface does not match".to_string()));
}

#[test]
fn test_rejection_message_is_displayed_verbatim() {
    let err = parse_curation_response("statement 4 not found").unwrap_err();
    assert_eq!(err.to_string(), "statement 4 not found");
}

// ============================================================================
// Roles
// ============================================================================

#[test]
fn test_statement_role_wire_names() {
    let names: Vec<&str> = StatementRole::ALL.iter().map(|r| r.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "entity",
            "property",
            "quantity",
            "temporal_scope",
            "spatial_scope",
            "reference",
            "method",
            "qualifier",
        ]
    );
}

#[test]
fn test_classification_role_wire_names() {
    assert_eq!(ClassificationRole::Type.as_str(), "type");
    assert_eq!(ClassificationRole::Rational.as_str(), "rational");
    assert_eq!(ClassificationRole::System.as_str(), "system");
}

#[test]
fn test_request_serialization_uses_wire_names() {
    let request = CurationRequest {
        statement_index: 4,
        role: StatementRole::TemporalScope,
        surface_text: "per year".to_string(),
        approve: false,
        comment: Some("scope is per decade".to_string()),
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["role"], "temporal_scope");
    assert_eq!(value["statement_index"], 4);
    assert_eq!(value["approve"], false);
}
