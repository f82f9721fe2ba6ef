//! Serde roundtrip and JsonSchema validation tests for all entity types.

use chrono::{NaiveDate, NaiveTime, Utc};
use schemars::schema_for;
use hito_core::entities::*;
use hito_core::enums::*;
use hito_core::identity::ActingUser;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

roundtrip_and_validate!(
    milestone_template_roundtrip,
    MilestoneTemplate,
    MilestoneTemplate {
        id: 7,
        name: "Declaración IVA".into(),
        frequency: 1,
        periodicity: PeriodicityUnit::Month,
        valid_from: date(2024, 1, 1),
        valid_until: Some(date(2026, 12, 31)),
        description: Some("Modelo 303".into()),
        mandatory: true,
    }
);

roundtrip_and_validate!(
    process_template_roundtrip,
    ProcessTemplate,
    ProcessTemplate {
        id: 3,
        name: "Contabilidad".into(),
        periodicity: PeriodicityUnit::Month,
        frequency: 1,
        enabled: true,
    }
);

roundtrip_and_validate!(
    process_link_roundtrip,
    ProcessMilestoneLink,
    ProcessMilestoneLink {
        process_template_id: 3,
        milestone_template_id: 7,
    }
);

roundtrip_and_validate!(
    client_process_roundtrip,
    ClientProcessInstance,
    ClientProcessInstance {
        id: 40,
        client_id: 1,
        process_template_id: 3,
        year: 2025,
        month: 3,
        start_date: date(2025, 3, 1),
    }
);

roundtrip_and_validate!(
    milestone_instance_roundtrip,
    MilestoneInstance,
    MilestoneInstance {
        id: 100,
        client_process_id: 40,
        milestone_template_id: 7,
        deadline_date: date(2025, 3, 20),
        deadline_time: NaiveTime::from_hms_opt(9, 30, 0),
        status: LifecycleStatus::Open,
        status_changed_at: Some(Utc::now()),
        kind: MilestoneKind::ThirdParty,
        critical: true,
        mandatory: true,
        enabled: true,
    }
);

roundtrip_and_validate!(
    completion_record_roundtrip,
    CompletionRecord,
    CompletionRecord {
        instance_id: 100,
        date: date(2025, 3, 19),
        time: NaiveTime::from_hms_opt(16, 2, 45),
        evidence: Some("evidence/100/acuse.pdf".into()),
    }
);

roundtrip_and_validate!(
    audit_record_roundtrip,
    AuditRecord,
    AuditRecord {
        id: Some(1),
        client_id: 1,
        instance_id: 100,
        milestone_template_id: 7,
        field: AuditField::DeadlineDate,
        previous_value: Some("2025-03-20".into()),
        new_value: Some("2025-03-25".into()),
        username: "mgarcia".into(),
        recorded_at: Utc::now(),
        reason: ReasonCode::ClientRequest,
        note: Some("Cliente pidió prórroga".into()),
        process_name: "Contabilidad".into(),
        milestone_name: "Declaración IVA".into(),
        subdepartment: Some("FISC".into()),
    }
);

roundtrip_and_validate!(
    sentinel_audit_record_roundtrip,
    AuditRecord,
    AuditRecord {
        id: None,
        client_id: 1,
        instance_id: 100,
        milestone_template_id: 7,
        field: AuditField::NoChanges,
        previous_value: None,
        new_value: None,
        username: "mgarcia".into(),
        recorded_at: Utc::now(),
        reason: ReasonCode::Other,
        note: None,
        process_name: "Contabilidad".into(),
        milestone_name: "Declaración IVA".into(),
        subdepartment: None,
    }
);

roundtrip_and_validate!(
    acting_user_roundtrip,
    ActingUser,
    ActingUser {
        username: "mgarcia".into(),
        subdepartment: Some("FISC".into()),
    }
);

#[test]
fn reason_code_schema_rejects_unset() {
    let schema = serde_json::to_value(schema_for!(ReasonCode)).unwrap();
    assert!(validate_against_schema(&schema, &serde_json::json!(2)).is_empty());
    assert!(!validate_against_schema(&schema, &serde_json::json!(0)).is_empty());
}
