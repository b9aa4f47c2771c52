use chrono::Utc;

use super::*;

const DEFINITION_WITH_RULES: &str = r#"{
  "component-definition": {
    "uuid": "c8106bc8-5174-4e86-91a4-52f2fe0ed027",
    "metadata": {
      "title": "Kubernetes component definition",
      "last-modified": "2024-03-01T12:00:00Z",
      "version": "1.0",
      "oscal-version": "1.1.2"
    },
    "components": [
      {
        "uuid": "a29b95c8-5626-4a71-9b1b-54e0bb8b4451",
        "type": "service",
        "title": "TestKubernetes",
        "description": "A kubernetes cluster",
        "props": [
          {
            "name": "Rule_Id",
            "value": "etcd_cert_file",
            "ns": "https://attest.dev/schemas/oscal",
            "remarks": "rule_set_0"
          }
        ],
        "control-implementations": [
          {
            "uuid": "16b2898a-a0a1-46cc-a40d-157b29bd0a17",
            "source": "profiles/cis/profile.json",
            "description": "CIS profile",
            "set-parameters": [
              { "param-id": "file_name", "values": ["override.pem"] }
            ],
            "implemented-requirements": [
              {
                "uuid": "9f3ec677-a086-4dbe-a88f-77bd96213423",
                "control-id": "CIS-2.1",
                "description": "Ensure cert files are set",
                "statements": [
                  {
                    "statement-id": "CIS-2.1_smt",
                    "uuid": "f3a54bbe-e82e-4f80-bbb9-7e4f36e3cf37",
                    "description": "statement detail"
                  }
                ]
              }
            ]
          }
        ]
      }
    ]
  }
}"#;

#[test]
fn component_definition_decodes_with_nesting() {
    let document: Document = serde_json::from_str(DEFINITION_WITH_RULES)
        .unwrap_or_else(|err| panic!("decode failed: {err}"));
    let Document::ComponentDefinition(definition) = document else {
        panic!("expected a component definition");
    };
    let components = definition.components.as_deref().unwrap_or_default();
    assert_eq!(components.len(), 1);
    let component = &components[0];
    assert_eq!(component.component_type, ComponentType::Service);
    assert_eq!(component.props.as_deref().map(<[Property]>::len), Some(1));

    let implementations = component.control_implementations.as_deref().unwrap_or_default();
    assert_eq!(implementations.len(), 1);
    let implementation = &implementations[0];
    assert_eq!(implementation.source, "profiles/cis/profile.json");
    let requirement = &implementation.implemented_requirements[0];
    assert_eq!(requirement.control_id, "CIS-2.1");
    assert_eq!(
        requirement.statements.as_deref().unwrap_or_default()[0].statement_id,
        "CIS-2.1_smt"
    );
}

#[test]
fn envelope_round_trips_with_kebab_case_keys() {
    let plan = AssessmentPlan {
        uuid: "3c38c9ea-cb34-4a5a-bf03-6e98e44a8aca".into(),
        metadata: Metadata {
            title: "plan".into(),
            last_modified: Utc::now(),
            version: "0.1.0".into(),
            oscal_version: "1.1.2".into(),
        },
        import_ssp: ImportSsp {
            href: "REPLACE_ME".into(),
        },
        local_definitions: None,
        reviewed_controls: ReviewedControls {
            description: None,
            control_selections: vec![ControlSelection {
                description: None,
                include_controls: Some(vec![SelectControlById {
                    control_id: "CIS-2.1".into(),
                }]),
            }],
        },
        assessment_subjects: None,
        assessment_assets: None,
        tasks: None,
    };
    let json = serde_json::to_string(&Document::AssessmentPlan(plan.clone()))
        .unwrap_or_else(|err| panic!("encode failed: {err}"));
    assert!(json.contains("\"assessment-plan\""));
    assert!(json.contains("\"import-ssp\""));
    assert!(json.contains("\"reviewed-controls\""));
    assert!(json.contains("\"control-id\":\"CIS-2.1\""));
    // Optional empty sections are omitted, not serialized as null.
    assert!(!json.contains("local-definitions"));

    let decoded: Document = serde_json::from_str(&json)
        .unwrap_or_else(|err| panic!("decode failed: {err}"));
    assert_eq!(decoded, Document::AssessmentPlan(plan));
}

#[test]
fn component_type_serializes_lowercase() {
    let json = serde_json::to_string(&ComponentType::Validation)
        .unwrap_or_else(|err| panic!("encode failed: {err}"));
    assert_eq!(json, "\"validation\"");
    assert_eq!(ComponentType::Validation.to_string(), "validation");
}

#[test]
fn unknown_component_type_is_rejected() {
    let result: Result<ComponentType, _> = serde_json::from_str("\"appliance\"");
    assert!(result.is_err());
}
