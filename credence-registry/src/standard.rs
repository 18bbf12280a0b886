//! The credentialing schema set.
//!
//! Fixed at process start; adding an entity means adding a declaration
//! here, never touching the engine.

use crate::{ChildSpec, Header, TableSpec};
use credence_types::TableName;

fn headers(labels: &[&str]) -> Vec<Header> {
    labels.iter().map(|l| Header::from_label(l)).collect()
}

pub(crate) fn standard_specs() -> Vec<TableSpec> {
    vec![
        TableSpec {
            entity_type: "Provider".to_string(),
            table: TableName::new("Providers"),
            headers: headers(&[
                "Id",
                "First Name",
                "Last Name",
                "Npi",
                "Credentialing Status",
                "Specialties JSON",
                "Is Active",
                "Created At",
                "Updated At",
            ]),
            children: vec![
                ChildSpec {
                    entity_type: "License".to_string(),
                    collection_key: "licenses".to_string(),
                    table: TableName::new("Licenses"),
                    headers: headers(&[
                        "Id",
                        "Provider Id",
                        "License Number",
                        "State",
                        "Expires At",
                        "Verified",
                    ]),
                    parent_link: "providerId".to_string(),
                    required: vec!["licenseNumber".to_string()],
                },
                ChildSpec {
                    entity_type: "Enrollment".to_string(),
                    collection_key: "enrollments".to_string(),
                    table: TableName::new("Enrollments"),
                    headers: headers(&[
                        "Id",
                        "Provider Id",
                        "Payer",
                        "Status",
                        "Effective Date",
                    ]),
                    parent_link: "providerId".to_string(),
                    required: vec!["payer".to_string()],
                },
            ],
        },
        TableSpec {
            entity_type: "Facility".to_string(),
            table: TableName::new("Facilities"),
            headers: headers(&["Id", "Name", "Address JSON", "Is Active", "Created At"]),
            children: vec![ChildSpec {
                entity_type: "Accreditation".to_string(),
                collection_key: "accreditations".to_string(),
                table: TableName::new("Accreditations"),
                headers: headers(&["Id", "Facility Id", "Body", "Expires At"]),
                parent_link: "facilityId".to_string(),
                required: vec!["body".to_string()],
            }],
        },
        TableSpec {
            entity_type: "CredentialingRequest".to_string(),
            table: TableName::new("CredentialingRequests"),
            headers: headers(&[
                "Id",
                "Provider Id",
                "Request Type",
                "Credentialing Status",
                "Checklist JSON",
                "Created At",
            ]),
            children: vec![
                ChildSpec {
                    entity_type: "Verification".to_string(),
                    collection_key: "verifications".to_string(),
                    table: TableName::new("Verifications"),
                    headers: headers(&["Id", "Request Id", "Source", "Result JSON", "Verified"]),
                    parent_link: "requestId".to_string(),
                    required: vec!["source".to_string()],
                },
                ChildSpec {
                    entity_type: "RequestNote".to_string(),
                    collection_key: "requestNotes".to_string(),
                    table: TableName::new("RequestNotes"),
                    headers: headers(&["Id", "Request Id", "Author", "Body", "Created At"]),
                    parent_link: "requestId".to_string(),
                    required: vec!["body".to_string()],
                },
            ],
        },
        TableSpec {
            entity_type: "Monitor".to_string(),
            table: TableName::new("Monitors"),
            headers: headers(&[
                "Id",
                "Provider Id",
                "Monitor Type",
                "Frequency",
                "Is Active",
                "Last Run At",
            ]),
            children: Vec::new(),
        },
        TableSpec {
            entity_type: "Webhook".to_string(),
            table: TableName::new("Webhooks"),
            headers: headers(&["Id", "Url", "Events JSON", "Enabled", "Created At"]),
            children: Vec::new(),
        },
    ]
}
