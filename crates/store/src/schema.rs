//! Resource schema registry.
//!
//! Every entity the API serves is described by a static [`ResourceSchema`]:
//! which fields free-text search covers, which query parameters filter
//! exactly, which fields reference other collections (and what gets embedded
//! when they are populated), the allowed status values, and the snake_case
//! aliases accepted at the API boundary.
//!
//! The registry replaces a per-resource controller layer: handlers look a
//! schema up by URL path segment and drive the generic CRUD/query pipeline
//! from its declarations.

/// A reference field pointing at another collection.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceDef {
    /// The field holding the referenced id (e.g. `staffId`).
    pub field: &'static str,
    /// The collection the id points into.
    pub target: &'static str,
    /// Display fields embedded when the reference is populated.
    pub projection: &'static [&'static str],
}

impl ReferenceDef {
    /// Returns the key the populated sub-object is embedded under.
    ///
    /// `staffId` embeds as `staff`, `headStaffId` as `headStaff`. A field
    /// without the `Id` suffix embeds under `<field>Ref` to avoid clobbering
    /// the id itself.
    pub fn embed_key(&self) -> String {
        match self.field.strip_suffix("Id") {
            Some(stem) if !stem.is_empty() => stem.to_string(),
            _ => format!("{}Ref", self.field),
        }
    }
}

/// A collection whose records reference this one, blocking deletion.
#[derive(Debug, Clone, Copy)]
pub struct DependentDef {
    /// The dependent collection.
    pub collection: &'static str,
    /// The field in the dependent collection holding the reference.
    pub field: &'static str,
}

/// Static description of one resource collection.
#[derive(Debug, Clone, Copy)]
pub struct ResourceSchema {
    /// Storage collection name.
    pub collection: &'static str,
    /// URL path segment under `/api`.
    pub path: &'static str,
    /// Text fields covered by the free-text `search` parameter.
    pub search_fields: &'static [&'static str],
    /// Query parameters accepted as exact-match filters.
    pub filter_params: &'static [&'static str],
    /// Field a `date` query parameter filters on.
    pub date_field: Option<&'static str>,
    /// Reference fields resolved by the populator.
    pub references: &'static [ReferenceDef],
    /// Allowed values for the `status` field (empty if the resource has none).
    pub status_values: &'static [&'static str],
    /// Fields that must be present on create.
    pub required_fields: &'static [&'static str],
    /// Field whose value must be unique within the collection, compared
    /// case-insensitively.
    pub unique_field: Option<&'static str>,
    /// Collections whose records block deletion while they reference this one.
    pub dependents: &'static [DependentDef],
    /// snake_case aliases accepted on input, mapped to canonical names.
    pub aliases: &'static [(&'static str, &'static str)],
}

impl ResourceSchema {
    /// Looks up the reference definition for a field, if declared.
    pub fn reference(&self, field: &str) -> Option<&ReferenceDef> {
        self.references.iter().find(|r| r.field == field)
    }

    /// Returns the canonical name for a possibly-aliased field.
    pub fn canonical_field<'a>(&self, field: &'a str) -> &'a str {
        self.aliases
            .iter()
            .find(|(alias, _)| *alias == field)
            .map(|(_, canonical)| *canonical)
            .unwrap_or(field)
    }

    /// Returns true if the value is an allowed status for this resource.
    pub fn allows_status(&self, value: &str) -> bool {
        self.status_values.is_empty() || self.status_values.contains(&value)
    }
}

/// Projection used when a patient reference is populated.
const PATIENT_PROJECTION: &[&str] = &["firstName", "lastName", "email"];

/// Projection used when a staff reference is populated.
const STAFF_PROJECTION: &[&str] = &["firstName", "lastName", "role", "email"];

/// The full schema registry, one entry per resource.
pub const SCHEMAS: &[ResourceSchema] = &[
    ResourceSchema {
        collection: "patients",
        path: "patients",
        search_fields: &["firstName", "lastName", "email", "contactNumber"],
        filter_params: &["gender", "bloodGroup"],
        date_field: None,
        references: &[],
        status_values: &[],
        required_fields: &["firstName", "lastName"],
        unique_field: None,
        dependents: &[],
        aliases: &[
            ("first_name", "firstName"),
            ("last_name", "lastName"),
            ("date_of_birth", "dateOfBirth"),
            ("contact_number", "contactNumber"),
            ("blood_group", "bloodGroup"),
        ],
    },
    ResourceSchema {
        collection: "appointments",
        path: "appointments",
        search_fields: &["reason"],
        filter_params: &["status", "type", "patientId", "staffId"],
        date_field: Some("date"),
        references: &[
            ReferenceDef {
                field: "patientId",
                target: "patients",
                projection: PATIENT_PROJECTION,
            },
            ReferenceDef {
                field: "staffId",
                target: "staff",
                projection: STAFF_PROJECTION,
            },
        ],
        status_values: &["scheduled", "completed", "cancelled", "no-show"],
        required_fields: &["patientId", "staffId", "date"],
        unique_field: None,
        dependents: &[],
        aliases: &[
            ("patient_id", "patientId"),
            ("staff_id", "staffId"),
        ],
    },
    ResourceSchema {
        collection: "staff",
        path: "staff",
        search_fields: &["firstName", "lastName", "email"],
        filter_params: &["role", "status", "departmentId"],
        date_field: None,
        references: &[ReferenceDef {
            field: "departmentId",
            target: "departments",
            projection: &["name"],
        }],
        status_values: &["active", "on-leave", "inactive"],
        required_fields: &["firstName", "lastName", "role"],
        unique_field: None,
        dependents: &[],
        aliases: &[
            ("first_name", "firstName"),
            ("last_name", "lastName"),
            ("contact_number", "contactNumber"),
            ("department_id", "departmentId"),
        ],
    },
    ResourceSchema {
        collection: "departments",
        path: "departments",
        search_fields: &["name", "description"],
        filter_params: &[],
        date_field: None,
        references: &[ReferenceDef {
            field: "headStaffId",
            target: "staff",
            projection: STAFF_PROJECTION,
        }],
        status_values: &[],
        required_fields: &["name"],
        unique_field: Some("name"),
        dependents: &[DependentDef {
            collection: "staff",
            field: "departmentId",
        }],
        aliases: &[("head_staff_id", "headStaffId")],
    },
    ResourceSchema {
        collection: "rooms",
        path: "rooms",
        search_fields: &["number"],
        filter_params: &["type", "status"],
        date_field: None,
        references: &[],
        status_values: &["available", "occupied", "maintenance"],
        required_fields: &["number", "type", "capacity"],
        unique_field: Some("number"),
        dependents: &[],
        aliases: &[("occupied_beds", "occupiedBeds")],
    },
    ResourceSchema {
        collection: "shifts",
        path: "shifts",
        search_fields: &[],
        filter_params: &["status", "staffId"],
        date_field: Some("date"),
        references: &[ReferenceDef {
            field: "staffId",
            target: "staff",
            projection: STAFF_PROJECTION,
        }],
        status_values: &["scheduled", "completed", "cancelled", "no-show"],
        required_fields: &["staffId", "date", "startTime", "endTime"],
        unique_field: None,
        dependents: &[],
        aliases: &[
            ("staff_id", "staffId"),
            ("start_time", "startTime"),
            ("end_time", "endTime"),
            ("break_start", "breakStart"),
            ("break_end", "breakEnd"),
        ],
    },
    ResourceSchema {
        collection: "treatments",
        path: "treatments",
        search_fields: &["name", "description"],
        filter_params: &["status", "patientId", "staffId"],
        date_field: None,
        references: &[
            ReferenceDef {
                field: "patientId",
                target: "patients",
                projection: PATIENT_PROJECTION,
            },
            ReferenceDef {
                field: "staffId",
                target: "staff",
                projection: STAFF_PROJECTION,
            },
        ],
        status_values: &["scheduled", "in-progress", "completed", "cancelled"],
        required_fields: &["patientId", "name"],
        unique_field: None,
        dependents: &[],
        aliases: &[
            ("patient_id", "patientId"),
            ("staff_id", "staffId"),
        ],
    },
    ResourceSchema {
        collection: "medications",
        path: "medications",
        search_fields: &["name", "category"],
        filter_params: &["category", "status"],
        date_field: None,
        references: &[],
        status_values: &["active", "discontinued"],
        required_fields: &["name"],
        unique_field: None,
        dependents: &[],
        aliases: &[],
    },
    ResourceSchema {
        collection: "visits",
        path: "visits",
        search_fields: &["reason"],
        filter_params: &["status", "patientId", "staffId"],
        date_field: Some("date"),
        references: &[
            ReferenceDef {
                field: "patientId",
                target: "patients",
                projection: PATIENT_PROJECTION,
            },
            ReferenceDef {
                field: "staffId",
                target: "staff",
                projection: STAFF_PROJECTION,
            },
        ],
        status_values: &["scheduled", "in-progress", "completed", "cancelled"],
        required_fields: &["patientId", "date"],
        unique_field: None,
        dependents: &[],
        aliases: &[
            ("patient_id", "patientId"),
            ("staff_id", "staffId"),
        ],
    },
    ResourceSchema {
        collection: "surgeries",
        path: "surgeries",
        search_fields: &["procedure"],
        filter_params: &["status", "patientId", "roomId"],
        date_field: Some("date"),
        references: &[
            ReferenceDef {
                field: "patientId",
                target: "patients",
                projection: PATIENT_PROJECTION,
            },
            ReferenceDef {
                field: "roomId",
                target: "rooms",
                projection: &["number", "type"],
            },
        ],
        status_values: &["scheduled", "in-progress", "completed", "cancelled"],
        required_fields: &["patientId", "procedure", "date"],
        unique_field: None,
        dependents: &[DependentDef {
            collection: "surgery_teams",
            field: "surgeryId",
        }],
        aliases: &[
            ("patient_id", "patientId"),
            ("room_id", "roomId"),
        ],
    },
    ResourceSchema {
        collection: "surgery_teams",
        path: "surgery-teams",
        search_fields: &[],
        filter_params: &["surgeryId", "staffId", "role"],
        date_field: None,
        references: &[
            ReferenceDef {
                field: "surgeryId",
                target: "surgeries",
                projection: &["procedure", "date"],
            },
            ReferenceDef {
                field: "staffId",
                target: "staff",
                projection: STAFF_PROJECTION,
            },
        ],
        status_values: &[],
        required_fields: &["surgeryId", "staffId"],
        unique_field: None,
        dependents: &[],
        aliases: &[
            ("surgery_id", "surgeryId"),
            ("staff_id", "staffId"),
        ],
    },
    ResourceSchema {
        collection: "feedback",
        path: "feedback",
        search_fields: &["comment"],
        filter_params: &["rating", "patientId"],
        date_field: None,
        references: &[ReferenceDef {
            field: "patientId",
            target: "patients",
            projection: PATIENT_PROJECTION,
        }],
        status_values: &[],
        required_fields: &["rating"],
        unique_field: None,
        dependents: &[],
        aliases: &[("patient_id", "patientId")],
    },
    ResourceSchema {
        collection: "complaints",
        path: "complaints",
        search_fields: &["subject", "description"],
        filter_params: &["status", "category"],
        date_field: None,
        references: &[],
        status_values: &["open", "in-review", "resolved", "dismissed"],
        required_fields: &["subject"],
        unique_field: None,
        dependents: &[],
        aliases: &[],
    },
    ResourceSchema {
        collection: "insurance",
        path: "insurance",
        search_fields: &["provider", "policyNumber"],
        filter_params: &["provider", "status", "patientId"],
        date_field: None,
        references: &[ReferenceDef {
            field: "patientId",
            target: "patients",
            projection: PATIENT_PROJECTION,
        }],
        status_values: &["active", "expired", "cancelled"],
        required_fields: &["patientId", "provider", "policyNumber"],
        unique_field: None,
        dependents: &[],
        aliases: &[
            ("patient_id", "patientId"),
            ("policy_number", "policyNumber"),
        ],
    },
];

/// Looks a schema up by its URL path segment.
pub fn by_path(path: &str) -> Option<&'static ResourceSchema> {
    SCHEMAS.iter().find(|s| s.path == path)
}

/// Looks a schema up by its collection name.
pub fn by_collection(collection: &str) -> Option<&'static ResourceSchema> {
    SCHEMAS.iter().find(|s| s.collection == collection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_path() {
        assert!(by_path("patients").is_some());
        assert!(by_path("surgery-teams").is_some());
        assert!(by_path("widgets").is_none());
    }

    #[test]
    fn test_by_collection() {
        assert_eq!(by_collection("surgery_teams").unwrap().path, "surgery-teams");
    }

    #[test]
    fn test_embed_key() {
        let schema = by_path("appointments").unwrap();
        let reference = schema.reference("staffId").unwrap();
        assert_eq!(reference.embed_key(), "staff");

        let dept = by_path("departments").unwrap();
        assert_eq!(dept.reference("headStaffId").unwrap().embed_key(), "headStaff");
    }

    #[test]
    fn test_canonical_field() {
        let schema = by_path("patients").unwrap();
        assert_eq!(schema.canonical_field("first_name"), "firstName");
        assert_eq!(schema.canonical_field("firstName"), "firstName");
        assert_eq!(schema.canonical_field("unknown"), "unknown");
    }

    #[test]
    fn test_allows_status() {
        let schema = by_path("appointments").unwrap();
        assert!(schema.allows_status("no-show"));
        assert!(!schema.allows_status("pending"));

        // No declared value set means any status is allowed.
        let patients = by_path("patients").unwrap();
        assert!(patients.allows_status("anything"));
    }

    #[test]
    fn test_registry_is_consistent() {
        for schema in SCHEMAS {
            for reference in schema.references {
                assert!(
                    by_collection(reference.target).is_some(),
                    "{} references unknown collection {}",
                    schema.collection,
                    reference.target
                );
            }
            for dependent in schema.dependents {
                let dep = by_collection(dependent.collection)
                    .unwrap_or_else(|| panic!("unknown dependent {}", dependent.collection));
                assert!(
                    dep.reference(dependent.field).is_some(),
                    "{}.{} is not a declared reference",
                    dependent.collection,
                    dependent.field
                );
            }
        }
    }
}
