//! Table registry
//!
//! The registry is the ordered set of table schemas the panel knows about.
//! Its order is the tab order. It is built (or loaded) once at startup,
//! validated, and never mutated afterwards.

use crate::field::FieldDescriptor;
use crate::table::{Identity, KeySegment, TableSchema};
use careadmin_core::{AdminError, AdminResult, Validatable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Table shown when the panel starts
pub const DEFAULT_TABLE: &str = "users";

const CAREGIVING_TYPES: [&str; 3] = ["BABYSITTER", "ELDERLY_CARE", "PLAYMATE_FOR_CHILDREN"];

/// Ordered collection of table schemas
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableRegistry {
    tables: Vec<TableSchema>,
}

impl TableRegistry {
    /// Create a registry from schemas, in tab order
    pub fn new(tables: Vec<TableSchema>) -> Self {
        Self { tables }
    }

    /// The care-services dataset the backend serves
    pub fn standard() -> Self {
        let users = TableSchema::new("users", "/users", "Users", Identity::single("user_id"))
            .with_field(FieldDescriptor::number("user_id", "User ID").readonly())
            .with_field(FieldDescriptor::email("email", "Email").required())
            .with_field(FieldDescriptor::text("given_name", "Given Name").required())
            .with_field(FieldDescriptor::text("surname", "Surname").required())
            .with_field(FieldDescriptor::text("city", "City").required())
            .with_field(FieldDescriptor::text("phone_number", "Phone Number").required())
            .with_field(FieldDescriptor::textarea(
                "profile_description",
                "Profile Description",
            ))
            .with_field(FieldDescriptor::text("password", "Password").required());

        let caregivers = TableSchema::new(
            "caregivers",
            "/caregivers",
            "Caregivers",
            Identity::single("caregiver_user_id"),
        )
        .with_field(FieldDescriptor::number("caregiver_user_id", "Caregiver User ID").required())
        .with_field(
            FieldDescriptor::select("gender", "Gender", ["MALE", "FEMALE", "OTHER"]).required(),
        )
        .with_field(
            FieldDescriptor::select("caregiving_type", "Caregiving Type", CAREGIVING_TYPES)
                .required(),
        )
        .with_field(FieldDescriptor::number("hourly_rate", "Hourly Rate").required())
        .with_field(
            FieldDescriptor::file("photo", "Photo")
                .required()
                .optional_in_update(),
        );

        let members = TableSchema::new(
            "members",
            "/members",
            "Members",
            Identity::single("member_user_id"),
        )
        .with_field(FieldDescriptor::number("member_user_id", "Member User ID").required())
        .with_field(FieldDescriptor::textarea("house_rules", "House Rules"))
        .with_field(FieldDescriptor::textarea(
            "dependent_description",
            "Dependent Description",
        ));

        let addresses = TableSchema::new(
            "addresses",
            "/addresses",
            "Addresses",
            Identity::single("member_user_id"),
        )
        .with_singular("Address")
        .with_field(FieldDescriptor::number("member_user_id", "Member User ID").required())
        .with_field(FieldDescriptor::text("house_number", "House Number").required())
        .with_field(FieldDescriptor::text("street", "Street").required())
        .with_field(FieldDescriptor::text("town", "Town").required());

        let jobs = TableSchema::new("jobs", "/jobs", "Jobs", Identity::single("job_id"))
            .with_field(FieldDescriptor::number("job_id", "Job ID").readonly())
            .with_field(FieldDescriptor::number("member_user_id", "Member User ID").required())
            .with_field(
                FieldDescriptor::select(
                    "required_caregiving_type",
                    "Required Caregiving Type",
                    CAREGIVING_TYPES,
                )
                .required(),
            )
            .with_field(FieldDescriptor::textarea(
                "other_requirements",
                "Other Requirements",
            ))
            .with_field(FieldDescriptor::date("date_posted", "Date Posted"));

        let applications = TableSchema::new(
            "job-applications",
            "/job-applications",
            "Job Applications",
            Identity::composite([
                KeySegment::new("caregiver_user_id", "caregiver"),
                KeySegment::new("job_id", "job"),
            ]),
        )
        .with_field(FieldDescriptor::number("caregiver_user_id", "Caregiver User ID").required())
        .with_field(FieldDescriptor::number("job_id", "Job ID").required())
        .with_field(FieldDescriptor::date("date_applied", "Date Applied"));

        let appointments = TableSchema::new(
            "appointments",
            "/appointments",
            "Appointments",
            Identity::single("appointment_id"),
        )
        .with_field(FieldDescriptor::number("appointment_id", "Appointment ID").readonly())
        .with_field(FieldDescriptor::number("caregiver_user_id", "Caregiver User ID").required())
        .with_field(FieldDescriptor::number("member_user_id", "Member User ID").required())
        .with_field(FieldDescriptor::date("appointment_date", "Appointment Date").required())
        .with_field(FieldDescriptor::time("appointment_time", "Appointment Time").required())
        .with_field(FieldDescriptor::number("work_hours", "Work Hours").required())
        .with_field(
            FieldDescriptor::select("status", "Status", ["PENDING", "ACCEPTED", "DECLINED"])
                .required(),
        );

        Self::new(vec![
            users,
            caregivers,
            members,
            addresses,
            jobs,
            applications,
            appointments,
        ])
    }

    /// Look up a schema by key
    pub fn get(&self, key: &str) -> AdminResult<&TableSchema> {
        self.tables
            .iter()
            .find(|t| t.key == key)
            .ok_or_else(|| AdminError::UnknownTable(key.to_string()))
    }

    /// Check if a key is registered
    pub fn contains(&self, key: &str) -> bool {
        self.tables.iter().any(|t| t.key == key)
    }

    /// Keys in tab order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.key.as_str())
    }

    /// Schemas in tab order
    pub fn iter(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.iter()
    }

    /// The table shown at startup: `users` when registered, else the first tab
    pub fn default_key(&self) -> Option<&str> {
        if self.contains(DEFAULT_TABLE) {
            Some(DEFAULT_TABLE)
        } else {
            self.tables.first().map(|t| t.key.as_str())
        }
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the registry has no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Validatable for TableRegistry {
    fn validate(&self) -> AdminResult<()> {
        if self.tables.is_empty() {
            return Err(AdminError::validation("Registry declares no tables"));
        }

        let mut keys = HashSet::new();
        for table in &self.tables {
            table.validate()?;
            if !keys.insert(table.key.as_str()) {
                return Err(AdminError::validation(format!(
                    "Duplicate table key '{}'",
                    table.key
                )));
            }
        }

        Ok(())
    }

    fn validation_errors(&self) -> Vec<String> {
        let mut errors: Vec<String> = self
            .tables
            .iter()
            .filter_map(|t| t.validate().err())
            .map(|e| e.to_string())
            .collect();
        if self.tables.is_empty() {
            errors.push("Registry declares no tables".to_string());
        }
        errors
    }
}

// ============================================================================
// Tests
// ============================================================================
