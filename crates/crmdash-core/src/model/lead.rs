// ── Lead ──

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

use super::record::{Draft, Record, RecordId, overlay, required};
use crate::error::ValidationError;

/// A sales lead: a contact person at a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub company: String,
    pub city: String,
}

/// Editable lead fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
    Name,
    Email,
    Company,
    City,
}

/// Raw form text for a lead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadDraft {
    pub name: String,
    pub email: String,
    pub company: String,
    pub city: String,
}

/// Validated lead values. `None` leaves the field untouched on merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub city: Option<String>,
}

/// `local@domain`, both sides non-empty, no whitespace anywhere.
fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

impl Draft for LeadDraft {
    type Field = LeadField;
    type Patch = LeadPatch;

    const FIELDS: &'static [LeadField] = &[
        LeadField::Name,
        LeadField::Email,
        LeadField::Company,
        LeadField::City,
    ];

    fn value(&self, field: LeadField) -> &str {
        match field {
            LeadField::Name => &self.name,
            LeadField::Email => &self.email,
            LeadField::Company => &self.company,
            LeadField::City => &self.city,
        }
    }

    fn set(&mut self, field: LeadField, value: String) {
        match field {
            LeadField::Name => self.name = value,
            LeadField::Email => self.email = value,
            LeadField::Company => self.company = value,
            LeadField::City => self.city = value,
        }
    }

    fn label(field: LeadField) -> &'static str {
        match field {
            LeadField::Name => "Name",
            LeadField::Email => "Email",
            LeadField::Company => "Company",
            LeadField::City => "City",
        }
    }

    fn validate(&self) -> Result<LeadPatch, ValidationError> {
        let name = required(&self.name);
        let email = required(&self.email).filter(|e| looks_like_email(e.trim()));
        let company = required(&self.company);
        let city = required(&self.city);

        let invalid: Vec<&'static str> = [
            (LeadField::Name, name.is_none()),
            (LeadField::Email, email.is_none()),
            (LeadField::Company, company.is_none()),
            (LeadField::City, city.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, bad)| bad.then_some(field.into()))
        .collect();

        if !invalid.is_empty() {
            return Err(ValidationError::new(Lead::KIND, invalid));
        }

        Ok(LeadPatch {
            name,
            email,
            company,
            city,
        })
    }
}

impl Record for Lead {
    type Draft = LeadDraft;
    type Patch = LeadPatch;

    const KIND: &'static str = "lead";

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_draft(&self) -> LeadDraft {
        LeadDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            company: self.company.clone(),
            city: self.city.clone(),
        }
    }

    fn from_patch(id: RecordId, patch: LeadPatch) -> Result<Self, ValidationError> {
        match patch {
            LeadPatch {
                name: Some(name),
                email: Some(email),
                company: Some(company),
                city: Some(city),
            } => Ok(Self {
                id,
                name,
                email,
                company,
                city,
            }),
            incomplete => {
                let missing = [
                    (LeadField::Name, incomplete.name.is_none()),
                    (LeadField::Email, incomplete.email.is_none()),
                    (LeadField::Company, incomplete.company.is_none()),
                    (LeadField::City, incomplete.city.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, absent)| absent.then_some(field.into()))
                .collect();
                Err(ValidationError::new(Self::KIND, missing))
            }
        }
    }

    fn merge(&mut self, patch: LeadPatch) {
        overlay(&mut self.name, patch.name);
        overlay(&mut self.email, patch.email);
        overlay(&mut self.company, patch.company);
        overlay(&mut self.city, patch.city);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn draft(name: &str, email: &str, company: &str, city: &str) -> LeadDraft {
        LeadDraft {
            name: name.into(),
            email: email.into(),
            company: company.into(),
            city: city.into(),
        }
    }

    #[test]
    fn valid_draft_keeps_surrounding_spaces() {
        let patch = draft(" Ada ", "ada@x.io ", "Acme", "Paris")
            .validate()
            .unwrap();
        assert_eq!(patch.name.as_deref(), Some(" Ada "));
        assert_eq!(patch.email.as_deref(), Some("ada@x.io "));
    }

    #[test]
    fn every_bad_field_is_reported() {
        let err = draft("", "not-an-email", "  ", "Paris").validate().unwrap_err();
        assert_eq!(err.kind, "lead");
        assert_eq!(err.fields, vec!["name", "email", "company"]);
    }

    #[test]
    fn email_shape() {
        assert!(looks_like_email("a@b"));
        assert!(looks_like_email("first.last@example.co.uk"));
        assert!(!looks_like_email("@b"));
        assert!(!looks_like_email("a@"));
        assert!(!looks_like_email("a@b@c"));
        assert!(!looks_like_email("a b@c"));
        assert!(!looks_like_email("plain"));
    }

    #[test]
    fn merge_keeps_id() {
        let mut lead = Lead {
            id: RecordId::new(3),
            name: "Ada".into(),
            email: "ada@x.io".into(),
            company: "Acme".into(),
            city: "Paris".into(),
        };
        let patch = draft("Ada L", "ada@y.io", "Acme", "Lyon").validate().unwrap();
        lead.merge(patch);

        assert_eq!(lead.id, RecordId::new(3));
        assert_eq!(lead.name, "Ada L");
        assert_eq!(lead.city, "Lyon");
    }

    #[test]
    fn draft_round_trips_through_record() {
        let lead = Lead::from_patch(
            RecordId::new(9),
            draft("Bo", "bo@x.io", "Initech", "Austin").validate().unwrap(),
        )
        .unwrap();
        assert_eq!(lead.to_draft(), draft("Bo", "bo@x.io", "Initech", "Austin"));
    }

    #[test]
    fn from_incomplete_patch_names_missing_fields() {
        let err = Lead::from_patch(
            RecordId::new(1),
            LeadPatch {
                name: Some("Ada".into()),
                ..LeadPatch::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.fields, vec!["email", "company", "city"]);
    }

    #[test]
    fn field_names_are_snake_case() {
        let name: &'static str = LeadField::Company.into();
        assert_eq!(name, "company");
        assert_eq!(LeadDraft::label(LeadField::Company), "Company");
    }
}
