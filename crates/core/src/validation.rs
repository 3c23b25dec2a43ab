//! Validation of inbound payloads.
//!
//! Payloads arrive as flat records where foreign keys are plain `*_id`
//! integers. Validation happens in two phases:
//!
//! 1. Field checks ([`FieldCheck`]) collect every missing, blank or oversized
//!    field. If any field fails, no lookups are performed.
//! 2. Reference resolution ([`resolve_references`]) confirms each foreign key
//!    points at an existing row, always in School, Teacher, Course order, and
//!    stops at the first dangling reference.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::db::repository::{
    CampusRepository, CourseRepository, SchoolRepository, TeacherRepository,
};
use crate::error::Result;
use crate::models::{
    administrator::{AdministratorFields, AdministratorPayload},
    course::{CourseFields, CoursePayload},
    school::{SchoolFields, SchoolPayload},
    student::{StudentFields, StudentPayload},
    teacher::{TeacherFields, TeacherPayload},
    transfer::{TransferPayload, TransferRequest},
};

/// Longest permitted entity name, in characters.
pub const MAX_NAME_LENGTH: usize = 128;

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";

fn too_long(max: usize) -> String {
    format!("Ensure this field has no more than {max} characters.")
}

/// Field-keyed validation messages, serialized as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// Build an error set holding one message for one field.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`, empty if it passed.
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Accumulates field-level failures for one payload.
///
/// Each check returns a usable placeholder on failure so callers can keep
/// going and report every bad field at once; `finish` decides the outcome.
#[derive(Debug, Default)]
pub struct FieldCheck {
    errors: ValidationErrors,
}

impl FieldCheck {
    /// Required, non-blank, at most [`MAX_NAME_LENGTH`] characters. Trimmed.
    pub fn name(&mut self, field: &str, value: Option<&str>) -> String {
        let name = self.text(field, value);
        if name.chars().count() > MAX_NAME_LENGTH {
            self.errors.add(field, too_long(MAX_NAME_LENGTH));
        }
        name
    }

    /// Required and non-blank. Trimmed.
    pub fn text(&mut self, field: &str, value: Option<&str>) -> String {
        match value.map(str::trim) {
            None => {
                self.errors.add(field, REQUIRED);
                String::new()
            }
            Some("") => {
                self.errors.add(field, BLANK);
                String::new()
            }
            Some(v) => v.to_string(),
        }
    }

    /// Required integer id.
    pub fn id(&mut self, field: &str, value: Option<i64>) -> i64 {
        match value {
            Some(id) => id,
            None => {
                self.errors.add(field, REQUIRED);
                0
            }
        }
    }

    pub fn finish(self) -> std::result::Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Entity kinds a payload may reference. Declaration order is resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Reference {
    School,
    Teacher,
    Course,
}

impl Reference {
    /// Payload field carrying this reference.
    pub fn field(self) -> &'static str {
        match self {
            Reference::School => "school_id",
            Reference::Teacher => "teacher_id",
            Reference::Course => "course_id",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Reference::School => "School",
            Reference::Teacher => "Teacher",
            Reference::Course => "Course",
        }
    }

    async fn exists(self, repo: &dyn CampusRepository, id: i64) -> Result<bool> {
        let found = match self {
            Reference::School => repo.get_school(id).await?.is_some(),
            Reference::Teacher => repo.get_teacher(id).await?.is_some(),
            Reference::Course => repo.get_course(id).await?.is_some(),
        };
        Ok(found)
    }
}

/// Confirm every reference exists, short-circuiting on the first that does not.
pub async fn resolve_references(
    repo: &dyn CampusRepository,
    references: &[(Reference, i64)],
) -> Result<()> {
    let mut ordered = references.to_vec();
    ordered.sort_by_key(|(reference, _)| *reference);

    for (reference, id) in ordered {
        if !reference.exists(repo, id).await? {
            tracing::debug!(reference = reference.label(), id, "Dangling reference");
            return Err(ValidationErrors::single(
                reference.field(),
                format!("Invalid data for {}", reference.label()),
            )
            .into());
        }
    }
    Ok(())
}

/// Turns an inbound payload into checked column values.
#[async_trait]
pub trait Validate: Send {
    type Fields: Send;

    async fn validate(self, repo: &dyn CampusRepository) -> Result<Self::Fields>;
}

#[async_trait]
impl Validate for SchoolPayload {
    type Fields = SchoolFields;

    async fn validate(self, _repo: &dyn CampusRepository) -> Result<SchoolFields> {
        let mut check = FieldCheck::default();
        let name = check.name("name", self.name.as_deref());
        let address = check.text("address", self.address.as_deref());
        check.finish()?;
        Ok(SchoolFields { name, address })
    }
}

#[async_trait]
impl Validate for AdministratorPayload {
    type Fields = AdministratorFields;

    async fn validate(self, repo: &dyn CampusRepository) -> Result<AdministratorFields> {
        let mut check = FieldCheck::default();
        let name = check.name("name", self.name.as_deref());
        let school_id = check.id("school_id", self.school_id);
        check.finish()?;

        resolve_references(repo, &[(Reference::School, school_id)]).await?;
        Ok(AdministratorFields { name, school_id })
    }
}

#[async_trait]
impl Validate for TeacherPayload {
    type Fields = TeacherFields;

    async fn validate(self, repo: &dyn CampusRepository) -> Result<TeacherFields> {
        let mut check = FieldCheck::default();
        let name = check.name("name", self.name.as_deref());
        let school_id = check.id("school_id", self.school_id);
        check.finish()?;

        resolve_references(repo, &[(Reference::School, school_id)]).await?;
        Ok(TeacherFields { name, school_id })
    }
}

#[async_trait]
impl Validate for CoursePayload {
    type Fields = CourseFields;

    async fn validate(self, repo: &dyn CampusRepository) -> Result<CourseFields> {
        let mut check = FieldCheck::default();
        let name = check.name("name", self.name.as_deref());
        let location = check.text("location", self.location.as_deref());
        let school_id = check.id("school_id", self.school_id);
        let teacher_id = check.id("teacher_id", self.teacher_id);
        check.finish()?;

        resolve_references(
            repo,
            &[
                (Reference::School, school_id),
                (Reference::Teacher, teacher_id),
            ],
        )
        .await?;
        Ok(CourseFields {
            name,
            location,
            school_id,
            teacher_id,
        })
    }
}

#[async_trait]
impl Validate for StudentPayload {
    type Fields = StudentFields;

    async fn validate(self, repo: &dyn CampusRepository) -> Result<StudentFields> {
        let mut check = FieldCheck::default();
        let name = check.name("name", self.name.as_deref());
        let school_id = check.id("school_id", self.school_id);
        let course_id = check.id("course_id", self.course_id);
        check.finish()?;

        resolve_references(
            repo,
            &[
                (Reference::School, school_id),
                (Reference::Course, course_id),
            ],
        )
        .await?;
        Ok(StudentFields {
            name,
            school_id,
            course_id,
        })
    }
}

#[async_trait]
impl Validate for TransferPayload {
    type Fields = TransferRequest;

    /// Only shape is checked here; existence is part of the transfer itself.
    async fn validate(self, _repo: &dyn CampusRepository) -> Result<TransferRequest> {
        let mut check = FieldCheck::default();
        let student_id = check.id("studentId", self.student_id);
        let from_course_id = check.id("fromCourseId", self.from_course_id);
        let to_course_id = check.id("toCourseId", self.to_course_id);
        check.finish()?;
        Ok(TransferRequest {
            student_id,
            from_course_id,
            to_course_id,
        })
    }
}
