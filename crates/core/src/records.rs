//! Record lifecycle for the five entity types.
//!
//! The storage traits in [`crate::db::repository`] report absence as
//! `Option`/`bool`. The functions here put validation in front of every
//! write and turn absence into [`CampusError::NotFound`], so callers get one
//! error taxonomy for every entity.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::db::repository::{
    AdministratorRepository, CampusRepository, CourseRepository, SchoolRepository,
    StudentRepository, TeacherRepository,
};
use crate::error::{CampusError, Result};
use crate::models::{
    administrator::{Administrator, AdministratorFields, AdministratorPayload},
    course::{Course, CourseFields, CoursePayload},
    school::{School, SchoolFields, SchoolPayload},
    student::{Student, StudentFields, StudentPayload},
    teacher::{Teacher, TeacherFields, TeacherPayload},
};
use crate::pagination::{Page, PageRequest, Window};
use crate::validation::Validate;

/// An entity with a standard create/get/list/update/delete lifecycle.
#[async_trait]
pub trait Record: Serialize + Send + Sync + Sized + 'static {
    /// Inbound shape, as deserialized from a request body.
    type Payload: Validate<Fields = Self::Fields> + DeserializeOwned + 'static;
    /// Checked column values.
    type Fields: Send + Sync;

    /// Singular name used in logs and errors.
    const ENTITY: &'static str;

    fn id(&self) -> i64;

    async fn insert(repo: &dyn CampusRepository, fields: &Self::Fields) -> Result<Self>;
    async fn find(repo: &dyn CampusRepository, id: i64) -> Result<Option<Self>>;
    /// One window of the listing, in the entity's list order.
    async fn find_window(repo: &dyn CampusRepository, window: Window) -> Result<Vec<Self>>;
    async fn count(repo: &dyn CampusRepository) -> Result<i64>;
    async fn replace(
        repo: &dyn CampusRepository,
        id: i64,
        fields: &Self::Fields,
    ) -> Result<Option<Self>>;
    async fn remove(repo: &dyn CampusRepository, id: i64) -> Result<bool>;
}

/// Validate `payload` and insert it.
pub async fn create<T: Record>(repo: &dyn CampusRepository, payload: T::Payload) -> Result<T> {
    let fields = payload.validate(repo).await?;
    let record = T::insert(repo, &fields).await?;
    info!(entity = T::ENTITY, id = record.id(), "Created record");
    Ok(record)
}

pub async fn get<T: Record>(repo: &dyn CampusRepository, id: i64) -> Result<T> {
    T::find(repo, id)
        .await?
        .ok_or_else(|| CampusError::not_found(T::ENTITY, id))
}

/// One page of the listing; `None` when the page lies past the end.
///
/// Only the requested window is read, after a `COUNT(*)` sizes the listing.
pub async fn list_page<T: Record>(
    repo: &dyn CampusRepository,
    request: PageRequest,
    path: &str,
) -> Result<Option<Page<T>>> {
    let count = usize::try_from(T::count(repo).await?).unwrap_or_default();
    if !request.fits(count) {
        debug!(entity = T::ENTITY, page = request.page(), count, "Page out of range");
        return Ok(None);
    }
    let results = T::find_window(repo, request.window()).await?;
    Ok(Some(request.into_page(count, results, path)))
}

/// Replace every field of an existing record.
///
/// A missing record is reported before the payload is looked at.
pub async fn update<T: Record>(
    repo: &dyn CampusRepository,
    id: i64,
    payload: T::Payload,
) -> Result<T> {
    if T::find(repo, id).await?.is_none() {
        return Err(CampusError::not_found(T::ENTITY, id));
    }
    let fields = payload.validate(repo).await?;
    let record = T::replace(repo, id, &fields)
        .await?
        .ok_or_else(|| CampusError::not_found(T::ENTITY, id))?;
    info!(entity = T::ENTITY, id, "Updated record");
    Ok(record)
}

/// Delete a record; dependents go with it.
pub async fn delete<T: Record>(repo: &dyn CampusRepository, id: i64) -> Result<()> {
    if !T::remove(repo, id).await? {
        debug!(entity = T::ENTITY, id, "Delete of missing record");
        return Err(CampusError::not_found(T::ENTITY, id));
    }
    info!(entity = T::ENTITY, id, "Deleted record");
    Ok(())
}

#[async_trait]
impl Record for School {
    type Payload = SchoolPayload;
    type Fields = SchoolFields;
    const ENTITY: &'static str = "school";

    fn id(&self) -> i64 {
        self.id
    }

    async fn insert(repo: &dyn CampusRepository, fields: &SchoolFields) -> Result<Self> {
        repo.create_school(fields).await
    }

    async fn find(repo: &dyn CampusRepository, id: i64) -> Result<Option<Self>> {
        repo.get_school(id).await
    }

    async fn find_window(repo: &dyn CampusRepository, window: Window) -> Result<Vec<Self>> {
        repo.page_schools(window).await
    }

    async fn count(repo: &dyn CampusRepository) -> Result<i64> {
        repo.count_schools().await
    }

    async fn replace(
        repo: &dyn CampusRepository,
        id: i64,
        fields: &SchoolFields,
    ) -> Result<Option<Self>> {
        repo.update_school(id, fields).await
    }

    async fn remove(repo: &dyn CampusRepository, id: i64) -> Result<bool> {
        repo.delete_school(id).await
    }
}

#[async_trait]
impl Record for Administrator {
    type Payload = AdministratorPayload;
    type Fields = AdministratorFields;
    const ENTITY: &'static str = "administrator";

    fn id(&self) -> i64 {
        self.id
    }

    async fn insert(repo: &dyn CampusRepository, fields: &AdministratorFields) -> Result<Self> {
        repo.create_administrator(fields).await
    }

    async fn find(repo: &dyn CampusRepository, id: i64) -> Result<Option<Self>> {
        repo.get_administrator(id).await
    }

    async fn find_window(repo: &dyn CampusRepository, window: Window) -> Result<Vec<Self>> {
        repo.page_administrators(window).await
    }

    async fn count(repo: &dyn CampusRepository) -> Result<i64> {
        repo.count_administrators().await
    }

    async fn replace(
        repo: &dyn CampusRepository,
        id: i64,
        fields: &AdministratorFields,
    ) -> Result<Option<Self>> {
        repo.update_administrator(id, fields).await
    }

    async fn remove(repo: &dyn CampusRepository, id: i64) -> Result<bool> {
        repo.delete_administrator(id).await
    }
}

#[async_trait]
impl Record for Teacher {
    type Payload = TeacherPayload;
    type Fields = TeacherFields;
    const ENTITY: &'static str = "teacher";

    fn id(&self) -> i64 {
        self.id
    }

    async fn insert(repo: &dyn CampusRepository, fields: &TeacherFields) -> Result<Self> {
        repo.create_teacher(fields).await
    }

    async fn find(repo: &dyn CampusRepository, id: i64) -> Result<Option<Self>> {
        repo.get_teacher(id).await
    }

    async fn find_window(repo: &dyn CampusRepository, window: Window) -> Result<Vec<Self>> {
        repo.page_teachers(window).await
    }

    async fn count(repo: &dyn CampusRepository) -> Result<i64> {
        repo.count_teachers().await
    }

    async fn replace(
        repo: &dyn CampusRepository,
        id: i64,
        fields: &TeacherFields,
    ) -> Result<Option<Self>> {
        repo.update_teacher(id, fields).await
    }

    async fn remove(repo: &dyn CampusRepository, id: i64) -> Result<bool> {
        repo.delete_teacher(id).await
    }
}

#[async_trait]
impl Record for Course {
    type Payload = CoursePayload;
    type Fields = CourseFields;
    const ENTITY: &'static str = "course";

    fn id(&self) -> i64 {
        self.id
    }

    async fn insert(repo: &dyn CampusRepository, fields: &CourseFields) -> Result<Self> {
        repo.create_course(fields).await
    }

    async fn find(repo: &dyn CampusRepository, id: i64) -> Result<Option<Self>> {
        repo.get_course(id).await
    }

    async fn find_window(repo: &dyn CampusRepository, window: Window) -> Result<Vec<Self>> {
        repo.page_courses(window).await
    }

    async fn count(repo: &dyn CampusRepository) -> Result<i64> {
        repo.count_courses().await
    }

    async fn replace(
        repo: &dyn CampusRepository,
        id: i64,
        fields: &CourseFields,
    ) -> Result<Option<Self>> {
        repo.update_course(id, fields).await
    }

    async fn remove(repo: &dyn CampusRepository, id: i64) -> Result<bool> {
        repo.delete_course(id).await
    }
}

#[async_trait]
impl Record for Student {
    type Payload = StudentPayload;
    type Fields = StudentFields;
    const ENTITY: &'static str = "student";

    fn id(&self) -> i64 {
        self.id
    }

    async fn insert(repo: &dyn CampusRepository, fields: &StudentFields) -> Result<Self> {
        repo.create_student(fields).await
    }

    async fn find(repo: &dyn CampusRepository, id: i64) -> Result<Option<Self>> {
        repo.get_student(id).await
    }

    async fn find_window(repo: &dyn CampusRepository, window: Window) -> Result<Vec<Self>> {
        repo.page_students(window).await
    }

    async fn count(repo: &dyn CampusRepository) -> Result<i64> {
        repo.count_students().await
    }

    async fn replace(
        repo: &dyn CampusRepository,
        id: i64,
        fields: &StudentFields,
    ) -> Result<Option<Self>> {
        repo.update_student(id, fields).await
    }

    async fn remove(repo: &dyn CampusRepository, id: i64) -> Result<bool> {
        repo.delete_student(id).await
    }
}
