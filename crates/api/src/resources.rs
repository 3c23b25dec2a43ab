//! CRUD endpoints shared by every record type.
//!
//! Each collection gets `GET`/`POST` on the collection path and
//! `GET`/`PUT`/`DELETE` on `<path>/:id`. List responses are paginated.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        OriginalUri, Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use campus_core::pagination::{Page, PageRequest};
use campus_core::records::{self, Record};

use crate::error::ApiError;
use crate::AppState;

/// Query string accepted by list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
}

impl ListQuery {
    /// Requested page; absent means the first. Anything that is not a
    /// positive integer is an invalid page.
    fn page_request(&self, page_size: u32) -> Result<PageRequest, ApiError> {
        let page = match self.page.as_deref() {
            None => 1,
            Some(raw) => raw.trim().parse().map_err(|_| ApiError::invalid_page())?,
        };
        PageRequest::new(page, page_size).ok_or_else(ApiError::invalid_page)
    }
}

/// Build the sub-router for one record type mounted at `path`.
pub fn resource_router<T: Record>(path: &str) -> Router<Arc<AppState>> {
    Router::new()
        .route(path, get(list_records::<T>).post(create_record::<T>))
        .route(
            &format!("{path}/:id"),
            get(get_record::<T>)
                .put(update_record::<T>)
                .delete(delete_record::<T>),
        )
}

async fn list_records<T: Record>(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<T>>, ApiError> {
    let request = query.page_request(state.config.api.page_size)?;
    records::list_page::<T>(&state.repo, request, uri.path())
        .await?
        .map(Json)
        .ok_or_else(ApiError::invalid_page)
}

async fn get_record<T: Record>(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<T>, ApiError> {
    let Path(id) = id?;
    Ok(Json(records::get::<T>(&state.repo, id).await?))
}

async fn create_record<T: Record>(
    State(state): State<Arc<AppState>>,
    body: Result<Json<T::Payload>, JsonRejection>,
) -> Result<(StatusCode, Json<T>), ApiError> {
    let Json(payload) = body?;
    let record = records::create::<T>(&state.repo, payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_record<T: Record>(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<T::Payload>, JsonRejection>,
) -> Result<Json<T>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = body?;
    Ok(Json(records::update::<T>(&state.repo, id, payload).await?))
}

async fn delete_record<T: Record>(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    records::delete::<T>(&state.repo, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::router;
    use crate::test_support::*;
    use axum::http::StatusCode;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn post_json(state: &std::sync::Arc<crate::AppState>, uri: &str, body: Value) -> Value {
        let response = router(state.clone())
            .oneshot(send_json("POST", uri, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED, "POST {uri}");
        get_json(response).await
    }

    async fn seed_school(state: &std::sync::Arc<crate::AppState>, name: &str) -> i64 {
        let school = post_json(
            state,
            "/api/schools",
            json!({"name": name, "address": "Test Address"}),
        )
        .await;
        school["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn create_school_returns_201_with_id() {
        let state = test_state().await;
        let school = post_json(
            &state,
            "/api/schools",
            json!({"name": "Primary School", "address": "Test Address"}),
        )
        .await;
        assert!(school["id"].as_i64().unwrap() > 0);
        assert_eq!(school["name"], "Primary School");
        assert_eq!(school["address"], "Test Address");
    }

    #[tokio::test]
    async fn create_school_trims_name() {
        let state = test_state().await;
        let school = post_json(
            &state,
            "/api/schools",
            json!({"name": "  High School  ", "address": "Road 1"}),
        )
        .await;
        assert_eq!(school["name"], "High School");
    }

    #[tokio::test]
    async fn create_school_with_blank_name_is_400() {
        let state = test_state().await;
        let response = router(state)
            .oneshot(send_json(
                "POST",
                "/api/schools",
                json!({"name": "   ", "address": "Test Address"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_json(response).await;
        assert_eq!(json["name"][0], "This field may not be blank.");
    }

    #[tokio::test]
    async fn create_school_with_missing_fields_reports_each() {
        let state = test_state().await;
        let response = router(state)
            .oneshot(send_json("POST", "/api/schools", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_json(response).await;
        assert_eq!(json["name"][0], "This field is required.");
        assert_eq!(json["address"][0], "This field is required.");
    }

    #[tokio::test]
    async fn create_school_with_long_name_is_400() {
        let state = test_state().await;
        let response = router(state)
            .oneshot(send_json(
                "POST",
                "/api/schools",
                json!({"name": "x".repeat(129), "address": "Test Address"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_json(response).await;
        assert_eq!(
            json["name"][0],
            "Ensure this field has no more than 128 characters."
        );
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let state = test_state().await;
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/api/schools")
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap();
        let response = router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_json(response).await;
        assert!(json["detail"].is_string());
    }

    #[tokio::test]
    async fn get_school_by_id() {
        let state = test_state().await;
        let id = seed_school(&state, "Primary School").await;

        let response = router(state)
            .oneshot(get(&format!("/api/schools/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json(response).await;
        assert_eq!(json["id"], id);
        assert_eq!(json["name"], "Primary School");
    }

    #[tokio::test]
    async fn get_missing_school_is_404() {
        let state = test_state().await;
        let response = router(state).oneshot(get("/api/schools/0")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = get_json(response).await;
        assert_eq!(json["detail"], "Not found.");
    }

    #[tokio::test]
    async fn list_schools_in_insertion_order() {
        let state = test_state().await;
        for name in ["Primary School", "Middle School", "High School"] {
            seed_school(&state, name).await;
        }

        let response = router(state).oneshot(get("/api/schools")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json(response).await;
        assert_eq!(json["count"], 3);
        assert!(json["next"].is_null());
        assert!(json["previous"].is_null());
        let names: Vec<&str> = json["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Primary School", "Middle School", "High School"]);
    }

    #[tokio::test]
    async fn list_paginates_by_configured_page_size() {
        let state = test_state().await;
        for i in 0..12 {
            seed_school(&state, &format!("School {i}")).await;
        }

        let first = get_json(
            router(state.clone())
                .oneshot(get("/api/schools"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(first["count"], 12);
        assert_eq!(first["results"].as_array().unwrap().len(), 10);
        assert_eq!(first["next"], "/api/schools?page=2");

        let second = get_json(
            router(state.clone())
                .oneshot(get("/api/schools?page=2"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(second["results"].as_array().unwrap().len(), 2);
        assert!(second["next"].is_null());
        assert_eq!(second["previous"], "/api/schools");
    }

    #[tokio::test]
    async fn page_past_the_end_is_404() {
        let state = test_state().await;
        seed_school(&state, "Primary School").await;

        for uri in ["/api/schools?page=2", "/api/schools?page=0", "/api/schools?page=abc"] {
            let response = router(state.clone()).oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
            let json = get_json(response).await;
            assert_eq!(json["detail"], "Invalid page.");
        }
    }

    #[tokio::test]
    async fn update_school_replaces_fields() {
        let state = test_state().await;
        let id = seed_school(&state, "Primary School").await;

        let response = router(state.clone())
            .oneshot(send_json(
                "PUT",
                &format!("/api/schools/{id}"),
                json!({"name": "Renamed School", "address": "New Address"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json(response).await;
        assert_eq!(json["id"], id);
        assert_eq!(json["name"], "Renamed School");
        assert_eq!(json["address"], "New Address");
    }

    #[tokio::test]
    async fn update_missing_school_is_404_even_with_bad_body() {
        let state = test_state().await;
        let response = router(state)
            .oneshot(send_json("PUT", "/api/schools/0", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_school_returns_204_then_404() {
        let state = test_state().await;
        let id = seed_school(&state, "Primary School").await;

        let response = router(state.clone())
            .oneshot(delete(&format!("/api/schools/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = router(state.clone())
            .oneshot(get(&format!("/api/schools/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = router(state)
            .oneshot(delete(&format!("/api/schools/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_school_cascades_to_members() {
        let state = test_state().await;
        let school_id = seed_school(&state, "Primary School").await;
        let teacher = post_json(
            &state,
            "/api/teachers",
            json!({"name": "Test Teacher", "school_id": school_id}),
        )
        .await;
        let course = post_json(
            &state,
            "/api/courses",
            json!({
                "name": "Math",
                "location": "Room 1",
                "school_id": school_id,
                "teacher_id": teacher["id"],
            }),
        )
        .await;
        let student = post_json(
            &state,
            "/api/students",
            json!({"name": "Test Student", "school_id": school_id, "course_id": course["id"]}),
        )
        .await;

        let response = router(state.clone())
            .oneshot(delete(&format!("/api/schools/{school_id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = router(state)
            .oneshot(get(&format!("/api/students/{}", student["id"])))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_teacher_for_missing_school_is_400() {
        let state = test_state().await;
        let response = router(state)
            .oneshot(send_json(
                "POST",
                "/api/teachers",
                json!({"name": "Test Teacher", "school_id": 0}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_json(response).await;
        assert_eq!(json["school_id"][0], "Invalid data for School");
    }

    #[tokio::test]
    async fn create_admin_round_trips_school_id() {
        let state = test_state().await;
        let school_id = seed_school(&state, "Primary School").await;
        let admin = post_json(
            &state,
            "/api/admins",
            json!({"name": "Test Admin", "school_id": school_id}),
        )
        .await;
        assert_eq!(admin["school_id"], school_id);
        assert_eq!(admin["name"], "Test Admin");
    }

    #[tokio::test]
    async fn create_course_with_missing_teacher_is_400() {
        let state = test_state().await;
        let school_id = seed_school(&state, "Primary School").await;
        let response = router(state)
            .oneshot(send_json(
                "POST",
                "/api/courses",
                json!({
                    "name": "Math",
                    "location": "Room 1",
                    "school_id": school_id,
                    "teacher_id": 0,
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_json(response).await;
        assert_eq!(json["teacher_id"][0], "Invalid data for Teacher");
    }

    #[tokio::test]
    async fn create_student_with_missing_course_is_400() {
        let state = test_state().await;
        let school_id = seed_school(&state, "Primary School").await;
        let response = router(state)
            .oneshot(send_json(
                "POST",
                "/api/students",
                json!({"name": "Test Student", "school_id": school_id, "course_id": 0}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_json(response).await;
        assert_eq!(json["course_id"][0], "Invalid data for Course");
    }

    #[tokio::test]
    async fn students_are_listed_by_name() {
        let state = test_state().await;
        let school_id = seed_school(&state, "Primary School").await;
        let teacher = post_json(
            &state,
            "/api/teachers",
            json!({"name": "Test Teacher", "school_id": school_id}),
        )
        .await;
        let course = post_json(
            &state,
            "/api/courses",
            json!({
                "name": "Math",
                "location": "Room 1",
                "school_id": school_id,
                "teacher_id": teacher["id"],
            }),
        )
        .await;
        for name in ["Zoe", "Adam", "Maya"] {
            post_json(
                &state,
                "/api/students",
                json!({"name": name, "school_id": school_id, "course_id": course["id"]}),
            )
            .await;
        }

        let json = get_json(
            router(state)
                .oneshot(get("/api/students"))
                .await
                .unwrap(),
        )
        .await;
        let names: Vec<&str> = json["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Adam", "Maya", "Zoe"]);
    }

    #[tokio::test]
    async fn non_numeric_id_is_404() {
        let state = test_state().await;
        let requests = [
            get("/api/schools/abc"),
            delete("/api/teachers/abc"),
            send_json(
                "PUT",
                "/api/students/abc",
                json!({"name": "Test Student", "school_id": 1, "course_id": 1}),
            ),
        ];
        for request in requests {
            let uri = request.uri().to_string();
            let response = router(state.clone()).oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
            let json = get_json(response).await;
            assert_eq!(json["detail"], "Not found.");
        }
    }

    #[tokio::test]
    async fn update_student_with_blank_name_is_400() {
        let state = test_state().await;
        let school_id = seed_school(&state, "Primary School").await;
        let teacher = post_json(
            &state,
            "/api/teachers",
            json!({"name": "Test Teacher", "school_id": school_id}),
        )
        .await;
        let course = post_json(
            &state,
            "/api/courses",
            json!({
                "name": "Math",
                "location": "Room 1",
                "school_id": school_id,
                "teacher_id": teacher["id"],
            }),
        )
        .await;
        let student = post_json(
            &state,
            "/api/students",
            json!({"name": "Test Student", "school_id": school_id, "course_id": course["id"]}),
        )
        .await;
        let uri = format!("/api/students/{}", student["id"]);

        let response = router(state.clone())
            .oneshot(send_json(
                "PUT",
                &uri,
                json!({"name": "", "school_id": school_id, "course_id": course["id"]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_json(response).await;
        assert_eq!(json["name"][0], "This field may not be blank.");

        let unchanged = get_json(router(state).oneshot(get(&uri)).await.unwrap()).await;
        assert_eq!(unchanged["name"], "Test Student");
    }
}
