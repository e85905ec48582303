mod common;

use axum::http::StatusCode;
use common::{create_exhibition, setup_test_app, PASSWORD, STAFF_EMAIL};
use serde_json::{json, Value};

fn new_employee(email: &str) -> Value {
    json!({
        "name": "Rui Registrar",
        "email": email,
        "password": "Registrar!42",
        "role": "staff"
    })
}

#[tokio::test]
async fn test_list_employees_hides_password_hashes() {
    let app = setup_test_app().await;

    let response = app
        .server
        .get("/employees")
        .authorization_bearer(&app.staff_token)
        .await;

    response.assert_status_ok();
    let rows: Value = response.json();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["Email"], STAFF_EMAIL);
    for row in rows {
        assert!(row.get("Password_Hash").is_none());
    }
}

#[tokio::test]
async fn test_get_employee_by_id() {
    let app = setup_test_app().await;

    let response = app
        .server
        .get(&format!("/employees/{}", app.admin_id))
        .authorization_bearer(&app.staff_token)
        .await;

    response.assert_status_ok();
    let row: Value = response.json();
    assert_eq!(row["Staff_ID"], app.admin_id);
    assert_eq!(row["Role"], "admin");
    assert!(row.get("Password_Hash").is_none());
}

#[tokio::test]
async fn test_get_employee_errors() {
    let app = setup_test_app().await;

    app.server
        .get("/employees/4040")
        .authorization_bearer(&app.staff_token)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    app.server
        .get("/employees/curator")
        .authorization_bearer(&app.staff_token)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_creates_employee_who_can_log_in() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post("/employees")
        .authorization_bearer(&app.admin_token)
        .json(&new_employee("rui@museum.test"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "employee added successfully!");
    let staff_id = body["insertedId"].as_i64().unwrap();
    assert_eq!(app.gateway.inserts(), 1);

    let login: Value = app
        .server
        .post("/auth/login")
        .json(&json!({ "email": "rui@museum.test", "password": "Registrar!42" }))
        .await
        .json();
    assert_eq!(login["staffId"], staff_id);
    assert_eq!(login["role"], "staff");
}

#[tokio::test]
async fn test_staff_cannot_create_employees() {
    let app = setup_test_app().await;

    app.server
        .post("/employees")
        .authorization_bearer(&app.staff_token)
        .json(&new_employee("rui@museum.test"))
        .await
        .assert_status(StatusCode::FORBIDDEN);
    assert_eq!(app.gateway.total(), 0);
}

#[tokio::test]
async fn test_create_employee_validation() {
    let app = setup_test_app().await;

    let mut bad_role = new_employee("rui@museum.test");
    bad_role["role"] = json!("janitor");
    let mut weak_password = new_employee("rui@museum.test");
    weak_password["password"] = json!("password");
    let mut missing_email = new_employee("rui@museum.test");
    missing_email.as_object_mut().unwrap().remove("email");

    for body in [bad_role, weak_password, missing_email] {
        app.server
            .post("/employees")
            .authorization_bearer(&app.admin_token)
            .json(&body)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
    assert_eq!(app.gateway.total(), 0);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected_by_database() {
    let app = setup_test_app().await;

    let mut body = new_employee(STAFF_EMAIL);
    body["password"] = json!(PASSWORD);
    let response = app
        .server
        .post("/employees")
        .authorization_bearer(&app.admin_token)
        .json(&body)
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["message"], "Error adding employee");
}

#[tokio::test]
async fn test_total_report() {
    let app = setup_test_app().await;
    create_exhibition(&app, 1).await;

    app.server
        .post("/exhibitions/AddSpecialExhibition")
        .authorization_bearer(&app.staff_token)
        .json(&common::special_exhibition_body(2))
        .await
        .assert_status(StatusCode::CREATED);

    let response = app
        .server
        .get("/total-report")
        .authorization_bearer(&app.admin_token)
        .await;

    response.assert_status_ok();
    let report: Value = response.json();
    assert_eq!(report["total_artworks"], 0);
    assert_eq!(report["total_exhibitions"], 1);
    assert_eq!(report["total_special_exhibitions"], 1);
    assert_eq!(report["total_employees"], 2);
    assert_eq!(report["total_tickets_sold"], 1500);
    assert_eq!(report["total_budget"], 165000.5);
}

#[tokio::test]
async fn test_total_report_on_empty_collection() {
    let app = setup_test_app().await;

    let report: Value = app
        .server
        .get("/total-report")
        .authorization_bearer(&app.admin_token)
        .await
        .json();

    assert_eq!(report["total_exhibitions"], 0);
    assert_eq!(report["total_tickets_sold"], 0);
    assert_eq!(report["total_budget"], 0.0);
}
