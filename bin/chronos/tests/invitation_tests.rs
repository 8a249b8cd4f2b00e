mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use chronos_primitives::models::entities::enum_types::UserRole;
use chronos_primitives::schema::invitations;
use common::fixtures::{bearer, create_company, create_user, unique_email, TestUser};
use common::{create_test_app, db_state};
use diesel::prelude::*;
use serde_json::json;
use serial_test::serial;

async fn invite(server: &TestServer, manager: &TestUser, email: &str) -> serde_json::Value {
    let response = server
        .post("/api/manager/invitations")
        .add_header("Authorization", bearer(&manager.token))
        .json(&json!({
            "email": email,
            "name": "João Silva",
            "position": "Analista",
            "department": "TI",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

fn registration(code: &str, email: &str) -> serde_json::Value {
    json!({
        "invitation_code": code,
        "name": "João Silva",
        "email": email,
        "password": "Segura123",
        "cpf": "529.982.247-25",
        "mobile_phone": "81988887777",
    })
}

#[tokio::test]
#[serial]
async fn invited_employee_registers_pending_approval() {
    let Some(state) = db_state() else { return };
    let company = create_company(&state);
    let manager = create_user(&state, Some(company.id), UserRole::Manager);
    let server = TestServer::new(create_test_app(state.clone())).unwrap();
    let email = unique_email();

    let invitation = invite(&server, &manager, &email.to_uppercase()).await;
    assert_eq!(invitation["email"], json!(email.to_lowercase()));
    assert_eq!(invitation["is_used"], false);
    let code = invitation["code"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 8);

    let response = server
        .post("/api/employee/register")
        .json(&registration(&code.to_lowercase(), &email))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["role"], "employee");
    assert_eq!(body["user"]["is_approved"], false);
    assert_eq!(body["user"]["is_active"], true);
    assert_eq!(body["user"]["company_id"], json!(company.id));
    assert_eq!(body["user"]["position"], "Analista");
    assert_eq!(body["user"]["department"], "TI");
    assert_eq!(body["user"]["cpf"], "52998224725");

    let pending: serde_json::Value = server
        .get("/api/manager/employees/pending")
        .add_header("Authorization", bearer(&manager.token))
        .await
        .json();
    assert_eq!(pending["employees"][0]["id"], body["user"]["id"]);

    let used: serde_json::Value = server
        .get("/api/manager/invitations?status=used")
        .add_header("Authorization", bearer(&manager.token))
        .await
        .json();
    assert_eq!(used["pagination"]["total"], 1);
    assert_eq!(used["invitations"][0]["used_by_id"], body["user"]["id"]);

    let response = server
        .post("/api/employee/register")
        .json(&registration(&code, &unique_email()))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let error: serde_json::Value = response.json();
    assert_eq!(error["message"], "Invitation already used");
}

#[tokio::test]
#[serial]
async fn codes_that_cannot_be_redeemed_are_refused() {
    let Some(state) = db_state() else { return };
    let company = create_company(&state);
    let manager = create_user(&state, Some(company.id), UserRole::Manager);
    let server = TestServer::new(create_test_app(state.clone())).unwrap();

    server
        .post("/api/employee/register")
        .json(&registration("NOPE0000", &unique_email()))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let email = unique_email();
    let invitation = invite(&server, &manager, &email).await;
    let code = invitation["code"].as_str().unwrap().to_string();

    server
        .post("/api/employee/register")
        .json(&registration(&code, &unique_email()))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let expired_email = unique_email();
    let expired = invite(&server, &manager, &expired_email).await;
    let expired_code = expired["code"].as_str().unwrap().to_string();
    {
        let mut conn = state.db.get().unwrap();
        diesel::update(invitations::table.filter(invitations::code.eq(&expired_code)))
            .set(invitations::expires_at.eq(Utc::now() - Duration::hours(1)))
            .execute(&mut conn)
            .unwrap();
    }
    let response = server
        .post("/api/employee/register")
        .json(&registration(&expired_code, &expired_email))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let error: serde_json::Value = response.json();
    assert_eq!(error["message"], "Invitation expired");

    let listed: serde_json::Value = server
        .get("/api/manager/invitations?status=expired")
        .add_header("Authorization", bearer(&manager.token))
        .await
        .json();
    assert_eq!(listed["pagination"]["total"], 1);
    assert_eq!(listed["invitations"][0]["code"], json!(expired_code));

    let response = server
        .delete(&format!("/api/manager/invitations/{}", invitation["id"].as_str().unwrap()))
        .add_header("Authorization", bearer(&manager.token))
        .await;
    response.assert_status(StatusCode::OK);
    let cancelled: serde_json::Value = response.json();
    assert_eq!(cancelled["is_active"], false);

    let response = server
        .post("/api/employee/register")
        .json(&registration(&code, &email))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let error: serde_json::Value = response.json();
    assert_eq!(error["message"], "Invitation was cancelled");

    let active: serde_json::Value = server
        .get("/api/manager/invitations?status=active")
        .add_header("Authorization", bearer(&manager.token))
        .await
        .json();
    assert_eq!(active["pagination"]["total"], 0);
}

#[tokio::test]
#[serial]
async fn duplicate_invitations_are_rejected() {
    let Some(state) = db_state() else { return };
    let company = create_company(&state);
    let manager = create_user(&state, Some(company.id), UserRole::Manager);
    let server = TestServer::new(create_test_app(state.clone())).unwrap();
    let email = unique_email();

    let first = invite(&server, &manager, &email).await;

    server
        .post("/api/manager/invitations")
        .add_header("Authorization", bearer(&manager.token))
        .json(&json!({ "email": email }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .post("/api/manager/invitations")
        .add_header("Authorization", bearer(&manager.token))
        .json(&json!({ "email": manager.user.email }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .post("/api/manager/invitations")
        .add_header("Authorization", bearer(&manager.token))
        .json(&json!({ "email": unique_email(), "expires_at": Utc::now() - Duration::days(1) }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // cancelling frees the address for a new invitation
    server
        .delete(&format!("/api/manager/invitations/{}", first["id"].as_str().unwrap()))
        .add_header("Authorization", bearer(&manager.token))
        .await
        .assert_status(StatusCode::OK);
    invite(&server, &manager, &email).await;
}

#[tokio::test]
#[serial]
async fn invitations_belong_to_managers_of_the_company() {
    let Some(state) = db_state() else { return };
    let company = create_company(&state);
    let other = create_company(&state);
    let manager = create_user(&state, Some(company.id), UserRole::Manager);
    let other_manager = create_user(&state, Some(other.id), UserRole::Manager);
    let hr = create_user(&state, Some(company.id), UserRole::Hr);
    let server = TestServer::new(create_test_app(state.clone())).unwrap();

    server
        .post("/api/manager/invitations")
        .add_header("Authorization", bearer(&hr.token))
        .json(&json!({ "email": unique_email() }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    server
        .get("/api/manager/invitations")
        .add_header("Authorization", bearer(&hr.token))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let invitation = invite(&server, &manager, &unique_email()).await;
    let path = format!("/api/manager/invitations/{}", invitation["id"].as_str().unwrap());

    server
        .delete(&path)
        .add_header("Authorization", bearer(&other_manager.token))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let listed: serde_json::Value = server
        .get("/api/manager/invitations")
        .add_header("Authorization", bearer(&other_manager.token))
        .await
        .json();
    assert_eq!(listed["pagination"]["total"], 0);
}
