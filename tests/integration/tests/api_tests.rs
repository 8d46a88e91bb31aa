//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET, API_PORT
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_message, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::Value;

async fn register(server: &TestServer) -> (RegisterRequest, AuthResponse) {
    let request = RegisterRequest::unique();
    let response = server.post("/users/register", &request).await.unwrap();
    let auth = assert_json(response, StatusCode::CREATED).await.unwrap();
    (request, auth)
}

/// Create a record and return its `_id`
async fn create_record(server: &TestServer, token: &str, name: &str) -> String {
    let form = form_from(record_fields(name)).part("images", png_part());
    let response = server
        .post_form("/sepultados/create", token, form)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    body["newSepultado"]["_id"].as_str().unwrap().to_string()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, auth) = register(&server).await;
    assert!(!auth.token.is_empty());

    let response = server
        .post("/users/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let login: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(login.user_id, auth.user_id);
    assert_eq!(login.message, "You are now signed in");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, _) = register(&server).await;

    let response = server.post("/users/register", &request).await.unwrap();
    let message = assert_message(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
    assert_eq!(message, "Email already in use");
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, _) = register(&server).await;

    let wrong_password = LoginRequest {
        email: request.email.clone(),
        password: "wrongpass".to_string(),
    };
    let unknown_email = LoginRequest {
        email: "nobody@example.com".to_string(),
        password: "wrongpass".to_string(),
    };

    let first = server.post("/users/login", &wrong_password).await.unwrap();
    let first = assert_message(first, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
    let second = server.post("/users/login", &unknown_email).await.unwrap();
    let second = assert_message(second, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_checkuser_and_profile() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, auth) = register(&server).await;

    let response = server.get("/users/checkuser").await.unwrap();
    let anonymous: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(anonymous.is_null());

    let response = server
        .get_auth("/users/checkuser", &auth.token)
        .await
        .unwrap();
    let me: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me["email"], request.email.as_str());
    assert!(me.get("password").is_none());

    let response = server
        .get(&format!("/users/{}", auth.user_id))
        .await
        .unwrap();
    let profile: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile["user"]["_id"], auth.user_id.as_str());

    let response = server.get("/users/not-an-id").await.unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_edit_profile_with_image() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, auth) = register(&server).await;

    let form = form_from(vec![
        ("name", "Renamed User".to_string()),
        ("email", request.email.clone()),
        ("phone", request.phone.clone()),
        ("cpf", request.cpf.clone()),
    ])
    .part("image", png_part());
    let response = server
        .patch_form(&format!("/users/{}", auth.user_id), &auth.token, form)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth("/users/checkuser", &auth.token)
        .await
        .unwrap();
    let me: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me["name"], "Renamed User");
    let image = me["image"].as_str().unwrap();

    let response = server
        .get(&format!("/images/users/{image}"))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // The old password still works
    let response = server
        .post("/users/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Record Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_read_record() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register(&server).await;
    let id = create_record(&server, &auth.token, "José Araújo").await;

    let response = server.get(&format!("/sepultados/{id}")).await.unwrap();
    let record: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(record["nome"], "José Araújo");
    assert_eq!(record["idade"], "69");
    assert_eq!(record["user"]["_id"], auth.user_id.as_str());
    assert_eq!(record["available"], true);
    assert_eq!(record["images"].as_array().unwrap().len(), 1);

    let response = server
        .get_auth("/sepultados/meussepultados", &auth.token)
        .await
        .unwrap();
    let owned: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(owned["sepults"]
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["_id"] == id.as_str()));

    let response = server.get("/sepultados").await.unwrap();
    let latest: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(latest["sepultado"].as_array().unwrap().len() <= 20);
}

#[tokio::test]
async fn test_create_requires_fields_and_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register(&server).await;

    let fields: Vec<_> = record_fields("Ana")
        .into_iter()
        .filter(|(name, _)| *name != "idade")
        .collect();
    let response = server
        .post_form("/sepultados/create", &auth.token, form_from(fields))
        .await
        .unwrap();
    let message = assert_message(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
    assert_eq!(message, "Age is required");

    let response = server.get("/sepultados/meussepultados").await.unwrap();
    let message = assert_message(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(message, "Access denied");
}

#[tokio::test]
async fn test_only_owner_may_update_or_delete() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = register(&server).await;
    let (_, stranger) = register(&server).await;
    let id = create_record(&server, &owner.token, "Maria Silva").await;

    let form = form_from(record_fields("Someone Else"));
    let response = server
        .patch_form(&format!("/sepultados/{id}"), &stranger.token, form)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .delete_auth(&format!("/sepultados/{id}"), &stranger.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let form = form_from(record_fields("Maria Silva Santos"));
    let response = server
        .patch_form(&format!("/sepultados/{id}"), &owner.token, form)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(&format!("/sepultados/{id}")).await.unwrap();
    let record: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(record["nome"], "Maria Silva Santos");
    assert_eq!(record["user"]["_id"], owner.user_id.as_str());

    let response = server
        .delete_auth(&format!("/sepultados/{id}"), &owner.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(&format!("/sepultados/{id}")).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_adoption_workflow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = register(&server).await;
    let (_, adopter) = register(&server).await;
    let id = create_record(&server, &owner.token, "Antônio Lima").await;

    let response = server
        .patch_auth(&format!("/sepultados/schedule/{id}"), &owner.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();

    let response = server
        .patch_auth(&format!("/sepultados/schedule/{id}"), &adopter.token)
        .await
        .unwrap();
    let message = assert_message(response, StatusCode::OK).await.unwrap();
    assert!(message.contains("Cemitério da Saudade"));

    let response = server
        .patch_auth(&format!("/sepultados/conclude/{id}"), &adopter.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .patch_auth(&format!("/sepultados/conclude/{id}"), &owner.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(&format!("/sepultados/{id}")).await.unwrap();
    let record: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(record["available"], false);
    assert_eq!(record["adopter"]["_id"], adopter.user_id.as_str());
    assert_eq!(record["nome"], "Antônio Lima");
}

#[tokio::test]
async fn test_comments() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, auth) = register(&server).await;
    let id = create_record(&server, &auth.token, "Pedro Alves").await;

    let response = server
        .post_auth(
            &format!("/sepultados/{id}/comentario"),
            &auth.token,
            &CommentRequest {
                mensagem: "Saudades".to_string(),
            },
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    let comments = body["comentarios"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["mensagem"], "Saudades");
    assert_eq!(comments[0]["nome"], request.name.as_str());

    let response = server
        .post_auth(
            &format!("/sepultados/{id}/comentario"),
            &auth.token,
            &CommentRequest {
                mensagem: "   ".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
}

// ============================================================================
// Search Tests
// ============================================================================

#[tokio::test]
async fn test_search_is_accent_insensitive() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register(&server).await;
    let marker = format!("Zéfiro{}", unique_suffix());
    let id = create_record(&server, &auth.token, &marker).await;

    let folded = marker.replace('é', "e").to_lowercase();
    let response = server
        .get(&format!("/sepultados/pesquisa?q={folded}"))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let hits = body["sepultado"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["_id"], id.as_str());

    let response = server
        .get(&format!("/sepultados/sugestoes?q={folded}"))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["total"], 1);

    let response = server.get("/sepultados/search?q=").await.unwrap();
    let message = assert_message(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(message, "Search term is required");
}
