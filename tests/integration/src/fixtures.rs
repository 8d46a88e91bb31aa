//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
///
/// Mixes in a per-run id so reruns against the same database do not collide.
pub fn unique_suffix() -> String {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}{n}", &uuid::Uuid::new_v4().simple().to_string()[..8])
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirmpassword: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test User {suffix}"),
            cpf: "12345678900".to_string(),
            email: format!("test{suffix}@example.com"),
            phone: "5511999990000".to_string(),
            password: "TestPass123!".to_string(),
            confirmpassword: "TestPass123!".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// Comment request
#[derive(Debug, Serialize)]
pub struct CommentRequest {
    pub mensagem: String,
}

/// Text fields of a complete record form
pub fn record_fields(name: &str) -> Vec<(&'static str, String)> {
    vec![
        ("nome", name.to_string()),
        ("chapa", format!("P-{}", unique_suffix())),
        ("dtFal", "02/11/1990".to_string()),
        ("dtNasc", "15/03/1921".to_string()),
        ("idade", "69".to_string()),
        ("quadra", "Quadra 7".to_string()),
        ("mae", "Maria".to_string()),
        ("pai", "Pedro".to_string()),
        ("cemiterio", "Cemitério da Saudade".to_string()),
        ("rua", "Rua das Flores".to_string()),
    ]
}

/// Multipart form from text fields
pub fn form_from(fields: Vec<(&'static str, String)>) -> Form {
    fields
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value))
}

/// A tiny PNG part for the given file field
pub fn png_part() -> Part {
    let bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    Part::bytes(bytes)
        .file_name("photo.png")
        .mime_str("image/png")
        .expect("static mime type parses")
}
