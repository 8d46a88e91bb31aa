//! Request DTOs for API endpoints
//!
//! Fields are optional at the serde level so that a missing value is reported
//! by name, in the order the forms list them, rather than as a parse failure.
//! The `Validate` rules run after those mandatory checks.

use memorial_core::entities::{OptionalDetails, RequiredDetails};
use memorial_core::value_objects::BurialType;
use memorial_core::DomainError;
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

/// Trimmed value of a mandatory field, or the error naming it
fn required(value: &Option<String>, field: &'static str) -> Result<String, DomainError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(DomainError::MissingField(field)),
    }
}

/// Mandatory secret, kept verbatim
fn required_secret(value: &Option<String>, field: &'static str) -> Result<String, DomainError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(DomainError::MissingField(field)),
    }
}

/// Run the derived rules, reporting the first failing field's message
fn validated(value: &impl Validate) -> Result<(), DomainError> {
    value
        .validate()
        .map_err(|errors| DomainError::ValidationError(first_message(&errors)))
}

fn first_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|e| {
                e.message
                    .as_ref()
                    .map_or_else(|| format!("{field} is invalid"), ToString::to_string)
            })
        })
        .unwrap_or_else(|| "Invalid request".to_string())
}

fn optional_text(value: &Option<String>) -> Option<String> {
    value.as_deref().map(|v| v.trim().to_string())
}

fn optional_coordinate(
    value: &Option<String>,
    field: &'static str,
    bound: f64,
) -> Result<Option<f64>, DomainError> {
    let Some(raw) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() && n.abs() <= bound => Ok(Some(n)),
        _ => Err(DomainError::ValidationError(format!(
            "{field} must be a number between -{bound} and {bound}"
        ))),
    }
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Account registration request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,

    pub cpf: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub phone: Option<String>,

    pub password: Option<String>,

    pub confirmpassword: Option<String>,
}

/// Registration fields after the mandatory checks
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl RegisterRequest {
    /// Check mandatory fields in form order, then the password confirmation
    pub fn checked(&self) -> Result<Registration, DomainError> {
        let name = required(&self.name, "Name")?;
        let cpf = required(&self.cpf, "CPF")?;
        let email = required(&self.email, "Email")?;
        let phone = required(&self.phone, "Phone")?;
        let password = required_secret(&self.password, "Password")?;
        let confirmation = required_secret(&self.confirmpassword, "Password confirmation")?;
        validated(self)?;

        if password != confirmation {
            return Err(DomainError::PasswordMismatch);
        }

        Ok(Registration {
            name,
            cpf,
            email,
            phone,
            password,
        })
    }
}

/// Login request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,

    pub password: Option<String>,
}

impl LoginRequest {
    /// Email and password, both mandatory
    pub fn credentials(&self) -> Result<(String, String), DomainError> {
        let email = required(&self.email, "Email")?;
        let password = required_secret(&self.password, "Password")?;
        Ok((email, password))
    }
}

// ============================================================================
// User Requests
// ============================================================================

/// Profile edit form (multipart text fields)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EditUserRequest {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub phone: Option<String>,

    pub cpf: Option<String>,

    pub password: Option<String>,

    pub confirmpassword: Option<String>,
}

/// Profile fields after the mandatory checks
#[derive(Debug, Clone)]
pub struct ProfileEdit {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cpf: String,
    /// New password, only when the caller asked to change it
    pub new_password: Option<String>,
}

impl EditUserRequest {
    /// Set a text field by its form name; unknown names are ignored
    pub fn set_field(&mut self, name: &str, value: String) {
        let slot = match name {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "cpf" => &mut self.cpf,
            "password" => &mut self.password,
            "confirmpassword" => &mut self.confirmpassword,
            _ => return,
        };
        *slot = Some(value);
    }

    /// Check mandatory fields in form order
    ///
    /// A password change is opt-in: when `password` is blank or absent the
    /// stored hash stays as it is.
    pub fn checked(&self) -> Result<ProfileEdit, DomainError> {
        let name = required(&self.name, "Name")?;
        let email = required(&self.email, "Email")?;
        let phone = required(&self.phone, "Phone")?;
        let cpf = required(&self.cpf, "CPF")?;
        validated(self)?;

        let new_password = match required_secret(&self.password, "Password") {
            Ok(password) => {
                let confirmation =
                    required_secret(&self.confirmpassword, "Password confirmation")?;
                if password != confirmation {
                    return Err(DomainError::PasswordMismatch);
                }
                Some(password)
            }
            Err(_) => None,
        };

        Ok(ProfileEdit {
            name,
            email,
            phone,
            cpf,
            new_password,
        })
    }
}

// ============================================================================
// Record Requests
// ============================================================================

/// Create or update form for a memorial record (multipart text fields)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RecordForm {
    /// Legacy identifier, honoured on creation only
    #[serde(rename = "id")]
    #[validate(length(max = 64, message = "Legacy id must be at most 64 characters"))]
    pub legacy_id: Option<String>,

    #[serde(rename = "nome")]
    #[validate(length(max = 200, message = "Name must be at most 200 characters"))]
    pub name: Option<String>,

    #[serde(rename = "chapa")]
    pub plaque: Option<String>,

    #[serde(rename = "dtFal")]
    pub death_date: Option<String>,

    #[serde(rename = "dtNasc")]
    pub birth_date: Option<String>,

    #[serde(rename = "idade")]
    pub age: Option<String>,

    #[serde(rename = "quadra")]
    pub block: Option<String>,

    #[serde(rename = "mae")]
    pub mother: Option<String>,

    #[serde(rename = "pai")]
    pub father: Option<String>,

    #[serde(rename = "cemiterio")]
    pub cemetery: Option<String>,

    #[serde(rename = "rua")]
    pub street: Option<String>,

    #[serde(rename = "nacionalidade")]
    pub nationality: Option<String>,

    #[serde(rename = "tipoSepultura")]
    pub burial_type: Option<String>,

    #[serde(rename = "epitafio")]
    #[validate(length(max = 2000, message = "Epitaph must be at most 2000 characters"))]
    pub epitaph: Option<String>,

    pub latitude: Option<String>,

    pub longitude: Option<String>,
}

impl RecordForm {
    /// Set a text field by its form name; unknown names are ignored
    pub fn set_field(&mut self, name: &str, value: String) {
        let slot = match name {
            "id" => &mut self.legacy_id,
            "nome" => &mut self.name,
            "chapa" => &mut self.plaque,
            "dtFal" => &mut self.death_date,
            "dtNasc" => &mut self.birth_date,
            "idade" => &mut self.age,
            "quadra" => &mut self.block,
            "mae" => &mut self.mother,
            "pai" => &mut self.father,
            "cemiterio" => &mut self.cemetery,
            "rua" => &mut self.street,
            "nacionalidade" => &mut self.nationality,
            "tipoSepultura" => &mut self.burial_type,
            "epitafio" => &mut self.epitaph,
            "latitude" => &mut self.latitude,
            "longitude" => &mut self.longitude,
            _ => return,
        };
        *slot = Some(value);
    }

    /// Mandatory biographical fields, checked in form order
    pub fn required_details(&self) -> Result<RequiredDetails, DomainError> {
        Ok(RequiredDetails {
            name: required(&self.name, "Name")?,
            plaque: required(&self.plaque, "Plaque")?,
            death_date: required(&self.death_date, "Death date")?,
            birth_date: required(&self.birth_date, "Birth date")?,
            age: required(&self.age, "Age")?,
            block: required(&self.block, "Block")?,
            mother: required(&self.mother, "Mother")?,
            father: required(&self.father, "Father")?,
        })
    }

    /// Optional fields; anything absent from the form stays `None`
    ///
    /// Also applies the length rules, so call it after [`Self::required_details`].
    pub fn optional_details(&self) -> Result<OptionalDetails, DomainError> {
        validated(self)?;

        let burial_type = match self.burial_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(label) => Some(BurialType::from_label(label).ok_or_else(|| {
                DomainError::ValidationError(format!(
                    "Burial type must be one of {}",
                    BurialType::ALL
                        .iter()
                        .map(|t| t.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })?),
        };

        Ok(OptionalDetails {
            cemetery: optional_text(&self.cemetery),
            street: optional_text(&self.street),
            nationality: optional_text(&self.nationality),
            burial_type,
            epitaph: optional_text(&self.epitaph),
            latitude: optional_coordinate(&self.latitude, "Latitude", 90.0)?,
            longitude: optional_coordinate(&self.longitude, "Longitude", 180.0)?,
        })
    }

    /// Legacy identifier, when one was supplied
    pub fn legacy_id(&self) -> Option<String> {
        optional_text(&self.legacy_id).filter(|id| !id.is_empty())
    }
}

/// New comment on a record; content rules live on [`memorial_core::entities::Comment`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentRequest {
    pub mensagem: Option<String>,
}

// ============================================================================
// Search Requests
// ============================================================================

/// Query string of the search endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
}
