//! Service context - dependency container for services
//!
//! Holds the repositories, image store and auth helpers needed by services.

use std::sync::Arc;

use memorial_common::auth::{JwtService, PasswordService};
use memorial_core::traits::{ImageStore, MemorialRepository, UserRepository};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Record and account repositories
/// - Image storage
/// - JWT and password services
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    memorial_repo: Arc<dyn MemorialRepository>,

    // Storage
    image_store: Arc<dyn ImageStore>,

    // Services
    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        memorial_repo: Arc<dyn MemorialRepository>,
        image_store: Arc<dyn ImageStore>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            user_repo,
            memorial_repo,
            image_store,
            jwt_service,
            password_service: PasswordService::new(),
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the memorial record repository
    pub fn memorial_repo(&self) -> &dyn MemorialRepository {
        self.memorial_repo.as_ref()
    }

    // === Storage ===

    /// Get the uploaded image store
    pub fn image_store(&self) -> &dyn ImageStore {
        self.image_store.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the password hashing service
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("image_store", &"...")
            .field("jwt_service", &self.jwt_service)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    memorial_repo: Option<Arc<dyn MemorialRepository>>,
    image_store: Option<Arc<dyn ImageStore>>,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            user_repo: None,
            memorial_repo: None,
            image_store: None,
            jwt_service: None,
        }
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn memorial_repo(mut self, repo: Arc<dyn MemorialRepository>) -> Self {
        self.memorial_repo = Some(repo);
        self
    }

    pub fn image_store(mut self, store: Arc<dyn ImageStore>) -> Self {
        self.image_store = Some(store);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::internal("user_repo is required"))?,
            self.memorial_repo
                .ok_or_else(|| ServiceError::internal("memorial_repo is required"))?,
            self.image_store
                .ok_or_else(|| ServiceError::internal("image_store is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::internal("jwt_service is required"))?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
