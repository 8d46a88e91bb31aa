//! Memorial record service
//!
//! Record lifecycle: create, read, update, delete, the adoption workflow and
//! public comments.

use memorial_core::entities::{Comment, MemorialRecord};
use memorial_core::value_objects::{ImageFolder, ImageUpload, RecordId, UserId};
use memorial_core::DomainError;
use tracing::{info, instrument, warn};

use crate::dto::{
    CommentRequest, CommentsResponse, CreatedRecordResponse, MessageResponse,
    OwnedRecordsResponse, RecordForm, RecordListResponse, RecordResponse,
};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::uploads;

/// Number of records on the public listing
pub const LATEST_LIMIT: i64 = 20;

/// Memorial record service
pub struct MemorialService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemorialService<'a> {
    /// Create a new MemorialService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn access(&self) -> AccessService<'a> {
        AccessService::new(self.ctx)
    }

    /// Look a record up by native id, then by legacy id
    async fn load(&self, id: &str) -> ServiceResult<MemorialRecord> {
        let repo = self.ctx.memorial_repo();

        if let Ok(record_id) = RecordId::parse(id) {
            if let Some(record) = repo.find_by_id(record_id).await? {
                return Ok(record);
            }
        }

        repo.find_by_legacy_id(id.trim())
            .await?
            .ok_or_else(|| ServiceError::not_found("Record", id))
    }

    /// Create a record owned by the caller
    #[instrument(skip(self, form, images), fields(images = images.len()))]
    pub async fn create(
        &self,
        caller: UserId,
        form: RecordForm,
        images: Vec<ImageUpload>,
    ) -> ServiceResult<CreatedRecordResponse> {
        let owner = self.access().caller(caller).await?;

        let required = form.required_details()?;
        let optional = form.optional_details()?;
        uploads::check_uploads(&images)?;

        let legacy_id = form.legacy_id();
        if let Some(legacy) = &legacy_id {
            if self.ctx.memorial_repo().find_by_legacy_id(legacy).await?.is_some() {
                return Err(ServiceError::conflict("Legacy id already in use"));
            }
        }

        let filenames = uploads::store_all(self.ctx, ImageFolder::Records, &images).await?;

        let mut record = MemorialRecord::new(
            RecordId::generate(),
            required,
            optional,
            owner.owner_snapshot(),
            filenames,
        );
        record.legacy_id = legacy_id;

        if let Err(e) = self.ctx.memorial_repo().create(&record).await {
            uploads::discard(self.ctx, ImageFolder::Records, &record.images).await;
            return Err(e.into());
        }

        info!(record_id = %record.id, owner_id = %caller, "Record created");

        Ok(CreatedRecordResponse {
            message: "Record created".to_string(),
            record: RecordResponse::from(record),
        })
    }

    /// Latest records, newest first
    #[instrument(skip(self))]
    pub async fn list_latest(&self) -> ServiceResult<RecordListResponse> {
        let records = self.ctx.memorial_repo().find_latest(LATEST_LIMIT).await?;
        Ok(RecordListResponse {
            records: records.into_iter().map(RecordResponse::from).collect(),
        })
    }

    /// Fetch one record by native or legacy id
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> ServiceResult<RecordResponse> {
        self.load(id).await.map(RecordResponse::from)
    }

    /// Records owned by the caller, newest first
    #[instrument(skip(self))]
    pub async fn list_owned(&self, caller: UserId) -> ServiceResult<OwnedRecordsResponse> {
        let records = self.ctx.memorial_repo().find_by_owner(caller).await?;
        Ok(OwnedRecordsResponse {
            records: records.into_iter().map(RecordResponse::from).collect(),
        })
    }

    /// Edit a record the caller owns
    ///
    /// Every mandatory field must be present again; optional fields left out
    /// keep their value and new images replace the old ones.
    #[instrument(skip(self, form, images), fields(images = images.len()))]
    pub async fn update(
        &self,
        caller: UserId,
        id: &str,
        form: RecordForm,
        images: Vec<ImageUpload>,
    ) -> ServiceResult<MessageResponse> {
        let mut record = self.load(id).await?;
        self.access().caller(caller).await?;
        self.access().ensure_owner(&record, caller)?;

        let required = form.required_details()?;
        let optional = form.optional_details()?;
        uploads::check_uploads(&images)?;

        let filenames = uploads::store_all(self.ctx, ImageFolder::Records, &images).await?;
        let previous_images = if filenames.is_empty() {
            Vec::new()
        } else {
            record.images.clone()
        };

        record.apply_update(required, optional, filenames.clone());
        if let Err(e) = self.ctx.memorial_repo().update_details(&record).await {
            uploads::discard(self.ctx, ImageFolder::Records, &filenames).await;
            return Err(e.into());
        }
        uploads::discard(self.ctx, ImageFolder::Records, &previous_images).await;

        info!(record_id = %record.id, "Record updated");
        Ok(MessageResponse::new("Record updated"))
    }

    /// Permanently remove a record the caller owns
    #[instrument(skip(self))]
    pub async fn delete(&self, caller: UserId, id: &str) -> ServiceResult<MessageResponse> {
        let record_id =
            RecordId::parse(id).map_err(|_| DomainError::InvalidId(id.to_string()))?;

        let record = self
            .ctx
            .memorial_repo()
            .find_by_id(record_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Record", id))?;
        self.access().caller(caller).await?;
        self.access().ensure_owner(&record, caller)?;

        self.ctx.memorial_repo().delete(record_id).await?;
        uploads::discard(self.ctx, ImageFolder::Records, &record.images).await;

        info!(record_id = %record_id, "Record deleted");
        Ok(MessageResponse::new("Record removed"))
    }

    /// Ask to look after a record
    ///
    /// The latest request wins: an earlier adopter is replaced.
    #[instrument(skip(self))]
    pub async fn schedule(&self, caller: UserId, id: &str) -> ServiceResult<MessageResponse> {
        let mut record = self.load(id).await?;
        let adopter = self.access().caller(caller).await?;

        let snapshot = adopter.adopter_snapshot();
        if let Some(previous) = record.request_adoption(snapshot.clone())? {
            warn!(
                record_id = %record.id,
                previous_adopter = %previous.id,
                adopter_id = %caller,
                "Replacing pending adoption request"
            );
        }
        self.ctx
            .memorial_repo()
            .set_adopter(record.id, &snapshot)
            .await?;

        info!(record_id = %record.id, adopter_id = %caller, "Adoption requested");

        let cemetery = record
            .cemetery
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or("the cemetery");
        Ok(MessageResponse::new(format!(
            "Visit scheduled. Please contact {cemetery} to complete the adoption"
        )))
    }

    /// Close a record for adoption
    #[instrument(skip(self))]
    pub async fn conclude(&self, caller: UserId, id: &str) -> ServiceResult<MessageResponse> {
        let mut record = self.load(id).await?;
        self.access().caller(caller).await?;
        self.access().ensure_owner(&record, caller)?;

        record.conclude_adoption();
        self.ctx
            .memorial_repo()
            .set_available(record.id, record.available)
            .await?;

        info!(record_id = %record.id, "Adoption concluded");
        Ok(MessageResponse::new(format!(
            "Adoption of {} concluded",
            record.name
        )))
    }

    /// Leave a public comment, open to any signed-in account
    #[instrument(skip(self, request))]
    pub async fn comment(
        &self,
        caller: UserId,
        id: &str,
        request: CommentRequest,
    ) -> ServiceResult<CommentsResponse> {
        let message = request.mensagem.unwrap_or_default();
        // Content is checked before the record is looked up
        Comment::new(String::new(), &message)?;

        let record = self.load(id).await?;
        let author = self.access().caller(caller).await?;
        let comment = Comment::new(author.name, &message)?;

        let comments = self
            .ctx
            .memorial_repo()
            .add_comment(record.id, &comment)
            .await?;

        info!(record_id = %record.id, author_id = %caller, "Comment added");
        Ok(CommentsResponse {
            message: "Comment added".to_string(),
            comments,
        })
    }
}
