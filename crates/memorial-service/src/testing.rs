//! In-memory repositories backing the service tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use memorial_common::{JwtService, PasswordService};
use memorial_core::entities::{
    Comment, MemorialRecord, OptionalDetails, RequiredDetails, UserAccount, UserSnapshot,
};
use memorial_core::search::{self, SearchField, SearchQuery, Searchable};
use memorial_core::traits::{ImageStore, MemorialRepository, RepoResult, UserRepository};
use memorial_core::value_objects::{ImageFolder, ImageUpload, RecordId, UserId};
use memorial_core::DomainError;

use crate::services::{ServiceContext, ServiceContextBuilder};

#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<HashMap<UserId, (UserAccount, String)>>,
    fail_updates: AtomicBool,
}

impl InMemoryUsers {
    /// Make every later profile update fail
    pub fn fail_updates(&self) {
        self.fail_updates.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<UserAccount>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.get(&id).map(|(user, _)| user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserAccount>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .values()
            .find(|(user, _)| user.email == email)
            .map(|(user, _)| user.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn create(&self, user: &UserAccount, password_hash: &str) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if rows.values().any(|(other, _)| other.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        rows.insert(user.id, (user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn update(&self, user: &UserAccount) -> RepoResult<()> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("connection reset".to_string()));
        }
        let mut rows = self.rows.lock().unwrap();
        if rows
            .values()
            .any(|(other, _)| other.id != user.id && other.email == user.email)
        {
            return Err(DomainError::EmailAlreadyExists);
        }
        let (stored, _) = rows
            .get_mut(&user.id)
            .ok_or_else(|| DomainError::UserNotFound(user.id.to_string()))?;
        *stored = user.clone();
        Ok(())
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.get(&id).map(|(_, hash)| hash.clone()))
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let (_, hash) = rows
            .get_mut(&id)
            .ok_or_else(|| DomainError::UserNotFound(id.to_string()))?;
        *hash = password_hash.to_string();
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryRecords {
    rows: Mutex<Vec<MemorialRecord>>,
    fail_writes: AtomicBool,
}

impl InMemoryRecords {
    /// Make every later create or detail update fail
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    fn check_write(&self) -> RepoResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("connection reset".to_string()));
        }
        Ok(())
    }

    pub fn get(&self, id: RecordId) -> Option<MemorialRecord> {
        let rows = self.rows.lock().unwrap();
        rows.iter().find(|r| r.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn with_record<T>(
        &self,
        id: RecordId,
        apply: impl FnOnce(&mut MemorialRecord) -> T,
    ) -> RepoResult<T> {
        let mut rows = self.rows.lock().unwrap();
        let record = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::RecordNotFound(id.to_string()))?;
        Ok(apply(record))
    }

    fn newest_first(mut records: Vec<MemorialRecord>) -> Vec<MemorialRecord> {
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }
}

#[async_trait]
impl MemorialRepository for InMemoryRecords {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<MemorialRecord>> {
        Ok(self.get(id))
    }

    async fn find_by_legacy_id(&self, legacy_id: &str) -> RepoResult<Option<MemorialRecord>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|r| r.legacy_id.as_deref() == Some(legacy_id))
            .cloned())
    }

    async fn find_latest(&self, limit: i64) -> RepoResult<Vec<MemorialRecord>> {
        let rows = self.rows.lock().unwrap().clone();
        Ok(Self::newest_first(rows)
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(0))
            .collect())
    }

    async fn find_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<MemorialRecord>> {
        let rows = self.rows.lock().unwrap().clone();
        Ok(Self::newest_first(rows)
            .into_iter()
            .filter(|r| r.is_owned_by(owner_id))
            .collect())
    }

    async fn search(&self, query: &SearchQuery, limit: usize) -> RepoResult<Vec<MemorialRecord>> {
        let rows = self.rows.lock().unwrap().clone();
        Ok(search::rank(query, Self::newest_first(rows), limit))
    }

    async fn suggest_by_name(
        &self,
        query: &SearchQuery,
        limit: usize,
    ) -> RepoResult<Vec<MemorialRecord>> {
        let rows = self.rows.lock().unwrap().clone();
        Ok(search::suggest(query, rows).into_iter().take(limit).collect())
    }

    async fn distinct_values(
        &self,
        field: SearchField,
        query: &SearchQuery,
        limit: usize,
    ) -> RepoResult<Vec<String>> {
        let rows = self.rows.lock().unwrap();
        let values = rows.iter().filter_map(|r| r.field(field));
        Ok(search::field_completions(query, field, values)
            .into_iter()
            .take(limit)
            .collect())
    }

    async fn create(&self, record: &MemorialRecord) -> RepoResult<()> {
        self.check_write()?;
        self.rows.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn update_details(&self, record: &MemorialRecord) -> RepoResult<()> {
        self.check_write()?;
        let record = record.clone();
        self.with_record(record.id, move |stored| *stored = record)
    }

    async fn set_adopter(&self, id: RecordId, adopter: &UserSnapshot) -> RepoResult<()> {
        let adopter = adopter.clone();
        self.with_record(id, move |stored| stored.adopter = Some(adopter))
    }

    async fn set_available(&self, id: RecordId, available: bool) -> RepoResult<()> {
        self.with_record(id, move |stored| stored.available = available)
    }

    async fn add_comment(&self, id: RecordId, comment: &Comment) -> RepoResult<Vec<Comment>> {
        let comment = comment.clone();
        self.with_record(id, move |stored| {
            stored.add_comment(comment);
            stored.comments.clone()
        })
    }

    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(DomainError::RecordNotFound(id.to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryImages {
    files: Mutex<Vec<(ImageFolder, String)>>,
    saves_left: Mutex<Option<usize>>,
}

impl InMemoryImages {
    /// Let `saves` more files through, then fail every save
    pub fn fail_after(&self, saves: usize) {
        *self.saves_left.lock().unwrap() = Some(saves);
    }

    pub fn stored(&self, folder: ImageFolder) -> Vec<String> {
        let files = self.files.lock().unwrap();
        files
            .iter()
            .filter(|(f, _)| *f == folder)
            .map(|(_, name)| name.clone())
            .collect()
    }
}

#[async_trait]
impl ImageStore for InMemoryImages {
    async fn save(&self, folder: ImageFolder, upload: &ImageUpload) -> RepoResult<String> {
        if let Some(left) = self.saves_left.lock().unwrap().as_mut() {
            if *left == 0 {
                return Err(DomainError::InternalError("disk full".to_string()));
            }
            *left -= 1;
        }
        let ext = upload.format().map_or("bin", |f| f.extension());
        let name = format!("{}.{ext}", uuid_like());
        self.files.lock().unwrap().push((folder, name.clone()));
        Ok(name)
    }

    async fn remove(&self, folder: ImageFolder, filename: &str) -> RepoResult<()> {
        self.files
            .lock()
            .unwrap()
            .retain(|(f, name)| !(*f == folder && name == filename));
        Ok(())
    }
}

fn uuid_like() -> String {
    RecordId::generate().to_string()
}

/// Service context wired to in-memory fakes
pub struct Fixture {
    pub ctx: ServiceContext,
    pub users: Arc<InMemoryUsers>,
    pub records: Arc<InMemoryRecords>,
    pub images: Arc<InMemoryImages>,
}

impl Fixture {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUsers::default());
        let records = Arc::new(InMemoryRecords::default());
        let images = Arc::new(InMemoryImages::default());
        let ctx = ServiceContextBuilder::new()
            .user_repo(users.clone())
            .memorial_repo(records.clone())
            .image_store(images.clone())
            .jwt_service(Arc::new(JwtService::new("test-secret", 3600)))
            .build()
            .unwrap();
        Self {
            ctx,
            users,
            records,
            images,
        }
    }

    /// Insert an account whose password is `secret`
    pub async fn user(&self, name: &str) -> UserAccount {
        let user = UserAccount::new(
            UserId::generate(),
            name.to_string(),
            format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            "5511999990000".to_string(),
            "12345678900".to_string(),
        );
        let hash = PasswordService::new().hash("secret").unwrap();
        self.users.create(&user, &hash).await.unwrap();
        user
    }

    /// Insert a record owned by `owner`
    pub async fn record(&self, owner: &UserAccount, name: &str, street: &str) -> MemorialRecord {
        let record = MemorialRecord::new(
            RecordId::generate(),
            RequiredDetails {
                name: name.to_string(),
                plaque: "P-1".to_string(),
                death_date: "02/11/1990".to_string(),
                birth_date: "15/03/1921".to_string(),
                age: "69".to_string(),
                block: "Quadra 3".to_string(),
                mother: "Maria".to_string(),
                father: "Pedro".to_string(),
            },
            OptionalDetails {
                street: Some(street.to_string()),
                cemetery: Some("Cemitério da Saudade".to_string()),
                ..OptionalDetails::default()
            },
            owner.owner_snapshot(),
            vec!["one.png".to_string()],
        );
        self.records.create(&record).await.unwrap();
        record
    }
}

pub fn png() -> ImageUpload {
    ImageUpload::new("image/png", vec![0x89, b'P', b'N', b'G'])
}
