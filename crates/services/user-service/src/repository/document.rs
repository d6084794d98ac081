//! Document (MongoDB) user repository.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::ReturnDocument,
    Collection, Database,
};

use super::entities::user_document::{parse_object_id, set_document, UserDocument};
use super::UserRepository;
use common::{AppError, AppResult};
use domain::{NewUser, StoreKind, UserChanges, UserRecord, USERS_COLLECTION};

/// `users` collection adapter.
pub struct DocumentUserStore {
    database: Database,
    collection: Collection<UserDocument>,
}

impl DocumentUserStore {
    /// Create new repository instance
    pub fn new(database: &Database) -> Self {
        Self {
            database: database.clone(),
            collection: database.collection(USERS_COLLECTION),
        }
    }
}

/// What an update runs against the collection.
#[derive(Debug, PartialEq)]
enum UpdateStatement {
    /// Nothing to change; an empty `$set` is rejected by the server
    Read { filter: Document },
    Modify { filter: Document, update: Document },
}

fn update_statement(id: ObjectId, changes: UserChanges) -> UpdateStatement {
    let filter = doc! { "_id": id };
    let set = set_document(changes);

    if set.is_empty() {
        UpdateStatement::Read { filter }
    } else {
        UpdateStatement::Modify {
            filter,
            update: doc! { "$set": set },
        }
    }
}

#[async_trait]
impl UserRepository for DocumentUserStore {
    async fn insert(&self, user: NewUser) -> AppResult<UserRecord> {
        let mut document = UserDocument::from(user);
        let result = self.collection.insert_one(&document).await?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::store(StoreKind::Document, "insert returned a non-ObjectId key")
        })?;
        document.id = Some(id);

        Ok(UserRecord::from(document))
    }

    async fn find_all(&self) -> AppResult<Vec<UserRecord>> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<UserDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(UserRecord::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<UserRecord>> {
        let Some(id) = parse_object_id(id) else {
            return Ok(None);
        };

        let document = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(document.map(UserRecord::from))
    }

    async fn update(&self, id: &str, changes: UserChanges) -> AppResult<Option<UserRecord>> {
        let Some(id) = parse_object_id(id) else {
            return Ok(None);
        };

        let document = match update_statement(id, changes) {
            UpdateStatement::Read { filter } => self.collection.find_one(filter).await?,
            UpdateStatement::Modify { filter, update } => {
                self.collection
                    .find_one_and_update(filter, update)
                    .return_document(ReturnDocument::After)
                    .await?
            }
        };

        Ok(document.map(UserRecord::from))
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<bool> {
        let Some(id) = parse_object_id(id) else {
            return Ok(false);
        };

        let deleted = self.collection.find_one_and_delete(doc! { "_id": id }).await?;
        Ok(deleted.is_some())
    }

    async fn ping(&self) -> AppResult<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
