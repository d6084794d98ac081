//! Relational (MySQL) user repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, Set};

use super::entities::user::{ActiveModel, Entity as UserEntity};
use super::UserRepository;
use common::AppResult;
use domain::{NewUser, UserChanges, UserRecord};

/// `users` table adapter.
pub struct RelationalUserStore {
    db: DatabaseConnection,
}

impl RelationalUserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: i32) -> AppResult<Option<UserRecord>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(UserRecord::from))
    }
}

/// Primary keys are plain integers.
fn parse_id(id: &str) -> Option<i32> {
    id.trim().parse().ok()
}

#[async_trait]
impl UserRepository for RelationalUserStore {
    async fn insert(&self, user: NewUser) -> AppResult<UserRecord> {
        let active_model = ActiveModel {
            id: NotSet,
            text_field: Set(user.text_field),
            password: Set(user.password),
            image: Set(user.image),
            date_field: Set(user.date_field),
            opinion: Set(user.opinion),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(UserRecord::from(model))
    }

    async fn find_all(&self) -> AppResult<Vec<UserRecord>> {
        let models = UserEntity::find().all(&self.db).await?;
        Ok(models.into_iter().map(UserRecord::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<UserRecord>> {
        match parse_id(id) {
            Some(id) => self.find_model(id).await,
            None => Ok(None),
        }
    }

    async fn update(&self, id: &str, changes: UserChanges) -> AppResult<Option<UserRecord>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let Some(model) = UserEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        if changes.is_empty() {
            return Ok(Some(UserRecord::from(model)));
        }

        let mut active: ActiveModel = model.into();

        if let Some(text_field) = changes.text_field {
            active.text_field = Set(text_field);
        }
        if let Some(password) = changes.password {
            active.password = Set(password);
        }
        if let Some(image) = changes.image.into_update() {
            active.image = Set(image);
        }
        if let Some(date_field) = changes.date_field.into_update() {
            active.date_field = Set(date_field);
        }
        if let Some(opinion) = changes.opinion.into_update() {
            active.opinion = Set(opinion);
        }

        match active.update(&self.db).await {
            Ok(model) => Ok(Some(UserRecord::from(model))),
            // Zero affected rows: either nothing changed or the row was deleted meanwhile
            Err(DbErr::RecordNotUpdated) => self.find_model(id).await,
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<bool> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };

        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        self.db.ping().await?;
        Ok(())
    }
}
