//! User document as stored in the `users` collection.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mongodb::bson::{oid::ObjectId, Bson, DateTime as BsonDateTime, Document};
use serde::{Deserialize, Serialize};

use domain::{Change, NewUser, RecordId, UserChanges, UserRecord};

/// Collection document. Dates are BSON dates at UTC midnight; fields absent
/// from older documents deserialize to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub text_field: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub date_field: Option<BsonDateTime>,
    #[serde(default)]
    pub opinion: Option<String>,
}

impl From<NewUser> for UserDocument {
    fn from(user: NewUser) -> Self {
        Self {
            id: None,
            text_field: user.text_field,
            password: user.password,
            image: user.image,
            date_field: user.date_field.map(to_bson_date),
            opinion: user.opinion,
        }
    }
}

impl From<UserDocument> for UserRecord {
    fn from(document: UserDocument) -> Self {
        UserRecord {
            id: RecordId::Object(document.id.map(|id| id.to_hex()).unwrap_or_default()),
            text_field: document.text_field,
            password: document.password,
            image: document.image,
            date_field: document.date_field.and_then(from_bson_date),
            opinion: document.opinion,
        }
    }
}

/// `$set` body for a change set; cleared fields are stored as null.
pub fn set_document(changes: UserChanges) -> Document {
    let mut set = Document::new();

    if let Some(text_field) = changes.text_field {
        set.insert("text_field", text_field);
    }
    if let Some(password) = changes.password {
        set.insert("password", password);
    }
    insert_change(&mut set, "image", changes.image.map(Bson::String));
    insert_change(&mut set, "date_field", changes.date_field.map(|d| Bson::DateTime(to_bson_date(d))));
    insert_change(&mut set, "opinion", changes.opinion.map(Bson::String));

    set
}

fn insert_change(set: &mut Document, key: &str, change: Change<Bson>) {
    if let Some(value) = change.into_update() {
        set.insert(key, value.unwrap_or(Bson::Null));
    }
}

/// Parse a path identifier; anything that is not an ObjectId cannot exist.
pub fn parse_object_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id.trim()).ok()
}

fn to_bson_date(date: NaiveDate) -> BsonDateTime {
    BsonDateTime::from_millis(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
}

fn from_bson_date(date: BsonDateTime) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(date.timestamp_millis()).map(|dt| dt.date_naive())
}
