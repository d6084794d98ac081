//! Form extractor accepting JSON, urlencoded or multipart bodies.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use common::{AppError, AppResult};
use domain::DomainError;

use crate::uploads::UploadedFile;

/// Payload type that may carry one file part.
pub trait FileField {
    /// Multipart field name of the file part
    const FILE_FIELD: &'static str;
}

/// Text fields plus the optional file part of a user form.
///
/// Text fields deserialize into `T` whatever the body encoding. A missing
/// body or unknown content type yields `T` built from no fields at all.
/// The file is only read into memory here; writing it to disk is left to
/// the handler once the rest of the request has been validated.
pub struct UserForm<T> {
    pub fields: T,
    pub file: Option<UploadedFile>,
}

#[async_trait]
impl<S, T> FromRequest<S> for UserForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + FileField + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::internal(format!("Malformed multipart body: {}", e.body_text())))?;
            return read_multipart(multipart).await;
        }

        let fields = if content_type.starts_with("application/json") {
            let Json(value) = Json::<Value>::from_request(req, state)
                .await
                .map_err(|e| AppError::validation(e.body_text()))?;
            from_text_fields(json_text_fields(value)?)?
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::validation(e.body_text()))?;
            value
        } else {
            from_text_fields(HashMap::new())?
        };

        Ok(UserForm { fields, file: None })
    }
}

async fn read_multipart<T>(mut multipart: Multipart) -> AppResult<UserForm<T>>
where
    T: DeserializeOwned + FileField,
{
    let mut text = HashMap::new();
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::internal(format!("Malformed multipart body: {}", e.body_text())))?
    {
        let name = field.name().unwrap_or_default().to_string();

        let Some(file_name) = field.file_name().map(str::to_string) else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::internal(format!("Unreadable field {}: {}", name, e.body_text())))?;
            text.insert(name, value);
            continue;
        };

        if name != T::FILE_FIELD {
            return Err(AppError::internal(format!("Unexpected file field {}", name)));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::internal(format!("Unreadable file {}: {}", name, e.body_text())))?;

        // Browsers send an empty part when no file was chosen
        if file_name.is_empty() && bytes.is_empty() {
            continue;
        }
        if file.is_some() {
            return Err(AppError::internal(format!("More than one file in field {}", name)));
        }

        file = Some(UploadedFile {
            file_name: Some(file_name).filter(|n| !n.is_empty()),
            bytes,
        });
    }

    Ok(UserForm {
        fields: from_text_fields(text)?,
        file,
    })
}

/// JSON scalars become text the way form encodings carry them; `null` is
/// absent. A body that is not an object carries no fields.
fn json_text_fields(value: Value) -> AppResult<HashMap<String, String>> {
    let Value::Object(object) = value else {
        return Ok(HashMap::new());
    };

    let mut text = HashMap::new();
    for (key, value) in object {
        let value = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(DomainError::invalid_field(&key).into());
            }
        };
        text.insert(key, value);
    }

    Ok(text)
}

fn from_text_fields<T: DeserializeOwned>(text: HashMap<String, String>) -> AppResult<T> {
    let object = text
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect::<serde_json::Map<_, _>>();

    serde_json::from_value(Value::Object(object)).map_err(|e| AppError::validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Fields {
        name: Option<String>,
        database: Option<String>,
    }

    impl FileField for Fields {
        const FILE_FIELD: &'static str = "image";
    }

    const BOUNDARY: &str = "XBOUNDARYX";

    fn multipart(parts: &[(&str, Option<&str>, &str)]) -> Request {
        let mut body = String::new();
        for (name, file_name, value) in parts {
            body.push_str(&format!("--{}\r\n", BOUNDARY));
            match file_name {
                Some(file_name) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    name, file_name
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    name
                )),
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{}--\r\n", BOUNDARY));

        http::Request::builder()
            .method("POST")
            .uri("/")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn extract(req: Request) -> AppResult<UserForm<Fields>> {
        UserForm::<Fields>::from_request(req, &()).await
    }

    #[tokio::test]
    async fn test_multipart_text_and_file() {
        let form = extract(multipart(&[
            ("name", None, "hola"),
            ("database", None, "mysql"),
            ("image", Some("cat.png"), "PNGDATA"),
        ]))
        .await
        .unwrap();

        assert_eq!(form.fields.name.as_deref(), Some("hola"));
        assert_eq!(form.fields.database.as_deref(), Some("mysql"));
        let file = form.file.unwrap();
        assert_eq!(file.file_name.as_deref(), Some("cat.png"));
        assert_eq!(&file.bytes[..], b"PNGDATA");
    }

    #[tokio::test]
    async fn test_empty_file_part_counts_as_no_file() {
        let form = extract(multipart(&[("name", None, "hola"), ("image", Some(""), "")]))
            .await
            .unwrap();

        assert!(form.file.is_none());
    }

    #[tokio::test]
    async fn test_unexpected_file_field_is_internal() {
        let result = extract(multipart(&[("avatar", Some("cat.png"), "PNG")])).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_second_file_is_internal() {
        let result = extract(multipart(&[
            ("image", Some("a.png"), "A"),
            ("image", Some("b.png"), "B"),
        ]))
        .await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_json_body() {
        let req = http::Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"hola","database":"mongodb"}"#))
            .unwrap();

        let form = extract(req).await.unwrap();
        assert_eq!(form.fields.database.as_deref(), Some("mongodb"));
        assert!(form.file.is_none());
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let req = http::Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        assert!(matches!(extract(req).await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_urlencoded_body() {
        let req = http::Request::builder()
            .method("PUT")
            .uri("/")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("name=hola+mundo&database=mysql"))
            .unwrap();

        let form = extract(req).await.unwrap();
        assert_eq!(form.fields.name.as_deref(), Some("hola mundo"));
    }

    #[tokio::test]
    async fn test_no_body_yields_empty_fields() {
        let req = http::Request::builder()
            .method("PUT")
            .uri("/")
            .body(Body::empty())
            .unwrap();

        let form = extract(req).await.unwrap();
        assert!(form.fields.name.is_none());
        assert!(form.fields.database.is_none());
    }

    fn json(body: &str) -> Request {
        http::Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_json_scalars_read_as_text() {
        let form = extract(json(r#"{"name":5,"database":"mysql","extra":true,"other":null}"#))
            .await
            .unwrap();

        assert_eq!(form.fields.name.as_deref(), Some("5"));
        assert_eq!(form.fields.database.as_deref(), Some("mysql"));
    }

    #[tokio::test]
    async fn test_json_nested_value_is_validation_error() {
        let result = extract(json(r#"{"name":{"first":"hola"}}"#)).await;

        match result {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Campo inválido: name"),
            _ => panic!("expected a validation error"),
        }
    }

    #[tokio::test]
    async fn test_json_non_object_yields_empty_fields() {
        let form = extract(json("[1, 2]")).await.unwrap();

        assert!(form.fields.name.is_none());
        assert!(form.fields.database.is_none());
    }
}
