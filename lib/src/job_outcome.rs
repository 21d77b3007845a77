use crate::error::NotifierError;
use serde_json::{Map, Value};

pub const INVALID_BODY: &str = "request body is missing or invalid";
pub const MISSING_EMAIL: &str = "missing email";
pub const MISSING_DOWNLOAD_URL: &str = "missing downloadUrl";

const EMAIL_FIELDS: [&str; 2] = ["email", "to_address"];
const DOWNLOAD_URL_FIELDS: [&str; 4] = ["downloadUrl", "frame_url", "processingLink", "url_download"];

/// Raw input as it reaches a trigger adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
    Missing,
}

impl From<Option<Value>> for Payload {
    fn from(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => Payload::Missing,
            Some(value) => Payload::Json(value),
        }
    }
}

impl From<Option<String>> for Payload {
    fn from(value: Option<String>) -> Self {
        value.map(Payload::Text).unwrap_or(Payload::Missing)
    }
}

/// Normalized, not yet validated, job outcome record.
///
/// Fields are read leniently: a value of the wrong type counts as absent, and
/// `succeeded` is only true for a JSON `true`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobRecord {
    pub email: Option<String>,
    pub succeeded: bool,
    pub download_url: Option<String>,
}

impl JobRecord {
    pub fn normalize(payload: Payload) -> Result<Self, NotifierError> {
        let value = match payload {
            Payload::Json(Value::String(text)) | Payload::Text(text) => {
                serde_json::from_str::<Value>(&text).map_err(|error| invalid_body(&error.to_string()))?
            },
            Payload::Json(value) => value,
            Payload::Missing => return Err(invalid_body("payload is missing")),
        };

        match value {
            Value::Object(object) => Ok(Self::from_object(&object)),
            other => Err(invalid_body(&format!("expected a JSON object, got {other}"))),
        }
    }

    fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            email: first_string(object, &EMAIL_FIELDS),
            succeeded: matches!(object.get("succeeded"), Some(Value::Bool(true))),
            download_url: first_string(object, &DOWNLOAD_URL_FIELDS),
        }
    }

    pub fn validate(&self) -> Result<JobOutcome, NotifierError> {
        let email = non_blank(&self.email).ok_or_else(|| NotifierError::validation(MISSING_EMAIL))?;

        if !self.succeeded {
            return Ok(JobOutcome::Failed { email });
        }

        let download_url = non_blank(&self.download_url).ok_or_else(|| NotifierError::validation(MISSING_DOWNLOAD_URL))?;

        Ok(JobOutcome::Succeeded { email, download_url })
    }

    /// Recipient usable for a failure notice, whether or not the record validated.
    pub fn recipient(&self) -> Option<String> {
        non_blank(&self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Succeeded { email: String, download_url: String },
    Failed { email: String },
}

impl JobOutcome {
    pub fn email(&self) -> &str {
        match self {
            JobOutcome::Succeeded { email, .. } | JobOutcome::Failed { email } => email,
        }
    }

    pub fn download_url(&self) -> Option<&str> {
        match self {
            JobOutcome::Succeeded { download_url, .. } => Some(download_url),
            JobOutcome::Failed { .. } => None,
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self, JobOutcome::Succeeded { .. })
    }
}

/// Canonical names come first, so they win over legacy ones.
fn first_string(
    object: &Map<String, Value>,
    names: &[&str],
) -> Option<String> {
    names.iter().find_map(|name| object.get(*name).and_then(Value::as_str)).map(str::to_string)
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|it| !it.is_empty()).map(str::to_string)
}

fn invalid_body(cause: &str) -> NotifierError {
    NotifierError {
        cause: format!("{INVALID_BODY}: {cause}"),
        ..NotifierError::validation(INVALID_BODY)
    }
}
