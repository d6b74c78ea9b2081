use std::fmt;
use std::ops::Deref;

use serde::Serialize;

use super::path::Path;

/// Category of a field validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorType {
    /// Value is malformed or out of range.
    #[serde(rename = "FieldValueInvalid")]
    Invalid,

    /// Value must be unique but is already present.
    #[serde(rename = "FieldValueDuplicate")]
    Duplicate,

    /// Value refers to something that does not exist.
    #[serde(rename = "FieldValueNotFound")]
    NotFound,

    /// Value must be supplied but was empty or unset.
    #[serde(rename = "FieldValueRequired")]
    Required,

    /// Value must not be supplied or changed by the caller.
    #[serde(rename = "FieldValueForbidden")]
    Forbidden,

    /// Validation could not be completed.
    #[serde(rename = "InternalError")]
    Internal,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            ErrorType::Invalid => "Invalid value",
            ErrorType::Duplicate => "Duplicate value",
            ErrorType::NotFound => "Not found",
            ErrorType::Required => "Required value",
            ErrorType::Forbidden => "Forbidden",
            ErrorType::Internal => "Internal error",
        };
        f.write_str(description)
    }
}

/// A single validation failure on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    /// Dotted field path, e.g. `User.Login`
    pub field: String,
    /// Offending value, empty when not applicable
    pub bad_value: String,
    pub detail: String,
}

impl FieldError {
    fn new(
        error_type: ErrorType,
        path: &Path,
        bad_value: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            error_type,
            field: path.to_string(),
            bad_value: bad_value.into(),
            detail: detail.into(),
        }
    }

    pub fn invalid(path: &Path, value: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ErrorType::Invalid, path, value, detail)
    }

    pub fn duplicate(path: &Path, value: impl Into<String>) -> Self {
        Self::new(ErrorType::Duplicate, path, value, "")
    }

    pub fn not_found(path: &Path, value: impl Into<String>) -> Self {
        Self::new(ErrorType::NotFound, path, value, "")
    }

    pub fn required(path: &Path, detail: impl Into<String>) -> Self {
        Self::new(ErrorType::Required, path, "", detail)
    }

    pub fn forbidden(path: &Path, detail: impl Into<String>) -> Self {
        Self::new(ErrorType::Forbidden, path, "", detail)
    }

    pub fn internal(path: &Path, err: impl fmt::Display) -> Self {
        Self::new(ErrorType::Internal, path, "", err.to_string())
    }

    /// `<field>: <type>[: "<value>"][: <detail>]`
    ///
    /// The value is only shown for categories where it is meaningful.
    pub fn message(&self) -> String {
        let mut message = format!("{}: {}", self.field, self.error_type);

        match self.error_type {
            ErrorType::Invalid | ErrorType::Duplicate | ErrorType::NotFound => {
                message.push_str(&format!(": {:?}", self.bad_value));
            }
            ErrorType::Required | ErrorType::Forbidden | ErrorType::Internal => {}
        }

        if !self.detail.is_empty() {
            message.push_str(": ");
            message.push_str(&self.detail);
        }

        message
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for FieldError {}

/// Ordered collection of field errors. Empty means the record is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorList(Vec<FieldError>);

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Errors for which `keep` returns true, order preserved.
    pub fn filter(&self, keep: impl Fn(&FieldError) -> bool) -> Self {
        self.0.iter().filter(|e| keep(e)).cloned().collect()
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

impl Deref for ErrorList {
    type Target = [FieldError];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Extend<FieldError> for ErrorList {
    fn extend<I: IntoIterator<Item = FieldError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<FieldError> for ErrorList {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ErrorList {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(FieldError::message).collect();
        match messages.len() {
            0 => Ok(()),
            1 => f.write_str(&messages[0]),
            _ => write!(f, "[{}]", messages.join(", ")),
        }
    }
}
