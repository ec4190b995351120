//! Explicit session context.
//!
//! Holds the signed-in parent and the child currently selected, and answers
//! the "which student / which class" questions every fetch needs. Missing
//! context is the only error the scheduling layer raises to its caller.

use anyhow::anyhow;
use schoolday_config::ApiConfig;
use schoolday_core::AppError;
use schoolday_models::ids::{ClassId, StudentId};
use schoolday_models::{Parent, Student};
use serde::Deserialize;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub token: Option<String>,
    pub parent: Option<Parent>,
    #[serde(default)]
    pub active_index: usize,
}

impl SessionContext {
    pub fn new(token: impl Into<String>, parent: Parent) -> Self {
        Self {
            token: Some(token.into()),
            parent: Some(parent),
            active_index: 0,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    /// `Authorization` header value for the backend.
    pub fn bearer_header(&self) -> Result<String, AppError> {
        match self.token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(format!("Bearer {token}")),
            _ => Err(AppError::missing_context(anyhow!("Not signed in"))),
        }
    }

    pub fn students(&self) -> &[Student] {
        self.parent.as_ref().map(|p| p.students.as_slice()).unwrap_or(&[])
    }

    pub fn active_student(&self) -> Option<&Student> {
        self.students().get(self.active_index)
    }

    #[instrument(skip(self))]
    pub fn select_student(&mut self, index: usize) -> Result<&Student, AppError> {
        let count = self.students().len();
        if index >= count {
            return Err(AppError::missing_context(anyhow!(
                "No student at position {index} ({count} linked)"
            )));
        }
        self.active_index = index;
        debug!(index, "active student changed");
        Ok(&self.students()[index])
    }

    pub fn require_student(&self) -> Result<&Student, AppError> {
        self.active_student()
            .ok_or_else(|| AppError::missing_context(anyhow!("No student selected")))
    }

    pub fn require_student_id(&self) -> Result<StudentId, AppError> {
        self.require_student()?
            .student_id()
            .ok_or_else(|| AppError::missing_context(anyhow!("Selected student has no id")))
    }

    pub fn require_class_id(&self) -> Result<ClassId, AppError> {
        self.require_student()?
            .primary_class_id()
            .ok_or_else(|| AppError::missing_context(anyhow!("Selected student has no class")))
    }
}

/// Absolute avatar URL for a student, `None` when they have no avatar.
///
/// Relative paths are joined onto the backend base URL with spaces escaped.
pub fn student_avatar_url(student: &Student, api: &ApiConfig) -> Option<String> {
    let path = student.avatar_url.as_deref().map(str::trim).filter(|p| !p.is_empty())?;
    if path.starts_with("http") {
        return Some(path.to_string());
    }
    Some(format!("{}{}", api.base_url, path.replace(' ', "%20")))
}
