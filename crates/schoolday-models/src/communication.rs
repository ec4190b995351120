//! Communication log ("sổ liên lạc") entries written by teachers for parents.

use crate::value_types::deserialize_date_prefix;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationBook {
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "deserialize_date_prefix")]
    pub date: NaiveDate,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
}

impl CommunicationBook {
    /// Short date chip label, `dd/MM`.
    pub fn display_date(&self) -> String {
        self.date.format("%d/%m").to_string()
    }
}
