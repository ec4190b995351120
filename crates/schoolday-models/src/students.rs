//! Parent, student and class models.
//!
//! These mirror the session blob saved at sign-in and the class document the
//! timetable screens fetch. Field fallbacks (`name` / `fullname` /
//! `studentName`, `id` / `_id`) are resolved by accessor methods so callers
//! never branch on shape.

use crate::ids::{ClassId, ParentId, SchoolYearId, StudentId, first_id};
use schoolday_core::serde::{deserialize_null_as_empty, deserialize_optional_string};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Enrollment {
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub mongo_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub fullname: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub student_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub student_code: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub avatar_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub class_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub class: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub enrollment: Vec<Enrollment>,
}

impl Student {
    pub fn student_id(&self) -> Option<StudentId> {
        first_id(self.id.clone(), self.mongo_id.clone())
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.fullname.as_deref())
            .or(self.student_name.as_deref())
            .unwrap_or("Unknown")
    }

    /// The class whose timetable is shown: first of `class`, then the first
    /// enrollment, then `classId`.
    pub fn primary_class_id(&self) -> Option<ClassId> {
        self.class
            .iter()
            .chain(self.enrollment.iter().map(|e| &e.class))
            .chain(self.class_id.iter())
            .find(|c| !c.trim().is_empty())
            .map(|c| ClassId::new(c.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Parent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub mongo_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub fullname: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub students: Vec<Student>,
}

impl Parent {
    pub fn parent_id(&self) -> Option<ParentId> {
        first_id(self.id.clone(), self.mongo_id.clone())
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.fullname.as_deref())
            .unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GradeLevelInfo {
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Grade level as upstream sends it: a number, a string, or a populated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GradeLevelRef {
    Number(i64),
    Text(String),
    Document(GradeLevelInfo),
}

impl GradeLevelRef {
    /// Numeric grade (1..=12 in practice).
    ///
    /// Documents yield the first run of digits in `code`, else in `name`;
    /// strings must be all digits.
    pub fn grade(&self) -> Option<u8> {
        match self {
            Self::Number(n) => u8::try_from(*n).ok(),
            Self::Text(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                s.parse().ok()
            }
            Self::Text(_) => None,
            Self::Document(doc) => doc
                .code
                .as_deref()
                .or(doc.name.as_deref())
                .and_then(first_number),
        }
    }
}

fn first_number(text: &str) -> Option<u8> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchoolYearInfo {
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub mongo_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// School year reference: a bare id or a populated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchoolYearRef {
    Id(String),
    Document(SchoolYearInfo),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub mongo_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<GradeLevelRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_year: Option<SchoolYearRef>,
}

impl ClassInfo {
    pub fn class_id(&self) -> Option<ClassId> {
        first_id(self.id.clone(), self.mongo_id.clone())
    }

    pub fn grade_level(&self) -> Option<u8> {
        self.grade_level.as_ref().and_then(GradeLevelRef::grade)
    }

    pub fn school_year_id(&self) -> Option<SchoolYearId> {
        match self.school_year.as_ref()? {
            SchoolYearRef::Id(id) => first_id(Some(id.clone()), None),
            SchoolYearRef::Document(doc) => first_id(doc.mongo_id.clone(), doc.id.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn class(value: serde_json::Value) -> ClassInfo {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_grade_level_number() {
        assert_eq!(class(json!({ "gradeLevel": 4 })).grade_level(), Some(4));
    }

    #[test]
    fn test_grade_level_digit_string() {
        assert_eq!(class(json!({ "gradeLevel": "11" })).grade_level(), Some(11));
        assert_eq!(class(json!({ "gradeLevel": "Lớp 11" })).grade_level(), None);
    }

    #[test]
    fn test_grade_level_document_code_then_name() {
        let c = class(json!({ "gradeLevel": { "_id": "g", "code": "G07", "name": "Khối 8" } }));
        assert_eq!(c.grade_level(), Some(7));
        let c = class(json!({ "gradeLevel": { "name": "Khối 10" } }));
        assert_eq!(c.grade_level(), Some(10));
        let c = class(json!({ "gradeLevel": { "name": "Mầm non" } }));
        assert_eq!(c.grade_level(), None);
    }

    #[test]
    fn test_school_year_id_shapes() {
        let c = class(json!({ "schoolYear": "sy1" }));
        assert_eq!(c.school_year_id(), Some(SchoolYearId::new("sy1")));
        let c = class(json!({ "schoolYear": { "_id": "sy2", "name": "2025-2026" } }));
        assert_eq!(c.school_year_id(), Some(SchoolYearId::new("sy2")));
        assert!(class(json!({})).school_year_id().is_none());
    }

    #[test]
    fn test_student_primary_class_fallbacks() {
        let s: Student = serde_json::from_value(json!({ "_id": "s1", "class": ["c1", "c2"] })).unwrap();
        assert_eq!(s.primary_class_id(), Some(ClassId::new("c1")));
        let s: Student =
            serde_json::from_value(json!({ "_id": "s1", "enrollment": [{ "class": "c3" }] })).unwrap();
        assert_eq!(s.primary_class_id(), Some(ClassId::new("c3")));
        let s: Student = serde_json::from_value(json!({ "classId": "c4" })).unwrap();
        assert_eq!(s.primary_class_id(), Some(ClassId::new("c4")));
        assert!(Student::default().primary_class_id().is_none());
    }

    #[test]
    fn test_student_display_name_fallbacks() {
        let s: Student = serde_json::from_value(json!({ "fullname": "Nguyễn An" })).unwrap();
        assert_eq!(s.display_name(), "Nguyễn An");
        let s: Student = serde_json::from_value(json!({ "studentName": "Bình" })).unwrap();
        assert_eq!(s.display_name(), "Bình");
        assert_eq!(Student::default().display_name(), "Unknown");
    }

    #[test]
    fn test_parent_with_students() {
        let p: Parent = serde_json::from_value(json!({
            "_id": "p1",
            "fullname": "Trần Hà",
            "students": [{ "_id": "s1", "name": "An" }]
        }))
        .unwrap();
        assert_eq!(p.parent_id(), Some(ParentId::new("p1")));
        assert_eq!(p.display_name(), "Trần Hà");
        assert_eq!(p.students[0].student_id(), Some(StudentId::new("s1")));
    }
}
