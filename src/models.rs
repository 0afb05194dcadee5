//! Document shapes for the externally owned `programs` and `categories`
//! collections.
//!
//! Only documents this crate creates are typed. Everything read back for a
//! report goes through [`DocumentSummary`], which never fails on a document
//! whose fields have an unexpected type.

use std::fmt;

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};

pub const PROGRAMS: &str = "programs";
pub const CATEGORIES: &str = "categories";

/// Known values of a program's `status` field. Other values may exist and are kept.
pub mod status {
    pub const DRAFT: &str = "draft";
    pub const PUBLISHED: &str = "published";
}

const UNKNOWN: &str = "<unknown>";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub is_active: bool,
}

impl CategoryDoc {
    /// A fresh, active category ready for insertion.
    pub fn active(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            is_active: true,
        }
    }
}

/// Identifying fields of any stored document, read leniently for reports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentSummary {
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    /// `None` when the field is missing or not a boolean.
    pub is_active: Option<bool>,
}

fn render(value: &Bson) -> Option<String> {
    match value {
        Bson::Null | Bson::Undefined => None,
        Bson::String(s) => Some(s.clone()),
        Bson::ObjectId(oid) => Some(oid.to_hex()),
        other => Some(other.to_string()),
    }
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.get("_id").and_then(render),
            name: doc.get("name").and_then(render),
            category: doc.get("category").and_then(render),
            status: doc.get("status").and_then(render),
            is_active: doc.get_bool("isActive").ok(),
        }
    }
}

impl fmt::Display for DocumentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_deref().unwrap_or(UNKNOWN))?;
        if let Some(category) = &self.category {
            write!(f, " [{}]", category)?;
        }
        f.write_str(" (")?;
        if let Some(status) = &self.status {
            write!(f, "status: {}, ", status)?;
        }
        match self.is_active {
            Some(active) => write!(f, "isActive: {})", active),
            None => write!(f, "isActive: {})", UNKNOWN),
        }
    }
}

pub fn summarize(docs: &[Document]) -> Vec<DocumentSummary> {
    docs.iter().map(DocumentSummary::from).collect()
}
