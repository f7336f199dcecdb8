use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::InputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Video,
    Article,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Video => "video",
            ResourceKind::Article => "article",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceKind::Video => "Video",
            ResourceKind::Article => "Article",
        }
    }
}

impl FromStr for ResourceKind {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "video" => Ok(ResourceKind::Video),
            "article" | "doc" | "notes" => Ok(ResourceKind::Article),
            _ => Err(InputError::UnknownResourceKind(s.to_string())),
        }
    }
}

/// A study link filed under a subject and topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: Option<i64>,
    pub subject: String,
    pub topic: String,
    pub title: String,
    pub kind: ResourceKind,
    pub url: String,
}
