//! Asset inventory records
//!
//! Mirrors the subset of a cloud asset inventory export the policy graph
//! needs. Every field defaults when missing so that partial records still
//! load; unknown fields are ignored.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// One inventory entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetRecord {
    /// Full provider path, e.g. `//cloudresourcemanager.googleapis.com/folders/1`
    pub name: String,

    /// Asset type, e.g. `cloudresourcemanager.googleapis.com/Folder`
    pub asset_type: String,

    /// The resource itself followed by its ancestors, nearest first
    pub ancestors: Vec<String>,

    pub iam_policy: IamPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IamPolicy {
    pub bindings: Vec<Binding>,
}

/// A role granted to a list of members
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Binding {
    pub role: String,
    pub members: Vec<String>,
}

impl AssetRecord {
    pub fn new(name: impl Into<String>, asset_type: impl Into<String>) -> Self {
        AssetRecord {
            name: name.into(),
            asset_type: asset_type.into(),
            ..Default::default()
        }
    }

    /// Set the ancestor list (self first)
    pub fn with_ancestors<I, S>(mut self, ancestors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ancestors = ancestors.into_iter().map(Into::into).collect();
        self
    }

    /// Append a role binding
    pub fn with_binding<I, S>(mut self, role: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.iam_policy.bindings.push(Binding {
            role: role.into(),
            members: members.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Canonical id of the direct parent, if the record names one
    pub fn parent_id(&self) -> Option<&str> {
        self.ancestors.get(1).map(String::as_str)
    }
}

/// Decode a JSON array of records
pub fn parse_records(json: &str) -> Result<Vec<AssetRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Decode a JSON array of records from a reader
pub fn read_records(reader: impl Read) -> Result<Vec<AssetRecord>> {
    Ok(serde_json::from_reader(reader)?)
}
