//! # GCP Policy Graph - Resource Hierarchy and IAM Bindings as a Typed Graph
//!
//! `gcp-policy-graph` loads a cloud asset inventory export and answers
//! structural and permission questions about it:
//!
//! - **Ancestor paths**: which folders and organization a resource sits under
//! - **Descendants**: every resource below a folder or organization
//! - **Member permissions**: every resource a member can reach, with the
//!   granting role, including resources inherited below a binding
//! - **Resource access**: every member and role with access to a resource,
//!   including bindings declared on its ancestors
//!
//! The query layer sits on a generic [`graph::Graph`] with structural node
//! identity and type-filtered, directional traversal.
//!
//! ## Quick Start
//!
//! ```rust
//! use gcp_policy_graph::{PolicyManager, Result};
//!
//! # fn main() -> Result<()> {
//! let manager = PolicyManager::from_json(r#"[
//!     {"name": "//cloudresourcemanager.googleapis.com/organizations/1",
//!      "asset_type": "cloudresourcemanager.googleapis.com/Organization",
//!      "ancestors": ["organizations/1"]},
//!     {"name": "//cloudresourcemanager.googleapis.com/folders/2",
//!      "asset_type": "cloudresourcemanager.googleapis.com/Folder",
//!      "ancestors": ["folders/2", "organizations/1"],
//!      "iam_policy": {"bindings": [{"role": "roles/owner", "members": ["user:ana@example.com"]}]}},
//!     {"name": "//cloudresourcemanager.googleapis.com/projects/3",
//!      "asset_type": "cloudresourcemanager.googleapis.com/Project",
//!      "ancestors": ["projects/3", "folders/2", "organizations/1"]}
//! ]"#)?;
//!
//! let project = manager.resource_by_id("projects/3")?;
//! assert_eq!(manager.resource_path(project), ["folders/2", "organizations/1"]);
//!
//! let member = manager.member_by_id("user:ana@example.com")?;
//! let reachable: Vec<&str> = manager
//!     .all_members_permission(member)?
//!     .iter()
//!     .map(|permission| permission.resource.id())
//!     .collect();
//! assert_eq!(reachable, ["folders/2", "projects/3"]);
//! # Ok(())
//! # }
//! ```

pub mod core;

pub use crate::core::{config, error, graph, naming, policy};

pub use crate::core::{
    config::PolicyConfig,
    error::{PolicyError, Result},
    graph::{Edge, EdgeType, Graph, Node, NodeId, NodeKind},
    policy::{
        AssetRecord, GraphSummary, MemberNode, MemberPermission, PolicyGraph, PolicyManager,
        PolicyManagerBuilder, PolicyNode, PolicyNodeType, ResourceNode, ResourcePermission,
        ResourceTypeNode, RoleNode,
    },
};
