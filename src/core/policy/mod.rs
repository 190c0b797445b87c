//! GCP policy model on top of the generic graph
//!
//! Resources, their types, role bindings and members become nodes of a
//! [`PolicyGraph`]:
//! - `resource -> resourceType`: the resource's asset type
//! - `resource -> resource`: parent to direct child
//! - `resource -> role`: role binding declared on the resource; the role
//!   node records the declaring resource id as its only artefact
//! - `role -> member`: role granted to a member
//!
//! Because the declaring resource is part of a role's identity, the same role
//! name bound on two resources yields two role nodes.

mod asset;
mod cache;
mod manager;
mod node_type;

pub use asset::{parse_records, read_records, AssetRecord, Binding, IamPolicy};
pub use cache::AncestorCache;
pub use manager::{
    GraphSummary, MemberPermission, PolicyManager, PolicyManagerBuilder, ResourcePermission,
};
pub use node_type::{
    MemberNode, PolicyEdge, PolicyGraph, PolicyNode, PolicyNodeType, ResourceNode,
    ResourceTypeNode, RoleNode, EDGE_TYPES, RESOURCE_TO_RESOURCE, RESOURCE_TO_RESOURCE_TYPE,
    RESOURCE_TO_ROLE, ROLE_TO_MEMBER,
};
