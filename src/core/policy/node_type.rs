//! Node kinds of the policy graph and the edge types between them

use crate::graph::{Edge, EdgeType, Graph, Node, NodeKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a policy graph node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PolicyNodeType {
    /// Organization, folder, project or any other inventory asset
    Resource,
    /// Asset type of a resource, e.g. `cloudresourcemanager.googleapis.com/Folder`
    ResourceType,
    /// IAM role bound on a resource
    Role,
    /// Principal a role is granted to, e.g. `user:alice@example.com`
    Member,
}

impl PolicyNodeType {
    pub const ALL: [PolicyNodeType; 4] = [
        PolicyNodeType::Resource,
        PolicyNodeType::ResourceType,
        PolicyNodeType::Role,
        PolicyNodeType::Member,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyNodeType::Resource => "resource",
            PolicyNodeType::ResourceType => "resourceType",
            PolicyNodeType::Role => "role",
            PolicyNodeType::Member => "member",
        }
    }
}

impl fmt::Display for PolicyNodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NodeKind for PolicyNodeType {}

pub type PolicyNode = Node<PolicyNodeType>;
pub type PolicyEdge = Edge<PolicyNodeType>;
pub type PolicyGraph = Graph<PolicyNodeType>;

pub type ResourceNode = PolicyNode;
pub type ResourceTypeNode = PolicyNode;
pub type RoleNode = PolicyNode;
pub type MemberNode = PolicyNode;

/// Resource declares its asset type
pub const RESOURCE_TO_RESOURCE_TYPE: EdgeType<PolicyNodeType> =
    (PolicyNodeType::Resource, PolicyNodeType::ResourceType);
/// Parent resource contains a direct child resource
pub const RESOURCE_TO_RESOURCE: EdgeType<PolicyNodeType> =
    (PolicyNodeType::Resource, PolicyNodeType::Resource);
/// Resource declares a role binding
pub const RESOURCE_TO_ROLE: EdgeType<PolicyNodeType> =
    (PolicyNodeType::Resource, PolicyNodeType::Role);
/// Role is granted to a member
pub const ROLE_TO_MEMBER: EdgeType<PolicyNodeType> =
    (PolicyNodeType::Role, PolicyNodeType::Member);

pub const EDGE_TYPES: [EdgeType<PolicyNodeType>; 4] = [
    RESOURCE_TO_RESOURCE_TYPE,
    RESOURCE_TO_RESOURCE,
    RESOURCE_TO_ROLE,
    ROLE_TO_MEMBER,
];
