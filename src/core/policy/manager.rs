//! Policy graph construction and permission queries
//!
//! The manager owns a [`PolicyGraph`] built once from inventory records and
//! answers queries against it:
//! - Ancestor paths and descendant resources
//! - Roles granted to a member and members holding a role
//! - Permission expansion: a role bound on a resource applies to every
//!   descendant of that resource
//!
//! The graph is never mutated after the build, so a manager can be shared
//! between threads for concurrent queries.

use super::asset::{read_records, AssetRecord};
use super::cache::AncestorCache;
use super::node_type::*;
use crate::config::PolicyConfig;
use crate::error::{PolicyError, Result};
use crate::graph::{Node, NodeId};
use crate::naming::{edge_type_label, unique_identifier_from_name};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

/// A resource a member can access, the resource's type, and the granting role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemberPermission<'g> {
    pub resource: &'g ResourceNode,
    pub resource_type: &'g ResourceTypeNode,
    pub role: &'g RoleNode,
}

impl<'g> MemberPermission<'g> {
    pub fn as_tuple(&self) -> (&'g ResourceNode, &'g ResourceTypeNode, &'g RoleNode) {
        (self.resource, self.resource_type, self.role)
    }
}

/// A member with access to a resource and the role granting it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourcePermission<'g> {
    pub member: &'g MemberNode,
    pub role: &'g RoleNode,
}

impl<'g> ResourcePermission<'g> {
    pub fn as_tuple(&self) -> (&'g MemberNode, &'g RoleNode) {
        (self.member, self.role)
    }
}

/// Node and edge counts of a policy graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    pub total_nodes: usize,
    pub total_edges: usize,
    /// Node kind -> count
    pub nodes: BTreeMap<String, usize>,
    /// Edge type label (e.g. `ResourceToRole`) -> count
    pub edges: BTreeMap<String, usize>,
}

/// Builder for [`PolicyManager`]
///
/// # Examples
///
/// ```
/// use gcp_policy_graph::{AssetRecord, PolicyManager};
///
/// let manager = PolicyManager::builder()
///     .max_traversal_depth(32)
///     .build([
///         AssetRecord::new("//x/organizations/1", "Organization")
///             .with_ancestors(["organizations/1"]),
///         AssetRecord::new("//x/folders/2", "Folder")
///             .with_ancestors(["folders/2", "organizations/1"]),
///     ]);
///
/// let folder = manager.resource_by_id("folders/2").unwrap();
/// assert_eq!(manager.resource_path(folder), ["organizations/1"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PolicyManagerBuilder {
    config: PolicyConfig,
}

impl PolicyManagerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: PolicyConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_traversal_depth(mut self, depth: usize) -> Self {
        self.config.max_traversal_depth = Some(depth);
        self
    }

    pub fn ancestor_cache_capacity(mut self, capacity: usize) -> Self {
        self.config.ancestor_cache_capacity = capacity;
        self
    }

    /// Build the graph from inventory records
    ///
    /// Never fails: missing fields have already defaulted during decoding
    /// and turn into nodes with empty ids rather than errors.
    pub fn build<I>(self, records: I) -> PolicyManager
    where
        I: IntoIterator<Item = AssetRecord>,
    {
        let mut graph = PolicyGraph::new();
        let mut record_count = 0usize;

        for record in records {
            insert_record(&mut graph, &record);
            record_count += 1;
        }

        info!(
            "Built policy graph from {} records: {} nodes, {} edges",
            record_count,
            graph.node_count(),
            graph.edge_count()
        );

        PolicyManager::from_graph(graph, self.config)
    }

    /// Build from a JSON array of records
    pub fn build_from_json(self, json: &str) -> Result<PolicyManager> {
        let records = super::asset::parse_records(json)?;
        Ok(self.build(records))
    }

    /// Build from a reader yielding a JSON array of records
    pub fn build_from_reader(self, reader: impl Read) -> Result<PolicyManager> {
        let records = read_records(reader)?;
        Ok(self.build(records))
    }

    /// Build from an inventory file
    pub fn build_from_file(self, path: impl AsRef<Path>) -> Result<PolicyManager> {
        let path = path.as_ref();
        info!("Loading asset inventory from {:?}", path);
        let file = File::open(path)?;
        self.build_from_reader(BufReader::new(file))
    }
}

/// Add one record's resource, type, parent link and bindings to the graph
fn insert_record(graph: &mut PolicyGraph, record: &AssetRecord) {
    let unique_identifier = unique_identifier_from_name(&record.name);
    if record.name.is_empty() {
        warn!("Asset record without a name, resource id will be empty");
    }
    debug!(
        "Adding resource {} of type {}",
        unique_identifier, record.asset_type
    );

    let resource = graph.get_or_add(Node::new(
        unique_identifier.as_str(),
        PolicyNodeType::Resource,
    ));
    let resource_type = graph.get_or_add(Node::new(
        record.asset_type.as_str(),
        PolicyNodeType::ResourceType,
    ));
    graph.link(resource, resource_type);

    if let Some(parent_id) = record.parent_id() {
        let parent = graph.get_or_add(Node::new(parent_id, PolicyNodeType::Resource));
        graph.link(parent, resource);
    }

    for binding in &record.iam_policy.bindings {
        let role = graph.get_or_add(Node::with_artefacts(
            binding.role.as_str(),
            PolicyNodeType::Role,
            vec![unique_identifier.clone()],
        ));
        graph.link(resource, role);

        if binding.members.is_empty() {
            warn!(
                "Role {} on {} is bound to no members",
                binding.role, unique_identifier
            );
        }

        for member in &binding.members {
            let member = graph.get_or_add(Node::new(member.as_str(), PolicyNodeType::Member));
            graph.link(role, member);
        }
    }
}

/// Query surface over a frozen policy graph
#[derive(Debug)]
pub struct PolicyManager {
    graph: PolicyGraph,
    config: PolicyConfig,
    ancestors: AncestorCache,
}

impl PolicyManager {
    pub fn builder() -> PolicyManagerBuilder {
        PolicyManagerBuilder::new()
    }

    /// Build with the default configuration
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = AssetRecord>,
    {
        Self::builder().build(records)
    }

    /// Build with the default configuration from a JSON array of records
    pub fn from_json(json: &str) -> Result<Self> {
        Self::builder().build_from_json(json)
    }

    /// Build with the default configuration from an inventory file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().build_from_file(path)
    }

    /// Wrap an already populated graph
    pub fn from_graph(graph: PolicyGraph, config: PolicyConfig) -> Self {
        let ancestors = AncestorCache::new(config.ancestor_cache_capacity);
        PolicyManager {
            graph,
            config,
            ancestors,
        }
    }

    pub fn graph(&self) -> &PolicyGraph {
        &self.graph
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    fn node_by_id_and_type(&self, id: &str, kind: PolicyNodeType) -> Result<&PolicyNode> {
        self.graph
            .get_node(&Node::new(id, kind))
            .or_else(|| self.graph.find_node(kind, id))
            .ok_or_else(|| PolicyError::NodeNotFound {
                id: id.to_string(),
                kind,
            })
    }

    pub fn resource_by_id(&self, resource_id: &str) -> Result<&ResourceNode> {
        self.node_by_id_and_type(resource_id, PolicyNodeType::Resource)
    }

    pub fn member_by_id(&self, member_id: &str) -> Result<&MemberNode> {
        self.node_by_id_and_type(member_id, PolicyNodeType::Member)
    }

    /// First parent of `node` reached through a `(kind, node.kind)` edge
    ///
    /// When several parents qualify, which one is returned depends on edge
    /// insertion order.
    pub fn one_node_parent(&self, node: &PolicyNode, kind: PolicyNodeType) -> Result<&PolicyNode> {
        self.graph
            .parents_of(node, Some((kind, node.kind())))
            .next()
            .ok_or_else(|| PolicyError::ParentNotFound {
                id: node.id().to_string(),
                kind,
            })
    }

    /// First child of `node` reached through a `(node.kind, kind)` edge
    pub fn one_node_child(&self, node: &PolicyNode, kind: PolicyNodeType) -> Result<&PolicyNode> {
        self.graph
            .children_of(node, Some((node.kind(), kind)))
            .next()
            .ok_or_else(|| PolicyError::ChildNotFound {
                id: node.id().to_string(),
                kind,
            })
    }

    pub fn one_resource_parent(&self, resource: &ResourceNode) -> Result<&ResourceNode> {
        self.one_node_parent(resource, PolicyNodeType::Resource)
    }

    /// Ancestors of `resource`, nearest first; empty for a root
    pub fn resource_parents(&self, resource: &ResourceNode) -> Vec<&ResourceNode> {
        let Some(start) = self.graph.node_id(resource) else {
            return Vec::new();
        };

        if let Some(chain) = self.ancestors.get(start) {
            return chain
                .into_iter()
                .filter_map(|id| self.graph.resolve(id))
                .collect();
        }

        let mut parents = Vec::new();
        let mut current = resource;
        while let Ok(parent) = self.one_resource_parent(current) {
            if let Some(max) = self.config.max_traversal_depth {
                if parents.len() >= max {
                    debug!("Ancestor climb from {} stopped at depth {}", resource, max);
                    break;
                }
            }
            parents.push(parent);
            current = parent;
        }

        let chain: Vec<NodeId> = parents
            .iter()
            .filter_map(|parent| self.graph.node_id(parent))
            .collect();
        self.ancestors.put(start, chain);

        parents
    }

    /// Ids of the ancestors of `resource`, nearest first
    pub fn resource_path(&self, resource: &ResourceNode) -> Vec<String> {
        self.resource_parents(resource)
            .into_iter()
            .map(|parent| parent.id().to_string())
            .collect()
    }

    /// Every descendant resource: direct children first, then the
    /// descendants of each child in turn
    pub fn child_resources(&self, resource: &ResourceNode) -> Vec<&ResourceNode> {
        self.graph
            .all_children_of(resource, Some(RESOURCE_TO_RESOURCE))
            .limit(self.config.max_traversal_depth)
            .collect()
    }

    /// Roles granted to `member`
    pub fn member_roles(&self, member: &MemberNode) -> Vec<&RoleNode> {
        self.graph
            .parents_of(member, Some(ROLE_TO_MEMBER))
            .collect()
    }

    pub fn resource_type(&self, resource: &ResourceNode) -> Result<&ResourceTypeNode> {
        self.graph
            .children_of(resource, Some(RESOURCE_TO_RESOURCE_TYPE))
            .next()
            .ok_or_else(|| PolicyError::ChildNotFound {
                id: resource.id().to_string(),
                kind: PolicyNodeType::ResourceType,
            })
    }

    /// Every resource `member` can access through its roles
    ///
    /// A role applies on the resource that declared it and on all of that
    /// resource's descendants. Fails when a granted resource has no type.
    pub fn all_members_permission(&self, member: &MemberNode) -> Result<Vec<MemberPermission<'_>>> {
        debug!("Resolving permissions of member {}", member);
        let mut permissions = Vec::new();

        for role in self.member_roles(member) {
            let declaring_id = role
                .artefacts()
                .first()
                .ok_or_else(|| PolicyError::MissingArtefact {
                    role: role.id().to_string(),
                })?;
            let resource = self.resource_by_id(declaring_id)?;

            for granted in std::iter::once(resource).chain(self.child_resources(resource)) {
                let resource_type = self.resource_type(granted)?;
                permissions.push(MemberPermission {
                    resource: granted,
                    resource_type,
                    role,
                });
            }
        }

        Ok(permissions)
    }

    /// Roles declared on `resource`
    pub fn resource_roles(&self, resource: &ResourceNode) -> Vec<&RoleNode> {
        self.graph
            .children_of(resource, Some(RESOURCE_TO_ROLE))
            .collect()
    }

    /// Members granted `role`
    pub fn role_members(&self, role: &RoleNode) -> Vec<&MemberNode> {
        self.graph
            .children_of(role, Some(ROLE_TO_MEMBER))
            .collect()
    }

    /// Every `(member, role)` pair with access to `resource`
    ///
    /// Roles declared on the resource come first, then those of each
    /// ancestor, nearest first. Duplicate pairs are kept.
    pub fn resource_member_permissions(&self, resource: &ResourceNode) -> Vec<ResourcePermission<'_>> {
        debug!("Resolving members with access to {}", resource);
        let mut permissions = Vec::new();
        let parents = self.resource_parents(resource);

        for scope in std::iter::once(resource).chain(parents) {
            for role in self.resource_roles(scope) {
                for member in self.role_members(role) {
                    permissions.push(ResourcePermission { member, role });
                }
            }
        }

        permissions
    }

    /// Node counts per kind and edge counts per edge type
    ///
    /// Every node kind and every edge type the builder produces is listed,
    /// with a zero count when the graph has none.
    pub fn summary(&self) -> GraphSummary {
        let mut summary = GraphSummary {
            total_nodes: self.graph.node_count(),
            total_edges: self.graph.edge_count(),
            ..Default::default()
        };

        for kind in PolicyNodeType::ALL {
            summary.nodes.insert(kind.to_string(), 0);
        }
        for (previous, next) in EDGE_TYPES {
            summary
                .edges
                .insert(edge_type_label(previous.as_str(), next.as_str()), 0);
        }

        for node in self.graph.nodes() {
            *summary.nodes.entry(node.kind().to_string()).or_default() += 1;
        }

        for edge in self.graph.edges() {
            let (previous, next) = edge.edge_type();
            *summary
                .edges
                .entry(edge_type_label(previous.as_str(), next.as_str()))
                .or_default() += 1;
        }

        summary
    }
}
