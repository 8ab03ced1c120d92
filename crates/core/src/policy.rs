//! Per-resource configuration and the role-based access gate.
//!
//! Each exposed entity is described by a [`ResourceConfig`]: its JSON-LD
//! type name, collection path, unique/foreign-key constraints that map onto
//! client-facing violations, and which roles may perform each operation.
//! [`decide`] is evaluated before any business logic runs.

use crate::roles::{ALL_ROLES, MANAGER_ROLES};
use crate::validation::{
    CATEGORY_DUPLICATE_NAME, FEDERAL_STATE_DUPLICATE_NAME, NOT_FOUND, PROPOSAL_DUPLICATE_PROBLEM,
};

/// Every entity exposed over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Category,
    FederalState,
    Council,
    Project,
    Problem,
    Proposal,
    UsedProblem,
    User,
}

/// Operations a resource may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ReadCollection,
    ReadItem,
    Create,
    Update,
    Delete,
}

/// Who may perform an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No credentials required.
    Public,
    /// An authenticated principal holding one of these roles.
    Roles(&'static [&'static str]),
    /// No route is registered for this operation.
    Unsupported,
}

/// Outcome of the access gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// Credentials are required but none were presented.
    Unauthenticated,
    /// The principal's role is not allowed.
    Forbidden,
    /// The operation is not available for this resource.
    Unsupported,
}

/// Access rules for the five operations of one resource.
#[derive(Debug, Clone, Copy)]
pub struct AccessTable {
    pub read_collection: Access,
    pub read_item: Access,
    pub create: Access,
    pub update: Access,
    pub delete: Access,
}

impl AccessTable {
    pub fn get(&self, op: Operation) -> Access {
        match op {
            Operation::ReadCollection => self.read_collection,
            Operation::ReadItem => self.read_item,
            Operation::Create => self.create,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
        }
    }
}

/// A database constraint surfaced to clients as a property violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintRule {
    /// Postgres constraint name.
    pub constraint: &'static str,
    pub property_path: &'static str,
    pub rule: &'static str,
}

/// Static description of one exposed entity.
#[derive(Debug, Clone, Copy)]
pub struct ResourceConfig {
    pub kind: ResourceKind,
    /// JSON-LD `@type`.
    pub short_name: &'static str,
    /// Collection path; item IRIs are `{collection_path}/{id}`.
    pub collection_path: &'static str,
    /// Unique and foreign-key constraints with their client-facing rules.
    pub constraints: &'static [ConstraintRule],
    pub access: AccessTable,
}

const CURATED: AccessTable = AccessTable {
    read_collection: Access::Public,
    read_item: Access::Public,
    create: Access::Roles(MANAGER_ROLES),
    update: Access::Roles(MANAGER_ROLES),
    delete: Access::Roles(MANAGER_ROLES),
};

const PROJECT_CONTENT: AccessTable = AccessTable {
    read_collection: Access::Unsupported,
    read_item: Access::Roles(ALL_ROLES),
    create: Access::Roles(ALL_ROLES),
    update: Access::Roles(MANAGER_ROLES),
    delete: Access::Roles(MANAGER_ROLES),
};

const CATEGORY: ResourceConfig = ResourceConfig {
    kind: ResourceKind::Category,
    short_name: "Category",
    collection_path: "/categories",
    constraints: &[ConstraintRule {
        constraint: "uq_categories_name",
        property_path: "name",
        rule: CATEGORY_DUPLICATE_NAME,
    }],
    access: CURATED,
};

const FEDERAL_STATE: ResourceConfig = ResourceConfig {
    kind: ResourceKind::FederalState,
    short_name: "FederalState",
    collection_path: "/federal_states",
    constraints: &[ConstraintRule {
        constraint: "uq_federal_states_name",
        property_path: "name",
        rule: FEDERAL_STATE_DUPLICATE_NAME,
    }],
    access: CURATED,
};

const COUNCIL: ResourceConfig = ResourceConfig {
    kind: ResourceKind::Council,
    short_name: "Council",
    collection_path: "/councils",
    constraints: &[ConstraintRule {
        constraint: "fk_councils_federal_state",
        property_path: "federalState",
        rule: NOT_FOUND,
    }],
    access: CURATED,
};

const PROJECT: ResourceConfig = ResourceConfig {
    kind: ResourceKind::Project,
    short_name: "Project",
    collection_path: "/projects",
    constraints: &[],
    access: AccessTable {
        read_collection: Access::Public,
        read_item: Access::Public,
        create: Access::Roles(ALL_ROLES),
        update: Access::Roles(MANAGER_ROLES),
        delete: Access::Roles(MANAGER_ROLES),
    },
};

const PROBLEM: ResourceConfig = ResourceConfig {
    kind: ResourceKind::Problem,
    short_name: "Problem",
    collection_path: "/problems",
    constraints: &[ConstraintRule {
        constraint: "fk_problems_project",
        property_path: "project",
        rule: NOT_FOUND,
    }],
    access: PROJECT_CONTENT,
};

const PROPOSAL: ResourceConfig = ResourceConfig {
    kind: ResourceKind::Proposal,
    short_name: "Proposal",
    collection_path: "/proposals",
    constraints: &[ConstraintRule {
        constraint: "fk_proposals_project",
        property_path: "project",
        rule: NOT_FOUND,
    }],
    access: PROJECT_CONTENT,
};

const USED_PROBLEM: ResourceConfig = ResourceConfig {
    kind: ResourceKind::UsedProblem,
    short_name: "UsedProblem",
    collection_path: "/used_problems",
    constraints: &[
        ConstraintRule {
            constraint: "uq_used_problems_problem_proposal",
            property_path: "problem",
            rule: PROPOSAL_DUPLICATE_PROBLEM,
        },
        ConstraintRule {
            constraint: "fk_used_problems_problem",
            property_path: "problem",
            rule: NOT_FOUND,
        },
        ConstraintRule {
            constraint: "fk_used_problems_proposal",
            property_path: "proposal",
            rule: NOT_FOUND,
        },
    ],
    access: AccessTable {
        update: Access::Unsupported,
        ..PROJECT_CONTENT
    },
};

const USER: ResourceConfig = ResourceConfig {
    kind: ResourceKind::User,
    short_name: "User",
    collection_path: "/users",
    constraints: &[],
    access: AccessTable {
        read_collection: Access::Unsupported,
        read_item: Access::Roles(ALL_ROLES),
        create: Access::Unsupported,
        update: Access::Unsupported,
        delete: Access::Unsupported,
    },
};

/// All resource configurations, in routing order.
pub const RESOURCES: &[ResourceConfig] = &[
    CATEGORY,
    FEDERAL_STATE,
    COUNCIL,
    PROJECT,
    PROBLEM,
    PROPOSAL,
    USED_PROBLEM,
    USER,
];

impl ResourceKind {
    pub fn config(self) -> &'static ResourceConfig {
        match self {
            ResourceKind::Category => &CATEGORY,
            ResourceKind::FederalState => &FEDERAL_STATE,
            ResourceKind::Council => &COUNCIL,
            ResourceKind::Project => &PROJECT,
            ResourceKind::Problem => &PROBLEM,
            ResourceKind::Proposal => &PROPOSAL,
            ResourceKind::UsedProblem => &USED_PROBLEM,
            ResourceKind::User => &USER,
        }
    }

    pub fn short_name(self) -> &'static str {
        self.config().short_name
    }

    pub fn collection_path(self) -> &'static str {
        self.config().collection_path
    }

    /// `@context` IRI for this resource.
    pub fn context(self) -> String {
        format!("/contexts/{}", self.short_name())
    }
}

/// Look up the violation a database constraint maps to, across all resources.
pub fn constraint_rule(constraint: &str) -> Option<&'static ConstraintRule> {
    RESOURCES
        .iter()
        .flat_map(|c| c.constraints.iter())
        .find(|r| r.constraint == constraint)
}

/// Evaluate the access gate for `(role, operation, resource)`.
///
/// `role` is `None` for anonymous requests.
pub fn decide(resource: ResourceKind, op: Operation, role: Option<&str>) -> Decision {
    match resource.config().access.get(op) {
        Access::Unsupported => Decision::Unsupported,
        Access::Public => Decision::Allow,
        Access::Roles(allowed) => match role {
            None => Decision::Unauthenticated,
            Some(role) if allowed.iter().any(|r| *r == role) => Decision::Allow,
            Some(_) => Decision::Forbidden,
        },
    }
}
