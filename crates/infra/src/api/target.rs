//! Addressing of datasets and files
//!
//! A resource is reached either through its database id
//! (`api/datasets/42/locks`) or through its persistent identifier
//! (`api/datasets/:persistentId/locks?persistentId=doi:...`).

use std::collections::BTreeMap;
use std::fmt;

use crate::http::QueryParams;

pub const PERSISTENT_ID_PARAM: &str = "persistentId";
pub const INVOCATION_ID_HEADER: &str = "X-Dataverse-invocationID";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceId {
    Database(u64),
    Persistent(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Database(id) => write!(f, "{id}"),
            Self::Persistent(pid) => f.write_str(pid),
        }
    }
}

/// A resource under an API base path, e.g. `api/datasets/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    base: &'static str,
    id: ResourceId,
    invocation_id: Option<String>,
}

impl Target {
    pub fn new(base: &'static str, id: ResourceId) -> Self {
        Self { base, id, invocation_id: None }
    }

    /// Workflow invocation id, sent as `X-Dataverse-invocationID` so calls made
    /// from inside a workflow step are allowed on the locked dataset.
    pub fn with_invocation_id(mut self, invocation_id: impl Into<String>) -> Self {
        self.invocation_id = Some(invocation_id.into());
        self
    }

    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Path of `endpoint` on this resource; an empty endpoint addresses the
    /// resource itself.
    pub fn path(&self, endpoint: &str) -> String {
        let resource = match &self.id {
            ResourceId::Database(id) => format!("{}{id}", self.base),
            ResourceId::Persistent(_) => format!("{}:persistentId", self.base),
        };
        let endpoint = endpoint.trim_matches('/');
        if endpoint.is_empty() {
            resource
        } else {
            format!("{resource}/{endpoint}")
        }
    }

    /// Path of `endpoint` on one version of this resource.
    pub fn versioned_path(&self, version: &str, endpoint: &str) -> String {
        let endpoint = endpoint.trim_matches('/');
        if endpoint.is_empty() {
            self.path(&format!("versions/{version}"))
        } else {
            self.path(&format!("versions/{version}/{endpoint}"))
        }
    }

    /// Query parameters identifying the resource (`persistentId` only).
    pub fn params(&self) -> QueryParams {
        match &self.id {
            ResourceId::Database(_) => QueryParams::new(),
            ResourceId::Persistent(pid) => QueryParams::new().with(PERSISTENT_ID_PARAM, pid.clone()),
        }
    }

    pub fn headers(&self) -> Vec<(String, String)> {
        self.invocation_id
            .iter()
            .map(|id| (INVOCATION_ID_HEADER.to_string(), id.clone()))
            .collect()
    }
}

/// `mdkey.<block>=<key>` parameters unlocking protected metadata blocks.
pub fn metadata_key_params(keys: &BTreeMap<String, String>) -> QueryParams {
    let mut params = QueryParams::new();
    for (block, key) in keys {
        params.add(format!("mdkey.{block}"), key.clone());
    }
    params
}
