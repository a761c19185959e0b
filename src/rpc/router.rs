//! Procedure tree.
//!
//! A [`Router`] maps path segments to either a nested router or a
//! [`Procedure`]. Call paths join segments with `.`, e.g.
//! `mockInterview.messages.create`. Trees are built leaf-first at startup
//! and shared read-only afterwards.

use std::collections::HashMap;

use serde::Serialize;

use super::procedure::Procedure;
use super::schema::Contract;
use crate::types::{AuthRequirement, OperationKind};

pub const PATH_SEPARATOR: char = '.';

#[derive(Debug, Clone)]
pub enum RouterNode {
    Router(Router),
    Procedure(Procedure),
}

impl From<Router> for RouterNode {
    fn from(router: Router) -> Self {
        RouterNode::Router(router)
    }
}

impl From<Procedure> for RouterNode {
    fn from(procedure: Procedure) -> Self {
        RouterNode::Procedure(procedure)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("duplicate segment '{0}' in router composition")]
    DuplicateSegment(String),
}

#[derive(Debug, Clone, Default)]
pub struct Router {
    children: HashMap<String, RouterNode>,
}

/// Introspectable description of one procedure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcedureShape {
    pub path: String,
    pub kind: OperationKind,
    pub auth: AuthRequirement,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Contract>,
}

impl Router {
    /// Compose a router from `(segment, child)` pairs; a repeated segment is rejected
    pub fn compose<I, S, N>(entries: I) -> Result<Self, RegistrationError>
    where
        I: IntoIterator<Item = (S, N)>,
        S: Into<String>,
        N: Into<RouterNode>,
    {
        let mut children = HashMap::new();
        for (segment, node) in entries {
            let segment = segment.into();
            if children.contains_key(&segment) {
                return Err(RegistrationError::DuplicateSegment(segment));
            }
            children.insert(segment, node.into());
        }
        Ok(Self { children })
    }

    pub fn builder() -> RouterBuilder {
        RouterBuilder::default()
    }

    pub fn get(&self, segment: &str) -> Option<&RouterNode> {
        self.children.get(segment)
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Walk a dotted path one segment at a time; `None` as soon as a segment is missing
    pub fn resolve(&self, path: &str) -> Option<&RouterNode> {
        let mut segments = path.split(PATH_SEPARATOR);
        let mut node = self.children.get(segments.next()?)?;
        for segment in segments {
            node = match node {
                RouterNode::Router(router) => router.children.get(segment)?,
                RouterNode::Procedure(_) => return None,
            };
        }
        Some(node)
    }

    /// Every procedure with its full path, sorted by path
    pub fn procedures(&self) -> Vec<(String, &Procedure)> {
        let mut out = Vec::new();
        self.collect("", &mut out);
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    fn collect<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a Procedure)>) {
        for (segment, node) in &self.children {
            let path = if prefix.is_empty() {
                segment.clone()
            } else {
                format!("{}{}{}", prefix, PATH_SEPARATOR, segment)
            };
            match node {
                RouterNode::Procedure(procedure) => out.push((path, procedure)),
                RouterNode::Router(router) => router.collect(&path, out),
            }
        }
    }

    pub fn shape(&self) -> Vec<ProcedureShape> {
        self.procedures()
            .into_iter()
            .map(|(path, procedure)| ProcedureShape {
                path,
                kind: procedure.kind(),
                auth: procedure.auth(),
                input: procedure.input_contract().cloned(),
            })
            .collect()
    }
}

/// Collects children for one composition step
#[derive(Default)]
pub struct RouterBuilder {
    entries: Vec<(String, RouterNode)>,
}

impl RouterBuilder {
    pub fn procedure(mut self, segment: &str, procedure: Procedure) -> Self {
        self.entries.push((segment.to_string(), procedure.into()));
        self
    }

    pub fn nest(mut self, segment: &str, router: Router) -> Self {
        self.entries.push((segment.to_string(), router.into()));
        self
    }

    pub fn build(self) -> Result<Router, RegistrationError> {
        Router::compose(self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::context::Context;
    use std::sync::Arc;

    async fn noop(_ctx: Arc<Context>, _input: ()) -> anyhow::Result<()> {
        Ok(())
    }

    fn leaf() -> Procedure {
        Procedure::public().query(noop)
    }

    fn tree() -> Router {
        let messages = Router::builder()
            .procedure("list", leaf())
            .procedure("create", Procedure::protected().mutation(noop))
            .build()
            .unwrap();
        let mock_interview = Router::builder()
            .procedure("list", leaf())
            .nest("messages", messages)
            .build()
            .unwrap();
        Router::builder()
            .nest("mockInterview", mock_interview)
            .procedure("ping", leaf())
            .build()
            .unwrap()
    }

    #[test]
    fn duplicate_segment_fails_at_registration() {
        let err = Router::builder()
            .procedure("list", leaf())
            .procedure("list", leaf())
            .build()
            .unwrap_err();
        assert_eq!(err, RegistrationError::DuplicateSegment("list".into()));
    }

    #[test]
    fn same_segment_in_different_namespaces_is_allowed() {
        let jobs = Router::builder().procedure("list", leaf()).build().unwrap();
        let result = Router::builder()
            .procedure("list", leaf())
            .nest("jobs", jobs)
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn resolves_nested_paths() {
        let router = tree();
        assert!(matches!(
            router.resolve("mockInterview.messages.create"),
            Some(RouterNode::Procedure(p)) if p.kind() == OperationKind::Mutation
        ));
        assert!(matches!(router.resolve("mockInterview.messages"), Some(RouterNode::Router(_))));
    }

    #[test]
    fn lookup_fails_fast_on_missing_segments() {
        let router = tree();
        assert!(router.resolve("mockInterview.missing.create").is_none());
        assert!(router.resolve("nope").is_none());
        assert!(router.resolve("").is_none());
        assert!(router.resolve("ping.deeper").is_none());
        assert!(router.resolve("mockInterview.").is_none());
    }

    #[test]
    fn shape_lists_every_procedure_sorted() {
        let paths: Vec<String> = tree().shape().into_iter().map(|s| s.path).collect();
        assert_eq!(
            paths,
            vec![
                "mockInterview.list",
                "mockInterview.messages.create",
                "mockInterview.messages.list",
                "ping",
            ]
        );
    }
}
