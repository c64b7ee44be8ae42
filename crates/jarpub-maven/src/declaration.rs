//! Declaration scopes: repositories and policies declared at the root or per
//! publication, with unset values falling back to the parent scope.

use std::sync::Arc;

use jarpub_core::config::ScopeConfig;
use jarpub_core::strategy::{SignType, VariantMode};
use jarpub_util::errors::PublishResult;

use crate::endpoint::{EndpointResolver, RepoEndpoint};

/// One declaration scope. Built during configuration, then only read.
#[derive(Debug, Clone, Default)]
pub struct Declaration {
    parent: Option<Arc<Declaration>>,
    repos: Vec<RepoEndpoint>,
    variant_mode: Option<VariantMode>,
    signing: Option<SignType>,
    docs: Option<bool>,
}

impl Declaration {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(parent: Arc<Declaration>) -> Self {
        Self {
            parent: Some(parent),
            ..Self::default()
        }
    }

    /// Build a scope from its configuration, resolving every repository.
    pub fn from_config(
        config: &ScopeConfig,
        parent: Option<Arc<Declaration>>,
        resolver: &EndpointResolver<'_>,
    ) -> PublishResult<Self> {
        let mut decl = Self {
            parent,
            variant_mode: config.variant_mode,
            signing: config.signing,
            docs: config.docs,
            ..Self::default()
        };
        for repo in &config.repositories {
            decl.register(resolver.resolve(repo)?);
        }
        Ok(decl)
    }

    /// Add `endpoint` unless this scope already holds the same repository,
    /// in which case the existing one is returned.
    pub fn register(&mut self, endpoint: RepoEndpoint) -> &RepoEndpoint {
        match self.repos.iter().position(|r| r.same_repository(&endpoint)) {
            Some(i) => &self.repos[i],
            None => {
                self.repos.push(endpoint);
                &self.repos[self.repos.len() - 1]
            }
        }
    }

    /// Repositories declared in this scope only.
    pub fn local_repos(&self) -> &[RepoEndpoint] {
        &self.repos
    }

    /// This scope's repositories followed by inherited ones it does not
    /// already declare.
    pub fn effective_repos(&self) -> Vec<RepoEndpoint> {
        let mut repos = self.repos.clone();
        if let Some(parent) = &self.parent {
            for inherited in parent.effective_repos() {
                if !repos.iter().any(|r| r.same_repository(&inherited)) {
                    repos.push(inherited);
                }
            }
        }
        repos
    }

    fn lookup<T: Copy>(&self, field: impl Fn(&Declaration) -> Option<T>) -> Option<T> {
        field(self).or_else(|| self.parent.as_ref().and_then(|p| p.lookup(field)))
    }

    pub fn set_variant_mode(&mut self, mode: VariantMode) {
        self.variant_mode = Some(mode);
    }

    pub fn set_signing(&mut self, signing: SignType) {
        self.signing = Some(signing);
    }

    pub fn set_docs(&mut self, docs: bool) {
        self.docs = Some(docs);
    }

    pub fn variant_mode(&self) -> VariantMode {
        self.lookup(|d| d.variant_mode).unwrap_or_default()
    }

    pub fn signing(&self) -> SignType {
        self.lookup(|d| d.signing).unwrap_or_default()
    }

    pub fn docs(&self) -> bool {
        self.lookup(|d| d.docs).unwrap_or(true)
    }
}
