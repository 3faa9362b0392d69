//! Query execution seam
//!
//! Query execution is an external collaborator. The facade delegates the
//! `query` entry point to an injected engine; a repository configured
//! without one rejects queries as unsupported.

use crate::errors::Result;
use crate::model::ObjectRepr;
use crate::paging::Page;
use crate::store::Session;

/// A query engine over the repository's content
pub trait QueryEngine: Send + Sync {
    /// Execute a query statement and return a windowed result set
    fn query(
        &self,
        session: &Session,
        statement: &str,
        max_items: Option<i64>,
        skip_count: Option<i64>,
    ) -> Result<Page<ObjectRepr>>;
}
