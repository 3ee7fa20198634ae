//! Query compiler for line-oriented device-management APIs.
//!
//! A [`MenuQuery`] accumulates a projection and a postfix filter expression for one
//! menu path and compiles them into a sentence: the ordered words of one API request.
//! Terminal operations hand the sentence to a [`Transport`].
//!
//! ```ignore
//! let rows = MenuQuery::new(transport, "/interface")
//!     .select(["id", "name"])
//!     .where_(("type", "ether"))
//!     .and_where(("running", true))
//!     .get()
//!     .await?;
//! // /interface/print =.proplist=.id,name ?type=ether ?running=yes ?#&
//! ```

pub mod config;
pub mod errors;
pub mod item;
pub mod logger;
pub mod query;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use config::{CaseMode, QueryConfig};
pub use errors::{QueryError, Result};
pub use item::{FromRow, Item};
pub use query::{Criteria, MenuQuery, Sentence};
pub use transport::{MemoryTransport, StreamCallback, StreamControl, Transport};
pub use types::Row;

use std::sync::Arc;

/// Start a fresh chain on `path`, configured from the environment.
pub fn menu<T: Transport>(transport: &Arc<T>, path: &str) -> MenuQuery<T> {
    MenuQuery::with_config(Arc::clone(transport), path, QueryConfig::from_env())
}

/// Initializes the logging system.
///
/// Reads `log4rs.yaml` from the working directory; see [`logger`] for programmatic setup.
pub fn init() -> std::result::Result<(), Box<dyn std::error::Error>> {
    logger::init()?;
    Ok(())
}
