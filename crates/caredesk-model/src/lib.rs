//! Data shapes shared by the caredesk renderer and its callers.
//!
//! The HTTP service layer is treated as an opaque source of [`ListPage`]s:
//! ordered [`Record`]s plus optional [`PageInfo`].

pub mod error;
pub mod page;
pub mod record;

pub use error::{ModelError, Result};
pub use page::{ListPage, PageInfo};
pub use record::{DEFAULT_ID_FIELD, Record, RecordId};
