//! Domain types for kbadmin.
//!
//! Pure data types with no infrastructure dependencies. Repositories and
//! clients translate to and from these at their boundaries.

mod index;
mod template;

pub use index::{
    join_roles, DocIndex, IndexDocument, IndexOverview, NewDocIndex, NewIndexDocument, SyncStatus,
    UploadFile, SIGNED_URL_TTL_SECS,
};
pub use template::{NewSearchTemplate, SearchTemplate};
