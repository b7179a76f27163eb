//! Wire model for the resources exposed by the Dataverse API

pub mod dataset;
pub mod dataverse;
pub mod file;
pub mod license;
pub mod lock;
pub mod metadata;
pub mod role;
pub mod search;
pub mod user;

pub use dataset::*;
pub use dataverse::*;
pub use file::*;
pub use license::*;
pub use lock::*;
pub use metadata::*;
pub use role::*;
pub use search::*;
pub use user::*;
