// Service exports
pub mod matching;
pub mod postgres;
pub mod store;

pub use matching::{MatchService, ServiceError};
pub use postgres::PostgresProfileStore;
pub use store::{MemoryProfileStore, ProfileStore, StoreError};
