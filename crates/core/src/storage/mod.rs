mod error;
mod traits;
mod types;

pub use error::{DecodeError, EncodeError, RepositoryError, Result, StoreError, TimeRangeError};
pub use traits::{HashRepository, MatchRepository};
pub use types::TimeRange;
