//! Session state: the persisted credential and its storage.

mod clock;
mod storage;
mod token;

pub use clock::{Clock, ManualClock, SystemClock};
pub use storage::{CredentialStorage, FileStorage, MemoryStorage, StorageError};
pub use token::{Credential, TOKEN_KEY, TOKEN_TTL, TokenStore};
