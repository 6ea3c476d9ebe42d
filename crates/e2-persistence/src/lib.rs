//! Durable state for the E2 preset controller.
//!
//! A small key/value store with composite keys. Values are opaque strings
//! produced by caller-supplied codecs.
//!
//! # Features
//!
//! - **Composite keys** canonicalized as `component/component/...`
//! - **Atomic batches** so multi-key updates land together or not at all
//! - **Durable writes**: every commit is fsynced before it returns
//!
//! # Example
//!
//! ```ignore
//! use e2_persistence::{RawCodec, StateKey, StateStore};
//!
//! let mut store = StateStore::open(Path::new("state.json"))?;
//! store.set(&StateKey::new("active"), &"4".to_string(), &RawCodec)?;
//! store.close()?;
//! ```

mod backend;
mod codec;
mod error;
mod file;
mod io;
mod key;
mod store;
mod types;

pub use backend::{MemoryBackend, StateBackend, StateWrite};
pub use codec::{RawCodec, StateCodec};
pub use error::{PersistenceError, Result};
pub use file::JsonFileBackend;
pub use io::{load_state_file, save_state_file};
pub use key::{KEY_SEPARATOR, StateKey};
pub use store::{StateBatch, StateStore};
pub use types::{CURRENT_SCHEMA_VERSION, FORMAT_MARKER, StateFile};
