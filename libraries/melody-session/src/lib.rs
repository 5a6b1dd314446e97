//! Melody Player - User Session
//!
//! Keeps the logged-in user and their token, persisted in a shared
//! [`KeyValueStore`](melody_core::KeyValueStore). Credentials are never
//! verified here: whoever calls [`UserSession::login`] is logged in.
//!
//! ```rust
//! use melody_core::{MemoryStore, SessionProvider, User};
//! use melody_session::UserSession;
//! use std::rc::Rc;
//!
//! let session = UserSession::load(Rc::new(MemoryStore::new()));
//! assert!(!session.is_authenticated());
//!
//! session.login(User::new("ana"), "token-123").unwrap();
//! assert!(session.is_authenticated());
//! ```

mod error;
mod session;

pub use error::{Result, SessionError};
pub use session::UserSession;
