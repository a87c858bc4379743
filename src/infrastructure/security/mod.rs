pub mod keyring;
pub mod token_store;

pub use self::keyring::KeyringTokenStore;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
