//! Client library adapters.

mod grammers;

pub use grammers::{interactive_login, session_path, GrammersConnector};
