//! 类型定义模块

mod dialog;
mod message;

pub use dialog::{DialogInfo, DialogKind, PeerFlags};
pub use message::MessageInfo;
