pub mod chat;
pub mod sidebar;

pub use chat::{chat_panel, ChatAction};
pub use sidebar::{sidebar_panel, SidebarAction};
