pub mod message;
pub mod render;
pub mod sync;
pub mod transcript;

pub use message::{Message, MessageBody, MessageKey};
pub use render::{render_message, RenderBlock};
pub use sync::{ChatSync, SyncOptions};
pub use transcript::Transcript;
