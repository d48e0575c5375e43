pub mod speaker_resolver;
pub mod stage1_conversation;
pub mod stage2_keywords;
pub mod stage3_render;

pub use speaker_resolver::*;
pub use stage1_conversation::*;
pub use stage2_keywords::*;
pub use stage3_render::*;
