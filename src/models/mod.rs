pub mod speaker;
pub mod stt;
pub mod transcript;

pub use speaker::*;
pub use stt::*;
pub use transcript::*;
