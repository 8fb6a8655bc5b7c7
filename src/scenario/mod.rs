pub mod chat;
pub mod conversion;
pub mod document;
pub mod outline;
pub mod validation;

pub use chat::*;
pub use conversion::*;
pub use document::*;
pub use outline::*;
pub use validation::*;
