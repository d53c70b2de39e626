pub mod autocomplete_messages;
pub mod search_messages;
pub mod shared_messages;

pub use autocomplete_messages::*;
pub use search_messages::*;
pub use shared_messages::*;
