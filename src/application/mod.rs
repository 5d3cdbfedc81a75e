//! Application layer: Use cases orchestrating domain and ports.

mod builder;
mod coder;
mod resolver;
mod screening;

pub use builder::{encode_session, normalize_category, trailing_category_token, EncodedSession};
pub use coder::{code_response, CodingPolicy, ITEM_POLICIES};
pub use resolver::resolve_schema;
pub use screening::ScreeningService;
