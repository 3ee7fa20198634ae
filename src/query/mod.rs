// Submodules for separation of concerns
mod builder;
mod exec;
mod filter;
mod select;
mod stream;
mod token;
mod types;

// Public API re-exports
pub use builder::{MenuQuery, normalize_path};
pub use filter::FilterStack;
pub use select::{escape_field, is_reserved};
pub use token::{Comparison, Condition, Marker, Operator, Sentence, Token};
pub use types::{Criteria, IntoFields, IntoParam};
