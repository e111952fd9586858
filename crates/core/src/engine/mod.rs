mod builder;
mod query;
mod resolver;

pub use builder::TreeBuilder;
pub use query::{OutlineQuery, QueryError};
pub use resolver::{decode_accents, strip_comments, AuxResolver, ResolveError};
