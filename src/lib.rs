pub mod errors;
pub mod flatten;
pub mod ignore;
pub mod logger;
pub mod output;
pub mod tree;

pub use errors::FlattenError;
pub use flatten::Flattener;
pub use ignore::ExclusionRules;
