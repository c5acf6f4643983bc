pub mod canonical;
pub mod extract;
pub mod name_normalizer;
pub mod path_template;
pub mod schema_path;

pub use extract::{ExtractConfig, ExtractOutcome, ExtractRule, apply_rule, extract};
