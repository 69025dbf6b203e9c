//! Lint rules

pub mod consistent_type_imports;
pub mod valid_rule_meta;

pub use consistent_type_imports::{
    ConsistentTypeImports, ConsistentTypeImportsConfig, ImportPreference,
};
pub use valid_rule_meta::ValidRuleMeta;
