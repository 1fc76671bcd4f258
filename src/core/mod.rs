//! Report checks, the pass policy and the validator that ties them together

pub mod checks;
pub mod extractor;
pub mod history;
pub mod policy;
pub mod validator;
pub mod verdict;
