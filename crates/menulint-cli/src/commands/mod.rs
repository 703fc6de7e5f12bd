//! Command implementations.

pub mod compare;
pub mod config;
pub mod correct;
pub mod review;

pub use self::compare::execute_compare;
pub use self::config::execute_config;
pub use self::correct::execute_correct;
pub use self::review::execute_review;
