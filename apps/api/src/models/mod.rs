pub mod generation;
pub mod session;
pub mod use_case;
