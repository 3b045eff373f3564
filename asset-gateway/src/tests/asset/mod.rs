pub mod naming;
pub mod resolver;
