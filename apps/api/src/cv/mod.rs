pub mod assemble;
pub mod handlers;
pub mod store;
pub mod validation;
