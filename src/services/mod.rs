pub mod http;
pub mod registration;
pub mod validation;
