pub mod gateway;
pub mod repositories;
