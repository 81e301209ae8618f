pub mod error;
pub mod events;
pub mod local_client;
pub mod ports;
pub mod repos;
pub mod service;
pub mod validation;
