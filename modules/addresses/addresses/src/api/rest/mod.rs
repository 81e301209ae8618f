pub mod dto;
pub mod error;
pub mod form;
pub mod handlers;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod sse_adapter;
