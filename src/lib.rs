pub mod gateway;
pub mod handlers;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;
