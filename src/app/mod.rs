pub mod dashboard;
pub mod directory_service;
pub mod gateway;
pub mod search;
pub mod search_log;
pub mod upload;
pub mod wiring;
