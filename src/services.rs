pub mod admin_auth;
pub mod export_service;
pub mod lead_service;
pub mod webhook;
