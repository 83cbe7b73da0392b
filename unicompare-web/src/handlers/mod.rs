//! HTTP request handlers organized by functionality

pub mod admin;
pub mod catalog;
pub mod compare;
pub mod predict;

// Re-export handler functions
pub use admin::{
    LoginRequest, admin_delete, admin_login, admin_logout, admin_seed, admin_upsert,
    admin_upsert_form,
};
pub use catalog::{get_program, get_university, list_universities, store_status};
pub use compare::{compare_toggle, compare_view};
pub use predict::predict_admission;
