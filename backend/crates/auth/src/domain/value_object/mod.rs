//! Value Object Module

pub mod display_name;
pub mod email;
pub mod user_id;
pub mod user_name;
pub mod user_role;
pub mod user_status;
