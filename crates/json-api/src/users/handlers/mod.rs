//! User Handlers

pub(crate) mod activate;
pub(crate) mod me;
pub(crate) mod register;
pub(crate) mod reset_password;
