//! Hubbly onboarding: the profile-creation wizard behind the matchmaking app.

pub mod auth;
pub mod config;
pub mod error;
pub mod media;
pub mod service;
pub mod store;
pub mod wizard;
