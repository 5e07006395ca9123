//! Reasoning-engine providers.

pub mod openai;
