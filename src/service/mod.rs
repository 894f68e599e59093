//! Service integrations for external APIs and clients.
//!
//! This module contains implementations for various services used by the bot:
//! - Database services (e.g., SurrealDB)
//! - LLM services (e.g., OpenAI)
//! - Speech synthesis services (e.g., OpenAI TTS)
//! - The HTTP API server
//!
//! Each service module defines both generic traits and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod db;
pub mod llm;
pub mod speech;
pub mod web;
