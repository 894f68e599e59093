//! Core components, types, and utilities for the sehat-bot.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - Supported languages and canned response templates.
//! - System prompts and directives for LLM interactions.
//! - Common types and result handling.

pub mod config;
pub mod locale;
pub mod prompts;
pub mod types;
