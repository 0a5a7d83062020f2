//! scacquiz-store: persistence for the SCAC trivia engine.
//!
//! TOML carrier banks, CSV import/export, JSON score storage, and runtime
//! configuration. Implements the [`scacquiz_core::traits`] seams so the
//! engine stays free of filesystem concerns.

pub mod bank;
pub mod config;
pub mod csv;
pub mod scores;
