//! Orgchart Core Types and Definitions
//!
//! This crate provides the foundational types shared by the organizational
//! chart library and its command-line front end. It includes:
//!
//! - **Records**: The flat input model ([`record::PositionRecord`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Visual definitions for chart elements ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod record;
