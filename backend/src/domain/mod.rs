//! # Domain Module
//!
//! Contains all business logic for the sticker card application.
//!
//! ## Module Organization
//!
//! - **models**: profiles, stamps and judge decisions
//! - **judge**: the behavior judge boundary and its fallback policy
//! - **reward_card_service**: the session of reward cards and every operation on it
//! - **commands**: internal command/result types used by the service
//! - **errors**: reasons an operation left the cards unchanged
//!
//! ## Core Concepts
//!
//! - **Profile**: one child's reward card (name, progress, history)
//! - **Stamp**: one recorded reward with behavior text, praise and emoji
//! - **Quick stamp**: a stamp awarded without judging, using fixed text
//! - **Active profile**: the single card currently shown and operated on
//!
//! "Card complete" is never stored; it is derived from the stamp counts.

pub mod commands;
pub mod errors;
pub mod judge;
pub mod models;
pub mod reward_card_service;

pub use commands::*;
pub use errors::RewardCardError;
pub use judge::{decision_or_fallback, BehaviorJudge};
pub use reward_card_service::{RewardCardService, DEFAULT_CELEBRATION_DELAY};
