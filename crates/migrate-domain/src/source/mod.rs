//! Trello board snapshot model.
//!
//! These types mirror the JSON the Trello REST API returns (camelCase field
//! names) and are treated as read-only for the duration of a migration.

pub mod action;
pub mod board;
pub mod card;

pub use action::{Action, ActionData, Member, COMMENT_CARD};
pub use board::{Board, List};
pub use card::{Attachment, Badges, Card, CheckItem, Checklist, Cover, Label, ScaledImage};
