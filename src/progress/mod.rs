//! Progress is organized through [store::ProgressStore].
//! The basic idea is:
//!  - There is a single record, [entities::LocalProgress], describing the person using the app.
//!  - Every check-in awards points, points decide the level and levels are grouped into tiers.
//!  - Check-ins are limited to one per part of the day. Slots are cleared when the day changes.
//!  - The record is written to disk as a whole after every change.

pub mod entities;
pub mod store;
pub mod tier;
