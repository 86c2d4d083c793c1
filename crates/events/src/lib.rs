//! Transient user notifications for the rickdex browsing views.
//!
//! Controllers publish [`Notice`]s on a [`NoticeBus`] instead of drawing
//! anything themselves; the presentation layer subscribes and decides
//! how to show and dismiss them.

pub mod bus;

pub use bus::{Notice, NoticeBus, NoticeLevel};
