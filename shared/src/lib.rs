//! Conversion core for the Brew Transfer toolkit
//!
//! Converts brewing methods, coffee bean profiles and brewing notes
//! between structured records, machine JSON (possibly fence-wrapped or
//! buried in prose) and the annotated plain-text format used to share
//! records between users and devices over any text channel.

pub mod convert;
pub mod error;
pub mod models;

pub use convert::*;
pub use error::*;
pub use models::*;
