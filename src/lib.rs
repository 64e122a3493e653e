//! Front end for the behavioral fingerprinting service.
//!
//! Each user action runs one flow: raw form text is validated into a request
//! ([`collect`]), sent to the analysis backend ([`dispatch`]), and the decoded
//! response is turned into a banner or pie chart ([`render`]). [`state`] holds
//! the page's single error surface and result surface; [`flows`] ties the
//! steps together and guards each flow against re-entry.

pub mod browser;
pub mod collect;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod flows;
pub mod logging;
pub mod models;
pub mod render;
pub mod state;

pub use error::{RemoteError, ValidationError};
pub use state::Flow;
