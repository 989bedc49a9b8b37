//! Per-view state containers.
//!
//! Each view owns its state and changes it only when a gateway call completes
//! or the log stream reports an event. A failed call records a user-facing
//! message in the view's `error` and leaves everything already loaded as it
//! was.

pub(crate) mod logs;
pub(crate) mod profile;
pub(crate) mod submit;
pub(crate) mod timeline;

use footprint_client::GatewayError;
use thiserror::Error;

pub(crate) use logs::LogsView;
pub(crate) use profile::ProfileView;
pub(crate) use submit::SubmitView;
pub(crate) use timeline::{TimelineSource, TimelineView};

#[derive(Debug, Error)]
pub(crate) enum ViewError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("{0}")]
    InvalidInput(String),
}

impl ViewError {
    pub(crate) fn user_message(&self) -> String {
        match self {
            Self::Gateway(e) => e.user_message(),
            Self::InvalidInput(msg) => msg.clone(),
        }
    }
}
