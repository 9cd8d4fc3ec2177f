//! Studio engine: provider IO, bounded polling and result materialization.
mod client;
mod materialize;
mod poll;
mod session;
mod types;

pub use client::{ProviderClient, ProviderSettings, ReqwestProviderClient};
pub use materialize::Materializer;
pub use poll::{PollScheduler, PollSettings};
pub use session::{StudioSession, SubmitOutcome};
pub use types::{DownloadError, ProviderError, ProviderFailure};
