//! Studio core: pure request/result model and single-session job state.
mod normalize;
mod request;
mod result;
mod store;

pub use normalize::{normalize, RawResponse};
pub use request::{
    ErasePayload, GeneratePayload, GenerationRequest, GenerativeFillPayload, LifestyleImagePayload,
    LifestyleTextPayload, Operation, OperationKind, PackshotPayload, Placement, ShadowPayload,
    ShadowStyle,
};
pub use result::GenerationResult;
pub use store::{Job, JobStore, JobView};
