//! Orchestration services for backend registration.

mod registry;

pub use registry::{
    BackendRegistryService, BackendRegistryServiceError, BackendRegistryServiceResult,
    RegisterBackendRequest,
};
