//! Shared fixtures for dispatch integration tests.

use std::sync::Arc;

use camino::Utf8PathBuf;
use eyre::{Result, eyre};
use mockable::DefaultClock;
use switchyard::analysis::{
    domain::{AnalyzedInput, InputKind},
    services::InputAnalyzer,
};
use switchyard::backend::domain::{BackendDescriptor, BackendKind};
use switchyard::dispatch::{
    adapters::{ReqwestHttpTransport, TokioProcessTransport},
    domain::DispatchConfig,
    services::Junction,
};
use tempfile::TempDir;

/// Junction wired to the production transports.
pub type RealJunction = Junction<ReqwestHttpTransport, TokioProcessTransport, DefaultClock>;

/// Creates a junction with the given configuration.
pub fn junction(config: DispatchConfig) -> RealJunction {
    Junction::new(
        Arc::new(ReqwestHttpTransport::new()),
        Arc::new(TokioProcessTransport::new()),
        Arc::new(DefaultClock),
        config,
    )
}

/// Analyzes `text` as typed input.
pub fn analyzed(text: &str) -> AnalyzedInput {
    InputAnalyzer::new().analyze(text, InputKind::Text)
}

/// Creates a descriptor for `kind`.
pub fn backend(name: &str, kind: BackendKind) -> BackendDescriptor {
    BackendDescriptor::new(name, "integration test backend", kind, &DefaultClock)
        .expect("descriptor should be valid")
}

/// Writes a script into `dir` and returns its UTF-8 path.
pub fn write_script(dir: &TempDir, name: &str, body: &str) -> Result<String> {
    let path = Utf8PathBuf::from_path_buf(dir.path().join(name))
        .map_err(|path| eyre!("non UTF-8 temp path: {}", path.display()))?;
    std::fs::write(&path, body)?;
    Ok(path.into_string())
}
