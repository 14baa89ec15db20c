//! Service container for dependency injection
//!
//! Wires up services with their dependencies.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::application::services::BenchmarkService;
use crate::config::Settings;
use crate::infrastructure::traits::{FileWordSource, WordSource};
use crate::infrastructure::{InfraError, InfraResult};

/// Container holding application settings and building services from them.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,
}

impl ServiceContainer {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }

    /// Word source backed by a file, checked for existence up front.
    pub fn word_source(&self, path: &Path) -> InfraResult<Arc<dyn WordSource>> {
        let metadata = fs::metadata(path)
            .map_err(|e| InfraError::io(format!("open word list {}", path.display()), e))?;
        if !metadata.is_file() {
            return Err(InfraError::io(
                format!("open word list {}", path.display()),
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            ));
        }
        Ok(Arc::new(FileWordSource::new(path)))
    }

    /// Benchmark service over `source`, configured from the bench settings.
    pub fn benchmark_service(&self, source: Arc<dyn WordSource>) -> BenchmarkService {
        BenchmarkService::new(source, self.settings.bench.clone())
    }
}
