//! Registering interceptors from settings.
//!
//! Every pattern is validated before the registry is touched, so a
//! misconfigured interceptor fails startup without leaving a partial
//! registration behind.

use std::sync::Arc;

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::interceptor::{HandlerInterceptor, InterceptorRegistry, PathPattern};
use crate::settings::InterceptorPaths;

/// Registers `interceptor` for the configured paths.
///
/// Fails with [`ConfigError::EmptyInterceptPaths`] when there is nothing to
/// intercept and with [`ConfigError::InvalidPathPattern`] for a pattern that
/// does not compile. In both cases the registry is left unchanged.
pub fn register_interceptor(
    registry: &mut InterceptorRegistry,
    name: &str,
    interceptor: Arc<dyn HandlerInterceptor>,
    paths: &InterceptorPaths,
) -> Result<()> {
    if paths.intercept_paths.is_empty() {
        return Err(ConfigError::EmptyInterceptPaths {
            interceptor: name.to_string(),
        });
    }

    let include = compile(&paths.intercept_paths)?;
    let exclude = compile(&paths.exclude_paths)?;

    debug!(
        interceptor = name,
        include = ?paths.intercept_paths,
        exclude = ?paths.exclude_paths,
        order = ?paths.interceptor_order,
        "registering interceptor"
    );
    registry.register(name, interceptor, include, exclude, paths.interceptor_order);
    Ok(())
}

fn compile(patterns: &[String]) -> Result<Vec<PathPattern>> {
    patterns.iter().map(|p| PathPattern::new(p)).collect()
}
