use log::info;

use crate::enhance::{Enhancer, enhance_files};
use crate::error::GenerateError;
use crate::ir::ParsedSpec;
use crate::{CodeGenerator, GeneratedFile};

/// An enhancer plus the file extensions it should see.
#[derive(Clone, Copy)]
pub struct EnhanceStep<'a> {
    pub enhancer: &'a dyn Enhancer,
    pub extensions: &'a [String],
}

/// Outcome of one [`generate`] run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub files: Vec<GeneratedFile>,
    /// Files rewritten by the enhancer.
    pub enhanced: usize,
    pub endpoints: usize,
    pub schemas: usize,
}

/// Run `generator` over `spec`, then the optional enhancement step.
///
/// Enhancement never fails the run; see [`enhance_files`].
pub fn generate<G: CodeGenerator>(
    spec: &ParsedSpec,
    generator: &G,
    config: &G::Config,
    enhance: Option<EnhanceStep<'_>>,
) -> Result<GenerationReport, GenerateError> {
    let mut files = generator
        .generate(spec, config)
        .map_err(|e| GenerateError::Generator {
            generator: std::any::type_name::<G>().to_string(),
            message: e.to_string(),
        })?;

    let enhanced = match enhance {
        Some(step) => {
            info!("enhancing with {}", step.enhancer.name());
            enhance_files(&mut files, step.enhancer, step.extensions)
        }
        None => 0,
    };

    info!(
        "generated {} files ({} enhanced) for {}",
        files.len(),
        enhanced,
        spec.title()
    );

    Ok(GenerationReport {
        files,
        enhanced,
        endpoints: spec.endpoints.len(),
        schemas: spec.schemas.len(),
    })
}
