//! Optional post-generation rewriting of emitted files.

use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

use log::{debug, warn};

use crate::GeneratedFile;
use crate::error::EnhanceError;

/// What an enhancer knows about the file it is rewriting.
#[derive(Debug, Clone, Copy)]
pub struct EnhanceContext<'a> {
    pub path: &'a str,
    /// File extension without the dot, e.g. `py`.
    pub file_type: &'a str,
}

/// Rewrites generated text. `Ok(None)` means "leave the file as is".
pub trait Enhancer {
    fn name(&self) -> &str;

    fn enhance(
        &self,
        text: &str,
        ctx: &EnhanceContext<'_>,
    ) -> Result<Option<String>, EnhanceError>;
}

/// Pipes text through an external program and takes its stdout.
///
/// The program also sees `SPINEAPI_FILE` and `SPINEAPI_FILE_TYPE` in its
/// environment.
#[derive(Debug, Clone)]
pub struct CommandEnhancer {
    program: String,
    args: Vec<String>,
}

impl CommandEnhancer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from an argv list such as `enhance.command` in the config.
    pub fn from_argv(argv: &[String]) -> Result<Self, EnhanceError> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| EnhanceError::Config("command must not be empty".to_string()))?;
        Ok(Self::new(program.clone(), args.to_vec()))
    }
}

impl Enhancer for CommandEnhancer {
    fn name(&self) -> &str {
        &self.program
    }

    fn enhance(
        &self,
        text: &str,
        ctx: &EnhanceContext<'_>,
    ) -> Result<Option<String>, EnhanceError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env("SPINEAPI_FILE", ctx.path)
            .env("SPINEAPI_FILE_TYPE", ctx.file_type)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| EnhanceError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| EnhanceError::Config("child stdin unavailable".to_string()))?;

        // Feed stdin from a second thread so a chatty child can't fill its
        // stdout pipe while we are still writing.
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(text.as_bytes()));
            let output = child.wait_with_output();
            (writer.join(), output)
        });
        let output = output?;
        if let Ok(Err(e)) = written {
            // Programs that ignore stdin close it early.
            if e.kind() != io::ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }

        if !output.status.success() {
            return Err(EnhanceError::Exit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let enhanced = String::from_utf8(output.stdout)?;
        if enhanced.trim().is_empty() || enhanced == text {
            Ok(None)
        } else {
            Ok(Some(enhanced))
        }
    }
}

/// Run `enhancer` over every file whose extension is in `extensions`.
///
/// Best-effort: failures are logged and the file keeps its original
/// content. Returns how many files were changed.
pub fn enhance_files(
    files: &mut [GeneratedFile],
    enhancer: &dyn Enhancer,
    extensions: &[String],
) -> usize {
    let mut changed = 0;
    for file in files.iter_mut() {
        let Some(file_type) = Path::new(&file.path)
            .extension()
            .and_then(|ext| ext.to_str())
        else {
            continue;
        };
        if !extensions
            .iter()
            .any(|ext| ext.trim_start_matches('.') == file_type)
        {
            continue;
        }

        let ctx = EnhanceContext {
            path: &file.path,
            file_type,
        };
        match enhancer.enhance(&file.content, &ctx) {
            Ok(Some(enhanced)) => {
                debug!("{} enhanced {}", enhancer.name(), file.path);
                file.content = enhanced;
                changed += 1;
            }
            Ok(None) => debug!("{} left {} unchanged", enhancer.name(), file.path),
            Err(e) => warn!("failed to enhance {}: {e}", file.path),
        }
    }
    changed
}
