//! Expansion of a template directory into an output tree.
//!
//! Every entry name of the template tree is interpolated against the current
//! stack. Each resulting name becomes one output entry: directories are
//! created and expanded recursively with the stack that produced their name,
//! files are rendered with it.

use log::{debug, info};
use std::path::{Component, Path, PathBuf};

use crate::constants::{DIR_MODE, FILE_MODE};
use crate::error::{Error, Result};
use crate::fs::FileSystem;
use crate::interpolate::interpolate;
use crate::renderer::BodyRenderer;
use crate::stack::Stack;

/// Guards against runaway output. `None` means unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Deepest template directory level that may be entered, the template
    /// root being level 0.
    pub max_depth: Option<usize>,
    /// Largest number of outputs a single entry name may expand to.
    pub max_fan_out: Option<usize>,
}

/// Expands template trees through a filesystem and a body renderer.
pub struct Expander<'a> {
    fs: &'a dyn FileSystem,
    renderer: &'a dyn BodyRenderer,
    options: ExpandOptions,
}

impl<'a> Expander<'a> {
    pub fn new(fs: &'a dyn FileSystem, renderer: &'a dyn BodyRenderer) -> Self {
        Self { fs, renderer, options: ExpandOptions::default() }
    }

    pub fn with_options(mut self, options: ExpandOptions) -> Self {
        self.options = options;
        self
    }

    /// Expands the entries of `template_dir` into `output_dir`.
    ///
    /// Entries are processed in name order. The first filesystem or render
    /// error stops the expansion; files already written are left in place.
    pub fn expand(&self, template_dir: &Path, output_dir: &Path, stack: &Stack) -> Result<()> {
        self.expand_dir(template_dir, output_dir, stack, 0)
    }

    fn expand_dir(&self, template_dir: &Path, output_dir: &Path, stack: &Stack, depth: usize) -> Result<()> {
        if let Some(max_depth) = self.options.max_depth {
            if depth > max_depth {
                return Err(Error::DepthLimitError { path: template_dir.to_path_buf(), max_depth });
            }
        }

        let mut entries = self.fs.read_dir(template_dir)?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        for entry in entries {
            let outputs = interpolate(&entry.name, stack);
            if let Some(max_fan_out) = self.options.max_fan_out {
                if outputs.len() > max_fan_out {
                    return Err(Error::FanOutLimitError {
                        name: entry.name,
                        count: outputs.len(),
                        max_fan_out,
                    });
                }
            }

            let source = template_dir.join(&entry.name);
            for output in outputs {
                let name = confined(&output.text);
                if name.as_os_str().is_empty() {
                    debug!("Skipping '{}' as its name expands to nothing", source.display());
                    continue;
                }
                if name.as_os_str() != output.text.as_str() {
                    debug!("Keeping '{}' under the output directory as '{}'", output.text, name.display());
                }

                let target = output_dir.join(&name);
                info!("generating {} from {}", target.display(), source.display());

                // a resolved name may hold separators
                if name.components().count() > 1 {
                    if let Some(parent) = target.parent() {
                        self.fs.create_dir_all(parent, DIR_MODE)?;
                    }
                }

                if entry.is_dir {
                    self.fs.create_dir_all(&target, DIR_MODE)?;
                    self.expand_dir(&source, &target, &output.stack, depth + 1)?;
                } else {
                    self.expand_file(&source, &target, &output.stack)?;
                }
            }
        }

        Ok(())
    }

    fn expand_file(&self, source: &Path, target: &Path, stack: &Stack) -> Result<()> {
        let contents = self.fs.read(source)?;

        let rendered = match String::from_utf8(contents) {
            Ok(body) => self.renderer.render(&source.to_string_lossy(), &body, stack)?.into_bytes(),
            Err(raw) => {
                debug!("Copying '{}' verbatim, it is not UTF-8 text", source.display());
                raw.into_bytes()
            }
        };

        self.fs.write(target, &rendered, FILE_MODE)
    }
}

/// Relative form of a resolved name: root, prefix, `.` and `..` components
/// are dropped so the output never leaves the output directory.
fn confined(name: &str) -> PathBuf {
    Path::new(name)
        .components()
        .filter(|component| matches!(component, Component::Normal(_)))
        .collect()
}
