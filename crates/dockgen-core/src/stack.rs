//! Technology-stack classification from manifest dependencies.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use crate::manifest::Manifest;

/// The detected technology stack of a staged project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackVariant {
    NextJs,
    React,
    Vue,
    Angular,
    ExpressJs,
    Unknown,
}

impl StackVariant {
    pub const ALL: [StackVariant; 6] = [
        StackVariant::NextJs,
        StackVariant::React,
        StackVariant::Vue,
        StackVariant::Angular,
        StackVariant::ExpressJs,
        StackVariant::Unknown,
    ];

    /// Human-readable name, also used in generation prompts.
    pub fn name(self) -> &'static str {
        match self {
            StackVariant::NextJs => "Next.js",
            StackVariant::React => "React",
            StackVariant::Vue => "Vue",
            StackVariant::Angular => "Angular",
            StackVariant::ExpressJs => "Express.js",
            StackVariant::Unknown => "Unknown",
        }
    }

    /// Whether a Dockerfile can be generated for this stack.
    pub fn is_generatable(self) -> bool {
        matches!(self, StackVariant::NextJs | StackVariant::React)
    }
}

impl fmt::Display for StackVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Marker dependencies, checked in order; the first hit wins.
///
/// `next` precedes `react` because every Next.js app also depends on React.
const MARKERS: &[(&[&str], StackVariant)] = &[
    (&["next"], StackVariant::NextJs),
    (&["react"], StackVariant::React),
    (&["vue"], StackVariant::Vue),
    (&["@angular/core", "angular"], StackVariant::Angular),
    (&["express"], StackVariant::ExpressJs),
];

/// Classify a set of dependency names.
pub fn classify(dependencies: &BTreeSet<&str>) -> StackVariant {
    MARKERS
        .iter()
        .find(|(names, _)| names.iter().any(|n| dependencies.contains(n)))
        .map(|(_, variant)| *variant)
        .unwrap_or(StackVariant::Unknown)
}

/// Detect the stack of the project at `project_dir`.
///
/// A missing manifest is [`StackVariant::Unknown`]; a malformed one is an error.
pub fn detect(project_dir: &Path) -> crate::Result<StackVariant> {
    let variant = match Manifest::load(project_dir)? {
        Some(manifest) => classify(&manifest.dependency_names()),
        None => StackVariant::Unknown,
    };
    tracing::debug!(stack = %variant, "stack detected");
    Ok(variant)
}
