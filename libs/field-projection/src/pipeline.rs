use tracing::{debug, trace};

use crate::config::{ProjectionSettings, ProjectionType};
use crate::document::{ProjectionTarget, SinkDocument};
use crate::engine::ProjectionEngine;
use crate::whitelist::WhitelistSet;

/// Applies a whitelist projection to one half of a sink document.
#[derive(Debug, Clone)]
pub struct WhitelistProjector {
    target: ProjectionTarget,
    engine: ProjectionEngine,
}

impl WhitelistProjector {
    pub fn new(target: ProjectionTarget, whitelist: WhitelistSet) -> Self {
        Self {
            target,
            engine: ProjectionEngine::new(whitelist),
        }
    }

    pub fn target(&self) -> ProjectionTarget {
        self.target
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }

    /// Projects the targeted half of `doc`; a missing half is skipped.
    pub fn process(&self, doc: &mut SinkDocument) {
        match doc.half_mut(self.target) {
            Some(record) => self.engine.project(record),
            None => trace!(target_half = self.target.as_str(), "document half absent, skipping"),
        }
    }
}

/// Ordered set of projectors built from [`ProjectionSettings`].
#[derive(Debug, Clone, Default)]
pub struct ProjectionPipeline {
    projectors: Vec<WhitelistProjector>,
}

impl ProjectionPipeline {
    /// Builds the key projector, then the value projector, for each half
    /// whose projection type is `whitelist`.
    pub fn from_settings(settings: &ProjectionSettings) -> Self {
        let halves = [
            (
                ProjectionTarget::Key,
                settings.key_projection_type,
                &settings.key_projection_list,
            ),
            (
                ProjectionTarget::Value,
                settings.value_projection_type,
                &settings.value_projection_list,
            ),
        ];

        let projectors: Vec<WhitelistProjector> = halves
            .into_iter()
            .filter(|(_, kind, _)| *kind == ProjectionType::Whitelist)
            .map(|(target, _, list)| {
                let projector =
                    WhitelistProjector::new(target, WhitelistSet::from_field_list(list));
                let engine = projector.engine();
                debug!(
                    target_half = target.as_str(),
                    patterns = engine.whitelist().len(),
                    reserved_key = engine.reserved_key(),
                    "whitelist projector configured"
                );
                projector
            })
            .collect();

        Self { projectors }
    }

    pub fn projectors(&self) -> &[WhitelistProjector] {
        &self.projectors
    }

    pub fn is_empty(&self) -> bool {
        self.projectors.is_empty()
    }

    pub fn process(&self, doc: &mut SinkDocument) {
        for projector in &self.projectors {
            projector.process(doc);
        }
    }
}
