//! build-mechanics：合并全部来源，去重后写出机制数据集

use std::collections::BTreeMap;

use mtgmech_engine::{
    Deduplicator, MatchOverrides, Mechanic, MechanicBuilder, MechanicSources, MechanicType, OracleIndex,
};
use tracing::{debug, info};

use super::{Pass, PassReport, Pipeline};
use crate::config::Artifact;
use crate::error::MechResult;
use crate::source::{ArtifactWriter, SourceLoader};

impl Pipeline {
    pub(crate) fn build_mechanics(&self) -> MechResult<PassReport> {
        let cards = SourceLoader::load_cards(&self.path(Artifact::DedupedCards))?;
        let keyword_abilities = SourceLoader::load_rule_entries(&self.path(Artifact::KeywordAbilityRules))?;
        let keyword_actions = SourceLoader::load_rule_entries(&self.path(Artifact::KeywordActionRules))?;
        let glossary = SourceLoader::load_glossary(&self.path(Artifact::GlossaryTerms))?;
        let ability_words = SourceLoader::load_word_occurrences(&self.path(Artifact::AbilityWords))?;
        let flavor_words = SourceLoader::load_word_occurrences(&self.path(Artifact::FlavorWords))?;
        let patch = SourceLoader::load_patch_table(&self.path(Artifact::PatchTable))?;
        let overrides = SourceLoader::load_match_overrides(
            &self.path(Artifact::MatchOverrides),
            MatchOverrides::builtin().with_patch_table(patch),
        )?;

        let index = OracleIndex::build(&cards);
        info!("Indexed {} oracle texts from {} cards", index.len(), cards.len());

        let sources = MechanicSources {
            keyword_abilities: &keyword_abilities,
            keyword_actions: &keyword_actions,
            ability_words: &ability_words,
            flavor_words: &flavor_words,
            glossary: &glossary,
        };
        let candidates = MechanicBuilder::new(&index, overrides)
            .sample_size(self.config.sample_size)?
            .build_all(sources)?;
        debug!("Built {} candidate mechanics", candidates.len());

        let outcome = Deduplicator::dedupe(candidates);
        log_type_counts(&outcome.mechanics);
        info!(
            "Deduplicated mechanics | kept {} | replaced {} | discarded {}",
            outcome.mechanics.len(),
            outcome.replaced,
            outcome.discarded
        );

        let output = self.path(Artifact::Mechanics);
        ArtifactWriter::write_json(&output, &outcome.mechanics)?;
        Ok(PassReport::new(Pass::BuildMechanics, outcome.mechanics.len()).output(output))
    }
}

fn log_type_counts(mechanics: &[Mechanic]) {
    let mut counts: BTreeMap<MechanicType, (usize, usize)> = BTreeMap::new();
    for mechanic in mechanics {
        let entry = counts.entry(mechanic.mechanic_type).or_default();
        entry.0 += 1;
        if mechanic.card_count == 0 {
            entry.1 += 1;
        }
    }
    for (mechanic_type, (total, unmatched)) in counts {
        info!("  {}: {} ({} without cards)", mechanic_type, total, unmatched);
    }
}
