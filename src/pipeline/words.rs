//! extract-ability-words / extract-flavor-words：从卡牌行首标题提取能力词与风味词

use mtgmech_engine::{AbilityWordExtractor, FlavorWordExtractor, WordKind, WordOccurrence};
use serde_json::Value;
use tracing::info;

use super::{Pass, PassReport, Pipeline};
use crate::config::Artifact;
use crate::error::MechResult;
use crate::source::{ArtifactWriter, SourceLoader};

impl Pipeline {
    pub(crate) fn extract_ability_words(&self) -> MechResult<PassReport> {
        let cards = SourceLoader::load_cards(&self.path(Artifact::BulkCards))?;
        let catalog = SourceLoader::load_keyword_catalog(&self.path(Artifact::KeywordCatalog))?;

        let extraction = AbilityWordExtractor::new(&catalog.ability_words).extract(&cards);
        info!(
            "Ability words | {} occurrences | {} headers outside the vocabulary",
            extraction.accepted.len(),
            extraction.stats.not_in_vocabulary
        );

        let flat = self.path(Artifact::AbilityWords);
        let sorted = self.path(Artifact::AbilityWordsSorted);
        ArtifactWriter::write_json(&flat, &records(&extraction.accepted, WordKind::AbilityWord))?;
        ArtifactWriter::write_json(&sorted, &records(&sorted_by_word(&extraction.accepted), WordKind::AbilityWord))?;

        Ok(PassReport::new(Pass::ExtractAbilityWords, extraction.accepted.len())
            .output(flat)
            .output(sorted))
    }

    pub(crate) fn extract_flavor_words(&self) -> MechResult<PassReport> {
        let cards = SourceLoader::load_cards(&self.path(Artifact::BulkCards))?;
        let catalog = SourceLoader::load_keyword_catalog(&self.path(Artifact::KeywordCatalog))?;

        let extractor = FlavorWordExtractor::new(catalog.mechanic_words(&self.config.extra_mechanic_words));
        let extraction = extractor.extract(&cards);
        info!(
            "Flavor words | {} accepted | {} rejected | {} minigame cards skipped",
            extraction.accepted.len(),
            extraction.rejected.len(),
            extraction.stats.skipped_minigame
        );
        for (reason, count) in &extraction.stats.rejected {
            info!("  rejected [{}]: {}", reason, count);
        }

        let clean = self.path(Artifact::FlavorWords);
        let sorted = self.path(Artifact::FlavorWordsSorted);
        let rejected = self.path(Artifact::FlavorWordsRejected);
        ArtifactWriter::write_json(&clean, &records(&extraction.accepted, WordKind::FlavorWord))?;
        ArtifactWriter::write_json(&sorted, &records(&sorted_by_word(&extraction.accepted), WordKind::FlavorWord))?;
        ArtifactWriter::write_json(&rejected, &extraction.rejected)?;

        Ok(PassReport::new(Pass::ExtractFlavorWords, extraction.accepted.len())
            .output(clean)
            .output(sorted)
            .output(rejected))
    }
}

fn records(occurrences: &[WordOccurrence], kind: WordKind) -> Vec<Value> {
    occurrences.iter().map(|o| o.to_record(kind)).collect()
}

/// 按（词条，卡名）忽略大小写排序的副本，便于人工查阅
fn sorted_by_word(occurrences: &[WordOccurrence]) -> Vec<WordOccurrence> {
    let mut sorted = occurrences.to_vec();
    sorted.sort_by_cached_key(|o| (o.word.to_lowercase(), o.card_name.to_lowercase()));
    sorted
}
