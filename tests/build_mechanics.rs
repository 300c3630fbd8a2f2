//! 端到端流程测试：在临时目录中准备输入，执行批处理流程并检查产物

use std::fs;
use std::path::Path;

use mtgmech::{Artifact, MechError, Pass, Pipeline, PipelineConfig};
use serde_json::{json, Value};
use tempfile::TempDir;

fn write(path: &Path, value: &Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

fn read(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn pipeline(dir: &TempDir) -> Pipeline {
    Pipeline::new(
        PipelineConfig::builder()
            .raw_dir(dir.path().join("raw"))
            .static_dir(dir.path().join("static"))
            .build(),
    )
}

/// build-mechanics 所需的全部输入，除卡牌与关键字能力外均为空
fn seed_build_inputs(pipeline: &Pipeline, cards: Value, keyword_abilities: Value) {
    let config = pipeline.config();
    write(&config.path(Artifact::DedupedCards), &cards);
    write(&config.path(Artifact::KeywordAbilityRules), &keyword_abilities);
    write(&config.path(Artifact::KeywordActionRules), &json!([]));
    write(&config.path(Artifact::GlossaryTerms), &json!([]));
    write(&config.path(Artifact::AbilityWords), &json!([]));
    write(&config.path(Artifact::FlavorWords), &json!([]));
    write(&config.path(Artifact::PatchTable), &json!({}));
}

#[test]
fn fog_giant_end_to_end() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(&dir);
    seed_build_inputs(
        &pipeline,
        json!([{"name": "Fog Giant", "oracle_text": "Flying\nWhen Fog Giant enters, draw a card."}]),
        json!([{"code": "702.9", "name": "Flying", "subsections": [
            {"id": "702.9a", "text": "A creature with flying can't be blocked except by creatures with flying or reach."}
        ]}]),
    );

    let report = pipeline.run(Pass::BuildMechanics).unwrap();
    assert_eq!(report.records, 1);

    let output = read(&pipeline.config().path(Artifact::Mechanics));
    assert_eq!(
        output,
        json!([{
            "name": "Flying",
            "type": "Keyword Ability",
            "rule_code": "702.9",
            "definition": "A creature with flying can't be blocked except by creatures with flying or reach.",
            "oracle_phrase_match": "flying",
            "card_count": 1,
            "cards": ["Fog Giant"]
        }])
    );
}

#[test]
fn priority_gate_and_patch_fallback() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(&dir);
    let config = pipeline.config().clone();
    seed_build_inputs(
        &pipeline,
        json!([
            {"name": "Fog Giant", "oracle_text": "Flying"},
            {"name": "Optimus Prime, Hero // Optimus Prime, Autobot Leader", "oracle_text": "",
             "card_faces": [
                {"name": "Optimus Prime, Hero", "oracle_text": "At the beginning of each end step, convert Optimus Prime."},
                {"name": "Optimus Prime, Autobot Leader", "oracle_text": "Living metal"}
             ]}
        ]),
        json!([
            {"code": "702.9", "name": "Flying", "subsections": [{"id": "702.9a", "text": "Flying is an evasion ability."}]},
            {"code": "702.162", "name": "More Than Meets the Eye"}
        ]),
    );
    write(
        &config.path(Artifact::GlossaryTerms),
        &json!([
            {"term": "Flying", "definition(s)": "A keyword ability that restricts how a creature may be blocked, described at length in rule 702.9."},
            {"term": "Active Player", "definition(s)": "The player whose turn it is."}
        ]),
    );
    write(
        &config.path(Artifact::PatchTable),
        &json!({"More Than Meets the Eye": [{"name": "Optimus Prime, Hero"}, {"name": "Optimus Prime, Hero"}]}),
    );

    pipeline.run(Pass::BuildMechanics).unwrap();
    let output = read(&config.path(Artifact::Mechanics));
    let records = output.as_array().unwrap();

    let names: Vec<&str> = records.iter().map(|m| m["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Flying", "More Than Meets the Eye"]);

    assert_eq!(records[0]["type"], "Keyword Ability");
    assert_eq!(records[0]["definition"], "Flying is an evasion ability.");

    let mtmte = &records[1];
    assert_eq!(mtmte["card_count"], 1);
    assert_eq!(mtmte["cards"], json!(["Optimus Prime, Hero"]));
    assert_eq!(
        mtmte["definition"],
        "More Than Meets the Eye is a keyword ability in Magic: The Gathering."
    );
}

#[test]
fn missing_input_aborts_without_output() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(&dir);
    seed_build_inputs(&pipeline, json!([]), json!([]));
    fs::remove_file(pipeline.config().path(Artifact::GlossaryTerms)).unwrap();

    let err = pipeline.run(Pass::BuildMechanics).unwrap_err();
    assert!(matches!(err, MechError::MissingInput { .. }));
    assert!(!pipeline.config().path(Artifact::Mechanics).exists());
}

const COMP_RULES: &str = "\
701. Keyword Actions
701.1. Most actions described in a card's rules text use the standard English definitions.
701.22. Scry
701.22a To \"scry N\" means to look at the top N cards of your library.

702. Keyword Abilities
702.1. Most abilities describe exactly what they do in the card's rules text.
702.9. Flying
702.9a Flying is an evasion ability.

Glossary
Active Player
The player whose turn it is.

Draw
To move a card from the top of a library to a hand.

Flying
A keyword ability that restricts how a creature may be blocked.

Credits
";

#[test]
fn local_passes_chain() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(&dir);
    let config = pipeline.config().clone();

    let fog_giant = json!({
        "object": "card", "name": "Fog Giant", "oracle_text": "Flying\nWhen Fog Giant enters, draw a card.",
        "mana_cost": "{4}{U}", "type_line": "Creature — Giant", "layout": "normal",
        "illustration_id": "art-1", "set_type": "core", "prices": {"usd": "0.05"}
    });
    write(
        &config.path(Artifact::BulkCards),
        &json!([
            fog_giant.clone(),
            fog_giant,
            {"name": "Lotus Cobra", "oracle_text": "Landfall — Whenever a land you control enters, add one mana of any color.",
             "layout": "normal", "set_type": "expansion"},
            {"name": "Sarevok, Deathbringer", "oracle_text": "Bhaalspawn — At the beginning of your end step, draw a card.",
             "layout": "normal", "set_type": "expansion"},
            {"name": "Goblin Token Art", "layout": "art_series"}
        ]),
    );
    write(
        &config.path(Artifact::KeywordCatalog),
        &json!({"meta": {}, "data": {"abilityWords": ["Landfall"], "keywordAbilities": ["Flying"], "keywordActions": ["Scry"]}}),
    );
    let rules_path = config.path(Artifact::CompRulesText);
    fs::create_dir_all(rules_path.parent().unwrap()).unwrap();
    fs::write(&rules_path, COMP_RULES).unwrap();
    assert!(!config.path(Artifact::PatchTable).exists());

    let trimmed = pipeline.run(Pass::TrimCards).unwrap();
    assert_eq!(trimmed.records, 4);
    let deduped = pipeline.run(Pass::DedupeCards).unwrap();
    assert_eq!(deduped.records, 3);
    assert_eq!(pipeline.run(Pass::ExtractRules).unwrap().records, 2);
    assert_eq!(pipeline.run(Pass::ExtractGlossary).unwrap().records, 3);
    assert_eq!(pipeline.run(Pass::ExtractAbilityWords).unwrap().records, 1);

    let flavor = pipeline.run(Pass::ExtractFlavorWords).unwrap();
    assert_eq!(flavor.records, 1);
    assert_eq!(flavor.outputs.len(), 3);
    let rejected = read(&config.path(Artifact::FlavorWordsRejected));
    assert_eq!(rejected[0]["flavor_word"], "Landfall");
    assert_eq!(rejected[0]["reject_reason"], "Mechanic word");
    let accepted = read(&config.path(Artifact::FlavorWords));
    assert_eq!(accepted[0]["flavor_word"], "Bhaalspawn");

    pipeline.run(Pass::BuildMechanics).unwrap();
    let output = read(&config.path(Artifact::Mechanics));
    let records = output.as_array().unwrap();
    let summary: Vec<(&str, &str, u64)> = records
        .iter()
        .map(|m| {
            (
                m["name"].as_str().unwrap(),
                m["type"].as_str().unwrap(),
                m["card_count"].as_u64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Flying", "Keyword Ability", 1),
            ("Scry", "Keyword Action", 0),
            ("Landfall", "Ability Word", 1),
            ("Bhaalspawn", "Flavor Word", 1),
            ("Draw", "Glossary Term", 2),
        ]
    );
    assert_eq!(records[4]["cards"], json!(["Fog Giant", "Sarevok, Deathbringer"]));
}
