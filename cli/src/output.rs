//! Text and JSON rendering for command results.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use serde_json::json;
use tadka_core::{
    filter_by_diet, Catalogue, DietPreference, LooseMatch, PantryMatch, SearchOutcome,
    StrictMatch, VarietyRecord, VarietySource,
};

#[derive(Debug, Serialize)]
pub struct MatchReport {
    pub key: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<usize>,
    pub diet: DietPreference,
    pub varieties: Vec<VarietyRecord>,
}

impl MatchReport {
    pub fn strict(m: &StrictMatch<'_>, diet: DietPreference) -> Self {
        Self {
            key: m.entry.key.clone(),
            kind: format!("{:?}", m.kind),
            score: Some(m.score),
            diet,
            varieties: filter_by_diet(&m.entry.varieties, diet),
        }
    }

    pub fn loose(m: &LooseMatch<'_>, diet: DietPreference) -> Self {
        Self {
            key: m.entry.key.clone(),
            kind: format!("{:?}", m.kind),
            score: None,
            diet,
            varieties: filter_by_diet(&m.entry.varieties, diet),
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_varieties(varieties: &[VarietyRecord]) {
    for variety in varieties {
        let diet = variety.diet.map(|d| d.as_str()).unwrap_or("-");
        println!("  {:<8} {}", diet, variety.name);
        if !variety.short_description.is_empty() {
            println!("           {}", variety.short_description);
        }
    }
}

pub fn print_match(report: &MatchReport, json: bool) -> Result<()> {
    if json {
        return print_json(report);
    }

    match report.score {
        Some(score) => println!("{} ({}, score {})", report.key, report.kind, score),
        None => println!("{} ({})", report.key, report.kind),
    }
    if report.varieties.is_empty() {
        println!("  no {} varieties", report.diet);
    }
    print_varieties(&report.varieties);
    Ok(())
}

pub fn print_no_match(query: &str, json: bool) -> Result<()> {
    if json {
        return print_json(&json!({ "query": query, "key": null }));
    }
    println!("No catalogue match for {:?}", query);
    Ok(())
}

pub fn print_search(outcome: &SearchOutcome, json: bool) -> Result<()> {
    if json {
        return print_json(outcome);
    }

    let source = match &outcome.source {
        VarietySource::StrictMatch { key } => format!("catalogue: {}", key),
        VarietySource::LooseMatch { key } => format!("catalogue (loose): {}", key),
        VarietySource::Generated => "generated".to_string(),
        VarietySource::GenericFallback => "generic suggestions".to_string(),
    };
    println!("{} varieties from {}", outcome.varieties.len(), source);
    print_varieties(&outcome.varieties);
    Ok(())
}

pub fn print_pantry(results: &[PantryMatch<'_>], json: bool) -> Result<()> {
    if json {
        let value: Vec<_> = results
            .iter()
            .map(|m| {
                json!({
                    "id": m.recipe.id,
                    "name": m.recipe.name,
                    "score": m.score,
                    "matched": m.matched,
                    "missing": m.missing,
                })
            })
            .collect();
        return print_json(&value);
    }

    if results.is_empty() {
        println!("No recipes match those ingredients");
        return Ok(());
    }
    for m in results {
        println!(
            "{:>4}  {} ({} matched, {} missing)",
            m.score, m.recipe.name, m.matched, m.missing
        );
    }
    Ok(())
}

pub fn print_keys(catalogue: &Catalogue, json: bool) -> Result<()> {
    if json {
        let keys: Vec<&str> = catalogue.keys().collect();
        return print_json(&keys);
    }
    for key in catalogue.keys() {
        println!("{}", key);
    }
    Ok(())
}

pub fn print_validation(path: &Path, catalogue: &Catalogue, json: bool) -> Result<()> {
    let varieties: usize = catalogue.entries().iter().map(|e| e.varieties.len()).sum();

    if json {
        return print_json(&json!({
            "path": path.display().to_string(),
            "keys": catalogue.len(),
            "varieties": varieties,
            "diet_tagged": catalogue.is_diet_tagged(),
        }));
    }

    println!(
        "{}: OK, {} keys, {} varieties, diet tags {}",
        path.display(),
        catalogue.len(),
        varieties,
        if catalogue.is_diet_tagged() {
            "present"
        } else {
            "absent"
        }
    );
    Ok(())
}
