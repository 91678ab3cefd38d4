//! Text and JSON rendering for command output.

use anyhow::Result;
use client_core::FormController;
use serde_json::json;
use shared::protocol::{DisclosureResponse, HealthStatus, HistoryItem};

pub fn print_outcome(controller: &FormController, as_json: bool) -> Result<()> {
    let Some(result) = controller.result() else {
        return Ok(());
    };

    if as_json {
        let out = json!({
            "result": result,
            "history": controller.history(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_result(result);
    println!();
    print_history(controller.history(), false)
}

fn print_result(result: &DisclosureResponse) {
    println!("{}", result.disclosure_text);

    if !result.improvement_suggestions.is_empty() {
        println!();
        println!("Suggestions for improvement:");
        for suggestion in &result.improvement_suggestions {
            println!("  - {suggestion}");
        }
    }

    if result.has_usage() {
        println!();
        println!(
            "model={} prompt_tokens={} completion_tokens={} total_tokens={}",
            result.model.as_deref().unwrap_or("-"),
            fmt_count(result.prompt_tokens),
            fmt_count(result.completion_tokens),
            fmt_count(result.total_tokens),
        );
    }
}

fn fmt_count(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |n| n.to_string())
}

pub fn print_history(items: &[HistoryItem], as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("No disclosures generated yet.");
        return Ok(());
    }

    println!("{:<5} {:<24} {:<6} {:<18} CREATED", "ID", "COMPANY", "YEAR", "FRAMEWORKS");
    for item in items {
        let frameworks = item
            .frameworks
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let created = item
            .created_at_utc()
            .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| item.created_at.clone());
        println!(
            "{:<5} {:<24} {:<6} {:<18} {}",
            item.id.0, item.company_name, item.year, frameworks, created
        );
        println!("      {}", item.disclosure_preview);
    }
    Ok(())
}

pub fn print_health(health: &HealthStatus, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(health)?);
    } else {
        println!(
            "status={} openai_key_configured={}",
            health.status, health.has_openai_key
        );
    }
    Ok(())
}
