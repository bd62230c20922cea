//! `parley models`: list the model registry.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use serde::Serialize;

use parley_types::model::ModelEntry;

use crate::state::AppState;

#[derive(Serialize)]
struct ModelListing<'a> {
    selected: &'a str,
    models: &'a [ModelEntry],
}

fn build_table(models: &[ModelEntry], selected: &str) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Id").fg(Color::White),
        Cell::new("Kind").fg(Color::White),
        Cell::new("Color").fg(Color::White),
    ]);

    for model in models {
        let marker = if model.id == selected { "●" } else { "" };
        let kind = if model.is_custom {
            Cell::new("custom").fg(Color::Yellow)
        } else {
            Cell::new("built-in").fg(Color::DarkGrey)
        };
        table.add_row(vec![
            Cell::new(marker).fg(Color::Green),
            Cell::new(format!("{} {}", model.icon, model.name)).fg(Color::Cyan),
            Cell::new(&model.id).fg(Color::White),
            kind,
            Cell::new(&model.color).fg(Color::DarkGrey),
        ]);
    }
    table
}

pub async fn list_models(state: &AppState, json: bool) -> Result<()> {
    let snapshot = state.chat_service.snapshot().await;

    if json {
        let listing = ModelListing {
            selected: &snapshot.selected_model_id,
            models: &snapshot.models,
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!();
    println!("{}", build_table(&snapshot.models, &snapshot.selected_model_id));
    println!();
    println!(
        "  {} Add models under {} in {}",
        style("i").blue().bold(),
        style("[[custom_models]]").yellow(),
        style(state.data_dir.join("config.toml").display()).dim()
    );
    println!();
    Ok(())
}
