//! Subcommand implementations.

use anyhow::{Context, bail};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{CellAlignment, Table};
use std::sync::Arc;

use v11n_cli::rules::FileRuleSource;
use v11n_map::{MappingService, NoRules, RuleSource};
use v11n_model::{Passage, Versification, parse_range};
use v11n_systems::SchemeCatalog;

use crate::cli::{ConvertArgs, SchemeArgs};

pub fn run_convert(args: &ConvertArgs) -> anyhow::Result<String> {
    let catalog = SchemeCatalog::new();
    let from = lookup_scheme(&catalog, &args.from)?;
    let to = lookup_scheme(&catalog, &args.to)?;

    let source: Box<dyn RuleSource> = match &args.mappings {
        Some(dir) => Box::new(FileRuleSource::new(dir.clone())),
        None => Box::new(NoRules),
    };
    let service = MappingService::new(catalog.pivot(), source);

    let range = parse_range(&from, &args.reference)
        .with_context(|| format!("cannot parse {:?} in scheme {}", args.reference, from.name()))?;
    let mut passage = Passage::new();
    passage.add_range(&from, &range);

    let result = service.map_passage(&passage, &from, &to);
    if result.is_empty() {
        bail!(
            "{} has no equivalent in scheme {}",
            args.reference,
            to.name()
        );
    }
    Ok(result.render(&to))
}

pub fn run_describe(args: &SchemeArgs) -> anyhow::Result<String> {
    let catalog = SchemeCatalog::new();
    let v11n = lookup_scheme(&catalog, &args.scheme)?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Book", "Chapters", "Verses"]);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    for book in v11n.books().iter().filter(|book| !book.is_intro()) {
        let chapters = v11n.last_chapter(book);
        let verses: u32 = (1..=chapters).map(|chapter| v11n.last_verse(book, chapter)).sum();
        table.add_row(vec![
            book.osis().to_string(),
            chapters.to_string(),
            verses.to_string(),
        ]);
    }

    Ok(format!(
        "Scheme: {}\nAddressable verses (with introductions): {}\n{table}",
        v11n.name(),
        v11n.verse_count(None),
    ))
}

pub fn run_books(args: &SchemeArgs) -> anyhow::Result<String> {
    let catalog = SchemeCatalog::new();
    let v11n = lookup_scheme(&catalog, &args.scheme)?;

    let mut out = String::new();
    for book in v11n.books().iter().filter(|book| !book.is_intro()) {
        out.push_str(book.osis());
        out.push('\n');
    }
    Ok(out.trim_end().to_string())
}

fn lookup_scheme(catalog: &SchemeCatalog, name: &str) -> anyhow::Result<Arc<Versification>> {
    catalog.get(name).with_context(|| {
        format!(
            "unknown scheme {:?}; available: {}",
            name,
            catalog.names().join(", ")
        )
    })
}
