//! Fields command - inspect the extraction catalog and a form template.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;

use kycx_core::{AcroFormFiller, Category, FieldCatalog, FieldMapper, FieldSink};

use super::process::load_config;

/// Arguments for the fields command.
#[derive(Args)]
pub struct FieldsArgs {
    /// Only list this category (e.g. "current_address")
    #[arg(long)]
    category: Option<Category>,

    /// List the fields of this form template instead
    #[arg(short, long)]
    template: Option<PathBuf>,
}

pub async fn run(args: FieldsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if let Some(template) = &args.template {
        return list_template_fields(template, &FieldMapper::from_config(&config.form));
    }

    let catalog = FieldCatalog::standard();
    let mapper = FieldMapper::from_config(&config.form);

    let categories: Vec<Category> = match args.category {
        Some(category) => vec![category],
        None => Category::ALL.to_vec(),
    };

    for category in categories {
        println!("{}", style(category).bold());
        for entry in catalog.fields(category) {
            let key = category.output_key(&entry.name);
            let target = mapper
                .target(&key)
                .map(|t| format!("-> {}", t))
                .unwrap_or_default();
            println!(
                "  {:<28} {:>2} rules  {}",
                key,
                entry.rules.len(),
                style(target).dim()
            );
        }
        println!();
    }

    println!(
        "{} {} fields, {} rules",
        style("ℹ").blue(),
        catalog.field_count(),
        catalog.rule_count()
    );

    let malformed = catalog.malformed_rules();
    if !malformed.is_empty() {
        println!();
        println!("{}", style("Malformed rules:").red());
        for (category, field, rule) in malformed {
            println!(
                "  - {}.{}: {}",
                category,
                field,
                rule.error().unwrap_or_default()
            );
        }
    }

    Ok(())
}

fn list_template_fields(template: &Path, mapper: &FieldMapper) -> anyhow::Result<()> {
    let filler = AcroFormFiller::load(&fs::read(template)?)?;
    let names = filler.field_names()?;

    let mapped: Vec<&str> = mapper.text_mappings().map(|(_, field)| field).collect();

    for name in &names {
        let marker = if mapped.contains(&name.as_str()) {
            style("✓").green()
        } else {
            style(" ").dim()
        };
        println!("{} {}", marker, name);
    }

    println!();
    println!(
        "{} {} form fields in {}",
        style("ℹ").blue(),
        names.len(),
        template.display()
    );

    Ok(())
}
