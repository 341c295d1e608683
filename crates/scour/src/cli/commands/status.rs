//! Implementation of `scour status`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use scour_config::{ConfigWarning, discover_config_files};
use scour_index::IndexRegistry;

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows configuration files, the index root, indexes, and validation warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);
    if config_files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("scour init")
        );
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Config files:"));
    for path in &config_files {
        println!("   {}", path.display());
    }
    println!();

    let config = &ctx.config;
    println!("{}", subheader("Database:"));
    println!(
        "   {} {}",
        config.settings.database,
        dim(&format!("(default index {})", config.default_index_name()))
    );
    println!();

    match ctx.registry() {
        Ok(registry) => print_indexes(&registry),
        Err(code) => return code,
    }

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints the index root and a table of the indexes under it.
fn print_indexes(registry: &IndexRegistry) {
    println!(
        "{} {}",
        subheader("Indexes:"),
        dim(&format!("({})", registry.root().display()))
    );

    match registry.list() {
        Ok(indexes) if indexes.is_empty() => {
            println!("   {}", dim("(none, run 'scour index' to add documents)"));
        }
        Ok(indexes) => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL_CONDENSED);
            table.set_header(vec!["Name", "Documents"]);
            for info in &indexes {
                table.add_row(vec![
                    Cell::new(&info.name),
                    Cell::new(info.num_docs.to_string()),
                ]);
            }
            println!("{table}");
        }
        Err(e) => println!("   {}", warning(&format!("could not list indexes: {e}"))),
    }
    println!();
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w {
            ConfigWarning::TemplateMissingDatabase { .. } => {
                println!(
                    "{}",
                    dim("Hint: include {database} in index.name_template")
                );
            }
            ConfigWarning::IndexRootNotDirectory { .. } => {
                println!("{}", dim("Hint: point index.root at a directory"));
            }
            _ => {}
        }
    }
}
