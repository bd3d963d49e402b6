// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CourseAtlas-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Course Atlas and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Course Atlas CLI entrypoint.
//!
//! `normalize` runs the offline pipeline over a raw catalog; `graph` and `search` answer
//! interactive requests against a normalized document.
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `warn`).

use std::error::Error;

use course_atlas::model::CatalogDocument;
use course_atlas::query::DEFAULT_SEARCH_LIMIT;
use course_atlas::store::read_raw_catalog;
use course_atlas::{
    course_graph, export_mermaid, normalize_catalog, search_courses, synthesize_graph,
    CatalogFile, GraphError, LayoutConfig, PipelineConfig, SearchMode, WriteDurability,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} normalize <input> <output> [--no-dedup] [--expand-compound-codes] [--durable-writes]\n  {program} graph <document> <code> [--mermaid]\n  {program} search <document> <query> [--regex | --fuzzy] [--limit <n>]\n  {program} schema\n\nnormalize reads a raw catalog (an array of course records or an object with a `courses`\narray) and writes the normalized {{courses, reversePrereqs}} document.\n--no-dedup keeps duplicate (id, code) records; --expand-compound-codes also indexes each\ncode of a comma-joined entry such as \"CS102, CS103\".\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported).\n\ngraph prints the positioned prerequisite graph of one course as JSON, or as a Mermaid\nflowchart with --mermaid.\n\nsearch matches `CODE: Title` labels (substring by default; at most {DEFAULT_SEARCH_LIMIT} results\nunless --limit is given)."
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NormalizeOptions {
    input: String,
    output: String,
    deduplicate: bool,
    expand_compound_codes: bool,
    durable_writes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GraphOptions {
    document: String,
    code: String,
    mermaid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SearchOptions {
    document: String,
    query: String,
    mode: SearchMode,
    limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Normalize(NormalizeOptions),
    Graph(GraphOptions),
    Search(SearchOptions),
    Schema,
}

fn set_flag(flag: &mut bool) -> Result<(), ()> {
    if *flag {
        return Err(());
    }
    *flag = true;
    Ok(())
}

fn two_positionals(positionals: Vec<String>) -> Result<(String, String), ()> {
    let [first, second]: [String; 2] = positionals.try_into().map_err(|_| ())?;
    Ok((first, second))
}

fn parse_command(mut args: impl Iterator<Item = String>) -> Result<Command, ()> {
    let subcommand = args.next().ok_or(())?;
    let mut positionals = Vec::<String>::new();

    match subcommand.as_str() {
        "normalize" => {
            let mut no_dedup = false;
            let mut expand_compound_codes = false;
            let mut durable_writes = false;
            for arg in args {
                match arg.as_str() {
                    "--no-dedup" => set_flag(&mut no_dedup)?,
                    "--expand-compound-codes" => set_flag(&mut expand_compound_codes)?,
                    "--durable-writes" => set_flag(&mut durable_writes)?,
                    _ if arg.starts_with('-') => return Err(()),
                    _ => positionals.push(arg),
                }
            }
            let (input, output) = two_positionals(positionals)?;
            Ok(Command::Normalize(NormalizeOptions {
                input,
                output,
                deduplicate: !no_dedup,
                expand_compound_codes,
                durable_writes,
            }))
        }
        "graph" => {
            let mut mermaid = false;
            for arg in args {
                match arg.as_str() {
                    "--mermaid" => set_flag(&mut mermaid)?,
                    _ if arg.starts_with('-') => return Err(()),
                    _ => positionals.push(arg),
                }
            }
            let (document, code) = two_positionals(positionals)?;
            Ok(Command::Graph(GraphOptions { document, code, mermaid }))
        }
        "search" => {
            let mut mode = None::<SearchMode>;
            let mut limit = None::<usize>;
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--regex" | "--fuzzy" => {
                        if mode.is_some() {
                            return Err(());
                        }
                        mode = Some(match arg.as_str() {
                            "--regex" => SearchMode::Regex,
                            _ => SearchMode::Fuzzy,
                        });
                    }
                    "--limit" => {
                        if limit.is_some() {
                            return Err(());
                        }
                        let raw = args.next().ok_or(())?;
                        limit = Some(raw.parse().map_err(|_| ())?);
                    }
                    _ if arg.starts_with('-') => return Err(()),
                    _ => positionals.push(arg),
                }
            }
            let (document, query) = two_positionals(positionals)?;
            Ok(Command::Search(SearchOptions {
                document,
                query,
                mode: mode.unwrap_or_default(),
                limit: limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
            }))
        }
        "schema" => match args.next() {
            None => Ok(Command::Schema),
            Some(_) => Err(()),
        },
        _ => Err(()),
    }
}

fn load(path: &str) -> Result<CatalogDocument, Box<dyn Error>> {
    Ok(CatalogFile::new(path).load_document()?)
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Normalize(options) => {
            let raw = read_raw_catalog(&options.input)?;
            let config = PipelineConfig::default()
                .with_deduplicate(options.deduplicate)
                .with_expand_compound_codes(options.expand_compound_codes);
            let normalized = normalize_catalog(&raw, &config)?;

            let durability = if options.durable_writes {
                WriteDurability::Durable
            } else {
                WriteDurability::BestEffort
            };
            CatalogFile::new(&options.output)
                .with_durability(durability)
                .save_document(normalized.document())?;

            let report = normalized.report();
            println!(
                "wrote {} courses ({} duplicates removed, {} skipped, {} with prerequisites, \
                 {} indexed codes) to {}",
                normalized.document().courses().len(),
                report.removed_duplicates,
                report.skipped_records,
                report.courses_with_prereqs,
                report.indexed_codes,
                options.output
            );
        }
        Command::Graph(options) => {
            let document = load(&options.document)?;
            if options.mermaid {
                let course = document
                    .find_course(&options.code)
                    .ok_or_else(|| GraphError::UnknownCourse { code: options.code.clone() })?;
                let graph = synthesize_graph(course, &document).map_err(GraphError::from)?;
                print!("{}", export_mermaid(&graph)?);
            } else {
                let graph = course_graph(&options.code, &document, &LayoutConfig::default())?;
                println!("{}", serde_json::to_string_pretty(&graph)?);
            }
        }
        Command::Search(options) => {
            let document = load(&options.document)?;
            let hits = search_courses(&document, &options.query, options.mode, options.limit)?;
            for course in hits {
                println!("{}", course.display_label());
            }
        }
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&course_atlas::catalog_schema())?);
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "course-atlas".to_owned());

    let command = match parse_command(args) {
        Ok(command) => command,
        Err(()) => {
            print_usage(&program);
            std::process::exit(2);
        }
    };

    if let Err(err) = run(command) {
        eprintln!("course-atlas: {err}");
        std::process::exit(1);
    }
}
