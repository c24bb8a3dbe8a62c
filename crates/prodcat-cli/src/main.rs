// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use prodcat_app::{AppState, CategoryId, JoinedProduct, Selection, SortColumn, UserId};
use prodcat_catalog::Catalog;
use prodcat_tui::{EMPTY_RESULT_MESSAGE, UiOptions};
use runtime::{CatalogRuntime, CatalogSource};
use std::env;
use std::fmt::Write as _;
use std::path::PathBuf;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `prodcat --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let log_path = config.log_path()?;
    logging::init_file_logging(&log_path, config.log_level())?;

    let source = if options.demo {
        CatalogSource::Demo
    } else {
        CatalogSource::from_dir(config.catalog_dir())
    };
    tracing::info!(
        config = %options.config_path.display(),
        source = %source.describe(),
        "starting prodcat"
    );

    if options.check_only {
        let catalog = source.load()?;
        println!(
            "ok: {} users, {} categories, {} products from {}",
            catalog.users().len(),
            catalog.categories().len(),
            catalog.products().len(),
            source.describe()
        );
        return Ok(());
    }

    if let Some(steps) = &options.list {
        let catalog = source.load()?;
        let selection = replay_steps(steps);
        print!("{}", format_listing(&catalog, &selection));
        return Ok(());
    }

    let mut state = AppState::default();
    let mut runtime = CatalogRuntime::new(source);
    prodcat_tui::run_app(
        &mut state,
        &mut runtime,
        UiOptions {
            status_timeout: config.status_timeout()?,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SelectionStep {
    User(Option<UserId>),
    Query(String),
    ToggleCategory(CategoryId),
    CycleSort(SortColumn),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
    list: Option<Vec<SelectionStep>>,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        demo: false,
        print_example: false,
        check_only: false,
        show_help: false,
        list: None,
    };
    let mut list_mode = false;
    let mut steps = Vec::new();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--list" => {
                list_mode = true;
            }
            "--user" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--user requires a user id (0 for all users)"))?;
                let raw = parse_id("--user", value.as_ref())?;
                steps.push(SelectionStep::User(UserId::from_raw_filter(raw)));
            }
            "--query" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--query requires search text"))?;
                steps.push(SelectionStep::Query(value.as_ref().to_owned()));
            }
            "--category" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--category requires a category id"))?;
                let raw = parse_id("--category", value.as_ref())?;
                steps.push(SelectionStep::ToggleCategory(CategoryId::new(raw)));
            }
            "--sort" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--sort requires a column key"))?;
                let column = SortColumn::parse(value.as_ref()).ok_or_else(|| {
                    anyhow!(
                        "unknown sort key {:?}; use one of: id, product, category, user",
                        value.as_ref()
                    )
                })?;
                steps.push(SelectionStep::CycleSort(column));
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    if list_mode {
        options.list = Some(steps);
    } else if !steps.is_empty() {
        bail!("--user, --query, --category, and --sort only apply together with --list");
    }

    Ok(options)
}

fn parse_id(flag: &str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .with_context(|| format!("{flag} expects an integer id, got {raw:?}"))
}

fn replay_steps(steps: &[SelectionStep]) -> Selection {
    steps
        .iter()
        .fold(Selection::default(), |selection, step| match step {
            SelectionStep::User(user) => selection.select_user(*user),
            SelectionStep::Query(text) => selection.set_query(text.as_str()),
            SelectionStep::ToggleCategory(category) => selection.toggle_category(*category),
            SelectionStep::CycleSort(column) => selection.cycle_sort(*column),
        })
}

fn format_listing(catalog: &Catalog, selection: &Selection) -> String {
    let visible = catalog.visible(selection);
    if visible.is_empty() {
        return format!("{EMPTY_RESULT_MESSAGE}\n");
    }

    let header = SortColumn::ALL.map(|column| {
        format!(
            "{} {}",
            column.label(),
            selection.sort.indicator(column).glyph()
        )
    });
    let rows = visible
        .iter()
        .map(|product| listing_cells(product))
        .collect::<Vec<_>>();

    let mut widths = header.each_ref().map(|cell| cell.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for line in std::iter::once(&header).chain(&rows) {
        let mut text = String::new();
        for (index, (cell, width)) in line.iter().zip(widths).enumerate() {
            if index > 0 {
                text.push_str("  ");
            }
            let _ = write!(text, "{cell:<width$}");
        }
        out.push_str(text.trim_end());
        out.push('\n');
    }
    out
}

fn listing_cells(product: &JoinedProduct) -> [String; 4] {
    [
        product.id().to_string(),
        product.name().to_owned(),
        product.category.label(),
        product.user.name.clone(),
    ]
}

fn print_help() {
    println!("prodcat");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --demo                   Use the built-in demo catalog");
    println!("  --check                  Validate config + catalog, then exit");
    println!("  --list                   Print the product table instead of the UI");
    println!("    --user <id>            Show one owner's products (0 for all)");
    println!("    --query <text>         Case-insensitive product name search");
    println!("    --category <id>        Toggle a category filter (repeatable)");
    println!("    --sort <key>           Click a column header: id, product, category, user");
    println!("  --help                   Show this help");
}
