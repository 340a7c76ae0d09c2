//! javalint - A fast Java linter with xpath-based violation suppression.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use javalint_checkstyle::{
    CheckstyleConfig, JavalintConfig, MergedConfig, Module, SuppressionEntry, Suppressions,
    render_xpath_suppressions,
};
use javalint_java_cst::CstNode;
use javalint_java_parser::JavaParser;
use javalint_linter::{
    CheckContext, PlainTextCommentFilterConfig, Properties, Rule, RuleRegistry,
    SuppressionContext, run_rules,
};
use javalint_source_file::LineIndex;
use javalint_text_size::TextSize;
use javalint_xpath::{
    DEFAULT_TAB_WIDTH, SuppressionXpathFilter, XpathFilterElement, XpathQueryGenerator,
};
use rayon::prelude::*;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "javalint")]
#[command(about = "A fast Java linter with xpath-based suppressions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check files for violations
    Check {
        /// Paths to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Path to checkstyle.xml config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Path to javalint.toml overlay
        #[arg(long)]
        overlay: Option<PathBuf>,

        /// Extra xpath suppressions file
        #[arg(long)]
        suppressions: Option<PathBuf>,
    },
    /// Generate an xpath suppressions file silencing all current violations
    Suppress {
        /// Paths to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Path to checkstyle.xml config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Path to javalint.toml overlay
        #[arg(long)]
        overlay: Option<PathBuf>,

        /// Where to write the suppressions file
        #[arg(short, long, default_value = "suppressions.xml")]
        output: PathBuf,

        /// Tab width used when expanding columns
        #[arg(long, default_value_t = DEFAULT_TAB_WIDTH)]
        tab_width: usize,
    },
    /// Print the xpath queries addressing a source position
    Query {
        /// Java file to inspect
        file: PathBuf,

        /// 1-based line of the position
        #[arg(long)]
        line: usize,

        /// 1-based, tab-expanded column of the position
        #[arg(long)]
        column: usize,

        /// Tab width used when expanding columns
        #[arg(long, default_value_t = DEFAULT_TAB_WIDTH)]
        tab_width: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            paths,
            config,
            overlay,
            suppressions,
        } => run_check(
            &paths,
            config.as_deref(),
            overlay.as_deref(),
            suppressions.as_deref(),
        ),
        Commands::Suppress {
            paths,
            config,
            overlay,
            output,
            tab_width,
        } => run_suppress(
            &paths,
            config.as_deref(),
            overlay.as_deref(),
            &output,
            tab_width,
        ),
        Commands::Query {
            file,
            line,
            column,
            tab_width,
        } => run_query(&file, line, column, tab_width),
    }
}

/// Run the check command.
fn run_check(
    paths: &[PathBuf],
    config_path: Option<&Path>,
    overlay_path: Option<&Path>,
    suppressions_path: Option<&Path>,
) -> Result<()> {
    let (rules, merged_config, comment_filters) = load_rules(config_path, overlay_path)?;

    if rules.is_empty() {
        eprintln!("{}", "Warning: No rules configured".yellow());
    } else {
        let rule_names: Vec<_> = rules.iter().map(|r| r.name()).collect();
        eprintln!(
            "Checking with {} rule(s): {}",
            rule_names.len(),
            rule_names.join(", ")
        );
    }

    let mut suppression_files: Vec<PathBuf> = merged_config
        .as_ref()
        .map(|config| config.xpath_suppression_files.clone())
        .unwrap_or_default();
    if let Some(path) = suppressions_path {
        suppression_files.push(path.to_path_buf());
    }
    let xpath_filter = load_xpath_filter(&suppression_files)?;

    let files = collect_java_files(paths);
    let reports: Vec<Vec<String>> = files
        .par_iter()
        .map(|path| check_file(path, &rules, &comment_filters, xpath_filter.as_ref()))
        .collect::<Result<_>>()?;

    let mut total_violations = 0;
    for line in reports.iter().flatten() {
        total_violations += 1;
        println!("{line}");
    }

    if total_violations > 0 {
        println!(
            "\nFound {} violation(s)",
            total_violations.to_string().red()
        );
        std::process::exit(1);
    }
    println!("{}", "No violations found".green());

    Ok(())
}

/// Run the suppress command: write a suppressions file covering every
/// violation the current configuration reports.
fn run_suppress(
    paths: &[PathBuf],
    config_path: Option<&Path>,
    overlay_path: Option<&Path>,
    output: &Path,
    tab_width: usize,
) -> Result<()> {
    let (rules, _, comment_filters) = load_rules(config_path, overlay_path)?;

    if rules.is_empty() {
        eprintln!("{}", "Warning: No rules configured".yellow());
    }

    let files = collect_java_files(paths);
    let entries: Vec<Vec<SuppressionEntry>> = files
        .par_iter()
        .map(|path| suppression_entries(path, &rules, &comment_filters, tab_width))
        .collect::<Result<_>>()?;
    let entries: Vec<SuppressionEntry> = entries.into_iter().flatten().collect();

    std::fs::write(output, render_xpath_suppressions(&entries))
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Wrote {} suppression(s) to {}",
        entries.len().to_string().green(),
        output.display()
    );

    Ok(())
}

/// Run the query command: print the queries the generator produces for a
/// position, one per line.
fn run_query(file: &Path, line: usize, column: usize, tab_width: usize) -> Result<()> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let mut parser = JavaParser::new();
    let result = parser
        .parse(&source)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    let root = CstNode::new(result.tree.root_node(), &source);
    let line_index = LineIndex::from_source_text(&source);
    let generator = XpathQueryGenerator::new(root, line, column, &source, &line_index, tab_width);

    let queries = generator.generate();
    if queries.is_empty() {
        eprintln!("No node starts at {line}:{column}");
        std::process::exit(1);
    }
    for query in queries {
        println!("{query}");
    }

    Ok(())
}

/// Load rules from configuration or use defaults.
#[allow(clippy::type_complexity)]
fn load_rules(
    config_path: Option<&Path>,
    overlay_path: Option<&Path>,
) -> Result<(
    Vec<Box<dyn Rule>>,
    Option<MergedConfig>,
    Vec<PlainTextCommentFilterConfig>,
)> {
    let registry = RuleRegistry::builtin();

    let (merged_config, comment_filters) = load_config(config_path, overlay_path)?;

    let rules: Vec<Box<dyn Rule>> = match &merged_config {
        Some(config) => config
            .enabled_rules()
            .filter_map(|configured| {
                let props = configured.properties_ref();
                let rule = registry.create_rule(&configured.name, &props);
                if rule.is_none() {
                    eprintln!(
                        "{}: Unknown rule '{}', skipping",
                        "Warning".yellow(),
                        configured.name
                    );
                }
                rule
            })
            .collect(),
        None => {
            eprintln!(
                "{}",
                "No checkstyle.xml found, checking with all builtin rules".yellow()
            );
            let defaults = Properties::new();
            registry
                .module_names()
                .filter_map(|name| registry.create_rule(name, &defaults))
                .collect()
        }
    };

    for rule in &rules {
        for warning in rule.config_warnings() {
            eprintln!("{}: [{}] {warning}", "Warning".yellow(), rule.name());
        }
    }

    Ok((rules, merged_config, comment_filters))
}

/// Load merged configuration from files.
fn load_config(
    config_path: Option<&Path>,
    overlay_path: Option<&Path>,
) -> Result<(Option<MergedConfig>, Vec<PlainTextCommentFilterConfig>)> {
    let javalint = find_javalint_config(overlay_path)?;

    let checkstyle_path = config_path
        .map(Path::to_path_buf)
        .or_else(|| {
            javalint
                .as_ref()
                .and_then(|j| j.checkstyle.config.clone().map(PathBuf::from))
        })
        .or_else(find_checkstyle_config);

    let Some(checkstyle_path) = checkstyle_path else {
        return Ok((None, vec![PlainTextCommentFilterConfig::checkstyle_default()]));
    };

    if !checkstyle_path.exists() {
        anyhow::bail!("Checkstyle config not found: {}", checkstyle_path.display());
    }

    let checkstyle = CheckstyleConfig::from_file(&checkstyle_path)
        .with_context(|| format!("Failed to parse {}", checkstyle_path.display()))?;

    eprintln!("Loaded config from: {}", checkstyle_path.display());

    let comment_filters = extract_comment_filters(&checkstyle);

    Ok((
        Some(MergedConfig::new(&checkstyle, javalint.as_ref())),
        comment_filters,
    ))
}

/// Extract comment-based suppression filters from checkstyle config.
fn extract_comment_filters(config: &CheckstyleConfig) -> Vec<PlainTextCommentFilterConfig> {
    let mut filters = vec![PlainTextCommentFilterConfig::checkstyle_default()];

    for module in config.modules.iter().chain(config.rules()) {
        if matches!(
            module.name.as_str(),
            "SuppressWithPlainTextCommentFilter" | "SuppressionCommentFilter"
        ) && let Some(filter) = filter_from_module(module)
        {
            filters.push(filter);
        }
    }

    filters
}

fn filter_from_module(module: &Module) -> Option<PlainTextCommentFilterConfig> {
    let off_format = module.property("offCommentFormat")?;
    let on_format = module.property("onCommentFormat")?;
    let check_format = module.property("checkFormat");

    PlainTextCommentFilterConfig::new(off_format, on_format, check_format)
}

/// Load the javalint.toml overlay, from the flag or common locations.
fn find_javalint_config(overlay_path: Option<&Path>) -> Result<Option<JavalintConfig>> {
    if let Some(path) = overlay_path {
        let config = JavalintConfig::from_file(path)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        return Ok(Some(config));
    }

    let candidates = ["javalint.toml", ".javalint.toml", "config/javalint.toml"];
    for candidate in candidates {
        let path = Path::new(candidate);
        if path.exists()
            && let Ok(config) = JavalintConfig::from_file(path)
        {
            eprintln!("Loaded javalint.toml from: {candidate}");
            return Ok(Some(config));
        }
    }
    Ok(None)
}

/// Find checkstyle.xml in common locations.
fn find_checkstyle_config() -> Option<PathBuf> {
    let candidates = [
        "checkstyle.xml",
        "config/checkstyle/checkstyle.xml",
        "config/checkstyle.xml",
        ".checkstyle.xml",
    ];
    for candidate in candidates {
        let path = PathBuf::from(candidate);
        if path.exists() {
            return Some(path);
        }
    }
    None
}

/// Build one filter from every suppressions file named by the config.
fn load_xpath_filter(files: &[PathBuf]) -> Result<Option<SuppressionXpathFilter>> {
    if files.is_empty() {
        return Ok(None);
    }

    let mut elements = Vec::new();
    for path in files {
        let suppressions = Suppressions::from_file(path)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        for element in &suppressions.elements {
            let filter_element = XpathFilterElement::new(
                element.files.as_deref(),
                element.checks.as_deref(),
                element.message.as_deref(),
                element.id.as_deref(),
                element.query.as_deref(),
            )
            .with_context(|| format!("Invalid suppression in {}", path.display()))?;
            elements.push(filter_element);
        }
    }

    Ok(Some(SuppressionXpathFilter::new(elements)))
}

fn collect_java_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() && path.extension().is_some_and(|e| e == "java") {
            files.push(path.clone());
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.path().extension().is_some_and(|ext| ext == "java"))
            {
                files.push(entry.path().to_path_buf());
            }
        }
    }
    files
}

/// Check a single file, returning formatted violation lines.
fn check_file(
    path: &Path,
    rules: &[Box<dyn Rule>],
    comment_filters: &[PlainTextCommentFilterConfig],
    xpath_filter: Option<&SuppressionXpathFilter>,
) -> Result<Vec<String>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut parser = JavaParser::new();
    let Ok(result) = parser.parse(&source) else {
        eprintln!("{}: Failed to parse", path.display());
        return Ok(vec![]);
    };

    let ctx = CheckContext::new(&source);
    let root = CstNode::new(result.tree.root_node(), &source);

    let mut suppression_ctx = SuppressionContext::from_source(&source, comment_filters);
    suppression_ctx.parse_suppress_warnings(&source, &root);

    let file_name = path.display().to_string();
    let source_code = ctx.source_code();
    let mut lines = Vec::new();

    // One pass per rule so the report can carry the rule name.
    for rule in rules {
        let result = run_rules(
            std::slice::from_ref(rule),
            &ctx,
            root,
            &suppression_ctx,
            xpath_filter,
            &file_name,
        );
        for diagnostic in result.diagnostics {
            let loc = source_code.line_column(diagnostic.range.start());
            lines.push(format!(
                "{}:{}: {} {}",
                path.display(),
                loc,
                format!("[{}]", rule.name()).blue(),
                diagnostic.kind.body
            ));
        }
    }

    Ok(lines)
}

/// Collect suppression entries covering every violation in one file.
fn suppression_entries(
    path: &Path,
    rules: &[Box<dyn Rule>],
    comment_filters: &[PlainTextCommentFilterConfig],
    tab_width: usize,
) -> Result<Vec<SuppressionEntry>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut parser = JavaParser::new();
    let Ok(result) = parser.parse(&source) else {
        eprintln!("{}: Failed to parse", path.display());
        return Ok(vec![]);
    };

    let ctx = CheckContext::new(&source);
    let root = CstNode::new(result.tree.root_node(), &source);
    let line_index = LineIndex::from_source_text(&source);

    let mut suppression_ctx = SuppressionContext::from_source(&source, comment_filters);
    suppression_ctx.parse_suppress_warnings(&source, &root);

    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    let mut entries = Vec::new();
    for rule in rules {
        let result = run_rules(
            std::slice::from_ref(rule),
            &ctx,
            root,
            &suppression_ctx,
            None,
            &file_name,
        );
        for diagnostic in result.diagnostics {
            let start = diagnostic.range.start();
            let line = line_index.line_index(start).get();
            let column = expanded_column(&source, &line_index, start, tab_width);
            let generator =
                XpathQueryGenerator::new(root, line, column, &source, &line_index, tab_width);
            let queries = generator.generate();
            if queries.is_empty() {
                eprintln!(
                    "{}: no query addresses the violation at {line}:{column}",
                    path.display()
                );
                continue;
            }
            entries.push(SuppressionEntry {
                files: Some(file_name.clone()),
                checks: rule.name().to_string(),
                queries,
            });
        }
    }

    Ok(entries)
}

/// 1-based column of `offset` after expanding tabs, matching the column
/// convention the query generator expects.
fn expanded_column(
    source: &str,
    line_index: &LineIndex,
    offset: TextSize,
    tab_width: usize,
) -> usize {
    let line = line_index.line_index(offset);
    let line_start = line_index.line_start(line, source);
    let prefix = &source[usize::from(line_start)..usize::from(offset)];

    let mut width = 0usize;
    for ch in prefix.chars() {
        if ch == '\t' {
            width = (width / tab_width + 1) * tab_width;
        } else {
            width += 1;
        }
    }
    width + 1
}
