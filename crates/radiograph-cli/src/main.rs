//! Radiograph CLI
//!
//! Unified command-line interface for the two-stage pipeline and the query
//! surfaces on top of the built graph:
//!
//! - `extract`: element dumps → interchange JSON (per-file error records)
//! - `build`: interchange JSON → serialized knowledge graph
//! - `export`: one catalog's closed subgraph → Turtle/N-Triples document
//! - `query`: pattern query → result table
//! - `catalog`: nested catalog/dataset/distribution listing → JSON

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use radiograph_graph::pipeline::{
    build_graph, CatalogMetadata, DistributionUriScheme, GroupingMode, PipelineConfig,
};
use radiograph_graph::rdf_io::{deserialize_graph, serialize_graph, RdfSyntax};
use radiograph_graph::{extract_catalog_subgraph, Graph, GraphError};
use radiograph_ingest_dicom::extract::{extract_directory, ExtractOptions};
use radiograph_ingest_dicom::interchange::{read_interchange, write_interchange};
use radiograph_query::{catalog_listing, parse_pattern_query, query, BasicEvaluator};

#[derive(Parser)]
#[command(name = "radiograph")]
#[command(
    author,
    version,
    about = "DICOM metadata → DCAT knowledge graph pipeline"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract element dumps from a directory into the interchange JSON.
    Extract {
        /// Directory holding element-dump files
        input: PathBuf,
        /// Output interchange JSON
        #[arg(short, long)]
        out: PathBuf,
        /// Dump file extension to pick up
        #[arg(long, default_value = "json")]
        extension: String,
    },

    /// Build a knowledge graph from an interchange JSON.
    Build {
        /// Interchange JSON produced by `extract`
        input: PathBuf,
        /// Output graph document (`.ttl` or `.nt`)
        #[arg(short, long)]
        out: PathBuf,
        /// Base IRI for every subject
        #[arg(long, default_value = "http://example.org")]
        base_uri: String,
        /// Normalized path segment naming the catalog (0-based)
        #[arg(long, default_value_t = 1)]
        catalog_index: usize,
        /// Supplied catalog name, overriding path derivation
        #[arg(long)]
        catalog_name: Option<String>,
        /// Collapse everything into one dataset with this key
        #[arg(long)]
        single_dataset: Option<String>,
        /// Use basenames instead of full paths for distribution subjects
        #[arg(long)]
        basename_uris: bool,
        /// Catalog publisher literal
        #[arg(long, default_value = "Radiograph")]
        publisher: String,
        /// Catalog language literal
        #[arg(long, default_value = "en")]
        language: String,
        /// Catalog issue date (`YYYY-MM-DD`); today when omitted
        #[arg(long)]
        issued: Option<String>,
    },

    /// Export one catalog's closed subgraph.
    Export {
        /// Graph document built by `build`
        graph: PathBuf,
        /// Catalog name to export
        catalog: String,
        /// Output path; defaults to `<catalog>.<ext>` next to the graph
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Base IRI used when the graph was built
        #[arg(long, default_value = "http://example.org")]
        base_uri: String,
        /// Output syntax (`ttl` or `nt`)
        #[arg(long, default_value = "ttl")]
        format: String,
    },

    /// Run a pattern query against a graph document.
    Query {
        /// Graph document built by `build`
        graph: PathBuf,
        /// Inline query text (`select ?x` + one pattern per line)
        #[arg(short, long, conflicts_with = "file")]
        query: Option<String>,
        /// File holding the query text
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print the nested catalog/dataset/distribution listing as JSON.
    Catalog {
        /// Graph document built by `build`
        graph: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(err) = run() {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    match Cli::parse().command {
        Commands::Extract {
            input,
            out,
            extension,
        } => cmd_extract(&input, &out, extension),
        Commands::Build {
            input,
            out,
            base_uri,
            catalog_index,
            catalog_name,
            single_dataset,
            basename_uris,
            publisher,
            language,
            issued,
        } => {
            let config = PipelineConfig {
                base_uri,
                grouping: match single_dataset {
                    Some(dataset) => GroupingMode::SingleDataset { dataset },
                    None => GroupingMode::PerStudy,
                },
                distribution_uri: if basename_uris {
                    DistributionUriScheme::Basename
                } else {
                    DistributionUriScheme::FullPath
                },
                catalog_path_index: catalog_index,
                catalog_name,
                catalog_metadata: CatalogMetadata {
                    publisher,
                    language,
                    issued,
                },
            };
            cmd_build(&input, &out, &config)
        }
        Commands::Export {
            graph,
            catalog,
            out,
            base_uri,
            format,
        } => cmd_export(&graph, &catalog, out.as_deref(), &base_uri, &format),
        Commands::Query { graph, query, file } => {
            let text = match (query, file) {
                (Some(text), _) => text,
                (None, Some(path)) => fs::read_to_string(&path)
                    .with_context(|| format!("read query file {}", path.display()))?,
                (None, None) => return Err(anyhow!("pass --query or --file")),
            };
            cmd_query(&graph, &text)
        }
        Commands::Catalog { graph } => cmd_catalog(&graph),
    }
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_extract(input: &Path, out: &Path, extension: String) -> Result<()> {
    let entries = extract_directory(input, &ExtractOptions { extension })?;
    let errored = entries.iter().filter(|e| !e.is_ok()).count();

    let file = fs::File::create(out).with_context(|| format!("create {}", out.display()))?;
    write_interchange(file, &entries)?;

    println!(
        "{} {} files ({} errored) -> {}",
        "extracted".green().bold(),
        entries.len(),
        errored,
        out.display()
    );
    Ok(())
}

fn cmd_build(input: &Path, out: &Path, config: &PipelineConfig) -> Result<()> {
    let file = fs::File::open(input).with_context(|| format!("open {}", input.display()))?;
    let entries = read_interchange(file).context("parse interchange JSON")?;

    let (graph, report) = build_graph(&entries, config);

    let syntax = syntax_for_path(out).unwrap_or(RdfSyntax::Turtle);
    fs::write(out, serialize_graph(&graph, syntax)?)
        .with_context(|| format!("write {}", out.display()))?;

    println!(
        "{} {} facts from {} files ({} skipped, {} errored) -> {}",
        "built".green().bold(),
        graph.len(),
        report.files_mapped,
        report.files_skipped,
        report.files_errored,
        out.display()
    );
    Ok(())
}

fn cmd_export(
    graph_path: &Path,
    catalog: &str,
    out: Option<&Path>,
    base_uri: &str,
    format: &str,
) -> Result<()> {
    let syntax = RdfSyntax::from_extension(format)
        .ok_or_else(|| anyhow!("unsupported format `{format}`, expected ttl or nt"))?;
    let graph = load_graph(graph_path)?;

    let subgraph = match extract_catalog_subgraph(&graph, catalog, base_uri) {
        Ok(subgraph) => subgraph,
        Err(err @ GraphError::CatalogNotFound(_)) => {
            return Err(anyhow!(err).context("nothing to export"));
        }
        Err(err) => return Err(err.into()),
    };

    // Suggested download name: `<catalog>.<ext>`.
    let out_path = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(format!("{catalog}.{}", syntax.extension())));
    fs::write(&out_path, serialize_graph(&subgraph, syntax)?)
        .with_context(|| format!("write {}", out_path.display()))?;

    println!(
        "{} {} facts for catalog {} -> {}",
        "exported".green().bold(),
        subgraph.len(),
        catalog.cyan(),
        out_path.display()
    );
    Ok(())
}

fn cmd_query(graph_path: &Path, text: &str) -> Result<()> {
    let graph = load_graph(graph_path)?;
    let prefixes: BTreeMap<String, String> = graph
        .prefixes()
        .map(|(p, ns)| (p.to_string(), ns.to_string()))
        .collect();

    let pattern_query = parse_pattern_query(text, &prefixes)?;
    let rows = query(&graph, &BasicEvaluator, &pattern_query)?;
    let projection = pattern_query.projection();

    println!("{}", projection.join("\t").bold());
    for row in &rows {
        let cells: Vec<String> = projection
            .iter()
            .map(|var| {
                row.get(var)
                    .map(|v| v.display_string())
                    .unwrap_or_default()
            })
            .collect();
        println!("{}", cells.join("\t"));
    }
    println!("{} {} rows", "ok".green().bold(), rows.len());
    Ok(())
}

fn cmd_catalog(graph_path: &Path) -> Result<()> {
    let graph = load_graph(graph_path)?;
    let listing = catalog_listing(&graph, &BasicEvaluator)?;
    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn syntax_for_path(path: &Path) -> Option<RdfSyntax> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(RdfSyntax::from_extension)
}

fn load_graph(path: &Path) -> Result<Graph> {
    let syntax = syntax_for_path(path).unwrap_or(RdfSyntax::Turtle);
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Ok(deserialize_graph(&bytes, syntax)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_follows_the_file_extension() {
        assert_eq!(syntax_for_path(Path::new("g.ttl")), Some(RdfSyntax::Turtle));
        assert_eq!(syntax_for_path(Path::new("g.NT")), Some(RdfSyntax::NTriples));
        assert_eq!(syntax_for_path(Path::new("g.rdf")), None);
        assert_eq!(syntax_for_path(Path::new("graph")), None);
    }
}
