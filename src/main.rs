use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use lineage_viz::Result;
use lineage_viz::render::{self, SvgSurface};
use lineage_viz::schema::{LoadedGraph, ScopeTable, Settings};
use lineage_viz::view::{LineageView, ReactionView, ViewStatus};
use lineage_viz::{diagnostics, model};

#[derive(Parser)]
#[command(name = "lineage-viz")]
#[command(about = "Life-cycle lineage and reaction graph visualizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Svg,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List the selectable lineage targets, one per line.
    Targets {
        #[arg(long)]
        data: PathBuf,

        /// Replacement scope table (defaults to the built-in one).
        #[arg(long)]
        scopes: Option<PathBuf>,
    },

    /// Draw the ancestor lineage of one target.
    Lineage {
        #[arg(long)]
        data: PathBuf,

        #[arg(long)]
        target: String,

        #[arg(long)]
        scopes: Option<PathBuf>,

        #[arg(long)]
        settings: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "svg")]
        format: Format,

        #[arg(short = 'o', long)]
        out: String,
    },

    /// Draw the force-directed reaction graph.
    Reaction {
        #[arg(long)]
        data: PathBuf,

        #[arg(long)]
        settings: Option<PathBuf>,

        /// Highlight nodes whose id contains this text (case-insensitive).
        #[arg(long)]
        search: Option<String>,

        #[arg(long, value_enum, default_value = "svg")]
        format: Format,

        #[arg(short = 'o', long)]
        out: String,
    },

    /// Generate the two-tab HTML report. A missing input leaves its tab idle.
    Report {
        #[arg(long, default_value = "dag.json")]
        lineage: PathBuf,

        #[arg(long, default_value = "reaction.json")]
        reaction: PathBuf,

        #[arg(long)]
        scopes: Option<PathBuf>,

        #[arg(long)]
        settings: Option<PathBuf>,

        #[arg(short = 'o', long)]
        out: String,
    },
}

fn main() -> Result<()> {
    diagnostics::init_logging();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Targets { data, scopes } => {
            // Loaded only to reject a malformed table up front.
            ScopeTable::load_or_builtin(scopes.as_deref())?;
            let graph = LoadedGraph::load(&data)?;
            for t in graph.targets() {
                println!("{}", t);
            }
        }

        Commands::Lineage {
            data,
            target,
            scopes,
            settings,
            format,
            out,
        } => {
            let scopes = ScopeTable::load_or_builtin(scopes.as_deref())?;
            let settings = Settings::load_or_default(settings.as_deref())?;
            let graph = LoadedGraph::load(&data)?;
            if !graph.contains(&target) {
                diagnostics::warn(format!("target '{}' is not in {}", target, data.display()));
            }

            let mut view = LineageView::from_graph(graph, scopes, settings);
            let Some(scene) = view.select(&target) else {
                anyhow::bail!("{}", diagnostics::error_message("lineage view has no graph"));
            };
            let text = match format {
                Format::Svg => render::draw_lineage(&mut SvgSurface::new("dag"), scene),
                Format::Json => serde_json::to_string_pretty(scene)?,
            };
            std::fs::write(&out, text)?;
            println!("Wrote {}", out);
        }

        Commands::Reaction {
            data,
            settings,
            search,
            format,
            out,
        } => {
            let settings = Settings::load_or_default(settings.as_deref())?;
            let graph = LoadedGraph::load(&data)?;
            let mut view = ReactionView::from_graph(graph, &settings);
            if let Some(q) = search.as_deref() {
                let hits = view.search(q)?;
                log::info!("search '{}': {} nodes highlighted", q, hits.nodes.len());
            }

            let Some(layout) = view.layout() else {
                anyhow::bail!("{}", diagnostics::error_message("reaction view has no layout"));
            };
            let text = match format {
                Format::Svg => render::draw_reaction(
                    &mut SvgSurface::new("reaction"),
                    layout,
                    view.highlight(),
                    &view.viewport(),
                ),
                Format::Json => serde_json::to_string_pretty(&serde_json::json!({
                    "layout": layout,
                    "highlight": view.highlight(),
                }))?,
            };
            std::fs::write(&out, text)?;
            println!("Wrote {}", out);
        }

        Commands::Report {
            lineage,
            reaction,
            scopes,
            settings,
            out,
        } => {
            // Configuration errors are fatal; a missing data file only idles its tab.
            let scopes = ScopeTable::load_or_builtin(scopes.as_deref())?;
            let settings = Settings::load_or_default(settings.as_deref())?;

            let lineage_view = LineageView::open(&lineage, scopes, settings.clone());
            let reaction_view = ReactionView::open(&reaction, &settings);
            for status in [lineage_view.status(), reaction_view.status()] {
                if let ViewStatus::Idle { notice } = status {
                    eprintln!("{}", notice);
                }
            }

            let data = model::build_report_data(&lineage_view, &reaction_view);
            let html = render::render_html_report(&data)?;
            std::fs::write(&out, html)?;
            println!("Wrote {}", out);
        }
    }

    Ok(())
}
