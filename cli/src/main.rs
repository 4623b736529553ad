use crate::cli::{Args, Command, Direction, PageArgs, SelectionArgs, ShapeArgs};
use anyhow::{bail, Context};
use clap::Parser;
use ldquery::grammar::ConstructQuery;
use ldquery::listing::{ListingParams, SortDirection};
use ldquery::model::NamedNode;
use ldquery::{Compiler, CompilerConfig, ListingRequest};
use serde_json::Value;
use std::fs;
use std::io::{self, stdin, stdout, Read, Write};
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;

/// The name under which the shape graph of `--shapes` is cached.
const SHAPES_GRAPH: &str = "urn:ldquery:shapes";

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => CompilerConfig::default(),
    };

    let query = match args.command {
        Command::Object {
            shapes,
            profile,
            focus,
        } => {
            let compiler = compiler(config, &shapes)?;
            let profile = compiler.node_shape(shapes_graph().as_ref(), iri(&profile)?.as_ref())?;
            Some(compiler.object_query(&profile, iri(&focus)?)?)
        }
        Command::Listing {
            shapes,
            profile,
            selection,
            pages,
            search,
            order_by,
            order_by_direction,
            order_by_value,
        } => {
            let compiler = compiler(config, &shapes)?;
            let profile = compiler.node_shape(shapes_graph().as_ref(), iri(&profile)?.as_ref())?;
            let mut request = listing_request(&compiler, selection)?;
            request.search = search;
            request.params.page = pages.page;
            request.params.limit = pages.limit;
            request.params.startindex = pages.startindex;
            request.params.order_by = order_by;
            request.params.order_by_direction = order_by_direction.map(|direction| match direction {
                Direction::Asc => SortDirection::Asc,
                Direction::Desc => SortDirection::Desc,
            });
            request.params.order_by_value = order_by_value;
            Some(compiler.listing_query(&profile, &request)?)
        }
        Command::Count { shapes, selection } => {
            let compiler = compiler(config, &shapes)?;
            let request = listing_request(&compiler, selection)?;
            Some(compiler.count_query(&request)?)
        }
        Command::Facets {
            shapes,
            facets,
            selection,
        } => {
            let compiler = compiler(config, &shapes)?;
            let facets =
                compiler.property_shape(shapes_graph().as_ref(), iri(&facets)?.as_ref())?;
            let request = listing_request(&compiler, selection)?;
            Some(compiler.facet_query(&facets, &request)?)
        }
        Command::Search { term, pages } => {
            let compiler = Compiler::new(config);
            Some(compiler.search_query(&term, &page_params(&pages))?)
        }
        Command::Cql { shapes, filter } => {
            let compiler = compiler(config, &shapes)?;
            let filter = read_json(filter.as_deref())?;
            Some(compiler.cql_query(&filter)?)
        }
        Command::Labels { iris } => {
            let iris = iris
                .iter()
                .map(String::as_str)
                .map(iri)
                .collect::<anyhow::Result<Vec<_>>>()?;
            Compiler::new(config).label_query(&iris)
        }
    };

    match query {
        Some(query) => write_query(&query),
        None => {
            debug!("Nothing to query");
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: &Path) -> anyhow::Result<CompilerConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read the configuration {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid configuration {}", path.display()))
}

fn shapes_graph() -> NamedNode {
    NamedNode::new_unchecked(SHAPES_GRAPH)
}

fn iri(value: &str) -> anyhow::Result<NamedNode> {
    NamedNode::new(value).with_context(|| format!("{value} is not a valid IRI"))
}

/// Creates a compiler with the shape graph and queryables of `shapes`.
fn compiler(config: CompilerConfig, shapes: &ShapeArgs) -> anyhow::Result<Compiler> {
    let Some(path) = &shapes.shapes else {
        if !shapes.queryable.is_empty() {
            bail!("The --shapes option must be set to declare queryables");
        }
        return Ok(Compiler::new(config));
    };
    let turtle = fs::read_to_string(path)
        .with_context(|| format!("Failed to read the shapes {}", path.display()))?;
    let mut compiler = Compiler::new(config);
    compiler
        .load_shapes(shapes_graph(), &turtle)
        .with_context(|| format!("Invalid shapes {}", path.display()))?;

    for declaration in &shapes.queryable {
        let Some((name, shape)) = declaration.split_once('=') else {
            bail!("The queryable {declaration} is not of the form NAME=SHAPE");
        };
        let shape = compiler
            .property_shape(shapes_graph().as_ref(), iri(shape)?.as_ref())
            .with_context(|| format!("Invalid queryable {name}"))?;
        compiler = compiler.with_queryable(name, shape);
    }
    Ok(compiler)
}

fn listing_request(
    compiler: &Compiler,
    selection: SelectionArgs,
) -> anyhow::Result<ListingRequest> {
    let endpoint = match &selection.endpoint {
        Some(endpoint) => {
            Some(compiler.node_shape(shapes_graph().as_ref(), iri(endpoint)?.as_ref())?)
        }
        None => None,
    };
    let filter = selection
        .filter
        .map(|path| read_json(Some(&path)))
        .transpose()?;
    Ok(ListingRequest {
        endpoint,
        filter,
        params: ListingParams {
            bbox: selection.bbox,
            filter_crs: selection.filter_crs,
            datetime: selection.datetime,
            ..ListingParams::default()
        },
        search: None,
    })
}

fn page_params(pages: &PageArgs) -> ListingParams {
    ListingParams {
        page: pages.page,
        limit: pages.limit,
        startindex: pages.startindex,
        ..ListingParams::default()
    }
}

/// Reads a JSON document from `path` or from stdin.
fn read_json(path: Option<&Path>) -> anyhow::Result<Value> {
    let content = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut content = String::new();
            stdin().lock().read_to_string(&mut content)?;
            content
        }
    };
    serde_json::from_str(&content).context("Invalid CQL2-JSON document")
}

fn write_query(query: &ConstructQuery) -> anyhow::Result<()> {
    let mut stdout = stdout().lock();
    writeln!(stdout, "{}", query.render())?;
    stdout.flush()?;
    Ok(())
}
