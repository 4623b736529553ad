use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum, ValueHint};
use ldquery::listing::OrderValue;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "ldquery")]
/// Compiles SHACL profiles and CQL2-JSON filters into SPARQL CONSTRUCT queries
///
/// The generated query is written to stdout.
pub struct Args {
    /// A JSON file with the compiler configuration
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    /// Logs to stderr. Repeat for more detail
    ///
    /// The RUST_LOG environment variable takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// The query of a single resource described by a profile
    Object {
        #[command(flatten)]
        shapes: ShapeArgs,
        /// The IRI of the profile node shape
        #[arg(long, value_hint = ValueHint::Url)]
        profile: String,
        /// The IRI of the resource
        #[arg(long, value_hint = ValueHint::Url)]
        focus: String,
    },
    /// The query of one page of a listing described by a profile
    Listing {
        #[command(flatten)]
        shapes: ShapeArgs,
        /// The IRI of the profile node shape
        #[arg(long, value_hint = ValueHint::Url)]
        profile: String,
        #[command(flatten)]
        selection: SelectionArgs,
        #[command(flatten)]
        pages: PageArgs,
        /// Lists the search results for this term
        #[arg(long)]
        search: Option<String>,
        /// The predicate whose value orders the listing
        #[arg(long, value_hint = ValueHint::Url)]
        order_by: Option<String>,
        #[arg(long, value_enum)]
        order_by_direction: Option<Direction>,
        /// What orders the listing: label, order_by_val, or weight
        #[arg(long)]
        order_by_value: Option<OrderValue>,
    },
    /// Counts the resources of a listing
    Count {
        #[command(flatten)]
        shapes: ShapeArgs,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Counts the resources of a listing per facet value
    Facets {
        #[command(flatten)]
        shapes: ShapeArgs,
        /// The IRI of the property shape whose paths are the facets
        #[arg(long, value_hint = ValueHint::Url)]
        facets: String,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Searches the literals of the configured search predicates
    Search {
        /// The search term
        term: String,
        #[command(flatten)]
        pages: PageArgs,
    },
    /// The triples matched by a CQL2-JSON filter
    Cql {
        #[command(flatten)]
        shapes: ShapeArgs,
        /// The CQL2-JSON file
        ///
        /// If no file is given, stdin is read.
        #[arg(value_hint = ValueHint::FilePath)]
        filter: Option<PathBuf>,
    },
    /// The query of the labels of some resources
    Labels {
        /// The IRIs of the resources
        #[arg(required = true, value_hint = ValueHint::Url)]
        iris: Vec<String>,
    },
}

#[derive(ClapArgs)]
pub struct ShapeArgs {
    /// A Turtle file with the shape graph
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub shapes: Option<PathBuf>,
    /// Declares a CQL queryable as NAME=SHAPE where SHAPE is the IRI of a property shape
    #[arg(long, value_name = "NAME=SHAPE")]
    pub queryable: Vec<String>,
}

#[derive(ClapArgs)]
pub struct SelectionArgs {
    /// The IRI of the endpoint node shape that selects the listed resources
    #[arg(long, value_hint = ValueHint::Url)]
    pub endpoint: Option<String>,
    /// A CQL2-JSON file that filters the listed resources
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub filter: Option<PathBuf>,
    /// A bounding box as min_x,min_y,max_x,max_y
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub bbox: Vec<f64>,
    /// The coordinate reference system of the bounding box
    #[arg(long, value_hint = ValueHint::Url)]
    pub filter_crs: Option<String>,
    /// An instant or an interval like 2018-02-12T00:00:00Z/..
    #[arg(long)]
    pub datetime: Option<String>,
}

#[derive(ClapArgs)]
pub struct PageArgs {
    /// The page to return, starting at one
    #[arg(long, default_value_t = 1)]
    pub page: u64,
    #[arg(long)]
    pub limit: Option<u64>,
    /// The offset of the first result. Overrides --page
    #[arg(long)]
    pub startindex: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Direction {
    Asc,
    Desc,
}
