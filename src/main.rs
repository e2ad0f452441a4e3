use anyhow::{Context, anyhow};
use clap::Parser;

use mmwave_path_engine::domain::report::CandidateReport;
use mmwave_path_engine::domain::request::PathRequest;
use mmwave_path_engine::domain::selection::{BidirectionalPlanner, PathSelector, Plan};
use mmwave_path_engine::domain::topology::connect_point::ElementId;
use mmwave_path_engine::domain::topology::graph::TopologyGraph;
use mmwave_path_engine::{load_request, load_topology, logger};

/// Reliability-aware path selection over a millimeter-wave topology snapshot.
#[derive(Debug, Parser)]
#[command(name = "mmwave-paths", version, about)]
struct Cli {
    /// Topology snapshot (JSON).
    topology: String,

    /// Source device or host id.
    src: String,

    /// Destination device or host id.
    dst: String,

    /// Path request file (JSON). Flags below override its values.
    #[arg(long)]
    request: Option<String>,

    /// Number of candidate paths to compute.
    #[arg(long)]
    max_paths: Option<usize>,

    /// Packet-loss ceiling in (0, 1).
    #[arg(long)]
    packet_loss: Option<f64>,

    /// Latency ceiling in milliseconds.
    #[arg(long)]
    latency: Option<f64>,

    /// Bandwidth floor in Mbps.
    #[arg(long)]
    bandwidth: Option<f64>,

    /// Rank paths by reliability-aware cost instead of hop count.
    #[arg(long)]
    mmwave: bool,

    /// Rank paths by hop count.
    #[arg(long, conflicts_with = "mmwave")]
    hop_count: bool,

    /// Compute the reverse path independently.
    #[arg(long)]
    asymmetric: bool,

    /// Print the bidirectional plan instead of the candidate listing.
    #[arg(long)]
    plan: bool,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn request(&self) -> anyhow::Result<PathRequest> {
        let mut request = match &self.request {
            Some(path) => load_request(path).with_context(|| format!("loading request '{}'", path))?,
            None => PathRequest::default(),
        };

        if let Some(max_paths) = self.max_paths {
            request.max_paths = max_paths;
        }
        if let Some(ceiling) = self.packet_loss {
            request.packet_loss_ceiling = ceiling;
        }
        if self.latency.is_some() {
            request.latency_ceiling = self.latency;
        }
        if let Some(floor) = self.bandwidth {
            request.bandwidth_floor = floor;
        }
        if self.mmwave {
            request.use_reliability_weighting = true;
        }
        if self.hop_count {
            request.use_reliability_weighting = false;
        }
        if self.asymmetric {
            request.asymmetric = true;
        }
        request.validate()?;

        Ok(request)
    }
}

fn resolve(graph: &TopologyGraph, id: &str) -> anyhow::Result<ElementId> {
    graph.element(id).ok_or_else(|| anyhow!("'{}' is neither a device nor a host of the topology", id))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init();

    let request = cli.request()?;
    let graph = load_topology(&cli.topology).with_context(|| format!("loading topology '{}'", cli.topology))?;
    let src = resolve(&graph, &cli.src)?;
    let dst = resolve(&graph, &cli.dst)?;

    let weigher = request.weigher();
    let constraints = request.constraints();
    let selector = PathSelector::new(&graph, &weigher);

    if !cli.plan {
        let report = CandidateReport::build(&selector, &src, &dst, request.max_paths, &constraints)?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", report);
        }
        return Ok(());
    }

    let plan = BidirectionalPlanner::new(selector, request.max_paths).plan(&src, &dst, &constraints, request.asymmetric)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    match &plan {
        Plan::Empty => println!("{} and {} are the same element, nothing to route.", src, dst),
        Plan::Routed(paths) => {
            println!("forward: {}", paths.forward);
            println!("reverse: {}", paths.reverse);
            let (forward, reverse) = paths.link_collections()?;
            println!("forward ingress={} egress={} core links={}", forward.ingress, forward.egress, forward.links.len());
            println!("reverse ingress={} egress={} core links={}", reverse.ingress, reverse.egress, reverse.links.len());
        }
        Plan::NotFound { src, dst, reason } => println!("No path {} => {}: {:?}", src, dst, reason),
    }

    Ok(())
}
