use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use stowage::prelude::*;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod import;
mod provenance;
mod state;

#[derive(Parser)]
#[command(name = "stowage")]
#[command(about = "Warehouse locations, items, and location-fit checks")]
struct Cmd {
    /// Snapshot file holding locations and items
    #[arg(long, env = "STOWAGE_STATE", default_value = "warehouse.json", global = true)]
    state: PathBuf,

    /// Largest coordinate difference still treated as equal
    #[arg(long, default_value_t = 0.0, global = true)]
    eps: f64,

    /// Log more (-v info, -vv debug); logs go to stderr
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print the extent of four corners, e.g. --coords '[[0,0],[0,2],[3,0],[3,2]]'
    Extent {
        #[arg(long)]
        coords: String,
    },
    /// Decide whether an item of the given length/height fits four corners
    Fit {
        #[arg(long)]
        coords: String,
        #[arg(long)]
        length: f64,
        #[arg(long)]
        height: f64,
    },
    /// Manage locations in the snapshot
    Location {
        #[command(subcommand)]
        cmd: LocationCmd,
    },
    /// Manage items in the snapshot
    Item {
        #[command(subcommand)]
        cmd: ItemCmd,
    },
    /// Create items from a CSV file and write a report plus provenance sidecar
    Import {
        #[arg(long)]
        csv: PathBuf,
        /// Location for rows without a location_id column value
        #[arg(long)]
        location: Option<i64>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Subcommand)]
enum LocationCmd {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        coords: String,
    },
    List,
    /// Also prints the derived extent
    Show {
        id: i64,
    },
    Rename {
        id: i64,
        #[arg(long)]
        name: String,
    },
    Remove {
        id: i64,
    },
}

#[derive(Subcommand)]
enum ItemCmd {
    Add {
        #[arg(long)]
        location: i64,
        #[arg(long)]
        name: String,
        #[arg(long = "type")]
        kind: String,
        #[arg(long)]
        length: f64,
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
    },
    List,
    Show {
        id: i64,
    },
    /// Move an item; its stored length/height must fit the destination
    Move {
        id: i64,
        #[arg(long)]
        location: i64,
    },
    Remove {
        id: i64,
    },
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = match cmd.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let cfg = GeomCfg::with_eps(cmd.eps);
    match cmd.action {
        Action::Extent { coords } => extent(&coords, cfg),
        Action::Fit {
            coords,
            length,
            height,
        } => fit(&coords, ItemDims { length, height }, cfg),
        Action::Location { cmd: sub } => location(&cmd.state, cfg, sub),
        Action::Item { cmd: sub } => item(&cmd.state, cfg, sub),
        Action::Import { csv, location, out } => {
            import(&cmd.state, cfg, &csv, location.map(LocationId), &out)
        }
        Action::Report => report(&cmd.state),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_corners(raw: &str) -> Result<Corners> {
    let points: Vec<Vec<f64>> =
        serde_json::from_str(raw).context("--coords must be a JSON array of [x, y] pairs")?;
    Ok(corners(coordinate_array(&points)?))
}

/// Service errors keep their class code; fit rejections add the user detail.
fn service<T>(result: Result<T, ServiceError>) -> Result<T> {
    result.map_err(|err| {
        let code = err.code();
        match err.detail() {
            Some(detail) => anyhow!("{err} [{code}]: {detail}"),
            None => anyhow::Error::new(err).context(format!("request failed [{code}]")),
        }
    })
}

fn open(state_path: &Path, cfg: GeomCfg) -> Result<Warehouse<MemoryStore>> {
    Ok(Warehouse::with_cfg(state::load(state_path)?, cfg))
}

fn extent(coords: &str, cfg: GeomCfg) -> Result<()> {
    let c = parse_corners(coords)?;
    let e = compute_extent_with(&c, cfg).context("coordinates do not form a rectangle")?;
    tracing::info!(length = e.length, height = e.height, "extent");
    print_json(&e)
}

fn fit(coords: &str, dims: ItemDims, cfg: GeomCfg) -> Result<()> {
    let c = parse_corners(coords)?;
    let decision =
        evaluate_item_fit_with(dims, &c, cfg).context("coordinates do not form a rectangle")?;
    tracing::info!(accepted = decision.is_accepted(), "fit");
    print_json(&FitReport::from(decision))
}

fn location(state_path: &Path, cfg: GeomCfg, cmd: LocationCmd) -> Result<()> {
    let mut w = open(state_path, cfg)?;
    match cmd {
        LocationCmd::Add { name, coords } => {
            let points: Vec<Vec<f64>> = serde_json::from_str(&coords)
                .context("--coords must be a JSON array of [x, y] pairs")?;
            let created = service(w.create_location(NewLocation {
                name,
                coordinate: points,
            }))?;
            state::save(state_path, w.store())?;
            print_json(&created)
        }
        LocationCmd::List => print_json(&w.list_locations()),
        LocationCmd::Show { id } => {
            let loc = service(w.get_location(LocationId(id)))?;
            // A stored non-rectangle still shows; the extent is then null.
            let extent = loc.extent(cfg).ok();
            print_json(&json!({ "location": loc, "extent": extent }))
        }
        LocationCmd::Rename { id, name } => {
            let renamed = service(w.rename_location(LocationId(id), &name))?;
            state::save(state_path, w.store())?;
            print_json(&renamed)
        }
        LocationCmd::Remove { id } => {
            service(w.delete_location(LocationId(id)))?;
            state::save(state_path, w.store())?;
            print_json(&"Location deleted")
        }
    }
}

fn item(state_path: &Path, cfg: GeomCfg, cmd: ItemCmd) -> Result<()> {
    let mut w = open(state_path, cfg)?;
    match cmd {
        ItemCmd::Add {
            location,
            name,
            kind,
            length,
            width,
            height,
        } => {
            let created = service(w.create_item(
                LocationId(location),
                NewItem {
                    name,
                    kind,
                    length,
                    width,
                    height,
                },
            ))?;
            state::save(state_path, w.store())?;
            print_json(&created)
        }
        ItemCmd::List => print_json(&w.list_items()),
        ItemCmd::Show { id } => print_json(&service(w.get_item(ItemId(id)))?),
        ItemCmd::Move { id, location } => {
            let moved = service(w.relocate_item(ItemId(id), LocationId(location)))?;
            state::save(state_path, w.store())?;
            print_json(&moved)
        }
        ItemCmd::Remove { id } => {
            service(w.delete_item(ItemId(id)))?;
            state::save(state_path, w.store())?;
            print_json(&"Item deleted")
        }
    }
}

fn import(
    state_path: &Path,
    cfg: GeomCfg,
    csv: &Path,
    default_location: Option<LocationId>,
    out: &Path,
) -> Result<()> {
    tracing::info!(csv = %csv.display(), out = %out.display(), "import");
    let mut w = open(state_path, cfg)?;
    let rows = import::read_rows(csv)?;
    let report = import::import_rows(&mut w, rows, default_location);
    state::save(state_path, w.store())?;

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating report dir {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(&report)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let payload = provenance::Payload::new(json!({
        "location": default_location,
        "eps": cfg.eps_coord,
        "state": state_path.to_string_lossy(),
        "rows": report.rows,
        "accepted": report.accepted.len(),
        "rejected": report.rejected.len(),
    }))
    .with_input(csv);
    let sidecar = provenance::write_sidecar(out, payload)?;
    tracing::info!(
        accepted = report.accepted.len(),
        rejected = report.rejected.len(),
        sidecar = %sidecar.display(),
        "import_done"
    );
    print_json(&json!({
        "rows": report.rows,
        "accepted": report.accepted.len(),
        "rejected": report.rejected.len(),
        "report": out.to_string_lossy(),
    }))
}

fn report(state_path: &Path) -> Result<()> {
    let store = state::load(state_path)?;
    let snapshot = store.snapshot();
    print_json(&json!({
        "version": stowage::VERSION,
        "code_rev": provenance::code_rev(),
        "state": state_path.to_string_lossy(),
        "locations": snapshot.locations.len(),
        "items": snapshot.items.len(),
    }))
}
