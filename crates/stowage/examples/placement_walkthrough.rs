//! Walk through the two fit-checked paths on a tiny in-memory warehouse.
//!
//! Two bays (4×3 and 6×5), one item created in the large bay, then moved:
//! first to the small bay (rejected on height), then a shorter item moved
//! there successfully.

use stowage::prelude::*;

fn bay(name: &str, pts: [[f64; 2]; 4]) -> NewLocation {
    NewLocation {
        name: name.to_string(),
        coordinate: pts.iter().map(|p| p.to_vec()).collect(),
    }
}

fn item(name: &str, length: f64, height: f64) -> NewItem {
    NewItem {
        name: name.to_string(),
        kind: "pallet".to_string(),
        length,
        width: 1.0,
        height,
    }
}

fn main() -> Result<(), ServiceError> {
    let mut w = Warehouse::new(MemoryStore::default());
    let small = w.create_location(bay(
        "small",
        [[-1.0, -1.0], [-5.0, -1.0], [-1.0, 2.0], [-5.0, 2.0]],
    ))?;
    let large = w.create_location(bay(
        "large",
        [[-1.0, 1.0], [5.0, 1.0], [5.0, 6.0], [-1.0, 6.0]],
    ))?;
    for loc in [&small, &large] {
        let e = loc.extent(GeomCfg::default()).map_err(|source| ServiceError::Geometry {
            location: loc.id,
            source,
        })?;
        println!("location={} name={} length={} height={}", loc.id, loc.name, e.length, e.height);
    }

    let tall = w.create_item(large.id, item("tall", 2.0, 5.0))?;
    match w.relocate_item(tall.id, small.id) {
        Ok(_) => println!("tall moved (unexpected)"),
        Err(err) => println!(
            "tall rejected: code={} detail={}",
            err.code(),
            err.detail().unwrap_or_default()
        ),
    }

    let short = w.create_item(large.id, item("short", 4.0, 3.0))?;
    let moved = w.relocate_item(short.id, small.id)?;
    println!("short now at location={}", moved.location_id);
    Ok(())
}
