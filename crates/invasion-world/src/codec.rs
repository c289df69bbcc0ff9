//! Line-oriented text format for worlds.
//!
//! Input lines look like `Foo north=Bar west=Baz`. Output lines use `:`
//! between direction and neighbor: `Foo north:Bar west:Baz`.

use crate::graph::WorldGraph;
use invasion_core::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Parse a world from its text form
pub fn parse(text: &str) -> Result<WorldGraph> {
    let mut world = WorldGraph::new();
    for (index, line) in text.lines().enumerate() {
        parse_line(&mut world, line, index + 1)?;
    }
    Ok(world)
}

pub fn read_from(reader: impl BufRead) -> Result<WorldGraph> {
    let mut world = WorldGraph::new();
    for (index, line) in reader.lines().enumerate() {
        parse_line(&mut world, &line?, index + 1)?;
    }
    Ok(world)
}

pub fn load(path: impl AsRef<Path>) -> Result<WorldGraph> {
    let path = path.as_ref();
    let world = read_from(BufReader::new(File::open(path)?))?;
    debug!(
        path = %path.display(),
        cities = world.city_count(),
        routes = world.route_count(),
        "Loaded world"
    );
    Ok(world)
}

fn parse_line(world: &mut WorldGraph, line: &str, line_no: usize) -> Result<()> {
    let mut tokens = line.split_whitespace();
    let Some(city) = tokens.next() else {
        return Ok(());
    };
    if city.contains('=') {
        return Err(Error::Parse {
            line: line_no,
            reason: format!("expected city name, found '{}'", city),
        });
    }
    world.add_city(city);

    for token in tokens {
        let (direction, neighbor) = token.split_once('=').ok_or_else(|| Error::Parse {
            line: line_no,
            reason: format!("expected direction=City, found '{}'", token),
        })?;
        if direction.is_empty() || neighbor.is_empty() || neighbor.contains('=') {
            return Err(Error::Parse {
                line: line_no,
                reason: format!("malformed route '{}'", token),
            });
        }
        world.add_city(neighbor);
        world.add_route(city, neighbor, direction)?;
    }
    Ok(())
}

/// Render the surviving world. Cities without outgoing routes are omitted.
pub fn render(world: &WorldGraph) -> String {
    let mut out = String::new();
    for (name, city) in world.iter() {
        if city.routes.is_empty() {
            continue;
        }
        out.push_str(name);
        for route in &city.routes {
            out.push(' ');
            out.push_str(route.direction.as_str());
            out.push(':');
            out.push_str(&route.to);
        }
        out.push('\n');
    }
    out
}

pub fn write_to(world: &WorldGraph, mut writer: impl Write) -> Result<()> {
    writer.write_all(render(world).as_bytes())?;
    writer.flush()?;
    Ok(())
}

pub fn save(world: &WorldGraph, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    write_to(world, BufWriter::new(File::create(path)?))?;
    debug!(path = %path.display(), cities = world.city_count(), "Saved world");
    Ok(())
}
