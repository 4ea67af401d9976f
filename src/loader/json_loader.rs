// Level files: {"tilemap": {"x;y": tile}, "tile_size": n, "offgrid": [tile]}
use crate::error::MapError;
use crate::spatial::GridPos;
use crate::tile::Tile;
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
struct JsonLevel {
    tilemap: IndexMap<String, Tile>,
    tile_size: u32,
    offgrid: Vec<Tile>,
}

#[derive(Serialize)]
struct JsonLevelRef<'a> {
    tilemap: JsonGrid<'a>,
    tile_size: u32,
    offgrid: &'a [Tile],
}

struct JsonGrid<'a>(&'a IndexMap<GridPos, Tile>);

impl Serialize for JsonGrid<'_> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(self.0.len()))?;
        for (pos, tile) in self.0 {
            map.serialize_entry(&pos.to_string(), tile)?;
        }
        map.end()
    }
}

/// Decoded contents of a level file, validated and ready to swap in.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Level {
    pub tile_size: u32,
    pub grid: IndexMap<GridPos, Tile>,
    pub offgrid: Vec<Tile>,
}

fn check_extension(p: &Path) -> Result<(), MapError> {
    if p.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(MapError::UnsupportedFormat(p.display().to_string()));
    }
    Ok(())
}

fn grid_from_json(tilemap: IndexMap<String, Tile>) -> Result<IndexMap<GridPos, Tile>, MapError> {
    let mut grid = IndexMap::with_capacity(tilemap.len());
    for (key, tile) in tilemap {
        let pos: GridPos = key.parse()?;
        match tile.pos.to_grid() {
            Some(p) if p == pos => {}
            Some(p) => {
                return Err(MapError::InvalidTile {
                    reason: format!("pos [{}, {}] does not match its key", p.x, p.y),
                    key,
                })
            }
            None => {
                return Err(MapError::InvalidTile {
                    reason: format!("pos [{}, {}] is not a grid coordinate", tile.pos.x, tile.pos.y),
                    key,
                })
            }
        }
        grid.insert(pos, tile);
    }
    Ok(grid)
}

pub(crate) fn decode_level_str(txt: &str, path: &Path) -> Result<Level, MapError> {
    let j: JsonLevel = serde_json::from_str(txt).map_err(|source| MapError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if j.tile_size == 0 {
        return Err(MapError::InvalidTileSize(0));
    }

    Ok(Level {
        tile_size: j.tile_size,
        grid: grid_from_json(j.tilemap)?,
        offgrid: j.offgrid,
    })
}

pub(crate) fn decode_level_file(path: &Path) -> Result<Level, MapError> {
    check_extension(path)?;
    let txt = std::fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_level_str(&txt, path)
}

pub(crate) fn encode_level_string(
    tile_size: u32,
    grid: &IndexMap<GridPos, Tile>,
    offgrid: &[Tile],
) -> Result<String, MapError> {
    let level = JsonLevelRef {
        tilemap: JsonGrid(grid),
        tile_size,
        offgrid,
    };
    let mut out = Vec::new();
    let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, fmt);
    level.serialize(&mut ser).map_err(|source| MapError::Json {
        path: PathBuf::new(),
        source,
    })?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}

pub(crate) fn encode_level_file(
    path: &Path,
    tile_size: u32,
    grid: &IndexMap<GridPos, Tile>,
    offgrid: &[Tile],
) -> Result<(), MapError> {
    check_extension(path)?;
    let txt = encode_level_string(tile_size, grid, offgrid).map_err(|e| match e {
        MapError::Json { source, .. } => MapError::Json {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    std::fs::write(path, txt).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })
}
