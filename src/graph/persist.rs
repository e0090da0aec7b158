//! Binary persistence for graphs
//!
//! Layout, all fields little-endian `u32`:
//!
//! ```text
//! [node_count][edge_count]([from][to]) * edge_count
//! ```
//!
//! There is no version or checksum; the reader validates lengths and node
//! ranges only.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;

use super::Graph;
use crate::config::GraphConfig;
use crate::constants::file_format::{EDGE_RECORD_LEN, HEADER_LEN};
use crate::error::{Result, SccError};

impl Graph {
    /// Write the graph to `path`, replacing any existing file
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| SccError::FileWriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut writer = BufWriter::new(file);

        self.write_to(&mut writer)
            .and_then(|()| writer.flush().map_err(SccError::from))
            .map_err(|e| match e {
                SccError::Io(source) => SccError::FileWriteError {
                    path: path.to_path_buf(),
                    source,
                },
                other => other,
            })?;

        debug!(
            "saved graph with {} nodes and {} edges to {}",
            self.node_count(),
            self.edge_count(),
            path.display()
        );
        Ok(())
    }

    /// Read a graph written by [`Graph::save`]
    ///
    /// Edges are re-inserted through [`Graph::add_edge`], so `config` applies
    /// to the loaded data exactly as to live insertions.
    pub fn load(path: &Path, config: GraphConfig) -> Result<Self> {
        let file = File::open(path).map_err(|e| SccError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let graph = Self::read_from(BufReader::new(file), config).map_err(|e| match e {
            SccError::Io(source) => SccError::FileReadError {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        debug!(
            "loaded graph with {} nodes and {} edges from {}",
            graph.node_count(),
            graph.edge_count(),
            path.display()
        );
        Ok(graph)
    }

    /// Serialize into any writer
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let node_count = to_u32(self.node_count())?;
        let edge_count = to_u32(self.edge_count())?;

        writer.write_all(&node_count.to_le_bytes())?;
        writer.write_all(&edge_count.to_le_bytes())?;
        for edge in self.edges() {
            // Both endpoints are below node_count, which fits in u32.
            writer.write_all(&(edge.from as u32).to_le_bytes())?;
            writer.write_all(&(edge.to as u32).to_le_bytes())?;
        }
        Ok(())
    }

    /// Deserialize from any reader
    pub fn read_from<R: Read>(mut reader: R, config: GraphConfig) -> Result<Self> {
        let mut header = [0u8; HEADER_LEN];
        read_record(&mut reader, &mut header, || "truncated header".to_string())?;
        let (node_count, edge_count) = split_record(&header);

        if node_count == 0 {
            return Err(SccError::CorruptGraphFile {
                message: "node count is zero".to_string(),
            });
        }

        let mut graph = Graph::new(node_count, config)?;

        let mut record = [0u8; EDGE_RECORD_LEN];
        for read in 0..edge_count {
            read_record(&mut reader, &mut record, || {
                format!("expected {edge_count} edges, found {read}")
            })?;
            let (from, to) = split_record(&record);

            graph.add_edge(from, to).map_err(|e| match e {
                SccError::NodeOutOfRange { .. } => SccError::CorruptGraphFile {
                    message: format!("edge {from} -> {to} is out of range: {e}"),
                },
                other => other,
            })?;
        }

        let mut trailing = [0u8; 1];
        if reader.read(&mut trailing)? != 0 {
            return Err(SccError::CorruptGraphFile {
                message: format!("unexpected data after {edge_count} edges"),
            });
        }

        Ok(graph)
    }
}

fn to_u32(value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| SccError::CapacityExceeded {
        requested: value,
        max_nodes: u32::MAX as usize,
    })
}

fn read_record<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    describe: impl FnOnce() -> String,
) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => SccError::CorruptGraphFile {
            message: describe(),
        },
        _ => SccError::Io(e),
    })
}

fn split_record(record: &[u8; 8]) -> (usize, usize) {
    let first = u32::from_le_bytes([record[0], record[1], record[2], record[3]]);
    let second = u32::from_le_bytes([record[4], record[5], record[6], record[7]]);
    (first as usize, second as usize)
}
