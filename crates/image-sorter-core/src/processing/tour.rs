//! # Colour tour
//!
//! Orders images so that each one is visually close to the one before it. This
//! is the nearest-neighbour heuristic for the travelling salesman problem:
//! start somewhere, always hop to the closest image not yet visited. It is
//! greedy and not optimal; no improvement pass is attempted.
//!
//! The tour always starts at the first record in discovery order. That root is
//! arbitrary but deterministic, so the same folder always yields the same
//! order.
//!
//! Cost is O(n²) distance evaluations.

use log::debug;

use super::distance::record_distance;
use crate::error::{Error, Result};
use crate::types::{ImageId, ImageRecord};

/// A visiting order over every record: a permutation of their ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    order: Vec<ImageId>,
}

impl Tour {
    pub fn ids(&self) -> &[ImageId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Build a nearest-neighbour tour over `records`.
///
/// Fewer than three records have only one sensible order, so they come back
/// unchanged. Ties go to the candidate that was discovered first.
pub fn build_tour(records: &[ImageRecord]) -> Result<Tour> {
    if records.is_empty() {
        return Err(Error::EmptyInput);
    }

    if records.len() < 3 {
        return Ok(Tour {
            order: records.iter().map(|r| r.id).collect(),
        });
    }

    let mut visited = vec![false; records.len()];
    let mut order = Vec::with_capacity(records.len());

    let mut current = 0;
    visited[current] = true;
    order.push(records[current].id);

    while order.len() < records.len() {
        let mut best: Option<(usize, f64)> = None;

        for (index, candidate) in records.iter().enumerate() {
            if visited[index] {
                continue;
            }
            let d = record_distance(&records[current], candidate);
            // Strictly closer only: equal distances keep the earlier candidate
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((index, d));
            }
        }

        // Loop condition guarantees at least one unvisited record
        let Some((next, d)) = best else { break };
        debug!(
            "Tour step {}: {} -> {} ({:.4})",
            order.len(),
            records[current].id,
            records[next].id,
            d
        );

        visited[next] = true;
        order.push(records[next].id);
        current = next;
    }

    Ok(Tour { order })
}
