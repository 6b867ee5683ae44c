//! Nearest-site field construction by multi-source priority flood.
//!
//! Every site seeds the queue at its own cell. Popping always yields the globally closest
//! unresolved `(cell, site)` candidate, ties broken by ascending site index, so the first pop of
//! a cell fixes its owner and later candidates for it are discarded. Candidate priorities are
//! the true squared distance from the cell to the candidate site, not an accumulated path cost.
//!
//! Each site only grows from cells it already owns, so every site's cells form a 4-connected
//! set around its seed cell. The result is therefore not an exact discrete Voronoi diagram:
//! - Two sites whose positions round to the same seed cell collide there. The lower index takes
//!   the cell and the other site never expands, owning no cells at all, even where it is
//!   strictly nearer.
//! - Cells whose nearest site can only be reached through cells another site already won stay
//!   with that other site. These are rare and sit on region boundaries.
//!
//! A site inside the grid whose seed cell it shares with no other site always owns that cell.
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use glam::Vec2;
use tracing::debug;

use crate::field::grid::FieldGrid;
use crate::field::nearest::NearestSiteField;
use crate::site::Site;

#[derive(Clone, Copy, Debug)]
struct Candidate {
    priority: f32,
    owner: u32,
    cell: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// `BinaryHeap` is a max-heap: invert every key so the smallest priority, then the lowest owner,
// then the lowest cell index pops first.
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.owner.cmp(&self.owner))
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

/// Builds the nearest-site field for `sites` over `grid`.
///
/// Returns `None` when `sites` is empty. The returned field is freshly allocated; nothing else
/// is touched.
pub fn build_field(sites: &[Site], grid: &FieldGrid) -> Option<NearestSiteField> {
    if sites.is_empty() || grid.is_empty() {
        return None;
    }
    debug_assert!(sites.len() <= u32::MAX as usize);

    let cells = grid.len();
    let mut owners = vec![0u32; cells];
    let mut visited = vec![false; cells];
    let mut queue = BinaryHeap::with_capacity(cells.min(1 << 16) + sites.len());

    for (index, site) in sites.iter().enumerate() {
        let ((ix, iy), inside) = grid.seed_cell(site.position);
        let priority = if inside {
            0.0
        } else {
            grid.cell_to_surface(ix, iy).distance_squared(site.position)
        };
        queue.push(Candidate {
            priority,
            owner: index as u32,
            cell: grid.index(ix, iy),
        });
    }

    let mut pushed = sites.len();
    let mut discarded = 0usize;

    while let Some(candidate) = queue.pop() {
        if visited[candidate.cell] {
            discarded += 1;
            continue;
        }
        visited[candidate.cell] = true;
        owners[candidate.cell] = candidate.owner;

        let origin = sites[candidate.owner as usize].position;
        let (x, y) = grid.coords(candidate.cell);
        for (nx, ny) in neighbours(x, y) {
            if !grid.contains(nx, ny) {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            let cell = grid.index(nx, ny);
            if visited[cell] {
                continue;
            }
            queue.push(Candidate {
                priority: squared_distance(grid.cell_to_surface(nx, ny), origin),
                owner: candidate.owner,
                cell,
            });
            pushed += 1;
        }
    }

    debug!(
        "Built nearest-site field {}x{} for {} sites ({} candidates, {} discarded).",
        grid.width,
        grid.height,
        sites.len(),
        pushed,
        discarded
    );

    Some(NearestSiteField::new(grid.clone(), owners))
}

/// Squared Euclidean distance used for every field priority.
#[inline]
pub fn squared_distance(a: Vec2, b: Vec2) -> f32 {
    let d = a - b;
    d.x * d.x + d.y * d.y
}

#[inline]
fn neighbours(x: usize, y: usize) -> [(isize, isize); 4] {
    let (x, y) = (x as isize, y as isize);
    [(x, y - 1), (x - 1, y), (x + 1, y), (x, y + 1)]
}
