use kinetic_core::{MAX_GRID_CELLS, Vector2};

/// Uniform-cell broad phase over the current particle set.
///
/// Buckets hold indices into the engine's particle slice, not particles.
/// Cells tile the domain exactly: the cell extent is `domain / count`, so it
/// can be smaller than the requested size, but never below half of it once
/// the domain is at least one requested cell wide. With the engine's
/// `4 * radius` request that keeps cells >= one diameter, which is what the
/// 3x3 neighbourhood query needs to see every overlapping pair.
/// A domain that would need more than `MAX_GRID_CELLS` buckets is tiled with
/// coarser cells instead; larger cells never hide a contact.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    width: f64,
    height: f64,
    cols: usize,
    rows: usize,
    cell_width: f64,
    cell_height: f64,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(width: f64, height: f64, cell_size: f64) -> Self {
        let mut grid = Self {
            width,
            height,
            cols: 1,
            rows: 1,
            cell_width: width,
            cell_height: height,
            cells: Vec::new(),
        };
        grid.resize(width, height, cell_size);
        grid
    }

    /// Recompute the tiling and reallocate empty buckets.
    pub fn resize(&mut self, width: f64, height: f64, cell_size: f64) {
        let (cols, rows) = bounded_tiling(width, height, cell_size);
        self.width = width;
        self.height = height;
        self.cols = cols;
        self.rows = rows;
        self.cell_width = width / self.cols as f64;
        self.cell_height = height / self.rows as f64;
        self.cells = vec![Vec::new(); self.cols * self.rows];
    }

    /// Empty every bucket, keeping their allocations for the next rebuild.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    pub fn insert(&mut self, index: usize, position: Vector2) {
        let cell = self.cell_index(position);
        self.cells[cell].push(index);
    }

    /// Collect every index stored in the 3x3 block around `position`'s cell
    /// into `out` (cleared first). The block is clipped at the domain edges.
    pub fn potential_colliders_into(&self, position: Vector2, out: &mut Vec<usize>) {
        out.clear();
        let (col, row) = self.cell_coords(position);
        let row_range = row.saturating_sub(1)..=(row + 1).min(self.rows - 1);
        for r in row_range {
            let col_range = col.saturating_sub(1)..=(col + 1).min(self.cols - 1);
            for c in col_range {
                out.extend_from_slice(&self.cells[r * self.cols + c]);
            }
        }
    }

    /// Allocating variant of `potential_colliders_into`
    pub fn potential_colliders(&self, position: Vector2) -> Vec<usize> {
        let mut out = Vec::new();
        self.potential_colliders_into(position, &mut out);
        out
    }

    /// Flat `row * cols + col` id of the cell containing `position`, clamped into the grid
    pub fn cell_index(&self, position: Vector2) -> usize {
        let (col, row) = self.cell_coords(position);
        row * self.cols + col
    }

    fn cell_coords(&self, position: Vector2) -> (usize, usize) {
        (
            clamp_axis(position.x / self.cell_width, self.cols),
            clamp_axis(position.y / self.cell_height, self.rows),
        )
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Number of indices currently stored
    pub fn len(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Vec::is_empty)
    }
}

/// `max(1, ceil(extent / cell_size))`; degenerate sizes collapse to a single cell
fn axis_count(extent: f64, cell_size: f64) -> usize {
    let n = (extent / cell_size).ceil();
    if n.is_finite() && n >= 1.0 { n as usize } else { 1 }
}

/// Column and row counts for `cell_size`, doubling the size until the bucket
/// count fits in `MAX_GRID_CELLS`
fn bounded_tiling(width: f64, height: f64, cell_size: f64) -> (usize, usize) {
    let mut size = cell_size;
    loop {
        let cols = axis_count(width, size);
        let rows = axis_count(height, size);
        if cols.checked_mul(rows).is_some_and(|n| n <= MAX_GRID_CELLS) {
            return (cols, rows);
        }
        size *= 2.0;
    }
}

fn clamp_axis(scaled: f64, count: usize) -> usize {
    let cell = scaled.floor();
    // NaN fails both comparisons and lands in cell 0
    if cell > 0.0 {
        (cell as usize).min(count - 1)
    } else {
        0
    }
}
