use crate::{Board, Color, Move};

/// Positional classification of a square, by its distance from the edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    /// Both coordinates on an edge.
    Corner,
    /// One coordinate on an edge, the other not next to a corner.
    Edge,
    /// Both coordinates one step in from an edge, diagonally touching a corner.
    CornerAdjacent,
    /// One coordinate one step in from an edge.
    EdgeAdjacent,
    /// Both coordinates two steps in from an edge.
    CornerAdjacentAdjacent,
    /// One coordinate two steps in from an edge.
    EdgeAdjacentAdjacent,
}

impl Zone {
    /// Classifies a square of a board with the given side length.
    ///
    /// Earlier zones take precedence over later ones. Squares further in than
    /// two steps from every edge belong to no zone.
    pub fn classify(size: usize, mv: Move) -> Option<Zone> {
        let last = size as i32 - 1;
        let ring = |idx: i32, depth: i32| idx == depth || idx == last - depth;
        let (row, col) = (mv.row, mv.col);

        if ring(row, 0) && ring(col, 0) {
            Some(Zone::Corner)
        } else if (ring(row, 0) && !ring(col, 1)) || (ring(col, 0) && !ring(row, 1)) {
            Some(Zone::Edge)
        } else if ring(row, 1) && ring(col, 1) {
            Some(Zone::CornerAdjacent)
        } else if ring(row, 1) || ring(col, 1) {
            Some(Zone::EdgeAdjacent)
        } else if ring(row, 2) && ring(col, 2) {
            Some(Zone::CornerAdjacentAdjacent)
        } else if ring(row, 2) || ring(col, 2) {
            Some(Zone::EdgeAdjacentAdjacent)
        } else {
            None
        }
    }
}

/// How many discs of one color lie in each zone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ZoneCounts {
    pub corner: u32,
    pub edge: u32,
    pub corner_adjacent: u32,
    pub edge_adjacent: u32,
    pub corner_adjacent_adjacent: u32,
    pub edge_adjacent_adjacent: u32,
}

impl ZoneCounts {
    fn add(&mut self, zone: Zone) {
        let counter = match zone {
            Zone::Corner => &mut self.corner,
            Zone::Edge => &mut self.edge,
            Zone::CornerAdjacent => &mut self.corner_adjacent,
            Zone::EdgeAdjacent => &mut self.edge_adjacent,
            Zone::CornerAdjacentAdjacent => &mut self.corner_adjacent_adjacent,
            Zone::EdgeAdjacentAdjacent => &mut self.edge_adjacent_adjacent,
        };
        *counter += 1;
    }
}

/// Zone counts for both colors on one board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ZoneTally {
    pub dark: ZoneCounts,
    pub light: ZoneCounts,
}

impl ZoneTally {
    pub fn of(board: &Board) -> Self {
        let mut tally = ZoneTally::default();
        for (mv, cell) in board.iter() {
            let (Some(color), Some(zone)) = (cell, Zone::classify(board.size(), mv)) else {
                continue;
            };
            match color {
                Color::Dark => tally.dark.add(zone),
                Color::Light => tally.light.add(zone),
            }
        }
        tally
    }

    pub fn get(&self, color: Color) -> &ZoneCounts {
        match color {
            Color::Dark => &self.dark,
            Color::Light => &self.light,
        }
    }
}
