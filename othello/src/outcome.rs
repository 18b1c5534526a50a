use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{Board, Color};

/// How many discs each color has on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorCounts {
    pub dark: usize,
    pub light: usize,
}

impl ColorCounts {
    pub fn get(&self, color: Color) -> usize {
        match color {
            Color::Dark => self.dark,
            Color::Light => self.light,
        }
    }

    /// The number of occupied squares.
    pub fn total(&self) -> usize {
        self.dark + self.light
    }
}

impl Board {
    pub fn count_by_color(&self) -> ColorCounts {
        let mut counts = ColorCounts::default();
        for (_, cell) in self.iter() {
            match cell {
                Some(Color::Dark) => counts.dark += 1,
                Some(Color::Light) => counts.light += 1,
                None => {}
            }
        }
        counts
    }

    /// The color with more discs, or `None` for a draw.
    ///
    /// This does not check whether the game is actually over.
    pub fn winner(&self) -> Option<Color> {
        let ColorCounts { dark, light } = self.count_by_color();
        match dark.cmp(&light) {
            Ordering::Less => Some(Color::Light),
            Ordering::Equal => None,
            Ordering::Greater => Some(Color::Dark),
        }
    }
}
