use crate::{OrnamentError, Result, Rgb};

/// Coordinates of the "XMAS" glyph, listed in wiring order.
///
/// ```text
/// 04      05    13        21      30        42   43 - y=0
///   03  06    12 14     20 22    2931     41        - y=1
///     02      11  15   19  23   28  32        40    - y=2
///   01  07    10   16 18   24  27 33 34  36      39 - y=3
/// 00      08  09    17     25 26      35    37  38  - y=4
/// ```
const XMAS_LAYOUT: [(usize, usize); 44] = [
    // X
    (0, 4),
    (1, 3),
    (2, 2),
    (1, 1),
    (0, 0),
    (4, 0),
    (3, 1),
    (3, 3),
    (4, 4),
    // M
    (5, 4),
    (5, 3),
    (5, 2),
    (5, 1),
    (6, 0),
    (7, 1),
    (8, 2),
    (9, 3),
    (10, 4),
    (11, 3),
    (12, 2),
    (13, 1),
    (14, 0),
    (15, 2),
    (15, 1),
    (15, 3),
    (15, 4),
    // A
    (16, 4),
    (17, 3),
    (18, 2),
    (19, 1),
    (20, 0),
    (21, 1),
    (22, 2),
    (20, 3),
    (23, 3),
    (24, 4),
    // S
    (25, 3),
    (27, 4),
    (29, 4),
    (30, 3),
    (28, 2),
    (26, 1),
    (27, 0),
    (30, 0),
];

/// The ornament's built-in glyph layout.
pub fn xmas_layout() -> &'static [(usize, usize)] {
    &XMAS_LAYOUT
}

/// A single addressable light.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixel {
    chain_position: usize,
    x: usize,
    y: usize,
    pub color: Rgb,
}

impl Pixel {
    fn new(chain_position: usize, x: usize, y: usize) -> Self {
        Self {
            chain_position,
            x,
            y,
            color: Rgb::RED,
        }
    }

    pub fn chain_position(&self) -> usize {
        self.chain_position
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn set(&mut self, color: Rgb) {
        self.color = color;
    }

    pub fn dim(&mut self, amount: f32) {
        self.color = self.color.dimmed(amount);
    }
}

/// Fixed, ordered set of pixels plus the row and column groupings derived
/// from their coordinates.
///
/// Buckets hold chain positions rather than references so that patterns can
/// walk a row or column while mutating pixel colours.
#[derive(Debug, Clone)]
pub struct Chain {
    pixels: Vec<Pixel>,
    rows: Vec<Vec<usize>>,
    columns: Vec<Vec<usize>>,
}

impl Chain {
    /// Builds a chain from coordinates given in wiring order.
    pub fn build(coordinates: &[(usize, usize)]) -> Result<Self> {
        if coordinates.is_empty() {
            return Err(OrnamentError::InvalidLayout(
                "a chain needs at least one pixel",
            ));
        }

        let pixels: Vec<Pixel> = coordinates
            .iter()
            .enumerate()
            .map(|(position, &(x, y))| Pixel::new(position, x, y))
            .collect();

        let mut rows: Vec<Vec<usize>> = Vec::new();
        let mut columns: Vec<Vec<usize>> = Vec::new();
        for pixel in &pixels {
            if pixel.y >= rows.len() {
                rows.resize_with(pixel.y + 1, Vec::new);
            }
            rows[pixel.y].push(pixel.chain_position);

            if pixel.x >= columns.len() {
                columns.resize_with(pixel.x + 1, Vec::new);
            }
            columns[pixel.x].push(pixel.chain_position);
        }

        Ok(Self {
            pixels,
            rows,
            columns,
        })
    }

    /// Builds the ornament's "XMAS" glyph.
    pub fn xmas() -> Result<Self> {
        Self::build(xmas_layout())
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Chain positions bucketed by `y`, preserving chain order.
    pub fn rows(&self) -> &[Vec<usize>] {
        &self.rows
    }

    /// Chain positions bucketed by `x`, preserving chain order.
    pub fn columns(&self) -> &[Vec<usize>] {
        &self.columns
    }

    pub fn fill(&mut self, color: Rgb) {
        for pixel in &mut self.pixels {
            pixel.set(color);
        }
    }

    /// Snapshot view of the current colours.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            pixels: &self.pixels,
        }
    }
}

/// Point-in-time view of every pixel colour, handed to a renderer.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pixels: &'a [Pixel],
}

impl<'a> Frame<'a> {
    pub fn pixels(&self) -> &'a [Pixel] {
        self.pixels
    }

    pub fn colors(&self) -> impl Iterator<Item = Rgb> + 'a {
        self.pixels.iter().map(|pixel| pixel.color)
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}
