use crate::grid::Layout;

/// Distance of a preset's bounding box from the grid origin.
pub const PRESET_MARGIN: u32 = 1;

/// Predefined patterns for initializing the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// A diagonal spaceship
    Glider,
    /// Gosper's puffer train, leaves debris behind as it travels
    Puffer,
    /// A small oscillator
    Blinker,
    /// A small oscillator
    Toad,
    /// A small stationary pattern
    Block,
    /// A horizontal spaceship
    LightweightSpaceship,
    /// A pattern that grows indefinitely
    GosperGliderGun,
}

const GLIDER: &[(u32, u32)] = &[
    (0, 1),
    (1, 2),
    (2, 0), (2, 1), (2, 2),
];

const PUFFER: &[(u32, u32)] = &[
    // Upper spaceship
    (3, 0),
    (4, 1),
    (0, 2), (4, 2),
    (1, 3), (2, 3), (3, 3), (4, 3),

    // Engine
    (0, 7),
    (1, 8), (2, 8),
    (2, 9),
    (2, 10),
    (1, 11),

    // Lower spaceship
    (3, 14),
    (4, 15),
    (0, 16), (4, 16),
    (1, 17), (2, 17), (3, 17), (4, 17),
];

const BLINKER: &[(u32, u32)] = &[(0, 0), (0, 1), (0, 2)];

const TOAD: &[(u32, u32)] = &[
    (1, 0), (2, 0), (3, 0),
    (0, 1), (1, 1), (2, 1),
];

const BLOCK: &[(u32, u32)] = &[(0, 0), (1, 0), (0, 1), (1, 1)];

const LIGHTWEIGHT_SPACESHIP: &[(u32, u32)] = &[
    (0, 1), (0, 3),
    (1, 0),
    (2, 0),
    (3, 0), (3, 3),
    (4, 0), (4, 1), (4, 2),
];

const GOSPER_GLIDER_GUN: &[(u32, u32)] = &[
    // Left block
    (0, 4), (0, 5),
    (1, 4), (1, 5),

    // Left ship
    (10, 4), (10, 5), (10, 6),
    (11, 3), (11, 7),
    (12, 2), (12, 8),
    (13, 2), (13, 8),
    (14, 5),
    (15, 3), (15, 7),
    (16, 4), (16, 5), (16, 6),
    (17, 5),

    // Right ship
    (20, 2), (20, 3), (20, 4),
    (21, 2), (21, 3), (21, 4),
    (22, 1), (22, 5),
    (24, 0), (24, 1), (24, 5), (24, 6),

    // Right block
    (34, 2), (34, 3),
    (35, 2), (35, 3),
];

impl Pattern {
    pub const ALL: [Pattern; 7] = [
        Pattern::Glider,
        Pattern::Puffer,
        Pattern::Blinker,
        Pattern::Toad,
        Pattern::Block,
        Pattern::LightweightSpaceship,
        Pattern::GosperGliderGun,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Glider => "Glider",
            Pattern::Puffer => "Puffer",
            Pattern::Blinker => "Blinker",
            Pattern::Toad => "Toad",
            Pattern::Block => "Block",
            Pattern::LightweightSpaceship => "Lightweight spaceship",
            Pattern::GosperGliderGun => "Gosper glider gun",
        }
    }

    /// Live cells as (x, y) offsets from the pattern's top-left corner
    pub fn cells(&self) -> &'static [(u32, u32)] {
        match self {
            Pattern::Glider => GLIDER,
            Pattern::Puffer => PUFFER,
            Pattern::Blinker => BLINKER,
            Pattern::Toad => TOAD,
            Pattern::Block => BLOCK,
            Pattern::LightweightSpaceship => LIGHTWEIGHT_SPACESHIP,
            Pattern::GosperGliderGun => GOSPER_GLIDER_GUN,
        }
    }

    /// Bounding box as (cols, rows)
    pub fn size(&self) -> (u32, u32) {
        self.cells()
            .iter()
            .fold((0, 0), |(w, h), &(x, y)| (w.max(x + 1), h.max(y + 1)))
    }

    /// Column-major layout of `cols` x `rows` with the pattern placed at
    /// `(origin_x, origin_y)`. Cells falling outside are dropped.
    pub fn layout(&self, cols: u32, rows: u32, origin_x: u32, origin_y: u32) -> Layout {
        let mut layout = vec![vec![0u8; rows as usize]; cols as usize];
        for &(x, y) in self.cells() {
            let (cx, cy) = (origin_x + x, origin_y + y);
            if cx < cols && cy < rows {
                layout[cx as usize][cy as usize] = 1;
            }
        }
        layout
    }

    /// Layout sized to the grid with the pattern at the standard margin
    pub fn preset_layout(&self, cols: u32, rows: u32) -> Layout {
        self.layout(cols, rows, PRESET_MARGIN, PRESET_MARGIN)
    }
}
