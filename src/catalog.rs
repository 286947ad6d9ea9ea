//! Fixed symbol and background catalog
//!
//! The set of insertable symbols and pitch backgrounds is versioned with
//! the crate: assets are embedded at build time and enumerated here, not
//! configurable by the host.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::domain::Point;
use crate::error::EditorError;

/// Insertable iconography, one entry per toolbar symbol
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolKind {
    Player,
    Coach,
    Dummy,
    /// Vector jersey outline, filled with the active color on insert
    Jersey,
    Ball,
    Goal,
    /// Same goal asset at half insertion width
    MiniGoal,
    Flag,
    Cone,
    Disc,
    Pole,
    Ladder,
    Hurdle,
    Ring,
}

impl SymbolKind {
    pub const ALL: [SymbolKind; 14] = [
        SymbolKind::Player,
        SymbolKind::Coach,
        SymbolKind::Dummy,
        SymbolKind::Jersey,
        SymbolKind::Ball,
        SymbolKind::Goal,
        SymbolKind::MiniGoal,
        SymbolKind::Flag,
        SymbolKind::Cone,
        SymbolKind::Disc,
        SymbolKind::Pole,
        SymbolKind::Ladder,
        SymbolKind::Hurdle,
        SymbolKind::Ring,
    ];

    /// Stable name used in notices and logs
    pub fn name(self) -> &'static str {
        match self {
            SymbolKind::Player => "player",
            SymbolKind::Coach => "coach",
            SymbolKind::Dummy => "dummy",
            SymbolKind::Jersey => "jersey",
            SymbolKind::Ball => "ball",
            SymbolKind::Goal => "goal",
            SymbolKind::MiniGoal => "mini_goal",
            SymbolKind::Flag => "flag",
            SymbolKind::Cone => "cone",
            SymbolKind::Disc => "disc",
            SymbolKind::Pole => "pole",
            SymbolKind::Ladder => "ladder",
            SymbolKind::Hurdle => "hurdle",
            SymbolKind::Ring => "ring",
        }
    }

    /// Width the symbol is inserted at, in canvas units
    pub fn insert_width(self) -> f32 {
        match self {
            SymbolKind::Player => 45.0,
            SymbolKind::Coach => 40.0,
            SymbolKind::Dummy => 45.0,
            SymbolKind::Jersey => 40.0,
            SymbolKind::Ball => 30.0,
            SymbolKind::Goal => 120.0,
            SymbolKind::MiniGoal => 60.0,
            SymbolKind::Flag => 35.0,
            SymbolKind::Cone => 35.0,
            SymbolKind::Disc => 25.0,
            SymbolKind::Pole => 35.0,
            SymbolKind::Ladder => 80.0,
            SymbolKind::Hurdle => 50.0,
            SymbolKind::Ring => 30.0,
        }
    }

    /// Width over height of the source asset
    pub fn aspect_ratio(self) -> f32 {
        let (w, h) = self.native_size();
        w as f32 / h as f32
    }

    /// Pixel dimensions of the embedded asset (bounding box for Jersey)
    pub fn native_size(self) -> (u32, u32) {
        match self {
            SymbolKind::Ball | SymbolKind::Cone | SymbolKind::Ring => (64, 64),
            SymbolKind::Disc => (64, 40),
            SymbolKind::Goal | SymbolKind::MiniGoal => (120, 64),
            SymbolKind::Hurdle => (96, 64),
            SymbolKind::Jersey => (50, 44),
            SymbolKind::Player
            | SymbolKind::Coach
            | SymbolKind::Dummy
            | SymbolKind::Flag
            | SymbolKind::Pole
            | SymbolKind::Ladder => (64, 96),
        }
    }

    /// Embedded PNG bytes, `None` for the vector jersey
    fn asset_bytes(self) -> Option<&'static [u8]> {
        Some(match self {
            SymbolKind::Player => &include_bytes!("../assets/img/player.png")[..],
            SymbolKind::Coach => include_bytes!("../assets/img/coach.png"),
            SymbolKind::Dummy => include_bytes!("../assets/img/dummy.png"),
            SymbolKind::Jersey => return None,
            SymbolKind::Ball => include_bytes!("../assets/img/ball.png"),
            SymbolKind::Goal | SymbolKind::MiniGoal => include_bytes!("../assets/img/goal.png"),
            SymbolKind::Flag => include_bytes!("../assets/img/flag.png"),
            SymbolKind::Cone => include_bytes!("../assets/img/cone.png"),
            SymbolKind::Disc => include_bytes!("../assets/img/disc.png"),
            SymbolKind::Pole => include_bytes!("../assets/img/pole.png"),
            SymbolKind::Ladder => include_bytes!("../assets/img/ladder.png"),
            SymbolKind::Hurdle => include_bytes!("../assets/img/hurdle.png"),
            SymbolKind::Ring => include_bytes!("../assets/img/ring.png"),
        })
    }

    /// Whether this symbol inserts as a bitmap object
    pub fn is_bitmap(self) -> bool {
        !matches!(self, SymbolKind::Jersey)
    }

    /// Decode the embedded asset
    ///
    /// Insertion must go through this before the object is added so a
    /// broken asset aborts cleanly instead of leaving an empty object.
    /// Vector symbols carry no bitmap asset and report [`EditorError::NotABitmap`];
    /// a loaded snapshot may pair them with the bitmap kind, so this
    /// must stay an error rather than a panic.
    pub fn load_image(self) -> Result<RgbaImage, EditorError> {
        let Some(bytes) = self.asset_bytes() else {
            return Err(EditorError::NotABitmap(self.name()));
        };
        image::load_from_memory(bytes)
            .map(|img| img.to_rgba8())
            .map_err(|source| EditorError::AssetDecode {
                name: self.name(),
                source,
            })
    }

    /// Closed outline of the vector jersey, centered on the origin
    pub fn jersey_outline() -> Vec<Point> {
        // Simplified t-shirt silhouette, 50 wide by 44 tall
        [
            (-9.0, -22.0),
            (9.0, -22.0),
            (25.0, -14.0),
            (21.0, -2.0),
            (13.0, -6.0),
            (13.0, 22.0),
            (-13.0, 22.0),
            (-13.0, -6.0),
            (-21.0, -2.0),
            (-25.0, -14.0),
        ]
        .into_iter()
        .map(|(x, y)| Point::new(x, y))
        .collect()
    }
}

/// Field background variants, index 0 is the default
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pitch {
    #[default]
    Field1,
    Field2,
    Field3,
    Hall,
}

impl Pitch {
    pub const ALL: [Pitch; 4] = [Pitch::Field1, Pitch::Field2, Pitch::Field3, Pitch::Hall];

    /// Display name for the background selector
    pub fn name(self) -> &'static str {
        match self {
            Pitch::Field1 => "Standard (Field 1)",
            Pitch::Field2 => "Field 2",
            Pitch::Field3 => "Field 3",
            Pitch::Hall => "Indoor hall",
        }
    }

    /// Look up a background by catalog index
    pub fn from_index(index: usize) -> Result<Pitch, EditorError> {
        Pitch::ALL
            .get(index)
            .copied()
            .ok_or(EditorError::UnknownBackground(index))
    }

    fn asset_bytes(self) -> &'static [u8] {
        match self {
            Pitch::Field1 => include_bytes!("../assets/img/field1.png"),
            Pitch::Field2 => include_bytes!("../assets/img/field2.png"),
            Pitch::Field3 => include_bytes!("../assets/img/field3.png"),
            Pitch::Hall => include_bytes!("../assets/img/hall.png"),
        }
    }

    /// Decode the embedded background image
    pub fn load_image(self) -> Result<RgbaImage, EditorError> {
        image::load_from_memory(self.asset_bytes())
            .map(|img| img.to_rgba8())
            .map_err(|source| EditorError::AssetDecode {
                name: self.name(),
                source,
            })
    }
}
