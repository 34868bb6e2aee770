//! Persisted layout records

use crate::geometry::Rect;
use crate::placement::RunResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Final position of one image, persisted as `[x, y, height, width]`
///
/// The height-before-width order is part of the file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct Slot {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Height in pixels
    pub height: i32,
    /// Width in pixels
    pub width: i32,
}

impl From<[i32; 4]> for Slot {
    fn from([x, y, height, width]: [i32; 4]) -> Self {
        Self {
            x,
            y,
            height,
            width,
        }
    }
}

impl From<Slot> for [i32; 4] {
    fn from(slot: Slot) -> Self {
        [slot.x, slot.y, slot.height, slot.width]
    }
}

impl From<Rect> for Slot {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            height: rect.h,
            width: rect.w,
        }
    }
}

impl From<Slot> for Rect {
    fn from(slot: Slot) -> Self {
        Self::new(slot.x, slot.y, slot.width, slot.height)
    }
}

/// One ranked layout in the dataset
///
/// Serialized field order is the declaration order below. The rank is stored
/// under `top_collage`; `rank` is accepted on load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// 1-based position by descending fill percentage, 0 until merged
    #[serde(rename = "top_collage", alias = "rank", default)]
    pub rank: usize,
    /// Percentage of the canvas covered by unpadded images
    #[serde(default)]
    pub fill_pct: f64,
    /// Mean placed width
    #[serde(default)]
    pub avg_w: f64,
    /// Mean placed height
    #[serde(default)]
    pub avg_h: f64,
    /// Placement per image identifier
    #[serde(default)]
    pub image_data: BTreeMap<String, Slot>,
    /// Any other keys found on load, written back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Unranked record for a finished run
    pub fn from_run(run: &RunResult) -> Self {
        Self {
            rank: 0,
            fill_pct: run.fill_pct(),
            avg_w: run.avg_w(),
            avg_h: run.avg_h(),
            image_data: run
                .image_data()
                .into_iter()
                .map(|(id, rect)| (id, Slot::from(rect)))
                .collect(),
            extra: Map::new(),
        }
    }

    /// Placed rectangles in identifier order
    pub fn rects(&self) -> Vec<Rect> {
        self.image_data.values().copied().map(Rect::from).collect()
    }
}
