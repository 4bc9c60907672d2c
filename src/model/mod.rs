//! Cable domain model
//!
//! The object graph a label template can traverse. The renderer treats this
//! graph as a read-only view; optional relationships serialize to `null` so
//! templates must guard them with `default(...)` or a conditional.

use serde::{Deserialize, Serialize};

/// Store-assigned cable identifier (SQLite rowid)
pub type CableId = i64;

/// A cable connecting an A-side and a B-side set of terminations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cable {
    /// Assigned by the store on first insert; `None` for unsaved cables
    #[serde(default)]
    pub pk: Option<CableId>,

    /// Human-readable label; empty means "not labeled yet"
    #[serde(default)]
    pub label: String,

    /// Cable type, e.g. "cat6a" or "mmf-om4"
    #[serde(rename = "type", default)]
    pub cable_type: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub color: Option<String>,

    /// Length in `length_unit` units
    #[serde(default)]
    pub length: Option<i64>,

    #[serde(default)]
    pub length_unit: Option<String>,

    #[serde(default)]
    pub a_terminations: Vec<Termination>,

    #[serde(default)]
    pub b_terminations: Vec<Termination>,
}

impl Cable {
    /// Whether the cable has no label assigned
    pub fn is_unlabeled(&self) -> bool {
        self.label.is_empty()
    }
}

impl std::fmt::Display for Cable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.label.is_empty() {
            write!(f, "{}", self.label)
        } else if let Some(pk) = self.pk {
            write!(f, "#{}", pk)
        } else {
            write!(f, "(unsaved)")
        }
    }
}

/// One endpoint of a cable: a port on a device
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Termination {
    /// Port name, e.g. "gi1/0/1"
    pub name: String,
    pub device: Device,
}

/// The device a termination lands on
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Device {
    pub name: String,

    #[serde(default)]
    pub site: Option<Site>,

    #[serde(default)]
    pub location: Option<Location>,

    #[serde(default)]
    pub rack: Option<Rack>,

    /// Rack unit position
    #[serde(default)]
    pub position: Option<i64>,

    /// Rack face, "front" or "rear"
    #[serde(default)]
    pub face: Option<String>,

    #[serde(default)]
    pub device_type: Option<DeviceType>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Site {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rack {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceType {
    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub manufacturer: Option<Manufacturer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manufacturer {
    pub name: String,
}
