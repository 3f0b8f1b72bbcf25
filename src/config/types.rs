//! Typed flow configuration model.
//!
//! The structures here are built once by the schema binder at load time and
//! are immutable afterwards. Field order matters for TOML serialization:
//! plain values come before tables and arrays of tables within each struct.

use serde::Serialize;

use crate::domain::TimeValue;

/// Fully bound and typed flow configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowConfig {
    /// Enables file logging, same as the `--debug` flag
    #[serde(skip_serializing_if = "is_false")]
    pub debug: bool,

    pub vlsi: VlsiConfig,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl FlowConfig {
    /// Names of all declared clocks, in declaration order.
    pub fn clock_names(&self) -> Vec<&str> {
        self.vlsi
            .inputs
            .clocks
            .iter()
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// The `vlsi` namespace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VlsiConfig {
    pub core: CoreConfig,
    pub inputs: InputsConfig,
}

/// Tool and build-system selections (`vlsi.core`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoreConfig {
    pub build_system: BuildSystem,

    /// Synthesis tool plugin name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthesis_tool: Option<String>,

    /// Place-and-route tool plugin name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub par_tool: Option<String>,

    /// Technology/PDK name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technology: Option<String>,
}

/// Design inputs and constraints (`vlsi.inputs`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputsConfig {
    pub pin_mode: PinMode,
    pub clocks: Vec<ClockConstraint>,
    pub placement_constraints: Vec<PlacementConstraint>,
    pub delays: Vec<DelayConstraint>,
    pub pin: PinConfig,
}

/// Timing specification for a named clock signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockConstraint {
    pub name: String,
    pub period: TimeValue,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncertainty: Option<TimeValue>,
}

/// Placement of one instance, macro, or obstruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementConstraint {
    /// Hierarchical instance path, e.g. `ChipTop/core/dcache`
    pub path: String,

    #[serde(rename = "type")]
    pub kind: PlacementType,

    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,

    /// Keep-out margins; required for `toplevel` constraints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margins: Option<Margins>,
}

/// Keep-out margins around a placement constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Pin assignments (`vlsi.inputs.pin`).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PinConfig {
    pub assignments: Vec<PinAssignment>,
}

/// Assignment of a group of pins to metal layers on one chip side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PinAssignment {
    /// Pin name pattern, wildcard `*` matches any sequence
    pub pins: String,

    /// Metal layers the pins may be placed on
    pub layers: Vec<String>,

    pub side: PinSide,
}

/// Input/output delay budget relative to a declared clock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelayConstraint {
    pub name: String,

    /// Must reference a declared clock by name
    pub clock: String,

    pub delay: TimeValue,
    pub direction: DelayDirection,
}

/// Build system used to drive the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildSystem {
    #[default]
    None,
    Make,
}

impl BuildSystem {
    pub const ALL: &'static [&'static str] = &["none", "make"];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(BuildSystem::None),
            "make" => Some(BuildSystem::Make),
            _ => None,
        }
    }
}

/// Kind of a placement constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementType {
    Toplevel,
    Placement,
    HardMacro,
    Hierarchical,
    Obstruction,
    Dummy,
}

impl PlacementType {
    pub const ALL: &'static [&'static str] = &[
        "toplevel",
        "placement",
        "hardmacro",
        "hierarchical",
        "obstruction",
        "dummy",
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "toplevel" => Some(PlacementType::Toplevel),
            "placement" => Some(PlacementType::Placement),
            "hardmacro" => Some(PlacementType::HardMacro),
            "hierarchical" => Some(PlacementType::Hierarchical),
            "obstruction" => Some(PlacementType::Obstruction),
            "dummy" => Some(PlacementType::Dummy),
            _ => None,
        }
    }
}

/// How pin assignments are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PinMode {
    #[default]
    None,
    Generated,
    Auto,
}

impl PinMode {
    pub const ALL: &'static [&'static str] = &["none", "generated", "auto"];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(PinMode::None),
            "generated" => Some(PinMode::Generated),
            "auto" => Some(PinMode::Auto),
            _ => None,
        }
    }
}

/// Chip side a pin group is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PinSide {
    Top,
    Bottom,
    Left,
    Right,
    Internal,
}

impl PinSide {
    pub const ALL: &'static [&'static str] = &["top", "bottom", "left", "right", "internal"];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "top" => Some(PinSide::Top),
            "bottom" => Some(PinSide::Bottom),
            "left" => Some(PinSide::Left),
            "right" => Some(PinSide::Right),
            "internal" => Some(PinSide::Internal),
            _ => None,
        }
    }
}

/// Direction of a delay constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DelayDirection {
    Input,
    Output,
}

impl DelayDirection {
    pub const ALL: &'static [&'static str] = &["input", "output"];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "input" => Some(DelayDirection::Input),
            "output" => Some(DelayDirection::Output),
            _ => None,
        }
    }
}
