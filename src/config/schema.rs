//! Schema binding: dotted-key document to typed configuration.
//!
//! Each namespace is bound by explicit field enumeration. Integers are
//! coerced to floats where the schema calls for a numeric field; everything
//! else must match its declared type exactly. All errors carry the dotted
//! key path of the offending setting.

use toml::Value;

use crate::domain::document::{type_name, FlowDocument};
use crate::domain::{FlowError, TimeValue};

use super::types::{
    BuildSystem, ClockConstraint, CoreConfig, DelayConstraint, DelayDirection, FlowConfig,
    InputsConfig, Margins, PinAssignment, PinConfig, PinMode, PinSide, PlacementConstraint,
    PlacementType, VlsiConfig,
};

/// Bind a parsed document to a typed `FlowConfig`.
pub fn bind(doc: &FlowDocument) -> Result<FlowConfig, FlowError> {
    Ok(FlowConfig {
        debug: opt_bool(doc, "debug")?.unwrap_or(false),
        vlsi: VlsiConfig {
            core: bind_core(doc)?,
            inputs: bind_inputs(doc)?,
        },
    })
}

fn bind_core(doc: &FlowDocument) -> Result<CoreConfig, FlowError> {
    Ok(CoreConfig {
        build_system: opt_enum(
            doc,
            "vlsi.core.build_system",
            BuildSystem::parse,
            BuildSystem::ALL,
        )?
        .unwrap_or_default(),
        synthesis_tool: opt_string(doc, "vlsi.core.synthesis_tool")?,
        par_tool: opt_string(doc, "vlsi.core.par_tool")?,
        technology: opt_string(doc, "vlsi.core.technology")?,
    })
}

fn bind_inputs(doc: &FlowDocument) -> Result<InputsConfig, FlowError> {
    let clocks = entries(doc, "vlsi.inputs.clocks")?
        .iter()
        .map(bind_clock)
        .collect::<Result<Vec<_>, _>>()?;

    let placement_constraints = entries(doc, "vlsi.inputs.placement_constraints")?
        .iter()
        .map(bind_placement)
        .collect::<Result<Vec<_>, _>>()?;

    let delays = entries(doc, "vlsi.inputs.delays")?
        .iter()
        .map(bind_delay)
        .collect::<Result<Vec<_>, _>>()?;

    let assignments = entries(doc, "vlsi.inputs.pin.assignments")?
        .iter()
        .map(bind_pin_assignment)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(InputsConfig {
        pin_mode: opt_enum(doc, "vlsi.inputs.pin_mode", PinMode::parse, PinMode::ALL)?
            .unwrap_or_default(),
        clocks,
        placement_constraints,
        delays,
        pin: PinConfig { assignments },
    })
}

fn bind_clock(entry: &Entry<'_>) -> Result<ClockConstraint, FlowError> {
    Ok(ClockConstraint {
        name: entry.req_str("name")?,
        period: entry.req_time("period")?,
        uncertainty: entry.opt_time("uncertainty")?,
    })
}

fn bind_placement(entry: &Entry<'_>) -> Result<PlacementConstraint, FlowError> {
    let kind = entry.req_enum("type", PlacementType::parse, PlacementType::ALL)?;
    let margins = match entry.sub_table("margins")? {
        Some(sub) => Some(bind_margins(&sub)?),
        // A toplevel constraint fixes the die boundary; its margins are not optional.
        None if kind == PlacementType::Toplevel => {
            return Err(FlowError::missing(entry.field_key("margins")));
        }
        None => None,
    };

    Ok(PlacementConstraint {
        path: entry.req_str("path")?,
        kind,
        x: entry.req_f64("x")?,
        y: entry.req_f64("y")?,
        width: entry.req_f64("width")?,
        height: entry.req_f64("height")?,
        margins,
    })
}

fn bind_margins(entry: &Entry<'_>) -> Result<Margins, FlowError> {
    Ok(Margins {
        left: entry.req_f64("left")?,
        right: entry.req_f64("right")?,
        top: entry.req_f64("top")?,
        bottom: entry.req_f64("bottom")?,
    })
}

fn bind_pin_assignment(entry: &Entry<'_>) -> Result<PinAssignment, FlowError> {
    Ok(PinAssignment {
        pins: entry.req_str("pins")?,
        layers: entry.req_str_array("layers")?,
        side: entry.req_enum("side", PinSide::parse, PinSide::ALL)?,
    })
}

fn bind_delay(entry: &Entry<'_>) -> Result<DelayConstraint, FlowError> {
    Ok(DelayConstraint {
        name: entry.req_str("name")?,
        clock: entry.req_str("clock")?,
        delay: entry.req_time("delay")?,
        direction: entry.req_enum("direction", DelayDirection::parse, DelayDirection::ALL)?,
    })
}

/// One table out of an array-of-tables setting, with its key path.
struct Entry<'a> {
    key: String,
    table: &'a toml::Table,
}

impl<'a> Entry<'a> {
    fn field_key(&self, field: &str) -> String {
        format!("{}.{}", self.key, field)
    }

    fn req(&self, field: &str) -> Result<&'a Value, FlowError> {
        self.table
            .get(field)
            .ok_or_else(|| FlowError::missing(self.field_key(field)))
    }

    fn req_str(&self, field: &str) -> Result<String, FlowError> {
        match self.req(field)? {
            Value::String(s) => Ok(s.clone()),
            other => Err(FlowError::TypeMismatch {
                key: self.field_key(field),
                expected: "string",
                found: type_name(other),
            }),
        }
    }

    /// Numeric field; integers are coerced to floats.
    fn req_f64(&self, field: &str) -> Result<f64, FlowError> {
        match self.req(field)? {
            Value::Float(f) => Ok(*f),
            Value::Integer(i) => Ok(*i as f64),
            other => Err(FlowError::TypeMismatch {
                key: self.field_key(field),
                expected: "number",
                found: type_name(other),
            }),
        }
    }

    fn req_time(&self, field: &str) -> Result<TimeValue, FlowError> {
        parse_time(&self.field_key(field), self.req(field)?)
    }

    fn opt_time(&self, field: &str) -> Result<Option<TimeValue>, FlowError> {
        match self.table.get(field) {
            None => Ok(None),
            Some(value) => parse_time(&self.field_key(field), value).map(Some),
        }
    }

    fn req_enum<T>(
        &self,
        field: &str,
        parse: fn(&str) -> Option<T>,
        allowed: &[&str],
    ) -> Result<T, FlowError> {
        let raw = self.req_str(field)?;
        parse(&raw).ok_or_else(|| FlowError::UnknownEnumValue {
            key: self.field_key(field),
            value: raw,
            allowed: allowed.join(", "),
        })
    }

    fn req_str_array(&self, field: &str) -> Result<Vec<String>, FlowError> {
        match self.req(field)? {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(FlowError::TypeMismatch {
                        key: format!("{}[{}]", self.field_key(field), i),
                        expected: "string",
                        found: type_name(other),
                    }),
                })
                .collect(),
            other => Err(FlowError::TypeMismatch {
                key: self.field_key(field),
                expected: "array of strings",
                found: type_name(other),
            }),
        }
    }

    /// Nested inline table, e.g. `margins = { left = 0.0, ... }`.
    fn sub_table(&self, field: &str) -> Result<Option<Entry<'a>>, FlowError> {
        match self.table.get(field) {
            None => Ok(None),
            Some(Value::Table(table)) => Ok(Some(Entry {
                key: self.field_key(field),
                table,
            })),
            Some(other) => Err(FlowError::TypeMismatch {
                key: self.field_key(field),
                expected: "table",
                found: type_name(other),
            }),
        }
    }
}

fn parse_time(key: &str, value: &Value) -> Result<TimeValue, FlowError> {
    match value {
        Value::String(s) => {
            TimeValue::parse(s).map_err(|reason| FlowError::invalid(key.to_string(), reason))
        }
        other => Err(FlowError::TypeMismatch {
            key: key.to_string(),
            expected: "time string (e.g. \"2ns\")",
            found: type_name(other),
        }),
    }
}

fn opt_bool(doc: &FlowDocument, key: &str) -> Result<Option<bool>, FlowError> {
    match doc.get(key) {
        None => Ok(None),
        Some(Value::Boolean(b)) => Ok(Some(*b)),
        Some(other) => Err(FlowError::TypeMismatch {
            key: key.to_string(),
            expected: "boolean",
            found: type_name(other),
        }),
    }
}

fn opt_string(doc: &FlowDocument, key: &str) -> Result<Option<String>, FlowError> {
    match doc.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(FlowError::TypeMismatch {
            key: key.to_string(),
            expected: "string",
            found: type_name(other),
        }),
    }
}

fn opt_enum<T>(
    doc: &FlowDocument,
    key: &str,
    parse: fn(&str) -> Option<T>,
    allowed: &[&str],
) -> Result<Option<T>, FlowError> {
    match opt_string(doc, key)? {
        None => Ok(None),
        Some(raw) => parse(&raw)
            .map(Some)
            .ok_or_else(|| FlowError::UnknownEnumValue {
                key: key.to_string(),
                value: raw,
                allowed: allowed.join(", "),
            }),
    }
}

/// Extract array-of-tables entries at a dotted key; absent means empty.
fn entries<'a>(doc: &'a FlowDocument, key: &str) -> Result<Vec<Entry<'a>>, FlowError> {
    match doc.get(key) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Table(table) => Ok(Entry {
                    key: format!("{}[{}]", key, i),
                    table,
                }),
                other => Err(FlowError::TypeMismatch {
                    key: format!("{}[{}]", key, i),
                    expected: "table",
                    found: type_name(other),
                }),
            })
            .collect(),
        Some(other) => Err(FlowError::TypeMismatch {
            key: key.to_string(),
            expected: "array of tables",
            found: type_name(other),
        }),
    }
}
