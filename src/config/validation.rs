//! Configuration validation.
//!
//! Cross-field invariants that the schema binder cannot express: reference
//! integrity between delays and clocks, name/path well-formedness, and
//! non-negative geometry.

use std::collections::BTreeSet;

use regex::Regex;

use crate::domain::FlowError;

use super::types::{FlowConfig, PlacementType};

/// Validate a bound configuration.
pub fn validate(config: &FlowConfig) -> Result<(), FlowError> {
    // Signal and constraint names: plain identifiers.
    let name_re = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$")?;
    // Hierarchical instance paths: identifiers separated by '/'.
    let path_re = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(/[A-Za-z_][A-Za-z0-9_]*)*$")?;

    let mut seen_clocks = BTreeSet::new();
    for (i, clock) in config.vlsi.inputs.clocks.iter().enumerate() {
        let key = format!("vlsi.inputs.clocks[{}]", i);
        check_name(&name_re, &format!("{}.name", key), &clock.name)?;
        if !seen_clocks.insert(clock.name.as_str()) {
            return Err(FlowError::invalid(
                format!("{}.name", key),
                format!("duplicate clock name '{}'", clock.name),
            ));
        }
        if clock.period.femtoseconds() <= 0.0 {
            return Err(FlowError::invalid(
                format!("{}.period", key),
                "clock period must be positive",
            ));
        }
        if let Some(uncertainty) = clock.uncertainty {
            if uncertainty.femtoseconds() >= clock.period.femtoseconds() {
                return Err(FlowError::invalid(
                    format!("{}.uncertainty", key),
                    "uncertainty must be smaller than the clock period",
                ));
            }
        }
    }

    for (i, placement) in config.vlsi.inputs.placement_constraints.iter().enumerate() {
        let key = format!("vlsi.inputs.placement_constraints[{}]", i);

        if placement.path.is_empty() {
            return Err(FlowError::invalid(format!("{}.path", key), "path cannot be empty"));
        }
        if !path_re.is_match(&placement.path) {
            return Err(FlowError::invalid(
                format!("{}.path", key),
                format!("'{}' is not a valid instance path", placement.path),
            ));
        }
        // Toplevel constraints fix the die origin.
        if placement.kind == PlacementType::Toplevel && (placement.x != 0.0 || placement.y != 0.0)
        {
            return Err(FlowError::invalid(
                format!("{}.x", key),
                "toplevel constraint must be placed at the origin",
            ));
        }

        non_negative(&format!("{}.x", key), placement.x)?;
        non_negative(&format!("{}.y", key), placement.y)?;
        non_negative(&format!("{}.width", key), placement.width)?;
        non_negative(&format!("{}.height", key), placement.height)?;
        if let Some(margins) = &placement.margins {
            non_negative(&format!("{}.margins.left", key), margins.left)?;
            non_negative(&format!("{}.margins.right", key), margins.right)?;
            non_negative(&format!("{}.margins.top", key), margins.top)?;
            non_negative(&format!("{}.margins.bottom", key), margins.bottom)?;
        }
    }

    for (i, assignment) in config.vlsi.inputs.pin.assignments.iter().enumerate() {
        let key = format!("vlsi.inputs.pin.assignments[{}]", i);

        if assignment.pins.is_empty() {
            return Err(FlowError::invalid(
                format!("{}.pins", key),
                "pin pattern cannot be empty",
            ));
        }
        if assignment.layers.is_empty() {
            return Err(FlowError::invalid(
                format!("{}.layers", key),
                "at least one layer is required",
            ));
        }
        let mut seen = BTreeSet::new();
        for (j, layer) in assignment.layers.iter().enumerate() {
            if layer.is_empty() {
                return Err(FlowError::invalid(
                    format!("{}.layers[{}]", key, j),
                    "layer name cannot be empty",
                ));
            }
            if !seen.insert(layer.as_str()) {
                return Err(FlowError::invalid(
                    format!("{}.layers[{}]", key, j),
                    format!("duplicate layer '{}'", layer),
                ));
            }
        }
    }

    let declared: BTreeSet<&str> = config.clock_names().into_iter().collect();
    for (i, delay) in config.vlsi.inputs.delays.iter().enumerate() {
        let key = format!("vlsi.inputs.delays[{}]", i);
        check_name(&name_re, &format!("{}.name", key), &delay.name)?;
        if !declared.contains(delay.clock.as_str()) {
            return Err(FlowError::DanglingReference {
                key: format!("{}.clock", key),
                clock: delay.clock.clone(),
            });
        }
    }

    Ok(())
}

fn check_name(name_re: &Regex, key: &str, name: &str) -> Result<(), FlowError> {
    if name.is_empty() {
        return Err(FlowError::invalid(key.to_string(), "name cannot be empty"));
    }
    if !name_re.is_match(name) {
        return Err(FlowError::invalid(
            key.to_string(),
            format!("'{}' is not a valid identifier", name),
        ));
    }
    Ok(())
}

fn non_negative(key: &str, value: f64) -> Result<(), FlowError> {
    if !value.is_finite() || value < 0.0 {
        return Err(FlowError::invalid(
            key.to_string(),
            format!("{} must be finite and non-negative", value),
        ));
    }
    Ok(())
}
