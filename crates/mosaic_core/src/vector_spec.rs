//! Parsing of position and offset arguments handed in by callers, e.g. `"10 64 -3"`,
//! `"10,64,-3"` or `"~ ~5 ~-2"`.
//!
//! A component prefixed with `~` is relative to a reference point (usually where the caller
//! currently stands). A bare `~` is the reference component itself.

use super::{Point3f, PointN};

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum VectorSpecError {
    #[error("invalid vector spec {spec:?}: expected 3 components, found {found}")]
    WrongArity { spec: String, found: usize },
    #[error("invalid vector spec {spec:?}: cannot parse component {component:?}")]
    InvalidComponent { spec: String, component: String },
}

/// Parses a 3-component vector. Either every component parses or nothing is returned.
pub fn parse_vector3(spec: &str, reference: Point3f) -> Result<Point3f, VectorSpecError> {
    let components: Vec<&str> = spec
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    if components.len() != 3 {
        return Err(VectorSpecError::WrongArity {
            spec: spec.to_owned(),
            found: components.len(),
        });
    }

    let mut out = [0.0; 3];
    for (i, component) in components.iter().enumerate() {
        out[i] = parse_component(component, reference.0[i]).ok_or_else(|| {
            VectorSpecError::InvalidComponent {
                spec: spec.to_owned(),
                component: (*component).to_owned(),
            }
        })?;
    }

    Ok(PointN(out))
}

fn parse_component(component: &str, reference: f32) -> Option<f32> {
    let (base, number) = match component.strip_prefix('~') {
        Some("") => return Some(reference),
        Some(rest) => (reference, rest),
        None => (0.0, component),
    };
    let value: f32 = number.parse().ok()?;
    // "NaN" and "inf" parse as floats but are never a usable position.
    if !value.is_finite() {
        return None;
    }

    Some(base + value)
}
