use kurbo::{Affine, Vec2};

use crate::foundation::error::{SlidewayError, SlidewayResult};

/// A 2-D affine transform in the canonical `matrix(a, b, c, d, tx, ty)` form.
///
/// The engine only ever mutates the translation components `tx`/`ty`; the
/// linear part `a, b, c, d` passes through untouched. Serialization uses the
/// shortest `f64` representation, so a serialized matrix parses back to the
/// exact same six components.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformMatrix(Affine);

impl TransformMatrix {
    /// The identity transform.
    pub const IDENTITY: Self = Self(Affine::IDENTITY);

    /// Build from the coefficient array `[a, b, c, d, tx, ty]`.
    pub const fn new(coeffs: [f64; 6]) -> Self {
        Self(Affine::new(coeffs))
    }

    /// Parse a transform attribute value.
    ///
    /// Empty strings and `none` read as identity. Anything else must be a
    /// `matrix(..)` form with exactly six numeric components.
    pub fn parse(attr: &str) -> SlidewayResult<Self> {
        let s = attr.trim();
        if s.is_empty() || s == "none" {
            return Ok(Self::IDENTITY);
        }
        let body = s
            .strip_prefix("matrix(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| SlidewayError::validation(format!("unsupported transform: {s}")))?;

        let mut coeffs = [0.0_f64; 6];
        let mut parts = body.split(',');
        for slot in &mut coeffs {
            let part = parts
                .next()
                .ok_or_else(|| SlidewayError::validation("matrix(..) needs six components"))?;
            *slot = part.trim().parse::<f64>().map_err(|_| {
                SlidewayError::validation(format!("bad matrix component: {}", part.trim()))
            })?;
        }
        if parts.next().is_some() {
            return Err(SlidewayError::validation(
                "matrix(..) needs exactly six components",
            ));
        }
        Ok(Self(Affine::new(coeffs)))
    }

    /// Parse an optional attribute, treating missing or unparseable values as
    /// identity.
    pub fn from_attr(attr: Option<&str>) -> Self {
        attr.and_then(|s| Self::parse(s).ok()).unwrap_or_default()
    }

    /// Serialize to the canonical attribute string.
    pub fn to_attr(&self) -> String {
        let [a, b, c, d, tx, ty] = self.0.as_coeffs();
        format!("matrix({a}, {b}, {c}, {d}, {tx}, {ty})")
    }

    /// Translation components `(tx, ty)`.
    pub fn translation(&self) -> Vec2 {
        self.0.translation()
    }

    /// This matrix translated by `delta` in parent coordinates.
    ///
    /// Translations compose additively on `tx`/`ty`.
    #[must_use]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self(self.0.then_translate(delta))
    }

    /// The coefficient array `[a, b, c, d, tx, ty]`.
    pub fn coeffs(&self) -> [f64; 6] {
        self.0.as_coeffs()
    }
}

impl Default for TransformMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/matrix.rs"]
mod tests;
