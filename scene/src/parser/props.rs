//! Block properties

use octray_core::base::Float;
use octray_core::color::Color;
use octray_core::geometry::{Point3f, Vector3f};
use std::collections::HashMap;

/// The properties of one block, keyed by name. Numeric and string values
/// are kept apart; lookups that want a vector or color read three numbers.
#[derive(Debug, Default)]
pub struct Props {
    floats: HashMap<String, Vec<Float>>,
    strings: HashMap<String, Vec<String>>,
}

impl Props {
    /// Stores a numeric property.
    pub fn add_floats(&mut self, name: &str, values: Vec<Float>) {
        self.floats.insert(name.to_string(), values);
    }

    /// Stores a string property.
    pub fn add_strings(&mut self, name: &str, values: Vec<String>) {
        self.strings.insert(name.to_string(), values);
    }

    /// Returns a single numeric value, or the default when absent.
    ///
    /// * `name`    - Property name.
    /// * `default` - Value when the property is absent.
    pub fn find_one_float(&self, name: &str, default: Float) -> Float {
        self.floats
            .get(name)
            .and_then(|v| v.first())
            .copied()
            .unwrap_or(default)
    }

    /// Returns a single string value when present.
    ///
    /// * `name` - Property name.
    pub fn find_one_string(&self, name: &str) -> Option<&str> {
        self.strings
            .get(name)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Returns three numbers as a point when present.
    ///
    /// * `name` - Property name.
    pub fn find_point(&self, name: &str) -> Option<Point3f> {
        self.find_triple(name)
            .map(|(x, y, z)| Point3f::new(x, y, z))
    }

    /// Returns three numbers as a vector when present.
    ///
    /// * `name` - Property name.
    pub fn find_vector(&self, name: &str) -> Option<Vector3f> {
        self.find_triple(name)
            .map(|(x, y, z)| Vector3f::new(x, y, z))
    }

    /// Returns three numbers as a color, or the default when absent.
    ///
    /// * `name`    - Property name.
    /// * `default` - Color when the property is absent.
    pub fn find_color(&self, name: &str, default: Color) -> Color {
        self.find_triple(name)
            .map(|(r, g, b)| Color::new(r, g, b))
            .unwrap_or(default)
    }

    /// Returns true if the property exists in either table.
    pub fn has(&self, name: &str) -> bool {
        self.floats.contains_key(name) || self.strings.contains_key(name)
    }

    fn find_triple(&self, name: &str) -> Option<(Float, Float, Float)> {
        let v = self.floats.get(name)?;
        if v.len() < 3 {
            warn!("property '{}' needs 3 values, found {}", name, v.len());
            return None;
        }
        Some((v[0], v[1], v[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_with_defaults() {
        let mut props = Props::default();
        props.add_floats("radius", vec![2.0]);
        props.add_floats("center", vec![1.0, 2.0, 3.0]);
        props.add_strings("material", vec!["glass".to_string()]);

        assert_eq!(props.find_one_float("radius", 1.0), 2.0);
        assert_eq!(props.find_one_float("missing", 7.0), 7.0);
        assert_eq!(props.find_point("center"), Some(Point3f::new(1.0, 2.0, 3.0)));
        assert_eq!(props.find_one_string("material"), Some("glass"));
        assert!(props.find_point("radius").is_none());
    }
}
