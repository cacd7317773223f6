//! Color theme application.
//!
//! A theme is three colors, one per [`ThemeRole`]. Each role is written to a
//! [`ThemeTarget`] as the custom property `--{role}-color`.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// Color role of the theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemeRole {
    Primary,
    Secondary,
    SecondaryLight,
}

impl ThemeRole {
    /// All roles in application order.
    pub const ALL: [Self; 3] = [Self::Primary, Self::Secondary, Self::SecondaryLight];

    /// Role name as used in configuration keys and property names.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::SecondaryLight => "secondary-light",
        }
    }

    /// Custom property name, e.g. `--primary-color`.
    #[must_use]
    pub fn property(self) -> String {
        format!("--{}-color", self.name())
    }
}

/// Theme colors keyed by role.
///
/// Values are passed through verbatim: any CSS color expression is accepted
/// and an empty value is written as empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    #[serde(rename = "primary-color")]
    pub primary: String,
    #[serde(rename = "secondary-color")]
    pub secondary: String,
    #[serde(rename = "secondary-light-color")]
    pub secondary_light: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: "sienna".to_owned(),
            secondary: "wheat".to_owned(),
            secondary_light: "cornsilk".to_owned(),
        }
    }
}

impl ThemeColors {
    /// Color assigned to `role`.
    #[must_use]
    pub fn color(&self, role: ThemeRole) -> &str {
        match role {
            ThemeRole::Primary => &self.primary,
            ThemeRole::Secondary => &self.secondary,
            ThemeRole::SecondaryLight => &self.secondary_light,
        }
    }

    /// Render the theme as a `:root` CSS block.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for role in ThemeRole::ALL {
            let _ = writeln!(css, "  {}: {};", role.property(), self.color(role));
        }
        css.push_str("}\n");
        css
    }
}

/// Receiver of style property assignments.
pub trait ThemeTarget {
    /// Set the custom property `name` to `value`, replacing any previous value.
    fn set_property(&mut self, name: &str, value: &str);
}

impl ThemeTarget for BTreeMap<String, String> {
    fn set_property(&mut self, name: &str, value: &str) {
        self.insert(name.to_owned(), value.to_owned());
    }
}

/// Write every role's color to `target`.
///
/// Applying the same theme twice leaves the target unchanged.
pub fn apply_theme(colors: &ThemeColors, target: &mut impl ThemeTarget) {
    for role in ThemeRole::ALL {
        target.set_property(&role.property(), colors.color(role));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_apply_default_theme() {
        let mut target = BTreeMap::new();
        apply_theme(&ThemeColors::default(), &mut target);

        assert_eq!(target.len(), 3);
        assert_eq!(target["--primary-color"], "sienna");
        assert_eq!(target["--secondary-color"], "wheat");
        assert_eq!(target["--secondary-light-color"], "cornsilk");
    }

    #[test]
    fn test_apply_is_idempotent() {
        let colors = ThemeColors {
            primary: "#336699".to_owned(),
            ..ThemeColors::default()
        };
        let mut once = BTreeMap::new();
        apply_theme(&colors, &mut once);
        let mut twice = once.clone();
        apply_theme(&colors, &mut twice);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_value_passed_through() {
        let colors = ThemeColors {
            secondary: String::new(),
            ..ThemeColors::default()
        };
        let mut target = BTreeMap::new();
        apply_theme(&colors, &mut target);

        assert_eq!(target["--secondary-color"], "");
    }

    #[test]
    fn test_to_css() {
        assert_eq!(
            ThemeColors::default().to_css(),
            ":root {\n  --primary-color: sienna;\n  --secondary-color: wheat;\n  --secondary-light-color: cornsilk;\n}\n"
        );
    }

    #[test]
    fn test_serde_keys() {
        let json = serde_json::to_value(ThemeColors::default()).unwrap();
        assert_eq!(json["primary-color"], "sienna");
        assert_eq!(json["secondary-light-color"], "cornsilk");
    }
}
