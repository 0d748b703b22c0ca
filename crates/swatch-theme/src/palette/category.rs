//! The six-slot swatch taxonomy.

use std::fmt;
use std::str::FromStr;

use super::error::ParseCategoryError;

/// One of the six swatch categories: vibrant/muted × dark/mid/light.
///
/// This is a closed set. [`Category::ALL`] lists every variant in canonical
/// order, which is also the order the merger fills gaps in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Saturated, mid lightness
    Vibrant,
    /// Saturated, dark
    DarkVibrant,
    /// Saturated, light
    LightVibrant,
    /// Desaturated, mid lightness
    Muted,
    /// Desaturated, dark
    DarkMuted,
    /// Desaturated, light
    LightMuted,
}

impl Category {
    /// Every category in canonical order.
    pub const ALL: [Category; 6] = [
        Category::Vibrant,
        Category::DarkVibrant,
        Category::LightVibrant,
        Category::Muted,
        Category::DarkMuted,
        Category::LightMuted,
    ];

    /// Selection order for the general "best color" lookup.
    pub const DEFAULT_PRIORITY: [Category; 6] = [
        Category::Vibrant,
        Category::DarkVibrant,
        Category::Muted,
        Category::LightVibrant,
        Category::DarkMuted,
        Category::LightMuted,
    ];

    /// Stable slot index (0..6) used by [`Palette`](super::Palette) storage.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Category::Vibrant => 0,
            Category::DarkVibrant => 1,
            Category::LightVibrant => 2,
            Category::Muted => 3,
            Category::DarkMuted => 4,
            Category::LightMuted => 5,
        }
    }

    /// PascalCase name, e.g. `"DarkVibrant"`.
    pub const fn name(self) -> &'static str {
        match self {
            Category::Vibrant => "Vibrant",
            Category::DarkVibrant => "DarkVibrant",
            Category::LightVibrant => "LightVibrant",
            Category::Muted => "Muted",
            Category::DarkMuted => "DarkMuted",
            Category::LightMuted => "LightMuted",
        }
    }

    /// True for the three saturated categories.
    #[inline]
    pub const fn is_vibrant(self) -> bool {
        matches!(
            self,
            Category::Vibrant | Category::DarkVibrant | Category::LightVibrant
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    /// Parse a category name.
    ///
    /// Accepts the PascalCase names (`DarkVibrant`) as well as snake_case and
    /// kebab-case spellings (`dark_vibrant`, `dark-vibrant`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && *c != ' ')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| ParseCategoryError {
                input: s.to_string(),
            })
    }
}

/// A caller's category choice: a concrete category or the disabled sentinel.
///
/// Role settings store one token per role. `Disabled` short-circuits the
/// lookup to "no color" without touching any extraction machinery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CategoryToken {
    /// The role is switched off
    #[default]
    Disabled,
    /// Look up this category (with `Vibrant` fallback)
    Category(Category),
}

impl CategoryToken {
    /// The literal sentinel string for [`CategoryToken::Disabled`].
    pub const DISABLED: &'static str = "disabled";

    /// Parse a token without failing.
    ///
    /// `"disabled"` and the empty string map to `Disabled`; known category
    /// names map to that category; anything else maps to the default
    /// category (`Vibrant`).
    pub fn parse_lenient(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(Self::DISABLED) {
            return CategoryToken::Disabled;
        }
        trimmed
            .parse()
            .map(CategoryToken::Category)
            .unwrap_or(CategoryToken::Category(Category::Vibrant))
    }

    /// The category, unless disabled.
    #[inline]
    pub fn category(self) -> Option<Category> {
        match self {
            CategoryToken::Disabled => None,
            CategoryToken::Category(c) => Some(c),
        }
    }

    /// True for [`CategoryToken::Disabled`].
    #[inline]
    pub fn is_disabled(self) -> bool {
        matches!(self, CategoryToken::Disabled)
    }
}

impl From<Category> for CategoryToken {
    fn from(category: Category) -> Self {
        CategoryToken::Category(category)
    }
}

impl fmt::Display for CategoryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryToken::Disabled => f.write_str(Self::DISABLED),
            CategoryToken::Category(c) => fmt::Display::fmt(c, f),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Category {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CategoryToken {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CategoryToken {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(CategoryToken::parse_lenient(&s))
    }
}
