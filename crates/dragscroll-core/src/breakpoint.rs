//! Viewport size buckets and per-bucket responsive values
//!
//! A responsive value can be written in config either as a bare scalar (used
//! at every width) or as a table keyed by bucket name plus `default`.

use serde::{Deserialize, Deserializer, Serialize};

/// Viewport size bucket, ordered from narrowest to widest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Xs,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
    ];

    /// Map a viewport width in CSS pixels to its bucket
    pub fn from_width(width: f64) -> Self {
        if width < 640.0 {
            Breakpoint::Xs
        } else if width < 768.0 {
            Breakpoint::Sm
        } else if width < 1024.0 {
            Breakpoint::Md
        } else if width < 1280.0 {
            Breakpoint::Lg
        } else {
            Breakpoint::Xl
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Breakpoint::Xs => "xs",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
        }
    }
}

impl std::fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A value that varies by breakpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Responsive<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xs: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sm: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lg: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xl: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<T>,
}

impl<T> Default for Responsive<T> {
    fn default() -> Self {
        Self {
            xs: None,
            sm: None,
            md: None,
            lg: None,
            xl: None,
            default: None,
        }
    }
}

impl<T: Copy> Responsive<T> {
    /// Same value at every width
    pub fn fixed(value: T) -> Self {
        Self {
            default: Some(value),
            ..Self::default()
        }
    }

    /// Builder-style override for one bucket
    pub fn with(mut self, breakpoint: Breakpoint, value: T) -> Self {
        *self.slot_mut(breakpoint) = Some(value);
        self
    }

    pub fn get(&self, breakpoint: Breakpoint) -> Option<T> {
        match breakpoint {
            Breakpoint::Xs => self.xs,
            Breakpoint::Sm => self.sm,
            Breakpoint::Md => self.md,
            Breakpoint::Lg => self.lg,
            Breakpoint::Xl => self.xl,
        }
    }

    /// Bucket entry, else `default`, else `fallback`
    pub fn resolve_at(&self, breakpoint: Breakpoint, fallback: T) -> T {
        self.get(breakpoint).or(self.default).unwrap_or(fallback)
    }

    /// Resolve against a viewport width
    pub fn resolve(&self, width: f64, fallback: T) -> T {
        self.resolve_at(Breakpoint::from_width(width), fallback)
    }

    /// Every value present in the map, including `default`
    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        [self.xs, self.sm, self.md, self.lg, self.xl, self.default]
            .into_iter()
            .flatten()
    }

    fn slot_mut(&mut self, breakpoint: Breakpoint) -> &mut Option<T> {
        match breakpoint {
            Breakpoint::Xs => &mut self.xs,
            Breakpoint::Sm => &mut self.sm,
            Breakpoint::Md => &mut self.md,
            Breakpoint::Lg => &mut self.lg,
            Breakpoint::Xl => &mut self.xl,
        }
    }
}

#[derive(Deserialize)]
struct ResponsiveTable<T> {
    xs: Option<T>,
    sm: Option<T>,
    md: Option<T>,
    lg: Option<T>,
    xl: Option<T>,
    default: Option<T>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ResponsiveRepr<T> {
    Fixed(T),
    Table(ResponsiveTable<T>),
}

// Accept either `axis = "y"` or `axis = { default = "x", md = "y" }`
impl<'de, T> Deserialize<'de> for Responsive<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match ResponsiveRepr::deserialize(deserializer)? {
            ResponsiveRepr::Fixed(value) => Responsive {
                xs: None,
                sm: None,
                md: None,
                lg: None,
                xl: None,
                default: Some(value),
            },
            ResponsiveRepr::Table(table) => Responsive {
                xs: table.xs,
                sm: table.sm,
                md: table.md,
                lg: table.lg,
                xl: table.xl,
                default: table.default,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_thresholds() {
        assert_eq!(Breakpoint::from_width(0.0), Breakpoint::Xs);
        assert_eq!(Breakpoint::from_width(639.0), Breakpoint::Xs);
        assert_eq!(Breakpoint::from_width(640.0), Breakpoint::Sm);
        assert_eq!(Breakpoint::from_width(767.9), Breakpoint::Sm);
        assert_eq!(Breakpoint::from_width(768.0), Breakpoint::Md);
        assert_eq!(Breakpoint::from_width(1023.0), Breakpoint::Md);
        assert_eq!(Breakpoint::from_width(1024.0), Breakpoint::Lg);
        assert_eq!(Breakpoint::from_width(1279.0), Breakpoint::Lg);
        assert_eq!(Breakpoint::from_width(1280.0), Breakpoint::Xl);
        assert_eq!(Breakpoint::from_width(3840.0), Breakpoint::Xl);
    }

    #[test]
    fn test_buckets_are_ordered_and_contiguous() {
        let mut prev = Breakpoint::Xs;
        let mut seen = vec![prev];
        for width in 0..2000 {
            let bp = Breakpoint::from_width(width as f64);
            assert!(bp >= prev, "bucket went backwards at width {}", width);
            if bp != prev {
                seen.push(bp);
            }
            prev = bp;
        }
        assert_eq!(seen, Breakpoint::ALL.to_vec());
    }

    #[test]
    fn test_resolve_fallback_order() {
        let layout = Responsive::fixed(2).with(Breakpoint::Xs, 1);
        assert_eq!(layout.resolve(320.0, 9), 1);
        assert_eq!(layout.resolve(1400.0, 9), 2);

        let empty: Responsive<usize> = Responsive::default();
        assert_eq!(empty.resolve(1400.0, 9), 9);
    }

    #[test]
    fn test_deserialize_scalar_or_table() {
        #[derive(Deserialize)]
        struct Doc {
            a: Responsive<u32>,
            b: Responsive<u32>,
        }

        let doc: Doc = toml::from_str("a = 3\nb = { md = 2, default = 1 }").unwrap();
        assert_eq!(doc.a.default, Some(3));
        assert_eq!(doc.a.md, None);
        assert_eq!(doc.b.md, Some(2));
        assert_eq!(doc.b.resolve(800.0, 0), 2);
        assert_eq!(doc.b.resolve(300.0, 0), 1);
    }
}
