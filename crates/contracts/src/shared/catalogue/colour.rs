//! Категоризация цветов глазури/ангоба.
//!
//! Произвольный hex-цвет сводится к одной из 12 человекочитаемых корзин
//! по порогам в пространстве HSL. Ошибки входа не пробрасываются:
//! некорректный hex всегда даёт `Grey`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Цветовая категория (корзина) для фильтра "Цвет"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColorCategory {
    Red,
    Pink,
    Purple,
    Blue,
    Turquoise,
    Green,
    Yellow,
    Orange,
    White,
    Grey,
    Brown,
    Black,
}

impl ColorCategory {
    /// Все категории в порядке отображения
    pub const ALL: [ColorCategory; 12] = [
        ColorCategory::Red,
        ColorCategory::Pink,
        ColorCategory::Purple,
        ColorCategory::Blue,
        ColorCategory::Turquoise,
        ColorCategory::Green,
        ColorCategory::Yellow,
        ColorCategory::Orange,
        ColorCategory::White,
        ColorCategory::Grey,
        ColorCategory::Brown,
        ColorCategory::Black,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorCategory::Red => "Red",
            ColorCategory::Pink => "Pink",
            ColorCategory::Purple => "Purple",
            ColorCategory::Blue => "Blue",
            ColorCategory::Turquoise => "Turquoise",
            ColorCategory::Green => "Green",
            ColorCategory::Yellow => "Yellow",
            ColorCategory::Orange => "Orange",
            ColorCategory::White => "White",
            ColorCategory::Grey => "Grey",
            ColorCategory::Brown => "Brown",
            ColorCategory::Black => "Black",
        }
    }
}

impl fmt::Display for ColorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorCategory {
    type Err = String;

    /// Разбор без учёта регистра; "Gray" принимается как синоним "Grey"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        if needle.eq_ignore_ascii_case("gray") {
            return Ok(ColorCategory::Grey);
        }
        ColorCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("Unknown colour category: {}", s))
    }
}

/// Цвет в HSL: hue в [0, 360), saturation и lightness в [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    /// Разбор 6-значного hex (с `#` или без)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let (r, g, b) = parse_hex_rgb(hex)?;
        Some(Self::from_rgb(r, g, b))
    }

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let r = f64::from(r) / 255.0;
        let g = f64::from(g) / 255.0;
        let b = f64::from(b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (max + min) / 2.0;

        if max == min {
            return Self {
                hue: 0.0,
                saturation: 0.0,
                lightness,
            };
        }

        let delta = max - min;
        let saturation = if lightness > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };

        let sector = if max == r {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        let mut hue = sector * 60.0;
        if hue >= 360.0 {
            hue -= 360.0;
        }

        Self {
            hue,
            saturation,
            lightness,
        }
    }
}

fn parse_hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let trimmed = hex.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if digits.len() != 6 || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Нормализованная запись hex (`#rrggbb`), если строка корректна
pub fn normalize_hex(hex: &str) -> Option<String> {
    let (r, g, b) = parse_hex_rgb(hex)?;
    Some(format!("#{:02x}{:02x}{:02x}", r, g, b))
}

/// Определить цветовую категорию по hex-строке.
///
/// Никогда не паникует: некорректный вход даёт `Grey`.
pub fn categorize(hex: &str) -> ColorCategory {
    match Hsl::from_hex(hex) {
        Some(hsl) => categorize_hsl(hsl),
        None => ColorCategory::Grey,
    }
}

pub fn categorize_hsl(hsl: Hsl) -> ColorCategory {
    let Hsl {
        hue: h,
        saturation: s,
        lightness: l,
    } = hsl;

    if l >= 0.98 {
        return ColorCategory::White;
    }
    if l <= 0.08 {
        return ColorCategory::Black;
    }

    if l >= 0.90 {
        return if s > 0.05 {
            hue_bucket(h).unwrap_or(ColorCategory::Grey)
        } else {
            ColorCategory::White
        };
    }

    let grey_threshold = if l > 0.5 { 0.15 } else { 0.25 };
    if s <= grey_threshold {
        if l >= 0.95 {
            return ColorCategory::White;
        }
        if l <= 0.2 {
            return ColorCategory::Black;
        }
        return ColorCategory::Grey;
    }

    if is_brown(h, s, l) {
        return ColorCategory::Brown;
    }

    hue_bucket(h).unwrap_or(ColorCategory::Grey)
}

fn is_brown(h: f64, s: f64, l: f64) -> bool {
    if !(10.0..40.0).contains(&h) {
        return false;
    }
    (l < 0.4 && s > 0.2 && s <= 0.5)
        || ((0.4..0.55).contains(&l) && s > 0.15 && s <= 0.45)
        || ((0.55..0.65).contains(&l) && s > 0.1 && s <= 0.35)
}

// Полуоткрытые интервалы [from, to)
fn hue_bucket(h: f64) -> Option<ColorCategory> {
    let category = match h {
        h if (345.0..360.0).contains(&h) || (0.0..10.0).contains(&h) => ColorCategory::Red,
        h if (10.0..45.0).contains(&h) => ColorCategory::Orange,
        h if (45.0..65.0).contains(&h) => ColorCategory::Yellow,
        h if (65.0..150.0).contains(&h) => ColorCategory::Green,
        h if (150.0..175.0).contains(&h) => ColorCategory::Turquoise,
        h if (175.0..255.0).contains(&h) => ColorCategory::Blue,
        h if (255.0..315.0).contains(&h) => ColorCategory::Purple,
        h if (315.0..345.0).contains(&h) => ColorCategory::Pink,
        _ => return None,
    };
    Some(category)
}

/// Сохранённый цвет декора: JSON-строка вида `{"hex": "#aabbcc", "category": "Blue"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColourSwatch {
    #[serde(default)]
    pub hex: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl ColourSwatch {
    /// Новый образец по hex с вычисленной категорией
    pub fn from_hex(hex: &str) -> Option<Self> {
        let normalized = normalize_hex(hex)?;
        let category = categorize(&normalized);
        Some(Self {
            hex: Some(normalized),
            category: Some(category.as_str().to_string()),
        })
    }

    /// Разбор сохранённой JSON-строки; `None` для мусора
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str::<ColourSwatch>(raw.trim()).ok()
    }

    /// Категория образца.
    ///
    /// Берётся сохранённая категория, если она распознаётся; иначе вычисляется
    /// по hex. Без того и другого образец считается повреждённым.
    pub fn category(&self) -> Option<ColorCategory> {
        if let Some(stored) = self
            .category
            .as_deref()
            .and_then(|c| ColorCategory::from_str(c).ok())
        {
            return Some(stored);
        }
        self.hex
            .as_deref()
            .and_then(Hsl::from_hex)
            .map(categorize_hsl)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Категория из сохранённой JSON-строки цвета
pub fn category_from_stored(raw: &str) -> Option<ColorCategory> {
    ColourSwatch::parse(raw)?.category()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extremes_ignore_hue() {
        assert_eq!(categorize("#ffffff"), ColorCategory::White);
        assert_eq!(categorize("fffafa"), ColorCategory::White);
        assert_eq!(categorize("#000000"), ColorCategory::Black);
        // l = 0.078, fully saturated red
        assert_eq!(categorize("#280000"), ColorCategory::Black);
    }

    #[test]
    fn test_malformed_hex_is_grey() {
        for raw in ["", "#", "#fff", "zzzzzz", "#12345", "#1234567", "#gg0000", "💥💥💥"] {
            assert_eq!(categorize(raw), ColorCategory::Grey, "input {:?}", raw);
        }
    }

    #[test]
    fn test_hue_buckets() {
        assert_eq!(categorize("#ff0000"), ColorCategory::Red);
        assert_eq!(categorize("#ff8000"), ColorCategory::Orange);
        assert_eq!(categorize("#ffff00"), ColorCategory::Yellow);
        assert_eq!(categorize("#00ff00"), ColorCategory::Green);
        assert_eq!(categorize("#00ffbf"), ColorCategory::Turquoise);
        assert_eq!(categorize("#0000ff"), ColorCategory::Blue);
        assert_eq!(categorize("#8000ff"), ColorCategory::Purple);
        assert_eq!(categorize("#ff00bf"), ColorCategory::Pink);
    }

    #[test]
    fn test_bucket_edges_are_half_open() {
        // hue ровно 45 -> Yellow, ровно 10 -> Orange (s = 1, l = 0.5)
        assert_eq!(
            categorize_hsl(Hsl { hue: 45.0, saturation: 1.0, lightness: 0.5 }),
            ColorCategory::Yellow
        );
        assert_eq!(
            categorize_hsl(Hsl { hue: 10.0, saturation: 1.0, lightness: 0.5 }),
            ColorCategory::Orange
        );
        assert_eq!(
            categorize_hsl(Hsl { hue: 345.0, saturation: 1.0, lightness: 0.5 }),
            ColorCategory::Red
        );
    }

    #[test]
    fn test_greys_and_pale_tints() {
        assert_eq!(categorize("#808080"), ColorCategory::Grey);
        assert_eq!(categorize("#2a2a2a"), ColorCategory::Black);
        // l ~ 0.94, s ~ 0.4 -> оттенок, а не белый
        assert_eq!(categorize("#f5e6e6"), ColorCategory::Red);
        // l ~ 0.94, s ~ 0.0 -> белый
        assert_eq!(categorize("#f0f0f0"), ColorCategory::White);
    }

    #[test]
    fn test_brown_band() {
        // h ~ 25, s ~ 0.43, l ~ 0.3
        assert_eq!(categorize("#6d4a2c"), ColorCategory::Brown);
        // тот же тон, но насыщенный -> Orange
        assert_eq!(categorize("#b35900"), ColorCategory::Orange);
    }

    #[test]
    fn test_nan_hue_falls_back_to_grey() {
        let hsl = Hsl {
            hue: f64::NAN,
            saturation: 0.8,
            lightness: 0.5,
        };
        assert_eq!(categorize_hsl(hsl), ColorCategory::Grey);
    }

    #[test]
    fn test_swatch_prefers_stored_category() {
        let swatch = ColourSwatch::parse(r##"{"hex":"#ff0000","category":"Blue"}"##).unwrap();
        assert_eq!(swatch.category(), Some(ColorCategory::Blue));

        let computed = ColourSwatch::parse(r##"{"hex":"#ff0000"}"##).unwrap();
        assert_eq!(computed.category(), Some(ColorCategory::Red));

        assert_eq!(category_from_stored("not json"), None);
        assert_eq!(category_from_stored("{}"), None);
    }

    #[test]
    fn test_swatch_from_hex_roundtrips_through_json() {
        let swatch = ColourSwatch::from_hex("1E90FF").unwrap();
        assert_eq!(swatch.hex.as_deref(), Some("#1e90ff"));
        assert_eq!(category_from_stored(&swatch.to_json()), Some(ColorCategory::Blue));
        assert!(ColourSwatch::from_hex("nope").is_none());
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("grey".parse::<ColorCategory>(), Ok(ColorCategory::Grey));
        assert_eq!("Gray".parse::<ColorCategory>(), Ok(ColorCategory::Grey));
        assert_eq!(" turquoise ".parse::<ColorCategory>(), Ok(ColorCategory::Turquoise));
        assert!("mauve".parse::<ColorCategory>().is_err());
    }
}
