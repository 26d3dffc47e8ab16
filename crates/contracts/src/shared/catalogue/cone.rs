//! Порядок пироскопических конусов.
//!
//! Легкоплавкие конусы записываются с ведущим нулём и нумеруются вниз
//! (`022` холоднее `01`), дальше идут конусы без нуля с ростом номера
//! (`1` < `10`). Текстовые диапазоны ("Low fire", "Mid fire", "High fire")
//! идут после числовых, нераспознанные метки в самом конце в исходном
//! относительном порядке.

use std::cmp::Ordering;

/// Класс метки конуса (порядок вариантов = порядок групп при сортировке)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConeKey {
    /// Легкоплавкий конус с ведущим нулём: `022` .. `01`
    LowFire(u32),
    /// Средне- и высокотемпературный: `1` .. `14`
    Numbered(u32),
    /// Текстовый диапазон
    Band(ConeBand),
    Unparsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConeBand {
    Low,
    Mid,
    High,
}

impl ConeKey {
    /// Классифицировать метку конуса
    pub fn parse(label: &str) -> Self {
        let name = strip_cone_prefix(label.trim());

        if let Some(band) = parse_band(name) {
            return ConeKey::Band(band);
        }

        if name.is_empty() || !name.bytes().all(|c| c.is_ascii_digit()) {
            return ConeKey::Unparsed;
        }

        let Ok(value) = name.parse::<u32>() else {
            return ConeKey::Unparsed;
        };

        if name.len() >= 2 && name.starts_with('0') {
            ConeKey::LowFire(value)
        } else {
            ConeKey::Numbered(value)
        }
    }

    fn group(&self) -> u8 {
        match self {
            ConeKey::LowFire(_) => 0,
            ConeKey::Numbered(_) => 1,
            ConeKey::Band(_) => 2,
            ConeKey::Unparsed => 3,
        }
    }

    /// Сравнение по температуре; `None` для пары нераспознанных меток
    fn temperature_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            // больший номер легкоплавкого конуса холоднее
            (ConeKey::LowFire(a), ConeKey::LowFire(b)) => Some(b.cmp(a)),
            (ConeKey::Numbered(a), ConeKey::Numbered(b)) => Some(a.cmp(b)),
            (ConeKey::Band(a), ConeKey::Band(b)) => Some(a.cmp(b)),
            (ConeKey::Unparsed, ConeKey::Unparsed) => None,
            _ => Some(self.group().cmp(&other.group())),
        }
    }
}

fn strip_cone_prefix(name: &str) -> &str {
    let bytes = name.as_bytes();
    if bytes.len() > 4 && name.is_char_boundary(4) && name[..4].eq_ignore_ascii_case("cone") {
        name[4..].trim_start()
    } else {
        name
    }
}

fn parse_band(name: &str) -> Option<ConeBand> {
    if name.starts_with("Low") {
        Some(ConeBand::Low)
    } else if name.starts_with("Mid") {
        Some(ConeBand::Mid)
    } else if name.starts_with("High") {
        Some(ConeBand::High)
    } else {
        None
    }
}

/// Сравнить две метки конусов.
///
/// Внутри распознанной группы равные по температуре метки упорядочиваются
/// по исходной строке, поэтому порядок не зависит от порядка на входе.
/// Две нераспознанные метки считаются равными (стабильная сортировка
/// сохраняет их исходный порядок).
pub fn compare_cones(a: &str, b: &str) -> Ordering {
    let key_a = ConeKey::parse(a);
    let key_b = ConeKey::parse(b);
    match key_a.temperature_cmp(&key_b) {
        Some(Ordering::Equal) => a.cmp(b),
        Some(ordering) => ordering,
        None => Ordering::Equal,
    }
}

/// Отсортировать метки конусов по возрастанию температуры обжига
pub fn sort_cones<S: AsRef<str>>(cones: &[S]) -> Vec<String> {
    let mut sorted: Vec<String> = cones.iter().map(|c| c.as_ref().to_string()).collect();
    sort_cones_in_place(&mut sorted);
    sorted
}

pub fn sort_cones_in_place(cones: &mut [String]) {
    cones.sort_by(|a, b| compare_cones(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_mixed_cones() {
        assert_eq!(
            sort_cones(&["10", "1", "022", "01", "06"]),
            vec!["022", "06", "01", "1", "10"]
        );
    }

    #[test]
    fn test_sort_is_idempotent() {
        let input = ["6", "04", "Mid fire", "10", "??", "018", "High fire", "Low fire", "5", "x"];
        let once = sort_cones(&input);
        let twice = sort_cones(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_result_does_not_depend_on_input_order() {
        let a = sort_cones(&["6", "06", "006", "1", "High fire", "Low fire"]);
        let b = sort_cones(&["Low fire", "006", "1", "High fire", "06", "6"]);
        assert_eq!(a, b);
        assert_eq!(a, vec!["006", "06", "1", "6", "Low fire", "High fire"]);
    }

    #[test]
    fn test_bands_follow_numbers_and_unparsed_keep_order() {
        assert_eq!(
            sort_cones(&["zeta", "High fire", "6", "alpha", "Low fire", "Mid fire", "04"]),
            vec!["04", "6", "Low fire", "Mid fire", "High fire", "zeta", "alpha"]
        );
    }

    #[test]
    fn test_cone_prefix_is_ignored() {
        assert_eq!(ConeKey::parse("Cone 06"), ConeKey::LowFire(6));
        assert_eq!(ConeKey::parse("cone 10"), ConeKey::Numbered(10));
        assert_eq!(ConeKey::parse(" 5 "), ConeKey::Numbered(5));
        assert_eq!(ConeKey::parse("5½"), ConeKey::Unparsed);
        assert_eq!(ConeKey::parse(""), ConeKey::Unparsed);
        assert_eq!(ConeKey::parse("0"), ConeKey::Numbered(0));
    }

    #[test]
    fn test_compare_cones() {
        assert_eq!(compare_cones("022", "01"), Ordering::Less);
        assert_eq!(compare_cones("01", "1"), Ordering::Less);
        assert_eq!(compare_cones("11", "9"), Ordering::Greater);
        assert_eq!(compare_cones("foo", "bar"), Ordering::Equal);
        assert_eq!(compare_cones("foo", "10"), Ordering::Greater);
    }
}
