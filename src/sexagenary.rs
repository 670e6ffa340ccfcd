//! Can Chi: the ten Heavenly Stems, the twelve Earthly Branches and their
//! sixty-term combination used to name years, months, days and hours.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::date::SolarDate;

const STEM_NAMES: [&str; 10] = [
    "Giáp", "Ất", "Bính", "Đinh", "Mậu", "Kỷ", "Canh", "Tân", "Nhâm", "Quý",
];
const BRANCH_NAMES: [&str; 12] = [
    "Tý", "Sửu", "Dần", "Mão", "Thìn", "Tỵ", "Ngọ", "Mùi", "Thân", "Dậu", "Tuất", "Hợi",
];

/// Heavenly Stem (Can).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Stem {
    Giap,
    At,
    Binh,
    Dinh,
    Mau,
    Ky,
    Canh,
    Tan,
    Nham,
    Quy,
}

/// Earthly Branch (Chi).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Branch {
    Ty,
    Suu,
    Dan,
    Mao,
    Thin,
    Ti,
    Ngo,
    Mui,
    Than,
    Dau,
    Tuat,
    Hoi,
}

impl Stem {
    pub const ALL: [Stem; 10] = [
        Stem::Giap,
        Stem::At,
        Stem::Binh,
        Stem::Dinh,
        Stem::Mau,
        Stem::Ky,
        Stem::Canh,
        Stem::Tan,
        Stem::Nham,
        Stem::Quy,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
    /// Position in the cycle, Giáp = 0.
    pub fn index(&self) -> usize {
        *self as usize
    }
    pub fn name(&self) -> &'static str {
        STEM_NAMES[self.index()]
    }
    fn from_cycle(n: i64) -> Self {
        Self::ALL[n.rem_euclid(10) as usize]
    }
}

impl Branch {
    pub const ALL: [Branch; 12] = [
        Branch::Ty,
        Branch::Suu,
        Branch::Dan,
        Branch::Mao,
        Branch::Thin,
        Branch::Ti,
        Branch::Ngo,
        Branch::Mui,
        Branch::Than,
        Branch::Dau,
        Branch::Tuat,
        Branch::Hoi,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
    /// Position in the cycle, Tý = 0.
    pub fn index(&self) -> usize {
        *self as usize
    }
    pub fn name(&self) -> &'static str {
        BRANCH_NAMES[self.index()]
    }
    /// Parses a Vietnamese branch name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|b| b.name().to_lowercase() == name)
    }
    /// The branch six places away on the wheel (lục xung).
    pub fn opposite(&self) -> Self {
        Self::ALL[(self.index() + 6) % 12]
    }
    /// The branch governing the two-hour period containing `hour` (0–23).
    /// Tý covers 23:00–01:00.
    pub fn of_hour(hour: u32) -> Self {
        Self::ALL[((hour + 1) / 2 % 12) as usize]
    }
    fn from_cycle(n: i64) -> Self {
        Self::ALL[n.rem_euclid(12) as usize]
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A Stem–Branch pair.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct StemBranch {
    pub stem: Stem,
    pub branch: Branch,
}

impl StemBranch {
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }
    /// The pair at position `n` of the sixty-term cycle, Giáp Tý = 0.
    ///
    /// ```
    /// use amlich::sexagenary::StemBranch;
    ///
    /// assert_eq!("Quý Hợi", StemBranch::from_cycle_index(59).to_string());
    /// assert_eq!("Giáp Tý", StemBranch::from_cycle_index(60).to_string());
    /// ```
    pub fn from_cycle_index(n: i64) -> Self {
        Self::new(Stem::from_cycle(n), Branch::from_cycle(n))
    }
    /// Position in the sixty-term cycle, or `None` for a pair of mismatched
    /// parity (such as Giáp Sửu) that never occurs.
    pub fn cycle_index(&self) -> Option<usize> {
        let (s, b) = (self.stem.index(), self.branch.index());
        if s % 2 != b % 2 {
            return None;
        }
        // n ≡ s (mod 10), n ≡ b (mod 12)
        (0..6).map(|k| s + 10 * k).find(|n| n % 12 == b)
    }
}

impl fmt::Display for StemBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.stem, self.branch)
    }
}

/// Stem name for an index in `0..10`.
///
/// # Panics
///
/// Panics if `index` is not in `0..10`.
pub fn stem_name(index: usize) -> &'static str {
    match Stem::from_index(index) {
        Some(stem) => stem.name(),
        None => panic!("stem index {} not in 0..10", index),
    }
}

/// Branch name for an index in `0..12`.
///
/// # Panics
///
/// Panics if `index` is not in `0..12`.
pub fn branch_name(index: usize) -> &'static str {
    match Branch::from_index(index) {
        Some(branch) => branch.name(),
        None => panic!("branch index {} not in 0..12", index),
    }
}

/// Joins a stem and a branch as `"{Stem} {Branch}"`.
///
/// # Panics
///
/// Panics on an out-of-range index, see [`stem_name`] and [`branch_name`].
pub fn combine(stem_index: usize, branch_index: usize) -> String {
    format!("{} {}", stem_name(stem_index), branch_name(branch_index))
}

/// Can Chi of a lunar year. 1984 is Giáp Tý.
///
/// ```
/// use amlich::sexagenary::year_stem_branch;
///
/// assert_eq!("Giáp Thìn", year_stem_branch(2024).to_string());
/// ```
pub fn year_stem_branch(year: i32) -> StemBranch {
    let y = year as i64;
    StemBranch::new(Stem::from_cycle(y + 6), Branch::from_cycle(y + 8))
}

/// Display name of a lunar year, e.g. `"Ất Tỵ"` for 2025.
pub fn year_name(year: i32) -> String {
    year_stem_branch(year).to_string()
}

/// Can Chi of a day, from its Julian day number. 2000-01-01 is Mậu Ngọ.
///
/// ```
/// use amlich::SolarDate;
/// use amlich::sexagenary::day_stem_branch;
///
/// let date = SolarDate::from_ymd(2000, 1, 1).unwrap();
/// assert_eq!("Mậu Ngọ", day_stem_branch(date).to_string());
/// ```
pub fn day_stem_branch(date: SolarDate) -> StemBranch {
    let jdn = date.jdn() as i64;
    StemBranch::new(Stem::from_cycle(jdn + 9), Branch::from_cycle(jdn + 1))
}

/// Can Chi of a lunar month. Month 1 is always a Dần month; a leap month
/// takes the name of the regular month it follows.
///
/// # Panics
///
/// Panics if `lunar_month` is not in `1..=12`.
pub fn month_stem_branch(lunar_month: u32, lunar_year: i32) -> StemBranch {
    assert!(
        (1..=12).contains(&lunar_month),
        "month {} not in 1..=12",
        lunar_month
    );
    let (m, y) = (lunar_month as i64, lunar_year as i64);
    StemBranch::new(Stem::from_cycle(y * 12 + m + 3), Branch::from_cycle(m + 1))
}

/// Can Chi of the first (Tý) hour of a day.
pub fn first_hour_stem_branch(date: SolarDate) -> StemBranch {
    let jdn = date.jdn() as i64;
    StemBranch::new(Stem::from_cycle((jdn - 1) * 2), Branch::Ty)
}

/// Can Chi of the two-hour period of `date` containing `hour`.
///
/// The Tý period opening at 23:00 is counted with the day it precedes, so
/// `hour` 23 is named from the following day's first hour.
pub fn hour_stem_branch(date: SolarDate, hour: u32) -> StemBranch {
    let (base, slot) = if hour >= 23 {
        (date + 1, 0)
    } else {
        (date, Branch::of_hour(hour).index() as i64)
    };
    let first = first_hour_stem_branch(base);
    StemBranch::new(
        Stem::from_cycle(first.stem.index() as i64 + slot),
        Branch::from_cycle(slot),
    )
}
