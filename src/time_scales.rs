//! Time scales needed for lunar-calendar computation, specifically
//! conversion from dynamical time (TT) into universal time (UT).
//!
//! Astronomical series for the new moon give instants in TT; calendar
//! dates are decided in civil time, which follows UT.

use crate::date::SolarDate;

/// Julian date of 1900-01-00.5 TT, the epoch of the ΔT polynomials.
const J1900: f64 = 2415020.0;

/// [Terrestrial time](https://en.wikipedia.org/wiki/Terrestrial_Time),
/// represented in Julian date (JD).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tt(pub f64);

/// [Universal time](https://en.wikipedia.org/wiki/Universal_Time), the
/// civil time used for determining the actual date at a given time point,
/// represented in Julian date (JD).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Ut(pub f64);

impl Tt {
    /// ΔT = TT − UT in days, from a low-order fit of Earth-rotation data.
    ///
    /// Within 1900–2100 the fit stays within a few minutes of observed
    /// values, which only matters for new moons falling right at midnight.
    pub fn delta_t(&self) -> f64 {
        let t = (self.0 - J1900) / 36525.0;
        let t2 = t * t;
        if t < -11.0 {
            let t3 = t2 * t;
            0.001 + 0.000839 * t + 0.0002261 * t2 - 0.00000845 * t3 - 0.000000081 * t * t3
        } else {
            -0.000278 + 0.000265 * t + 0.000262 * t2
        }
    }
}

impl From<Tt> for Ut {
    fn from(tt: Tt) -> Ut {
        Ut(tt.0 - tt.delta_t())
    }
}

impl Ut {
    /// Returns the date at the time point in timezone ahead (east) of UTC by
    /// `tz_offset_minutes` minutes.
    ///
    /// For Vietnam (UTC+7), `tz_offset_minutes` should be +420.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::time_scales::Ut;
    /// let ut = Ut(2451544.25); // 1999-12-31T18:00Z
    /// assert_eq!((1999, 12, 31), ut.date_in_timezone(0).gregorian());
    /// assert_eq!((2000, 1, 1), ut.date_in_timezone(420).gregorian());
    /// ```
    pub fn date_in_timezone(&self, tz_offset_minutes: i32) -> SolarDate {
        let jdn = (self.0 + 0.5 + tz_offset_minutes as f64 / 1440.0).floor() as u32;
        SolarDate::from_jdn(jdn)
    }

    /// The instant of local midnight starting `date` in the given timezone.
    pub fn local_midnight(date: SolarDate, tz_offset_minutes: i32) -> Ut {
        Ut(date.jdn() as f64 - 0.5 - tz_offset_minutes as f64 / 1440.0)
    }
}
