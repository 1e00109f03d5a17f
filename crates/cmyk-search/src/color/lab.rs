//! CIE 1976 L\*a\*b\* and CIE XYZ, both relative to the D50 white point.
//!
//! Print workflows measure color under D50, so the ink model and every
//! difference computed by the searcher live in D50 Lab.
//!
//! # References
//!
//! CIE 15:2004, "Colorimetry", section 8.2.1 (CIELAB).
//! The ε/κ constants are the exact rational forms recommended by
//! Bruce Lindbloom <http://www.brucelindbloom.com/LContinuity.html>.

/// D50 reference white (2° observer), Y normalized to 1.0.
pub const D50_WHITE: Xyz = Xyz {
    x: 0.96422,
    y: 1.0,
    z: 0.82521,
};

/// CIE ε: threshold between the cube-root and linear segments.
const EPSILON: f64 = 216.0 / 24389.0;

/// CIE κ: slope of the linear segment.
const KAPPA: f64 = 24389.0 / 27.0;

/// A color in CIE XYZ, relative to [`D50_WHITE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Component-wise product.
    #[inline]
    pub fn scale(self, factor: Xyz) -> Self {
        Self {
            x: self.x * factor.x,
            y: self.y * factor.y,
            z: self.z * factor.z,
        }
    }

    /// Component-wise quotient.
    #[inline]
    pub fn ratio(self, other: Xyz) -> Self {
        Self {
            x: self.x / other.x,
            y: self.y / other.y,
            z: self.z / other.z,
        }
    }
}

/// A color in CIE L\*a\*b\* (D50).
///
/// # Components
///
/// - `l`: Lightness, 0.0 (black) to 100.0 (reference white)
/// - `a`: Green-red axis, roughly -128 to 127 for printable colors
/// - `b`: Blue-yellow axis, roughly -128 to 127 for printable colors
///
/// Values are never clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness: 0.0 (black) to 100.0 (white)
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Lab {
    /// Create a new Lab color.
    ///
    /// # Example
    ///
    /// ```
    /// use cmyk_search::Lab;
    ///
    /// let mid_gray = Lab::new(50.0, 0.0, 0.0);
    /// assert_eq!(mid_gray.l, 50.0);
    /// ```
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// ΔE76 distance to `other`. See [`delta_e`].
    #[inline]
    pub fn delta_e(self, other: Lab) -> f64 {
        delta_e(self, other)
    }

    /// True if all three components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.l.is_finite() && self.a.is_finite() && self.b.is_finite()
    }
}

/// CIE 1976 color difference: the Euclidean distance in Lab,
/// `sqrt(ΔL² + Δa² + Δb²)`.
///
/// No weighting and no perceptual correction (this is not ΔE94 or
/// CIEDE2000). It is a true metric: non-negative, symmetric, zero only
/// for identical colors, and it satisfies the triangle inequality.
///
/// # Example
///
/// ```
/// use cmyk_search::{delta_e, Lab};
///
/// let a = Lab::new(50.0, 0.0, 0.0);
/// let b = Lab::new(53.0, 4.0, 0.0);
/// assert_eq!(delta_e(a, b), 5.0);
/// ```
#[inline]
pub fn delta_e(lab1: Lab, lab2: Lab) -> f64 {
    let dl = lab1.l - lab2.l;
    let da = lab1.a - lab2.a;
    let db = lab1.b - lab2.b;
    (dl * dl + da * da + db * db).sqrt()
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

impl From<Xyz> for Lab {
    fn from(xyz: Xyz) -> Self {
        let fx = lab_f(xyz.x / D50_WHITE.x);
        let fy = lab_f(xyz.y / D50_WHITE.y);
        let fz = lab_f(xyz.z / D50_WHITE.z);

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl From<Lab> for Xyz {
    fn from(lab: Lab) -> Self {
        let fy = (lab.l + 16.0) / 116.0;
        let fx = fy + lab.a / 500.0;
        let fz = fy - lab.b / 200.0;

        let fx3 = fx * fx * fx;
        let fz3 = fz * fz * fz;

        let xr = if fx3 > EPSILON {
            fx3
        } else {
            (116.0 * fx - 16.0) / KAPPA
        };
        let yr = if lab.l > KAPPA * EPSILON {
            fy * fy * fy
        } else {
            lab.l / KAPPA
        };
        let zr = if fz3 > EPSILON {
            fz3
        } else {
            (116.0 * fz - 16.0) / KAPPA
        };

        D50_WHITE.scale(Xyz::new(xr, yr, zr))
    }
}
