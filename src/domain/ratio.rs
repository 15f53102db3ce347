use strum_macros::EnumIter;

/// The golden ratio, `(1 + sqrt(5)) / 2`.
pub fn phi() -> f64 {
    (1.0 + 5.0_f64.sqrt()) / 2.0
}

/// One Fibonacci ratio, tagged rather than stringly-keyed so that
/// classification and search logic can switch on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum FibRatio {
    // Retracement set: fraction of the swing range pulled back.
    Ret0,
    Ret236,
    Ret382,
    Ret500,
    /// 61.8%, the inverse golden ratio.
    RetGolden,
    Ret786,
    Ret1000,
    // Extension set: continuation beyond the swing range.
    Ext1272,
    Ext1382,
    /// 161.8%, the golden ratio itself.
    ExtGolden,
    Ext2000,
    /// 261.8%, phi squared.
    ExtGoldenSq,
    ExtPi,
    /// 423.6%, phi cubed.
    ExtGoldenCube,
}

impl FibRatio {
    pub const RETRACEMENTS: [FibRatio; 7] = [
        FibRatio::Ret0,
        FibRatio::Ret236,
        FibRatio::Ret382,
        FibRatio::Ret500,
        FibRatio::RetGolden,
        FibRatio::Ret786,
        FibRatio::Ret1000,
    ];

    pub const EXTENSIONS: [FibRatio; 7] = [
        FibRatio::Ext1272,
        FibRatio::Ext1382,
        FibRatio::ExtGolden,
        FibRatio::Ext2000,
        FibRatio::ExtGoldenSq,
        FibRatio::ExtPi,
        FibRatio::ExtGoldenCube,
    ];

    /// Structurally significant ratios (phi-derived), used for strength scoring.
    pub const KEY_RATIOS: [FibRatio; 5] = [
        FibRatio::Ret382,
        FibRatio::Ret500,
        FibRatio::RetGolden,
        FibRatio::ExtGolden,
        FibRatio::ExtGoldenSq,
    ];

    /// Numeric ratio value. Irrational entries are exact phi derivations, not
    /// the rounded decimals chart packages print.
    pub fn value(self) -> f64 {
        let phi = phi();
        match self {
            FibRatio::Ret0 => 0.0,
            FibRatio::Ret236 => phi.powi(-3),
            FibRatio::Ret382 => phi.powi(-2),
            FibRatio::Ret500 => 0.5,
            FibRatio::RetGolden => phi.recip(),
            FibRatio::Ret786 => phi.recip().sqrt(),
            FibRatio::Ret1000 => 1.0,
            FibRatio::Ext1272 => phi.sqrt(),
            FibRatio::Ext1382 => 1.0 + phi.powi(-2),
            FibRatio::ExtGolden => phi,
            FibRatio::Ext2000 => 2.0,
            FibRatio::ExtGoldenSq => phi.powi(2),
            FibRatio::ExtPi => std::f64::consts::PI,
            FibRatio::ExtGoldenCube => phi.powi(3),
        }
    }

    pub fn is_retracement(self) -> bool {
        Self::RETRACEMENTS.contains(&self)
    }

    /// Stable identifier for the ratio (not a display string).
    pub fn label(self) -> &'static str {
        match self {
            FibRatio::Ret0 => "0.0%",
            FibRatio::Ret236 => "23.6%",
            FibRatio::Ret382 => "38.2%",
            FibRatio::Ret500 => "50.0%",
            FibRatio::RetGolden => "61.8%(golden)",
            FibRatio::Ret786 => "78.6%",
            FibRatio::Ret1000 => "100.0%",
            FibRatio::Ext1272 => "127.2%",
            FibRatio::Ext1382 => "138.2%",
            FibRatio::ExtGolden => "161.8%(golden)",
            FibRatio::Ext2000 => "200.0%",
            FibRatio::ExtGoldenSq => "261.8%(golden^2)",
            FibRatio::ExtPi => "314.2%(pi)",
            FibRatio::ExtGoldenCube => "423.6%(golden^3)",
        }
    }
}

impl std::fmt::Display for FibRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn irrational_ratios_match_their_conventional_decimals() {
        assert!((FibRatio::Ret236.value() - 0.236).abs() < 1e-3);
        assert!((FibRatio::Ret382.value() - 0.382).abs() < 1e-3);
        assert!((FibRatio::RetGolden.value() - 0.618).abs() < 1e-3);
        assert!((FibRatio::Ret786.value() - 0.786).abs() < 1e-3);
        assert!((FibRatio::Ext1272.value() - 1.272).abs() < 1e-3);
        assert!((FibRatio::Ext1382.value() - 1.382).abs() < 1e-3);
        assert!((FibRatio::ExtGolden.value() - 1.618).abs() < 1e-3);
        assert!((FibRatio::ExtGoldenSq.value() - 2.618).abs() < 1e-3);
        assert!((FibRatio::ExtGoldenCube.value() - 4.236).abs() < 1e-3);
    }

    #[test]
    fn every_variant_belongs_to_exactly_one_set() {
        for ratio in FibRatio::iter() {
            let in_ret = FibRatio::RETRACEMENTS.contains(&ratio);
            let in_ext = FibRatio::EXTENSIONS.contains(&ratio);
            assert!(in_ret ^ in_ext, "{ratio:?} must be in one set only");
            assert_eq!(ratio.is_retracement(), in_ret);
        }
    }

    #[test]
    fn key_ratios_are_phi_derived() {
        let phi = phi();
        for key in FibRatio::KEY_RATIOS {
            let v = key.value();
            let phi_related = (v - 0.5).abs() < 1e-12
                || (v - phi.recip()).abs() < 1e-12
                || (v - phi.powi(-2)).abs() < 1e-12
                || (v - phi).abs() < 1e-12
                || (v - phi.powi(2)).abs() < 1e-12;
            assert!(phi_related, "{key:?}");
        }
    }
}
