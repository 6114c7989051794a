/// A conversion rule.
///
/// A rule states that one `from` equals `multiplier` of `to`. Both unit names
/// are stored normalized (see [`crate::normalize::unit`]). Rules work in both
/// directions.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionRule {
    from: String,
    to: String,
    multiplier: f64,
}

impl ConversionRule {
    /// Creates a rule from normalized unit names and a positive multiplier.
    pub fn new(from: impl Into<String>, to: impl Into<String>, multiplier: f64)
    -> ConversionRule {
        debug_assert!(multiplier > 0.0);

        ConversionRule {from: from.into(), to: to.into(), multiplier}
    }

    pub fn unit_source(&self) -> &str {
        &self.from
    }

    pub fn unit_destination(&self) -> &str {
        &self.to
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Applies this rule to an amount, if it relates the two units.
    ///
    /// Converting along the rule multiplies; converting against it divides.
    pub fn apply(&self, unit_source: &str, unit_destination: &str, amount: f64)
    -> Option<f64> {
        if unit_source == self.from && unit_destination == self.to {
            Some(amount * self.multiplier)
        }
        else if unit_source == self.to && unit_destination == self.from {
            Some(amount / self.multiplier)
        }
        else {
            None
        }
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case("ounce" , "gram"  , 2.0 , Some(56.7))]
    #[case("gram"  , "ounce" , 2.0 , Some(2.0 / 28.35))]
    #[case("ounce" , "ounce" , 2.0 , None)]
    #[case("ounce" , "mile"  , 2.0 , None)]
    #[case("Ounce" , "gram"  , 2.0 , None)]
    #[trace]
    fn test_apply(
        #[case] unit_source: &str,
        #[case] unit_destination: &str,
        #[case] amount: f64,
        #[case] expected: Option<f64>,
    ) {
        let rule = ConversionRule::new("ounce", "gram", 28.35);

        assert_eq!(rule.apply(unit_source, unit_destination, amount), expected);
    }
}
