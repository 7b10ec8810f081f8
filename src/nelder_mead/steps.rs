use std::fmt;

/// Outcome of one Nelder–Mead iteration: which moves were tried and which
/// vertex was kept.
///
/// Lower-case letters are moves tried, the trailing capital is the move
/// kept: `r` reflect, `e` expand, `c` contract outside, `k` contract
/// inside, `s` shrink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NelderMeadSteps {
    /// Reflect, keep reflect.
    RR,
    /// Reflect, expand, keep reflect.
    ReR,
    /// Reflect, expand, keep expand.
    ReE,
    /// Reflect, contract outside, keep contraction.
    RcC,
    /// Reflect, contract outside, shrink.
    RcsS,
    /// Reflect, contract inside, keep contraction.
    RkK,
    /// Reflect, contract inside, shrink.
    RksS,
}

impl NelderMeadSteps {
    /// Whether the iteration ended in a shrink.
    pub fn is_shrink(self) -> bool {
        matches!(self, NelderMeadSteps::RcsS | NelderMeadSteps::RksS)
    }
}

impl fmt::Display for NelderMeadSteps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NelderMeadSteps::RR => "rR",
            NelderMeadSteps::ReR => "reR",
            NelderMeadSteps::ReE => "reE",
            NelderMeadSteps::RcC => "rcC",
            NelderMeadSteps::RcsS => "rcsS",
            NelderMeadSteps::RkK => "rkK",
            NelderMeadSteps::RksS => "rksS",
        };
        f.write_str(s)
    }
}
