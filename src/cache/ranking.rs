/// RFC 2181 §5.4.1 admission tier, condensed to the three levels this cache
/// distinguishes. Declared low-to-high so the derived `Ord` gives "higher
/// rank supersedes lower rank" directly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ranking {
    /// Data from the additional section, or authority-section data from a
    /// non-authoritative reply.
    Additional,
    /// Answer-section data from a non-authoritative reply, or
    /// non-authoritative data in an authoritative reply's answer section.
    Answer,
    /// Answer-section data from a reply with the authoritative-answer bit
    /// set.
    AuthAnswer,
}

impl Ranking {
    /// Whether a candidate at `self` may displace an existing entry ranked
    /// `current`. Equal ranks never displace.
    pub fn supersedes(self, current: Ranking) -> bool {
        self > current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_rfc_2181_strength() {
        assert!(Ranking::AuthAnswer > Ranking::Answer);
        assert!(Ranking::Answer > Ranking::Additional);
    }

    #[test]
    fn equal_rank_does_not_supersede() {
        assert!(!Ranking::Answer.supersedes(Ranking::Answer));
        assert!(!Ranking::Additional.supersedes(Ranking::Additional));
    }

    #[test]
    fn higher_rank_supersedes_lower() {
        assert!(Ranking::AuthAnswer.supersedes(Ranking::Answer));
        assert!(Ranking::Answer.supersedes(Ranking::Additional));
    }

    #[test]
    fn lower_rank_does_not_supersede_higher() {
        assert!(!Ranking::Additional.supersedes(Ranking::Answer));
        assert!(!Ranking::Answer.supersedes(Ranking::AuthAnswer));
    }
}
