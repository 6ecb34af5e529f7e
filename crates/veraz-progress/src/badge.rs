//! Badge levels and progress towards the next one.
//!
//! Badges are earned purely by the number of successful verifications.
//! Levels are ordered by ascending threshold.

use serde::Serialize;

/// One badge level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub name: &'static str,
    /// Verifications needed to earn this badge.
    pub threshold: u64,
}

/// All badge levels, lowest first.
pub static BADGE_LEVELS: [Badge; 5] = [
    Badge {
        name: "Verificador Novato",
        threshold: 1,
    },
    Badge {
        name: "Detective de Hechos",
        threshold: 5,
    },
    Badge {
        name: "Buscador de la Verdad",
        threshold: 10,
    },
    Badge {
        name: "Cazador de Mitos",
        threshold: 25,
    },
    Badge {
        name: "Guardián de la Verdad",
        threshold: 50,
    },
];

/// Where a verification count stands on the badge ladder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BadgeProgress {
    /// Highest badge earned, if any.
    pub current: Option<&'static Badge>,
    /// Next badge to earn. `None` at the top level.
    pub next: Option<&'static Badge>,
    /// Progress bar value in `[0, 100]`.
    pub progress_percent: f64,
}

/// Compute badge progress for `count` successful verifications.
///
/// Progress within a level is measured from the threshold of the badge
/// *below* the current one (0 for the first badge) up to the next badge's
/// threshold.
pub fn badge_info(count: u64) -> BadgeProgress {
    let current_index = BADGE_LEVELS.iter().rposition(|b| count >= b.threshold);
    let next = BADGE_LEVELS.iter().find(|b| count < b.threshold);

    let progress_percent = match (current_index, next) {
        (None, Some(next)) => percent(count, next.threshold),
        (None, None) => 0.0,
        (Some(_), None) => 100.0,
        (Some(index), Some(next)) => {
            let prev_threshold = index
                .checked_sub(1)
                .map(|i| BADGE_LEVELS[i].threshold)
                .unwrap_or(0);
            percent(count - prev_threshold, next.threshold - prev_threshold)
        }
    };

    BadgeProgress {
        current: current_index.map(|i| &BADGE_LEVELS[i]),
        next,
        progress_percent,
    }
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 100.0;
    }
    (part as f64 / whole as f64 * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::{badge_info, BADGE_LEVELS};

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn no_verifications_no_badge() {
        let info = badge_info(0);
        assert!(info.current.is_none());
        assert_eq!(info.next.unwrap().name, "Verificador Novato");
        assert_close(info.progress_percent, 0.0);
    }

    #[test]
    fn first_verification_earns_novice() {
        let info = badge_info(1);
        assert_eq!(info.current.unwrap().name, "Verificador Novato");
        assert_eq!(info.next.unwrap().name, "Detective de Hechos");
        // (1 - 0) / (5 - 0)
        assert_close(info.progress_percent, 20.0);
    }

    #[test]
    fn progress_measured_from_badge_below_current() {
        let info = badge_info(7);
        assert_eq!(info.current.unwrap().name, "Detective de Hechos");
        assert_eq!(info.next.unwrap().name, "Buscador de la Verdad");
        // (7 - 1) / (10 - 1)
        assert_close(info.progress_percent, 600.0 / 9.0);
    }

    #[test]
    fn exact_threshold_switches_badge() {
        assert_eq!(badge_info(24).current.unwrap().name, "Buscador de la Verdad");
        assert_eq!(badge_info(25).current.unwrap().name, "Cazador de Mitos");
    }

    #[test]
    fn top_level_is_full() {
        let info = badge_info(120);
        assert_eq!(info.current.unwrap(), &BADGE_LEVELS[4]);
        assert!(info.next.is_none());
        assert_close(info.progress_percent, 100.0);
    }

    #[test]
    fn levels_are_sorted() {
        assert!(BADGE_LEVELS.windows(2).all(|w| w[0].threshold < w[1].threshold));
    }
}
