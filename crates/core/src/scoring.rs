use types::Constraint;

pub const MAX_FITNESS: u8 = 100;
pub const CONFLICT_PENALTY: u64 = 10;
pub const VIOLATION_PENALTY: u64 = 5;

/// `max(0, 100 - 10 * conflicts - 5 * violated)`.
pub fn fitness(conflicts: usize, violated: usize) -> u8 {
    let penalty = (conflicts as u64)
        .saturating_mul(CONFLICT_PENALTY)
        .saturating_add((violated as u64).saturating_mul(VIOLATION_PENALTY));
    u64::from(MAX_FITNESS).saturating_sub(penalty) as u8
}

pub fn violated_count(constraints: &[Constraint]) -> usize {
    constraints.iter().filter(|c| c.violated).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::Priority;

    #[test]
    fn clean_schedule_scores_full_marks() {
        assert_eq!(fitness(0, 0), 100);
    }

    #[test]
    fn penalties_add_up() {
        assert_eq!(fitness(1, 0), 90);
        assert_eq!(fitness(0, 1), 95);
        assert_eq!(fitness(3, 4), 50);
    }

    #[test]
    fn floors_at_zero() {
        assert_eq!(fitness(10, 0), 0);
        assert_eq!(fitness(9, 3), 0);
        assert_eq!(fitness(usize::MAX, usize::MAX), 0);
    }

    #[test]
    fn counts_only_violated_constraints() {
        let mut cs = vec![
            Constraint::new("room_capacity", "fits", Priority::Low),
            Constraint::violation("teacher_availability", "busy", Priority::High),
        ];
        assert_eq!(violated_count(&cs), 1);
        cs[0].violated = true;
        assert_eq!(violated_count(&cs), 2);
    }
}
