#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseDay {
    pub day: u32,
    pub completed: bool,
    pub current: bool,
    pub coins: u32,
}

/// Seven-day exercise plan with a running streak and coin balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExercisePlan {
    pub days: Vec<ExerciseDay>,
    pub streak: u32,
    pub total_coins: u32,
}

impl ExercisePlan {
    /// Week in progress: four days done, day five up next.
    pub fn demo() -> Self {
        let coins = [15, 20, 15, 25, 20, 20, 30];
        let days = coins
            .iter()
            .enumerate()
            .map(|(index, &coins)| ExerciseDay {
                day: index as u32 + 1,
                completed: index < 4,
                current: index == 4,
                coins,
            })
            .collect();

        Self {
            days,
            streak: 4,
            total_coins: 120,
        }
    }

    pub fn current_day(&self) -> Option<&ExerciseDay> {
        self.days.iter().find(|day| day.current)
    }

    /// Completes today's session and returns the coins it earned.
    pub fn complete_current_day(&mut self) -> Option<u32> {
        let index = self.days.iter().position(|day| day.current)?;

        let day = &mut self.days[index];
        day.completed = true;
        day.current = false;
        let earned = day.coins;

        self.total_coins += earned;
        self.streak += 1;

        if let Some(next) = self.days.get_mut(index + 1) {
            next.current = true;
        }
        Some(earned)
    }

    pub fn completed_count(&self) -> usize {
        self.days.iter().filter(|day| day.completed).count()
    }

    pub fn progress_percent(&self) -> f64 {
        if self.days.is_empty() {
            return 0.0;
        }
        self.completed_count() as f64 / self.days.len() as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_plan_starts_mid_week() {
        let plan = ExercisePlan::demo();
        assert_eq!(plan.streak, 4);
        assert_eq!(plan.total_coins, 120);
        assert_eq!(plan.completed_count(), 4);
        assert_eq!(plan.current_day().map(|day| day.day), Some(5));
    }

    #[test]
    fn completing_a_day_awards_coins_and_advances() {
        let mut plan = ExercisePlan::demo();

        assert_eq!(plan.complete_current_day(), Some(20));
        assert_eq!(plan.streak, 5);
        assert_eq!(plan.total_coins, 140);
        assert!(plan.days[4].completed);
        assert_eq!(plan.current_day().map(|day| day.day), Some(6));
    }

    #[test]
    fn final_day_ends_the_plan() {
        let mut plan = ExercisePlan::demo();
        assert_eq!(plan.complete_current_day(), Some(20));
        assert_eq!(plan.complete_current_day(), Some(20));
        assert_eq!(plan.complete_current_day(), Some(30));

        assert!(plan.current_day().is_none());
        assert_eq!(plan.complete_current_day(), None);
        assert_eq!(plan.streak, 7);
        assert_eq!(plan.total_coins, 190);
        assert!((plan.progress_percent() - 100.0).abs() < f64::EPSILON);
    }
}
