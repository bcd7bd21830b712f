use std::collections::BTreeSet;

use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::{Category, Exercise, ExerciseID, ExerciseSession, WorkoutData, WorkoutSession};

/// All days with a workout, sorted ascending and without duplicates.
///
/// A day counts if any exercise has an exercise session on it or if a
/// completed dwarf workout was started on it. Dwarf workouts have no
/// exercise sessions to anchor their date.
#[must_use]
pub fn workout_dates(data: &WorkoutData) -> Vec<NaiveDate> {
    let mut dates = data
        .exercises
        .iter()
        .flat_map(|e| e.sessions.iter().map(ExerciseSession::day))
        .collect::<BTreeSet<_>>();
    dates.extend(
        data.workout_sessions
            .iter()
            .filter(|s| s.is_dwarf_workout && !s.is_active())
            .map(WorkoutSession::day),
    );
    dates.into_iter().collect()
}

#[must_use]
pub fn total_workouts(data: &WorkoutData) -> usize {
    workout_dates(data).len()
}

/// Total time spent in completed workout sessions, rounded to minutes once
/// at the end rather than per session.
#[must_use]
pub fn total_time_minutes(data: &WorkoutData) -> i64 {
    let seconds = data
        .workout_sessions
        .iter()
        .filter_map(WorkoutSession::duration)
        .map(|d| d.num_seconds())
        .sum::<i64>();
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    {
        (seconds as f64 / 60.0).round() as i64
    }
}

/// Number of workout days since the most recent Sunday.
#[must_use]
pub fn workouts_this_week(data: &WorkoutData) -> usize {
    let today = Local::now().date_naive();
    let week_start = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
    workout_dates(data)
        .iter()
        .filter(|d| **d >= week_start)
        .count()
}

/// Number of consecutive weeks with at least one workout, walking backward
/// from the current week for at most a year.
///
/// A current week without a workout does not break the streak, any earlier
/// week without one does. Weeks are keyed by their Monday, with Sunday
/// belonging to the week of the preceding Monday.
#[must_use]
pub fn current_streak(data: &WorkoutData) -> u32 {
    let weeks = workout_dates(data)
        .into_iter()
        .map(week_key)
        .collect::<BTreeSet<_>>();
    let current_week = week_key(Local::now().date_naive());
    let mut streak = 0;
    for i in 0..52 {
        if weeks.contains(&(current_week - Duration::weeks(i))) {
            streak += 1;
        } else if i > 0 {
            break;
        }
    }
    streak
}

fn week_key(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_monday()))
}

#[must_use]
pub fn last_workout_date(data: &WorkoutData) -> Option<NaiveDate> {
    workout_dates(data).last().copied()
}

/// 1-based rank of the exercise within its category on the given day.
///
/// The rank follows the `exercise_ids` order of the workout session of that
/// day, restricted to exercises of the category. Ids of deleted exercises
/// are skipped. Without a matching workout session, or when the exercise is
/// missing from it, the rank falls back to exercise list order among
/// exercises of the category with a non-empty session on that day.
#[must_use]
pub fn muscle_group_order(
    exercise_id: ExerciseID,
    category: &Category,
    day: NaiveDate,
    workout_sessions: &[WorkoutSession],
    exercises: &[Exercise],
) -> Option<usize> {
    if let Some(session) = workout_sessions
        .iter()
        .find(|s| s.day() == day && s.exercise_ids.contains(&exercise_id))
    {
        let order = session
            .exercise_ids
            .iter()
            .filter(|id| {
                exercises
                    .iter()
                    .find(|e| e.id == **id)
                    .is_some_and(|e| e.category == *category)
            })
            .position(|id| *id == exercise_id);
        if let Some(order) = order {
            return Some(order + 1);
        }
    }
    exercises
        .iter()
        .filter(|e| e.category == *category && e.session_on(day).is_some_and(|s| !s.sets.is_empty()))
        .position(|e| e.id == exercise_id)
        .map(|order| order + 1)
}

/// Distinct categories currently in use.
#[must_use]
pub fn categories(data: &WorkoutData) -> BTreeSet<Category> {
    data.exercises.iter().map(|e| e.category.clone()).collect()
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{Name, Reps, Set, Weight};

    use super::*;

    static TODAY: std::sync::LazyLock<NaiveDate> =
        std::sync::LazyLock::new(|| Local::now().date_naive());

    fn timestamp(day: NaiveDate) -> DateTime<Utc> {
        Local
            .from_local_datetime(&day.and_hms_opt(12, 0, 0).unwrap())
            .unwrap()
            .with_timezone(&Utc)
    }

    fn set(reps: u32, weight: f32) -> Set {
        Set {
            reps: Reps::new(reps).unwrap(),
            weight: Weight::new(weight).unwrap(),
        }
    }

    fn exercise(id: u128, category: &str, session_days: &[i64]) -> Exercise {
        Exercise {
            id: id.into(),
            name: Name::new(&format!("Exercise {id}")).unwrap(),
            category: Category::new(category).unwrap(),
            sessions: session_days
                .iter()
                .map(|days_ago| ExerciseSession {
                    id: (id * 100 + u128::try_from(*days_ago).unwrap()).into(),
                    date: timestamp(*TODAY - Duration::days(*days_ago)),
                    sets: vec![set(8, 60.0)],
                    note: None,
                })
                .collect(),
        }
    }

    fn workout_session(
        id: u128,
        days_ago: i64,
        minutes: Option<i64>,
        exercise_ids: &[u128],
        dwarf: bool,
    ) -> WorkoutSession {
        let start_time = timestamp(*TODAY - Duration::days(days_ago));
        WorkoutSession {
            id: id.into(),
            start_time,
            end_time: minutes.map(|m| start_time + Duration::minutes(m)),
            exercise_ids: exercise_ids.iter().map(|id| ExerciseID::from(*id)).collect(),
            is_dwarf_workout: dwarf,
        }
    }

    fn data(exercise_days: &[i64], dwarf_days: &[i64]) -> WorkoutData {
        WorkoutData {
            exercises: vec![
                exercise(1, "Push", exercise_days),
                exercise(2, "Pull", exercise_days),
            ],
            workout_sessions: dwarf_days
                .iter()
                .enumerate()
                .map(|(i, days_ago)| {
                    workout_session(u128::try_from(i).unwrap() + 100, *days_ago, Some(20), &[], true)
                })
                .collect(),
        }
    }

    #[test]
    fn test_workout_dates_sorted_and_unique() {
        let dates = workout_dates(&data(&[1, 7], &[3]));
        assert_eq!(
            dates,
            vec![
                *TODAY - Duration::days(7),
                *TODAY - Duration::days(3),
                *TODAY - Duration::days(1),
            ]
        );
    }

    #[test]
    fn test_workout_dates_excludes_active_and_regular_sessions() {
        let mut d = data(&[], &[]);
        d.workout_sessions = vec![
            // active dwarf workout, not counted yet
            workout_session(101, 1, None, &[], true),
            // regular workout session, anchored by exercise sessions only
            workout_session(102, 2, Some(45), &[1], false),
        ];
        assert_eq!(workout_dates(&d), vec![]);
    }

    #[test]
    fn test_total_workouts() {
        let d = data(&[1, 7], &[3]);
        assert_eq!(total_workouts(&d), workout_dates(&d).len());
        assert_eq!(total_workouts(&d), 3);
    }

    #[test]
    fn test_total_time_minutes_rounds_once_at_the_end() {
        let mut d = data(&[], &[]);
        d.workout_sessions = vec![
            workout_session(101, 3, None, &[], false),
            workout_session(102, 2, Some(0), &[], false),
            workout_session(103, 1, Some(0), &[], false),
        ];
        d.workout_sessions[1].end_time = Some(d.workout_sessions[1].start_time + Duration::seconds(90));
        d.workout_sessions[2].end_time = Some(d.workout_sessions[2].start_time + Duration::seconds(45));
        // 135 s are 2.25 min, per-session rounding would yield 3
        assert_eq!(total_time_minutes(&d), 2);
        assert_eq!(total_time_minutes(&data(&[], &[])), 0);
    }

    #[test]
    fn test_workouts_this_week() {
        // a workout today is always within the current week, one 14 days ago
        // is always before the most recent Sunday
        assert_eq!(workouts_this_week(&data(&[0, 14], &[])), 1);
        assert_eq!(workouts_this_week(&data(&[], &[])), 0);
    }

    #[rstest]
    #[case::no_workouts(&[], 0)]
    #[case::three_consecutive_weeks(&[0, 7, 14], 3)]
    #[case::current_week_missing_does_not_break(&[7, 14], 2)]
    #[case::earlier_week_missing_breaks(&[0, 14], 1)]
    #[case::gap_after_first_previous_week(&[7, 21], 1)]
    fn test_current_streak(#[case] days_ago: &[i64], #[case] expected: u32) {
        // days at multiples of 7 before today stay at the same weekday and
        // therefore map to week keys exactly that many weeks back
        assert_eq!(current_streak(&data(days_ago, &[])), expected);
    }

    #[test]
    fn test_last_workout_date() {
        assert_eq!(
            last_workout_date(&data(&[1, 7], &[])),
            Some(*TODAY - Duration::days(1))
        );
        assert_eq!(last_workout_date(&data(&[], &[])), None);
    }

    #[test]
    fn test_muscle_group_order_follows_workout_session() {
        let exercises = vec![
            exercise(1, "Push", &[1]),
            exercise(2, "Push", &[1]),
            exercise(3, "Pull", &[1]),
        ];
        let sessions = vec![workout_session(101, 1, Some(45), &[1, 2, 3], false)];
        let day = *TODAY - Duration::days(1);
        let push = Category::new("Push").unwrap();
        let pull = Category::new("Pull").unwrap();
        assert_eq!(muscle_group_order(1.into(), &push, day, &sessions, &exercises), Some(1));
        assert_eq!(muscle_group_order(2.into(), &push, day, &sessions, &exercises), Some(2));
        assert_eq!(muscle_group_order(3.into(), &pull, day, &sessions, &exercises), Some(1));
    }

    #[test]
    fn test_muscle_group_order_skips_dangling_ids() {
        let exercises = vec![exercise(1, "Push", &[1]), exercise(2, "Push", &[1])];
        let sessions = vec![workout_session(101, 1, Some(45), &[99, 1, 2], false)];
        let day = *TODAY - Duration::days(1);
        let push = Category::new("Push").unwrap();
        assert_eq!(muscle_group_order(1.into(), &push, day, &sessions, &exercises), Some(1));
        assert_eq!(muscle_group_order(2.into(), &push, day, &sessions, &exercises), Some(2));
    }

    #[test]
    fn test_muscle_group_order_falls_back_to_exercise_list_order() {
        let exercises = vec![
            exercise(1, "Push", &[1]),
            exercise(2, "Push", &[1]),
            exercise(3, "Push", &[2]),
        ];
        let day = *TODAY - Duration::days(1);
        let push = Category::new("Push").unwrap();
        assert_eq!(muscle_group_order(1.into(), &push, day, &[], &exercises), Some(1));
        assert_eq!(muscle_group_order(2.into(), &push, day, &[], &exercises), Some(2));
        // no session on that day
        assert_eq!(muscle_group_order(3.into(), &push, day, &[], &exercises), None);
    }

    #[test]
    fn test_muscle_group_order_unknown_exercise() {
        let exercises = vec![exercise(1, "Push", &[1])];
        let day = *TODAY - Duration::days(1);
        let push = Category::new("Push").unwrap();
        assert_eq!(muscle_group_order(99.into(), &push, day, &[], &exercises), None);
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            categories(&data(&[1], &[])),
            BTreeSet::from([Category::new("Push").unwrap(), Category::new("Pull").unwrap()])
        );
    }
}
