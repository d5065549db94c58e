//! Property tests for slot derivation, validation, and generation.

use proptest::prelude::*;
use u_timetable::models::{Constraints, Course, Instructor, Room, TimeFrame};
use u_timetable::search::{GeneratorConfig, SearchRunner, TimetableProblem};
use u_timetable::slots::TimeSlots;
use u_timetable::validation::validate_input;

/// One course per instructor and per room, so every placement is free.
fn isolated(durations: &[u32]) -> (Vec<Course>, Vec<Instructor>, Vec<Room>) {
    let courses: Vec<Course> = durations
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            let level = (i % 3) as u32 + 1;
            Course::new(format!("C{i}"), format!("Course {i}"), level, "D", 20, d)
        })
        .collect();
    let instructors = courses
        .iter()
        .enumerate()
        .map(|(i, c)| Instructor::new(format!("I{i}"), "D").with_courses([c.code.clone()]))
        .collect();
    let rooms = (0..courses.len()).map(|i| Room::new(format!("R{i}"), 20)).collect();
    (courses, instructors, rooms)
}

proptest! {
    #[test]
    fn prop_whole_hour_window_slot_count(start in 0u32..24, end in 0u32..24) {
        let (from, to) = (format!("{start:02}:00"), format!("{end:02}:00"));
        let slots = TimeSlots::parse_window(&from, &to, None).unwrap();
        prop_assert_eq!(slots.len() as u32, end.saturating_sub(start));
        prop_assert!(slots.as_slice().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_break_is_never_a_slot(brk in 8u32..18) {
        let b = format!("{brk:02}:00");
        let slots = TimeSlots::parse_window("08:00", "18:00", Some(b.as_str())).unwrap();
        prop_assert_eq!(slots.len(), 9);
        prop_assert!(slots.iter().all(|t| t.to_string() != b));
    }

    #[test]
    fn prop_validation_is_deterministic(
        enrollments in prop::collection::vec(0u32..3, 0..4),
        durations in prop::collection::vec(0u32..3, 0..4),
    ) {
        let courses: Vec<Course> = enrollments
            .iter()
            .zip(&durations)
            .enumerate()
            .map(|(i, (&n, &d))| Course::new(format!("C{i}"), "X", 1, "D", n, d))
            .collect();
        let instructors = vec![Instructor::new("A", "D").with_courses(["C0"])];
        let rooms = vec![Room::new("R", 1)];
        let tf = TimeFrame::default();

        let first = validate_input(&courses, &instructors, &rooms, &tf);
        let second = validate_input(&courses, &instructors, &rooms, &tf);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_generated_entries_cover_every_course(
        durations in prop::collection::vec(1u32..=240, 1..6),
        seed in any::<u64>(),
    ) {
        let (courses, instructors, rooms) = isolated(&durations);
        let constraints = Constraints::default();
        let problem = TimetableProblem::new(&courses, &instructors, &rooms, &constraints);
        let config = GeneratorConfig::default()
            .with_population_size(4)
            .with_max_generations(2)
            .with_seed(seed);

        let result = SearchRunner::run(&problem, &config);

        prop_assert!(result.error.is_none());
        prop_assert_eq!(result.score, 100);
        prop_assert!(result.conflicts.is_empty());
        let expected: usize = durations.iter().map(|&d| d.div_ceil(60) as usize).sum();
        prop_assert_eq!(result.schedule.len(), expected);
        for course in &courses {
            let level = course.level.to_string();
            let entries = result.schedule.level(&level).unwrap_or(&[]);
            prop_assert!(entries
                .iter()
                .filter(|e| e.course_code == course.code)
                .all(|e| e.duration == course.duration && e.num_students == course.num_students));
        }
    }
}
