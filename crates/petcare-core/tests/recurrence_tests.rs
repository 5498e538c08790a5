//! Reminder lifecycle integration tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use petcare_core::metrics::ReminderQuery;
use petcare_core::models::{Priority, Reminder, ReminderType, Repeat};
use petcare_core::recurrence::{
    add_reminder, advance_due_date, complete_reminder, delete_reminder, snooze, toggle_complete,
    ReminderStatus,
};
use petcare_core::timestamp::{format_utc, instant_of};
use proptest::prelude::*;

fn reminder(due_iso: &str, repeat: Repeat) -> Reminder {
    Reminder::new(
        "pet-1",
        ReminderType::Medication,
        "Heartworm pill",
        due_iso,
        repeat,
        Priority::High,
        "2023-12-01T00:00:00Z",
    )
}

fn at(iso: &str) -> DateTime<Utc> {
    instant_of(iso).unwrap()
}

#[test]
fn test_monthly_completion_spawns_next_month() {
    let original = reminder("2024-01-01T10:00:00Z", Repeat::Monthly);
    let now = at("2024-01-15T09:30:00Z");

    let reminders = toggle_complete(&[original.clone()], &original.id, &now);
    assert_eq!(reminders.len(), 2);

    let successor = &reminders[0];
    let completed = &reminders[1];

    assert_eq!(completed.id, original.id);
    assert_eq!(completed.completed_at_iso.as_deref(), Some("2024-01-15T09:30:00Z"));

    assert_ne!(successor.id, original.id);
    assert_eq!(successor.due_iso, "2024-02-01T10:00:00Z");
    assert_eq!(successor.completed_at_iso, None);
    assert_eq!(successor.created_at_iso, "2024-01-15T09:30:00Z");
    assert_eq!(successor.title, original.title);
    assert_eq!(successor.repeat, Repeat::Monthly);
    assert_eq!(successor.priority, Priority::High);
}

#[test]
fn test_monthly_from_month_end_rolls_forward() {
    // Jan 31 + 1 month overflows February (29 days in 2024) by two days.
    let original = reminder("2024-01-31T10:00:00Z", Repeat::Monthly);
    let completion = complete_reminder(&original, &at("2024-01-31T12:00:00Z"));

    let successor = completion.successor.unwrap();
    assert_eq!(successor.due_iso, "2024-03-02T10:00:00Z");
}

#[test]
fn test_chain_of_daily_completions() {
    let mut reminders = vec![reminder("2024-03-01T08:00:00Z", Repeat::Daily)];
    let mut now = at("2024-03-01T08:05:00Z");

    for _ in 0..3 {
        let open = reminders.iter().find(|r| r.is_open()).unwrap().id.clone();
        reminders = toggle_complete(&reminders, &open, &now);
        now += Duration::days(1);
    }

    assert_eq!(reminders.len(), 4);
    assert_eq!(reminders.iter().filter(|r| r.is_open()).count(), 1);
    assert_eq!(reminders[0].due_iso, "2024-03-04T08:00:00Z");
}

#[test]
fn test_reopen_keeps_successor() {
    let original = reminder("2024-01-01T10:00:00Z", Repeat::Weekly);
    let now = at("2024-01-01T11:00:00Z");

    let completed = toggle_complete(&[original.clone()], &original.id, &now);
    let reopened = toggle_complete(&completed, &original.id, &now);

    assert_eq!(reopened.len(), 2);
    let restored = reopened.iter().find(|r| r.id == original.id).unwrap();
    assert_eq!(restored, &original);
}

#[test]
fn test_add_and_delete() {
    let first = reminder("2024-01-01T10:00:00Z", Repeat::None);
    let second = reminder("2024-01-02T10:00:00Z", Repeat::None);

    let reminders = add_reminder(&[], first.clone()).unwrap();
    let reminders = add_reminder(&reminders, second.clone()).unwrap();
    assert_eq!(reminders, vec![second.clone(), first.clone()]);

    assert_eq!(delete_reminder(&reminders, &second.id), vec![first]);
    assert_eq!(delete_reminder(&reminders, "missing"), reminders);
}

#[test]
fn test_snooze_unknown_id_is_noop() {
    let reminders = vec![reminder("2024-01-01T10:00:00Z", Repeat::None)];
    assert_eq!(snooze(&reminders, "missing", 30), reminders);
}

fn instant() -> impl Strategy<Value = DateTime<Utc>> {
    // 2000-01-01 .. 2100-01-01
    (946_684_800i64..4_102_444_800i64).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

fn repeat() -> impl Strategy<Value = Repeat> {
    prop_oneof![
        Just(Repeat::None),
        Just(Repeat::Daily),
        Just(Repeat::Weekly),
        Just(Repeat::Monthly),
    ]
}

proptest! {
    #[test]
    fn prop_daily_adds_one_day(due in instant()) {
        let next = advance_due_date(&format_utc(&due), Repeat::Daily).unwrap();
        prop_assert_eq!(instant_of(&next).unwrap() - due, Duration::days(1));
    }

    #[test]
    fn prop_weekly_adds_seven_days(due in instant()) {
        let next = advance_due_date(&format_utc(&due), Repeat::Weekly).unwrap();
        prop_assert_eq!(instant_of(&next).unwrap() - due, Duration::days(7));
    }

    #[test]
    fn prop_successor_only_for_repeating(due in instant(), now in instant(), repeat in repeat()) {
        let original = reminder(&format_utc(&due), repeat);
        let completion = complete_reminder(&original, &now);

        prop_assert!(completion.updated.is_completed());
        prop_assert_eq!(completion.successor.is_some(), repeat != Repeat::None);
        if let Some(next) = completion.successor {
            prop_assert!(instant_of(&next.due_iso).unwrap() > due);
        }
    }

    #[test]
    fn prop_complete_then_reopen_restores(due in instant(), now in instant(), repeat in repeat()) {
        let original = reminder(&format_utc(&due), repeat);
        let completed = complete_reminder(&original, &now).updated;
        let reopened = complete_reminder(&completed, &now);

        prop_assert_eq!(reopened.updated, original);
        prop_assert!(reopened.successor.is_none());
    }

    #[test]
    fn prop_snooze_round_trip(due in instant(), minutes in -200_000i64..200_000i64) {
        let original = reminder(&format_utc(&due), Repeat::None);
        let there = snooze(&[original.clone()], &original.id, minutes);
        let back = snooze(&there, &original.id, -minutes);

        prop_assert_eq!(
            instant_of(&there[0].due_iso).unwrap() - due,
            Duration::minutes(minutes)
        );
        prop_assert_eq!(&back[0], &original);
    }

    #[test]
    fn prop_status_filters_partition(
        dues in prop::collection::vec((instant(), any::<bool>()), 0..20),
        now in instant(),
    ) {
        let reminders: Vec<Reminder> = dues
            .iter()
            .map(|(due, done)| {
                let mut r = reminder(&format_utc(due), Repeat::None);
                if *done {
                    r.completed_at_iso = Some(format_utc(due));
                }
                r
            })
            .collect();

        let count = |status| {
            ReminderQuery { status: Some(status), ..Default::default() }
                .apply(&reminders, &now)
                .len()
        };
        let total = count(ReminderStatus::Completed)
            + count(ReminderStatus::Overdue)
            + count(ReminderStatus::Upcoming);
        prop_assert_eq!(total, reminders.len());
    }
}
